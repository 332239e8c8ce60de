use std::path::Path;
use tera::Tera;
use tracing::warn;

const INDEX: &str = include_str!("../templates/index.html");

/// Builds the page templates: the built-in set, overridden by any `.html`
/// files found in `dir`.
pub fn load_templates(dir: &Path) -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_template("index.html", INDEX)?;

    let Ok(entries) = std::fs::read_dir(dir) else {
        return Ok(tera);
    };
    let files: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.extension().map_or(false, |ext| ext == "html"))
        .filter_map(|p| {
            let name = p.file_name()?.to_str()?.to_string();
            Some((p, Some(name)))
        })
        .collect();

    if let Err(e) = tera.add_template_files(files) {
        warn!("Ignoring templates in {}: {}", dir.display(), e);
        tera = Tera::default();
        tera.add_raw_template("index.html", INDEX)?;
    }
    Ok(tera)
}
