pub mod document;
pub mod raster;

use crate::error::ExportError;
use crate::render::Surface;
use regex::Regex;
use std::io::Write;
use std::sync::OnceLock;
use zip::write::SimpleFileOptions;

/// A finished download, assembled entirely in memory.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    pub fn new(filename: String, bytes: Vec<u8>) -> Self {
        let content_type = mime_guess::from_path(&filename)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        Self {
            filename,
            content_type,
            bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Pdf,
    Bundle,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "png" => Some(ExportFormat::Png),
            "pdf" => Some(ExportFormat::Pdf),
            "all" => Some(ExportFormat::Bundle),
            _ => None,
        }
    }
}

fn unsafe_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]+").expect("valid pattern"))
}

/// Reduces a caller-supplied name to `[A-Za-z0-9._-]`, without extension.
pub fn sanitize_basename(name: &str) -> Option<String> {
    let cleaned = unsafe_chars().replace_all(name.trim(), "-");
    let cleaned = cleaned.trim_matches(|c: char| c == '-' || c == '.');
    let cleaned = cleaned
        .strip_suffix(".png")
        .or_else(|| cleaned.strip_suffix(".pdf"))
        .unwrap_or(cleaned);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// `certificate-<recipient>` unless the caller picked a usable name.
pub fn download_basename(requested: Option<&str>, recipient: &str) -> String {
    requested
        .and_then(sanitize_basename)
        .or_else(|| sanitize_basename(&format!("certificate-{}", recipient)))
        .unwrap_or_else(|| "certificate".to_string())
}

/// Zip archive holding both the PNG and the PDF.
pub fn export_bundle(surface: &Surface, basename: &str) -> Result<ExportArtifact, ExportError> {
    let png = raster::export_png(surface, basename)?;
    let pdf = document::export_pdf(surface, basename)?;

    let zip_error = |reason: String| ExportError::Encode {
        format: "ZIP",
        reason,
    };
    let options = || {
        SimpleFileOptions::default()
            .last_modified_time(zip::DateTime::default())
            .unix_permissions(0o644)
    };

    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for part in [&png, &pdf] {
        zip.start_file(part.filename.as_str(), options())
            .map_err(|e| zip_error(e.to_string()))?;
        zip.write_all(&part.bytes)
            .map_err(|e| zip_error(e.to_string()))?;
    }
    let cursor = zip.finish().map_err(|e| zip_error(e.to_string()))?;

    Ok(ExportArtifact::new(
        format!("{}.zip", basename),
        cursor.into_inner(),
    ))
}

pub fn export(
    surface: &Surface,
    format: ExportFormat,
    basename: &str,
) -> Result<ExportArtifact, ExportError> {
    match format {
        ExportFormat::Png => raster::export_png(surface, basename),
        ExportFormat::Pdf => document::export_pdf(surface, basename),
        ExportFormat::Bundle => export_bundle(surface, basename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::{CertificateRecord, TemplateKind};
    use crate::fonts::FontCache;
    use crate::render::render_certificate;
    use std::io::Read;

    #[test]
    fn sanitizes_names() {
        assert_eq!(sanitize_basename("Ada Lovelace").as_deref(), Some("Ada-Lovelace"));
        assert_eq!(sanitize_basename("../../etc/passwd").as_deref(), Some("etc-passwd"));
        assert_eq!(sanitize_basename("report.pdf").as_deref(), Some("report"));
        assert_eq!(sanitize_basename("  ///  "), None);
    }

    #[test]
    fn basename_falls_back_to_recipient() {
        assert_eq!(download_basename(None, "Ada Lovelace"), "certificate-Ada-Lovelace");
        assert_eq!(download_basename(Some("!!!"), "Ada"), "certificate-Ada");
        assert_eq!(download_basename(Some("mine"), "Ada"), "mine");
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(ExportArtifact::new("a.zip".into(), vec![]).content_type, "application/zip");
        assert_eq!(
            ExportArtifact::new("a.bin-x".into(), vec![]).content_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn bundle_holds_png_and_pdf() {
        let surface = render_certificate(
            TemplateKind::Modern,
            &CertificateRecord::default().resolve(),
            &FontCache::empty(),
            0.5,
        )
        .unwrap();
        let artifact = export(&surface, ExportFormat::Bundle, "cert").unwrap();
        assert_eq!(artifact.filename, "cert.zip");

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(artifact.bytes)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut pdf = Vec::new();
        archive
            .by_name("cert.pdf")
            .unwrap()
            .read_to_end(&mut pdf)
            .unwrap();
        assert_eq!(pdf, document::pdf_bytes(&surface).unwrap());
        assert!(archive.by_name("cert.png").is_ok());
    }

    #[test]
    fn formats_parse_from_route_names() {
        assert_eq!(ExportFormat::parse("png"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::parse("all"), Some(ExportFormat::Bundle));
        assert_eq!(ExportFormat::parse("gif"), None);
    }
}
