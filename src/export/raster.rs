use super::ExportArtifact;
use crate::error::ExportError;
use crate::render::Surface;
use tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Transform};

/// Linear upscale factor for the downloadable PNG.
pub const RASTER_SCALE: u32 = 3;

/// Copies `surface` into a pixmap three times larger on each axis.
///
/// Uses nearest-neighbour sampling so every source pixel becomes an exact
/// 3x3 block.
pub fn upscale(surface: &Surface) -> Result<Pixmap, ExportError> {
    let width = surface.width() * RASTER_SCALE;
    let height = surface.height() * RASTER_SCALE;
    let mut target = Pixmap::new(width, height).ok_or(ExportError::Surface { format: "PNG" })?;

    let paint = PixmapPaint {
        quality: FilterQuality::Nearest,
        ..PixmapPaint::default()
    };
    let factor = RASTER_SCALE as f32;
    target.draw_pixmap(
        0,
        0,
        surface.pixmap().as_ref(),
        &paint,
        Transform::from_scale(factor, factor),
        None,
    );
    Ok(target)
}

pub fn export_png(surface: &Surface, basename: &str) -> Result<ExportArtifact, ExportError> {
    let bytes = upscale(surface)?
        .encode_png()
        .map_err(|e| ExportError::Encode {
            format: "PNG",
            reason: e.to_string(),
        })?;
    Ok(ExportArtifact::new(format!("{}.png", basename), bytes))
}

/// The surface at its own size, for inline previews.
pub fn preview_png(surface: &Surface) -> Result<Vec<u8>, ExportError> {
    surface.pixmap().encode_png().map_err(|e| ExportError::Encode {
        format: "PNG",
        reason: e.to_string(),
    })
}
