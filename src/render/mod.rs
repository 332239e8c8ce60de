pub mod canvas;
mod designs;

pub use canvas::PlacedText;

use crate::certificate::{CertificateRecord, ResolvedRecord, TemplateKind};
use crate::error::{ExportError, RenderError};
use crate::fonts::FontCache;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tiny_skia::Pixmap;
use tokio::sync::watch;
use tracing::debug;

/// Canonical drawing resolution. Every template is laid out against it.
pub const LOGICAL_WIDTH: f32 = 800.0;
pub const LOGICAL_HEIGHT: f32 = 600.0;

pub const MIN_SCALE: f32 = 0.25;
pub const MAX_SCALE: f32 = 2.0;

/// A fully painted certificate.
#[derive(Debug, Clone)]
pub struct Surface {
    pixmap: Pixmap,
    kind: TemplateKind,
    record: ResolvedRecord,
    scale: f32,
    texts: Vec<PlacedText>,
}

impl Surface {
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    /// The record as it was drawn, defaults applied.
    pub fn record(&self) -> &ResolvedRecord {
        &self.record
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Every string drawn, in logical coordinates.
    pub fn texts(&self) -> &[PlacedText] {
        &self.texts
    }

    #[cfg(test)]
    pub fn find_text(&self, text: &str) -> Option<&PlacedText> {
        self.texts.iter().find(|t| t.text == text)
    }
}

/// Clears a new surface and paints `kind` for `record` onto it.
///
/// Non-canonical sizes come only from `scale`, which is applied uniformly to
/// the 800x600 layout.
pub fn render_certificate(
    kind: TemplateKind,
    record: &ResolvedRecord,
    fonts: &FontCache,
    scale: f32,
) -> Result<Surface, RenderError> {
    if !scale.is_finite() || !(MIN_SCALE..=MAX_SCALE).contains(&scale) {
        return Err(RenderError::InvalidScale(scale));
    }

    let width = (LOGICAL_WIDTH * scale).round() as u32;
    let height = (LOGICAL_HEIGHT * scale).round() as u32;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Surface { width, height })?;

    let mut canvas = canvas::Canvas::new(&mut pixmap, scale, fonts);
    match kind {
        TemplateKind::UxDesignFoundations => {
            designs::ux_design_foundations::draw(&mut canvas, record)
        }
        TemplateKind::ProductDesigner1 => designs::product_designer::draw(&mut canvas, record),
        TemplateKind::Academic => designs::academic::composition(record).paint(&mut canvas),
        TemplateKind::Modern => designs::modern::composition(record).paint(&mut canvas),
    }
    let texts = canvas.finish();

    debug!(
        "Rendered {} at {}x{} ({} text runs)",
        kind,
        width,
        height,
        texts.len()
    );

    Ok(Surface {
        pixmap,
        kind,
        record: record.clone(),
        scale,
        texts,
    })
}

/// One on-screen certificate: repaints on demand and publishes the latest
/// surface so exports can use it without rendering again.
pub struct CertificateView {
    fonts: Arc<FontCache>,
    published: watch::Sender<Option<Arc<Surface>>>,
    exporting: AtomicBool,
}

impl CertificateView {
    pub fn new(fonts: Arc<FontCache>) -> Self {
        let (published, _) = watch::channel(None);
        Self {
            fonts,
            published,
            exporting: AtomicBool::new(false),
        }
    }

    /// Fully repaints and publishes the new surface.
    pub fn repaint(
        &self,
        kind: TemplateKind,
        record: &CertificateRecord,
        scale: f32,
    ) -> Result<Arc<Surface>, RenderError> {
        let surface = Arc::new(render_certificate(kind, &record.resolve(), &self.fonts, scale)?);
        self.published.send_replace(Some(surface.clone()));
        Ok(surface)
    }

    /// The most recently painted surface, if any paint has happened.
    pub fn surface(&self) -> Option<Arc<Surface>> {
        self.published.borrow().clone()
    }

    /// Resolves once the first paint has been published.
    pub async fn painted(&self) -> Option<Arc<Surface>> {
        let mut rx = self.published.subscribe();
        loop {
            let current = rx.borrow_and_update().clone();
            if current.is_some() {
                return current;
            }
            rx.changed().await.ok()?;
        }
    }

    /// Claims the view for one export. Fails if nothing is painted yet or
    /// another export holds the claim. The claim is released when the guard
    /// drops, so it should travel with the encoding work.
    pub fn begin_export(self: &Arc<Self>) -> Result<(Arc<Surface>, ExportGuard), ExportError> {
        let surface = self.surface().ok_or(ExportError::NotRendered)?;
        self.exporting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ExportError::Busy)?;
        Ok((surface, ExportGuard { view: self.clone() }))
    }
}

pub struct ExportGuard {
    view: Arc<CertificateView>,
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.view.exporting.store(false, Ordering::Release);
    }
}
