//! Single-page PDF export.
//!
//! The page is A4 landscape and holds one image: the rendered surface,
//! scaled uniformly to fit and centred. The writer emits no dates or random
//! identifiers, so identical surfaces give identical files.

use super::ExportArtifact;
use crate::error::ExportError;
use crate::render::Surface;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;

pub const PAGE_WIDTH_MM: f32 = 297.0;
pub const PAGE_HEIGHT_MM: f32 = 210.0;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Where the image lands on the page, in millimetres from the bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFit {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Largest uniform scale of `width`x`height` that fits the page, centred.
pub fn fit_to_page(width: u32, height: u32, page_w: f32, page_h: f32) -> PageFit {
    let (w, h) = (width.max(1) as f32, height.max(1) as f32);
    let scale = (page_w / w).min(page_h / h);
    let (fit_w, fit_h) = (w * scale, h * scale);
    PageFit {
        x: ((page_w - fit_w) / 2.0).max(0.0),
        y: ((page_h - fit_h) / 2.0).max(0.0),
        width: fit_w,
        height: fit_h,
    }
}

/// Straight RGB samples, composited over white.
fn rgb_samples(surface: &Surface) -> Vec<u8> {
    let mut rgb = Vec::with_capacity((surface.width() * surface.height() * 3) as usize);
    for pixel in surface.pixmap().pixels() {
        let c = pixel.demultiply();
        let alpha = c.alpha() as u32;
        for channel in [c.red(), c.green(), c.blue()] {
            let over_white = (channel as u32 * alpha + 255 * (255 - alpha) + 127) / 255;
            rgb.push(over_white as u8);
        }
    }
    rgb
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, ExportError> {
    let encode = |e: std::io::Error| ExportError::Encode {
        format: "PDF",
        reason: e.to_string(),
    };
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(encode)?;
    encoder.finish().map_err(encode)
}

struct PdfWriter {
    out: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut out = Vec::new();
        out.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        Self {
            out,
            offsets: Vec::new(),
        }
    }

    /// Appends the next object; objects are numbered from 1 in call order.
    fn object(&mut self, dictionary: &str, stream: Option<&[u8]>) {
        let number = self.offsets.len() + 1;
        self.offsets.push(self.out.len());
        self.out
            .extend_from_slice(format!("{} 0 obj\n{}\n", number, dictionary).as_bytes());
        if let Some(data) = stream {
            self.out.extend_from_slice(b"stream\n");
            self.out.extend_from_slice(data);
            self.out.extend_from_slice(b"\nendstream\n");
        }
        self.out.extend_from_slice(b"endobj\n");
    }

    fn finish(mut self, root: usize) -> Vec<u8> {
        let xref_start = self.out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", self.offsets.len() + 1);
        for offset in &self.offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.offsets.len() + 1,
            root,
            xref_start
        ));
        self.out.extend_from_slice(xref.as_bytes());
        self.out
    }
}

/// Builds the PDF bytes for `surface`.
pub fn pdf_bytes(surface: &Surface) -> Result<Vec<u8>, ExportError> {
    let (img_w, img_h) = (surface.width(), surface.height());
    let fit = fit_to_page(img_w, img_h, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
    let page_w = PAGE_WIDTH_MM * POINTS_PER_MM;
    let page_h = PAGE_HEIGHT_MM * POINTS_PER_MM;

    let image = deflate(&rgb_samples(surface))?;
    let content = format!(
        "q\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/Im0 Do\nQ",
        fit.width * POINTS_PER_MM,
        fit.height * POINTS_PER_MM,
        fit.x * POINTS_PER_MM,
        fit.y * POINTS_PER_MM,
    );

    let mut pdf = PdfWriter::new();
    pdf.object("<< /Type /Catalog /Pages 2 0 R >>", None);
    pdf.object("<< /Type /Pages /Kids [3 0 R] /Count 1 >>", None);
    pdf.object(
        &format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /XObject << /Im0 5 0 R >> >> /Contents 4 0 R >>",
            page_w, page_h
        ),
        None,
    );
    pdf.object(
        &format!("<< /Length {} >>", content.len()),
        Some(content.as_bytes()),
    );
    pdf.object(
        &format!(
            "<< /Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB \
             /BitsPerComponent 8 /Filter /FlateDecode /Length {} >>",
            img_w,
            img_h,
            image.len()
        ),
        Some(&image),
    );
    Ok(pdf.finish(1))
}

pub fn export_pdf(surface: &Surface, basename: &str) -> Result<ExportArtifact, ExportError> {
    Ok(ExportArtifact::new(
        format!("{}.pdf", basename),
        pdf_bytes(surface)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::{CertificateRecord, TemplateKind};
    use crate::fonts::FontCache;
    use crate::render::render_certificate;

    fn surface(kind: TemplateKind) -> Surface {
        render_certificate(
            kind,
            &CertificateRecord::default().resolve(),
            &FontCache::empty(),
            1.0,
        )
        .unwrap()
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn four_by_three_is_letterboxed_horizontally() {
        let fit = fit_to_page(800, 600, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
        assert!((fit.height - 210.0).abs() < 1e-3);
        assert!((fit.width - 280.0).abs() < 1e-3);
        assert!((fit.x - 8.5).abs() < 1e-3);
        assert!(fit.y.abs() < 1e-3);
    }

    #[test]
    fn fit_preserves_aspect_and_stays_on_page() {
        for (w, h) in [(800, 600), (200, 600), (1600, 300), (1, 1), (2400, 1800)] {
            let fit = fit_to_page(w, h, PAGE_WIDTH_MM, PAGE_HEIGHT_MM);
            let source = w as f32 / h as f32;
            assert!((fit.width / fit.height - source).abs() < 1e-3 * source);
            assert!(fit.width <= PAGE_WIDTH_MM + 1e-3);
            assert!(fit.height <= PAGE_HEIGHT_MM + 1e-3);
            assert!(fit.x >= -1e-3 && fit.y >= -1e-3);
            assert!((fit.x * 2.0 + fit.width - PAGE_WIDTH_MM).abs() < 1e-3);
        }
    }

    #[test]
    fn pdf_has_one_a4_landscape_page_with_the_image() {
        let artifact = export_pdf(&surface(TemplateKind::UxDesignFoundations), "ada").unwrap();
        assert_eq!(artifact.filename, "ada.pdf");
        assert_eq!(artifact.content_type, "application/pdf");

        let bytes = &artifact.bytes;
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert_eq!(count(bytes, b"/Type /Page "), 1);
        assert_eq!(count(bytes, b"/Count 1"), 1);
        assert_eq!(count(bytes, b"/MediaBox [0 0 841.89 595.28]"), 1);
        assert_eq!(count(bytes, b"/Width 800 /Height 600"), 1);
        // 280mm x 210mm placed 8.5mm from the left
        assert_eq!(count(bytes, b"793.70 0 0 595.28 24.09 0.00 cm"), 1);
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = pdf_bytes(&surface(TemplateKind::Academic)).unwrap();
        let text = String::from_utf8_lossy(&bytes);
        let xref = text.rfind("\nxref\n").unwrap() + 1;
        let entries: Vec<usize> = text[xref..]
            .lines()
            .skip(3)
            .take(5)
            .map(|l| l[..10].parse().unwrap())
            .collect();
        for (i, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", i + 1);
            assert_eq!(&bytes[*offset..*offset + expected.len()], expected.as_bytes());
        }
    }

    #[test]
    fn identical_surfaces_give_identical_bytes() {
        let s = surface(TemplateKind::Modern);
        assert_eq!(pdf_bytes(&s).unwrap(), pdf_bytes(&s).unwrap());
    }

    #[test]
    fn image_stream_inflates_to_rgb_samples() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let s = surface(TemplateKind::Modern);
        let samples = rgb_samples(&s);
        assert_eq!(samples.len(), 800 * 600 * 3);
        // top-left of the modern design is the dark side panel
        assert_eq!(&samples[..3], &[0x11, 0x18, 0x27]);

        let compressed = deflate(&samples).unwrap();
        let mut restored = Vec::new();
        ZlibDecoder::new(&compressed[..])
            .read_to_end(&mut restored)
            .unwrap();
        assert_eq!(restored, samples);
    }
}
