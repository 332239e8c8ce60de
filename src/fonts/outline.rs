use tiny_skia::{Path, PathBuilder, Transform};

/// Collects a glyph outline from `ttf_parser` into a tiny-skia path.
///
/// Points stay in font design units (y-up); [`glyph_transform`] maps them
/// onto the surface.
pub struct OutlineBuilder {
    builder: PathBuilder,
}

impl OutlineBuilder {
    pub fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    /// Outlines `glyph` from `face`. Blank glyphs such as spaces give `None`.
    pub fn glyph(face: &ttf_parser::Face<'_>, glyph: ttf_parser::GlyphId) -> Option<Path> {
        let mut outline = Self::new();
        face.outline_glyph(glyph, &mut outline)?;
        outline.builder.finish()
    }
}

impl ttf_parser::OutlineBuilder for OutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Maps design units to surface pixels with the baseline origin at `(x, y)`,
/// flipping Y to match tiny-skia.
pub fn glyph_transform(scale: f32, x: f32, y: f32) -> Transform {
    Transform::from_row(scale, 0.0, 0.0, -scale, x, y)
}
