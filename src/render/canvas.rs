//! Drawing primitives over a tiny-skia pixmap.
//!
//! All coordinates are logical (800x600). The canvas carries a base
//! transform that scales them uniformly onto the physical pixmap.

use crate::certificate::layout::{truncate_lines, wrap_text, LineBlock, Slot, TextMeasure};
use crate::fonts::{glyph_transform, FontCache, FontRole, OutlineBuilder};
use serde::Serialize;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;

/// Average advance, as a fraction of the font size, used when no face exists.
const FALLBACK_ADVANCE: f32 = 0.55;

/// Smallest size a paragraph is shrunk to before it is truncated instead.
const MIN_PARAGRAPH_SIZE: f32 = 9.0;
const SIZE_STEP: f32 = 0.5;

pub fn hex(rgb: u32) -> Color {
    Color::from_rgba8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub role: FontRole,
    pub size: f32,
    pub color: Color,
    pub align: Align,
}

impl TextStyle {
    pub fn sans(size: f32, color: u32) -> Self {
        Self {
            role: FontRole::Sans,
            size,
            color: hex(color),
            align: Align::Left,
        }
    }

    pub fn serif(size: f32, color: u32) -> Self {
        Self {
            role: FontRole::Serif,
            ..Self::sans(size, color)
        }
    }

    pub fn center(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn right(mut self) -> Self {
        self.align = Align::Right;
        self
    }
}

/// A string as it was placed on the surface, in logical coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedText {
    pub text: String,
    /// Alignment anchor on the x axis.
    pub x: f32,
    /// Alphabetic baseline.
    pub y: f32,
    pub align: Align,
    pub left: f32,
    pub right: f32,
    pub role: FontRole,
    pub size: f32,
}

impl PlacedText {
    #[cfg(test)]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

/// Measures strings for one face and size.
pub struct Measurer<'f> {
    face: Option<ttf_parser::Face<'f>>,
    size: f32,
}

impl<'f> Measurer<'f> {
    pub fn new(fonts: &'f FontCache, role: FontRole, size: f32) -> Self {
        Self {
            face: fonts.face(role).and_then(|face| face.parse()),
            size,
        }
    }

    fn scale(face: &ttf_parser::Face<'_>, size: f32) -> f32 {
        size / face.units_per_em().max(1) as f32
    }
}

impl TextMeasure for Measurer<'_> {
    fn measure(&self, text: &str) -> f32 {
        match &self.face {
            Some(face) => {
                let scale = Self::scale(face, self.size);
                text.chars()
                    .map(|ch| {
                        let glyph = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
                        face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale
                    })
                    .sum()
            }
            None => text.chars().count() as f32 * self.size * FALLBACK_ADVANCE,
        }
    }
}

pub struct Canvas<'a> {
    pixmap: &'a mut Pixmap,
    base: Transform,
    fonts: &'a FontCache,
    texts: Vec<PlacedText>,
}

impl<'a> Canvas<'a> {
    pub fn new(pixmap: &'a mut Pixmap, scale: f32, fonts: &'a FontCache) -> Self {
        Self {
            pixmap,
            base: Transform::from_scale(scale, scale),
            fonts,
            texts: Vec::new(),
        }
    }

    /// Hands back every string drawn, in drawing order.
    pub fn finish(self) -> Vec<PlacedText> {
        self.texts
    }

    fn paint(color: Color) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = true;
        paint
    }

    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(color);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        if let Some(rect) = Rect::from_xywh(x, y, w, h) {
            self.pixmap
                .fill_rect(rect, &Self::paint(color), self.base, None);
        }
    }

    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: Color) {
        let Some(rect) = Rect::from_xywh(x, y, w, h) else {
            return;
        };
        let path = PathBuilder::from_rect(rect);
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &Self::paint(color), &stroke, self.base, None);
    }

    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color),
                FillRule::Winding,
                self.base,
                None,
            );
        }
    }

    pub fn stroke_circle(&mut self, cx: f32, cy: f32, r: f32, width: f32, color: Color) {
        if let Some(path) = PathBuilder::from_circle(cx, cy, r) {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &Self::paint(color), &stroke, self.base, None);
        }
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.0, from.1);
        pb.line_to(to.0, to.1);
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&path, &Self::paint(color), &stroke, self.base, None);
        }
    }

    pub fn fill_polygon(&mut self, points: &[(f32, f32)], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut pb = PathBuilder::new();
        pb.move_to(first.0, first.1);
        for (x, y) in rest {
            pb.line_to(*x, *y);
        }
        pb.close();
        if let Some(path) = pb.finish() {
            self.pixmap.fill_path(
                &path,
                &Self::paint(color),
                FillRule::Winding,
                self.base,
                None,
            );
        }
    }

    pub fn measurer(&self, style: &TextStyle) -> Measurer<'a> {
        Measurer::new(self.fonts, style.role, style.size)
    }

    /// Draws one line of text with its baseline at `y`. Returns its width.
    pub fn text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> f32 {
        let measurer = self.measurer(style);
        let width = measurer.measure(text);
        let left = match style.align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };

        if let Some(face) = &measurer.face {
            let scale = Measurer::scale(face, style.size);
            let paint = Self::paint(style.color);
            let mut pen = left;
            for ch in text.chars() {
                let glyph = face.glyph_index(ch).unwrap_or(ttf_parser::GlyphId(0));
                if let Some(path) = OutlineBuilder::glyph(face, glyph) {
                    let transform = self.base.pre_concat(glyph_transform(scale, pen, y));
                    self.pixmap
                        .fill_path(&path, &paint, FillRule::Winding, transform, None);
                }
                pen += face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
            }
        }

        self.texts.push(PlacedText {
            text: text.to_string(),
            x,
            y,
            align: style.align,
            left,
            right: left + width,
            role: style.role,
            size: style.size,
        });
        width
    }

    /// Wraps `text` to `max_width` and draws it centred in `slot`.
    ///
    /// If the wrapped block is taller than the slot, the size and line
    /// height shrink together in steps down to [`MIN_PARAGRAPH_SIZE`]. Lines
    /// that still do not fit are cut, and the last kept line ends in an
    /// ellipsis.
    pub fn paragraph(
        &mut self,
        text: &str,
        x: f32,
        slot: Slot,
        max_width: f32,
        line_height: f32,
        style: &TextStyle,
    ) -> LineBlock {
        let base_size = style.size;
        let min_size = MIN_PARAGRAPH_SIZE.min(base_size);
        let mut style = *style;
        loop {
            let leading = line_height * style.size / base_size;
            let measurer = self.measurer(&style);
            let lines = wrap_text(text, max_width, &measurer);
            let capacity = slot.capacity(leading);
            if lines.len() <= capacity || style.size <= min_size {
                if lines.len() > capacity {
                    debug!(
                        "Truncating paragraph from {} to {} lines",
                        lines.len(),
                        capacity
                    );
                }
                let lines = truncate_lines(lines, capacity, max_width, &measurer);
                let block = LineBlock::centered(lines, slot.anchor(), leading);
                for (line, y) in block.baselines() {
                    self.text(line, x, y, &style);
                }
                return block;
            }
            style.size = (style.size - SIZE_STEP).max(min_size);
        }
    }
}
