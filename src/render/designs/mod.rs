//! One drawing routine per certificate template.
//!
//! `ux_design_foundations` and `product_designer` paint procedurally.
//! `academic` and `modern` describe a [`Composition`] of decorations and
//! positioned text blocks which [`Composition::paint`] draws.

pub mod academic;
pub mod modern;
pub mod product_designer;
pub mod ux_design_foundations;

use super::canvas::{Canvas, TextStyle};
use crate::certificate::layout::Slot;
use tiny_skia::Color;

#[derive(Debug, Clone)]
pub enum Decoration {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Color,
    },
    Frame {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        width: f32,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },
    Disc {
        cx: f32,
        cy: f32,
        r: f32,
        fill: Color,
    },
    Ring {
        cx: f32,
        cy: f32,
        r: f32,
        width: f32,
        color: Color,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        fill: Color,
    },
    /// Stand-in for a verification QR code, patterned from `seed`.
    QrPlaceholder {
        x: f32,
        y: f32,
        size: f32,
        seed: String,
        color: Color,
    },
}

#[derive(Debug, Clone)]
pub struct Wrap {
    pub slot: Slot,
    pub max_width: f32,
    pub line_height: f32,
}

/// A positioned run of text. Without `wrap`, `y` is the baseline; with it,
/// `y` is the centre of the slot the wrapped block is fitted into.
#[derive(Debug, Clone)]
pub struct TextBlock {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
    pub wrap: Option<Wrap>,
}

impl TextBlock {
    pub fn line(text: impl Into<String>, x: f32, y: f32, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            style,
            wrap: None,
        }
    }

    pub fn wrapped(
        text: impl Into<String>,
        x: f32,
        slot: Slot,
        max_width: f32,
        line_height: f32,
        style: TextStyle,
    ) -> Self {
        Self {
            wrap: Some(Wrap {
                slot,
                max_width,
                line_height,
            }),
            ..Self::line(text, x, slot.anchor(), style)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Composition {
    pub background: Color,
    pub decorations: Vec<Decoration>,
    pub blocks: Vec<TextBlock>,
}

impl Composition {
    pub fn paint(&self, canvas: &mut Canvas<'_>) {
        canvas.clear(self.background);
        for decoration in &self.decorations {
            match decoration {
                Decoration::Rect { x, y, w, h, fill } => canvas.fill_rect(*x, *y, *w, *h, *fill),
                Decoration::Frame {
                    x,
                    y,
                    w,
                    h,
                    width,
                    color,
                } => canvas.stroke_rect(*x, *y, *w, *h, *width, *color),
                Decoration::Line {
                    from,
                    to,
                    width,
                    color,
                } => canvas.line(*from, *to, *width, *color),
                Decoration::Disc { cx, cy, r, fill } => canvas.fill_circle(*cx, *cy, *r, *fill),
                Decoration::Ring {
                    cx,
                    cy,
                    r,
                    width,
                    color,
                } => canvas.stroke_circle(*cx, *cy, *r, *width, *color),
                Decoration::Polygon { points, fill } => canvas.fill_polygon(points, *fill),
                Decoration::QrPlaceholder {
                    x,
                    y,
                    size,
                    seed,
                    color,
                } => qr_placeholder(canvas, *x, *y, *size, seed, *color),
            }
        }
        for block in &self.blocks {
            match &block.wrap {
                Some(wrap) => {
                    canvas.paragraph(
                        &block.text,
                        block.x,
                        wrap.slot,
                        wrap.max_width,
                        wrap.line_height,
                        &block.style,
                    );
                }
                None => {
                    canvas.text(&block.text, block.x, block.y, &block.style);
                }
            }
        }
    }
}

const QR_MODULES: usize = 21;

/// Up to two uppercase initials from the words of `text`.
pub(crate) fn initials(text: &str) -> String {
    text.split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphanumeric())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Points of a five-pointed star centred on `(cx, cy)`, first tip straight up.
pub(crate) fn star(cx: f32, cy: f32, outer: f32, inner: f32) -> Vec<(f32, f32)> {
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = std::f32::consts::PI * (i as f32) / 5.0 - std::f32::consts::FRAC_PI_2;
            (cx + r * angle.cos(), cy + r * angle.sin())
        })
        .collect()
}

/// FNV-1a, used only to derive a stable module pattern.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf29ce484222325, |hash, b| {
        (hash ^ *b as u64).wrapping_mul(0x100000001b3)
    })
}

/// Module grid for the QR stand-in: finder squares in three corners and a
/// pseudo-random fill seeded from `seed`.
pub(crate) fn qr_modules(seed: &str) -> [[bool; QR_MODULES]; QR_MODULES] {
    let mut grid = [[false; QR_MODULES]; QR_MODULES];
    let mut state = fnv1a(seed.as_bytes()) | 1;

    for (row, cells) in grid.iter_mut().enumerate() {
        for (col, cell) in cells.iter_mut().enumerate() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            *cell = state & 1 == 1;

            let finder = [(0, 0), (0, QR_MODULES - 7), (QR_MODULES - 7, 0)]
                .into_iter()
                .find(|(r0, c0)| (*r0..r0 + 7).contains(&row) && (*c0..c0 + 7).contains(&col));
            if let Some((r0, c0)) = finder {
                let (dr, dc) = (row - r0, col - c0);
                let ring = dr == 0 || dr == 6 || dc == 0 || dc == 6;
                let core = (2..=4).contains(&dr) && (2..=4).contains(&dc);
                *cell = ring || core;
            }
        }
    }
    grid
}

fn qr_placeholder(canvas: &mut Canvas<'_>, x: f32, y: f32, size: f32, seed: &str, color: Color) {
    let cell = size / QR_MODULES as f32;
    let quiet = size + 2.0 * cell;
    canvas.fill_rect(
        x - cell,
        y - cell,
        quiet,
        quiet,
        super::canvas::hex(0xFFFFFF),
    );
    for (row, cells) in qr_modules(seed).iter().enumerate() {
        for (col, on) in cells.iter().enumerate() {
            if *on {
                canvas.fill_rect(
                    x + col as f32 * cell,
                    y + row as f32 * cell,
                    cell,
                    cell,
                    color,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("UX Design Foundations"), "UD");
        assert_eq!(initials("product designer"), "PD");
        assert_eq!(initials("Accessibility"), "A");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn star_alternates_radii() {
        let points = star(0.0, 0.0, 10.0, 4.0);
        assert_eq!(points.len(), 10);
        let (x, y) = points[0];
        assert!(x.abs() < 1e-4);
        assert!((y + 10.0).abs() < 1e-4);
        let (x1, y1) = points[1];
        assert!(((x1 * x1 + y1 * y1).sqrt() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn qr_pattern_is_stable_and_seed_dependent() {
        let a = qr_modules("123235467");
        assert_eq!(a, qr_modules("123235467"));
        assert_ne!(a, qr_modules("987654321"));
        // finder ring corners and centre
        assert!(a[0][0] && a[6][6] && a[3][3]);
        assert!(!a[1][1]);
        assert!(a[0][QR_MODULES - 1] && a[QR_MODULES - 1][0]);
    }
}
