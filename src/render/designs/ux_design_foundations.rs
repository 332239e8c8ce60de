use super::initials;
use crate::certificate::layout::Slot;
use crate::certificate::ResolvedRecord;
use crate::render::canvas::{hex, Canvas, TextStyle};

const BACKGROUND: u32 = 0xFFFFFF;
const FRAME: u32 = 0xE4E7EC;
const ACCENT: u32 = 0x3D5AFE;
const INK: u32 = 0x101828;
const MUTED: u32 = 0x667085;
const BODY: u32 = 0x475467;
const RULE: u32 = 0x98A2B3;
const DOTS: u32 = 0xC7D2FE;

pub const DESCRIPTION_WIDTH: f32 = 600.0;
/// Between the rule under the recipient and the signature block.
pub const DESCRIPTION_SLOT: Slot = Slot {
    top: 354.0,
    bottom: 468.0,
};

pub fn draw(canvas: &mut Canvas<'_>, record: &ResolvedRecord) {
    canvas.clear(hex(BACKGROUND));

    canvas.stroke_rect(16.0, 16.0, 768.0, 568.0, 2.0, hex(FRAME));
    canvas.fill_rect(16.0, 16.0, 768.0, 8.0, hex(ACCENT));

    // dot grids in the top-right and bottom-left corners
    for row in 0..4 {
        for col in 0..5 {
            let (dx, dy) = (col as f32 * 12.0, row as f32 * 12.0);
            canvas.fill_circle(560.0 + dx, 50.0 + dy, 2.0, hex(DOTS));
            canvas.fill_circle(44.0 + dx, 510.0 + dy, 2.0, hex(DOTS));
        }
    }

    canvas.text(
        &record.organization,
        56.0,
        80.0,
        &TextStyle::sans(26.0, INK),
    );

    // course badge with ribbon tails
    canvas.fill_polygon(
        &[(668.0, 140.0), (690.0, 140.0), (680.0, 196.0), (668.0, 184.0), (656.0, 196.0)],
        hex(ACCENT),
    );
    canvas.fill_polygon(
        &[(694.0, 140.0), (716.0, 140.0), (728.0, 196.0), (716.0, 184.0), (704.0, 196.0)],
        hex(ACCENT),
    );
    canvas.fill_circle(692.0, 106.0, 50.0, hex(ACCENT));
    canvas.stroke_circle(692.0, 106.0, 41.0, 2.0, hex(BACKGROUND));
    canvas.text(
        &initials(&record.title),
        692.0,
        116.0,
        &TextStyle::sans(26.0, BACKGROUND).center(),
    );

    canvas.text(
        "CERTIFICATE OF COMPLETION",
        400.0,
        170.0,
        &TextStyle::sans(14.0, MUTED).center(),
    );
    canvas.text(
        &record.title,
        400.0,
        222.0,
        &TextStyle::serif(38.0, INK).center(),
    );
    canvas.text(
        "This is to certify that",
        400.0,
        266.0,
        &TextStyle::sans(15.0, MUTED).center(),
    );
    canvas.text(
        &record.recipient_name,
        400.0,
        318.0,
        &TextStyle::serif(42.0, ACCENT).center(),
    );
    canvas.line((250.0, 336.0), (550.0, 336.0), 1.0, hex(FRAME));

    canvas.paragraph(
        &record.description,
        400.0,
        DESCRIPTION_SLOT,
        DESCRIPTION_WIDTH,
        18.0,
        &TextStyle::sans(13.0, BODY).center(),
    );

    // signature
    canvas.line((110.0, 505.0), (330.0, 505.0), 1.0, hex(RULE));
    canvas.text(
        &record.signatory,
        220.0,
        495.0,
        &TextStyle::serif(20.0, INK).center(),
    );
    canvas.text(
        &format!("Instructor, {}", record.organization),
        220.0,
        524.0,
        &TextStyle::sans(12.0, MUTED).center(),
    );

    // date
    canvas.line((470.0, 505.0), (690.0, 505.0), 1.0, hex(RULE));
    canvas.text(
        &record.issue_date,
        580.0,
        495.0,
        &TextStyle::sans(16.0, INK).center(),
    );
    canvas.text(
        "Date of issue",
        580.0,
        524.0,
        &TextStyle::sans(12.0, MUTED).center(),
    );

    canvas.text(
        &format!("Certificate ID: {}", record.certificate_id),
        400.0,
        566.0,
        &TextStyle::sans(11.0, MUTED).center(),
    );
}
