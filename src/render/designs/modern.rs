use super::{Composition, Decoration, TextBlock};
use crate::certificate::layout::Slot;
use crate::certificate::ResolvedRecord;
use crate::render::canvas::{hex, TextStyle};

const PANEL: u32 = 0x111827;
const ACCENT: u32 = 0x22C55E;
const ACCENT_INK: u32 = 0x16A34A;
const WHITE: u32 = 0xFFFFFF;
const GREY: u32 = 0x9CA3AF;
const INK: u32 = 0x111827;
const BODY: u32 = 0x4B5563;

const CONTENT_X: f32 = 290.0;
const CONTENT_WIDTH: f32 = 460.0;

/// Between the heading and "Awarded to".
const TITLE_SLOT: Slot = Slot {
    top: 146.0,
    bottom: 226.0,
};
/// Between the recipient and the signature.
const DESCRIPTION_SLOT: Slot = Slot {
    top: 330.0,
    bottom: 484.0,
};

pub fn composition(record: &ResolvedRecord) -> Composition {
    let decorations = vec![
        Decoration::Rect {
            x: 0.0,
            y: 0.0,
            w: 240.0,
            h: 600.0,
            fill: hex(PANEL),
        },
        Decoration::Rect {
            x: 240.0,
            y: 0.0,
            w: 6.0,
            h: 600.0,
            fill: hex(ACCENT),
        },
        Decoration::QrPlaceholder {
            x: 46.0,
            y: 190.0,
            size: 126.0,
            seed: record.certificate_id.clone(),
            color: hex(PANEL),
        },
        Decoration::Line {
            from: (CONTENT_X, 520.0),
            to: (CONTENT_X + 230.0, 520.0),
            width: 1.0,
            color: hex(GREY),
        },
    ];

    let blocks = vec![
        // side panel
        TextBlock::line(
            record.organization.clone(),
            40.0,
            80.0,
            TextStyle::sans(24.0, WHITE),
        ),
        TextBlock::line("CERTIFICATE", 40.0, 140.0, TextStyle::sans(13.0, GREY)),
        TextBlock::line("Issued", 40.0, 372.0, TextStyle::sans(11.0, GREY)),
        TextBlock::line(
            record.issue_date.clone(),
            40.0,
            396.0,
            TextStyle::sans(15.0, WHITE),
        ),
        TextBlock::line("Certificate ID", 40.0, 436.0, TextStyle::sans(11.0, GREY)),
        TextBlock::line(
            record.certificate_id.clone(),
            40.0,
            460.0,
            TextStyle::sans(15.0, WHITE),
        ),
        // content
        TextBlock::line(
            "Certificate of Completion",
            CONTENT_X,
            110.0,
            TextStyle::sans(16.0, ACCENT_INK),
        ),
        TextBlock::wrapped(
            record.title.clone(),
            CONTENT_X,
            TITLE_SLOT,
            CONTENT_WIDTH,
            38.0,
            TextStyle::serif(34.0, INK),
        ),
        TextBlock::line("Awarded to", CONTENT_X, 250.0, TextStyle::sans(13.0, GREY)),
        TextBlock::line(
            record.recipient_name.clone(),
            CONTENT_X,
            300.0,
            TextStyle::serif(40.0, INK),
        ),
        TextBlock::wrapped(
            record.description.clone(),
            CONTENT_X,
            DESCRIPTION_SLOT,
            CONTENT_WIDTH,
            20.0,
            TextStyle::sans(14.0, BODY),
        ),
        TextBlock::line(
            record.signatory.clone(),
            CONTENT_X,
            510.0,
            TextStyle::serif(18.0, INK),
        ),
        TextBlock::line("Signature", CONTENT_X, 540.0, TextStyle::sans(11.0, GREY)),
    ];

    Composition {
        background: hex(WHITE),
        decorations,
        blocks,
    }
}
