use super::star;
use crate::certificate::layout::Slot;
use crate::certificate::ResolvedRecord;
use crate::render::canvas::{hex, Canvas, TextStyle};

const NAVY: u32 = 0x0B1F3A;
const NAVY_LIGHT: u32 = 0x16335C;
const GOLD: u32 = 0xC9A227;
const WHITE: u32 = 0xFFFFFF;
const MIST: u32 = 0xB8C4D6;
const BODY: u32 = 0xD6DEEA;

/// Between the course title and the top of the medal.
const DESCRIPTION_SLOT: Slot = Slot {
    top: 346.0,
    bottom: 432.0,
};

pub fn draw(canvas: &mut Canvas<'_>, record: &ResolvedRecord) {
    canvas.clear(hex(NAVY));

    canvas.stroke_rect(24.0, 24.0, 752.0, 552.0, 3.0, hex(GOLD));
    canvas.stroke_rect(36.0, 36.0, 728.0, 528.0, 1.0, hex(GOLD));

    // diagonal corner ribbons
    canvas.fill_polygon(
        &[(36.0, 36.0), (150.0, 36.0), (36.0, 150.0)],
        hex(NAVY_LIGHT),
    );
    canvas.fill_polygon(
        &[(36.0, 112.0), (112.0, 36.0), (134.0, 36.0), (36.0, 134.0)],
        hex(GOLD),
    );
    canvas.fill_polygon(
        &[(764.0, 564.0), (650.0, 564.0), (764.0, 450.0)],
        hex(NAVY_LIGHT),
    );
    canvas.fill_polygon(
        &[(764.0, 488.0), (688.0, 564.0), (666.0, 564.0), (764.0, 466.0)],
        hex(GOLD),
    );

    canvas.text(
        &format!("No. {}", record.certificate_id),
        740.0,
        62.0,
        &TextStyle::sans(11.0, MIST).right(),
    );
    canvas.text(
        &record.organization.to_uppercase(),
        400.0,
        96.0,
        &TextStyle::sans(18.0, GOLD).center(),
    );
    canvas.text(
        "Certificate of Achievement",
        400.0,
        148.0,
        &TextStyle::serif(30.0, WHITE).center(),
    );
    canvas.text(
        "proudly presented to",
        400.0,
        196.0,
        &TextStyle::sans(14.0, MIST).center(),
    );
    canvas.text(
        &record.recipient_name,
        400.0,
        258.0,
        &TextStyle::serif(46.0, WHITE).center(),
    );
    canvas.line((220.0, 280.0), (580.0, 280.0), 1.5, hex(GOLD));
    canvas.text(
        &record.title,
        400.0,
        322.0,
        &TextStyle::sans(22.0, GOLD).center(),
    );

    canvas.paragraph(
        &record.description,
        400.0,
        DESCRIPTION_SLOT,
        560.0,
        19.0,
        &TextStyle::sans(13.0, BODY).center(),
    );

    // medal
    canvas.fill_polygon(
        &[
            (378.0, 500.0),
            (396.0, 500.0),
            (390.0, 556.0),
            (380.0, 546.0),
            (368.0, 556.0),
        ],
        hex(GOLD),
    );
    canvas.fill_polygon(
        &[
            (404.0, 500.0),
            (422.0, 500.0),
            (432.0, 556.0),
            (420.0, 546.0),
            (410.0, 556.0),
        ],
        hex(GOLD),
    );
    canvas.fill_circle(400.0, 482.0, 36.0, hex(GOLD));
    canvas.stroke_circle(400.0, 482.0, 29.0, 2.0, hex(NAVY));
    canvas.fill_polygon(&star(400.0, 483.0, 18.0, 7.5), hex(NAVY));

    // signature
    canvas.line((90.0, 520.0), (290.0, 520.0), 1.0, hex(MIST));
    canvas.text(
        &record.signatory,
        190.0,
        510.0,
        &TextStyle::serif(18.0, WHITE).center(),
    );
    canvas.text(
        "Signature",
        190.0,
        540.0,
        &TextStyle::sans(11.0, MIST).center(),
    );

    // date
    canvas.line((510.0, 520.0), (710.0, 520.0), 1.0, hex(MIST));
    canvas.text(
        &record.issue_date,
        610.0,
        510.0,
        &TextStyle::sans(16.0, WHITE).center(),
    );
    canvas.text("Date", 610.0, 540.0, &TextStyle::sans(11.0, MIST).center());
}
