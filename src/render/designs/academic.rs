use super::{Composition, Decoration, TextBlock};
use crate::certificate::layout::Slot;
use crate::certificate::ResolvedRecord;
use crate::render::canvas::{hex, TextStyle};

const PAPER: u32 = 0xFBF7EC;
const MAROON: u32 = 0x7A1F2B;
const GOLD: u32 = 0xB08D57;
const INK: u32 = 0x2B2B2B;
const GREY: u32 = 0x5A5A5A;

/// Between the course title and the seal.
const DESCRIPTION_SLOT: Slot = Slot {
    top: 364.0,
    bottom: 452.0,
};

fn corner_marks() -> Vec<Decoration> {
    [(40.0, 40.0), (750.0, 40.0), (40.0, 550.0), (750.0, 550.0)]
        .into_iter()
        .map(|(x, y)| Decoration::Rect {
            x,
            y,
            w: 10.0,
            h: 10.0,
            fill: hex(GOLD),
        })
        .collect()
}

pub fn composition(record: &ResolvedRecord) -> Composition {
    let mut decorations = vec![
        Decoration::Frame {
            x: 20.0,
            y: 20.0,
            w: 760.0,
            h: 560.0,
            width: 4.0,
            color: hex(MAROON),
        },
        Decoration::Frame {
            x: 32.0,
            y: 32.0,
            w: 736.0,
            h: 536.0,
            width: 1.0,
            color: hex(GOLD),
        },
        Decoration::Line {
            from: (230.0, 280.0),
            to: (570.0, 280.0),
            width: 1.0,
            color: hex(GOLD),
        },
        // seal
        Decoration::Disc {
            cx: 400.0,
            cy: 500.0,
            r: 36.0,
            fill: hex(MAROON),
        },
        Decoration::Ring {
            cx: 400.0,
            cy: 500.0,
            r: 30.0,
            width: 1.5,
            color: hex(GOLD),
        },
        Decoration::Polygon {
            points: super::star(400.0, 501.0, 17.0, 7.0),
            fill: hex(GOLD),
        },
        // signature and date rules
        Decoration::Line {
            from: (110.0, 500.0),
            to: (310.0, 500.0),
            width: 1.0,
            color: hex(GREY),
        },
        Decoration::Line {
            from: (490.0, 500.0),
            to: (690.0, 500.0),
            width: 1.0,
            color: hex(GREY),
        },
    ];
    decorations.extend(corner_marks());

    let blocks = vec![
        TextBlock::line(
            record.organization.to_uppercase(),
            400.0,
            92.0,
            TextStyle::serif(20.0, MAROON).center(),
        ),
        TextBlock::line(
            "Certificate of Achievement",
            400.0,
            150.0,
            TextStyle::serif(40.0, INK).center(),
        ),
        TextBlock::line(
            "This certificate is presented to",
            400.0,
            200.0,
            TextStyle::sans(15.0, GREY).center(),
        ),
        TextBlock::line(
            record.recipient_name.clone(),
            400.0,
            262.0,
            TextStyle::serif(44.0, MAROON).center(),
        ),
        TextBlock::line(
            "in recognition of completing",
            400.0,
            310.0,
            TextStyle::sans(14.0, GREY).center(),
        ),
        TextBlock::line(
            record.title.clone(),
            400.0,
            342.0,
            TextStyle::serif(24.0, INK).center(),
        ),
        TextBlock::wrapped(
            record.description.clone(),
            400.0,
            DESCRIPTION_SLOT,
            520.0,
            18.0,
            TextStyle::sans(13.0, GREY).center(),
        ),
        TextBlock::line(
            record.signatory.clone(),
            210.0,
            490.0,
            TextStyle::serif(18.0, INK).center(),
        ),
        TextBlock::line(
            "Signatory",
            210.0,
            520.0,
            TextStyle::sans(11.0, GREY).center(),
        ),
        TextBlock::line(
            record.issue_date.clone(),
            590.0,
            490.0,
            TextStyle::sans(15.0, INK).center(),
        ),
        TextBlock::line("Date", 590.0, 520.0, TextStyle::sans(11.0, GREY).center()),
    ];

    Composition {
        background: hex(PAPER),
        decorations,
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certificate::CertificateRecord;

    #[test]
    fn composition_carries_record_fields() {
        let record = CertificateRecord {
            recipient_name: Some("Ada Lovelace".into()),
            organization: Some("Analytical Society".into()),
            ..Default::default()
        }
        .resolve();
        let comp = composition(&record);

        let texts: Vec<&str> = comp.blocks.iter().map(|b| b.text.as_str()).collect();
        assert!(texts.contains(&"Ada Lovelace"));
        assert!(texts.contains(&"ANALYTICAL SOCIETY"));
        assert_eq!(comp.blocks.iter().filter(|b| b.wrap.is_some()).count(), 1);
        // no certificate id on this design
        assert!(!texts.iter().any(|t| t.contains(&record.certificate_id)));
    }
}
