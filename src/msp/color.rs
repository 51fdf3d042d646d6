//! Display-color resolution for features.
//!
//! Color resolution is deterministic: a per-feature style override wins,
//! otherwise the kind default applies. Introns are the one special case:
//! their coding status is inherited from the flanking exons of the owning
//! transcript, with UTR taking precedence over CDS.

use crate::msp::Kind;
use crate::msp::MspId;
use crate::session::Session;
use crate::style::Color;
use crate::style::color_by_name;

/// Returns the fill and line default colors for a kind.
fn kind_defaults(kind: Kind) -> (Color, Color) {
    match kind {
        Kind::Match => (Color::new(0, 255, 255), Color::new(0, 0, 175)),
        Kind::Exon => (Color::new(255, 255, 0), Color::new(160, 80, 0)),
        Kind::Cds => (Color::new(0, 255, 0), Color::new(0, 175, 0)),
        Kind::Utr => (Color::new(255, 0, 0), Color::new(175, 0, 0)),
        Kind::Intron => (Color::new(255, 255, 0), Color::new(160, 80, 0)),
        Kind::Transcript => (Color::new(235, 235, 235), Color::new(150, 150, 150)),
        Kind::Variation => (Color::new(255, 200, 255), Color::new(192, 0, 255)),
        Kind::Region => (Color::new(255, 220, 110), Color::new(255, 128, 0)),
        Kind::PolyASite => (Color::new(255, 160, 160), Color::new(255, 0, 0)),
        Kind::PolyASignal => (Color::new(160, 200, 255), Color::new(0, 0, 255)),
        Kind::Segment => (Color::new(160, 255, 160), Color::new(0, 175, 0)),
        Kind::XyPlot => (Color::new(0, 0, 255), Color::new(0, 0, 255)),
        Kind::Gsp => (Color::new(200, 200, 200), Color::new(100, 100, 100)),
    }
}

/// Darkens a color for selected rendering.
fn darken(color: Color) -> Color {
    Color::new(
        (color.r as u16 * 7 / 10) as u8,
        (color.g as u16 * 7 / 10) as u8,
        (color.b as u16 * 7 / 10) as u8,
    )
}

/// Converts a color to its grayscale luminance for print rendering.
fn grayscale(color: Color) -> Color {
    let y = (color.r as u32 * 299 + color.g as u32 * 587 + color.b as u32 * 114) / 1000;
    Color::new(y as u8, y as u8, y as u8)
}

/// Resolves the coloring kind for an intron.
///
/// Scans the full MSP list of the intron's owning sequence, tracking the
/// closest flanking exon on each side of the intron. If the closest exon on
/// either side is UTR, the intron colors as UTR; otherwise, if any flanking
/// exon exists, it colors as CDS; with no flanking exon at all the generic
/// exon default applies.
pub fn intron_coloring_kind(session: &Session, id: MspId) -> Kind {
    let msp = session.msp(id);
    debug_assert!(msp.kind().is_intron());

    let Some(sequence) = msp.sequence() else {
        return Kind::Exon;
    };

    let intron = msp.ref_range();
    let mut left: Option<(i64, Kind)> = None;
    let mut right: Option<(i64, Kind)> = None;

    for other_id in session.registry().sequence(sequence).msps() {
        let other = session.msp(*other_id);
        if !other.kind().is_exon() {
            continue;
        }

        let exon = other.ref_range();
        if exon.max() <= intron.min() {
            let offset = intron.min() - exon.max();
            if left.map(|(best, _)| offset < best).unwrap_or(true) {
                left = Some((offset, other.kind()));
            }
        } else if exon.min() >= intron.max() {
            let offset = exon.min() - intron.max();
            if right.map(|(best, _)| offset < best).unwrap_or(true) {
                right = Some((offset, other.kind()));
            }
        }
    }

    let utr_flank = [left, right]
        .into_iter()
        .any(|flank| matches!(flank, Some((_, Kind::Utr))));

    if utr_flank {
        Kind::Utr
    } else if left.is_some() || right.is_some() {
        Kind::Cds
    } else {
        Kind::Exon
    }
}

/// Resolves the display color for a feature.
///
/// Priority: the per-feature style override (a named color), else the kind
/// default, with introns first resolved against their flanking exons via
/// [`intron_coloring_kind`]. `fill` selects the fill color over the line
/// color; `selected` darkens and `print` converts to grayscale.
pub fn resolve(session: &Session, id: MspId, selected: bool, print: bool, fill: bool) -> Color {
    let msp = session.msp(id);

    let base = match msp.style().and_then(color_by_name) {
        Some(color) => color,
        None => {
            let kind = if msp.kind().is_intron() {
                intron_coloring_kind(session, id)
            } else {
                msp.kind()
            };

            let (fill_color, line_color) = kind_defaults(kind);
            if fill {
                fill_color
            } else {
                line_color
            }
        }
    };

    let base = if selected { darken(base) } else { base };

    if print {
        grayscale(base)
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Range;
    use crate::core::Strand;
    use crate::msp::Msp;
    use crate::session::Session;

    /// Builds a transcript with two exons around one intron and returns the
    /// intron's id.
    fn transcript(left: Kind, right: Kind) -> (Session, MspId) {
        let mut session = Session::default();

        for (kind, start, end) in [(left, 1, 10), (Kind::Intron, 11, 89), (right, 90, 100)] {
            let mut msp = Msp::new(kind, "chr1", Range::new(start, end), Strand::Forward, 0);
            msp.match_name = Some("tx-1".to_string());
            session.create_msp(msp).unwrap();
        }

        let intron = session
            .msps()
            .iter()
            .position(|msp| msp.kind().is_intron())
            .map(MspId)
            .unwrap();

        (session, intron)
    }

    #[test]
    fn intron_with_utr_flank_is_utr() {
        let (session, intron) = transcript(Kind::Utr, Kind::Cds);
        assert_eq!(intron_coloring_kind(&session, intron), Kind::Utr);

        let (session, intron) = transcript(Kind::Cds, Kind::Utr);
        assert_eq!(intron_coloring_kind(&session, intron), Kind::Utr);
    }

    #[test]
    fn intron_with_cds_flanks_is_cds() {
        let (session, intron) = transcript(Kind::Cds, Kind::Cds);
        assert_eq!(intron_coloring_kind(&session, intron), Kind::Cds);
    }

    #[test]
    fn lone_intron_uses_generic_default() {
        let mut session = Session::default();
        let mut msp = Msp::new(
            Kind::Intron,
            "chr1",
            Range::new(11, 89),
            Strand::Forward,
            0,
        );
        msp.match_name = Some("tx-1".to_string());
        let intron = session.create_msp(msp).unwrap();

        assert_eq!(intron_coloring_kind(&session, intron), Kind::Exon);
    }

    #[test]
    fn only_the_nearest_exon_per_side_counts() {
        let mut session = Session::default();

        // A UTR exon beyond a nearer CDS exon on the same side must not
        // affect the intron.
        for (kind, start, end) in [
            (Kind::Utr, 1, 5),
            (Kind::Cds, 6, 10),
            (Kind::Intron, 11, 89),
            (Kind::Cds, 90, 100),
        ] {
            let mut msp = Msp::new(kind, "chr1", Range::new(start, end), Strand::Forward, 0);
            msp.match_name = Some("tx-1".to_string());
            session.create_msp(msp).unwrap();
        }

        let intron = session
            .msps()
            .iter()
            .position(|msp| msp.kind().is_intron())
            .map(MspId)
            .unwrap();

        assert_eq!(intron_coloring_kind(&session, intron), Kind::Cds);
    }

    #[test]
    fn style_override_wins() {
        let (mut session, intron) = transcript(Kind::Cds, Kind::Cds);
        session.msp_mut(intron).style = Some("cerise".to_string());

        assert_eq!(
            resolve(&session, intron, false, false, true),
            Color::new(255, 0, 128)
        );
    }

    #[test]
    fn resolved_intron_color_matches_cds_fill() {
        let (session, intron) = transcript(Kind::Cds, Kind::Cds);
        let (cds_fill, _) = kind_defaults(Kind::Cds);
        assert_eq!(resolve(&session, intron, false, false, true), cds_fill);
    }
}
