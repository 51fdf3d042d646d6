//! The kind of an alignment feature.

/// The kind of feature an [`Msp`](crate::msp::Msp) represents.
///
/// Despite the record's name ("match/sequence pair"), not every kind is an
/// alignment: exons, introns, variations and feature-series segments all ride
/// on the same record.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// An alignment between the reference and a match sequence.
    Match,

    /// An exon of unknown coding status.
    Exon,

    /// A coding exon.
    Cds,

    /// An untranslated-region exon.
    Utr,

    /// An intron.
    Intron,

    /// A transcript grouping exons and introns.
    Transcript,

    /// A variation (SNP, substitution, insertion or deletion).
    Variation,

    /// A generic annotated region.
    Region,

    /// A polyadenylation site.
    PolyASite,

    /// A polyadenylation signal sequence.
    PolyASignal,

    /// A feature-series segment (FS `SEG` and `GFF` records).
    Segment,

    /// An XY-plot point series (FS `XY` records).
    XyPlot,

    /// A genomic sequence pair (FS `GSP` records). Recognized but
    /// unsupported: records of this kind are dropped with a warning.
    Gsp,
}

impl Kind {
    /// Every defined kind, in declaration order.
    pub const ALL: [Kind; 13] = [
        Kind::Match,
        Kind::Exon,
        Kind::Cds,
        Kind::Utr,
        Kind::Intron,
        Kind::Transcript,
        Kind::Variation,
        Kind::Region,
        Kind::PolyASite,
        Kind::PolyASignal,
        Kind::Segment,
        Kind::XyPlot,
        Kind::Gsp,
    ];

    /// Returns whether this kind is an exon (of any coding status).
    pub fn is_exon(&self) -> bool {
        matches!(self, Kind::Exon | Kind::Cds | Kind::Utr)
    }

    /// Returns whether this kind is an intron.
    pub fn is_intron(&self) -> bool {
        matches!(self, Kind::Intron)
    }

    /// Returns whether this kind is an alignment match.
    pub fn is_match(&self) -> bool {
        matches!(self, Kind::Match)
    }

    /// Returns whether this kind is a variation.
    pub fn is_variation(&self) -> bool {
        matches!(self, Kind::Variation)
    }

    /// Returns whether features of this kind require a match-sequence name,
    /// either directly or via a parent/target reference.
    pub(crate) fn requires_name(&self) -> bool {
        self.is_match() || self.is_exon() || self.is_intron() || matches!(self, Kind::Transcript)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kind::Match => "match",
            Kind::Exon => "exon",
            Kind::Cds => "CDS",
            Kind::Utr => "UTR",
            Kind::Intron => "intron",
            Kind::Transcript => "transcript",
            Kind::Variation => "variation",
            Kind::Region => "region",
            Kind::PolyASite => "polyA site",
            Kind::PolyASignal => "polyA signal",
            Kind::Segment => "feature-series segment",
            Kind::XyPlot => "XY plot",
            Kind::Gsp => "GSP",
        };

        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_mutually_exclusive() {
        for kind in Kind::ALL {
            let hits = [
                kind.is_exon(),
                kind.is_intron(),
                kind.is_match(),
                kind.is_variation(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();

            assert!(hits <= 1, "kind {kind} matched {hits} classifications");
        }
    }

    #[test]
    fn exon_covers_coding_statuses() {
        assert!(Kind::Exon.is_exon());
        assert!(Kind::Cds.is_exon());
        assert!(Kind::Utr.is_exon());
        assert!(!Kind::Intron.is_exon());
        assert!(!Kind::Match.is_exon());
    }
}
