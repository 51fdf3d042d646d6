//! The MSP ("match/sequence pair"): the core alignment-feature record.

use crate::core::Range;
use crate::core::Strand;
use crate::sequence::SequenceId;
use crate::session::SeriesId;

pub mod color;
pub mod gap;
pub mod kind;

pub use gap::GapBlock;
pub use kind::Kind;

/// An opaque handle to an [`Msp`] within a
/// [`Session`](crate::session::Session).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct MspId(pub(crate) usize);

impl MspId {
    /// Returns the position of the feature within the session's flat list.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One alignment feature: a single segment with coordinates on the reference
/// sequence and (for alignments) on a match sequence.
///
/// Every field has a defined empty value at construction; parsers populate
/// the fields relevant to their format and leave the rest.
#[derive(Clone, Debug, PartialEq)]
pub struct Msp {
    /// The feature kind.
    pub(crate) kind: Kind,

    /// The annotation source (GFF3 column two), if any.
    pub(crate) source: Option<String>,

    /// The score, if the format supplied one.
    pub(crate) score: Option<f64>,

    /// The percent identity, if the format supplied one.
    pub(crate) percent_id: Option<f64>,

    /// The phase (meaningful for CDS features).
    pub(crate) phase: u8,

    /// The reference sequence name.
    pub(crate) ref_name: String,

    /// The feature's range on the reference sequence.
    pub(crate) ref_range: Range,

    /// The reference strand.
    pub(crate) ref_strand: Strand,

    /// The reading frame on the reference sequence.
    pub(crate) ref_frame: i8,

    /// The match sequence name, if any.
    pub(crate) match_name: Option<String>,

    /// The feature's range on the match sequence.
    pub(crate) match_range: Range,

    /// The match strand.
    pub(crate) match_strand: Strand,

    /// Free-text description.
    pub(crate) description: Option<String>,

    /// The gap blocks of a gapped alignment, in walk order.
    pub(crate) gaps: Vec<GapBlock>,

    /// The owning match-sequence aggregate, once registered.
    pub(crate) sequence: Option<SequenceId>,

    /// A per-feature style (color name) override.
    pub(crate) style: Option<String>,

    /// The owning feature series, for series segments and XY plots.
    pub(crate) series: Option<SeriesId>,
}

impl Msp {
    /// Creates a new [`Msp`] with every optional field empty.
    pub fn new(
        kind: Kind,
        ref_name: impl Into<String>,
        ref_range: Range,
        ref_strand: Strand,
        ref_frame: i8,
    ) -> Self {
        Msp {
            kind,
            source: None,
            score: None,
            percent_id: None,
            phase: 0,
            ref_name: ref_name.into(),
            ref_range,
            ref_strand,
            ref_frame,
            match_name: None,
            match_range: Range::new(0, 0),
            match_strand: Strand::None,
            description: None,
            gaps: Vec::new(),
            sequence: None,
            style: None,
            series: None,
        }
    }

    /// Returns the feature kind.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the annotation source, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the score, if any.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    /// Returns the percent identity, if any.
    pub fn percent_id(&self) -> Option<f64> {
        self.percent_id
    }

    /// Returns the phase.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Returns the reference sequence name.
    pub fn ref_name(&self) -> &str {
        &self.ref_name
    }

    /// Returns the range on the reference sequence.
    pub fn ref_range(&self) -> Range {
        self.ref_range
    }

    /// Returns the reference strand.
    pub fn ref_strand(&self) -> Strand {
        self.ref_strand
    }

    /// Returns the reading frame on the reference sequence.
    pub fn ref_frame(&self) -> i8 {
        self.ref_frame
    }

    /// Returns the match sequence name, if any.
    pub fn match_name(&self) -> Option<&str> {
        self.match_name.as_deref()
    }

    /// Returns the range on the match sequence.
    pub fn match_range(&self) -> Range {
        self.match_range
    }

    /// Returns the match strand.
    pub fn match_strand(&self) -> Strand {
        self.match_strand
    }

    /// Returns the free-text description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the gap blocks, in walk order.
    ///
    /// An empty list means the alignment is ungapped.
    pub fn gaps(&self) -> &[GapBlock] {
        &self.gaps
    }

    /// Returns the owning match-sequence aggregate, once registered.
    pub fn sequence(&self) -> Option<SequenceId> {
        self.sequence
    }

    /// Returns the per-feature style override, if any.
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Returns the owning feature series, if any.
    pub fn series(&self) -> Option<SeriesId> {
        self.series
    }
}
