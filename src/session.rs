//! The parse session: every structure a parse populates, owned in one place.
//!
//! A session may be fed several files in turn; features, sequences, series
//! and warnings accumulate. Nothing here is shared across sessions, so
//! repeated parses in one process are independent.

use std::collections::HashMap;
use std::str::FromStr;

use crate::core::Range;
use crate::msp::Kind;
use crate::msp::Msp;
use crate::msp::MspId;
use crate::sequence;
use crate::sequence::Registry;
use crate::style::Color;
use crate::style::Shape;

/// The sentinel stored in XY-series slots that no body line has filled.
pub const XY_UNFILLED: i32 = i32::MIN;

/// An error related to parsing a blast mode token.
#[derive(Debug, Eq, PartialEq)]
pub struct UnknownBlastMode(String);

impl std::fmt::Display for UnknownBlastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown blast mode: {}", self.0)
    }
}

impl std::error::Error for UnknownBlastMode {}

/// The blast flavor a legacy file was produced by.
///
/// The mode decides how match coordinates relate to reference coordinates:
/// the translated modes align peptides against nucleotides, so one match
/// residue covers three reference positions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlastMode {
    /// Nucleotide query against nucleotide reference.
    BlastN,

    /// Peptide query against peptide reference.
    BlastP,

    /// Translated nucleotide reference searched with a peptide query.
    BlastX,

    /// Peptide reference searched with a translated nucleotide query.
    TBlastN,

    /// Translated reference against translated query.
    TBlastX,
}

impl BlastMode {
    /// Returns the residue factor: the multiplier converting match-side
    /// (peptide) lengths into reference-side (nucleotide) lengths.
    pub fn res_factor(&self) -> i64 {
        match self {
            BlastMode::BlastX | BlastMode::TBlastX => 3,
            _ => 1,
        }
    }
}

impl std::fmt::Display for BlastMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlastMode::BlastN => write!(f, "blastn"),
            BlastMode::BlastP => write!(f, "blastp"),
            BlastMode::BlastX => write!(f, "blastx"),
            BlastMode::TBlastN => write!(f, "tblastn"),
            BlastMode::TBlastX => write!(f, "tblastx"),
        }
    }
}

impl FromStr for BlastMode {
    type Err = UnknownBlastMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blastn" => Ok(BlastMode::BlastN),
            "blastp" => Ok(BlastMode::BlastP),
            "blastx" => Ok(BlastMode::BlastX),
            "tblastn" => Ok(BlastMode::TBlastN),
            "tblastx" => Ok(BlastMode::TBlastX),
            other => Err(UnknownBlastMode(other.to_string())),
        }
    }
}

/// A non-fatal anomaly reported during a parse, tied to its input line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Warning {
    /// The 1-based line number the anomaly was found on.
    pub line: usize,

    /// The rendered message.
    pub message: String,
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

/// An opaque handle to a [`Series`] within a [`Session`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SeriesId(pub(crate) usize);

/// A feature series: a named, ordered group of related annotation features
/// sharing display styling.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// The series name.
    pub(crate) name: String,

    /// The series color, if its `Look` named one.
    pub(crate) color: Option<Color>,

    /// The series shape, if its `Look` named one.
    pub(crate) shape: Option<Shape>,

    /// The XY value array, for `XY` series: one slot per coordinate of the
    /// target sequence, [`XY_UNFILLED`] where no body line supplied a value.
    pub(crate) values: Option<Vec<i32>>,
}

impl Series {
    /// Returns the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the series color, if set.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Returns the series shape, if set.
    pub fn shape(&self) -> Option<Shape> {
        self.shape
    }

    /// Returns the XY value array, for `XY` series.
    pub fn values(&self) -> Option<&[i32]> {
        self.values.as_deref()
    }
}

/// One of the two input sequence slots the feature-series formats may
/// reference (`@1`/`@2`) or fill (`FS type=SEQ`).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SeqSlot {
    /// The declared name of the slot's sequence.
    pub(crate) name: Option<String>,

    /// The residue text.
    pub(crate) data: String,
}

impl SeqSlot {
    /// Returns the declared name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the residue text.
    pub fn data(&self) -> &str {
        &self.data
    }
}

/// The output and working state of a parse.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    /// The features, in parse order.
    msps: Vec<Msp>,

    /// Per-kind feature buckets.
    buckets: HashMap<Kind, Vec<MspId>>,

    /// The match-sequence registry.
    registry: Registry,

    /// The feature series, in first-seen order.
    series: Vec<Series>,

    /// The blast mode declared by the input, if any.
    blast_mode: Option<BlastMode>,

    /// The `sequence-region` declaration, if any.
    sequence_region: Option<(String, Range)>,

    /// The first input sequence slot (`@1`).
    seq1: SeqSlot,

    /// The second input sequence slot (`@2`).
    seq2: SeqSlot,

    /// Aggregated non-fatal warnings.
    warnings: Vec<Warning>,
}

impl Session {
    /// Creates a session with pre-declared input sequences for the two
    /// feature-series slots.
    pub fn with_input_sequences(
        seq1_name: Option<&str>,
        seq1: Option<&str>,
        seq2_name: Option<&str>,
        seq2: Option<&str>,
    ) -> Self {
        Session {
            seq1: SeqSlot {
                name: seq1_name.map(String::from),
                data: seq1.unwrap_or_default().to_string(),
            },
            seq2: SeqSlot {
                name: seq2_name.map(String::from),
                data: seq2.unwrap_or_default().to_string(),
            },
            ..Session::default()
        }
    }

    /// Validates and appends a feature.
    ///
    /// Kinds that require a match-sequence identity (matches, exons,
    /// introns, transcripts) are rejected with
    /// [`sequence::Error::MissingName`] when none was populated. A named
    /// feature is attached to its (possibly new) aggregate; every feature is
    /// appended to the flat list and its kind bucket.
    pub fn create_msp(&mut self, msp: Msp) -> Result<MspId, sequence::Error> {
        self.create_msp_tagged(msp, None)
    }

    /// As [`create_msp`](Session::create_msp), but also supplies an id tag
    /// (a GFF3 `ID` attribute) for the aggregate lookup. A feature with a
    /// tag but no name is still accepted for name-requiring kinds.
    pub fn create_msp_tagged(
        &mut self,
        mut msp: Msp,
        id_tag: Option<&str>,
    ) -> Result<MspId, sequence::Error> {
        if msp.kind.requires_name() && msp.match_name.is_none() && id_tag.is_none() {
            return Err(sequence::Error::MissingName);
        }

        let id = MspId(self.msps.len());

        if msp.match_name.is_some() || id_tag.is_some() {
            let sequence_id = self.registry.find_or_create(
                msp.match_name.as_deref(),
                id_tag,
                msp.match_strand,
            )?;

            let kind = match msp.kind {
                Kind::Match => sequence::Kind::Match,
                Kind::Exon | Kind::Cds | Kind::Utr | Kind::Intron | Kind::Transcript => {
                    sequence::Kind::Transcript
                }
                Kind::Variation => sequence::Kind::Variation,
                _ => sequence::Kind::Unset,
            };

            self.registry
                .attach_msp(sequence_id, id, msp.match_range, kind);
            msp.sequence = Some(sequence_id);
        }

        self.buckets.entry(msp.kind).or_default().push(id);
        self.msps.push(msp);

        Ok(id)
    }

    /// Returns the feature for the handle.
    pub fn msp(&self, id: MspId) -> &Msp {
        &self.msps[id.0]
    }

    /// Returns a mutable reference to the feature for the handle.
    pub(crate) fn msp_mut(&mut self, id: MspId) -> &mut Msp {
        &mut self.msps[id.0]
    }

    /// Returns every feature, in parse order.
    pub fn msps(&self) -> &[Msp] {
        &self.msps
    }

    /// Returns the ids of every feature of a kind, in parse order.
    pub fn bucket(&self, kind: Kind) -> &[MspId] {
        self.buckets.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the match-sequence registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns a mutable reference to the match-sequence registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Finds the series with the given name, creating it (in first-seen
    /// order) if it does not exist yet.
    pub fn find_or_create_series(&mut self, name: &str) -> SeriesId {
        if let Some(index) = self.series.iter().position(|series| series.name == name) {
            return SeriesId(index);
        }

        self.series.push(Series {
            name: name.to_string(),
            color: None,
            shape: None,
            values: None,
        });
        SeriesId(self.series.len() - 1)
    }

    /// Returns the series for the handle.
    pub fn series(&self, id: SeriesId) -> &Series {
        &self.series[id.0]
    }

    /// Returns a mutable reference to the series for the handle.
    pub(crate) fn series_mut(&mut self, id: SeriesId) -> &mut Series {
        &mut self.series[id.0]
    }

    /// Returns every series, in first-seen order.
    pub fn all_series(&self) -> &[Series] {
        &self.series
    }

    /// Returns the blast mode declared by the input, if any.
    pub fn blast_mode(&self) -> Option<BlastMode> {
        self.blast_mode
    }

    /// Sets the blast mode.
    pub fn set_blast_mode(&mut self, mode: BlastMode) {
        self.blast_mode = Some(mode);
    }

    /// Returns the residue factor implied by the blast mode (1 when no mode
    /// was declared).
    pub fn res_factor(&self) -> i64 {
        self.blast_mode.map(|mode| mode.res_factor()).unwrap_or(1)
    }

    /// Returns the `sequence-region` declaration, if any.
    pub fn sequence_region(&self) -> Option<(&str, Range)> {
        self.sequence_region
            .as_ref()
            .map(|(name, range)| (name.as_str(), *range))
    }

    /// Records the `sequence-region` declaration.
    pub(crate) fn set_sequence_region(&mut self, name: &str, range: Range) {
        self.sequence_region = Some((name.to_string(), range));
    }

    /// Returns the first input sequence slot.
    pub fn seq1(&self) -> &SeqSlot {
        &self.seq1
    }

    /// Returns the second input sequence slot.
    pub fn seq2(&self) -> &SeqSlot {
        &self.seq2
    }

    /// Resolves a feature-series sequence designator (`@1`, `@2`, or a
    /// declared slot name) to one of the two slots.
    pub(crate) fn slot_mut(&mut self, designator: &str) -> Option<&mut SeqSlot> {
        match designator {
            "@1" => Some(&mut self.seq1),
            "@2" => Some(&mut self.seq2),
            name if self.seq1.name.as_deref() == Some(name) => Some(&mut self.seq1),
            name if self.seq2.name.as_deref() == Some(name) => Some(&mut self.seq2),
            _ => None,
        }
    }

    /// Aggregates a non-fatal warning and emits it through `tracing`.
    pub fn warn(&mut self, line: usize, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(line, "{message}");
        self.warnings.push(Warning { line, message });
    }

    /// Returns the aggregated warnings, in parse order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}
