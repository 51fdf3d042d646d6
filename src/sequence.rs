//! Match-sequence aggregates: one record per named biological sequence,
//! grouping every feature that refers to it.

use crate::core::Range;
use crate::core::Strand;
use crate::msp::MspId;

pub mod registry;

pub use registry::Registry;

/// An error related to a match-sequence aggregate.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
    /// A byte that cannot be complemented was found while
    /// reverse-complementing sequence data.
    ComplementFailed(char),

    /// An aggregate was requested with neither a name nor an id tag.
    MissingName,

    /// The same sequence was described with different residues across input
    /// records. The originally stored text is retained.
    SequenceDataMismatch(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ComplementFailed(c) => {
                write!(f, "cannot complement sequence character: {c}")
            }
            Error::MissingName => {
                write!(f, "a sequence requires a name or an id tag")
            }
            Error::SequenceDataMismatch(name) => write!(
                f,
                "conflicting sequence data supplied for sequence: {name}"
            ),
        }
    }
}

impl std::error::Error for Error {}

/// An opaque handle to a [`Sequence`] within a [`Registry`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SequenceId(pub(crate) usize);

/// The classification of a match-sequence aggregate.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Kind {
    /// Not yet classified.
    #[default]
    Unset,

    /// An alignment match sequence.
    Match,

    /// A transcript grouping exons and introns.
    Transcript,

    /// A variation.
    Variation,
}

/// One named biological sequence and the features that belong to it.
///
/// A single aggregate may be the union of several features: all exons and
/// introns of one transcript share one aggregate, as do the split parts of a
/// match interrupted by introns.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    /// The full name, as supplied by the input.
    pub(crate) full_name: Option<String>,

    /// The name with any `prefix:` stripped. Derived once at creation.
    pub(crate) variant_name: Option<String>,

    /// The variant name with any trailing `.number` suffix stripped.
    /// Derived once at creation.
    pub(crate) short_name: Option<String>,

    /// The identity tag (GFF3 `ID`), if any.
    pub(crate) id_tag: Option<String>,

    /// The strand of the aggregate.
    pub(crate) strand: Strand,

    /// The classification.
    pub(crate) kind: Kind,

    /// The residue text, lazily attached.
    pub(crate) data: Option<String>,

    /// The valid coordinate range: the span of the owned features until
    /// residue data is attached, then `[1, len]`.
    pub(crate) range: Option<Range>,

    /// The source organism, if annotated.
    pub(crate) organism: Option<String>,

    /// The gene name, if annotated.
    pub(crate) gene_name: Option<String>,

    /// The tissue type, if annotated.
    pub(crate) tissue_type: Option<String>,

    /// The strain, if annotated.
    pub(crate) strain: Option<String>,

    /// The owned features, in parse order.
    pub(crate) msps: Vec<MspId>,
}

impl Sequence {
    /// Creates a new, empty aggregate. Name forms are derived and cached.
    pub(crate) fn new(name: Option<&str>, id_tag: Option<&str>, strand: Strand) -> Self {
        let variant_name = name.map(variant_name);
        let short_name = variant_name.as_deref().map(short_name);

        Sequence {
            full_name: name.map(String::from),
            variant_name,
            short_name,
            id_tag: id_tag.map(String::from),
            strand,
            kind: Kind::Unset,
            data: None,
            range: None,
            organism: None,
            gene_name: None,
            tissue_type: None,
            strain: None,
            msps: Vec::new(),
        }
    }

    /// Returns the full name, if set.
    pub fn full_name(&self) -> Option<&str> {
        self.full_name.as_deref()
    }

    /// Returns the variant name (the full name with any `prefix:` stripped).
    pub fn variant_name(&self) -> Option<&str> {
        self.variant_name.as_deref()
    }

    /// Returns the short name (the variant name with any trailing `.number`
    /// suffix stripped).
    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    /// Returns the identity tag, if set.
    pub fn id_tag(&self) -> Option<&str> {
        self.id_tag.as_deref()
    }

    /// Returns the strand.
    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Returns the classification.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the residue text, if attached.
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Returns the valid coordinate range, if known.
    pub fn range(&self) -> Option<Range> {
        self.range
    }

    /// Returns the source organism, if annotated.
    pub fn organism(&self) -> Option<&str> {
        self.organism.as_deref()
    }

    /// Returns the gene name, if annotated.
    pub fn gene_name(&self) -> Option<&str> {
        self.gene_name.as_deref()
    }

    /// Returns the tissue type, if annotated.
    pub fn tissue_type(&self) -> Option<&str> {
        self.tissue_type.as_deref()
    }

    /// Returns the strain, if annotated.
    pub fn strain(&self) -> Option<&str> {
        self.strain.as_deref()
    }

    /// Returns the owned features, in parse order.
    pub fn msps(&self) -> &[MspId] {
        &self.msps
    }

    /// Returns whether this aggregate answers to the given name or id tag,
    /// matched exactly and case-sensitively.
    pub(crate) fn answers_to(&self, name: Option<&str>, id_tag: Option<&str>) -> bool {
        let by_name = match (name, self.full_name.as_deref()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };

        let by_tag = match (id_tag, self.id_tag.as_deref()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };

        by_name || by_tag
    }
}

/// Derives the variant name from a full name: everything after the first
/// `:` separator, or the whole name if there is none.
///
/// # Examples
///
/// ```
/// use blixfile::sequence::variant_name;
///
/// assert_eq!(variant_name("SW:P51531-2.2"), "P51531-2.2");
/// assert_eq!(variant_name("P51531"), "P51531");
/// ```
pub fn variant_name(full_name: &str) -> String {
    match full_name.split_once(':') {
        Some((_, rest)) => rest.to_string(),
        None => full_name.to_string(),
    }
}

/// Derives the short name from a variant name: the name with any trailing
/// `.number` suffix stripped.
///
/// # Examples
///
/// ```
/// use blixfile::sequence::short_name;
///
/// assert_eq!(short_name("P51531-2.2"), "P51531-2");
/// assert_eq!(short_name("P51531"), "P51531");
/// ```
pub fn short_name(variant_name: &str) -> String {
    if let Some(pos) = variant_name.rfind('.') {
        let suffix = &variant_name[pos + 1..];
        if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) {
            return variant_name[..pos].to_string();
        }
    }

    variant_name.to_string()
}

/// Reverse-complements nucleotide residue text, preserving case.
///
/// The full IUPAC ambiguity alphabet is supported, along with the gap and
/// pad characters. Any other byte fails with [`Error::ComplementFailed`].
pub fn reverse_complement(text: &str) -> Result<String, Error> {
    let mut out = String::with_capacity(text.len());

    for c in text.chars().rev() {
        out.push(complement(c)?);
    }

    Ok(out)
}

/// Complements a single nucleotide character.
fn complement(c: char) -> Result<char, Error> {
    let complemented = match c.to_ascii_uppercase() {
        'A' => 'T',
        'C' => 'G',
        'G' => 'C',
        'T' | 'U' => 'A',
        'R' => 'Y',
        'Y' => 'R',
        'S' => 'S',
        'W' => 'W',
        'K' => 'M',
        'M' => 'K',
        'B' => 'V',
        'V' => 'B',
        'D' => 'H',
        'H' => 'D',
        'N' => 'N',
        '-' | '.' | '*' => c,
        _ => return Err(Error::ComplementFailed(c)),
    };

    if c.is_ascii_lowercase() {
        Ok(complemented.to_ascii_lowercase())
    } else {
        Ok(complemented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_name_strips_prefix() {
        assert_eq!(variant_name("SW:P51531-2.2"), "P51531-2.2");
        assert_eq!(variant_name("Em:AB012345.1"), "AB012345.1");
        assert_eq!(variant_name("unprefixed"), "unprefixed");
    }

    #[test]
    fn short_name_strips_version() {
        assert_eq!(short_name("AB012345.1"), "AB012345");
        assert_eq!(short_name("P51531-2.2"), "P51531-2");
        assert_eq!(short_name("name.v2"), "name.v2");
        assert_eq!(short_name("plain"), "plain");
    }

    #[test]
    fn name_forms_cached_at_creation() {
        let sequence = Sequence::new(Some("SW:P51531-2.2"), None, Strand::Forward);
        assert_eq!(sequence.full_name(), Some("SW:P51531-2.2"));
        assert_eq!(sequence.variant_name(), Some("P51531-2.2"));
        assert_eq!(sequence.short_name(), Some("P51531-2"));
    }

    #[test]
    fn reverse_complement_preserves_case() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(reverse_complement("ACGT")?, "ACGT");
        assert_eq!(reverse_complement("AACGT")?, "ACGTT");
        assert_eq!(reverse_complement("acGTn")?, "nACgt");
        Ok(())
    }

    #[test]
    fn reverse_complement_rejects_unknown_bytes() {
        let err = reverse_complement("ACQT").unwrap_err();
        assert_eq!(err, Error::ComplementFailed('Q'));
        assert_eq!(err.to_string(), "cannot complement sequence character: Q");
    }

    #[test]
    fn answers_to_is_exact_and_case_sensitive() {
        let sequence = Sequence::new(Some("Q9"), Some("tag-1"), Strand::Forward);

        assert!(sequence.answers_to(Some("Q9"), None));
        assert!(sequence.answers_to(None, Some("tag-1")));
        assert!(!sequence.answers_to(Some("q9"), None));
        assert!(!sequence.answers_to(None, Some("tag-2")));
        assert!(!sequence.answers_to(None, None));
    }
}
