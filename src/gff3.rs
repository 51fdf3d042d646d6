//! GFF3 feature lines.
//!
//! Errors here are local to one feature line: the caller reports them as
//! warnings and continues with the next line.

use crate::core::Range;
use crate::core::Strand;
use crate::core::strand::ParseStrandError;
use crate::msp::Kind;
use crate::msp::Msp;
use crate::parse::Options;
use crate::sequence;
use crate::session::Session;

pub mod attributes;
pub mod cigar;

pub use attributes::Attributes;

/// The field delimiter within a feature line.
const FIELD_DELIMITER: char = '\t';

/// The number of fields in a feature line (the attributes column may be
/// absent).
const NUM_FIELDS: usize = 9;

/// The placeholder for an absent value.
const MISSING: &str = ".";

/// The feature types this crate recognizes, by SOFA term name and accession.
const TYPES: &[(&str, &str, Kind)] = &[
    ("match", "SO:0000343", Kind::Match),
    ("match_part", "SO:0000039", Kind::Match),
    ("match_set", "SO:0000038", Kind::Match),
    ("nucleotide_match", "SO:0000347", Kind::Match),
    ("protein_match", "SO:0000349", Kind::Match),
    ("cDNA_match", "SO:0000689", Kind::Match),
    ("EST_match", "SO:0000668", Kind::Match),
    ("cross_genome_match", "SO:0000177", Kind::Match),
    ("translated_nucleotide_match", "SO:0000181", Kind::Match),
    ("transcript", "SO:0000673", Kind::Transcript),
    ("primary_transcript", "SO:0000185", Kind::Transcript),
    ("processed_transcript", "SO:0000233", Kind::Transcript),
    ("mRNA", "SO:0000234", Kind::Transcript),
    ("ncRNA", "SO:0000655", Kind::Transcript),
    ("exon", "SO:0000147", Kind::Exon),
    ("intron", "SO:0000188", Kind::Intron),
    ("CDS", "SO:0000316", Kind::Cds),
    ("UTR", "SO:0000203", Kind::Utr),
    ("five_prime_UTR", "SO:0000204", Kind::Utr),
    ("three_prime_UTR", "SO:0000205", Kind::Utr),
    ("SNP", "SO:0000694", Kind::Variation),
    ("SNV", "SO:0001483", Kind::Variation),
    ("substitution", "SO:1000002", Kind::Variation),
    ("insertion", "SO:0000667", Kind::Variation),
    ("deletion", "SO:0000159", Kind::Variation),
    ("sequence_alteration", "SO:0001059", Kind::Variation),
    ("region", "SO:0000001", Kind::Region),
    ("polyA_site", "SO:0000553", Kind::PolyASite),
    ("polyA_signal_sequence", "SO:0000551", Kind::PolyASignal),
];

/// An error related to parsing a GFF3 feature line.
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The line had the wrong number of tab-delimited fields.
    IncorrectNumberOfFields(usize),

    /// The type column named a type this crate does not recognize.
    InvalidType(String),

    /// The start or end column was not a number.
    InvalidReferenceCoords(String),

    /// The score column was neither a number nor `.`.
    InvalidScore(String),

    /// The strand column was unparseable.
    InvalidStrand(ParseStrandError),

    /// The phase column was neither a digit nor `.`.
    InvalidPhase(String),

    /// The attributes column was malformed.
    Attributes(attributes::ParseError),

    /// A `Gap` or `cigar_bam` attribute was malformed.
    Cigar(cigar::ParseError),

    /// The feature fell entirely outside the requested range.
    OutOfRange,

    /// A `dataType` attribute named a data type the caller's store does not
    /// have.
    DataTypeNotFound(String),

    /// The feature could not be registered against its match sequence.
    Sequence(sequence::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields(found) => write!(
                f,
                "invalid number of fields: expected {} fields, found {found}",
                NUM_FIELDS
            ),
            ParseError::InvalidType(text) => write!(f, "invalid feature type: {text}"),
            ParseError::InvalidReferenceCoords(text) => {
                write!(f, "invalid reference coordinate: {text}")
            }
            ParseError::InvalidScore(text) => write!(f, "invalid score: {text}"),
            ParseError::InvalidStrand(err) => write!(f, "{err}"),
            ParseError::InvalidPhase(text) => write!(f, "invalid phase: {text}"),
            ParseError::Attributes(err) => write!(f, "{err}"),
            ParseError::Cigar(err) => write!(f, "{err}"),
            ParseError::OutOfRange => write!(f, "feature lies outside the requested range"),
            ParseError::DataTypeNotFound(name) => {
                write!(f, "data type not configured: {name}")
            }
            ParseError::Sequence(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<attributes::ParseError> for ParseError {
    fn from(err: attributes::ParseError) -> Self {
        ParseError::Attributes(err)
    }
}

impl From<cigar::ParseError> for ParseError {
    fn from(err: cigar::ParseError) -> Self {
        ParseError::Cigar(err)
    }
}

impl From<sequence::Error> for ParseError {
    fn from(err: sequence::Error) -> Self {
        ParseError::Sequence(err)
    }
}

/// Resolves a type column value against the recognized feature types.
fn kind_for(text: &str) -> Option<Kind> {
    TYPES
        .iter()
        .find(|(name, accession, _)| text.eq_ignore_ascii_case(name) || text == *accession)
        .map(|(_, _, kind)| *kind)
}

/// Parses one GFF3 feature line into the session.
///
/// A line may produce several features: a CIGAR with intron (`N`) skips
/// splits the alignment into siblings. An error skips this line only.
pub(crate) fn parse_line(
    line: &str,
    line_number: usize,
    session: &mut Session,
    options: &Options<'_>,
) -> Result<(), ParseError> {
    let fields = line.split(FIELD_DELIMITER).collect::<Vec<_>>();

    if fields.len() != NUM_FIELDS && fields.len() != NUM_FIELDS - 1 {
        return Err(ParseError::IncorrectNumberOfFields(fields.len()));
    }

    let kind = kind_for(fields[2]).ok_or_else(|| ParseError::InvalidType(fields[2].to_string()))?;

    let start = fields[3]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidReferenceCoords(fields[3].to_string()))?;
    let end = fields[4]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidReferenceCoords(fields[4].to_string()))?;
    let ref_range = Range::new(start, end);

    let score = match fields[5] {
        MISSING => None,
        text => Some(
            text.parse::<f64>()
                .map_err(|_| ParseError::InvalidScore(text.to_string()))?,
        ),
    };

    let ref_strand = fields[6]
        .parse::<Strand>()
        .map_err(ParseError::InvalidStrand)?;

    let phase = match fields[7] {
        MISSING => 0,
        text => text
            .parse::<u8>()
            .map_err(|_| ParseError::InvalidPhase(text.to_string()))?,
    };

    let attributes = match fields.get(8).copied().filter(|column| *column != MISSING) {
        Some(column) => column.parse::<Attributes>()?,
        None => Attributes::default(),
    };

    // Alignment-free annotation kinds are dropped when they fall outside the
    // requested range; exons, introns and transcripts are kept so partially
    // visible transcripts stay intact.
    if let Some(range) = options.range {
        let exempt = kind.is_exon() || kind.is_intron() || kind == Kind::Transcript;
        if !exempt && !range.overlaps(&ref_range) {
            return Err(ParseError::OutOfRange);
        }
    }

    if let Some(name) = &attributes.data_type {
        let found = options
            .data_types
            .and_then(|store| store.lookup(name))
            .is_some();
        if !found {
            return Err(ParseError::DataTypeNotFound(name.clone()));
        }
    }

    // Warned only once the line has cleared every local-rejection check, so
    // a skipped line leaves nothing in the session.
    if kind == Kind::Cds && fields[7] == MISSING {
        session.warn(line_number, "CDS feature without a phase; assuming 0");
    }

    let mut msp = Msp::new(kind, fields[0], ref_range, ref_strand, 0);
    msp.source = Some(fields[1])
        .filter(|source| *source != MISSING)
        .map(String::from);
    msp.score = score;
    msp.phase = phase;
    msp.percent_id = attributes.percent_id;

    // Exons and introns are identified by their parent transcript; other
    // kinds by their Target name (preferred) or Name, with the ID attribute
    // as the registry tag.
    let id_tag;
    if kind.is_exon() || kind.is_intron() {
        id_tag = attributes.parent.clone();
    } else {
        id_tag = attributes.id.clone();
        msp.match_name = attributes
            .target
            .as_ref()
            .map(|target| target.name.clone())
            .or_else(|| attributes.name.clone());

        if let (Some(target), Some(name)) = (&attributes.target, &attributes.name) {
            if target.name != *name {
                session.warn(
                    line_number,
                    format!(
                        "Name attribute {name} differs from Target name {}; using the Target name",
                        target.name
                    ),
                );
            }
        }
    }

    if let Some(target) = &attributes.target {
        msp.match_range = Range::new(target.start, target.end);
        msp.match_strand = target.strand;
    }

    let offered_name = msp.match_name.clone();

    let cigar_text = attributes
        .gap
        .as_deref()
        .map(|text| (text, cigar::Dialect::Gff3))
        .or_else(|| {
            attributes
                .cigar_bam
                .as_deref()
                .map(|text| (text, cigar::Dialect::Bam))
        });

    let mut created = Vec::new();

    match cigar_text {
        Some((text, dialect)) => {
            let ops = cigar::parse(text, dialect)?;
            let outcome = cigar::walk(msp, &ops, session.res_factor());

            for note in outcome.notes {
                session.warn(line_number, note);
            }
            if let Some(op) = outcome.aborted {
                session.warn(
                    line_number,
                    format!("unsupported cigar operator: {op}; alignment truncated"),
                );
            }

            for sibling in outcome.msps {
                created.push(session.create_msp_tagged(sibling, id_tag.as_deref())?);
            }
        }
        None => created.push(session.create_msp_tagged(msp, id_tag.as_deref())?),
    }

    let sequence_id = created
        .first()
        .and_then(|id| session.msp(*id).sequence());

    // A record matched through its id tag may offer a name that differs
    // from the one already recorded. The first name wins; the conflict is
    // surfaced rather than dropped.
    if let (Some(sequence_id), Some(offered)) = (sequence_id, offered_name.as_deref()) {
        let stored = session.registry().sequence(sequence_id).full_name();
        if let Some(stored) = stored.filter(|stored| *stored != offered) {
            let message = format!(
                "Name {offered} differs from {stored} already recorded for this sequence; keeping {stored}"
            );
            session.warn(line_number, message);
        }
    }

    if let Some(sequence_id) = sequence_id {
        let text = attributes.sequence.as_deref().or(attributes
            .variant_sequence
            .as_deref()
            .filter(|_| kind.is_variation()));

        if let Some(text) = text {
            // A conflicting later copy is dropped with a warning; the first
            // stored text wins.
            if let Err(err) = session.registry_mut().attach_data(sequence_id, text) {
                session.warn(line_number, err.to_string());
            }
        }

        let sequence = session.registry_mut().sequence_mut(sequence_id);
        if sequence.organism.is_none() {
            sequence.organism = attributes.organism;
        }
        if sequence.gene_name.is_none() {
            sequence.gene_name = attributes.gene_name;
        }
        if sequence.tissue_type.is_none() {
            sequence.tissue_type = attributes.tissue_type;
        }
        if sequence.strain.is_none() {
            sequence.strain = attributes.strain;
        }
    }

    Ok(())
}
