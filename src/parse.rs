//! The feature-file parse driver.
//!
//! Feature files are line oriented and stateful: a header line selects the
//! format of the body lines that follow, and one file may switch formats
//! several times. The driver recognizes headers, keeps the current format
//! state, and hands body lines to the per-format parsers.

use std::io::BufRead;
use std::io::{self};
use std::path::Path;

use crate::config::DataTypeLookup;
use crate::core::Range;
use crate::core::Strand;
use crate::core::strand::ParseStrandError;
use crate::gff3;
use crate::reader::Reader;
use crate::sequence;
use crate::sequence::SequenceId;
use crate::session::SeriesId;
use crate::session::Session;

mod exblx;
mod fs;

/// Caller-supplied options for a parse.
#[derive(Default)]
pub struct Options<'a> {
    /// The reference range of interest. Alignment-free annotations outside
    /// it are dropped during the parse.
    pub range: Option<Range>,

    /// The data-type configuration store consulted for `dataType`
    /// attributes.
    pub data_types: Option<&'a dyn DataTypeLookup>,
}

impl std::fmt::Debug for Options<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("range", &self.range)
            .field("data_types", &self.data_types.map(|_| "..."))
            .finish()
    }
}

/// An error related to parsing a line of a legacy-format body.
#[derive(Debug, PartialEq)]
pub enum ParseError {
    /// The line had the wrong number of whitespace-delimited fields.
    IncorrectNumberOfFields {
        /// The expected number of fields.
        expected: usize,
        /// The number of fields found.
        found: usize,
    },

    /// The score field was not a number.
    InvalidScore(String),

    /// The score classified the record as a type this crate does not
    /// recognize.
    InvalidType(String),

    /// A combined strand/frame token (such as `(+1)`) was malformed.
    MissingStrand(String),

    /// A bare strand field was unparseable.
    InvalidStrand(ParseStrandError),

    /// A frame field was not a number.
    InvalidFrame(String),

    /// A reference coordinate was not a number.
    InvalidReferenceCoords(String),

    /// A match coordinate was not a number.
    InvalidMatchCoords(String),

    /// A gap string did not decompose into coordinate quadruples.
    InvalidGaps(String),

    /// A feature-series value field was not a number.
    InvalidValue(String),

    /// A sequence designator named neither `@1`, `@2`, nor a declared input
    /// sequence.
    UnknownSequence(String),

    /// The record could not be registered against its match sequence.
    Sequence(sequence::Error),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::IncorrectNumberOfFields { expected, found } => write!(
                f,
                "invalid number of fields: expected {expected} fields, found {found}"
            ),
            ParseError::InvalidScore(text) => write!(f, "invalid score: {text}"),
            ParseError::InvalidType(text) => write!(f, "invalid record type: {text}"),
            ParseError::MissingStrand(text) => {
                write!(f, "invalid strand/frame token: {text}")
            }
            ParseError::InvalidStrand(err) => write!(f, "{err}"),
            ParseError::InvalidFrame(text) => write!(f, "invalid frame: {text}"),
            ParseError::InvalidReferenceCoords(text) => {
                write!(f, "invalid reference coordinate: {text}")
            }
            ParseError::InvalidMatchCoords(text) => {
                write!(f, "invalid match coordinate: {text}")
            }
            ParseError::InvalidGaps(text) => write!(f, "invalid gap string: {text}"),
            ParseError::InvalidValue(text) => write!(f, "invalid value: {text}"),
            ParseError::UnknownSequence(text) => {
                write!(f, "unknown sequence designator: {text}")
            }
            ParseError::Sequence(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<sequence::Error> for ParseError {
    fn from(err: sequence::Error) -> Self {
        ParseError::Sequence(err)
    }
}

/// An error related to parsing a feature file.
#[derive(Debug)]
pub enum Error {
    /// An i/o error occurred.
    Io(io::Error),

    /// A data line arrived before any recognized format header.
    NoValidHeader {
        /// The 1-based offending line number.
        line: usize,
    },

    /// A legacy-format body line was malformed. Legacy formats are
    /// machine generated, so a malformed line fails the whole parse.
    Line {
        /// The 1-based offending line number.
        line: usize,
        /// The underlying error.
        err: ParseError,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "i/o error: {err}"),
            Error::NoValidHeader { line } => {
                write!(f, "line {line}: data before any recognized format header")
            }
            Error::Line { line, err } => write!(f, "line {line}: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::NoValidHeader { .. } => None,
            Error::Line { err, .. } => Some(err),
        }
    }
}

/// The format the machine is currently reading.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum State {
    /// No header seen yet.
    Start,

    /// A `##gff-version` header was just seen.
    Gff3Header,

    /// GFF3 feature lines.
    Gff3Body,

    /// `exblx` alignment lines.
    ExblxBody,

    /// `seqbl` alignment lines.
    SeqblBody,

    /// `exblx_x` alignment lines.
    ExblxExtBody,

    /// `seqbl_x` alignment lines.
    SeqblExtBody,

    /// `FS type=HSP` alignment lines.
    FsHspBody,

    /// An unsupported `FS type=GSP` header was just seen.
    FsGspHeader,

    /// `FS type=GSP` lines, skipped.
    FsGspBody,

    /// `FS type=SEG` segment lines.
    FsSegBody,

    /// `FS type=GFF` segment lines.
    FsGffBody,

    /// An `FS type=XY` header, reprocessed as its own first body line.
    FsXyHeader,

    /// `FS type=XY` value lines.
    FsXyBody,

    /// An `FS type=SEQ` header, reprocessed as its own first body line.
    FsSeqHeader,

    /// `FS type=SEQ` residue lines.
    FsSeqBody,

    /// A `>` FASTA header line.
    FastaHeader,

    /// FASTA residue lines.
    FastaBody,
}

/// What the header recognizer made of a line.
enum HeaderAction {
    /// Not a header; dispatch to the current format.
    Body,

    /// A directive or comment, consumed without changing format.
    Consumed,

    /// A format transition. When the flag is set the header line doubles as
    /// the first body line of the new format and is dispatched again.
    Transition(State, bool),
}

/// FASTA data being accumulated for one sequence.
struct Fasta {
    /// The aggregate the data belongs to.
    id: SequenceId,

    /// The range declared on the header line, if any.
    declared_range: Option<Range>,

    /// The residues read so far.
    data: String,
}

/// The parse state machine.
struct Machine<'a, 'o> {
    /// The session being populated.
    session: &'a mut Session,

    /// The caller's options.
    options: &'o Options<'o>,

    /// The current format state.
    state: State,

    /// The 1-based number of the line being processed.
    line_number: usize,

    /// FASTA data pending attachment.
    fasta: Option<Fasta>,

    /// The series an `FS type=XY` body is filling.
    xy_series: Option<SeriesId>,

    /// The slot designator an `FS type=SEQ` body is filling.
    seq_designator: Option<String>,
}

/// Parses a feature file into the session.
///
/// The session accumulates: feeding several files into one session merges
/// their features. Fatal errors abort the parse; non-fatal anomalies are
/// collected as [session warnings](Session::warnings).
pub fn parse<R>(
    reader: &mut Reader<R>,
    session: &mut Session,
    options: &Options<'_>,
) -> Result<(), Error>
where
    R: BufRead,
{
    let mut machine = Machine {
        session,
        options,
        state: State::Start,
        line_number: 0,
        fasta: None,
        xy_series: None,
        seq_designator: None,
    };

    let mut buffer = String::new();

    loop {
        let bytes = reader.read_line_raw(&mut buffer).map_err(Error::Io)?;
        if bytes == 0 {
            break;
        }

        machine.line_number += 1;
        machine.feed(&buffer)?;
    }

    machine.flush_fasta();
    Ok(())
}

/// Opens and parses a feature file, transparently decompressing gzip input.
pub fn parse_file<P>(path: P, session: &mut Session, options: &Options<'_>) -> Result<(), Error>
where
    P: AsRef<Path>,
{
    let mut reader = Reader::open(path).map_err(Error::Io)?;
    parse(&mut reader, session, options)
}

impl Machine<'_, '_> {
    /// Processes one line.
    fn feed(&mut self, line: &str) -> Result<(), Error> {
        if line.trim().is_empty() {
            return Ok(());
        }

        match self.recognize_header(line)? {
            HeaderAction::Body => self.dispatch(line),
            HeaderAction::Consumed => Ok(()),
            HeaderAction::Transition(state, reprocess) => {
                self.flush_fasta();
                self.state = state;

                if reprocess {
                    self.dispatch(line)
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Decides whether a line is a header or directive, applying directive
    /// side effects.
    fn recognize_header(&mut self, line: &str) -> Result<HeaderAction, Error> {
        if line.starts_with('>') {
            return Ok(HeaderAction::Transition(State::FastaHeader, true));
        }

        let Some(rest) = line.strip_prefix('#') else {
            return Ok(HeaderAction::Body);
        };

        let rest = rest.trim_start_matches('#').trim();

        if let Some(version) = rest.strip_prefix("gff-version") {
            if version.trim() != "3" {
                self.session.warn(
                    self.line_number,
                    format!("unexpected gff version: {}", version.trim()),
                );
            }
            return Ok(HeaderAction::Transition(State::Gff3Header, false));
        }

        if rest == "FASTA" {
            return Ok(HeaderAction::Transition(State::FastaHeader, false));
        }

        if let Some(region) = rest.strip_prefix("sequence-region") {
            self.sequence_region(region);
            return Ok(HeaderAction::Consumed);
        }

        let mut tokens = rest.split_whitespace();

        match tokens.next() {
            Some("exblx") => Ok(HeaderAction::Transition(State::ExblxBody, false)),
            Some("exblx_x") => Ok(HeaderAction::Transition(State::ExblxExtBody, false)),
            Some("seqbl") => Ok(HeaderAction::Transition(State::SeqblBody, false)),
            Some("seqbl_x") => Ok(HeaderAction::Transition(State::SeqblExtBody, false)),
            Some("FS") | Some("SFS") => {
                let declared = tokens.find_map(|token| token.strip_prefix("type="));

                match declared {
                    Some("HSP") => Ok(HeaderAction::Transition(State::FsHspBody, false)),
                    Some("GSP") => {
                        self.session.warn(
                            self.line_number,
                            "GSP feature series are not supported; records dropped",
                        );
                        Ok(HeaderAction::Transition(State::FsGspHeader, false))
                    }
                    Some("SEG") => Ok(HeaderAction::Transition(State::FsSegBody, false)),
                    Some("GFF") => Ok(HeaderAction::Transition(State::FsGffBody, false)),
                    Some("XY") => Ok(HeaderAction::Transition(State::FsXyHeader, true)),
                    Some("SEQ") => Ok(HeaderAction::Transition(State::FsSeqHeader, true)),
                    other => Err(Error::Line {
                        line: self.line_number,
                        err: ParseError::InvalidType(other.unwrap_or(rest).to_string()),
                    }),
                }
            }
            Some(token) => {
                match token.parse::<crate::session::BlastMode>() {
                    Ok(mode) => self.session.set_blast_mode(mode),
                    Err(err) => {
                        let lowered = token.to_ascii_lowercase();
                        if lowered.starts_with("blast") || lowered.starts_with("tblast") {
                            self.session.warn(self.line_number, err.to_string());
                        }
                    }
                }

                // Any other comment is passed over.
                Ok(HeaderAction::Consumed)
            }
            None => Ok(HeaderAction::Consumed),
        }
    }

    /// Applies a `sequence-region` directive.
    fn sequence_region(&mut self, region: &str) {
        let tokens = region.split_whitespace().collect::<Vec<_>>();

        let parsed = match tokens.as_slice() {
            [name, start, end] => start
                .parse::<i64>()
                .ok()
                .zip(end.parse::<i64>().ok())
                .map(|(start, end)| (*name, Range::new(start, end))),
            _ => None,
        };

        match parsed {
            Some((name, range)) => self.session.set_sequence_region(name, range),
            None => self.session.warn(
                self.line_number,
                format!("malformed sequence-region directive: {region}"),
            ),
        }
    }

    /// Dispatches a body line to the parser for the current format.
    fn dispatch(&mut self, line: &str) -> Result<(), Error> {
        match self.state {
            State::Start => Err(Error::NoValidHeader {
                line: self.line_number,
            }),
            State::Gff3Header | State::Gff3Body => {
                self.state = State::Gff3Body;

                // Feature lines fail individually; the parse continues.
                if let Err(err) =
                    gff3::parse_line(line, self.line_number, self.session, self.options)
                {
                    self.session
                        .warn(self.line_number, format!("skipping feature line: {err}"));
                }

                Ok(())
            }
            State::ExblxBody => fatal(
                self.line_number,
                exblx::parse_line(line, self.line_number, exblx::Format::Exblx, self.session),
            ),
            State::SeqblBody => fatal(
                self.line_number,
                exblx::parse_line(line, self.line_number, exblx::Format::Seqbl, self.session),
            ),
            State::ExblxExtBody => fatal(
                self.line_number,
                exblx::parse_line(line, self.line_number, exblx::Format::ExblxExt, self.session),
            ),
            State::SeqblExtBody => fatal(
                self.line_number,
                exblx::parse_line(line, self.line_number, exblx::Format::SeqblExt, self.session),
            ),
            State::FsHspBody => fatal(
                self.line_number,
                fs::parse_hsp(line, self.line_number, self.session),
            ),
            State::FsGspHeader => {
                self.state = State::FsGspBody;
                Ok(())
            }
            State::FsGspBody => Ok(()),
            State::FsSegBody => fatal(
                self.line_number,
                fs::parse_seg(line, self.line_number, self.session),
            ),
            State::FsGffBody => fatal(
                self.line_number,
                fs::parse_gff(line, self.line_number, self.session),
            ),
            State::FsXyHeader => {
                let series = fatal(
                    self.line_number,
                    fs::parse_xy_header(line, self.line_number, self.session),
                )?;
                self.xy_series = Some(series);
                self.state = State::FsXyBody;
                Ok(())
            }
            State::FsXyBody => {
                // The header always runs first, so the series is set.
                let series = self.xy_series.expect("XY body without header");
                fatal(
                    self.line_number,
                    fs::parse_xy_body(line, self.line_number, series, self.session),
                )
            }
            State::FsSeqHeader => {
                let designator = fatal(
                    self.line_number,
                    fs::parse_seq_header(line, self.session),
                )?;
                self.seq_designator = Some(designator);
                self.state = State::FsSeqBody;
                Ok(())
            }
            State::FsSeqBody => {
                let designator = self.seq_designator.clone().expect("SEQ body without header");
                let slot = self
                    .session
                    .slot_mut(&designator)
                    .expect("SEQ slot resolved at header");
                for token in line.split_whitespace() {
                    slot.data.push_str(token);
                }
                Ok(())
            }
            State::FastaHeader => {
                let result = self.begin_fasta(line);
                fatal(self.line_number, result)?;
                self.state = State::FastaBody;
                Ok(())
            }
            State::FastaBody => {
                if let Some(fasta) = self.fasta.as_mut() {
                    fasta.data.push_str(line.trim());
                }
                Ok(())
            }
        }
    }

    /// Starts accumulating FASTA data for the sequence a `>` header names.
    fn begin_fasta(&mut self, line: &str) -> Result<(), ParseError> {
        let header = line
            .strip_prefix('>')
            .ok_or_else(|| ParseError::UnknownSequence(line.to_string()))?;

        let mut tokens = header.split_whitespace();
        let name = tokens
            .next()
            .ok_or_else(|| ParseError::UnknownSequence(line.to_string()))?;

        let declared_range = match (tokens.next(), tokens.next()) {
            (Some(start), Some(end)) => start
                .parse::<i64>()
                .ok()
                .zip(end.parse::<i64>().ok())
                .map(|(start, end)| Range::new(start, end)),
            _ => None,
        };

        // A legacy record may already have created the aggregate, possibly
        // on the reverse strand; the header names it rather than redeclares
        // it. Only an unseen name creates a fresh forward-strand aggregate.
        let registry = self.session.registry_mut();
        let id = match registry.find(Some(name), None) {
            Some(id) => id,
            None => registry.find_or_create(Some(name), None, Strand::Forward)?,
        };

        self.fasta = Some(Fasta {
            id,
            declared_range,
            data: String::new(),
        });

        Ok(())
    }

    /// Attaches any pending FASTA data to its sequence. A conflict with
    /// previously stored data warns and keeps the original.
    fn flush_fasta(&mut self) {
        let Some(fasta) = self.fasta.take() else {
            return;
        };

        if fasta.data.is_empty() {
            return;
        }

        if let Err(err) = self.session.registry_mut().attach_data(fasta.id, &fasta.data) {
            self.session.warn(self.line_number, err.to_string());
            return;
        }

        if let Some(range) = fasta.declared_range {
            self.session.registry_mut().sequence_mut(fasta.id).range = Some(range);
        }
    }
}

/// Promotes a legacy line error to a fatal parse error.
fn fatal<T>(line: usize, result: Result<T, ParseError>) -> Result<T, Error> {
    result.map_err(|err| Error::Line { line, err })
}

/// Parses a combined strand/frame token such as `(+1)` or `(-2)`.
pub(crate) fn frame_token(text: &str) -> Result<(Strand, i8), ParseError> {
    let inner = text
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| ParseError::MissingStrand(text.to_string()))?;

    let mut chars = inner.chars();
    let strand = match chars.next() {
        Some('+') => Strand::Forward,
        Some('-') => Strand::Reverse,
        _ => return Err(ParseError::MissingStrand(text.to_string())),
    };

    let frame = chars
        .as_str()
        .parse::<i8>()
        .map_err(|_| ParseError::MissingStrand(text.to_string()))?;

    Ok((strand, frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msp::Kind;

    fn run(input: &str) -> Result<Session, Error> {
        let mut session = Session::default();
        let mut reader = Reader::new(input.as_bytes());
        parse(&mut reader, &mut session, &Options::default())?;
        Ok(session)
    }

    #[test]
    fn frame_tokens() {
        assert_eq!(frame_token("(+1)").unwrap(), (Strand::Forward, 1));
        assert_eq!(frame_token("(-2)").unwrap(), (Strand::Reverse, 2));
        assert!(frame_token("+1").is_err());
        assert!(frame_token("(1)").is_err());
    }

    #[test]
    fn data_before_a_header_is_fatal() {
        let err = run("500 (+1) 100 200 1 101 EST:ab1\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1: data before any recognized format header"
        );
    }

    #[test]
    fn empty_input_is_fine() -> Result<(), Error> {
        let session = run("")?;
        assert!(session.msps().is_empty());
        Ok(())
    }

    #[test]
    fn gff_version_header_enters_gff3() -> Result<(), Error> {
        let session = run(
            "##gff-version 3\n\
             chr4\tsrc\tmatch\t100\t200\t500\t+\t.\tTarget=EST:ab1 1 101\n",
        )?;

        assert_eq!(session.msps().len(), 1);
        assert_eq!(session.msps()[0].kind(), Kind::Match);
        Ok(())
    }

    #[test]
    fn malformed_gff3_lines_warn_and_continue() -> Result<(), Error> {
        let session = run(
            "##gff-version 3\n\
             chr4\tsrc\tnot-a-type\t1\t10\t.\t+\t.\t.\n\
             chr4\tsrc\tmatch\t100\t200\t500\t+\t.\tTarget=EST:ab1 1 101\n",
        )?;

        assert_eq!(session.msps().len(), 1);
        assert_eq!(session.warnings().len(), 1);
        Ok(())
    }

    #[test]
    fn sequence_region_directive() -> Result<(), Error> {
        let session = run("##gff-version 3\n##sequence-region chr4 1 160000\n")?;

        let (name, range) = session.sequence_region().unwrap();
        assert_eq!(name, "chr4");
        assert_eq!(range, Range::new(1, 160000));
        Ok(())
    }

    #[test]
    fn blast_mode_directive_sets_res_factor() -> Result<(), Error> {
        let session = run("# blastx\n# exblx\n")?;
        assert_eq!(session.res_factor(), 3);
        Ok(())
    }

    #[test]
    fn unknown_blast_mode_warns() -> Result<(), Error> {
        let session = run("# blastq\n# exblx\n")?;
        assert_eq!(session.blast_mode(), None);
        assert_eq!(session.warnings().len(), 1);
        assert!(session.warnings()[0].message.contains("unknown blast mode"));
        Ok(())
    }

    #[test]
    fn malformed_exblx_line_is_fatal() {
        let err = run("# exblx\n500 (+1) 100 200 1\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Line {
                line: 2,
                err: ParseError::IncorrectNumberOfFields { .. },
            }
        ));
    }

    #[test]
    fn fasta_data_is_accumulated_and_attached() -> Result<(), Error> {
        let session = run(
            "# exblx\n\
             500 (+1) 100 200 1 101 EST:ab1\n\
             ##FASTA\n\
             >EST:ab1\n\
             ACGTACGT\n\
             ACGT\n",
        )?;

        let sequence_id = session.msps()[0].sequence().unwrap();
        assert_eq!(
            session.registry().sequence(sequence_id).data(),
            Some("ACGTACGTACGT")
        );
        Ok(())
    }

    #[test]
    fn fasta_data_reaches_a_reverse_strand_aggregate() -> Result<(), Error> {
        // Descending match coordinates put the aggregate on the reverse
        // strand; the FASTA header must resolve to it, not shadow it with a
        // forward-strand duplicate.
        let session = run(
            "# exblx\n\
             500 (+1) 100 200 101 1 EST:ab1\n\
             ##FASTA\n\
             >EST:ab1\n\
             AACGT\n",
        )?;

        assert_eq!(session.registry().len(), 1);

        let sequence_id = session.msps()[0].sequence().unwrap();
        let sequence = session.registry().sequence(sequence_id);
        assert_eq!(sequence.strand(), Strand::Reverse);
        assert_eq!(sequence.data(), Some("ACGTT"));
        Ok(())
    }

    #[test]
    fn bare_fasta_header_works_from_start() -> Result<(), Error> {
        let session = run(">chr4 1 12\nACGTACGTACGT\n")?;

        let sequence = &session.registry().sequences()[0];
        assert_eq!(sequence.full_name(), Some("chr4"));
        assert_eq!(sequence.data(), Some("ACGTACGTACGT"));
        assert_eq!(sequence.range(), Some(Range::new(1, 12)));
        Ok(())
    }

    #[test]
    fn gsp_series_warn_and_are_dropped() -> Result<(), Error> {
        let session = run(
            "# FS type=GSP\n\
             header-line-of-the-gsp-block\n\
             1 2 3 4\n",
        )?;

        assert!(session.msps().is_empty());
        assert_eq!(session.warnings().len(), 1);
        Ok(())
    }

    #[test]
    fn xy_header_doubles_as_its_own_first_body_line() -> Result<(), Error> {
        let mut session =
            Session::with_input_sequences(Some("chr4-04"), Some("ACGTACGT"), None, None);
        let input = "# FS type=XY conservation blue,interpolate @1\n1 10\n2 20\n";
        let mut reader = Reader::new(input.as_bytes());
        parse(&mut reader, &mut session, &Options::default())?;

        let values = session.all_series()[0].values().unwrap();
        assert_eq!(values[0], 10);
        assert_eq!(values[1], 20);
        assert_eq!(values[2], crate::session::XY_UNFILLED);
        assert_eq!(session.msps()[0].kind(), Kind::XyPlot);
        Ok(())
    }

    #[test]
    fn seq_body_fills_a_slot() -> Result<(), Error> {
        let mut session = Session::with_input_sequences(Some("chr4-04"), None, None, None);
        let input = "# FS type=SEQ @1\nACGT ACGT\nTTTT\n";
        let mut reader = Reader::new(input.as_bytes());
        parse(&mut reader, &mut session, &Options::default())?;

        assert_eq!(session.seq1().data(), "ACGTACGTTTTT");
        Ok(())
    }

    #[test]
    fn format_switches_within_one_file() -> Result<(), Error> {
        let session = run(
            "# blastn\n\
             # exblx\n\
             500 (+1) 100 200 1 101 EST:ab1\n\
             ##gff-version 3\n\
             chr4\tsrc\tmatch\t300\t400\t80\t+\t.\tTarget=EST:cd2 1 101\n",
        )?;

        assert_eq!(session.msps().len(), 2);
        assert_eq!(session.registry().len(), 2);
        Ok(())
    }
}
