//! CIGAR alignment strings: parsing of the two dialects and the coordinate
//! walk that turns operations into gap blocks.

use nonempty::NonEmpty;

use crate::core::Range;
use crate::msp::GapBlock;
use crate::msp::Msp;

/// The two CIGAR spellings found in GFF3 attributes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dialect {
    /// The `Gap` attribute spelling: operator first, whitespace separated
    /// (`M8 D3 M6`).
    Gff3,

    /// The `cigar_bam` attribute spelling: length first, concatenated
    /// (`8M3D6M`).
    Bam,
}

/// One CIGAR operation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Op {
    /// The operator letter.
    pub op: char,

    /// The operation length, in match-side residues.
    pub len: i64,
}

/// An error related to parsing a CIGAR string.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The string did not decompose into operator/length pairs.
    InvalidFormat(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidFormat(text) => {
                write!(f, "invalid cigar format: {text}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parses a CIGAR string in the given dialect.
///
/// Operator letters are not validated here; the walk decides which it
/// understands. Lengths must be positive.
///
/// # Examples
///
/// ```
/// use blixfile::gff3::cigar;
///
/// let gff = cigar::parse("M8 D3 M6", cigar::Dialect::Gff3)?;
/// let bam = cigar::parse("8M3D6M", cigar::Dialect::Bam)?;
///
/// assert_eq!(gff.len(), 3);
/// assert_eq!(gff, bam);
/// # Ok::<(), cigar::ParseError>(())
/// ```
pub fn parse(text: &str, dialect: Dialect) -> Result<Vec<Op>, ParseError> {
    match dialect {
        Dialect::Gff3 => parse_gff3(text),
        Dialect::Bam => parse_bam(text),
    }
}

/// Parses the operator-first, whitespace-separated dialect.
fn parse_gff3(text: &str) -> Result<Vec<Op>, ParseError> {
    let mut ops = Vec::new();

    for token in text.split_whitespace() {
        let mut chars = token.chars();
        let op = chars
            .next()
            .filter(|c| c.is_ascii_alphabetic())
            .ok_or_else(|| ParseError::InvalidFormat(token.to_string()))?;
        let len = parse_len(chars.as_str(), token)?;
        ops.push(Op { op, len });
    }

    if ops.is_empty() {
        return Err(ParseError::InvalidFormat(text.to_string()));
    }

    Ok(ops)
}

/// Parses the length-first, concatenated dialect.
fn parse_bam(text: &str) -> Result<Vec<Op>, ParseError> {
    let mut ops = Vec::new();
    let mut digits = String::new();

    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if c.is_ascii_alphabetic() || c == '=' {
            let len = parse_len(&digits, text)?;
            ops.push(Op { op: c, len });
            digits.clear();
        } else if !c.is_whitespace() {
            return Err(ParseError::InvalidFormat(text.to_string()));
        }
    }

    if ops.is_empty() || !digits.is_empty() {
        return Err(ParseError::InvalidFormat(text.to_string()));
    }

    Ok(ops)
}

/// Parses a positive operation length.
fn parse_len(digits: &str, context: &str) -> Result<i64, ParseError> {
    digits
        .parse::<i64>()
        .ok()
        .filter(|len| *len > 0)
        .ok_or_else(|| ParseError::InvalidFormat(context.to_string()))
}

/// The result of walking a CIGAR over a feature.
#[derive(Debug)]
pub struct WalkOutcome {
    /// The resulting features: the input feature with its gap blocks
    /// populated, plus one sibling per intron (`N`) split.
    pub msps: NonEmpty<Msp>,

    /// Leniently skipped operators, described for reporting.
    pub notes: Vec<String>,

    /// The unsupported operator that aborted the walk, if any. The features
    /// are still returned with the gap blocks built so far.
    pub aborted: Option<char>,
}

/// Walks a CIGAR over a feature, building its gap blocks.
///
/// The walk runs two cursors, one per side, from the feature's start in each
/// side's strand direction. `res_factor` is the number of reference positions
/// one match residue covers (three for translated searches). An `N` operation
/// splits the feature: the current feature's ranges are closed at the cursor
/// positions and the walk continues on a fresh sibling opened past the skip.
///
/// `H`, `F` and `R` operations abort the walk; blocks built so far are kept.
/// Other unrecognized operators are skipped with a note.
pub fn walk(msp: Msp, ops: &[Op], res_factor: i64) -> WalkOutcome {
    let q_dir = msp.ref_strand().direction();
    let s_dir = msp.match_strand().direction();

    // One step before the feature start, in walk direction, on each side.
    let mut q = if q_dir > 0 {
        msp.ref_range().min() - 1
    } else {
        msp.ref_range().max() + 1
    };
    let mut s = if s_dir > 0 {
        msp.match_range().min() - 1
    } else {
        msp.match_range().max() + 1
    };

    let mut current = msp;
    let mut done: Vec<Msp> = Vec::new();
    let mut notes = Vec::new();
    let mut aborted = None;

    for op in ops {
        match op.op.to_ascii_uppercase() {
            'M' | 'X' | '=' => {
                q += q_dir * res_factor;
                s += s_dir;
                let q_start = q - q_dir * (res_factor - 1);
                let s_start = s;
                q += q_dir * res_factor * (op.len - 1);
                s += s_dir * (op.len - 1);

                current.gaps.push(GapBlock::new(
                    q_start,
                    q,
                    current.ref_strand(),
                    s_start,
                    s,
                    current.match_strand(),
                ));
            }
            'D' => q += q_dir * op.len * res_factor,
            'I' => s += s_dir * op.len,
            'N' => {
                let mut sibling = current.clone();
                sibling.gaps = Vec::new();

                current.ref_range = close(current.ref_range, q, q_dir);
                current.match_range = close(current.match_range, s, s_dir);

                q += q_dir * op.len * res_factor;

                sibling.ref_range = open(sibling.ref_range, q + q_dir, q_dir);
                sibling.match_range = open(sibling.match_range, s + s_dir, s_dir);

                done.push(std::mem::replace(&mut current, sibling));
            }
            'P' | 'S' => {}
            'H' | 'F' | 'R' => {
                aborted = Some(op.op);
                break;
            }
            other => notes.push(format!("skipping unrecognized cigar operator: {other}")),
        }
    }

    done.push(current);
    let mut siblings = done.into_iter();
    let head = siblings.next().expect("walk always yields a feature");

    WalkOutcome {
        msps: NonEmpty {
            head,
            tail: siblings.collect(),
        },
        notes,
        aborted,
    }
}

/// Clamps a range's walk-direction end to the cursor position.
fn close(range: Range, at: i64, dir: i64) -> Range {
    if dir > 0 {
        Range::new(range.min(), at)
    } else {
        Range::new(at, range.max())
    }
}

/// Clamps a range's walk-direction start to the cursor position.
fn open(range: Range, at: i64, dir: i64) -> Range {
    if dir > 0 {
        Range::new(at, range.max())
    } else {
        Range::new(range.min(), at)
    }
}
