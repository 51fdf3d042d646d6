//! The `exblx`/`seqbl` legacy alignment formats, plain and extended.
//!
//! These bodies are machine generated, so a malformed line fails the parse.

use crate::core::Range;
use crate::core::Strand;
use crate::msp::GapBlock;
use crate::msp::Kind;
use crate::msp::Msp;
use crate::session::Session;

use super::ParseError;

/// The tagged-section terminator in the extended formats.
const SECTION_DELIMITER: char = ';';

/// The four body flavors this module reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Format {
    /// Plain `exblx`: trailing text is a description.
    Exblx,

    /// Plain `seqbl`: trailing text is gap coordinates and match residues.
    Seqbl,

    /// Extended `exblx_x`: an explicit match strand column and tagged
    /// trailing sections.
    ExblxExt,

    /// Extended `seqbl_x`: as `exblx_x`.
    SeqblExt,
}

impl Format {
    /// Returns whether the format carries the explicit match strand column.
    fn extended(&self) -> bool {
        matches!(self, Format::ExblxExt | Format::SeqblExt)
    }

    /// Returns the number of fixed columns before the trailing free text.
    fn fixed_fields(&self) -> usize {
        if self.extended() { 8 } else { 7 }
    }
}

/// Classifies a record by the sign convention of its score.
fn kind_for_score(score: f64) -> Result<Kind, ParseError> {
    if score >= 0.0 {
        Ok(Kind::Match)
    } else if score == -1.0 {
        Ok(Kind::Cds)
    } else if score == -2.0 {
        Ok(Kind::Intron)
    } else if score == -3.0 {
        Ok(Kind::Variation)
    } else {
        Err(ParseError::InvalidType(score.to_string()))
    }
}

/// Parses one alignment line into the session.
pub(super) fn parse_line(
    line: &str,
    line_number: usize,
    format: Format,
    session: &mut Session,
) -> Result<(), ParseError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let fixed = format.fixed_fields();

    if tokens.len() < fixed {
        return Err(ParseError::IncorrectNumberOfFields {
            expected: fixed,
            found: tokens.len(),
        });
    }

    let score = tokens[0]
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidScore(tokens[0].to_string()))?;
    let kind = kind_for_score(score)?;

    let (ref_strand, ref_frame) = super::frame_token(tokens[1])?;

    let q_start = tokens[2]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidReferenceCoords(tokens[2].to_string()))?;
    let q_end = tokens[3]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidReferenceCoords(tokens[3].to_string()))?;

    let (match_strand, s_start, s_end, name) = if format.extended() {
        let match_strand = tokens[4]
            .parse::<Strand>()
            .map_err(ParseError::InvalidStrand)?;
        let s_start = match_coord(tokens[5])?;
        let s_end = match_coord(tokens[6])?;
        (match_strand, s_start, s_end, tokens[7])
    } else {
        let s_start = match_coord(tokens[4])?;
        let s_end = match_coord(tokens[5])?;

        // The plain formats have no match strand column; descending match
        // coordinates mean the reverse strand.
        let match_strand = if s_start > s_end {
            Strand::Reverse
        } else {
            Strand::Forward
        };

        (match_strand, s_start, s_end, tokens[6])
    };

    let ref_name = reference_name(session);
    let mut msp = Msp::new(kind, ref_name, Range::new(q_start, q_end), ref_strand, ref_frame);
    msp.score = Some(score);
    msp.match_name = Some(name.to_string());
    msp.match_range = Range::new(s_start, s_end);
    msp.match_strand = match_strand;

    let mut sequence_text = None;
    let remainder = tokens[fixed..].join(" ");

    match format {
        Format::Exblx => {
            if !remainder.is_empty() {
                msp.description = Some(remainder);
            }
        }
        Format::Seqbl => {
            sequence_text = parse_seqbl_trailer(&remainder, &mut msp)?;
        }
        Format::ExblxExt | Format::SeqblExt => {
            sequence_text = parse_sections(&remainder, line_number, &mut msp, session)?;
        }
    }

    let id = session.create_msp(msp)?;

    if let Some(text) = sequence_text {
        if let Some(sequence_id) = session.msp(id).sequence() {
            // First-stored residues win; a conflicting copy only warns.
            if let Err(err) = session.registry_mut().attach_data(sequence_id, &text) {
                session.warn(line_number, err.to_string());
            }
        }
    }

    Ok(())
}

/// Parses a match coordinate field.
fn match_coord(token: &str) -> Result<i64, ParseError> {
    token
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidMatchCoords(token.to_string()))
}

/// Picks the reference name for a record: these formats never carry one, so
/// the session's declared reference is used.
fn reference_name(session: &Session) -> String {
    session
        .sequence_region()
        .map(|(name, _)| name.to_string())
        .or_else(|| session.seq1().name().map(String::from))
        .unwrap_or_else(|| "@1".to_string())
}

/// Parses a plain `seqbl` trailer: optional gap coordinates followed by the
/// match residues.
fn parse_seqbl_trailer(remainder: &str, msp: &mut Msp) -> Result<Option<String>, ParseError> {
    let mut coords = Vec::new();
    let mut residues = String::new();

    for token in remainder.split_whitespace() {
        let token = token.trim_matches(SECTION_DELIMITER);
        if token.is_empty() {
            continue;
        }

        if residues.is_empty() {
            if let Ok(coord) = token.parse::<i64>() {
                coords.push(coord);
                continue;
            }
        }

        residues.push_str(token);
    }

    push_gap_blocks(&coords, remainder, msp)?;

    Ok(Some(residues).filter(|text| !text.is_empty()))
}

/// Parses the `;`-terminated tagged sections of the extended formats.
fn parse_sections(
    remainder: &str,
    line_number: usize,
    msp: &mut Msp,
    session: &mut Session,
) -> Result<Option<String>, ParseError> {
    let mut sequence_text = None;

    for section in remainder.split(SECTION_DELIMITER) {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let (tag, rest) = section
            .split_once(char::is_whitespace)
            .unwrap_or((section, ""));

        match tag {
            "Gaps" => {
                let coords = rest
                    .split_whitespace()
                    .map(|token| {
                        token
                            .parse::<i64>()
                            .map_err(|_| ParseError::InvalidGaps(rest.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                push_gap_blocks(&coords, rest, msp)?;
            }
            "Description" => {
                if !rest.is_empty() {
                    msp.description = Some(rest.to_string());
                }
            }
            "Sequence" => {
                sequence_text = Some(rest.split_whitespace().collect::<String>());
            }
            other => {
                session.warn(line_number, format!("ignoring unknown section: {other}"));
            }
        }
    }

    Ok(sequence_text)
}

/// Turns a flat list of coordinates into gap blocks. Each quadruple is
/// `match-start match-end ref-start ref-end`.
fn push_gap_blocks(coords: &[i64], context: &str, msp: &mut Msp) -> Result<(), ParseError> {
    if coords.len() % 4 != 0 {
        return Err(ParseError::InvalidGaps(context.trim().to_string()));
    }

    for chunk in coords.chunks_exact(4) {
        msp.gaps.push(GapBlock::new(
            chunk[2],
            chunk[3],
            msp.ref_strand(),
            chunk[0],
            chunk[1],
            msp.match_strand(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_sign_classification() {
        assert_eq!(kind_for_score(0.0).unwrap(), Kind::Match);
        assert_eq!(kind_for_score(512.0).unwrap(), Kind::Match);
        assert_eq!(kind_for_score(-1.0).unwrap(), Kind::Cds);
        assert_eq!(kind_for_score(-2.0).unwrap(), Kind::Intron);
        assert_eq!(kind_for_score(-3.0).unwrap(), Kind::Variation);
        assert!(kind_for_score(-4.0).is_err());
    }

    #[test]
    fn plain_exblx_line() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_line(
            "500 (+1) 100 200 1 101 EST:ab1 a human EST",
            1,
            Format::Exblx,
            &mut session,
        )?;

        let msp = &session.msps()[0];
        assert_eq!(msp.kind(), Kind::Match);
        assert_eq!(msp.score(), Some(500.0));
        assert_eq!(msp.ref_range(), Range::new(100, 200));
        assert_eq!(msp.ref_strand(), Strand::Forward);
        assert_eq!(msp.ref_frame(), 1);
        assert_eq!(msp.match_name(), Some("EST:ab1"));
        assert_eq!(msp.match_strand(), Strand::Forward);
        assert_eq!(msp.description(), Some("a human EST"));

        Ok(())
    }

    #[test]
    fn plain_format_infers_match_strand_from_coordinates(
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_line("500 (+1) 100 200 101 1 EST:ab1", 1, Format::Exblx, &mut session)?;

        let msp = &session.msps()[0];
        assert_eq!(msp.match_strand(), Strand::Reverse);
        assert_eq!(msp.match_range(), Range::new(1, 101));

        Ok(())
    }

    #[test]
    fn extended_line_with_sections() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_line(
            "500 (+1) 1 23 + 1 21 EST:ab1 Gaps 1 8 1 8 9 14 12 17 16 21 18 23 ; \
             Description a human EST ; Sequence ACGTACGTACGTACGTACGTA ;",
            1,
            Format::ExblxExt,
            &mut session,
        )?;

        let msp = &session.msps()[0];
        assert_eq!(msp.gaps().len(), 3);
        assert_eq!((msp.gaps()[1].ref_start(), msp.gaps()[1].ref_end()), (12, 17));
        assert_eq!(
            (msp.gaps()[1].match_start(), msp.gaps()[1].match_end()),
            (9, 14)
        );
        assert_eq!(msp.description(), Some("a human EST"));

        let sequence_id = msp.sequence().unwrap();
        assert_eq!(
            session.registry().sequence(sequence_id).data(),
            Some("ACGTACGTACGTACGTACGTA")
        );

        Ok(())
    }

    #[test]
    fn seqbl_trailer_attaches_residues() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_line(
            "500 (+1) 100 111 1 12 EST:ab1 ACGTACGTACGT",
            1,
            Format::Seqbl,
            &mut session,
        )?;

        let sequence_id = session.msps()[0].sequence().unwrap();
        assert_eq!(
            session.registry().sequence(sequence_id).data(),
            Some("ACGTACGTACGT")
        );

        Ok(())
    }

    #[test]
    fn negative_scores_build_transcript_features() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_line("-1 (+1) 100 200 1 101 AC0001.1", 1, Format::Exblx, &mut session)?;
        parse_line("-2 (+1) 201 300 101 102 AC0001.1", 2, Format::Exblx, &mut session)?;

        assert_eq!(session.msps()[0].kind(), Kind::Cds);
        assert_eq!(session.msps()[1].kind(), Kind::Intron);
        assert_eq!(session.registry().len(), 1);

        Ok(())
    }

    #[test]
    fn short_lines_are_errors() {
        let mut session = Session::default();
        let err = parse_line("500 (+1) 100 200 1", 1, Format::Exblx, &mut session).unwrap_err();
        assert_eq!(
            err,
            ParseError::IncorrectNumberOfFields {
                expected: 7,
                found: 5,
            }
        );

        let err =
            parse_line("500 (+1) 100 200 1 101 EST:ab1", 1, Format::ExblxExt, &mut session)
                .unwrap_err();
        assert_eq!(
            err,
            ParseError::IncorrectNumberOfFields {
                expected: 8,
                found: 7,
            }
        );
    }

    #[test]
    fn uneven_gap_coordinates_are_errors() {
        let mut session = Session::default();
        let err = parse_line(
            "500 (+1) 1 23 + 1 21 EST:ab1 Gaps 1 8 1 8 9 ;",
            1,
            Format::ExblxExt,
            &mut session,
        )
        .unwrap_err();

        assert!(matches!(err, ParseError::InvalidGaps(_)));
    }
}
