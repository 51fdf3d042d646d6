//! The `FS`/`SFS` feature-series formats: HSP alignments, annotation
//! segments, XY plots and inline input sequences.

use crate::core::Range;
use crate::core::Strand;
use crate::msp::Kind;
use crate::msp::Msp;
use crate::session::BlastMode;
use crate::session::SeriesId;
use crate::session::Session;
use crate::session::XY_UNFILLED;
use crate::style::Look;

use super::ParseError;

/// The pad character prefixed to HSP residues.
const PAD: char = '-';

/// The number of fields in an `FS type=HSP` line.
const NUM_HSP_FIELDS: usize = 10;

/// The number of fields in an `FS type=SEG` line.
const NUM_SEG_FIELDS: usize = 6;

/// The number of fields in an `FS type=GFF` line.
const NUM_GFF_FIELDS: usize = 8;

/// The number of fields in an `FS type=XY` header.
const NUM_XY_HEADER_FIELDS: usize = 5;

/// The number of fields in an `FS type=SEQ` header.
const NUM_SEQ_HEADER_FIELDS: usize = 3;

/// Parses one `FS type=HSP` alignment line.
pub(super) fn parse_hsp(
    line: &str,
    line_number: usize,
    session: &mut Session,
) -> Result<(), ParseError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();

    if tokens.len() != NUM_HSP_FIELDS {
        return Err(ParseError::IncorrectNumberOfFields {
            expected: NUM_HSP_FIELDS,
            found: tokens.len(),
        });
    }

    let score = tokens[0]
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidScore(tokens[0].to_string()))?;

    let (ref_strand, ref_frame) = super::frame_token(tokens[2])?;
    let q_start = reference_coord(tokens[3])?;
    let q_end = reference_coord(tokens[4])?;

    let (match_strand, _) = super::frame_token(tokens[6])?;
    let s_start = match_coord(tokens[7])?;
    let s_end = match_coord(tokens[8])?;

    let mut msp = Msp::new(
        Kind::Match,
        tokens[1],
        Range::new(q_start, q_end),
        ref_strand,
        ref_frame,
    );
    msp.score = Some(score);
    msp.match_name = Some(tokens[5].to_string());
    msp.match_range = Range::new(s_start, s_end);
    msp.match_strand = match_strand;

    // The residues cover only the aligned span, so they are padded out to
    // the match start; the translated-query modes already carry full-length
    // residues.
    let padded = match session.blast_mode() {
        Some(BlastMode::TBlastN) | Some(BlastMode::TBlastX) => tokens[9].to_string(),
        _ => {
            let pad = (s_start.min(s_end) - 1).max(0) as usize;
            let mut text = String::with_capacity(pad + tokens[9].len());
            for _ in 0..pad {
                text.push(PAD);
            }
            text.push_str(tokens[9]);
            text
        }
    };

    let id = session.create_msp(msp)?;

    if let Some(sequence_id) = session.msp(id).sequence() {
        if let Err(err) = session.registry_mut().attach_data(sequence_id, &padded) {
            session.warn(line_number, err.to_string());
        }
    }

    Ok(())
}

/// Parses one `FS type=SEG` annotation segment line.
pub(super) fn parse_seg(
    line: &str,
    line_number: usize,
    session: &mut Session,
) -> Result<(), ParseError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();

    if tokens.len() != NUM_SEG_FIELDS {
        return Err(ParseError::IncorrectNumberOfFields {
            expected: NUM_SEG_FIELDS,
            found: tokens.len(),
        });
    }

    let score = tokens[0]
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidScore(tokens[0].to_string()))?;
    let start = reference_coord(tokens[3])?;
    let end = reference_coord(tokens[4])?;

    let series = styled_series(tokens[2], tokens[5], line_number, session);

    let mut msp = Msp::new(
        Kind::Segment,
        tokens[1],
        Range::new(start, end),
        Strand::None,
        0,
    );
    msp.score = Some(score);
    msp.series = Some(series);

    session.create_msp(msp)?;
    Ok(())
}

/// Parses one `FS type=GFF` annotation segment line.
pub(super) fn parse_gff(
    line: &str,
    line_number: usize,
    session: &mut Session,
) -> Result<(), ParseError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();

    if tokens.len() != NUM_GFF_FIELDS {
        return Err(ParseError::IncorrectNumberOfFields {
            expected: NUM_GFF_FIELDS,
            found: tokens.len(),
        });
    }

    let start = reference_coord(tokens[3])?;
    let end = reference_coord(tokens[4])?;

    // An absent score means full intensity; a present one is a fraction
    // scaled to the midpoint of the displayable range.
    let score = match tokens[5] {
        "." => 100.0,
        text => {
            50.0 * text
                .parse::<f64>()
                .map_err(|_| ParseError::InvalidScore(text.to_string()))?
        }
    };

    let strand = tokens[6]
        .parse::<Strand>()
        .map_err(ParseError::InvalidStrand)?;

    let frame = match tokens[7] {
        "." => 0,
        text => text
            .parse::<i8>()
            .map_err(|_| ParseError::InvalidFrame(text.to_string()))?,
    };

    let series = styled_series(tokens[1], tokens[2], line_number, session);

    let mut msp = Msp::new(Kind::Segment, tokens[0], Range::new(start, end), strand, frame);
    msp.score = Some(score);
    msp.series = Some(series);

    session.create_msp(msp)?;
    Ok(())
}

/// Parses an `FS type=XY` header line (the header doubles as the first line
/// of its own body). Allocates the series value array, one slot per residue
/// of the designated input sequence, and creates the plot feature.
pub(super) fn parse_xy_header(
    line: &str,
    line_number: usize,
    session: &mut Session,
) -> Result<SeriesId, ParseError> {
    let tokens = header_tokens(line);

    if tokens.len() != NUM_XY_HEADER_FIELDS {
        return Err(ParseError::IncorrectNumberOfFields {
            expected: NUM_XY_HEADER_FIELDS,
            found: tokens.len(),
        });
    }

    let designator = tokens[4];
    let (slot_name, len) = match session.slot_mut(designator) {
        Some(slot) => (slot.name().map(String::from), slot.data().chars().count()),
        None => return Err(ParseError::UnknownSequence(designator.to_string())),
    };

    let series = styled_series(tokens[2], tokens[3], line_number, session);
    session.series_mut(series).values = Some(vec![XY_UNFILLED; len]);

    let mut msp = Msp::new(
        Kind::XyPlot,
        slot_name.unwrap_or_else(|| designator.to_string()),
        Range::new(1, len.max(1) as i64),
        Strand::None,
        0,
    );
    msp.series = Some(series);
    session.create_msp(msp)?;

    Ok(series)
}

/// Parses an `FS type=XY` value line: a 1-based index and a value.
pub(super) fn parse_xy_body(
    line: &str,
    line_number: usize,
    series: SeriesId,
    session: &mut Session,
) -> Result<(), ParseError> {
    let tokens = line.split_whitespace().collect::<Vec<_>>();

    if tokens.len() != 2 {
        return Err(ParseError::IncorrectNumberOfFields {
            expected: 2,
            found: tokens.len(),
        });
    }

    let index = tokens[0]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidValue(tokens[0].to_string()))?;
    let value = tokens[1]
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidValue(tokens[1].to_string()))?;

    let len = session
        .series(series)
        .values()
        .map(|values| values.len())
        .unwrap_or(0);

    if index < 1 || index as usize > len {
        session.warn(line_number, format!("XY index out of range: {index}"));
        return Ok(());
    }

    if let Some(values) = session.series_mut(series).values.as_mut() {
        values[index as usize - 1] = value;
    }

    Ok(())
}

/// Parses an `FS type=SEQ` header line (reprocessed like the XY header),
/// returning the designator of the slot the body fills. The slot is emptied
/// first.
pub(super) fn parse_seq_header(line: &str, session: &mut Session) -> Result<String, ParseError> {
    let tokens = header_tokens(line);

    if tokens.len() != NUM_SEQ_HEADER_FIELDS {
        return Err(ParseError::IncorrectNumberOfFields {
            expected: NUM_SEQ_HEADER_FIELDS,
            found: tokens.len(),
        });
    }

    let designator = tokens[2];
    match session.slot_mut(designator) {
        Some(slot) => {
            slot.data.clear();
            Ok(designator.to_string())
        }
        None => Err(ParseError::UnknownSequence(designator.to_string())),
    }
}

/// Splits a `# FS ...` header into its tokens.
fn header_tokens(line: &str) -> Vec<&str> {
    line.trim_start_matches('#').split_whitespace().collect()
}

/// Finds or creates the named series and applies a `Look` field to it.
/// Unrecognized look tokens only warn.
fn styled_series(
    name: &str,
    look_field: &str,
    line_number: usize,
    session: &mut Session,
) -> SeriesId {
    let series = session.find_or_create_series(name);
    let (look, unrecognized) = Look::parse(look_field);

    for token in unrecognized {
        session.warn(line_number, format!("ignoring unknown look token: {token}"));
    }

    if let Some(color) = look.color {
        session.series_mut(series).color = Some(color);
    }
    if let Some(shape) = look.shape {
        session.series_mut(series).shape = Some(shape);
    }

    series
}

/// Parses a reference coordinate field.
fn reference_coord(token: &str) -> Result<i64, ParseError> {
    token
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidReferenceCoords(token.to_string()))
}

/// Parses a match coordinate field.
fn match_coord(token: &str) -> Result<i64, ParseError> {
    token
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidMatchCoords(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Shape;
    use crate::style::color_by_name;

    #[test]
    fn hsp_line_pads_residues() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_hsp(
            "512 chr4-04 (+2) 100 139 SW:Q9 (+1) 5 14 MSNSLDTGHE",
            1,
            &mut session,
        )?;

        let msp = &session.msps()[0];
        assert_eq!(msp.kind(), Kind::Match);
        assert_eq!(msp.ref_name(), "chr4-04");
        assert_eq!(msp.ref_frame(), 2);
        assert_eq!(msp.match_name(), Some("SW:Q9"));

        let sequence_id = msp.sequence().unwrap();
        assert_eq!(
            session.registry().sequence(sequence_id).data(),
            Some("----MSNSLDTGHE")
        );

        Ok(())
    }

    #[test]
    fn hsp_padding_skipped_for_translated_queries() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        session.set_blast_mode(BlastMode::TBlastN);
        parse_hsp(
            "512 chr4-04 (+2) 100 139 SW:Q9 (+1) 5 14 MSNSLDTGHE",
            1,
            &mut session,
        )?;

        let sequence_id = session.msps()[0].sequence().unwrap();
        assert_eq!(
            session.registry().sequence(sequence_id).data(),
            Some("MSNSLDTGHE")
        );

        Ok(())
    }

    #[test]
    fn seg_line_styles_its_series() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_seg("75 chr4-04 hydrophobicity 120 180 blue", 1, &mut session)?;

        let msp = &session.msps()[0];
        assert_eq!(msp.kind(), Kind::Segment);
        assert_eq!(msp.ref_range(), Range::new(120, 180));

        let series = session.series(msp.series().unwrap());
        assert_eq!(series.name(), "hydrophobicity");
        assert_eq!(series.color(), color_by_name("blue"));

        Ok(())
    }

    #[test]
    fn gff_line_scales_scores() -> Result<(), Box<dyn std::error::Error>> {
        let mut session = Session::default();
        parse_gff("chr4-04 repeats red 120 180 0.8 + .", 1, &mut session)?;
        parse_gff("chr4-04 repeats red 200 240 . - 2", 2, &mut session)?;

        assert_eq!(session.msps()[0].score(), Some(40.0));
        assert_eq!(session.msps()[0].ref_strand(), Strand::Forward);
        assert_eq!(session.msps()[1].score(), Some(100.0));
        assert_eq!(session.msps()[1].ref_strand(), Strand::Reverse);
        assert_eq!(session.msps()[1].ref_frame(), 2);

        Ok(())
    }

    #[test]
    fn xy_header_allocates_unfilled_values() -> Result<(), Box<dyn std::error::Error>> {
        let mut session =
            Session::with_input_sequences(Some("chr4-04"), Some("ACGTACGT"), None, None);

        let series = parse_xy_header(
            "# FS type=XY conservation blue,interpolate @1",
            1,
            &mut session,
        )?;

        assert_eq!(
            session.series(series).values(),
            Some(&[XY_UNFILLED; 8][..])
        );
        assert_eq!(session.series(series).shape(), Some(Shape::Interpolate));

        parse_xy_body("3 42", 2, series, &mut session)?;
        assert_eq!(session.series(series).values().unwrap()[2], 42);

        // Out-of-range indices warn and are dropped.
        parse_xy_body("9 1", 3, series, &mut session)?;
        assert_eq!(session.warnings().len(), 1);

        let msp = &session.msps()[0];
        assert_eq!(msp.kind(), Kind::XyPlot);
        assert_eq!(msp.ref_name(), "chr4-04");
        assert_eq!(msp.ref_range(), Range::new(1, 8));

        Ok(())
    }

    #[test]
    fn xy_header_requires_a_known_designator() {
        let mut session = Session::default();
        let err = parse_xy_header("# FS type=XY conservation blue @3", 1, &mut session)
            .unwrap_err();
        assert_eq!(err, ParseError::UnknownSequence("@3".to_string()));
    }

    #[test]
    fn seq_header_resets_its_slot() -> Result<(), Box<dyn std::error::Error>> {
        let mut session =
            Session::with_input_sequences(Some("chr4-04"), Some("ACGT"), None, None);

        let designator = parse_seq_header("# FS type=SEQ @1", &mut session)?;
        assert_eq!(designator, "@1");
        assert_eq!(session.seq1().data(), "");

        Ok(())
    }
}
