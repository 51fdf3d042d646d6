//! The GFF3 attributes column: `Tag=Value` pairs separated by semicolons.

use std::str::FromStr;

use crate::core::Strand;

/// The pair delimiter within the attributes column.
const PAIR_DELIMITER: char = ';';

/// The tag/value delimiter within a pair.
const TAG_DELIMITER: char = '=';

/// An error related to parsing a GFF3 attributes column.
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// A pair had no `=` delimiter or an empty tag.
    InvalidTag(String),

    /// A `Target` value did not have three or four tokens.
    InvalidTargetArity(usize),

    /// A `Target` value carried unparseable coordinates.
    InvalidTargetCoords(String),

    /// A `Target` value carried an unparseable strand.
    InvalidTargetStrand(String),

    /// A `percentID` value was not a number.
    InvalidPercentId(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::InvalidTag(pair) => write!(f, "invalid attribute: {pair}"),
            ParseError::InvalidTargetArity(found) => write!(
                f,
                "invalid number of Target tokens: expected 3 or 4, found {found}"
            ),
            ParseError::InvalidTargetCoords(value) => {
                write!(f, "invalid Target coordinates: {value}")
            }
            ParseError::InvalidTargetStrand(value) => {
                write!(f, "invalid Target strand: {value}")
            }
            ParseError::InvalidPercentId(value) => {
                write!(f, "invalid percentID value: {value}")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// A parsed `Target` attribute: the feature's location on the match
/// sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    /// The match sequence name.
    pub name: String,

    /// The start coordinate on the match sequence.
    pub start: i64,

    /// The end coordinate on the match sequence.
    pub end: i64,

    /// The match strand ([`Strand::Forward`] when the value had none).
    pub strand: Strand,
}

/// The attributes this crate understands, unpacked from the column.
///
/// Unrecognized tags are ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Attributes {
    /// The `Name` attribute.
    pub name: Option<String>,

    /// The `ID` attribute.
    pub id: Option<String>,

    /// The first `Parent` attribute value.
    pub parent: Option<String>,

    /// The `Target` attribute.
    pub target: Option<Target>,

    /// The `Gap` attribute, verbatim.
    pub gap: Option<String>,

    /// The `cigar_bam` attribute, verbatim.
    pub cigar_bam: Option<String>,

    /// The `percentID` attribute.
    pub percent_id: Option<f64>,

    /// The `sequence` attribute: match residues, forward-strand orientation.
    pub sequence: Option<String>,

    /// The `variant_sequence` attribute.
    pub variant_sequence: Option<String>,

    /// The `dataType` attribute.
    pub data_type: Option<String>,

    /// The `file` attribute.
    pub file: Option<String>,

    /// The `organism` attribute.
    pub organism: Option<String>,

    /// The `geneName` attribute.
    pub gene_name: Option<String>,

    /// The `tissueType` attribute.
    pub tissue_type: Option<String>,

    /// The `strain` attribute.
    pub strain: Option<String>,
}

impl FromStr for Attributes {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut attributes = Attributes::default();

        for pair in s.split(PAIR_DELIMITER) {
            let pair = pair.trim();
            if pair.is_empty() {
                continue;
            }

            let (tag, value) = pair
                .split_once(TAG_DELIMITER)
                .filter(|(tag, _)| !tag.is_empty())
                .ok_or_else(|| ParseError::InvalidTag(pair.to_string()))?;

            match tag {
                "Name" => attributes.name = Some(value.to_string()),
                "ID" => attributes.id = Some(value.to_string()),
                "Parent" => {
                    let first = value.split(',').next().unwrap_or(value);
                    attributes.parent = Some(first.to_string());
                }
                "Target" => attributes.target = Some(parse_target(value)?),
                "Gap" => attributes.gap = Some(value.to_string()),
                "cigar_bam" => attributes.cigar_bam = Some(value.to_string()),
                "percentID" => {
                    let percent_id = value
                        .parse::<f64>()
                        .map_err(|_| ParseError::InvalidPercentId(value.to_string()))?;
                    attributes.percent_id = Some(percent_id);
                }
                "sequence" => attributes.sequence = Some(value.to_string()),
                "variant_sequence" => attributes.variant_sequence = Some(value.to_string()),
                "dataType" => attributes.data_type = Some(value.to_string()),
                "file" => attributes.file = Some(value.to_string()),
                "organism" => attributes.organism = Some(value.to_string()),
                "geneName" => attributes.gene_name = Some(value.to_string()),
                "tissueType" => attributes.tissue_type = Some(value.to_string()),
                "strain" => attributes.strain = Some(value.to_string()),
                _ => {}
            }
        }

        Ok(attributes)
    }
}

/// Parses a `Target` value: `name start end [strand]`.
fn parse_target(value: &str) -> Result<Target, ParseError> {
    let tokens = value.split_whitespace().collect::<Vec<_>>();

    if tokens.len() != 3 && tokens.len() != 4 {
        return Err(ParseError::InvalidTargetArity(tokens.len()));
    }

    let start = tokens[1]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidTargetCoords(tokens[1].to_string()))?;
    let end = tokens[2]
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidTargetCoords(tokens[2].to_string()))?;

    let strand = match tokens.get(3) {
        Some(token) => token
            .parse::<Strand>()
            .map_err(|_| ParseError::InvalidTargetStrand(token.to_string()))?,
        None => Strand::Forward,
    };

    Ok(Target {
        name: tokens[0].to_string(),
        start,
        end,
        strand,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_column() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "Name=EST:ab1;Target=EST:ab1 1 21 +;Gap=M8 D3 M6 I1 M6;percentID=95.5"
            .parse::<Attributes>()?;

        assert_eq!(attributes.name.as_deref(), Some("EST:ab1"));
        assert_eq!(
            attributes.target,
            Some(Target {
                name: "EST:ab1".to_string(),
                start: 1,
                end: 21,
                strand: Strand::Forward,
            })
        );
        assert_eq!(attributes.gap.as_deref(), Some("M8 D3 M6 I1 M6"));
        assert_eq!(attributes.percent_id, Some(95.5));

        Ok(())
    }

    #[test]
    fn target_strand_defaults_to_forward() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "Target=Q9 5 10".parse::<Attributes>()?;
        assert_eq!(attributes.target.unwrap().strand, Strand::Forward);
        Ok(())
    }

    #[test]
    fn parent_takes_first_value() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "Parent=tx-1,tx-2".parse::<Attributes>()?;
        assert_eq!(attributes.parent.as_deref(), Some("tx-1"));
        Ok(())
    }

    #[test]
    fn unknown_tags_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
        let attributes = "Alias=other;Note=free text".parse::<Attributes>()?;
        assert_eq!(attributes, Attributes::default());
        Ok(())
    }

    #[test]
    fn malformed_pair_is_an_error() {
        let err = "Name".parse::<Attributes>().unwrap_err();
        assert_eq!(err.to_string(), "invalid attribute: Name");

        let err = "Target=Q9 5".parse::<Attributes>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid number of Target tokens: expected 3 or 4, found 2"
        );
    }
}
