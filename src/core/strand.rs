//! The strand upon which a feature is located.

use std::str::FromStr;

/// An error related to the parsing of a strand.
#[derive(Debug, Eq, PartialEq)]
pub struct ParseStrandError(String);

impl std::fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid strand: {}", self.0)
    }
}

impl std::error::Error for ParseStrandError {}

/// The strand of a reference or match sequence.
///
/// Both `.` and `?` parse as [`Strand::None`]: the former means the feature
/// is unstranded, the latter that the strand is relevant but unknown. The
/// distinction is not preserved.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Strand {
    /// No strand (`.` or `?`).
    #[default]
    None,

    /// The forward strand (`+`).
    Forward,

    /// The reverse strand (`-`).
    Reverse,
}

impl Strand {
    /// Returns the multiplier to apply when walking coordinates along this
    /// strand: `-1` for the reverse strand, `1` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::core::Strand;
    ///
    /// assert_eq!(Strand::Forward.direction(), 1);
    /// assert_eq!(Strand::Reverse.direction(), -1);
    /// ```
    pub fn direction(&self) -> i64 {
        match self {
            Strand::Reverse => -1,
            _ => 1,
        }
    }

    /// Returns whether this is the forward strand.
    pub fn is_forward(&self) -> bool {
        matches!(self, Strand::Forward)
    }

    /// Returns whether this is the reverse strand.
    pub fn is_reverse(&self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            "." | "?" => Ok(Self::None),
            c => Err(ParseStrandError(c.into())),
        }
    }
}

impl std::fmt::Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strand::None => write!(f, "."),
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strand_from_str() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("+".parse::<Strand>()?, Strand::Forward);
        assert_eq!("-".parse::<Strand>()?, Strand::Reverse);
        assert_eq!(".".parse::<Strand>()?, Strand::None);
        assert_eq!("?".parse::<Strand>()?, Strand::None);

        let err = "*".parse::<Strand>().unwrap_err();
        assert_eq!(err.to_string(), "invalid strand: *");

        Ok(())
    }

    #[test]
    fn strand_display() {
        assert_eq!(Strand::Forward.to_string(), "+");
        assert_eq!(Strand::Reverse.to_string(), "-");
        assert_eq!(Strand::None.to_string(), ".");
    }

    #[test]
    fn direction() {
        assert_eq!(Strand::Forward.direction(), 1);
        assert_eq!(Strand::None.direction(), 1);
        assert_eq!(Strand::Reverse.direction(), -1);
    }
}
