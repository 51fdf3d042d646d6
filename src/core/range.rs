//! A 1-based, closed range of coordinates on a sequence.
//!
//! A [`Range`] is always stored normalized (`min <= max`). Direction is not
//! encoded here: a feature on the reverse strand still carries a normalized
//! range, with its direction tracked separately by its
//! [`Strand`](crate::core::Strand).

/// A 1-based, closed coordinate range.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Range {
    /// The lower bound (inclusive).
    min: i64,

    /// The upper bound (inclusive).
    max: i64,
}

impl Range {
    /// Creates a new [`Range`] from two coordinates, normalizing so that
    /// `min <= max`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::core::Range;
    ///
    /// let range = Range::new(10, 1);
    /// assert_eq!(range.min(), 1);
    /// assert_eq!(range.max(), 10);
    /// ```
    pub fn new(a: i64, b: i64) -> Self {
        if a <= b {
            Range { min: a, max: b }
        } else {
            Range { min: b, max: a }
        }
    }

    /// Returns the lower bound.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Returns the number of coordinates covered by the range.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::core::Range;
    ///
    /// assert_eq!(Range::new(1, 10).len(), 10);
    /// assert_eq!(Range::new(5, 5).len(), 1);
    /// ```
    pub fn len(&self) -> i64 {
        self.max - self.min + 1
    }

    /// Returns whether the closed-interval intersection of the two ranges is
    /// non-empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::core::Range;
    ///
    /// assert!(Range::new(1, 10).overlaps(&Range::new(10, 20)));
    /// assert!(!Range::new(1, 10).overlaps(&Range::new(11, 20)));
    /// ```
    pub fn overlaps(&self, other: &Range) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Returns whether the coordinate falls within the range.
    pub fn contains(&self, coord: i64) -> bool {
        self.min <= coord && coord <= self.max
    }
}

impl std::fmt::Display for Range {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization() {
        let range = Range::new(100, 1);
        assert_eq!(range.min(), 1);
        assert_eq!(range.max(), 100);

        let range = Range::new(1, 100);
        assert_eq!(range.min(), 1);
        assert_eq!(range.max(), 100);
    }

    #[test]
    fn length() {
        assert_eq!(Range::new(1, 1).len(), 1);
        assert_eq!(Range::new(12, 17).len(), 6);
        assert_eq!(Range::new(-5, 5).len(), 11);
    }

    #[test]
    fn overlap() {
        let range = Range::new(10, 20);

        assert!(range.overlaps(&Range::new(1, 10)));
        assert!(range.overlaps(&Range::new(20, 30)));
        assert!(range.overlaps(&Range::new(12, 14)));
        assert!(range.overlaps(&Range::new(1, 30)));

        assert!(!range.overlaps(&Range::new(1, 9)));
        assert!(!range.overlaps(&Range::new(21, 30)));
    }

    #[test]
    fn contains() {
        let range = Range::new(10, 20);
        assert!(range.contains(10));
        assert!(range.contains(20));
        assert!(!range.contains(9));
        assert!(!range.contains(21));
    }

    #[test]
    fn display() {
        assert_eq!(Range::new(10, 1).to_string(), "1-10");
    }
}
