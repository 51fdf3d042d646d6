//! Gap blocks: the aligned sub-range pairs within a gapped alignment.

use crate::core::Strand;

/// One maximal contiguous matching sub-range pair within an alignment.
///
/// Unlike [`Range`](crate::core::Range), the coordinate pairs here are
/// direction-bearing: each pair is ordered consistent with the strand of the
/// sequence it belongs to, so `start` exceeds `end` on the reverse strand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct GapBlock {
    /// The start of the block on the reference sequence.
    ref_start: i64,

    /// The end of the block on the reference sequence.
    ref_end: i64,

    /// The start of the block on the match sequence.
    match_start: i64,

    /// The end of the block on the match sequence.
    match_end: i64,
}

impl GapBlock {
    /// Creates a new [`GapBlock`], ordering each coordinate pair so the lower
    /// value comes first iff the corresponding strand is forward.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::core::Strand;
    /// use blixfile::msp::GapBlock;
    ///
    /// let block = GapBlock::new(8, 1, Strand::Forward, 1, 8, Strand::Reverse);
    /// assert_eq!((block.ref_start(), block.ref_end()), (1, 8));
    /// assert_eq!((block.match_start(), block.match_end()), (8, 1));
    /// ```
    pub fn new(
        ref_a: i64,
        ref_b: i64,
        ref_strand: Strand,
        match_a: i64,
        match_b: i64,
        match_strand: Strand,
    ) -> Self {
        let (ref_start, ref_end) = order(ref_a, ref_b, ref_strand);
        let (match_start, match_end) = order(match_a, match_b, match_strand);

        GapBlock {
            ref_start,
            ref_end,
            match_start,
            match_end,
        }
    }

    /// Returns the start of the block on the reference sequence.
    pub fn ref_start(&self) -> i64 {
        self.ref_start
    }

    /// Returns the end of the block on the reference sequence.
    pub fn ref_end(&self) -> i64 {
        self.ref_end
    }

    /// Returns the start of the block on the match sequence.
    pub fn match_start(&self) -> i64 {
        self.match_start
    }

    /// Returns the end of the block on the match sequence.
    pub fn match_end(&self) -> i64 {
        self.match_end
    }

    /// Returns the number of reference coordinates the block spans.
    pub fn ref_span(&self) -> i64 {
        (self.ref_end - self.ref_start).abs() + 1
    }

    /// Returns the number of match coordinates the block spans.
    pub fn match_span(&self) -> i64 {
        (self.match_end - self.match_start).abs() + 1
    }
}

/// Orders a coordinate pair consistent with a strand direction.
fn order(a: i64, b: i64, strand: Strand) -> (i64, i64) {
    let ascending = !strand.is_reverse();
    if (a <= b) == ascending {
        (a, b)
    } else {
        (b, a)
    }
}
