//! An interval index over parsed features, for overlap queries by reference
//! position.

use std::collections::HashMap;

use rust_lapper::Interval;
use rust_lapper::Lapper;

use crate::core::Range;
use crate::msp::MspId;
use crate::session::Session;

/// An interval as stored in the index.
type Iv = Interval<usize, MspId>;

/// A per-reference interval index over a session's features.
///
/// The index is a snapshot: features created after construction are not
/// visible. Build it once parsing is done.
#[derive(Debug)]
pub struct FeatureIndex {
    /// One interval tree per reference sequence name.
    inner: HashMap<String, Lapper<usize, MspId>>,
}

impl FeatureIndex {
    /// Builds an index over every feature of the session.
    pub fn new(session: &Session) -> Self {
        let mut intervals: HashMap<String, Vec<Iv>> = HashMap::new();

        for (index, msp) in session.msps().iter().enumerate() {
            let range = msp.ref_range();

            intervals
                .entry(msp.ref_name().to_string())
                .or_default()
                .push(Interval {
                    start: range.min().max(0) as usize,
                    stop: (range.max() + 1).max(1) as usize,
                    val: MspId(index),
                });
        }

        FeatureIndex {
            inner: intervals
                .into_iter()
                .map(|(name, intervals)| (name, Lapper::new(intervals)))
                .collect(),
        }
    }

    /// Returns the features on the named reference overlapping the closed
    /// range, in ascending start order.
    pub fn find(&self, ref_name: &str, range: Range) -> Vec<MspId> {
        let Some(lapper) = self.inner.get(ref_name) else {
            return Vec::new();
        };

        lapper
            .find(range.min().max(0) as usize, (range.max() + 1).max(1) as usize)
            .map(|interval| interval.val)
            .collect()
    }

    /// Returns the number of reference sequences indexed.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
