//! The match-sequence registry: find-or-create lookup over the aggregates
//! created during a parse session.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::Range;
use crate::core::Strand;
use crate::msp::MspId;
use crate::sequence::Error;
use crate::sequence::Kind;
use crate::sequence::Sequence;
use crate::sequence::SequenceId;
use crate::sequence::reverse_complement;

/// The registry of match-sequence aggregates for one parse session.
///
/// Lookup is exact and case-sensitive, by full name or id tag, scoped to a
/// strand. The registry owns the aggregates; callers hold [`SequenceId`]
/// handles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    /// The aggregates, in creation order.
    sequences: Vec<Sequence>,
}

impl Registry {
    /// Returns the aggregate for the handle.
    pub fn sequence(&self, id: SequenceId) -> &Sequence {
        &self.sequences[id.0]
    }

    /// Returns a mutable reference to the aggregate for the handle.
    pub(crate) fn sequence_mut(&mut self, id: SequenceId) -> &mut Sequence {
        &mut self.sequences[id.0]
    }

    /// Returns every aggregate, in creation order.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Returns the number of aggregates.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Finds the aggregate for the given name or id tag on the given strand,
    /// creating it if none exists yet.
    ///
    /// Calling this twice with the same identity returns the same handle;
    /// a duplicate is never created. At least one of `name` and `id_tag`
    /// must be provided.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::core::Strand;
    /// use blixfile::sequence::Registry;
    ///
    /// let mut registry = Registry::default();
    ///
    /// let first = registry.find_or_create(Some("Q9"), None, Strand::Forward)?;
    /// let second = registry.find_or_create(Some("Q9"), None, Strand::Forward)?;
    ///
    /// assert_eq!(first, second);
    /// assert_eq!(registry.len(), 1);
    /// # Ok::<(), blixfile::sequence::Error>(())
    /// ```
    /// Finds an existing aggregate by name or id tag, on any strand.
    ///
    /// Unlike [`Registry::find_or_create`] this never creates; it is the
    /// lookup for inputs that name a sequence without carrying a strand of
    /// their own, such as a FASTA header.
    pub fn find(&self, name: Option<&str>, id_tag: Option<&str>) -> Option<SequenceId> {
        self.sequences
            .iter()
            .position(|sequence| sequence.answers_to(name, id_tag))
            .map(SequenceId)
    }

    pub fn find_or_create(
        &mut self,
        name: Option<&str>,
        id_tag: Option<&str>,
        strand: Strand,
    ) -> Result<SequenceId, Error> {
        if name.is_none() && id_tag.is_none() {
            return Err(Error::MissingName);
        }

        let found = self.sequences.iter().position(|sequence| {
            sequence.strand() == strand && sequence.answers_to(name, id_tag)
        });

        if let Some(index) = found {
            // A record may carry an identity form the first record lacked.
            let sequence = &mut self.sequences[index];
            if sequence.full_name.is_none() {
                if let Some(name) = name {
                    sequence.full_name = Some(name.to_string());
                    sequence.variant_name = Some(super::variant_name(name));
                    sequence.short_name =
                        sequence.variant_name.as_deref().map(super::short_name);
                }
            }
            if sequence.id_tag.is_none() {
                sequence.id_tag = id_tag.map(String::from);
            }

            return Ok(SequenceId(index));
        }

        self.sequences.push(Sequence::new(name, id_tag, strand));
        Ok(SequenceId(self.sequences.len() - 1))
    }

    /// Records that a feature belongs to an aggregate, extending the
    /// aggregate's span. Classification is set on first use and never
    /// overwritten.
    pub(crate) fn attach_msp(
        &mut self,
        id: SequenceId,
        msp: MspId,
        match_range: Range,
        kind: Kind,
    ) {
        let sequence = &mut self.sequences[id.0];
        sequence.msps.push(msp);

        if sequence.kind == Kind::Unset {
            sequence.kind = kind;
        }

        if sequence.data.is_none() {
            sequence.range = Some(match sequence.range {
                Some(range) => Range::new(
                    range.min().min(match_range.min()),
                    range.max().max(match_range.max()),
                ),
                None => match_range,
            });
        }
    }

    /// Attaches residue text to an aggregate.
    ///
    /// Callers always supply the text in forward-strand orientation; for a
    /// reverse-strand aggregate it is reverse-complemented before storage.
    /// If data already exists it must be byte-for-byte identical to the
    /// incoming (oriented) text: a mismatch is a
    /// [`Error::SequenceDataMismatch`] and the stored text is unchanged.
    /// After a successful set the aggregate's valid range is `[1, len]`.
    pub fn attach_data(&mut self, id: SequenceId, text: &str) -> Result<(), Error> {
        let oriented = if self.sequences[id.0].strand().is_reverse() {
            reverse_complement(text)?
        } else {
            text.to_string()
        };

        let sequence = &mut self.sequences[id.0];

        match sequence.data.as_deref() {
            Some(existing) if existing == oriented => Ok(()),
            Some(_) => {
                let name = sequence
                    .full_name()
                    .or(sequence.id_tag())
                    .unwrap_or("<unnamed>")
                    .to_string();
                Err(Error::SequenceDataMismatch(name))
            }
            None => {
                sequence.range = Some(Range::new(1, oriented.len() as i64));
                sequence.data = Some(oriented);
                Ok(())
            }
        }
    }

    /// Locates the parent of a splice variant.
    ///
    /// The variant name is expected to carry a `-<number>` suffix, optionally
    /// followed by `.` and further text. The parent name is reconstructed
    /// with the variant suffix excised (keeping any trailing `.`-prefixed
    /// text) and looked up by exact full-name match. Returns [`None`] when
    /// the name has no variant suffix or no parent is registered.
    ///
    /// # Examples
    ///
    /// ```
    /// use blixfile::core::Strand;
    /// use blixfile::sequence::Registry;
    ///
    /// let mut registry = Registry::default();
    /// let parent = registry.find_or_create(Some("SW:P51531.2"), None, Strand::Forward)?;
    ///
    /// assert_eq!(registry.find_parent("SW:P51531-2.2"), Some(parent));
    /// assert_eq!(registry.find_parent("SW:P51531.2"), None);
    /// # Ok::<(), blixfile::sequence::Error>(())
    /// ```
    pub fn find_parent(&self, variant_name: &str) -> Option<SequenceId> {
        static VARIANT_SUFFIX: OnceLock<Regex> = OnceLock::new();
        let re = VARIANT_SUFFIX
            .get_or_init(|| Regex::new(r"^(.*)-\d+(\..*)?$").expect("variant suffix regex"));

        let captures = re.captures(variant_name)?;
        let mut parent_name = captures[1].to_string();
        if let Some(rest) = captures.get(2) {
            parent_name.push_str(rest.as_str());
        }

        self.sequences
            .iter()
            .position(|sequence| sequence.full_name() == Some(parent_name.as_str()))
            .map(SequenceId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_or_create_returns_identical_handle() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry = Registry::default();

        let first = registry.find_or_create(Some("Q9"), None, Strand::Forward)?;
        let second = registry.find_or_create(Some("Q9"), None, Strand::Forward)?;
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);

        // A different strand is a different aggregate.
        let third = registry.find_or_create(Some("Q9"), None, Strand::Reverse)?;
        assert_ne!(first, third);
        assert_eq!(registry.len(), 2);

        Ok(())
    }

    #[test]
    fn lookup_by_id_tag() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry = Registry::default();

        let first = registry.find_or_create(None, Some("tag-1"), Strand::Forward)?;
        let second = registry.find_or_create(Some("late-name"), Some("tag-1"), Strand::Forward)?;
        assert_eq!(first, second);

        // The late-arriving name is adopted.
        assert_eq!(registry.sequence(first).full_name(), Some("late-name"));

        Ok(())
    }

    #[test]
    fn missing_identity_is_an_error() {
        let mut registry = Registry::default();
        let err = registry
            .find_or_create(None, None, Strand::Forward)
            .unwrap_err();
        assert_eq!(err, Error::MissingName);
    }

    #[test]
    fn attach_data_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry = Registry::default();
        let id = registry.find_or_create(Some("Q9"), None, Strand::Forward)?;

        registry.attach_data(id, "ACGTACGT")?;
        registry.attach_data(id, "ACGTACGT")?;

        assert_eq!(registry.sequence(id).data(), Some("ACGTACGT"));
        assert_eq!(registry.sequence(id).range(), Some(Range::new(1, 8)));

        Ok(())
    }

    #[test]
    fn attach_data_mismatch_keeps_original() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry = Registry::default();
        let id = registry.find_or_create(Some("Q9"), None, Strand::Forward)?;

        registry.attach_data(id, "ACGTACGT")?;
        let err = registry.attach_data(id, "ACGTACGA").unwrap_err();

        assert_eq!(err, Error::SequenceDataMismatch("Q9".to_string()));
        assert_eq!(
            err.to_string(),
            "conflicting sequence data supplied for sequence: Q9"
        );
        assert_eq!(registry.sequence(id).data(), Some("ACGTACGT"));

        Ok(())
    }

    #[test]
    fn attach_data_reverse_complements_reverse_strand() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry = Registry::default();
        let id = registry.find_or_create(Some("Q9"), None, Strand::Reverse)?;

        registry.attach_data(id, "AACGT")?;
        assert_eq!(registry.sequence(id).data(), Some("ACGTT"));

        // Idempotency is checked against the oriented text.
        registry.attach_data(id, "AACGT")?;

        Ok(())
    }

    #[test]
    fn parent_variant_lookup() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry = Registry::default();
        let parent = registry.find_or_create(Some("SW:P51531.2"), None, Strand::Forward)?;
        let bare = registry.find_or_create(Some("TR:Q8"), None, Strand::Forward)?;

        assert_eq!(registry.find_parent("SW:P51531-2.2"), Some(parent));

        // No `-` suffix yields no match.
        assert_eq!(registry.find_parent("TR:Q8"), None);
        assert_eq!(registry.find_parent("SW:P51531.2"), None);

        // A variant suffix without any trailing text also resolves.
        let plain = registry.find_or_create(Some("TR:Q8x"), None, Strand::Forward)?;
        assert_ne!(bare, plain);
        assert_eq!(registry.find_parent("TR:Q8x-12"), Some(plain));

        Ok(())
    }
}
