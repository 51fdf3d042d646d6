//! The data-type configuration collaborator.
//!
//! GFF3 sources may tag their features with a `dataType` attribute naming an
//! externally configured data type. How those configurations are stored is
//! not this crate's concern: the parser only needs a lookup capability,
//! supplied by the caller through [`DataTypeLookup`].

/// A named data-type configuration resolved by the caller's store.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DataType {
    /// The configured name.
    pub name: String,

    /// Whether features of this type should be linked to others sharing the
    /// same sequence name.
    pub link_features_by_name: bool,

    /// The bulk-fetch methods configured for the source, in preference
    /// order. Fetching itself is an external concern.
    pub bulk_fetch: Vec<String>,
}

/// A read-only lookup over the caller's data-type configuration store.
pub trait DataTypeLookup {
    /// Resolves a data-type name, returning [`None`] when the store has no
    /// entry for it.
    fn lookup(&self, name: &str) -> Option<DataType>;
}

impl DataTypeLookup for std::collections::HashMap<String, DataType> {
    fn lookup(&self, name: &str) -> Option<DataType> {
        self.get(name).cloned()
    }
}
