//! Parsing (and, to a lesser extent, writing) of the alignment feature-file
//! formats used by sequence-browsing tools: GFF3 with in-band alignment
//! attributes, the legacy `exblx`/`seqbl` blast outputs, and the `FS`
//! feature-series formats.
//!
//! A file is fed through a [`Reader`] into a [`Session`], which owns
//! everything a parse produces: the features ([`Msp`]s), the match-sequence
//! registry, feature series, and any warnings raised along the way.
//!
//! # Examples
//!
//! ```
//! use blixfile::Options;
//! use blixfile::Reader;
//! use blixfile::Session;
//!
//! let data = b"##gff-version 3\n\
//!     chr4\tblat\tmatch\t100\t200\t500\t+\t.\tTarget=EST:ab1 1 101\n";
//!
//! let mut reader = Reader::new(&data[..]);
//! let mut session = Session::default();
//! blixfile::parse(&mut reader, &mut session, &Options::default())?;
//!
//! let msp = &session.msps()[0];
//! assert_eq!(msp.ref_name(), "chr4");
//! assert_eq!(msp.match_name(), Some("EST:ab1"));
//! # Ok::<(), blixfile::parse::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![warn(missing_debug_implementations)]
#![warn(clippy::missing_docs_in_private_items)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod core;
pub mod gff3;
pub mod index;
pub mod msp;
pub mod parse;
pub mod reader;
pub mod sequence;
pub mod session;
pub mod style;
pub mod writer;

pub use index::FeatureIndex;
pub use msp::Msp;
pub use parse::Options;
pub use parse::parse;
pub use parse::parse_file;
pub use reader::Reader;
pub use session::Session;
pub use writer::Writer;
