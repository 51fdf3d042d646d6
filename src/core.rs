//! Core coordinate types shared by every feature format.

pub mod range;
pub mod strand;

pub use range::Range;
pub use strand::Strand;
