//! Writing features back out in the extended `exblx_x` format.

use std::io::Write;
use std::io::{self};

use crate::msp::Kind;
use crate::msp::Msp;
use crate::session::Session;

/// A feature writer producing `exblx_x` output.
///
/// Only the kinds the legacy score-sign convention can express are written:
/// matches, CDS, introns and variations. Other kinds are passed over.
#[derive(Debug)]
pub struct Writer<W>
where
    W: Write,
{
    /// The inner writer.
    inner: W,
}

impl<W> Writer<W>
where
    W: Write,
{
    /// Creates a new [`Writer`].
    pub fn new(inner: W) -> Self {
        Writer { inner }
    }

    /// Consumes self and returns the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes the format header, preceded by the session's blast mode when
    /// one was declared.
    pub fn write_header(&mut self, session: &Session) -> io::Result<()> {
        if let Some(mode) = session.blast_mode() {
            writeln!(self.inner, "# {mode}")?;
        }

        if let Some((name, range)) = session.sequence_region() {
            writeln!(
                self.inner,
                "##sequence-region {name} {} {}",
                range.min(),
                range.max()
            )?;
        }

        writeln!(self.inner, "# exblx_x")
    }

    /// Writes one feature. Features of kinds the format cannot express are
    /// skipped silently.
    pub fn write_msp(&mut self, msp: &Msp) -> io::Result<()> {
        let Some(score) = legacy_score(msp) else {
            return Ok(());
        };

        write!(
            self.inner,
            "{score} ({}{}) {} {} {} {} {} {}",
            if msp.ref_strand().is_reverse() { '-' } else { '+' },
            msp.ref_frame(),
            msp.ref_range().min(),
            msp.ref_range().max(),
            msp.match_strand(),
            msp.match_range().min(),
            msp.match_range().max(),
            msp.match_name().unwrap_or("<unnamed>"),
        )?;

        if !msp.gaps().is_empty() {
            write!(self.inner, " Gaps")?;
            for block in msp.gaps() {
                write!(
                    self.inner,
                    " {} {} {} {}",
                    block.match_start(),
                    block.match_end(),
                    block.ref_start(),
                    block.ref_end()
                )?;
            }
            write!(self.inner, " ;")?;
        }

        if let Some(description) = msp.description() {
            write!(self.inner, " Description {description} ;")?;
        }

        writeln!(self.inner)
    }

    /// Writes the header and every expressible feature of the session.
    pub fn write_session(&mut self, session: &Session) -> io::Result<()> {
        self.write_header(session)?;

        for msp in session.msps() {
            self.write_msp(msp)?;
        }

        Ok(())
    }
}

/// Maps a feature to the score written for it: the score-sign convention
/// encodes the kind. Returns [`None`] for inexpressible kinds.
fn legacy_score(msp: &Msp) -> Option<f64> {
    match msp.kind() {
        Kind::Match => Some(msp.score().unwrap_or(0.0).max(0.0)),
        Kind::Cds => Some(-1.0),
        Kind::Intron => Some(-2.0),
        Kind::Variation => Some(-3.0),
        _ => None,
    }
}
