//! A buffered line reader over feature-file input.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::{self};
use std::path::Path;

use flate2::read::GzDecoder;

/// The new line character.
const NEW_LINE: char = '\n';

/// The carriage return character.
const CARRIAGE_RETURN: char = '\r';

/// The gzip magic bytes.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A feature-file line reader.
///
/// The reader hands out raw lines with their terminators stripped; the
/// parse layer decides what each line means, since that depends on the
/// format state.
#[derive(Debug)]
pub struct Reader<T>(T)
where
    T: BufRead;

impl Reader<Box<dyn BufRead>> {
    /// Opens a feature file, transparently decompressing gzip input.
    ///
    /// Detection is by content (the gzip magic bytes), not by file name.
    pub fn open<P>(path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let file = BufReader::new(File::open(path)?);
        decompress(file)
    }
}

impl<T> Reader<T>
where
    T: BufRead,
{
    /// Creates a feature-file reader.
    ///
    /// # Examples
    ///
    /// ```
    /// let data = b"##gff-version 3\n";
    /// let reader = blixfile::Reader::new(&data[..]);
    /// ```
    pub fn new(inner: T) -> Self {
        Self::from(inner)
    }

    /// Gets a reference to the inner reader.
    pub fn inner(&self) -> &T {
        &self.0
    }

    /// Gets a mutable reference to the inner reader.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.0
    }

    /// Consumes self and returns the inner reader.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Reads a raw, textual line from the underlying reader, stripping the
    /// line terminator. Returns the number of bytes consumed (zero at end
    /// of input).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io;
    ///
    /// let data = b"##gff-version 3\nchr4\tsource\tmatch\n";
    /// let mut reader = blixfile::Reader::new(&data[..]);
    ///
    /// let mut buffer = String::new();
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 16);
    /// assert_eq!(buffer, "##gff-version 3");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 18);
    /// assert_eq!(buffer, "chr4\tsource\tmatch");
    ///
    /// assert_eq!(reader.read_line_raw(&mut buffer)?, 0);
    ///
    /// # Ok::<(), io::Error>(())
    /// ```
    pub fn read_line_raw(&mut self, buffer: &mut String) -> io::Result<usize> {
        read_line(self.inner_mut(), buffer)
    }
}

impl<T> From<T> for Reader<T>
where
    T: BufRead,
{
    fn from(inner: T) -> Self {
        Self(inner)
    }
}

/// Wraps a buffered stream, interposing a gzip decoder when the stream
/// starts with the gzip magic.
fn decompress<T>(mut inner: T) -> io::Result<Reader<Box<dyn BufRead>>>
where
    T: BufRead + 'static,
{
    let gzipped = {
        let buffer = inner.fill_buf()?;
        buffer.len() >= GZIP_MAGIC.len() && buffer[..GZIP_MAGIC.len()] == GZIP_MAGIC
    };

    let inner: Box<dyn BufRead> = if gzipped {
        Box::new(BufReader::new(GzDecoder::new(inner)))
    } else {
        Box::new(inner)
    };

    Ok(Reader(inner))
}

/// Reads a line from a buffered reader, stripping `\n` and `\r\n`
/// terminators.
fn read_line<T>(reader: &mut T, buffer: &mut String) -> io::Result<usize>
where
    T: BufRead,
{
    buffer.clear();

    match reader.read_line(buffer) {
        Ok(0) => Ok(0),
        Ok(n) => {
            if buffer.ends_with(NEW_LINE) {
                buffer.pop();

                if buffer.ends_with(CARRIAGE_RETURN) {
                    buffer.pop();
                }
            }

            Ok(n)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::io::Write;

    use super::*;

    #[test]
    fn test_read_line() {
        let data = b"hello\r\nworld!";
        let mut cursor = Cursor::new(data);

        let mut buffer = String::new();
        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "hello");
        assert_eq!(len, 7);

        let len = read_line(&mut cursor, &mut buffer).unwrap();
        assert_eq!(buffer, "world!");
        assert_eq!(len, 6);
    }

    #[test]
    fn test_gzip_detection() -> Result<(), Box<dyn std::error::Error>> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(b"# exblx\n")?;
        let compressed = encoder.finish()?;

        let mut reader = decompress(Cursor::new(compressed))?;
        let mut buffer = String::new();
        reader.read_line_raw(&mut buffer)?;
        assert_eq!(buffer, "# exblx");

        // Plain input passes through untouched.
        let mut reader = decompress(Cursor::new(b"# exblx\n".to_vec()))?;
        reader.read_line_raw(&mut buffer)?;
        assert_eq!(buffer, "# exblx");

        Ok(())
    }
}
