use crate::charset::{CharsetLookup, Charsets};
use crate::email::Email;
use crate::error::{Error, Result};
use crate::parser::EmailParser;
use std::io;
use std::io::Write;

/// Collects a message written to it and parses it when finished.
/// Everything written is also forwarded to the given writer.
/// # Example
/// ```
/// use letters::{EmailParser, EmailWriter, ParseOptions};
/// use std::io::Write;
///
/// let parser = EmailParser::new(ParseOptions::default());
/// let mut writer = EmailWriter::new(Vec::new(), parser);
///
/// // Write a message, in any number of pieces
/// writer.write_all(b"Subject: Example\r\n").unwrap();
/// writer.write_all(b"\r\nHello\r\n").unwrap();
///
/// // When there is no more input, call .end()
/// let (email, copy) = writer.end().unwrap();
/// assert_eq!(email.text.as_deref(), Some("Hello\n"));
/// assert_eq!(copy, b"Subject: Example\r\n\r\nHello\r\n".to_vec());
/// ```
pub struct EmailWriter<W: Write, C = Charsets> {
    writer: W,
    message: Vec<u8>,
    parser: EmailParser<C>,
}

impl<W: Write, C: CharsetLookup> EmailWriter<W, C> {
    /// Create an EmailWriter that forwards the message to the given writer
    pub fn new(writer: W, parser: EmailParser<C>) -> Self {
        Self {
            writer,
            message: Vec::new(),
            parser,
        }
    }

    /// Call this method to signal the end of a message.
    /// Returns the parsed message and the inner writer.
    pub fn end(mut self) -> Result<(Email, W)> {
        self.writer.flush().map_err(Error::Read)?;
        let email = self.parser.parse_bytes(&self.message)?;
        Ok((email, self.writer))
    }
}

impl<W: Write, C> Write for EmailWriter<W, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write_all(buf)?;
        self.message.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
