use crate::charset::{CharsetLookup, Charsets};
use crate::classify::PartKind;
use crate::email::Email;
use crate::email_writer::EmailWriter;
use crate::error::{Error, Result};
use crate::framing::split_message;
use crate::multipart::descend;
use crate::normalize::normalize_newlines;
use crate::options::ParseOptions;
use crate::part::Part;
use log::debug;
use std::io;
use std::io::Read;

/// Decomposes email messages into an Email.
///
/// An EmailParser only holds configuration and can parse any number of messages.
/// # Example
/// ```
/// use letters::{EmailParser, ParseOptions};
///
/// let message = b"Subject: Example\r\nContent-Type: text/plain\r\n\r\nHello\r\n";
/// let parser = EmailParser::new(ParseOptions::default());
/// let email = parser.parse(&message[..]).unwrap();
/// assert_eq!(email.text.as_deref(), Some("Hello\n"));
/// assert_eq!(email.headers.subject.as_deref(), Some(&b"Example"[..]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmailParser<C = Charsets> {
    options: ParseOptions,
    charsets: C,
}

impl EmailParser<Charsets> {
    /// Create a parser that uses the default charset lookup
    pub fn new(options: ParseOptions) -> Self {
        Self::with_charsets(options, Charsets)
    }
}

impl<C: CharsetLookup> EmailParser<C> {
    /// Create a parser that decodes text with the given charset lookup
    pub fn with_charsets(options: ParseOptions, charsets: C) -> Self {
        Self { options, charsets }
    }

    /// Read a whole message and parse it
    pub fn parse<R: Read>(&self, mut reader: R) -> Result<Email> {
        let mut message = Vec::new();
        reader.read_to_end(&mut message).map_err(Error::Read)?;
        self.parse_bytes(&message)
    }

    /// Parse a message that is already in memory
    pub fn parse_bytes(&self, message: &[u8]) -> Result<Email> {
        if message.is_empty() {
            return Err(Error::Framing("empty message".to_string()));
        }
        let (headers, body) = split_message(message)?;
        let part = Part::new(&headers, "text/plain", body)?;
        let mut email = Email {
            headers,
            ..Email::default()
        };
        let kind = PartKind::for_type(&part.content_type);
        debug!("Top level {} is {:?}", part.content_type.mime_type, kind);
        match kind {
            PartKind::PlainText => email.text = Some(part.text(&self.charsets)?),
            PartKind::EnrichedText => email.enriched_text = Some(part.text(&self.charsets)?),
            PartKind::Html => email.html = Some(part.text(&self.charsets)?),
            PartKind::Multipart => {
                let content_type = &part.content_type;
                let bodies = descend(part.body, content_type, &self.options, &self.charsets)
                    .map_err(|err| {
                        Error::nested(
                            content_type.mime_type.as_str(),
                            content_type.boundary().unwrap_or_default(),
                            err,
                        )
                    })?;
                email.text = bodies.text;
                email.enriched_text = bodies.enriched_text;
                email.html = bodies.html;
                email.inline_files = bodies.inline_files;
                email.attached_files = bodies.attached_files;
            }
            PartKind::Inline | PartKind::Attachment if !self.options.skip_attachments => {
                email.attached_files.push(part.attached_file()?)
            }
            PartKind::Inline | PartKind::Attachment => {
                debug!("Skipping top level {}", part.content_type.mime_type)
            }
        }
        email.text = email.text.map(|t| normalize_newlines(&t));
        email.enriched_text = email.enriched_text.map(|t| normalize_newlines(&t));
        email.html = email.html.map(|t| normalize_newlines(&t));
        Ok(email)
    }
}

/// Parse a message with the default charset lookup
pub fn parse_email<R: Read>(reader: R, options: &ParseOptions) -> Result<Email> {
    EmailParser::new(*options).parse(reader)
}

/// Check that a message parses, without decoding attachments, and return
/// the message exactly as it was read.
/// Attachments are not removed from the returned bytes.
pub fn strip_email_attachments<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let parser = EmailParser::new(ParseOptions::new().with_skip_attachments(true));
    let mut writer = EmailWriter::new(Vec::new(), parser);
    io::copy(&mut reader, &mut writer).map_err(Error::Read)?;
    let (_, raw) = writer.end()?;
    Ok(raw)
}
