use crate::error::{Error, Result};
use crate::header::Headers;
use crate::header_buffer::HeaderBuffer;
use crate::line_parser;
use display_bytes::display_bytes_string;
use log::trace;

/// Split a message, or a MIME part, into its header block and body.
/// The header block ends at the first empty line. A message without an
/// empty line is all header and has an empty body.
pub(crate) fn split_message(message: &[u8]) -> Result<(Headers, &[u8])> {
    let mut headers = Headers::default();
    let mut buffer = HeaderBuffer::default();
    let mut offset = 0;
    while offset < message.len() {
        let (line, next) = next_line(message, offset);
        offset = next;
        if line.is_empty() {
            flush(&mut buffer, &mut headers)?;
            return Ok((headers, &message[offset..]));
        }
        match buffer.next_line(line) {
            Ok(Some(complete)) => add_field(&mut headers, &complete)?,
            Ok(None) => (),
            Err(()) => {
                return Err(Error::Framing(format!(
                    "continuation line without a header {}",
                    display_bytes_string(line)
                )))
            }
        }
    }
    flush(&mut buffer, &mut headers)?;
    Ok((headers, &message[message.len()..]))
}

fn flush(buffer: &mut HeaderBuffer, headers: &mut Headers) -> Result<()> {
    match buffer.take() {
        Some(line) => add_field(headers, &line),
        None => Ok(()),
    }
}

fn add_field(headers: &mut Headers, line: &[u8]) -> Result<()> {
    let field = line_parser::field(line)?;
    let header = line_parser::header(&field)?;
    trace!("{:?}", header);
    headers.add(&field, header);
    Ok(())
}

// Get the line starting at offset, without its line ending, and the offset of the next line
pub(crate) fn next_line(message: &[u8], offset: usize) -> (&[u8], usize) {
    let rest = &message[offset..];
    let (line, next) = match rest.iter().position(|b| *b == b'\n') {
        Some(i) => (&rest[..i], offset + i + 1),
        None => (rest, message.len()),
    };
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    (line, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn crlf_message() {
        let msg = b"Subject: Example\r\nContent-Type: text/plain;\r\n charset=utf-8\r\n\r\nHello\r\nWorld\r\n";
        let (headers, body) = split_message(msg).unwrap();
        assert_eq!(headers.subject.as_deref(), Some(&b"Example"[..]));
        assert_eq!(headers.content_type.unwrap().charset(), Some("utf-8"));
        assert_eq!(body, &b"Hello\r\nWorld\r\n"[..]);
    }

    #[test]
    fn lf_message() {
        let msg = b"Subject: Example\n\nHello\n";
        let (headers, body) = split_message(msg).unwrap();
        assert_eq!(headers.subject.as_deref(), Some(&b"Example"[..]));
        assert_eq!(body, &b"Hello\n"[..]);
    }

    #[test]
    fn no_headers() {
        let (headers, body) = split_message(b"\r\nbody only").unwrap();
        assert!(headers.fields.is_empty());
        assert_eq!(body, &b"body only"[..]);
    }

    #[test]
    fn headers_only() {
        let (headers, body) = split_message(b"Subject: Example").unwrap();
        assert_eq!(headers.subject.as_deref(), Some(&b"Example"[..]));
        assert!(body.is_empty());
    }

    #[test]
    fn malformed_line() {
        let res = split_message(b"Subject: Example\r\nnot a header\r\n\r\nbody");
        assert!(matches!(res, Err(Error::Framing(_))));
    }

    #[test]
    fn leading_continuation() {
        let res = split_message(b" folded: value\r\n\r\nbody");
        assert!(matches!(res, Err(Error::Framing(_))));
    }
}
