use crate::charset::CharsetLookup;
use crate::classify::PartKind;
use crate::content_type::ContentType;
use crate::email::{AttachedFile, InlineFile};
use crate::error::{Error, Result};
use crate::framing::{next_line, split_message};
use crate::options::ParseOptions;
use crate::part::Part;
use log::{debug, warn};

/// The bodies and files collected from a multipart entity
#[derive(Debug, Default)]
pub struct Bodies {
    pub text: Option<String>,
    pub enriched_text: Option<String>,
    pub html: Option<String>,
    pub inline_files: Vec<InlineFile>,
    pub attached_files: Vec<AttachedFile>,
}

impl Bodies {
    // Later text bodies replace earlier ones, files are appended
    fn merge(&mut self, nested: Bodies) {
        if nested.text.is_some() {
            self.text = nested.text;
        }
        if nested.enriched_text.is_some() {
            self.enriched_text = nested.enriched_text;
        }
        if nested.html.is_some() {
            self.html = nested.html;
        }
        self.inline_files.extend(nested.inline_files);
        self.attached_files.extend(nested.attached_files);
    }
}

#[derive(Debug, PartialEq)]
enum Delimiter {
    Open,
    Close,
}

/// Multiparts nested deeper than this are rejected
pub const MAX_DEPTH: usize = 64;

/// Decompose the body of a multipart entity, recursing into nested multiparts
pub fn descend<C>(
    body: &[u8],
    content_type: &ContentType,
    options: &ParseOptions,
    charsets: &C,
) -> Result<Bodies>
where
    C: CharsetLookup + ?Sized,
{
    descend_at(1, body, content_type, options, charsets)
}

fn descend_at<C>(
    depth: usize,
    body: &[u8],
    content_type: &ContentType,
    options: &ParseOptions,
    charsets: &C,
) -> Result<Bodies>
where
    C: CharsetLookup + ?Sized,
{
    if depth > MAX_DEPTH {
        return Err(Error::TooDeep(MAX_DEPTH));
    }
    let boundary = content_type.boundary().ok_or_else(|| {
        Error::ContentType(format!(
            "{} without a boundary parameter",
            content_type.mime_type
        ))
    })?;
    // RFC 2046 5.1.5
    let default_type = if content_type.mime_type == "multipart/digest" {
        "message/rfc822"
    } else {
        "text/plain"
    };
    let mut bodies = Bodies::default();
    for segment in split_parts(body, boundary)? {
        let (headers, part_body) = split_message(segment)?;
        let part = Part::new(&headers, default_type, part_body)?;
        let kind = part.kind();
        debug!("{} part is {:?}", part.content_type.mime_type, kind);
        match kind {
            PartKind::Multipart => {
                let content_type = &part.content_type;
                let nested = descend_at(depth + 1, part.body, content_type, options, charsets)
                    .map_err(|err| {
                        Error::nested(
                            content_type.mime_type.as_str(),
                            content_type.boundary().unwrap_or_default(),
                            err,
                        )
                    })?;
                bodies.merge(nested);
            }
            PartKind::PlainText => bodies.text = Some(part.text(charsets)?),
            PartKind::EnrichedText => bodies.enriched_text = Some(part.text(charsets)?),
            PartKind::Html => bodies.html = Some(part.text(charsets)?),
            PartKind::Inline if !options.skip_attachments => {
                bodies.inline_files.push(part.inline_file()?)
            }
            PartKind::Attachment if !options.skip_attachments => {
                bodies.attached_files.push(part.attached_file()?)
            }
            PartKind::Inline | PartKind::Attachment => {
                debug!("Skipping {}", part.content_type.mime_type)
            }
        }
    }
    Ok(bodies)
}

// Split a multipart body into the raw parts between boundary delimiters.
// The preamble and epilogue are discarded.
fn split_parts<'a>(body: &'a [u8], boundary: &str) -> Result<Vec<&'a [u8]>> {
    let delimiter = format!("--{}", boundary);
    let mut parts = Vec::new();
    let mut part_start = None;
    let mut seen_delimiter = false;
    let mut offset = 0;
    while offset < body.len() {
        let line_start = offset;
        let (line, next) = next_line(body, offset);
        offset = next;
        let kind = match delimiter_kind(line, delimiter.as_bytes()) {
            Some(kind) => kind,
            None => continue,
        };
        seen_delimiter = true;
        if let Some(start) = part_start.take() {
            parts.push(without_last_line_break(&body[start..line_start]));
        }
        if kind == Delimiter::Close {
            return finish(parts);
        }
        part_start = Some(next);
    }
    if !seen_delimiter {
        return Err(Error::MissingBoundary(delimiter));
    }
    if let Some(start) = part_start {
        warn!("Multipart body ended without closing delimiter {}--", delimiter);
        parts.push(&body[start..]);
    }
    finish(parts)
}

fn finish(parts: Vec<&[u8]>) -> Result<Vec<&[u8]>> {
    if parts.is_empty() {
        Err(Error::EmptyMultipart)
    } else {
        Ok(parts)
    }
}

fn delimiter_kind(line: &[u8], delimiter: &[u8]) -> Option<Delimiter> {
    let rest = trim_end(line.strip_prefix(delimiter)?);
    if rest.is_empty() {
        Some(Delimiter::Open)
    } else if rest == b"--" {
        Some(Delimiter::Close)
    } else {
        None
    }
}

// The line break before a delimiter belongs to the delimiter
fn without_last_line_break(part: &[u8]) -> &[u8] {
    let part = part.strip_suffix(b"\n").unwrap_or(part);
    part.strip_suffix(b"\r").unwrap_or(part)
}

fn trim_end(buf: &[u8]) -> &[u8] {
    let end = buf
        .iter()
        .rposition(|c| *c != b' ' && *c != b'\t')
        .map_or(0, |i| i + 1);
    &buf[..end]
}
