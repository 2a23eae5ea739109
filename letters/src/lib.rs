//! Decompose MIME email messages.
//!
//! A raw message, RFC 5322 framed and MIME structured, is parsed into an
//! [`Email`]: the plain text, enriched text and HTML bodies, the files that
//! are displayed inline (referenced by Content-ID) and the attached files.
//!
//! Multipart messages are descended recursively. Every part is classified
//! by its Content-Type, Content-Disposition and Content-ID, its transfer
//! encoding is undone and text is converted from its declared charset.
//!
//! # Example
//! ```
//! use letters::{parse_email, ParseOptions};
//!
//! let message = concat!(
//!     "Subject: Sample\r\n",
//!     "Content-Type: multipart/alternative; boundary=b1\r\n",
//!     "\r\n",
//!     "--b1\r\n",
//!     "Content-Type: text/plain; charset=utf-8\r\n",
//!     "\r\n",
//!     "Sample Text Content\r\n",
//!     "--b1\r\n",
//!     "Content-Type: text/html; charset=utf-8\r\n",
//!     "\r\n",
//!     "<p>Sample HTML Content</p>\r\n",
//!     "--b1--\r\n",
//! );
//! let email = parse_email(message.as_bytes(), &ParseOptions::default()).unwrap();
//! assert_eq!(email.text.as_deref(), Some("Sample Text Content"));
//! assert_eq!(email.html.as_deref(), Some("<p>Sample HTML Content</p>"));
//! ```

#![forbid(unsafe_code)]

mod charset;
mod classify;
mod content_type;
mod debug;
mod email;
mod email_writer;
mod error;
mod framing;
mod header;
mod header_buffer;
mod line_parser;
mod multipart;
mod normalize;
mod options;
mod parser;
mod part;
mod transfer_encoding;

pub use crate::charset::{normalize_charset, CharsetLookup, Charsets};
pub use crate::classify::{classify, PartKind};
pub use crate::content_type::{ContentDisposition, ContentType};
pub use crate::email::{AttachedFile, Email, InlineFile};
pub use crate::email_writer::EmailWriter;
pub use crate::error::{Error, Result};
pub use crate::header::Headers;
pub use crate::multipart::{descend, Bodies, MAX_DEPTH};
pub use crate::normalize::normalize_newlines;
pub use crate::options::ParseOptions;
pub use crate::parser::{parse_email, strip_email_attachments, EmailParser};
pub use crate::transfer_encoding::ContentTransferEncoding;
