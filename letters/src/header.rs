use crate::content_type::{ContentDisposition, ContentType};
use crate::debug::{dbg_single, FieldsDbg, OptionDbg, ParamDbg};
use crate::line_parser::Field;
use crate::transfer_encoding::ContentTransferEncoding;
use display_bytes::display_bytes_string;
use std::collections::HashMap;
use std::fmt;

/// Header contains information about a single header line
#[derive(PartialEq, Eq, Clone)]
pub(crate) enum Header<'a> {
    /// A header containing unstructured information as key, value
    Unstructured(&'a [u8], &'a [u8]),
    /// A Content-Type header
    ContentType {
        /// The MIME type
        mime_type: &'a [u8],
        /// Additional parameters to the MIME type
        parameters: HashMap<&'a [u8], Vec<u8>>,
    },
    /// Presentation information about a MIME part
    ContentDisposition {
        /// The type of disposition e.g "attachment"
        disposition_type: &'a [u8],
        /// Additional parameters to the disposition type e.g "filename"
        parameters: HashMap<&'a [u8], Vec<u8>>,
    },
    ContentTransferEncoding(&'a [u8]),
    ContentId(&'a [u8]),
    ContentDescription(&'a [u8]),
    From(&'a [u8]),
    To(&'a [u8]),
    Cc(&'a [u8]),
    /// An unparsed Email Date
    Date(&'a [u8]),
    Subject(&'a [u8]),
    /// The SMTP sender header
    Sender(&'a [u8]),
    ReplyTo(&'a [u8]),
    /// The Message-ID of the email message
    MessageId(&'a [u8]),
}

/// The header block of a message or MIME part.
///
/// Values are kept as raw bytes. Only the MIME fields needed to decode
/// the body are interpreted.
#[derive(Default, Clone, PartialEq)]
pub struct Headers {
    pub message_id: Option<Vec<u8>>,
    pub from: Option<Vec<u8>>,
    pub to: Option<Vec<u8>>,
    pub cc: Option<Vec<u8>>,
    pub date: Option<Vec<u8>>,
    pub subject: Option<Vec<u8>>,
    pub sender: Option<Vec<u8>>,
    pub reply_to: Option<Vec<u8>>,
    pub content_type: Option<ContentType>,
    pub content_disposition: Option<ContentDisposition>,
    pub content_transfer_encoding: ContentTransferEncoding,
    /// Content-ID without the enclosing angle brackets
    pub content_id: Option<String>,
    pub content_description: Option<Vec<u8>>,
    /// Every header field, unfolded, in the order it appeared
    pub fields: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Headers {
    /// Get the first value of a header field, the name is case insensitive
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name.as_bytes()))
            .map(|(_, value)| value.as_slice())
    }

    /// Get the Content-Type, or the given default if the header is absent
    pub fn content_type_or(&self, default: &str) -> ContentType {
        self.content_type
            .clone()
            .unwrap_or_else(|| ContentType::new(default))
    }

    pub(crate) fn add(&mut self, field: &Field, header: Header) {
        self.fields.push((field.name.to_vec(), field.value.to_vec()));
        match header {
            Header::From(from) => self.from = Some(from.to_vec()),
            Header::To(to) => self.to = Some(to.to_vec()),
            Header::Cc(cc) => self.cc = Some(cc.to_vec()),
            Header::Date(date) => self.date = Some(date.to_vec()),
            Header::Subject(subject) => self.subject = Some(subject.to_vec()),
            Header::Sender(sender) => self.sender = Some(sender.to_vec()),
            Header::ReplyTo(reply_to) => self.reply_to = Some(reply_to.to_vec()),
            Header::MessageId(msg_id) => self.message_id = Some(msg_id.to_vec()),
            Header::ContentDescription(desc) => self.content_description = Some(desc.to_vec()),
            Header::ContentType {
                mime_type,
                parameters,
            } => {
                self.content_type
                    .replace(ContentType::from_parts(mime_type, parameters));
            }
            Header::ContentDisposition {
                disposition_type,
                parameters,
            } => {
                self.content_disposition
                    .replace(ContentDisposition::from_parts(disposition_type, parameters));
            }
            Header::ContentTransferEncoding(encoding) => {
                self.content_transfer_encoding =
                    ContentTransferEncoding::from(String::from_utf8_lossy(encoding).as_ref());
            }
            Header::ContentId(id) => self.content_id = Some(strip_angle_brackets(id)),
            Header::Unstructured(_, _) => (),
        }
    }
}

fn strip_angle_brackets(id: &[u8]) -> String {
    let id = String::from_utf8_lossy(id);
    let id = id.trim();
    let id = id.strip_prefix('<').unwrap_or(id);
    let id = id.strip_suffix('>').unwrap_or(id);
    id.trim().to_string()
}

impl<'a> fmt::Debug for Header<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Header::Unstructured(key, value) => {
                let mut d = f.debug_struct("Unstructured");
                d.field("key", &display_bytes_string(key));
                d.field("value", &display_bytes_string(value));
                d.finish()
            }
            Header::From(from) => dbg_single(f, "From", from),
            Header::To(to) => dbg_single(f, "To", to),
            Header::Cc(cc) => dbg_single(f, "Cc", cc),
            Header::Subject(subject) => dbg_single(f, "Subject", subject),
            Header::Sender(sender) => dbg_single(f, "Sender", sender),
            Header::ReplyTo(reply_to) => dbg_single(f, "ReplyTo", reply_to),
            Header::MessageId(message_id) => dbg_single(f, "MessageId", message_id),
            Header::Date(date) => dbg_single(f, "Date", date),
            Header::ContentDescription(desc) => dbg_single(f, "ContentDescription", desc),
            Header::ContentTransferEncoding(cte) => {
                dbg_single(f, "ContentTransferEncoding", cte)
            }
            Header::ContentId(id) => dbg_single(f, "ContentId", id),
            Header::ContentDisposition {
                disposition_type,
                parameters,
            } => {
                let mut d = f.debug_struct("ContentDisposition");
                d.field("disposition_type", &display_bytes_string(disposition_type));
                d.field("parameters", &ParamDbg(parameters));
                d.finish()
            }
            Header::ContentType {
                mime_type,
                parameters,
            } => {
                let mut d = f.debug_struct("ContentType");
                d.field("mime_type", &display_bytes_string(mime_type));
                d.field("parameters", &ParamDbg(parameters));
                d.finish()
            }
        }
    }
}

impl fmt::Debug for Headers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut d = f.debug_struct("Headers");
        d.field("message_id", &OptionDbg(&self.message_id));
        d.field("from", &OptionDbg(&self.from));
        d.field("to", &OptionDbg(&self.to));
        d.field("cc", &OptionDbg(&self.cc));
        d.field("date", &OptionDbg(&self.date));
        d.field("subject", &OptionDbg(&self.subject));
        d.field("sender", &OptionDbg(&self.sender));
        d.field("reply_to", &OptionDbg(&self.reply_to));
        d.field("content_type", &self.content_type);
        d.field("content_disposition", &self.content_disposition);
        d.field("content_transfer_encoding", &self.content_transfer_encoding);
        d.field("content_id", &self.content_id);
        d.field("content_description", &OptionDbg(&self.content_description));
        d.field("fields", &FieldsDbg(&self.fields));
        d.finish()
    }
}
