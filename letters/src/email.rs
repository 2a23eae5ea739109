use crate::content_type::ContentType;
use crate::debug::PayloadDbg;
use crate::header::Headers;
use std::fmt;

/// A decomposed email message
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Email {
    /// The top level header block
    pub headers: Headers,
    /// The text/plain body
    pub text: Option<String>,
    /// The text/enriched body
    pub enriched_text: Option<String>,
    /// The text/html body
    pub html: Option<String>,
    /// Files referenced from the body by Content-ID, in document order
    pub inline_files: Vec<InlineFile>,
    /// Attached files in document order
    pub attached_files: Vec<AttachedFile>,
}

/// A file that is displayed as part of the body e.g an embedded image
#[derive(Clone, PartialEq)]
pub struct InlineFile {
    /// Content-ID without angle brackets
    pub content_id: String,
    pub content_type: ContentType,
    pub filename: Option<String>,
    /// The decoded content
    pub data: Vec<u8>,
}

/// A file attached to the email
#[derive(Clone, PartialEq)]
pub struct AttachedFile {
    pub content_type: ContentType,
    pub filename: Option<String>,
    /// The decoded content
    pub data: Vec<u8>,
}

impl fmt::Debug for InlineFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut d = f.debug_struct("InlineFile");
        d.field("content_id", &self.content_id);
        d.field("content_type", &self.content_type.mime_type);
        d.field("filename", &self.filename);
        d.field("data", &PayloadDbg(&self.data));
        d.finish()
    }
}

impl fmt::Debug for AttachedFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut d = f.debug_struct("AttachedFile");
        d.field("content_type", &self.content_type.mime_type);
        d.field("filename", &self.filename);
        d.field("data", &PayloadDbg(&self.data));
        d.finish()
    }
}
