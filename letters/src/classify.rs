use crate::content_type::{ContentDisposition, ContentType};

/// What a MIME part contributes to the parsed Email
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// text/plain body
    PlainText,
    /// text/enriched body
    EnrichedText,
    /// text/html body
    Html,
    /// A nested multipart/* container
    Multipart,
    /// A file referenced from the body by its Content-ID e.g an embedded image
    Inline,
    /// An attached file
    Attachment,
}

impl PartKind {
    /// Classify using the Content-Type alone
    pub fn for_type(content_type: &ContentType) -> Self {
        match content_type.mime_type.as_str() {
            "text/plain" => PartKind::PlainText,
            "text/enriched" => PartKind::EnrichedText,
            "text/html" => PartKind::Html,
            _ if content_type.is_multipart() => PartKind::Multipart,
            _ => PartKind::Attachment,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(
            self,
            PartKind::PlainText | PartKind::EnrichedText | PartKind::Html
        )
    }
}

/// Decide what a part of a multipart body is
pub fn classify(
    content_type: &ContentType,
    disposition: Option<&ContentDisposition>,
    content_id: Option<&str>,
) -> PartKind {
    let by_type = PartKind::for_type(content_type);
    if by_type == PartKind::Multipart {
        return by_type;
    }
    let has_id = content_id.map_or(false, |id| !id.is_empty());
    match disposition {
        Some(d) if d.is_attachment() => PartKind::Attachment,
        Some(d) if d.is_inline() && has_id => PartKind::Inline,
        None if has_id && !by_type.is_text() => PartKind::Inline,
        _ => by_type,
    }
}
