use crate::transfer_encoding::ContentTransferEncoding;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort the parsing of an email message
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot read message - {0}")]
    Read(#[source] io::Error),
    #[error("cannot split header and body - {0}")]
    Framing(String),
    #[error("malformed Content-Type - {0}")]
    ContentType(String),
    #[error("unsupported Content-Transfer-Encoding {0:?}")]
    UnsupportedEncoding(String),
    #[error("cannot decode {encoding} body - {reason}")]
    Decode {
        encoding: ContentTransferEncoding,
        reason: String,
    },
    #[error("boundary delimiter {0:?} not found in multipart body")]
    MissingBoundary(String),
    #[error("multipart body contains no parts")]
    EmptyMultipart,
    #[error("multipart nesting is deeper than {0} levels")]
    TooDeep(usize),
    #[error("cannot parse part {content_type:?} with boundary {boundary:?}")]
    NestedPart {
        content_type: String,
        boundary: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn nested<C, B>(content_type: C, boundary: B, source: Error) -> Self
    where
        C: Into<String>,
        B: Into<String>,
    {
        Error::NestedPart {
            content_type: content_type.into(),
            boundary: boundary.into(),
            source: Box::new(source),
        }
    }

    /// The innermost error, looking through any NestedPart wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::NestedPart { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_nesting() {
        let inner = Error::UnsupportedEncoding("x-uuencode".to_string());
        let middle = Error::nested("multipart/alternative", "inner", inner);
        let outer = Error::nested("multipart/mixed", "outer", middle);
        assert!(matches!(
            outer.root_cause(),
            Error::UnsupportedEncoding(token) if token == "x-uuencode"
        ));
    }

    #[test]
    fn nested_display_names_part() {
        let err = Error::nested("multipart/mixed", "b1", Error::EmptyMultipart);
        assert_eq!(
            err.to_string(),
            r#"cannot parse part "multipart/mixed" with boundary "b1""#
        );
    }
}
