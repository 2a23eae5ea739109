use crate::charset::{normalize_charset, CharsetLookup};
use crate::classify::{classify, PartKind};
use crate::content_type::{ContentDisposition, ContentType};
use crate::email::{AttachedFile, InlineFile};
use crate::error::Result;
use crate::header::Headers;
use crate::transfer_encoding::ContentTransferEncoding;

/// A MIME part, alive only while its message is being decomposed
#[derive(Debug)]
pub(crate) struct Part<'a> {
    pub content_type: ContentType,
    pub encoding: ContentTransferEncoding,
    pub disposition: Option<ContentDisposition>,
    pub content_id: Option<String>,
    /// Undecoded body
    pub body: &'a [u8],
}

impl<'a> Part<'a> {
    // Fails when the transfer encoding cannot be decoded
    pub(crate) fn new(headers: &Headers, default_type: &str, body: &'a [u8]) -> Result<Self> {
        let encoding = headers.content_transfer_encoding.clone();
        encoding.check()?;
        Ok(Self {
            content_type: headers.content_type_or(default_type),
            encoding,
            disposition: headers.content_disposition.clone(),
            content_id: headers.content_id.clone(),
            body,
        })
    }

    pub(crate) fn kind(&self) -> PartKind {
        classify(
            &self.content_type,
            self.disposition.as_ref(),
            self.content_id.as_deref(),
        )
    }

    pub(crate) fn text<C>(&self, charsets: &C) -> Result<String>
    where
        C: CharsetLookup + ?Sized,
    {
        let decoded = self.encoding.decode(self.body)?;
        Ok(normalize_charset(
            &decoded,
            self.content_type.charset(),
            charsets,
        ))
    }

    pub(crate) fn inline_file(self) -> Result<InlineFile> {
        let data = self.encoding.decode(self.body)?;
        let filename = self.filename();
        Ok(InlineFile {
            content_id: self.content_id.unwrap_or_default(),
            content_type: self.content_type,
            filename,
            data,
        })
    }

    pub(crate) fn attached_file(self) -> Result<AttachedFile> {
        let data = self.encoding.decode(self.body)?;
        let filename = self.filename();
        Ok(AttachedFile {
            content_type: self.content_type,
            filename,
            data,
        })
    }

    // Content-Disposition filename, falling back to the Content-Type name
    fn filename(&self) -> Option<String> {
        self.disposition
            .as_ref()
            .and_then(|d| d.filename())
            .or_else(|| self.content_type.parameter("name"))
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::Charsets;
    use crate::error::Error;
    use crate::framing::split_message;

    fn part(message: &[u8]) -> (Headers, Vec<u8>) {
        let (headers, body) = split_message(message).unwrap();
        (headers, body.to_vec())
    }

    #[test]
    fn latin1_quoted_printable_text() {
        let (headers, body) = part(
            b"Content-Type: text/plain; charset=iso-8859-1\r\nContent-Transfer-Encoding: quoted-printable\r\n\r\ncaf=E9\r\n",
        );
        let part = Part::new(&headers, "text/plain", &body).unwrap();
        assert_eq!(part.kind(), PartKind::PlainText);
        assert_eq!(part.text(&Charsets).unwrap(), "café\r\n");
    }

    #[test]
    fn filename_falls_back_to_name() {
        let (headers, body) = part(
            b"Content-Type: application/pdf; name=\"fallback.pdf\"\r\nContent-Transfer-Encoding: base64\r\n\r\nJVBERg==\r\n",
        );
        let part = Part::new(&headers, "text/plain", &body).unwrap();
        let file = part.attached_file().unwrap();
        assert_eq!(file.filename.as_deref(), Some("fallback.pdf"));
        assert_eq!(file.data, b"%PDF".to_vec());
    }

    #[test]
    fn disposition_filename_preferred() {
        let (headers, body) = part(
            b"Content-Type: image/png; name=a.png\r\nContent-Disposition: inline; filename=b.png\r\nContent-ID: <img1>\r\n\r\nPNG",
        );
        let part = Part::new(&headers, "text/plain", &body).unwrap();
        assert_eq!(part.kind(), PartKind::Inline);
        let file = part.inline_file().unwrap();
        assert_eq!(file.content_id, "img1");
        assert_eq!(file.filename.as_deref(), Some("b.png"));
        assert_eq!(file.data, b"PNG".to_vec());
    }

    #[test]
    fn unsupported_encoding() {
        let (headers, body) = part(b"Content-Transfer-Encoding: x-uuencode\r\n\r\nbegin");
        let res = Part::new(&headers, "text/plain", &body);
        assert!(matches!(res, Err(Error::UnsupportedEncoding(_))));
    }
}
