use crate::error::{Error, Result};
use quoted_printable::ParseMode;
use std::fmt;

/// The Content-Transfer-Encoding of a MIME part
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentTransferEncoding {
    /// 7bit, also used when the header is absent
    #[default]
    SevenBit,
    /// 8bit
    EightBit,
    /// binary
    Binary,
    /// quoted-printable
    QuotedPrintable,
    /// base64
    Base64,
    /// Any other token, kept as it appeared in the header
    Unrecognized(String),
}

impl From<&str> for ContentTransferEncoding {
    fn from(token: &str) -> Self {
        let token = token.trim();
        match token.to_ascii_lowercase().as_str() {
            "7bit" => ContentTransferEncoding::SevenBit,
            "8bit" => ContentTransferEncoding::EightBit,
            "binary" => ContentTransferEncoding::Binary,
            "quoted-printable" => ContentTransferEncoding::QuotedPrintable,
            "base64" => ContentTransferEncoding::Base64,
            _ => ContentTransferEncoding::Unrecognized(token.to_string()),
        }
    }
}

impl fmt::Display for ContentTransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ContentTransferEncoding::SevenBit => write!(f, "7bit"),
            ContentTransferEncoding::EightBit => write!(f, "8bit"),
            ContentTransferEncoding::Binary => write!(f, "binary"),
            ContentTransferEncoding::QuotedPrintable => write!(f, "quoted-printable"),
            ContentTransferEncoding::Base64 => write!(f, "base64"),
            ContentTransferEncoding::Unrecognized(token) => write!(f, "{}", token),
        }
    }
}

impl ContentTransferEncoding {
    /// Fail if the encoding cannot be decoded
    pub fn check(&self) -> Result<()> {
        match self {
            ContentTransferEncoding::Unrecognized(token) => {
                Err(Error::UnsupportedEncoding(token.clone()))
            }
            _ => Ok(()),
        }
    }

    /// Undo the transfer encoding of a body
    pub fn decode(&self, body: &[u8]) -> Result<Vec<u8>> {
        match self {
            ContentTransferEncoding::SevenBit
            | ContentTransferEncoding::EightBit
            | ContentTransferEncoding::Binary => Ok(body.to_vec()),
            ContentTransferEncoding::QuotedPrintable => decode_quoted_printable(body),
            ContentTransferEncoding::Base64 => decode_base64(body),
            ContentTransferEncoding::Unrecognized(token) => {
                Err(Error::UnsupportedEncoding(token.clone()))
            }
        }
    }
}

fn decode_base64(body: &[u8]) -> Result<Vec<u8>> {
    let compact = body
        .iter()
        .filter(|b| !b.is_ascii_whitespace())
        .copied()
        .collect::<Vec<u8>>();
    base64::decode(&compact).map_err(|err| Error::Decode {
        encoding: ContentTransferEncoding::Base64,
        reason: err.to_string(),
    })
}

// Robust decoding passes malformed escapes through, so they are rejected first
fn decode_quoted_printable(body: &[u8]) -> Result<Vec<u8>> {
    check_escapes(body)?;
    quoted_printable::decode(body, ParseMode::Robust).map_err(|err| Error::Decode {
        encoding: ContentTransferEncoding::QuotedPrintable,
        reason: err.to_string(),
    })
}

// Every '=' must start a hex octet or be a soft line break
fn check_escapes(body: &[u8]) -> Result<()> {
    let mut offset = 0;
    for line in body.split(|b| *b == b'\n') {
        let end = line
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |i| i + 1);
        let content = &line[..end];
        for (i, _) in content.iter().enumerate().filter(|(_, b)| **b == b'=') {
            let escape = &content[i..(i + 3).min(end)];
            let soft_break = escape.len() == 1;
            let octet = escape.len() == 3 && escape[1..].iter().all(u8::is_ascii_hexdigit);
            if !soft_break && !octet {
                return Err(Error::Decode {
                    encoding: ContentTransferEncoding::QuotedPrintable,
                    reason: format!(
                        "invalid escape {:?} at offset {}",
                        String::from_utf8_lossy(escape),
                        offset + i
                    ),
                });
            }
        }
        offset += line.len() + 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn base64_hello() {
        let decoded = ContentTransferEncoding::Base64.decode(b"SGVsbG8=").unwrap();
        assert_eq!(decoded, b"Hello".to_vec());
    }

    #[test]
    fn base64_with_line_breaks() {
        let decoded = ContentTransferEncoding::Base64
            .decode(b"SGVs\r\nbG8g\r\nd29y\nbGQ=\r\n")
            .unwrap();
        assert_eq!(decoded, b"Hello world".to_vec());
    }

    #[test]
    fn base64_invalid() {
        let res = ContentTransferEncoding::Base64.decode(b"SGV!bG8=");
        assert!(matches!(
            res,
            Err(Error::Decode {
                encoding: ContentTransferEncoding::Base64,
                ..
            })
        ));
    }

    #[test]
    fn quoted_printable_escapes() {
        let decoded = ContentTransferEncoding::QuotedPrintable
            .decode(b"caf=C3=A9 =3D ok\r\n")
            .unwrap();
        assert_eq!(String::from_utf8(decoded).unwrap(), "café = ok\r\n");
    }

    #[test]
    fn quoted_printable_lowercase_hex() {
        let decoded = ContentTransferEncoding::QuotedPrintable
            .decode(b"=c3=a9")
            .unwrap();
        assert_eq!(decoded, "é".as_bytes().to_vec());
    }

    #[test]
    fn quoted_printable_soft_breaks() {
        let decoded = ContentTransferEncoding::QuotedPrintable
            .decode(b"Sample HTML =\r\n  Content=  \nend=")
            .unwrap();
        assert_eq!(decoded, b"Sample HTML   Contentend".to_vec());
    }

    #[test]
    fn quoted_printable_strips_padding() {
        let decoded = ContentTransferEncoding::QuotedPrintable
            .decode(b"line one  \t\r\nline two\r\n")
            .unwrap();
        assert_eq!(decoded, b"line one\r\nline two\r\n".to_vec());
    }

    #[test]
    fn quoted_printable_lf_lines() {
        let decoded = ContentTransferEncoding::QuotedPrintable
            .decode(b"a=3Db\nc=\nd\n")
            .unwrap();
        assert_eq!(decoded, b"a=b\r\ncd\r\n".to_vec());
    }

    #[test]
    fn quoted_printable_long_line() {
        let line = "x".repeat(200);
        let decoded = ContentTransferEncoding::QuotedPrintable
            .decode(line.as_bytes())
            .unwrap();
        assert_eq!(decoded, line.into_bytes());
    }

    #[test]
    fn quoted_printable_bad_escape() {
        let res = ContentTransferEncoding::QuotedPrintable.decode(b"abc=ZZdef");
        match res {
            Err(Error::Decode { encoding, reason }) => {
                assert_eq!(encoding, ContentTransferEncoding::QuotedPrintable);
                assert_eq!(reason, r#"invalid escape "=ZZ" at offset 3"#);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn quoted_printable_truncated_escape() {
        let res = ContentTransferEncoding::QuotedPrintable.decode(b"abc=4");
        assert!(res.is_err());
    }

    #[test]
    fn pass_through() {
        let body = b"\x00\xff raw\r\n";
        for encoding in &[
            ContentTransferEncoding::SevenBit,
            ContentTransferEncoding::EightBit,
            ContentTransferEncoding::Binary,
        ] {
            assert_eq!(encoding.decode(body).unwrap(), body.to_vec());
        }
    }

    #[test]
    fn tokens() {
        assert_eq!(
            ContentTransferEncoding::from(" Base64 "),
            ContentTransferEncoding::Base64
        );
        assert_eq!(
            ContentTransferEncoding::from("QUOTED-PRINTABLE"),
            ContentTransferEncoding::QuotedPrintable
        );
        assert_eq!(
            ContentTransferEncoding::from("x-uuencode"),
            ContentTransferEncoding::Unrecognized("x-uuencode".to_string())
        );
    }

    #[test]
    fn unrecognized_is_unsupported() {
        let encoding = ContentTransferEncoding::from("x-uuencode");
        assert!(matches!(
            encoding.decode(b"begin 644"),
            Err(Error::UnsupportedEncoding(token)) if token == "x-uuencode"
        ));
        assert!(encoding.check().is_err());
    }
}
