use crate::error::{Error, Result};
use crate::header::Header;
use display_bytes::display_bytes_string;
use log::warn;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while, take_while1};
use nom::combinator::{map, recognize, rest};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, separated_pair, terminated, tuple};
use nom::IResult;
use std::collections::HashMap;

type Parameters<'a> = HashMap<&'a [u8], Vec<u8>>;

/// A raw header field taken from an unfolded header line
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub(crate) struct Field<'a> {
    pub name: &'a [u8],
    pub value: &'a [u8],
}

// Split an unfolded header line, without its line ending, into name and value
pub(crate) fn field(line: &[u8]) -> Result<Field> {
    match field_name_value(line) {
        Ok((_, (name, value))) => Ok(Field {
            name,
            value: trim_end(value),
        }),
        Err(_) => Err(Error::Framing(format!(
            "malformed header line {}",
            display_bytes_string(line)
        ))),
    }
}

// Interpret the value of a header field
pub(crate) fn header<'a>(field: &Field<'a>) -> Result<Header<'a>> {
    let value = field.value;
    let header = match field.name.to_ascii_lowercase().as_slice() {
        b"content-type" => match content_type(value) {
            Ok((remaining, header)) => {
                ignored_parameters(b"Content-Type", remaining);
                header
            }
            Err(_) => {
                return Err(Error::ContentType(
                    display_bytes_string(value).into_owned(),
                ))
            }
        },
        b"content-disposition" => match content_disposition(value) {
            Ok((remaining, header)) => {
                ignored_parameters(b"Content-Disposition", remaining);
                header
            }
            Err(_) => {
                warn!(
                    "Malformed Content-Disposition {}",
                    display_bytes_string(value)
                );
                Header::Unstructured(field.name, value)
            }
        },
        b"content-transfer-encoding" => Header::ContentTransferEncoding(value),
        b"content-id" => Header::ContentId(value),
        b"content-description" => Header::ContentDescription(value),
        b"from" => Header::From(value),
        b"to" => Header::To(value),
        b"cc" => Header::Cc(value),
        b"subject" => Header::Subject(value),
        b"sender" => Header::Sender(value),
        b"reply-to" => Header::ReplyTo(value),
        b"message-id" => Header::MessageId(value),
        b"date" => Header::Date(value),
        _ => Header::Unstructured(field.name, value),
    };
    Ok(header)
}

fn ignored_parameters(header: &[u8], remaining: &[u8]) {
    let remaining = trim_end(remaining);
    let remaining = remaining.strip_suffix(b";").unwrap_or(remaining);
    if !trim_end(remaining).is_empty() {
        warn!(
            "Ignoring unparsable {} parameters {}",
            display_bytes_string(header),
            display_bytes_string(remaining)
        );
    }
}

fn field_name_value(buf: &[u8]) -> IResult<&[u8], (&[u8], &[u8])> {
    let name = take_while1(|c| c != b':' && !wsp(c) && !ctl(c));
    separated_pair(name, pair(space, tag(b":")), preceded(space, rest))(buf)
}

fn content_type(buf: &[u8]) -> IResult<&[u8], Header> {
    map(with_parameters(mime_type), |v| Header::ContentType {
        mime_type: v.0,
        parameters: v.1,
    })(buf)
}

fn content_disposition(buf: &[u8]) -> IResult<&[u8], Header> {
    map(with_parameters(token), |v| Header::ContentDisposition {
        disposition_type: v.0,
        parameters: v.1,
    })(buf)
}

// A header value followed by parameters
fn with_parameters<'a, F>(
    value: F,
) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], (&'a [u8], Parameters<'a>)>
where
    F: FnMut(&'a [u8]) -> IResult<&'a [u8], &'a [u8]>,
{
    pair(delimited(space, value, space), parameters)
}

fn mime_type(buf: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(tuple((token, space, tag(b"/"), space, token)))(buf)
}

fn space(buf: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while(wsp)(buf)
}

fn parameters(buf: &[u8]) -> IResult<&[u8], Parameters> {
    fold_many0(parameter, HashMap::new, |mut acc: HashMap<_, _>, item| {
        acc.insert(item.0, item.1);
        acc
    })(buf)
}

fn parameter(buf: &[u8]) -> IResult<&[u8], (&[u8], Vec<u8>)> {
    let preamble = tuple((space, tag(b";"), space));
    let equals = tuple((space, tag(b"="), space));
    preceded(
        preamble,
        terminated(separated_pair(token, equals, parameter_value), space),
    )(buf)
}

fn parameter_value(buf: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let token_vec = map(token, |b: &[u8]| b.to_vec());
    alt((token_vec, quoted_string))(buf)
}

fn token(buf: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(|c| !wsp(c) && !tspecial(c) && !ctl(c))(buf)
}

fn quoted_string(buf: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let qs = preceded(tag(b"\""), in_quotes);
    terminated(qs, tag(b"\""))(buf)
}

fn in_quotes(buf: &[u8]) -> IResult<&[u8], Vec<u8>> {
    let mut ret = Vec::new();
    let mut i = 0;
    while i < buf.len() && buf[i] != b'"' {
        if buf[i] == b'\\' && i + 1 < buf.len() {
            i += 1;
        }
        ret.push(buf[i]);
        i += 1;
    }
    Ok((&buf[i..], ret))
}

fn trim_end(buf: &[u8]) -> &[u8] {
    let end = buf.iter().rposition(|c| !wsp(*c)).map_or(0, |i| i + 1);
    &buf[..end]
}

fn wsp(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

fn ctl(c: u8) -> bool {
    c == b'\r' || c == b'\n'
}

fn tspecial(c: u8) -> bool {
    c == b'('
        || c == b')'
        || c == b'<'
        || c == b'>'
        || c == b'@'
        || c == b','
        || c == b';'
        || c == b':'
        || c == b'\\'
        || c == b'"'
        || c == b'/'
        || c == b'['
        || c == b']'
        || c == b'?'
        || c == b'='
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use pretty_assertions::assert_eq;

    fn parse(line: &[u8]) -> Header {
        header(&field(line).unwrap()).unwrap()
    }

    #[test]
    fn unstructured_header() {
        let tok = parse(b"X-sender: <sender@sendersdomain.com>");
        assert_eq!(
            tok,
            Header::Unstructured(b"X-sender", b"<sender@sendersdomain.com>")
        )
    }

    #[test]
    fn case_insensitive_header() {
        let tok = parse(b"Message-Id: <20191004173832.005460@fish.localdomain>");
        assert_eq!(
            tok,
            Header::MessageId(b"<20191004173832.005460@fish.localdomain>")
        )
    }

    #[test]
    fn trailing_space_trimmed() {
        let tok = parse(b"Subject:   Hello there \t");
        assert_eq!(tok, Header::Subject(b"Hello there"))
    }

    #[test]
    fn empty_value() {
        let tok = parse(b"Subject:");
        assert_eq!(tok, Header::Subject(b""))
    }

    #[test]
    fn missing_colon() {
        let res = field(b"this is not a header");
        assert!(matches!(res, Err(Error::Framing(_))));
    }

    #[test]
    fn content_type() {
        let tok = parse(b"Content-Type: multipart/mixed; boundary=--boundary--");
        let expected_params = hashmap! {
            b"boundary".as_ref() => b"--boundary--".to_vec(),
        };
        assert_eq!(
            tok,
            Header::ContentType {
                mime_type: b"multipart/mixed",
                parameters: expected_params,
            }
        )
    }

    #[test]
    fn content_type_without_space() {
        let tok = parse(b"content-type: text/plain;charset=\"utf-8\";");
        let expected_params = hashmap! {
            b"charset".as_ref() => b"utf-8".to_vec(),
        };
        assert_eq!(
            tok,
            Header::ContentType {
                mime_type: b"text/plain",
                parameters: expected_params,
            }
        )
    }

    #[test]
    fn folded_content_type() {
        let tok = parse(b"Content-Type: multipart/alternative;\t boundary=\"b1\" ; charset=us-ascii");
        let expected_params = hashmap! {
            b"boundary".as_ref() => b"b1".to_vec(),
            b"charset".as_ref() => b"us-ascii".to_vec(),
        };
        assert_eq!(
            tok,
            Header::ContentType {
                mime_type: b"multipart/alternative",
                parameters: expected_params,
            }
        )
    }

    #[test]
    fn malformed_content_type() {
        let res = header(&field(b"Content-Type: text").unwrap());
        assert!(matches!(res, Err(Error::ContentType(v)) if v == "text"));
    }

    #[test]
    fn content_disposition() {
        let line = br#"Content-Disposition: attachment; filename=genome.jpeg; modification-date="Wed, 12 Feb 1997 16:29:51 -0500""#;
        let tok = parse(line);
        let expected_params = hashmap! {
            b"filename".as_ref() => b"genome.jpeg".to_vec(),
            b"modification-date".as_ref() => b"Wed, 12 Feb 1997 16:29:51 -0500".to_vec(),
        };
        assert_eq!(
            tok,
            Header::ContentDisposition {
                disposition_type: b"attachment",
                parameters: expected_params,
            }
        )
    }

    #[test]
    fn malformed_content_disposition_is_kept() {
        let tok = parse(b"Content-Disposition: ;;");
        assert_eq!(tok, Header::Unstructured(b"Content-Disposition", b";;"))
    }

    #[test]
    fn quoted_boundary() {
        let tok = parse(b"Content-Type: multipart/mixed; boundary=\"-- boundary --\"");
        let expected_params = hashmap! {
            b"boundary".as_ref() => b"-- boundary --".to_vec(),
        };
        assert_eq!(
            tok,
            Header::ContentType {
                mime_type: b"multipart/mixed",
                parameters: expected_params,
            }
        )
    }

    #[test]
    fn escaped_quote() {
        let tok = parse(br#"Content-Type: application/pdf; name="a \"b\".pdf""#);
        let expected_params = hashmap! {
            b"name".as_ref() => br#"a "b".pdf"#.to_vec(),
        };
        assert_eq!(
            tok,
            Header::ContentType {
                mime_type: b"application/pdf",
                parameters: expected_params,
            }
        )
    }
}
