use ::charset::Charset;
use log::debug;

/// Maps a declared charset label to a decoder
pub trait CharsetLookup {
    /// Decode `bytes` from the charset named by `label`.
    /// Returns None when the label is not recognised.
    fn decode(&self, label: &str, bytes: &[u8]) -> Option<String>;
}

/// The default charset lookup, covering the WHATWG encoding labels and UTF-7
#[derive(Debug, Clone, Copy, Default)]
pub struct Charsets;

impl CharsetLookup for Charsets {
    fn decode(&self, label: &str, bytes: &[u8]) -> Option<String> {
        Charset::for_label(label.trim().as_bytes()).map(|charset| {
            let (text, _malformed) = charset.decode_without_bom_handling(bytes);
            text.into_owned()
        })
    }
}

/// Convert decoded body bytes into text.
/// Bytes with a missing or unknown charset are assumed to be UTF-8 already.
pub fn normalize_charset<C>(bytes: &[u8], declared: Option<&str>, charsets: &C) -> String
where
    C: CharsetLookup + ?Sized,
{
    if let Some(label) = declared {
        if let Some(text) = charsets.decode(label, bytes) {
            return text;
        }
        debug!("Unknown charset {:?}, reading as utf-8", label);
    }
    String::from_utf8_lossy(bytes).into_owned()
}
