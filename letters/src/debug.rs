use display_bytes::{display_bytes, display_bytes_string};
use std::collections::HashMap;
use std::fmt;

// Debug a single entry tuple
pub(crate) fn dbg_single(f: &mut fmt::Formatter<'_>, name: &str, value: &[u8]) -> fmt::Result {
    let mut d = f.debug_tuple(name);
    d.field(&display_bytes_string(value));
    d.finish()
}

pub(crate) struct ParamDbg<'a>(pub(crate) &'a HashMap<&'a [u8], Vec<u8>>);

impl fmt::Debug for ParamDbg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_map();
        for (parameter, value) in self.0 {
            d.entry(
                &display_bytes_string(parameter),
                &display_bytes_string(value),
            );
        }
        d.finish()
    }
}

// Debug an optional byte vector
pub(crate) struct OptionDbg<'a>(pub(crate) &'a Option<Vec<u8>>);

impl fmt::Debug for OptionDbg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionDbg(Some(v)) => write!(f, "Some({})", display_bytes(v)),
            OptionDbg(None) => write!(f, "None"),
        }
    }
}

// Debug raw header fields as name: value pairs
pub(crate) struct FieldsDbg<'a>(pub(crate) &'a [(Vec<u8>, Vec<u8>)]);

impl fmt::Debug for FieldsDbg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_list();
        for (name, value) in self.0 {
            d.entry(&format_args!("{}: {}", display_bytes(name), display_bytes(value)));
        }
        d.finish()
    }
}

// Debug a decoded file payload without dumping it
pub(crate) struct PayloadDbg<'a>(pub(crate) &'a [u8]);

impl fmt::Debug for PayloadDbg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 16;
        let data = self.0;
        if data.len() > PREVIEW {
            write!(
                f,
                "{}... ({} bytes)",
                display_bytes(&data[..PREVIEW]),
                data.len()
            )
        } else {
            write!(f, "{}", display_bytes(data))
        }
    }
}
