use std::collections::HashMap;

/// A parsed Content-Type header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// The lower case MIME type e.g "text/plain"
    pub mime_type: String,
    /// Parameters keyed by lower case name e.g "charset"
    pub parameters: HashMap<String, String>,
}

/// Information about how message parts should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisposition {
    /// The lower case disposition type e.g "attachment"
    pub disposition_type: String,
    pub parameters: HashMap<String, String>,
}

impl ContentType {
    /// A content type without parameters
    pub fn new(mime_type: &str) -> Self {
        Self {
            mime_type: mime_type.to_ascii_lowercase(),
            parameters: HashMap::new(),
        }
    }

    pub(crate) fn from_parts(mime_type: &[u8], parameters: HashMap<&[u8], Vec<u8>>) -> Self {
        let mime_type = String::from_utf8_lossy(mime_type)
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        Self {
            mime_type,
            parameters: owned_parameters(parameters),
        }
    }

    /// Get a parameter, the name is case insensitive
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn charset(&self) -> Option<&str> {
        self.parameter("charset")
    }

    pub fn boundary(&self) -> Option<&str> {
        self.parameter("boundary")
    }

    /// True for all multipart/* types
    pub fn is_multipart(&self) -> bool {
        self.mime_type.starts_with("multipart/")
    }
}

impl ContentDisposition {
    pub(crate) fn from_parts(
        disposition_type: &[u8],
        parameters: HashMap<&[u8], Vec<u8>>,
    ) -> Self {
        Self {
            disposition_type: String::from_utf8_lossy(disposition_type).to_ascii_lowercase(),
            parameters: owned_parameters(parameters),
        }
    }

    pub fn is_attachment(&self) -> bool {
        self.disposition_type == "attachment"
    }

    pub fn is_inline(&self) -> bool {
        self.disposition_type == "inline"
    }

    pub fn filename(&self) -> Option<&str> {
        self.parameters.get("filename").map(String::as_str)
    }
}

fn owned_parameters(parameters: HashMap<&[u8], Vec<u8>>) -> HashMap<String, String> {
    parameters
        .into_iter()
        .map(|(k, v)| {
            (
                String::from_utf8_lossy(k).to_ascii_lowercase(),
                String::from_utf8_lossy(&v).into_owned(),
            )
        })
        .collect()
}
