/// Options that change how an email is parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop inline and attached files without decoding them
    pub skip_attachments: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip_attachments(mut self, skip: bool) -> Self {
        self.skip_attachments = skip;
        self
    }
}
