/// Options for normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Try the natural-language recognizers as a last resort.
    /// Default: true.
    pub natural_language: bool,

    /// Attach validation warnings to each normalized part.
    /// Default: true.
    pub validate: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            natural_language: true,
            validate: true,
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn natural_language(mut self, enable: bool) -> Self {
        self.natural_language = enable;
        self
    }

    #[must_use]
    pub fn validate(mut self, enable: bool) -> Self {
        self.validate = enable;
        self
    }
}
