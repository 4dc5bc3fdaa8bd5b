/// Text of a single page, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub number: u32,
    pub text: String,
}

impl ExtractedPage {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}
