use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    Square1024,
}

impl ImageSize {
    pub fn width(&self) -> u32 {
        match self {
            ImageSize::Square1024 => 1024,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ImageSize::Square1024 => 1024,
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width(), self.height())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    pub size: ImageSize,
    pub count: u8,
}

impl ImageRequest {
    /// One 1024x1024 image, whatever the prompt.
    pub fn single(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            size: ImageSize::Square1024,
            count: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub b64_json: String,
}
