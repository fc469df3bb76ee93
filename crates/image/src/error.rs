use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    Layout(String),
    Format(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Layout(msg) => write!(f, "layout error: {msg}"),
            ImageError::Format(msg) => write!(f, "format error: {msg}"),
        }
    }
}

impl std::error::Error for ImageError {}
