use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    EmptyModelPath,
    InvalidImgsz(usize),
    InvalidThreshold { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyModelPath => write!(f, "model path is empty"),
            ConfigError::InvalidImgsz(imgsz) => {
                write!(f, "imgsz {imgsz} must be positive")
            }
            ConfigError::InvalidThreshold { name, value } => {
                write!(f, "{name} threshold {value} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum ViewerError {
    Window(String),
    Update(String),
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::Window(msg) => write!(f, "failed to open window: {msg}"),
            ViewerError::Update(msg) => write!(f, "failed to update window: {msg}"),
        }
    }
}

impl std::error::Error for ViewerError {}

impl From<minifb::Error> for ViewerError {
    fn from(err: minifb::Error) -> Self {
        ViewerError::Update(err.to_string())
    }
}
