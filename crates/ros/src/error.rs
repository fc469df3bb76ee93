use {image::ImageError, std::fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    UnsupportedEncoding(String),
    Stride { step: usize, row_len: usize },
    Truncated { len: usize, needed: usize },
    Image(ImageError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::UnsupportedEncoding(encoding) => {
                write!(f, "unsupported encoding '{encoding}'")
            }
            BridgeError::Stride { step, row_len } => {
                write!(f, "step {step} is shorter than a row of {row_len} bytes")
            }
            BridgeError::Truncated { len, needed } => {
                write!(f, "image data holds {len} bytes, expected at least {needed}")
            }
            BridgeError::Image(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<ImageError> for BridgeError {
    fn from(err: ImageError) -> Self {
        BridgeError::Image(err)
    }
}

#[derive(Debug)]
pub enum RosError {
    Name(String),
    Create(String),
    Read(String),
    Spin(String),
}

impl fmt::Display for RosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosError::Name(msg) => write!(f, "invalid ROS name: {msg}"),
            RosError::Create(msg) => write!(f, "ROS entity creation failed: {msg}"),
            RosError::Read(msg) => write!(f, "ROS read failed: {msg}"),
            RosError::Spin(msg) => write!(f, "ROS spinner failed: {msg}"),
        }
    }
}

impl std::error::Error for RosError {}
