use {
    crate::Device,
    base::TensorError,
    image::ImageError,
    std::fmt,
};

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    Backend(String),
    UnsupportedDevice(Device),
    UnsupportedDtype(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    ShapeMismatch {
        expected: String,
        got: String,
    },
    Image(ImageError),
    Io(String),
    Runtime(String),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::UnsupportedDevice(device) => {
                write!(f, "device {device} is not supported by this build")
            }
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => write!(f, "invalid input '{name}', expected one of {expected_names:?}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::Image(err) => write!(f, "image error: {err}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::Runtime(msg) => write!(f, "runtime error: {msg}"),
        }
    }
}

impl std::error::Error for InferError {}

impl From<TensorError> for InferError {
    fn from(err: TensorError) -> Self {
        InferError::Backend(format!("failed to create tensor: {err}"))
    }
}

impl From<ImageError> for InferError {
    fn from(err: ImageError) -> Self {
        InferError::Image(err)
    }
}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}
