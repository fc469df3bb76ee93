pub mod backend;
pub mod backends;
pub mod detector;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod session;

pub use backend::Backend;
pub use backends::onnx::{OnnxBackend, OnnxSession};
pub use detector::{Detection, DetectorConfig, Detections, LetterboxInfo, ObjectDetector};
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::Session;
