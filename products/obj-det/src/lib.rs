//! A ROS 2 node that runs YOLO detection on a camera topic and shows the
//! annotated frames in a window.

pub mod config;
pub mod error;
pub mod handler;
pub mod node;
pub mod viewer;

pub use config::{Args, NodeConfig, constants, stride_aligned, strip_ros_args};
pub use error::{ConfigError, ViewerError};
pub use handler::{Detect, DropReason, FrameHandler, FrameOutcome, FrameSink};
pub use node::{Shutdown, run, run_loop};
pub use viewer::{HeadlessDisplay, Viewer};
