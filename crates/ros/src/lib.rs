//! ROS 2 plumbing for camera frames: the `sensor_msgs/Image` message, the
//! bridge between messages and [`image::Image`], and a subscriber that turns
//! a topic into an async stream of frames.

pub mod bridge;
mod error;
pub mod msg;
pub mod subscriber;

pub use bridge::{Encoding, image_to_imgmsg, imgmsg_to_image};
pub use error::{BridgeError, RosError};
pub use msg::{Header, ImageMsg, Time};
pub use ros2_client::Context;
pub use subscriber::{ImageSubscriber, keep_last, split_topic};
