use serde::{Deserialize, Serialize};

/// `builtin_interfaces/Time`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Time {
    pub sec: i32,
    pub nanosec: u32,
}

/// `std_msgs/Header`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub stamp: Time,
    pub frame_id: String,
}

/// `sensor_msgs/Image`. Field order is the wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMsg {
    pub header: Header,
    pub height: u32,
    pub width: u32,
    pub encoding: String,
    pub is_bigendian: u8,
    /// Full row length in bytes.
    pub step: u32,
    pub data: Vec<u8>,
}

impl ros2_client::Message for ImageMsg {}

impl ImageMsg {
    pub const PACKAGE: &'static str = "sensor_msgs";
    pub const TYPE: &'static str = "Image";
}
