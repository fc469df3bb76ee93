use {
    crate::ConfigError,
    clap::{Parser, ValueEnum},
    inference::{DetectorConfig, Device},
    std::path::PathBuf,
};

pub mod constants {
    pub const NODE_NAME: &str = "yolo_zed_node";
    pub const TOPIC: &str = "/zed/zed_node/rgb/image_rect_color";
    pub const QOS_DEPTH: i32 = 10;
    pub const WINDOW_TITLE: &str = "YOLOv8 tensorrt Detection";
    pub const IMGSZ: usize = 640;
    pub const CONF_THRESHOLD: f32 = 0.25;
    pub const IOU_THRESHOLD: f32 = 0.45;
    pub const MAX_DETECTIONS: usize = 300;
    /// Largest stride of the detection head; `imgsz` is rounded up to it.
    pub const MODEL_STRIDE: usize = 32;
    /// How often the window is pumped for input between frames.
    pub const WINDOW_POLL_MS: u64 = 30;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DeviceKind {
    Cpu,
    Cuda,
    Tensorrt,
}

#[derive(Debug, Parser)]
#[command(name = "obj-det")]
#[command(about = "ROS 2 node for YOLO inference on a ZED camera feed")]
#[command(version)]
pub struct Args {
    /// Path to the exported YOLO model file
    #[arg(long = "tensorrt-model", alias = "tensorrt_model", value_name = "PATH")]
    pub tensorrt_model: PathBuf,

    /// Model input size in pixels
    #[arg(long, default_value_t = constants::IMGSZ)]
    pub imgsz: usize,

    #[arg(long, value_enum, default_value_t = DeviceKind::Tensorrt)]
    pub device: DeviceKind,

    #[arg(long, default_value_t = 0)]
    pub device_id: i32,

    /// Build the TensorRT engine in half precision
    #[arg(long)]
    pub fp16: bool,

    /// Directory for cached TensorRT engines
    #[arg(long, value_name = "DIR")]
    pub engine_cache: Option<PathBuf>,

    /// Minimum class score to keep a detection
    #[arg(long, default_value_t = constants::CONF_THRESHOLD)]
    pub conf: f32,

    /// IoU above which overlapping boxes of one class are suppressed
    #[arg(long, default_value_t = constants::IOU_THRESHOLD)]
    pub iou: f32,

    #[arg(long, default_value = constants::TOPIC)]
    pub topic: String,

    /// Write logs to daily files in this directory instead of stdout
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Run without a window
    #[arg(long)]
    pub headless: bool,
}

/// Remove the `--ros-args ... [--]` block a ROS launch appends to the
/// command line.
pub fn strip_ros_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut kept = Vec::new();
    let mut in_ros_args = false;
    for arg in args {
        if in_ros_args {
            if arg == "--" {
                in_ros_args = false;
            }
            continue;
        }
        if arg == "--ros-args" {
            in_ros_args = true;
            continue;
        }
        kept.push(arg);
    }
    kept
}

/// Round `imgsz` up to a multiple of the model stride.
pub fn stride_aligned(imgsz: usize) -> usize {
    let aligned = imgsz.div_ceil(constants::MODEL_STRIDE) * constants::MODEL_STRIDE;
    if aligned != imgsz {
        log::warn!(
            "imgsz={} must be a multiple of max stride {}, updating to {}",
            imgsz,
            constants::MODEL_STRIDE,
            aligned
        );
    }
    aligned
}

/// Validated node settings.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub model_path: PathBuf,
    pub imgsz: usize,
    pub device: Device,
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub topic: String,
    pub log_dir: Option<PathBuf>,
    pub headless: bool,
}

impl NodeConfig {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let device = match args.device {
            DeviceKind::Cpu => Device::Cpu,
            DeviceKind::Cuda => Device::Cuda {
                device_id: args.device_id,
            },
            DeviceKind::Tensorrt => Device::TensorRt {
                device_id: args.device_id,
                fp16: args.fp16,
                cache_dir: args.engine_cache,
            },
        };
        let config = Self {
            model_path: args.tensorrt_model,
            imgsz: stride_aligned(args.imgsz),
            device,
            conf_threshold: args.conf,
            iou_threshold: args.iou,
            topic: args.topic,
            log_dir: args.log_dir,
            headless: args.headless,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyModelPath);
        }
        if self.imgsz == 0 {
            return Err(ConfigError::InvalidImgsz(self.imgsz));
        }
        for (name, value) in [("conf", self.conf_threshold), ("iou", self.iou_threshold)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }
        Ok(())
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            imgsz: self.imgsz,
            conf_threshold: self.conf_threshold,
            iou_threshold: self.iou_threshold,
            max_detections: constants::MAX_DETECTIONS,
        }
    }
}
