use std::{fmt, path::PathBuf};

/// Where a model session runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Device {
    Cpu,
    Cuda {
        device_id: i32,
    },
    /// TensorRT builds an engine on first load; with `cache_dir` set the
    /// engine is stored there and reused by later runs.
    TensorRt {
        device_id: i32,
        fp16: bool,
        cache_dir: Option<PathBuf>,
    },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
            Device::TensorRt {
                device_id, fp16, ..
            } => {
                write!(f, "TensorRT(device_id={device_id}, fp16={fp16})")
            }
        }
    }
}
