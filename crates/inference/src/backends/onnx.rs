use {
    crate::{Backend, Device, InferError, ModelSource, Session},
    base::Tensor,
    ndarray::{ArrayD, ArrayViewD},
    ort::{
        inputs,
        session::Session as OrtSession,
        value::TensorRef,
    },
    std::collections::HashMap,
};

pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }
}

impl Backend for OnnxBackend {
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError> {
        // the default ort environment is created with the first builder
        let device = &self.device;
        let mut builder = OrtSession::builder().map_err(|e| {
            InferError::Backend(format!("failed to create session builder: {}", e))
        })?;

        builder = match device {
            Device::Cpu => {
                log::info!("onnx: using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::ep::ExecutionProvider;
                use ort::execution_providers::CUDAExecutionProvider;
                let ep = CUDAExecutionProvider::default().with_device_id(*device_id);
                let available = ep.is_available().unwrap_or(false);
                log::info!(
                    "onnx: CUDA EP requested (device_id={}), available: {}",
                    device_id,
                    available
                );
                builder
                    .with_execution_providers([ep.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
            #[cfg(feature = "tensorrt")]
            Device::TensorRt {
                device_id,
                fp16,
                cache_dir,
            } => {
                use ort::ep::ExecutionProvider;
                use ort::execution_providers::{CUDAExecutionProvider, TensorRTExecutionProvider};
                let mut ep = TensorRTExecutionProvider::default()
                    .with_device_id(*device_id)
                    .with_fp16(*fp16);
                if let Some(dir) = cache_dir {
                    ep = ep
                        .with_engine_cache(true)
                        .with_engine_cache_path(dir.display().to_string());
                }
                let available = ep.is_available().unwrap_or(false);
                log::info!(
                    "onnx: TensorRT EP requested (device_id={}, fp16={}), available: {}",
                    device_id,
                    fp16,
                    available
                );
                // nodes TensorRT rejects run on CUDA
                let cuda = CUDAExecutionProvider::default().with_device_id(*device_id);
                builder
                    .with_execution_providers([ep.build(), cuda.build()])
                    .map_err(|_| InferError::UnsupportedDevice(device.clone()))?
            }
            #[cfg(not(feature = "tensorrt"))]
            Device::TensorRt { .. } => {
                return Err(InferError::UnsupportedDevice(device.clone()));
            }
        };

        let session = match &model {
            ModelSource::File(path) => {
                if !path.exists() {
                    return Err(InferError::ModelLoad(format!(
                        "model file {} does not exist",
                        path.display()
                    )));
                }
                builder.commit_from_file(path).map_err(|e| {
                    InferError::ModelLoad(format!("failed to load model from file: {}", e))
                })?
            }
            ModelSource::Memory(bytes) => builder.commit_from_memory(bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {}", e))
            })?,
        };

        let input_names: Vec<String> = session
            .inputs()
            .iter()
            .map(|input| input.name().to_string())
            .collect();
        let output_names: Vec<String> = session
            .outputs()
            .iter()
            .map(|output| output.name().to_string())
            .collect();
        log::debug!(
            "onnx: loaded {} (inputs {:?}, outputs {:?})",
            model.describe(),
            input_names,
            output_names
        );

        Ok(Box::new(OnnxSession {
            session,
            input_names,
            output_names,
        }))
    }
}

pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        for (name, _) in inputs {
            if !self.input_names.iter().any(|n| n == name) {
                return Err(InferError::InvalidInput {
                    name: name.to_string(),
                    expected_names: self.input_names.clone(),
                });
            }
        }

        // detection models take a single image tensor
        let [(name, tensor)] = inputs else {
            return Err(InferError::Backend(format!(
                "expected exactly 1 input, got {}",
                inputs.len()
            )));
        };
        let array = tensor_to_ndarray(tensor.clone())?;
        let tensor_ref = TensorRef::from_array_view(array.view())
            .map_err(|e| InferError::Backend(format!("failed to create tensor ref: {}", e)))?;
        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| InferError::Backend(format!("inference failed: {}", e)))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let value = &outputs[output_name.as_str()];
            let array = value.try_extract_array::<f32>().map_err(|e| {
                InferError::UnsupportedDtype(format!("output '{}' is not f32: {}", output_name, e))
            })?;
            result.insert(output_name.clone(), ndarray_to_tensor(array)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }

    fn metadata(&self, key: &str) -> Option<String> {
        let metadata = match self.session.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                log::debug!("onnx: model metadata unavailable: {}", e);
                return None;
            }
        };
        metadata.custom(key)
    }
}

pub fn tensor_to_ndarray(tensor: Tensor<f32>) -> Result<ArrayD<f32>, InferError> {
    ArrayD::from_shape_vec(tensor.shape, tensor.data).map_err(|e| {
        InferError::Backend(format!("failed to create ndarray from tensor: {}", e))
    })
}

pub fn ndarray_to_tensor(array: ArrayViewD<'_, f32>) -> Result<Tensor<f32>, InferError> {
    let shape = array.shape().to_vec();
    let data = array.iter().copied().collect();
    Ok(Tensor::new(shape, data)?)
}
