use {crate::InferError, base::Tensor, std::collections::HashMap};

/// A loaded model, ready to run.
pub trait Session {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
    /// Custom metadata entry stored in the model file, if any.
    fn metadata(&self, key: &str) -> Option<String>;
}
