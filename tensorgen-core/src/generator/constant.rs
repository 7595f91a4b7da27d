//! Generator of hyperparameter inputs.
use crate::{
    tensor::{Tensor, TensorAllocator},
    TrainingGenerator, Transition,
};
use anyhow::Result;
use std::sync::Arc;

/// Writes a fixed value, e.g., the learning rate, into a tensor of batch size 1.
///
/// The value is broadcast by the model, so the requested batch size is ignored.
pub struct ConstantGenerator {
    allocator: Arc<dyn TensorAllocator>,
    value: f32,
}

impl ConstantGenerator {
    /// Creates the generator.
    pub fn new(allocator: Arc<dyn TensorAllocator>, value: f32) -> Self {
        Self { allocator, value }
    }
}

impl TrainingGenerator for ConstantGenerator {
    fn generate(
        &self,
        tensor: &mut Tensor,
        _batch_size: usize,
        _transitions: &[&Transition],
        _training_state: &Tensor,
    ) -> Result<()> {
        tensor.resize(1, self.allocator.as_ref());
        tensor.fill(self.value);
        Ok(())
    }
}
