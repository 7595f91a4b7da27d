//! Generator of the batch size input.
use crate::{
    tensor::{Tensor, TensorAllocator},
    TrainingGenerator, Transition,
};
use anyhow::Result;
use std::sync::Arc;

/// Writes the batch size of the training step into a tensor of batch size 1.
pub struct TrainingBatchSizeGenerator {
    allocator: Arc<dyn TensorAllocator>,
}

impl TrainingBatchSizeGenerator {
    /// Creates the generator.
    pub fn new(allocator: Arc<dyn TensorAllocator>) -> Self {
        Self { allocator }
    }
}

impl TrainingGenerator for TrainingBatchSizeGenerator {
    fn generate(
        &self,
        tensor: &mut Tensor,
        batch_size: usize,
        _transitions: &[&Transition],
        _training_state: &Tensor,
    ) -> Result<()> {
        tensor.resize(1, self.allocator.as_ref());
        tensor.fill(batch_size as f32);
        Ok(())
    }
}
