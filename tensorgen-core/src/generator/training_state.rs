//! Generator of the training state input.
use crate::{
    error::TensorGenError,
    tensor::{Tensor, TensorAllocator},
    util::copy_tensor,
    TrainingGenerator, Transition,
};
use anyhow::Result;
use std::sync::Arc;

/// Copies the training state carried over from the previous step.
///
/// The tensor follows the batch size of the training state, not the one of
/// the training step.
pub struct TrainingStateGenerator {
    allocator: Arc<dyn TensorAllocator>,
}

impl TrainingStateGenerator {
    /// Creates the generator.
    pub fn new(allocator: Arc<dyn TensorAllocator>) -> Self {
        Self { allocator }
    }
}

impl TrainingGenerator for TrainingStateGenerator {
    fn generate(
        &self,
        tensor: &mut Tensor,
        _batch_size: usize,
        _transitions: &[&Transition],
        training_state: &Tensor,
    ) -> Result<()> {
        let batch_size = training_state
            .batch()
            .ok_or_else(|| TensorGenError::EmptyTensor(training_state.name().to_string()))?;
        tensor.resize(batch_size, self.allocator.as_ref());
        copy_tensor(training_state, tensor)
    }
}
