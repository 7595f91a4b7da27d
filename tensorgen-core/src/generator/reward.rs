//! Generator of reward inputs.
use crate::{
    tensor::{Tensor, TensorAllocator},
    util::{ensure_rows_written, resize_tensor},
    TrainingGenerator, Transition,
};
use anyhow::Result;
use std::sync::Arc;

/// Writes the reward of transition `index` into `tensor[index, 0]`.
pub struct RewardInputGenerator {
    allocator: Arc<dyn TensorAllocator>,
}

impl RewardInputGenerator {
    /// Creates the generator.
    pub fn new(allocator: Arc<dyn TensorAllocator>) -> Self {
        Self { allocator }
    }
}

impl TrainingGenerator for RewardInputGenerator {
    fn generate(
        &self,
        tensor: &mut Tensor,
        batch_size: usize,
        transitions: &[&Transition],
        _training_state: &Tensor,
    ) -> Result<()> {
        resize_tensor(tensor, batch_size, self.allocator.as_ref());
        let rows = transitions.len().min(batch_size);
        for (index, tr) in transitions.iter().take(rows).enumerate() {
            tensor.set(&[index, 0], tr.reward())?;
        }
        ensure_rows_written(tensor.name(), batch_size, rows)
    }
}
