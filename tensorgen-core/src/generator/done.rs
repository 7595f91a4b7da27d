//! Generator of episode termination inputs.
use crate::{
    tensor::{Tensor, TensorAllocator},
    util::{ensure_rows_written, resize_tensor},
    TrainingGenerator, Transition,
};
use anyhow::Result;
use std::sync::Arc;

/// Writes `1.0` into `tensor[index, 0]` if transition `index` ended its
/// episode, `0.0` otherwise.
pub struct DoneInputGenerator {
    allocator: Arc<dyn TensorAllocator>,
}

impl DoneInputGenerator {
    /// Creates the generator.
    pub fn new(allocator: Arc<dyn TensorAllocator>) -> Self {
        Self { allocator }
    }
}

impl TrainingGenerator for DoneInputGenerator {
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
            let done = match tr.done() {
                true => 1.0,
                false => 0.0,
            };
            tensor.set(&[index, 0], done)?;
        }
        ensure_rows_written(tensor.name(), batch_size, rows)
    }
}
