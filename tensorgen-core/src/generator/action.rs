//! Generator of discrete action inputs.
use crate::{
    error::TensorGenError,
    tensor::{Tensor, TensorAllocator},
    util::{ensure_rows_written, resize_tensor},
    TrainingGenerator, Transition,
};
use anyhow::Result;
use std::sync::Arc;

/// Writes discrete actions, `tensor[index, j]` being branch `j` of transition
/// `index`.
///
/// Every transition must have one action per column of the tensor.
pub struct ActionInputGenerator {
    allocator: Arc<dyn TensorAllocator>,
}

impl ActionInputGenerator {
    /// Creates the generator.
    pub fn new(allocator: Arc<dyn TensorAllocator>) -> Self {
        Self { allocator }
    }
}

impl TrainingGenerator for ActionInputGenerator {
    fn generate(
        &self,
        tensor: &mut Tensor,
        batch_size: usize,
        transitions: &[&Transition],
        _training_state: &Tensor,
    ) -> Result<()> {
        resize_tensor(tensor, batch_size, self.allocator.as_ref());
        let dims = tensor.dims3();
        let n_branches = dims.iter().product::<usize>();
        let rows = transitions.len().min(batch_size);
        for (index, tr) in transitions.iter().take(rows).enumerate() {
            let actions = &tr.action().discrete_actions;
            if actions.len() != n_branches {
                return Err(TensorGenError::ShapeMismatch {
                    source_dims: [1, 1, actions.len()],
                    target_dims: dims,
                }
                .into());
            }
            for (j, &a) in actions.iter().enumerate() {
                tensor.set(&[index, j], a as f32)?;
            }
        }
        ensure_rows_written(tensor.name(), batch_size, rows)
    }
}
