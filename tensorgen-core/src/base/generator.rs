//! Interface of tensor generators.
use crate::{tensor::Tensor, Transition};
use anyhow::Result;

/// Populates the data of one named tensor from a batch of transitions.
///
/// An implementation must
///
/// * resize `tensor` to `batch_size`, unless it produces a broadcast scalar
///   (batch size 1) or follows the batch of `training_state`,
/// * write every row of the resized tensor,
/// * leave `transitions` and `training_state` untouched.
///
/// Generators are registered by tensor name in
/// [`TrainingTensorGenerator`](crate::TrainingTensorGenerator).
pub trait TrainingGenerator {
    /// Writes the data of `tensor`.
    fn generate(
        &self,
        tensor: &mut Tensor,
        batch_size: usize,
        transitions: &[&Transition],
        training_state: &Tensor,
    ) -> Result<()>;
}
