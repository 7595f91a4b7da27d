#![warn(missing_docs)]
//! Batching of agent transitions into the input tensors of a training model.
//!
//! Transitions recorded by an agent-stepping loop are stored in a
//! [`TransitionStore`]. At every training step a batch of them is handed to a
//! [`TrainingTensorGenerator`], which populates each requested [`Tensor`](tensor::Tensor) in
//! place with the generator registered under the tensor's name.
//!
//! ```
//! use std::sync::Arc;
//! use tensorgen_core::{
//!     tensor::{names, CachingAllocator, Tensor},
//!     ActionBuffers, ExperienceBufferBase, ModelDescription, TrainingTensorGenerator,
//!     TrainingTensorGeneratorConfig, Transition, TransitionStore, TransitionStoreConfig,
//! };
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut store = TransitionStore::build(&TransitionStoreConfig::default());
//! for i in 0..4 {
//!     let obs = Tensor::vector_observation("obs", vec![i as f32, 0.0])?;
//!     let next_obs = Tensor::vector_observation("obs", vec![i as f32, 1.0])?;
//!     let act = ActionBuffers::discrete(vec![i % 2]);
//!     store.push(Transition::new(vec![obs], act, 1.0, i == 3, vec![next_obs])?)?;
//! }
//!
//! let model = ModelDescription::training([1, 1, 2], 1, 4);
//! let config = TrainingTensorGeneratorConfig::default().learning_rate(0.001);
//! let allocator = Arc::new(CachingAllocator::new());
//! let generator = TrainingTensorGenerator::new(&config, allocator, Some(&model));
//!
//! let mut tensors = model.input_tensors();
//! let training_state = Tensor::vector_observation("state", vec![0.0; 4])?;
//! let batch = store.as_batch(&[0, 1, 2, 3])?;
//! generator.generate_tensors(&mut tensors, batch.len(), &batch, &training_state, true)?;
//!
//! let done = tensors.iter().find(|t| t.name() == names::DONE_INPUT).unwrap();
//! assert_eq!(done.data().unwrap().as_slice(), &[0.0, 0.0, 0.0, 1.0]);
//! # Ok(())
//! # }
//! ```
mod base;
pub mod error;
pub mod generator;
pub mod tensor;
mod training_tensor_generator;
mod transition;
pub mod util;
pub use base::{ExperienceBufferBase, TrainingGenerator};
pub use error::TensorGenError;
pub use training_tensor_generator::{
    ModelDescription, TensorSpec, TrainingTensorGenerator, TrainingTensorGeneratorConfig,
};
pub use transition::{ActionBuffers, Transition, TransitionStore, TransitionStoreConfig};
