//! Generation of the input tensors of a training step.
mod base;
mod config;
mod model;
pub use base::TrainingTensorGenerator;
pub use config::TrainingTensorGeneratorConfig;
pub use model::{ModelDescription, TensorSpec};
