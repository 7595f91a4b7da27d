//! Generators populating the tensors of a training step.
//!
//! Each generator fills a single named tensor from a batch of
//! [`Transition`](crate::Transition)s. They are registered by name in
//! [`TrainingTensorGenerator`](crate::TrainingTensorGenerator).
mod action;
mod batch_size;
mod constant;
mod done;
mod observation;
mod reward;
mod training_state;
pub use action::ActionInputGenerator;
pub use batch_size::TrainingBatchSizeGenerator;
pub use constant::ConstantGenerator;
pub use done::DoneInputGenerator;
pub use observation::{CopyObservationGenerator, ObservationSource};
pub use reward::RewardInputGenerator;
pub use training_state::TrainingStateGenerator;
