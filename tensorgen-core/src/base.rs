//! Core interfaces.
mod experience_buffer;
mod generator;
pub use experience_buffer::ExperienceBufferBase;
pub use generator::TrainingGenerator;
