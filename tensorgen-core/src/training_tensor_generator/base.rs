//! Orchestrator of the tensor generators.
use super::{ModelDescription, TrainingTensorGeneratorConfig};
use crate::{
    error::TensorGenError,
    generator::{
        ActionInputGenerator, ConstantGenerator, CopyObservationGenerator, DoneInputGenerator,
        ObservationSource, RewardInputGenerator, TrainingBatchSizeGenerator,
        TrainingStateGenerator,
    },
    tensor::{names, Tensor, TensorAllocator},
    TrainingGenerator, Transition,
};
use anyhow::Result;
use log::{debug, info, trace, warn};
use std::{collections::HashMap, sync::Arc};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Populates the input tensors of a training step from a batch of transitions.
///
/// A generator is registered for every well-known input name (see
/// [`names`](crate::tensor::names)) when the object is built. The registry is
/// not modified afterwards.
///
/// ```mermaid
/// graph LR
///     TransitionStore -->|as_batch| Batch
///     Batch --> TrainingTensorGenerator
///     TrainingState --> TrainingTensorGenerator
///     TrainingTensorGenerator -->|generate_tensors| Tensors
///     Tensors --> Backend
/// ```
///
/// One object serves a single training session and is driven from a single
/// thread. Run one object with its own tensors per thread to generate batches
/// in parallel.
pub struct TrainingTensorGenerator {
    generators: HashMap<String, Box<dyn TrainingGenerator>>,
    seed: i32,
}

impl TrainingTensorGenerator {
    /// Builds the generator registry.
    ///
    /// Without a model description, no generator is registered and every call
    /// of [`TrainingTensorGenerator::generate_tensors`] fails with
    /// [`TensorGenError::UnknownTensor`].
    pub fn new(
        config: &TrainingTensorGeneratorConfig,
        allocator: Arc<dyn TensorAllocator>,
        model: Option<&ModelDescription>,
    ) -> Self {
        let mut generators: HashMap<String, Box<dyn TrainingGenerator>> = HashMap::new();

        match model {
            None => {
                warn!("No model given, tensors cannot be generated");
            }
            Some(model) => {
                let mut obs_gen =
                    CopyObservationGenerator::new(allocator.clone(), ObservationSource::State);
                obs_gen.set_sensor_index(config.sensor_index);
                let mut next_obs_gen =
                    CopyObservationGenerator::new(allocator.clone(), ObservationSource::NextState);
                next_obs_gen.set_sensor_index(config.sensor_index);

                generators.insert(names::OBSERVATIONS.into(), Box::new(obs_gen));
                generators.insert(names::NEXT_OBSERVATIONS.into(), Box::new(next_obs_gen));
                generators.insert(
                    names::ACTION_INPUT.into(),
                    Box::new(ActionInputGenerator::new(allocator.clone())),
                );
                generators.insert(
                    names::REWARD_INPUT.into(),
                    Box::new(RewardInputGenerator::new(allocator.clone())),
                );
                generators.insert(
                    names::DONE_INPUT.into(),
                    Box::new(DoneInputGenerator::new(allocator.clone())),
                );
                generators.insert(
                    names::LEARNING_RATE.into(),
                    Box::new(ConstantGenerator::new(allocator.clone(), config.learning_rate)),
                );
                generators.insert(
                    names::GAMMA.into(),
                    Box::new(ConstantGenerator::new(allocator.clone(), config.gamma)),
                );
                generators.insert(
                    names::BATCH_SIZE_PLACEHOLDER.into(),
                    Box::new(TrainingBatchSizeGenerator::new(allocator.clone())),
                );
                generators.insert(
                    names::TRAINING_STATE_IN.into(),
                    Box::new(TrainingStateGenerator::new(allocator)),
                );

                for name in model.input_names() {
                    if !generators.contains_key(name) {
                        warn!("Model input {} has no generator", name);
                    }
                }
                info!(
                    "Built training tensor generator with {} generators",
                    generators.len()
                );
            }
        }

        Self {
            generators,
            seed: config.seed,
        }
    }

    /// Populates the data of `tensors` from a batch of transitions.
    ///
    /// Tensors are processed in the given order. The observation and batch size
    /// inputs are left untouched unless `is_training` is `true`.
    ///
    /// # Errors
    ///
    /// * [`TensorGenError::ShapeConflict`] if two tensors share a name with
    ///   different non-batch dimensions. No tensor is modified.
    /// * [`TensorGenError::UnknownTensor`] for the first tensor without a
    ///   generator. Tensors before it are already populated, tensors after it
    ///   are left untouched.
    /// * Any error of a generator, e.g., [`TensorGenError::CorruptBatch`] when
    ///   fewer than `batch_size` transitions are given.
    pub fn generate_tensors(
        &self,
        tensors: &mut [Tensor],
        batch_size: usize,
        transitions: &[&Transition],
        training_state: &Tensor,
        is_training: bool,
    ) -> Result<()> {
        check_shapes(tensors)?;

        for tensor in tensors.iter_mut() {
            let generator = self
                .generators
                .get(tensor.name())
                .ok_or_else(|| TensorGenError::UnknownTensor(tensor.name().to_string()))?;

            if !is_training && is_training_only(tensor.name()) {
                debug!("Skipped {} out of training", tensor.name());
                continue;
            }

            trace!("Generating {} with batch size {}", tensor.name(), batch_size);
            generator.generate(tensor, batch_size, transitions, training_state)?;
        }
        Ok(())
    }

    /// Returns `true` if a generator is registered for `name`.
    pub fn has_generator(&self, name: &str) -> bool {
        self.generators.contains_key(name)
    }

    /// Returns the names of registered generators in alphabetical order.
    pub fn generator_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.generators.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the random seed of the session.
    pub fn seed(&self) -> i32 {
        self.seed
    }
}

/// Inputs that are generated only in training mode.
fn is_training_only(name: &str) -> bool {
    name == names::OBSERVATIONS || name == names::BATCH_SIZE_PLACEHOLDER
}

/// Tensors sharing a name must agree on the non-batch dimensions.
fn check_shapes(tensors: &[Tensor]) -> Result<()> {
    let mut dims: HashMap<&str, [usize; 3]> = HashMap::new();
    for tensor in tensors.iter() {
        let d = tensor.data_shape(1).dims3();
        match dims.get(tensor.name()) {
            Some(d_) if *d_ != d => {
                return Err(TensorGenError::ShapeConflict(tensor.name().to_string()).into())
            }
            Some(_) => {}
            None => {
                dims.insert(tensor.name(), d);
            }
        }
    }
    Ok(())
}
