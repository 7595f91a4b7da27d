//! Generator copying observations of a sensor.
use crate::{
    error::TensorGenError,
    tensor::{Tensor, TensorAllocator},
    util::{copy_tensor_to_batch, ensure_rows_written, resize_tensor},
    TrainingGenerator, Transition,
};
use anyhow::Result;
use std::sync::Arc;

/// Side of a transition observations are taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationSource {
    /// Observations before the action, `o_t`.
    State,

    /// Observations after the action, `o_t+1`.
    NextState,
}

/// Copies the observation of one sensor of every transition into the rows of
/// the tensor.
pub struct CopyObservationGenerator {
    allocator: Arc<dyn TensorAllocator>,
    source: ObservationSource,
    sensor_index: usize,
}

impl CopyObservationGenerator {
    /// Creates a generator reading sensor 0.
    pub fn new(allocator: Arc<dyn TensorAllocator>, source: ObservationSource) -> Self {
        Self {
            allocator,
            source,
            sensor_index: 0,
        }
    }

    /// Sets the index of the sensor to be copied.
    pub fn set_sensor_index(&mut self, index: usize) {
        self.sensor_index = index;
    }

    fn sensor<'a>(&self, tr: &'a Transition) -> Result<&'a Tensor> {
        let obs = match self.source {
            ObservationSource::State => tr.state(),
            ObservationSource::NextState => tr.next_state(),
        };
        obs.get(self.sensor_index).ok_or_else(|| {
            TensorGenError::IndexOutOfRange {
                index: vec![self.sensor_index],
                shape: [obs.len(), 1, 1, 1],
            }
            .into()
        })
    }
}

impl TrainingGenerator for CopyObservationGenerator {
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
            copy_tensor_to_batch(self.sensor(tr)?, tensor, index)?;
        }
        ensure_rows_written(tensor.name(), batch_size, rows)
    }
}
