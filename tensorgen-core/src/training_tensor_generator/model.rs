//! Description of the inputs of a training model.
use crate::tensor::{names, Tensor, TensorValueType};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Declared input of a model.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TensorSpec {
    /// Name of the tensor.
    pub name: String,

    /// Shape of the tensor, batch dimension first. `-1` denotes a dynamic dimension.
    pub shape: Vec<i64>,

    /// Type of the values.
    #[serde(default)]
    pub value_type: TensorValueType,
}

impl TensorSpec {
    /// Creates a floating point input.
    pub fn new(name: impl Into<String>, shape: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            shape,
            value_type: TensorValueType::FloatingPoint,
        }
    }

    /// Sets the value type.
    pub fn value_type(mut self, value_type: TensorValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Creates a tensor without data following this declaration.
    pub fn to_tensor(&self) -> Tensor {
        Tensor::new(self.name.clone(), self.value_type, self.shape.clone())
    }
}

/// Metadata of a parsed training model.
///
/// Only the inputs are needed to drive the tensor generation.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
pub struct ModelDescription {
    /// Inputs of the model.
    pub inputs: Vec<TensorSpec>,
}

impl ModelDescription {
    /// Creates a description with the given inputs.
    pub fn new(inputs: Vec<TensorSpec>) -> Self {
        Self { inputs }
    }

    /// Describes a model consuming every training input.
    ///
    /// * `obs_shape` - `[height, width, channels]` of the observation of sensor 0.
    /// * `n_branches` - Number of discrete action branches.
    /// * `training_state_size` - Length of a row of the training state.
    pub fn training(obs_shape: [usize; 3], n_branches: usize, training_state_size: usize) -> Self {
        let [h, w, c] = obs_shape;
        let obs = vec![-1, h as i64, w as i64, c as i64];
        Self::new(vec![
            TensorSpec::new(names::OBSERVATIONS, obs.clone()),
            TensorSpec::new(names::NEXT_OBSERVATIONS, obs),
            TensorSpec::new(names::ACTION_INPUT, vec![-1, n_branches as i64])
                .value_type(TensorValueType::Integer),
            TensorSpec::new(names::REWARD_INPUT, vec![-1, 1]),
            TensorSpec::new(names::DONE_INPUT, vec![-1, 1]),
            TensorSpec::new(names::LEARNING_RATE, vec![1, 1]),
            TensorSpec::new(names::GAMMA, vec![1, 1]),
            TensorSpec::new(names::BATCH_SIZE_PLACEHOLDER, vec![1, 1])
                .value_type(TensorValueType::Integer),
            TensorSpec::new(names::TRAINING_STATE_IN, vec![-1, training_state_size as i64]),
        ])
    }

    /// Returns the names of the inputs.
    pub fn input_names(&self) -> Vec<&str> {
        self.inputs.iter().map(|spec| spec.name.as_str()).collect()
    }

    /// Creates a tensor without data for every input, in declaration order.
    pub fn input_tensors(&self) -> Vec<Tensor> {
        self.inputs.iter().map(TensorSpec::to_tensor).collect()
    }

    /// Loads [`ModelDescription`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`ModelDescription`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_serde_model_description() -> Result<()> {
        let model = ModelDescription::training([2, 2, 1], 2, 4);

        let dir = TempDir::new("model_description")?;
        let path = dir.path().join("model.yaml");
        model.save(&path)?;
        let model_ = ModelDescription::load(&path)?;
        assert_eq!(model, model_);
        Ok(())
    }

    #[test]
    fn test_value_type_defaults_to_floating_point() -> Result<()> {
        let yaml = "inputs:\n  - name: reward_in\n    shape: [-1, 1]\n";
        let model: ModelDescription = serde_yaml::from_str(yaml)?;
        assert_eq!(model.inputs[0].value_type, TensorValueType::FloatingPoint);
        assert_eq!(model.input_names(), vec!["reward_in"]);
        Ok(())
    }

    #[test]
    fn test_input_tensors() {
        let tensors = ModelDescription::training([3, 4, 2], 3, 8).input_tensors();
        assert_eq!(tensors.len(), 9);
        assert_eq!(tensors[0].dims3(), [3, 4, 2]);
        assert_eq!(tensors[2].value_type(), TensorValueType::Integer);
        assert!(tensors.iter().all(|t| t.data().is_none()));
    }
}
