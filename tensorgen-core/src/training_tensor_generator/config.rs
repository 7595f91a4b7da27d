//! Configuration of [`TrainingTensorGenerator`](super::TrainingTensorGenerator).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TrainingTensorGenerator`](super::TrainingTensorGenerator).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TrainingTensorGeneratorConfig {
    /// Random seed of the session.
    pub seed: i32,

    /// Learning rate written into the learning rate input.
    pub learning_rate: f32,

    /// Discount factor written into the gamma input.
    pub gamma: f32,

    /// Sensor whose observations are copied into the observation inputs.
    pub sensor_index: usize,
}

impl Default for TrainingTensorGeneratorConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            learning_rate: 0.0003,
            gamma: 0.99,
            sensor_index: 0,
        }
    }
}

impl TrainingTensorGeneratorConfig {
    /// Sets the random seed.
    pub fn seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the learning rate.
    pub fn learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the discount factor.
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    /// Sets the index of the sensor copied into the observation inputs.
    pub fn sensor_index(mut self, sensor_index: usize) -> Self {
        self.sensor_index = sensor_index;
        self
    }

    /// Loads [`TrainingTensorGeneratorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TrainingTensorGeneratorConfig`] as YAML file.
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
    fn test_serde_training_tensor_generator_config() -> Result<()> {
        let config = TrainingTensorGeneratorConfig::default()
            .seed(3)
            .learning_rate(0.001)
            .gamma(0.9)
            .sensor_index(1);

        let dir = TempDir::new("training_tensor_generator_config")?;
        let path = dir.path().join("training_tensor_generator_config.yaml");
        config.save(&path)?;
        let config_ = TrainingTensorGeneratorConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
