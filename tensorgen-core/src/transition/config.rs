//! Configuration of [`TransitionStore`](super::TransitionStore).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`TransitionStore`](super::TransitionStore).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct TransitionStoreConfig {
    /// Number of transitions reserved up front.
    pub capacity: usize,

    /// Random seed used by [`TransitionStore::sample`](super::TransitionStore::sample).
    pub seed: u64,
}

impl Default for TransitionStoreConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            seed: 42,
        }
    }
}

impl TransitionStoreConfig {
    /// Sets the number of transitions reserved up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Loads [`TransitionStoreConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`TransitionStoreConfig`] as YAML file.
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
    fn test_serde_transition_store_config() -> Result<()> {
        let config = TransitionStoreConfig::default().capacity(64).seed(7);

        let dir = TempDir::new("transition_store_config")?;
        let path = dir.path().join("transition_store_config.yaml");
        config.save(&path)?;
        let config_ = TransitionStoreConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
