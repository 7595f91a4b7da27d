//! Store of transitions.
use super::{Transition, TransitionStoreConfig};
use crate::{error::TensorGenError, ExperienceBufferBase};
use anyhow::{bail, Result};
use log::trace;
use rand::{rngs::StdRng, RngCore, SeedableRng};

/// Ordered, append-only store of [`Transition`]s.
///
/// Transitions are pushed by the agent-stepping loop during an episode. A batch
/// handed to [`TrainingTensorGenerator`](crate::TrainingTensorGenerator) is a
/// vector of references into the store, so the store cannot be cleared while
/// the batch is in use.
///
/// ```
/// use tensorgen_core::{
///     tensor::Tensor, ActionBuffers, ExperienceBufferBase, Transition, TransitionStore,
///     TransitionStoreConfig,
/// };
/// # fn main() -> anyhow::Result<()> {
/// let mut store = TransitionStore::build(&TransitionStoreConfig::default());
/// let obs = Tensor::vector_observation("obs", vec![0.0, 1.0])?;
/// let act = ActionBuffers::discrete(vec![1]);
/// let tr = Transition::new(vec![obs.clone()], act, 1.0, false, vec![obs])?;
/// store.push(tr)?;
///
/// let batch = store.as_batch(&[0])?;
/// assert_eq!(batch[0].reward(), 1.0);
/// # Ok(())
/// # }
/// ```
pub struct TransitionStore {
    transitions: Vec<Transition>,
    rng: StdRng,
}

impl TransitionStore {
    /// Builds an empty store.
    pub fn build(config: &TransitionStoreConfig) -> Self {
        Self {
            transitions: Vec::with_capacity(config.capacity),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Returns `true` if the store holds no transition.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Returns the transitions at the given indices, in the given order.
    ///
    /// The returned references are valid until the next call of
    /// [`TransitionStore::clear`].
    pub fn as_batch(&self, ixs: &[usize]) -> Result<Vec<&Transition>> {
        ixs.iter()
            .map(|&ix| match self.transitions.get(ix) {
                Some(tr) => Ok(tr),
                None => Err(TensorGenError::IndexOutOfRange {
                    index: vec![ix],
                    shape: [self.transitions.len(), 1, 1, 1],
                }
                .into()),
            })
            .collect()
    }

    /// Returns all transitions in insertion order.
    pub fn as_whole_batch(&self) -> Vec<&Transition> {
        self.transitions.iter().collect()
    }

    /// Samples `size` transitions uniformly with replacement.
    pub fn sample(&mut self, size: usize) -> Result<Vec<&Transition>> {
        if self.transitions.is_empty() {
            bail!("Cannot sample {} transitions from an empty store", size);
        }
        let len = self.transitions.len();
        let ixs = (0..size)
            .map(|_| (self.rng.next_u32() as usize) % len)
            .collect::<Vec<_>>();
        trace!("Sampled transitions {:?}", ixs);
        self.as_batch(&ixs)
    }

    /// Removes every transition.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

impl ExperienceBufferBase for TransitionStore {
    type Item = Transition;

    fn push(&mut self, tr: Transition) -> Result<()> {
        self.transitions.push(tr);
        Ok(())
    }

    fn len(&self) -> usize {
        self.transitions.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{tensor::Tensor, ActionBuffers};

    fn transition(reward: f32) -> Transition {
        let obs = Tensor::vector_observation("obs", vec![reward]).unwrap();
        Transition::new(
            vec![obs.clone()],
            ActionBuffers::discrete(vec![0]),
            reward,
            false,
            vec![obs],
        )
        .unwrap()
    }

    fn store(n: usize) -> TransitionStore {
        let mut store = TransitionStore::build(&TransitionStoreConfig::default());
        for i in 0..n {
            store.push(transition(i as f32)).unwrap();
        }
        store
    }

    #[test]
    fn test_push_and_as_batch() -> Result<()> {
        let store = store(4);
        assert_eq!(store.len(), 4);

        let batch = store.as_batch(&[3, 0, 3])?;
        let rewards: Vec<f32> = batch.iter().map(|tr| tr.reward()).collect();
        assert_eq!(rewards, vec![3.0, 0.0, 3.0]);
        Ok(())
    }

    #[test]
    fn test_as_batch_out_of_range() {
        let store = store(2);
        let err = store.as_batch(&[0, 2]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TensorGenError>(),
            Some(TensorGenError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_clear() {
        let mut store = store(3);
        assert_eq!(store.as_whole_batch().len(), 3);
        store.clear();
        assert!(store.is_empty());
        assert!(store.as_batch(&[0]).is_err());
    }

    #[test]
    fn test_sample() -> Result<()> {
        let mut store = store(5);
        let rewards1: Vec<f32> = store.sample(16)?.iter().map(|tr| tr.reward()).collect();
        assert_eq!(rewards1.len(), 16);
        assert!(rewards1.iter().all(|&r| r >= 0.0 && r < 5.0));

        // Same seed, same samples.
        let mut store2 = store_with_seed(5, 42);
        let rewards2: Vec<f32> = store2.sample(16)?.iter().map(|tr| tr.reward()).collect();
        assert_eq!(rewards1, rewards2);

        let mut empty = store_with_seed(0, 42);
        assert!(empty.sample(1).is_err());
        Ok(())
    }

    fn store_with_seed(n: usize, seed: u64) -> TransitionStore {
        let mut store = TransitionStore::build(&TransitionStoreConfig::default().seed(seed));
        for i in 0..n {
            store.push(transition(i as f32)).unwrap();
        }
        store
    }
}
