//! Transition and actions.
use crate::{error::TensorGenError, tensor::Tensor};
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Actions taken by an agent in a step.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ActionBuffers {
    /// Continuous actions.
    pub continuous_actions: Vec<f32>,

    /// Discrete actions, one index per action branch.
    pub discrete_actions: Vec<i32>,
}

impl ActionBuffers {
    /// Creates action buffers.
    pub fn new(continuous_actions: Vec<f32>, discrete_actions: Vec<i32>) -> Self {
        Self {
            continuous_actions,
            discrete_actions,
        }
    }

    /// Creates action buffers with discrete actions only.
    pub fn discrete(discrete_actions: Vec<i32>) -> Self {
        Self::new(vec![], discrete_actions)
    }
}

/// One step of experience of an agent: `(o_t, a_t, r_t, is_done_t, o_t+1)`.
///
/// Each observation is a tensor of batch size 1 and shape
/// `1 x height x width x channels`, one per sensor of the agent. A vector
/// observation is a `1 x 1 x 1 x n` tensor.
///
/// A transition cannot be modified after it is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    state: Vec<Tensor>,
    action: ActionBuffers,
    reward: f32,
    done: bool,
    next_state: Vec<Tensor>,
}

impl Transition {
    /// Creates a transition.
    ///
    /// `state` and `next_state` must have the same number of sensors, and the
    /// observations of a sensor must have the same shape in both.
    pub fn new(
        state: Vec<Tensor>,
        action: ActionBuffers,
        reward: f32,
        done: bool,
        next_state: Vec<Tensor>,
    ) -> Result<Self> {
        ensure!(
            state.len() == next_state.len(),
            "{} sensors in state, {} in next state",
            state.len(),
            next_state.len()
        );
        for (o, o_next) in state.iter().zip(next_state.iter()) {
            if o.dims3() != o_next.dims3() {
                return Err(TensorGenError::ShapeMismatch {
                    source_dims: o.dims3(),
                    target_dims: o_next.dims3(),
                }
                .into());
            }
        }

        Ok(Self {
            state,
            action,
            reward,
            done,
            next_state,
        })
    }

    /// Observations before the action, one per sensor.
    pub fn state(&self) -> &[Tensor] {
        &self.state
    }

    /// Action taken.
    pub fn action(&self) -> &ActionBuffers {
        &self.action
    }

    /// Reward.
    pub fn reward(&self) -> f32 {
        self.reward
    }

    /// `true` if the episode terminated at this step.
    pub fn done(&self) -> bool {
        self.done
    }

    /// Observations after the action, one per sensor.
    pub fn next_state(&self) -> &[Tensor] {
        &self.next_state
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn obs(values: Vec<f32>) -> Tensor {
        Tensor::vector_observation("obs", values).unwrap()
    }

    #[test]
    fn test_new() {
        let tr = Transition::new(
            vec![obs(vec![0.0, 1.0])],
            ActionBuffers::discrete(vec![1]),
            0.5,
            true,
            vec![obs(vec![1.0, 2.0])],
        )
        .unwrap();
        assert_eq!(tr.reward(), 0.5);
        assert!(tr.done());
        assert_eq!(tr.action().discrete_actions, vec![1]);
        assert_eq!(tr.next_state()[0].get(&[0, 1]).unwrap(), 2.0);
    }

    #[test]
    fn test_new_shape_mismatch() {
        let err = Transition::new(
            vec![obs(vec![0.0, 1.0])],
            ActionBuffers::default(),
            0.0,
            false,
            vec![obs(vec![1.0, 2.0, 3.0])],
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<TensorGenError>(),
            Some(&TensorGenError::ShapeMismatch {
                source_dims: [1, 1, 2],
                target_dims: [1, 1, 3],
            })
        );

        assert!(Transition::new(
            vec![obs(vec![0.0])],
            ActionBuffers::default(),
            0.0,
            false,
            vec![]
        )
        .is_err());
    }
}
