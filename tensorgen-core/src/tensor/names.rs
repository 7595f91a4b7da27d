//! Names of the tensors fed to a training model.

/// Observations of the agents, `[batch, height, width, channels]`.
pub const OBSERVATIONS: &str = "obs_0";

/// Observations after the actions were applied.
pub const NEXT_OBSERVATIONS: &str = "next_obs_0";

/// Discrete actions, `[batch, n_branches]`.
pub const ACTION_INPUT: &str = "action_in";

/// Rewards, `[batch, 1]`.
pub const REWARD_INPUT: &str = "reward_in";

/// Episode termination flags, `[batch, 1]`.
pub const DONE_INPUT: &str = "done_in";

/// Learning rate, `[1, 1]`.
pub const LEARNING_RATE: &str = "lr";

/// Discount factor, `[1, 1]`.
pub const GAMMA: &str = "gamma";

/// Batch size, `[1, 1]`.
pub const BATCH_SIZE_PLACEHOLDER: &str = "batch_size";

/// Training state carried over from the previous training step.
pub const TRAINING_STATE_IN: &str = "training_state_in";
