//! Transitions of agents and their store.
mod base;
mod config;
mod store;
pub use base::{ActionBuffers, Transition};
pub use config::TransitionStoreConfig;
pub use store::TransitionStore;
