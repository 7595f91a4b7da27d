//! Tensors, their data buffers and allocators.
mod allocator;
mod base;
mod data;
pub mod names;
mod shape;
pub use allocator::{
    BufferPool, CachingAllocator, HeapAllocator, TensorAllocator, DEFAULT_MAX_CACHED_PER_LEN,
};
pub use base::{Tensor, TensorValueType};
pub use data::TensorData;
pub use shape::TensorShape;
