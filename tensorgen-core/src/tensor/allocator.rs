//! Allocators of tensor data.
use super::{TensorData, TensorShape};
use log::trace;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

/// Allocates data buffers of tensors.
///
/// Generators hold a shared handle (`Arc<dyn TensorAllocator>`) and call
/// [`TensorAllocator::alloc`] when a tensor is resized. The buffer is released
/// when the returned [`TensorData`] is dropped.
pub trait TensorAllocator: Send + Sync {
    /// Returns a zeroed buffer of the given shape.
    fn alloc(&self, shape: TensorShape) -> TensorData;

    /// Releases cached memory unless `keep_cached_memory` is `true`.
    fn reset(&self, keep_cached_memory: bool);
}

/// Allocates every buffer on the heap and frees it on drop.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl TensorAllocator for HeapAllocator {
    fn alloc(&self, shape: TensorShape) -> TensorData {
        TensorData::new(shape)
    }

    fn reset(&self, _keep_cached_memory: bool) {}
}

/// Number of released buffers of the same length kept by default.
pub const DEFAULT_MAX_CACHED_PER_LEN: usize = 8;

/// Released buffers, keyed by their length.
#[derive(Debug)]
pub struct BufferPool {
    free: HashMap<usize, Vec<Vec<f32>>>,
    max_cached_per_len: usize,
    n_allocs: usize,
    n_reuses: usize,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self {
            free: HashMap::new(),
            max_cached_per_len: DEFAULT_MAX_CACHED_PER_LEN,
            n_allocs: 0,
            n_reuses: 0,
        }
    }
}

impl BufferPool {
    pub(super) fn release(&mut self, buf: Vec<f32>) {
        if buf.is_empty() {
            return;
        }
        let bufs = self.free.entry(buf.len()).or_insert_with(Vec::new);
        if bufs.len() < self.max_cached_per_len {
            trace!("Returned a buffer of length {} to the pool", buf.len());
            bufs.push(buf);
        } else {
            trace!("Freed a buffer of length {}, the pool is full", buf.len());
        }
    }

    fn take(&mut self, len: usize) -> Vec<f32> {
        match self.free.get_mut(&len).and_then(|bufs| bufs.pop()) {
            Some(mut buf) => {
                self.n_reuses += 1;
                buf.iter_mut().for_each(|v| *v = 0.0);
                buf
            }
            None => {
                self.n_allocs += 1;
                vec![0.0; len]
            }
        }
    }

    fn n_cached(&self) -> usize {
        self.free.values().map(|bufs| bufs.len()).sum()
    }
}

/// Reuses buffers released by dropped [`TensorData`].
///
/// Resizing a tensor back and forth between a few batch sizes, which is what
/// happens from one training step to the next, does not hit the heap once the
/// pool is warm.
///
/// At most [`DEFAULT_MAX_CACHED_PER_LEN`] buffers of each length are kept,
/// further ones are freed. Buffers of lengths that are not requested anymore
/// stay in the pool until [`TensorAllocator::reset`] is called with `false`.
#[derive(Debug, Default, Clone)]
pub struct CachingAllocator {
    pool: Arc<Mutex<BufferPool>>,
}

impl CachingAllocator {
    /// Creates an allocator with an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator keeping at most `max_cached_per_len` released
    /// buffers of each length.
    pub fn with_max_cached_per_len(max_cached_per_len: usize) -> Self {
        let pool = BufferPool {
            max_cached_per_len,
            ..BufferPool::default()
        };
        Self {
            pool: Arc::new(Mutex::new(pool)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BufferPool> {
        match self.pool.lock() {
            Ok(pool) => pool,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Number of buffers waiting in the pool.
    pub fn n_cached(&self) -> usize {
        self.lock().n_cached()
    }

    /// Number of buffers taken from the heap so far.
    pub fn n_allocs(&self) -> usize {
        self.lock().n_allocs
    }

    /// Number of buffers served from the pool so far.
    pub fn n_reuses(&self) -> usize {
        self.lock().n_reuses
    }
}

impl TensorAllocator for CachingAllocator {
    fn alloc(&self, shape: TensorShape) -> TensorData {
        let buf = self.lock().take(shape.length());
        TensorData::pooled(shape, buf, Arc::downgrade(&self.pool))
    }

    fn reset(&self, keep_cached_memory: bool) {
        if !keep_cached_memory {
            let mut pool = self.lock();
            trace!("Dropped {} cached buffers", pool.n_cached());
            pool.free.clear();
        }
    }
}
