//! Contiguous data buffer of a tensor.
use super::{allocator::BufferPool, TensorShape};
use anyhow::{ensure, Result};
use std::{
    fmt,
    sync::{Mutex, Weak},
};

/// A zero-initialised, contiguous `f32` buffer with its [`TensorShape`].
///
/// The buffer is released when the value is dropped. Buffers handed out by
/// [`CachingAllocator`](super::CachingAllocator) go back to the pool of that
/// allocator, if it still exists.
pub struct TensorData {
    shape: TensorShape,
    buf: Vec<f32>,
    pool: Option<Weak<Mutex<BufferPool>>>,
}

impl TensorData {
    /// Allocates a zeroed buffer that is not tied to any allocator.
    pub fn new(shape: TensorShape) -> Self {
        Self {
            shape,
            buf: vec![0.0; shape.length()],
            pool: None,
        }
    }

    /// Wraps the given values.
    pub fn from_vec(shape: TensorShape, buf: Vec<f32>) -> Result<Self> {
        ensure!(
            buf.len() == shape.length(),
            "{} values given for shape {:?}",
            buf.len(),
            shape.dims4()
        );
        Ok(Self {
            shape,
            buf,
            pool: None,
        })
    }

    pub(super) fn pooled(shape: TensorShape, buf: Vec<f32>, pool: Weak<Mutex<BufferPool>>) -> Self {
        debug_assert_eq!(buf.len(), shape.length());
        Self {
            shape,
            buf,
            pool: Some(pool),
        }
    }

    /// Returns the shape of the buffer.
    pub fn shape(&self) -> TensorShape {
        self.shape
    }

    /// Returns the batch size.
    pub fn batch(&self) -> usize {
        self.shape.batch
    }

    /// Returns the value at the given index.
    ///
    /// See [`TensorShape::offset`] for accepted indices.
    pub fn get(&self, index: &[usize]) -> Result<f32> {
        let offset = self.shape.offset(index)?;
        Ok(self.buf[offset])
    }

    /// Sets the value at the given index.
    pub fn set(&mut self, index: &[usize], value: f32) -> Result<()> {
        let offset = self.shape.offset(index)?;
        self.buf[offset] = value;
        Ok(())
    }

    /// Returns the whole buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.buf
    }

    /// Returns the whole buffer.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.buf
    }

    /// Returns the values of a batch row, if it exists.
    pub fn row(&self, batch_index: usize) -> Option<&[f32]> {
        let w = self.shape.flat_width();
        match batch_index < self.shape.batch {
            true => Some(&self.buf[batch_index * w..(batch_index + 1) * w]),
            false => None,
        }
    }

    /// Returns the values of a batch row, if it exists.
    pub fn row_mut(&mut self, batch_index: usize) -> Option<&mut [f32]> {
        let w = self.shape.flat_width();
        match batch_index < self.shape.batch {
            true => Some(&mut self.buf[batch_index * w..(batch_index + 1) * w]),
            false => None,
        }
    }
}

impl Clone for TensorData {
    /// Deep copy. The copy is not tied to any allocator.
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            buf: self.buf.clone(),
            pool: None,
        }
    }
}

impl PartialEq for TensorData {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.buf == other.buf
    }
}

impl fmt::Debug for TensorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorData")
            .field("shape", &self.shape.dims4())
            .field("buf", &self.buf)
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}

impl Drop for TensorData {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.as_ref().and_then(Weak::upgrade) {
            let buf = std::mem::take(&mut self.buf);
            let mut pool = match pool.lock() {
                Ok(pool) => pool,
                Err(poisoned) => poisoned.into_inner(),
            };
            pool.release(buf);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zeroed() {
        let data = TensorData::new(TensorShape::new(3, 2, 2, 1));
        assert_eq!(data.as_slice().len(), 12);
        assert!(data.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_get_set() -> Result<()> {
        let mut data = TensorData::new(TensorShape::from_dims(&[2, 3]).unwrap());
        data.set(&[1, 2], 5.0)?;
        assert_eq!(data.get(&[1, 2])?, 5.0);
        assert_eq!(data.get(&[1, 0, 0, 2])?, 5.0);
        assert_eq!(data.get(&[5])?, 5.0);
        assert_eq!(data.row(1), Some(&[0.0, 0.0, 5.0][..]));
        assert_eq!(data.row(2), None);
        assert!(data.set(&[2, 0], 1.0).is_err());
        Ok(())
    }

    #[test]
    fn test_from_vec_length() {
        let shape = TensorShape::from_dims(&[2, 2]).unwrap();
        assert!(TensorData::from_vec(shape, vec![1.0, 2.0, 3.0]).is_err());
        assert!(TensorData::from_vec(shape, vec![1.0, 2.0, 3.0, 4.0]).is_ok());
    }
}
