//! Named tensor.
use super::{TensorAllocator, TensorData, TensorShape};
use crate::error::TensorGenError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Type of the values stored in a tensor.
///
/// Values are always held as `f32`; the type tells the backend how to read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum TensorValueType {
    /// Integer values, e.g., discrete actions.
    Integer,

    /// Floating point values.
    FloatingPoint,
}

impl Default for TensorValueType {
    fn default() -> Self {
        Self::FloatingPoint
    }
}

/// A named tensor given to or produced by a model.
///
/// `shape` is the declared shape of the tensor with the batch dimension first.
/// The batch dimension may be `-1` (dynamic); the other dimensions are fixed and
/// determine the shape of the buffer allocated by [`Tensor::resize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    name: String,
    value_type: TensorValueType,
    shape: Vec<i64>,
    data: Option<TensorData>,
}

impl Tensor {
    /// Creates a tensor without data.
    pub fn new(name: impl Into<String>, value_type: TensorValueType, shape: Vec<i64>) -> Self {
        Self {
            name: name.into(),
            value_type,
            shape,
            data: None,
        }
    }

    /// Creates a single observation of shape `1 x height x width x channels`.
    pub fn observation(
        name: impl Into<String>,
        height: usize,
        width: usize,
        channels: usize,
        values: Vec<f32>,
    ) -> Result<Self> {
        let data = TensorData::from_vec(TensorShape::new(1, height, width, channels), values)?;
        Ok(Self {
            name: name.into(),
            value_type: TensorValueType::FloatingPoint,
            shape: vec![-1, height as i64, width as i64, channels as i64],
            data: Some(data),
        })
    }

    /// Creates a vector observation of shape `1 x 1 x 1 x values.len()`.
    pub fn vector_observation(name: impl Into<String>, values: Vec<f32>) -> Result<Self> {
        let n = values.len();
        Self::observation(name, 1, 1, n, values)
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value type.
    pub fn value_type(&self) -> TensorValueType {
        self.value_type
    }

    /// Returns the declared shape.
    pub fn shape(&self) -> &[i64] {
        &self.shape
    }

    /// Returns the data, if allocated.
    pub fn data(&self) -> Option<&TensorData> {
        self.data.as_ref()
    }

    /// Returns the data, if allocated.
    pub fn data_mut(&mut self) -> Option<&mut TensorData> {
        self.data.as_mut()
    }

    /// Returns the batch size of the allocated data.
    pub fn batch(&self) -> Option<usize> {
        self.data.as_ref().map(TensorData::batch)
    }

    /// Returns the data shape for the given batch size.
    ///
    /// Non-batch dimensions come from the declared shape, dynamic ones count as 1.
    pub fn data_shape(&self, batch_size: usize) -> TensorShape {
        let mut dims: Vec<usize> = self
            .shape
            .iter()
            .map(|&d| if d < 1 { 1 } else { d as usize })
            .collect();
        if dims.is_empty() {
            dims.push(1);
        }
        dims[0] = batch_size;

        // Ranks above 4 are folded into the channel dimension.
        if dims.len() > 4 {
            let channels: usize = dims[3..].iter().product();
            dims.truncate(3);
            dims.push(channels);
        }
        TensorShape::from_dims(&dims).unwrap_or_else(|| TensorShape::new(batch_size, 1, 1, 1))
    }

    /// Returns `[height, width, channels]` of the tensor.
    pub fn dims3(&self) -> [usize; 3] {
        match &self.data {
            Some(data) => data.shape().dims3(),
            None => self.data_shape(1).dims3(),
        }
    }

    /// Resizes the batch dimension of the data.
    ///
    /// If the tensor already holds data of the requested batch size nothing is
    /// done. Otherwise, the current buffer is released before a zeroed buffer is
    /// taken from `allocator`.
    pub fn resize(&mut self, batch_size: usize, allocator: &dyn TensorAllocator) {
        if self.batch() == Some(batch_size) {
            return;
        }
        self.data = None;
        self.data = Some(allocator.alloc(self.data_shape(batch_size)));
    }

    /// Returns the value at the given index.
    pub fn get(&self, index: &[usize]) -> Result<f32> {
        match &self.data {
            Some(data) => data.get(index),
            None => Err(Self::out_of_range(index).into()),
        }
    }

    /// Sets the value at the given index.
    pub fn set(&mut self, index: &[usize], value: f32) -> Result<()> {
        match &mut self.data {
            Some(data) => data.set(index, value),
            None => Err(Self::out_of_range(index).into()),
        }
    }

    /// Fills every cell with `value`, if data is allocated.
    pub fn fill(&mut self, value: f32) {
        if let Some(data) = &mut self.data {
            data.as_mut_slice().iter_mut().for_each(|v| *v = value);
        }
    }

    fn out_of_range(index: &[usize]) -> TensorGenError {
        TensorGenError::IndexOutOfRange {
            index: index.to_vec(),
            shape: [0, 0, 0, 0],
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tensor::{CachingAllocator, HeapAllocator};

    #[test]
    fn test_resize_keeps_non_batch_dims() {
        let mut t = Tensor::new("obs", TensorValueType::FloatingPoint, vec![-1, 4, 5, 3]);
        t.resize(2, &HeapAllocator);
        assert_eq!(t.data().unwrap().shape(), TensorShape::new(2, 4, 5, 3));
        t.resize(7, &HeapAllocator);
        assert_eq!(t.data().unwrap().shape(), TensorShape::new(7, 4, 5, 3));
        assert_eq!(t.dims3(), [4, 5, 3]);
    }

    #[test]
    fn test_resize_same_batch_keeps_data() {
        let mut t = Tensor::new("reward", TensorValueType::FloatingPoint, vec![-1, 1]);
        t.resize(3, &HeapAllocator);
        t.set(&[2, 0], 4.0).unwrap();
        t.resize(3, &HeapAllocator);
        assert_eq!(t.get(&[2, 0]).unwrap(), 4.0);
    }

    #[test]
    fn test_resize_releases_old_buffer() {
        let allocator = CachingAllocator::new();
        let mut t = Tensor::new("reward", TensorValueType::FloatingPoint, vec![-1, 1]);
        t.resize(3, &allocator);
        t.set(&[1, 0], 1.0).unwrap();
        t.resize(4, &allocator);
        assert_eq!(allocator.n_cached(), 1);

        // The zeroed buffer of the old size is reused.
        t.resize(3, &allocator);
        assert_eq!(allocator.n_reuses(), 1);
        assert_eq!(t.get(&[1, 0]).unwrap(), 0.0);
    }

    #[test]
    fn test_access_without_data() {
        let mut t = Tensor::new("x", TensorValueType::FloatingPoint, vec![-1, 1]);
        let err = t.get(&[0, 0]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TensorGenError>(),
            Some(TensorGenError::IndexOutOfRange { .. })
        ));
        assert!(t.set(&[0, 0], 1.0).is_err());
    }

    #[test]
    fn test_vector_observation() {
        let t = Tensor::vector_observation("v", vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(t.dims3(), [1, 1, 3]);
        assert_eq!(t.batch(), Some(1));
        assert_eq!(t.get(&[0, 2]).unwrap(), 3.0);
    }
}
