//! Shape of tensor data.
use crate::error::TensorGenError;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Shape of a data buffer in NHWC layout.
///
/// Two dimensional tensors, e.g., rewards of shape `[batch, 1]`, are stored as
/// `[batch, 1, 1, channels]`, so that `[batch, channel]` indices address the
/// same cells as `[batch, 0, 0, channel]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TensorShape {
    /// Batch size.
    pub batch: usize,

    /// Height.
    pub height: usize,

    /// Width.
    pub width: usize,

    /// Number of channels.
    pub channels: usize,
}

impl TensorShape {
    /// Creates a shape from its four dimensions.
    pub fn new(batch: usize, height: usize, width: usize, channels: usize) -> Self {
        Self {
            batch,
            height,
            width,
            channels,
        }
    }

    /// Creates a shape from 1 to 4 dimensions.
    ///
    /// * `[n]` is a batch of `n` scalars.
    /// * `[n, c]` is a batch of vectors.
    /// * `[n, w, c]` is a batch of single-row images.
    /// * `[n, h, w, c]` is a batch of images.
    ///
    /// Returns `None` for other ranks.
    pub fn from_dims(dims: &[usize]) -> Option<Self> {
        match *dims {
            [n] => Some(Self::new(n, 1, 1, 1)),
            [n, c] => Some(Self::new(n, 1, 1, c)),
            [n, w, c] => Some(Self::new(n, 1, w, c)),
            [n, h, w, c] => Some(Self::new(n, h, w, c)),
            _ => None,
        }
    }

    /// Returns `[height, width, channels]`.
    pub fn dims3(&self) -> [usize; 3] {
        [self.height, self.width, self.channels]
    }

    /// Returns `[batch, height, width, channels]`.
    pub fn dims4(&self) -> [usize; 4] {
        [self.batch, self.height, self.width, self.channels]
    }

    /// Number of elements in a single batch row.
    pub fn flat_width(&self) -> usize {
        self.height * self.width * self.channels
    }

    /// Number of elements in the buffer.
    pub fn length(&self) -> usize {
        self.batch * self.flat_width()
    }

    /// Converts a multi-index into an offset of the contiguous buffer.
    ///
    /// Accepts a flat index, `[batch, channel]` or `[batch, h, w, c]`.
    pub fn offset(&self, index: &[usize]) -> Result<usize> {
        let offset = match *index {
            [i] if i < self.length() => Some(i),
            [b, c] if b < self.batch && c < self.flat_width() => Some(b * self.flat_width() + c),
            [b, h, w, c]
                if b < self.batch && h < self.height && w < self.width && c < self.channels =>
            {
                Some(((b * self.height + h) * self.width + w) * self.channels + c)
            }
            _ => None,
        };

        match offset {
            Some(offset) => Ok(offset),
            None => Err(TensorGenError::IndexOutOfRange {
                index: index.to_vec(),
                shape: self.dims4(),
            }
            .into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::TensorShape;
    use crate::error::TensorGenError;

    #[test]
    fn test_from_dims() {
        assert_eq!(
            TensorShape::from_dims(&[3]),
            Some(TensorShape::new(3, 1, 1, 1))
        );
        assert_eq!(
            TensorShape::from_dims(&[3, 4]),
            Some(TensorShape::new(3, 1, 1, 4))
        );
        assert_eq!(
            TensorShape::from_dims(&[2, 5, 6, 3]),
            Some(TensorShape::new(2, 5, 6, 3))
        );
        assert_eq!(TensorShape::from_dims(&[1, 2, 3, 4, 5]), None);
    }

    #[test]
    fn test_offset() {
        let shape = TensorShape::new(2, 2, 3, 4);
        assert_eq!(shape.length(), 48);
        assert_eq!(shape.offset(&[0, 0, 0, 0]).unwrap(), 0);
        assert_eq!(shape.offset(&[0, 0, 1, 0]).unwrap(), 4);
        assert_eq!(shape.offset(&[0, 1, 0, 0]).unwrap(), 12);
        assert_eq!(shape.offset(&[1, 0, 0, 1]).unwrap(), 25);
        assert_eq!(shape.offset(&[1, 13]).unwrap(), 37);
        assert_eq!(shape.offset(&[47]).unwrap(), 47);
    }

    #[test]
    fn test_offset_out_of_range() {
        let shape = TensorShape::new(2, 1, 1, 3);
        let indices = [
            vec![6usize],
            vec![2, 0],
            vec![0, 3],
            vec![0, 0, 1, 0],
            vec![0, 0, 0],
        ];
        for index in indices.iter() {
            let err = shape.offset(index).unwrap_err();
            assert_eq!(
                err.downcast_ref::<TensorGenError>(),
                Some(&TensorGenError::IndexOutOfRange {
                    index: index.clone(),
                    shape: [2, 1, 1, 3],
                })
            );
        }
    }
}
