//! Utilities for copying and resizing tensors.
use crate::{
    error::TensorGenError,
    tensor::{Tensor, TensorAllocator},
};
use anyhow::Result;

/// Resizes the batch dimension of `tensor` and zeroes every cell.
///
/// [`Tensor::resize`] keeps the buffer when the batch size is unchanged, so the
/// values of the previous batch are cleared here.
pub fn resize_tensor(tensor: &mut Tensor, batch_size: usize, allocator: &dyn TensorAllocator) {
    if tensor.batch() == Some(batch_size) {
        tensor.fill(0.0);
    } else {
        tensor.resize(batch_size, allocator);
    }
}

/// Copies the first batch row of `source` into row `batch_index` of `target`.
///
/// Both tensors must hold data and agree on `[height, width, channels]`.
///
/// # Errors
///
/// * [`TensorGenError::EmptyTensor`] if either tensor holds no data.
/// * [`TensorGenError::ShapeMismatch`] if the non-batch dimensions differ.
/// * [`TensorGenError::IndexOutOfRange`] if `batch_index` is not a row of `target`.
pub fn copy_tensor_to_batch(
    source: &Tensor,
    target: &mut Tensor,
    batch_index: usize,
) -> Result<()> {
    let src = source
        .data()
        .ok_or_else(|| TensorGenError::EmptyTensor(source.name().to_string()))?;
    let target_name = target.name().to_string();
    let dst = target
        .data_mut()
        .ok_or(TensorGenError::EmptyTensor(target_name))?;

    let (src_shape, dst_shape) = (src.shape(), dst.shape());
    if src_shape.dims3() != dst_shape.dims3() {
        return Err(TensorGenError::ShapeMismatch {
            source_dims: src_shape.dims3(),
            target_dims: dst_shape.dims3(),
        }
        .into());
    }

    let src_row = src.row(0).ok_or_else(|| TensorGenError::IndexOutOfRange {
        index: vec![0],
        shape: src_shape.dims4(),
    })?;
    let dst_row = dst
        .row_mut(batch_index)
        .ok_or_else(|| TensorGenError::IndexOutOfRange {
            index: vec![batch_index],
            shape: dst_shape.dims4(),
        })?;

    // Rows are laid out height-major, then width, then channel, in both buffers.
    dst_row.copy_from_slice(src_row);
    Ok(())
}

/// Copies every row of `source` into `target`.
///
/// `target` must already be resized to the batch size of `source`.
pub fn copy_tensor(source: &Tensor, target: &mut Tensor) -> Result<()> {
    let src = source
        .data()
        .ok_or_else(|| TensorGenError::EmptyTensor(source.name().to_string()))?;
    let target_name = target.name().to_string();
    let dst = target
        .data_mut()
        .ok_or(TensorGenError::EmptyTensor(target_name))?;

    let (src_shape, dst_shape) = (src.shape(), dst.shape());
    if src_shape.flat_width() != dst_shape.flat_width() {
        return Err(TensorGenError::ShapeMismatch {
            source_dims: src_shape.dims3(),
            target_dims: dst_shape.dims3(),
        }
        .into());
    }
    if src_shape.batch != dst_shape.batch {
        return Err(TensorGenError::IndexOutOfRange {
            index: vec![src_shape.batch],
            shape: dst_shape.dims4(),
        }
        .into());
    }

    dst.as_mut_slice().copy_from_slice(src.as_slice());
    Ok(())
}

/// Fails with [`TensorGenError::CorruptBatch`] unless `written == expected`.
pub(crate) fn ensure_rows_written(name: &str, expected: usize, written: usize) -> Result<()> {
    match written == expected {
        true => Ok(()),
        false => Err(TensorGenError::CorruptBatch {
            name: name.to_string(),
            expected,
            written,
        }
        .into()),
    }
}
