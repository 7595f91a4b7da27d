//! Errors in the library.
use thiserror::Error;

/// Errors raised while allocating, indexing and generating tensors.
///
/// Functions of this crate return [`anyhow::Result`]; the kind of a failure
/// can be recovered with `err.downcast_ref::<TensorGenError>()`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorGenError {
    /// No generator is registered for the requested tensor.
    #[error("Unknown tensor expected as input: {0}")]
    UnknownTensor(String),

    /// A buffer was accessed outside of its allocated shape.
    #[error("Index {index:?} is out of range for shape {shape:?}")]
    IndexOutOfRange {
        /// The offending index.
        index: Vec<usize>,
        /// `[batch, height, width, channels]` of the accessed buffer.
        shape: [usize; 4],
    },

    /// A generator could not write every row of the batch.
    #[error("Tensor {name} has {written} of {expected} rows written")]
    CorruptBatch {
        /// Name of the tensor.
        name: String,
        /// Requested batch size.
        expected: usize,
        /// Number of rows actually written.
        written: usize,
    },

    /// Source and target tensors of a copy do not agree on their dimensions.
    #[error("Shape mismatch: source {source_dims:?}, target {target_dims:?}")]
    ShapeMismatch {
        /// Non-batch dimensions of the source.
        source_dims: [usize; 3],
        /// Non-batch dimensions of the target.
        target_dims: [usize; 3],
    },

    /// Two requested tensors share a name but not their non-batch shape.
    #[error("Tensor {0} is requested with conflicting shapes")]
    ShapeConflict(String),

    /// A tensor expected to hold data has none.
    #[error("Tensor {0} holds no data")]
    EmptyTensor(String),
}
