/*!
 * Error types for matrix storage, element access and cursors.
 */

use crate::matrices::{Column, Row};

/**
 * An error indicating a precondition of a matrix operation was violated.
 *
 * Every fallible operation validates all of its preconditions before modifying anything,
 * so when one of these errors is returned the matrices involved are exactly as they were
 * before the call.
 */
#[derive(Debug, Clone, Eq, PartialEq, Hash, thiserror::Error)]
pub enum MatrixError {
    #[error("Requested dimension of {requested} exceeds the maximum dimension of {maximum}")]
    DimensionExceedsMaximum { requested: usize, maximum: usize },

    #[error("A {rows}x{columns} shape is not allowed, rows and columns must be both zero or both non zero")]
    InconsistentShape { rows: Row, columns: Column },

    #[error("Row {row} does not exist in a matrix with {rows} rows")]
    RowDoesNotExist { row: Row, rows: Row },

    #[error("Column {column} does not exist in a matrix with {columns} columns")]
    ColumnDoesNotExist { column: Column, columns: Column },

    #[error("Diagonal {diagonal} does not exist in this matrix")]
    DiagonalDoesNotExist { diagonal: isize },

    #[error("Diagonal index {index} is out of bounds for a diagonal of size {size}")]
    DiagonalIndexOutOfBounds { index: isize, size: usize },

    #[error("Element index {index} is out of bounds for a matrix with {len} elements")]
    InvalidElementIndex { index: usize, len: usize },

    #[error("Offset {offset} from this iterator does not refer to an element")]
    IteratorIndexOutOfBounds { offset: isize },

    #[error("Iterators belong to different matrices or to different shapes of the same matrix")]
    IncompatibleIterators,

    #[error("Iterator does not belong to this matrix, or the matrix has changed shape since it was created")]
    InvalidIterator,

    #[error("Iterator is at its end position and cannot be dereferenced")]
    DereferenceOfSentinelIterator,

    #[error("Expected {expected} elements to initialise from but only {provided} were provided")]
    InsufficientInitData { expected: usize, provided: usize },

    #[error("Dimension is already at the maximum of {maximum}")]
    MaximumCapacityReached { maximum: usize },

    #[error("Matrices have mismatched shapes, expected a dimension of {expected} but it was {actual}")]
    MismatchedShapes { expected: usize, actual: usize },
}

#[test]
fn test_sync() {
    fn assert_sync<T: Sync>() {}
    assert_sync::<MatrixError>();
}

#[test]
fn test_send() {
    fn assert_send<T: Send>() {}
    assert_send::<MatrixError>();
}
