/*!
 * A dense two dimensional [Matrix](./matrices/struct.Matrix.html) container with spare
 * capacity in both dimensions, and random access cursors over its rows, columns and
 * diagonals.
 *
 * If this is your first time using the crate start with the
 * [Matrix](./matrices/struct.Matrix.html) type for constructing and reshaping matrices,
 * then see [iterators](./matrices/iterators/index.html) for walking over them.
 *
 * ```
 * use dense_matrix::matrices::Matrix;
 * use dense_matrix::matrices::iterators::ReverseColumnMajor;
 * let mut matrix = Matrix::from_flat(2, 2, vec![
 *     1, 2,
 *     3, 4
 * ])?;
 * matrix.insert_column_with_value(2, 0)?;
 * let values: Vec<i32> = matrix.begin::<ReverseColumnMajor>().values(&matrix)?.copied().collect();
 * assert_eq!(values, vec![ 0, 0, 4, 2, 3, 1 ]);
 * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
 * ```
 *
 * # Examples
 * - [Using custom types](./using_custom_types/index.html)
 */

pub mod matrices;
pub mod truthy;

// examples
pub mod using_custom_types;
