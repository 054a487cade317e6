/*!
 * Transposition, concatenation and splitting of matrices.
 *
 * Operations which combine matrices into a receiver take their operands by shared
 * reference, so the receiver can never also be one of the operands. The cases where a
 * matrix is combined with or split into itself have their own methods instead:
 * [`append_rows`](Matrix::append_rows) and friends grow the receiver in place using its
 * spare capacity, [`split_off_rows`](Matrix::split_off_rows) and
 * [`split_off_columns`](Matrix::split_off_columns) keep the leading part in the receiver,
 * and [`transpose_in_place`](Matrix::transpose_in_place) transposes the receiver.
 *
 * ```
 * use dense_matrix::matrices::Matrix;
 * let top = Matrix::from_flat(1, 2, vec![ 1, 2 ])?;
 * let bottom = Matrix::from_flat(2, 2, vec![ 3, 4, 5, 6 ])?;
 * let mut joined = Matrix::new();
 * joined.cat_by_row(&top, &bottom)?;
 * assert_eq!(joined, Matrix::from_flat(3, 2, vec![ 1, 2, 3, 4, 5, 6 ])?);
 * let (first, rest) = joined.split_by_row(1)?;
 * assert_eq!(first, top);
 * assert_eq!(rest, bottom);
 * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
 * ```
 */

use std::ops::Range;

use log::trace;

use crate::matrices::errors::MatrixError;
use crate::matrices::storage::{Storage, validate_dimension};
use crate::matrices::{Column, Matrix, Row};

impl<T> Matrix<T> {
    /**
     * Transposes this matrix, swapping rows and columns. A square matrix is transposed by
     * swapping elements without reallocating, any other shape is rebuilt in a new buffer.
     */
    pub fn transpose_in_place(&mut self) {
        let (rows, columns) = self.size();
        if rows == columns {
            for i in 0..rows {
                for j in (i + 1)..columns {
                    self.storage.swap_elements((i, j), (j, i));
                }
            }
            return;
        }
        trace!("transposing a {}x{} matrix through a temporary buffer", rows, columns);
        let mut slots: Vec<Option<T>> = self
            .storage
            .take_row_major()
            .into_iter()
            .map(Some)
            .collect();
        let transposed: Vec<T> = (0..columns)
            .flat_map(|column| (0..rows).map(move |row| row * columns + column))
            .filter_map(|index| slots.get_mut(index).and_then(Option::take))
            .collect();
        self.storage = Storage::from_row_major(columns, rows, transposed);
    }

    fn check_split_row(&self, position: Row) -> Result<(), MatrixError> {
        if position > self.rows() {
            return Err(MatrixError::RowDoesNotExist { row: position, rows: self.rows() });
        }
        Ok(())
    }

    fn check_split_column(&self, position: Column) -> Result<(), MatrixError> {
        if position > self.columns() {
            return Err(MatrixError::ColumnDoesNotExist {
                column: position,
                columns: self.columns(),
            });
        }
        Ok(())
    }
}

impl<T: Clone> Matrix<T> {
    /**
     * Computes and returns the transpose of this matrix
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * let x = Matrix::from_flat(2, 3, vec![
     *    1, 2, 3,
     *    4, 5, 6
     * ])?;
     * let y = Matrix::from_flat(3, 2, vec![
     *    1, 4,
     *    2, 5,
     *    3, 6
     * ])?;
     * assert_eq!(x.transpose(), y);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn transpose(&self) -> Matrix<T> {
        let (rows, columns) = self.size();
        let data = (0..columns)
            .flat_map(|column| (0..rows).map(move |row| (row, column)))
            .map(|(row, column)| self.storage.get(row, column).clone())
            .collect();
        Matrix::from_storage(Storage::from_row_major(columns, rows, data))
    }

    /**
     * Writes the transpose of this matrix into `destination`, replacing whatever it held.
     */
    pub fn transpose_into(&self, destination: &mut Matrix<T>) {
        *destination = self.transpose();
    }

    /// Copies a rectangle of this matrix, which is the empty matrix if it has no area.
    fn copy_block(&self, rows: Range<Row>, columns: Range<Column>) -> Matrix<T> {
        if rows.is_empty() || columns.is_empty() {
            return Matrix::new();
        }
        let shape = (rows.len(), columns.len());
        let data = rows
            .flat_map(|row| columns.clone().map(move |column| (row, column)))
            .map(|(row, column)| self.storage.get(row, column).clone())
            .collect();
        Matrix::from_storage(Storage::from_row_major(shape.0, shape.1, data))
    }

    /**
     * Replaces this matrix with `top` stacked above `bottom`.
     *
     * If either operand is empty the result is a copy of the other. Otherwise both must
     * have the same number of columns, else [`MismatchedShapes`](MatrixError::MismatchedShapes)
     * is returned, and the combined number of rows must not exceed
     * [MAX_DIMENSION](crate::matrices::MAX_DIMENSION).
     */
    pub fn cat_by_row(&mut self, top: &Matrix<T>, bottom: &Matrix<T>) -> Result<(), MatrixError> {
        if top.is_empty() {
            *self = bottom.clone();
            return Ok(());
        }
        if bottom.is_empty() {
            *self = top.clone();
            return Ok(());
        }
        if top.columns() != bottom.columns() {
            return Err(MatrixError::MismatchedShapes {
                expected: top.columns(),
                actual: bottom.columns(),
            });
        }
        let rows = top.rows() + bottom.rows();
        validate_dimension(rows)?;
        let data = top.iter().chain(bottom.iter()).cloned().collect();
        *self = Matrix::from_storage(Storage::from_row_major(rows, top.columns(), data));
        Ok(())
    }

    /**
     * Replaces this matrix with `left` placed beside `right`.
     *
     * If either operand is empty the result is a copy of the other. Otherwise both must
     * have the same number of rows, and the combined number of columns must not exceed
     * [MAX_DIMENSION](crate::matrices::MAX_DIMENSION).
     */
    pub fn cat_by_column(
        &mut self,
        left: &Matrix<T>,
        right: &Matrix<T>,
    ) -> Result<(), MatrixError> {
        if left.is_empty() {
            *self = right.clone();
            return Ok(());
        }
        if right.is_empty() {
            *self = left.clone();
            return Ok(());
        }
        if left.rows() != right.rows() {
            return Err(MatrixError::MismatchedShapes {
                expected: left.rows(),
                actual: right.rows(),
            });
        }
        let columns = left.columns() + right.columns();
        validate_dimension(columns)?;
        let data = (0..left.rows())
            .flat_map(|row| {
                let left_row =
                    (0..left.columns()).map(move |column| left.storage.get(row, column));
                let right_row =
                    (0..right.columns()).map(move |column| right.storage.get(row, column));
                left_row.chain(right_row)
            })
            .cloned()
            .collect();
        *self = Matrix::from_storage(Storage::from_row_major(left.rows(), columns, data));
        Ok(())
    }

    /**
     * Splits this matrix into the rows before `position` and the rows from `position`
     * onwards. `position` may be anything from 0 to the number of rows, and a part with
     * no rows is returned as the empty matrix.
     */
    pub fn split_by_row(&self, position: Row) -> Result<(Matrix<T>, Matrix<T>), MatrixError> {
        self.check_split_row(position)?;
        let columns = 0..self.columns();
        Ok((
            self.copy_block(0..position, columns.clone()),
            self.copy_block(position..self.rows(), columns),
        ))
    }

    /**
     * Splits this matrix into the columns before `position` and the columns from
     * `position` onwards.
     */
    pub fn split_by_column(&self, position: Column) -> Result<(Matrix<T>, Matrix<T>), MatrixError> {
        self.check_split_column(position)?;
        let rows = 0..self.rows();
        Ok((
            self.copy_block(rows.clone(), 0..position),
            self.copy_block(rows, position..self.columns()),
        ))
    }

    /**
     * Splits this matrix by row into two other matrices, replacing whatever they held.
     * Neither is modified if `position` is out of range.
     */
    pub fn split_by_row_into(
        &self,
        top: &mut Matrix<T>,
        bottom: &mut Matrix<T>,
        position: Row,
    ) -> Result<(), MatrixError> {
        let (first, second) = self.split_by_row(position)?;
        *top = first;
        *bottom = second;
        Ok(())
    }

    /**
     * Splits this matrix by column into two other matrices, replacing whatever they held.
     */
    pub fn split_by_column_into(
        &self,
        left: &mut Matrix<T>,
        right: &mut Matrix<T>,
        position: Column,
    ) -> Result<(), MatrixError> {
        let (first, second) = self.split_by_column(position)?;
        *left = first;
        *right = second;
        Ok(())
    }

    /**
     * Removes the rows from `position` onwards and returns them as a new matrix. This
     * matrix keeps the rows before `position` and its capacity.
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * let mut matrix = Matrix::from_flat(3, 1, vec![ 1, 2, 3 ])?;
     * let tail = matrix.split_off_rows(1)?;
     * assert_eq!(matrix, Matrix::from_flat(1, 1, vec![ 1 ])?);
     * assert_eq!(tail, Matrix::from_flat(2, 1, vec![ 2, 3 ])?);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn split_off_rows(&mut self, position: Row) -> Result<Matrix<T>, MatrixError> {
        self.check_split_row(position)?;
        let tail = self.copy_block(position..self.rows(), 0..self.columns());
        self.storage.truncate_rows(position);
        Ok(tail)
    }

    /**
     * Removes the columns from `position` onwards and returns them as a new matrix. This
     * matrix keeps the columns before `position` and its capacity.
     */
    pub fn split_off_columns(&mut self, position: Column) -> Result<Matrix<T>, MatrixError> {
        self.check_split_column(position)?;
        let tail = self.copy_block(0..self.rows(), position..self.columns());
        self.storage.truncate_columns(position);
        Ok(tail)
    }
}

impl<T: Clone + Default> Matrix<T> {
    /// Checks `other` can be stacked with this matrix, returning false if there is
    /// nothing to do because `other` is empty.
    fn check_stack(&self, other: &Matrix<T>, rows: bool) -> Result<bool, MatrixError> {
        if other.is_empty() {
            return Ok(false);
        }
        let (matching, other_matching, total) = if rows {
            (self.columns(), other.columns(), self.rows() + other.rows())
        } else {
            (self.rows(), other.rows(), self.columns() + other.columns())
        };
        if !self.is_empty() && matching != other_matching {
            return Err(MatrixError::MismatchedShapes {
                expected: matching,
                actual: other_matching,
            });
        }
        validate_dimension(total)?;
        Ok(true)
    }

    /**
     * Adds copies of the rows of `other` below the rows of this matrix, using spare row
     * capacity after the last row when there is enough.
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * let mut matrix = Matrix::from_flat(1, 2, vec![ 1, 2 ])?;
     * matrix.append_rows(&matrix.clone())?;
     * assert_eq!(matrix, Matrix::from_flat(2, 2, vec![ 1, 2, 1, 2 ])?);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn append_rows(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        if !self.check_stack(other, true)? {
            return Ok(());
        }
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        self.storage.ensure_row_slack(0, other.rows());
        for row in 0..other.rows() {
            let position = self.rows();
            self.storage
                .insert_row(position, |column| other.storage.get(row, column).clone())?;
        }
        Ok(())
    }

    /**
     * Adds copies of the rows of `other` above the rows of this matrix, using spare row
     * capacity before the first row when there is enough.
     */
    pub fn prepend_rows(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        if !self.check_stack(other, true)? {
            return Ok(());
        }
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        self.storage.ensure_row_slack(other.rows(), 0);
        for row in (0..other.rows()).rev() {
            self.storage
                .insert_row(0, |column| other.storage.get(row, column).clone())?;
        }
        Ok(())
    }

    /**
     * Adds copies of the columns of `other` to the right of the columns of this matrix.
     */
    pub fn append_columns(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        if !self.check_stack(other, false)? {
            return Ok(());
        }
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        self.storage.ensure_column_slack(0, other.columns());
        for column in 0..other.columns() {
            let position = self.columns();
            self.storage
                .insert_column(position, |row| other.storage.get(row, column).clone())?;
        }
        Ok(())
    }

    /**
     * Adds copies of the columns of `other` to the left of the columns of this matrix.
     */
    pub fn prepend_columns(&mut self, other: &Matrix<T>) -> Result<(), MatrixError> {
        if !self.check_stack(other, false)? {
            return Ok(());
        }
        if self.is_empty() {
            *self = other.clone();
            return Ok(());
        }
        self.storage.ensure_column_slack(other.columns(), 0);
        for column in (0..other.columns()).rev() {
            self.storage
                .insert_column(0, |row| other.storage.get(row, column).clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(rows: Row, columns: Column) -> Matrix<i32> {
        Matrix::from_flat(rows, columns, 0..(rows * columns) as i32).unwrap()
    }

    #[test]
    fn transpose_in_place_rectangular() {
        let mut matrix = counting(2, 3);
        let expected = matrix.transpose();
        matrix.transpose_in_place();
        assert_eq!(matrix, expected);
        assert_eq!(matrix.size(), (3, 2));
    }

    #[test]
    fn transpose_in_place_square_keeps_capacity() {
        let mut matrix = counting(3, 3);
        matrix.reserve(8, 8).unwrap();
        let expected = matrix.transpose();
        matrix.transpose_in_place();
        assert_eq!(matrix, expected);
        assert_eq!((matrix.row_capacity(), matrix.column_capacity()), (8, 8));
    }

    #[test]
    fn append_within_slack_does_not_reallocate() {
        let mut matrix = counting(2, 2);
        matrix.reserve(10, 2).unwrap();
        let cursor = matrix.begin::<crate::matrices::iterators::RowMajor>();
        matrix.append_rows(&counting(3, 2)).unwrap();
        assert_eq!(matrix.row_capacity(), 10);
        assert_eq!(matrix.rows(), 5);
        // the shape changed so the old cursor no longer applies
        assert!(!cursor.is_valid_for(&matrix));
        assert_eq!(matrix.at(4, 1), Ok(&5));
    }

    #[test]
    fn prepend_columns_keeps_order() {
        let mut matrix = Matrix::from_flat(2, 1, vec![ 9, 9 ]).unwrap();
        matrix.prepend_columns(&counting(2, 2)).unwrap();
        assert_eq!(matrix, Matrix::from_flat(2, 3, vec![
            0, 1, 9,
            2, 3, 9
        ]).unwrap());
    }

    #[test]
    fn stacking_mismatched_shapes_fails_without_change() {
        let mut matrix = counting(2, 2);
        assert_eq!(
            matrix.append_rows(&counting(1, 3)),
            Err(MatrixError::MismatchedShapes { expected: 2, actual: 3 })
        );
        assert_eq!(matrix, counting(2, 2));
    }

    #[test]
    fn split_off_everything_and_nothing() {
        let mut matrix = counting(2, 2);
        let tail = matrix.split_off_columns(2).unwrap();
        assert!(tail.is_empty());
        assert_eq!(matrix, counting(2, 2));
        let tail = matrix.split_off_columns(0).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(tail, counting(2, 2));
    }
}
