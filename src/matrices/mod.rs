/*!
 * Generic dense matrix type.
 *
 * A [Matrix] owns its elements in a single buffer with spare capacity kept in both
 * dimensions, so rows and columns can be inserted at either end or in the middle, and the
 * matrix resized, without reallocating every time. See [`reserve`](Matrix::reserve) and
 * [`insert_row`](Matrix::insert_row) for how that capacity is managed.
 *
 * Elements are visited through [cursors](iterators), random access positions in a row
 * major, column major, main diagonal or anti-diagonal traversal.
 */

use std::fmt;
use std::ops::{Index, IndexMut};

use log::debug;

pub mod errors;
pub mod iterators;
pub mod operations;
pub mod traversal;
mod storage;

use crate::matrices::errors::MatrixError;
use crate::matrices::iterators::{
    ColumnWise, Cursor, Diagonal, ReadOnly, ReadWrite, RowMajor, RowWise, Strategy, Values,
    ValuesMut,
};
use crate::matrices::storage::{Storage, validate_dimension, validate_shape};
use crate::matrices::traversal::{Family, Frame};
use crate::truthy::Truthy;

/**
 * A general purpose dense matrix of some type.
 *
 * The element type may implement no traits at all, in which case a matrix can still be
 * created from existing values, read, rearranged and shrunk. If the type implements
 * [`Clone`](Clone) matrices can be copied, transposed, concatenated and split, and if it
 * also implements [`Default`](Default) matrices can grow, as new capacity is filled with
 * default values.
 *
 * A matrix is either empty, with zero rows and zero columns, or has at least one of each.
 */
pub struct Matrix<T> {
    storage: Storage<T>,
}

/// Rows and columns are indexed by usize and limited to [MAX_DIMENSION].
pub type Row = usize;
pub type Column = usize;

/**
 * The maximum number of rows, and separately of columns, a matrix may have or reserve
 * capacity for.
 */
pub const MAX_DIMENSION: usize = 1 << 16;

/**
 * The logical elements of a matrix, moved out of it by
 * [`take_storage`](Matrix::take_storage).
 *
 * The elements are in row major order and this buffer is their sole owner.
 */
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageBuffer<T> {
    data: Vec<T>,
    rows: Row,
    columns: Column,
}

impl<T> StorageBuffer<T> {
    pub fn rows(&self) -> Row {
        self.rows
    }

    pub fn columns(&self) -> Column {
        self.columns
    }

    /// The number of elements, `rows * columns`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Releases the elements as a Vec in row major order.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

/**
 * Methods for matrices of any type, including types which cannot be copied.
 */
impl<T> Matrix<T> {
    /**
     * Creates an empty matrix with no rows, columns or capacity.
     */
    pub fn new() -> Matrix<T> {
        Matrix {
            storage: Storage::empty(),
        }
    }

    fn from_storage(storage: Storage<T>) -> Matrix<T> {
        Matrix { storage }
    }

    /**
     * Creates a matrix from values in row major order, taking the first `rows * columns`
     * values from the iterator. Any further values are ignored.
     *
     * Example of a 2 x 3 matrix:
     * ```ignore
     *   [
     *      1, 2, 4
     *      8, 9, 3
     *   ]
     * ```
     * ```
     * use dense_matrix::matrices::Matrix;
     * let matrix = Matrix::from_flat(2, 3, vec![
     *     1, 2, 4,
     *     8, 9, 3
     * ])?;
     * assert_eq!(matrix.at(1, 0)?, &8);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     *
     * Fails if the shape is not allowed or if there are fewer than `rows * columns` values.
     */
    pub fn from_flat<I>(rows: Row, columns: Column, values: I) -> Result<Matrix<T>, MatrixError>
    where
        I: IntoIterator<Item = T>,
    {
        validate_shape(rows, columns)?;
        let expected = rows * columns;
        let data: Vec<T> = values.into_iter().take(expected).collect();
        if data.len() < expected {
            return Err(MatrixError::InsufficientInitData {
                expected,
                provided: data.len(),
            });
        }
        Ok(Matrix::from_storage(Storage::from_row_major(rows, columns, data)))
    }

    /**
     * Returns the dimensionality of this matrix in Row, Column format
     */
    pub fn size(&self) -> (Row, Column) {
        (self.rows(), self.columns())
    }

    /**
     * Gets the number of rows in this matrix.
     */
    pub fn rows(&self) -> Row {
        self.storage.rows()
    }

    /**
     * Gets the number of columns in this matrix.
     */
    pub fn columns(&self) -> Column {
        self.storage.columns()
    }

    /**
     * Gets the number of elements in this matrix.
     */
    pub fn len(&self) -> usize {
        self.rows() * self.columns()
    }

    /**
     * Returns true if this matrix has no rows and no columns.
     */
    pub fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    /**
     * The number of rows this matrix can hold, counting spare capacity on both sides of
     * the existing rows.
     */
    pub fn row_capacity(&self) -> Row {
        self.storage.row_capacity()
    }

    /**
     * The number of columns this matrix can hold, counting spare capacity on both sides of
     * the existing columns.
     */
    pub fn column_capacity(&self) -> Column {
        self.storage.column_capacity()
    }

    fn check_row(&self, row: Row) -> Result<(), MatrixError> {
        if row >= self.rows() {
            return Err(MatrixError::RowDoesNotExist { row, rows: self.rows() });
        }
        Ok(())
    }

    fn check_column(&self, column: Column) -> Result<(), MatrixError> {
        if column >= self.columns() {
            return Err(MatrixError::ColumnDoesNotExist { column, columns: self.columns() });
        }
        Ok(())
    }

    fn flat_position(&self, index: usize) -> Result<(Row, Column), MatrixError> {
        if index >= self.len() {
            return Err(MatrixError::InvalidElementIndex { index, len: self.len() });
        }
        Ok((index / self.columns(), index % self.columns()))
    }

    /**
     * Gets a reference to the value at this row and column. Rows and Columns are 0 indexed.
     */
    pub fn at(&self, row: Row, column: Column) -> Result<&T, MatrixError> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self.storage.get(row, column))
    }

    /**
     * Gets a mutable reference to the value at this row and column.
     */
    pub fn at_mut(&mut self, row: Row, column: Column) -> Result<&mut T, MatrixError> {
        self.check_row(row)?;
        self.check_column(column)?;
        Ok(self.storage.get_mut(row, column))
    }

    /**
     * Gets a reference to the value at this index counting in row major order, so that
     * index `i` is row `i / columns`, column `i % columns`.
     */
    pub fn get_flat(&self, index: usize) -> Result<&T, MatrixError> {
        let (row, column) = self.flat_position(index)?;
        Ok(self.storage.get(row, column))
    }

    /**
     * Gets a mutable reference to the value at this index counting in row major order.
     */
    pub fn get_flat_mut(&mut self, index: usize) -> Result<&mut T, MatrixError> {
        let (row, column) = self.flat_position(index)?;
        Ok(self.storage.get_mut(row, column))
    }

    /**
     * Removes a row from this Matrix, shifting all following rows up.
     * Rows are 0 indexed. The capacity is kept.
     *
     * Removing the only row leaves the matrix empty.
     */
    pub fn erase_row(&mut self, row: Row) -> Result<(), MatrixError> {
        self.check_row(row)?;
        self.storage.erase_row(row);
        Ok(())
    }

    /**
     * Removes a column from this Matrix, shifting all following columns left.
     * Columns are 0 indexed. The capacity is kept.
     *
     * Removing the only column leaves the matrix empty.
     */
    pub fn erase_column(&mut self, column: Column) -> Result<(), MatrixError> {
        self.check_column(column)?;
        self.storage.erase_column(column);
        Ok(())
    }

    /**
     * Swaps two rows. This only exchanges two entries in the row table, no elements move.
     */
    pub fn swap_rows(&mut self, a: Row, b: Row) -> Result<(), MatrixError> {
        self.check_row(a)?;
        self.check_row(b)?;
        self.storage.swap_rows(a, b);
        Ok(())
    }

    /**
     * Swaps two columns, exchanging every pair of elements in them.
     */
    pub fn swap_columns(&mut self, a: Column, b: Column) -> Result<(), MatrixError> {
        self.check_column(a)?;
        self.check_column(b)?;
        self.storage.swap_columns(a, b);
        Ok(())
    }

    /**
     * Removes all elements and releases all capacity.
     */
    pub fn clear(&mut self) {
        self.storage = Storage::empty();
    }

    /**
     * Moves all elements out of this matrix, leaving it empty with no capacity.
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * let mut matrix = Matrix::from_flat(2, 2, vec![ 1, 2, 3, 4 ])?;
     * matrix.swap_rows(0, 1)?;
     * let buffer = matrix.take_storage();
     * assert!(matrix.is_empty());
     * assert_eq!((buffer.rows(), buffer.columns()), (2, 2));
     * assert_eq!(buffer.into_vec(), vec![ 3, 4, 1, 2 ]);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn take_storage(&mut self) -> StorageBuffer<T> {
        let (rows, columns) = self.size();
        let data = self.storage.take_row_major();
        debug!("transferred ownership of a {}x{} matrix's elements", rows, columns);
        StorageBuffer { data, rows, columns }
    }

    /**
     * Returns an iterator over references to all values in row major order.
     */
    pub fn iter(&self) -> Values<'_, T, RowMajor> {
        Values::whole(&self.storage)
    }

    /**
     * Returns an iterator over mutable references to all values in row major order.
     */
    pub fn iter_mut(&mut self) -> ValuesMut<'_, T> {
        let (rows, columns) = self.size();
        let cells = (0..rows).flat_map(|row| (0..columns).map(move |column| (row, column)));
        ValuesMut::new(self.storage.get_many_mut(cells))
    }

    /**
     * Returns true if any element of this matrix is [truthy](Truthy). An empty matrix is
     * never truthy.
     */
    pub fn is_truthy(&self) -> bool
    where
        T: Truthy,
    {
        self.iter().any(Truthy::is_truthy)
    }

    fn grid_frame(&self) -> Frame {
        Frame::grid(self.rows(), self.columns())
    }

    /// The frame of whole matrix traversals, which is diagonal 0 for diagonal families.
    fn whole_frame<S: Strategy>(&self) -> Frame {
        if S::TRAVERSAL.family.is_diagonal() {
            Frame::diagonal(0, self.rows(), self.columns()).unwrap_or_else(Frame::empty_diagonal)
        } else {
            self.grid_frame()
        }
    }

    fn diagonal_frame(&self, number: isize) -> Result<Frame, MatrixError> {
        Frame::diagonal(number, self.rows(), self.columns())
            .ok_or(MatrixError::DiagonalDoesNotExist { diagonal: number })
    }

    fn cursor_begin<S: Strategy, A: iterators::Access>(&self) -> Cursor<S, A> {
        Cursor::bound(self.storage.token(), self.whole_frame::<S>(), 0)
    }

    fn cursor_end<S: Strategy, A: iterators::Access>(&self) -> Cursor<S, A> {
        let frame = self.whole_frame::<S>();
        Cursor::bound(self.storage.token(), frame, frame.len())
    }

    fn line_cursor<S: Strategy, A: iterators::Access>(
        &self,
        line: usize,
        end: bool,
    ) -> Result<Cursor<S, A>, MatrixError> {
        let line_len = match S::TRAVERSAL.family {
            Family::ColumnMajor => {
                self.check_column(line)?;
                self.rows()
            }
            _ => {
                self.check_row(line)?;
                self.columns()
            }
        };
        let (begin, stop) = traversal::line_bounds(S::TRAVERSAL.direction, line, line_len);
        let raw = if end { stop } else { begin };
        Ok(Cursor::from_raw(self.storage.token(), self.grid_frame(), raw))
    }

    fn diagonal_cursor<S: Strategy, A: iterators::Access>(
        &self,
        number: isize,
        end: bool,
    ) -> Result<Cursor<S, A>, MatrixError> {
        let frame = self.diagonal_frame(number)?;
        let ordinal = if end { frame.len() } else { 0 };
        Ok(Cursor::bound(self.storage.token(), frame, ordinal))
    }

    fn diagonal_through<S: Strategy, A: iterators::Access>(
        &self,
        row: Row,
        column: Column,
        end: bool,
    ) -> Result<Cursor<S, A>, MatrixError> {
        self.check_row(row)?;
        self.check_column(column)?;
        let number = traversal::diagonal_number(S::TRAVERSAL.family, self.columns(), row, column);
        self.diagonal_cursor(number, end)
    }

    fn cursor_at_cell<S: Strategy, A: iterators::Access>(
        &self,
        row: Row,
        column: Column,
    ) -> Result<Cursor<S, A>, MatrixError> {
        self.check_row(row)?;
        self.check_column(column)?;
        let (frame, raw) =
            traversal::project(S::TRAVERSAL.family, self.rows(), self.columns(), row, column);
        Ok(Cursor::from_raw(self.storage.token(), frame, raw))
    }

    fn diagonal_cursor_at_index<S: Strategy, A: iterators::Access>(
        &self,
        number: isize,
        index: isize,
    ) -> Result<Cursor<S, A>, MatrixError> {
        let frame = self.diagonal_frame(number)?;
        if !traversal::raw_in_range(S::TRAVERSAL.direction, frame.len(), index) {
            return Err(MatrixError::DiagonalIndexOutOfBounds { index, size: frame.len() });
        }
        Ok(Cursor::from_raw(self.storage.token(), frame, index))
    }

    /**
     * A read only cursor at the first position of a traversal over the whole matrix. For
     * diagonal traversals this is the first position of diagonal 0. If the matrix is empty
     * this is also the end position.
     */
    pub fn begin<S: Strategy>(&self) -> Cursor<S, ReadOnly> {
        self.cursor_begin()
    }

    /**
     * A read only cursor at the end position of a traversal over the whole matrix.
     */
    pub fn end<S: Strategy>(&self) -> Cursor<S, ReadOnly> {
        self.cursor_end()
    }

    /// Read write version of [`begin`](Matrix::begin).
    pub fn begin_mut<S: Strategy>(&mut self) -> Cursor<S, ReadWrite> {
        self.cursor_begin()
    }

    /// Read write version of [`end`](Matrix::end).
    pub fn end_mut<S: Strategy>(&mut self) -> Cursor<S, ReadWrite> {
        self.cursor_end()
    }

    /**
     * A read only cursor at the first element of a row in a row major traversal. For a
     * reverse traversal that is the row's last column.
     */
    pub fn row_begin<S: RowWise>(&self, row: Row) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.line_cursor(row, false)
    }

    /**
     * A read only cursor just past the last element of a row in a row major traversal, which
     * is the first element of the next row, or the end of the traversal after the last row.
     */
    pub fn row_end<S: RowWise>(&self, row: Row) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.line_cursor(row, true)
    }

    /// Read write version of [`row_begin`](Matrix::row_begin).
    pub fn row_begin_mut<S: RowWise>(
        &mut self,
        row: Row,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.line_cursor(row, false)
    }

    /// Read write version of [`row_end`](Matrix::row_end).
    pub fn row_end_mut<S: RowWise>(
        &mut self,
        row: Row,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.line_cursor(row, true)
    }

    /**
     * A read only cursor at the first element of a column in a column major traversal.
     */
    pub fn column_begin<S: ColumnWise>(
        &self,
        column: Column,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.line_cursor(column, false)
    }

    /**
     * A read only cursor just past the last element of a column in a column major
     * traversal.
     */
    pub fn column_end<S: ColumnWise>(
        &self,
        column: Column,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.line_cursor(column, true)
    }

    /// Read write version of [`column_begin`](Matrix::column_begin).
    pub fn column_begin_mut<S: ColumnWise>(
        &mut self,
        column: Column,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.line_cursor(column, false)
    }

    /// Read write version of [`column_end`](Matrix::column_end).
    pub fn column_end_mut<S: ColumnWise>(
        &mut self,
        column: Column,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.line_cursor(column, true)
    }

    /**
     * A read only cursor at the first position along a diagonal, see
     * [traversal](traversal) for how diagonals are numbered.
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * use dense_matrix::matrices::iterators::{MainDiagonal, ReverseAntiDiagonal};
     * let matrix = Matrix::from_flat(3, 3, vec![
     *     1, 2, 3,
     *     4, 5, 6,
     *     7, 8, 9
     * ])?;
     * let above: Vec<i32> = matrix.diagonal_begin::<MainDiagonal>(1)?
     *     .values(&matrix)?
     *     .copied()
     *     .collect();
     * assert_eq!(above, vec![ 2, 6 ]);
     * let below: Vec<i32> = matrix.diagonal_begin::<ReverseAntiDiagonal>(-1)?
     *     .values(&matrix)?
     *     .copied()
     *     .collect();
     * assert_eq!(below, vec![ 8, 6 ]);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn diagonal_begin<S: Diagonal>(
        &self,
        number: isize,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.diagonal_cursor(number, false)
    }

    /**
     * A read only cursor at the end position of a diagonal.
     */
    pub fn diagonal_end<S: Diagonal>(
        &self,
        number: isize,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.diagonal_cursor(number, true)
    }

    /// Read write version of [`diagonal_begin`](Matrix::diagonal_begin).
    pub fn diagonal_begin_mut<S: Diagonal>(
        &mut self,
        number: isize,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.diagonal_cursor(number, false)
    }

    /// Read write version of [`diagonal_end`](Matrix::diagonal_end).
    pub fn diagonal_end_mut<S: Diagonal>(
        &mut self,
        number: isize,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.diagonal_cursor(number, true)
    }

    /**
     * A read only cursor at the first position of the diagonal passing through this cell.
     */
    pub fn diagonal_begin_through<S: Diagonal>(
        &self,
        row: Row,
        column: Column,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.diagonal_through(row, column, false)
    }

    /**
     * A read only cursor at the end position of the diagonal passing through this cell.
     */
    pub fn diagonal_end_through<S: Diagonal>(
        &self,
        row: Row,
        column: Column,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.diagonal_through(row, column, true)
    }

    /// Read write version of [`diagonal_begin_through`](Matrix::diagonal_begin_through).
    pub fn diagonal_begin_through_mut<S: Diagonal>(
        &mut self,
        row: Row,
        column: Column,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.diagonal_through(row, column, false)
    }

    /// Read write version of [`diagonal_end_through`](Matrix::diagonal_end_through).
    pub fn diagonal_end_through_mut<S: Diagonal>(
        &mut self,
        row: Row,
        column: Column,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.diagonal_through(row, column, true)
    }

    /**
     * A read only cursor pointing at this cell in any traversal. For diagonal traversals
     * the cursor walks the diagonal passing through the cell.
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * use dense_matrix::matrices::iterators::MainDiagonal;
     * let matrix = Matrix::from_flat(4, 3, vec![
     *     1, 2, -3,
     *     4, -5, 6,
     *     7, -8, 9,
     *     10, -11, 12
     * ])?;
     * let cursor = matrix.cursor_at::<MainDiagonal>(2, 1)?;
     * assert_eq!(cursor.get(&matrix)?, &-8);
     * assert_eq!(cursor.diagonal_number(), Some(-1));
     * assert_eq!(cursor.diagonal_index(), Some(1));
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn cursor_at<S: Strategy>(
        &self,
        row: Row,
        column: Column,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.cursor_at_cell(row, column)
    }

    /// Read write version of [`cursor_at`](Matrix::cursor_at).
    pub fn cursor_at_mut<S: Strategy>(
        &mut self,
        row: Row,
        column: Column,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.cursor_at_cell(row, column)
    }

    /**
     * A read only cursor at a raw index along a diagonal, counted from the diagonal's first
     * cell. Forward traversals accept indexes from 0 up to the diagonal's size, which is the
     * end position, and reverse traversals accept indexes from -1, which is the end
     * position, up to one less than the size.
     */
    pub fn diagonal_cursor_at<S: Diagonal>(
        &self,
        number: isize,
        index: isize,
    ) -> Result<Cursor<S, ReadOnly>, MatrixError> {
        self.diagonal_cursor_at_index(number, index)
    }

    /// Read write version of [`diagonal_cursor_at`](Matrix::diagonal_cursor_at).
    pub fn diagonal_cursor_at_mut<S: Diagonal>(
        &mut self,
        number: isize,
        index: isize,
    ) -> Result<Cursor<S, ReadWrite>, MatrixError> {
        self.diagonal_cursor_at_index(number, index)
    }
}

/**
 * Methods for matrices with types that can be copied.
 */
impl<T: Clone> Matrix<T> {
    /**
     * Creates a matrix of the provided size with all elements initialised to the provided
     * value.
     */
    pub fn filled(size: (Row, Column), value: T) -> Result<Matrix<T>, MatrixError> {
        let (rows, columns) = size;
        validate_shape(rows, columns)?;
        Ok(Matrix::from_storage(Storage::from_row_major(
            rows,
            columns,
            vec![value; rows * columns],
        )))
    }

    /**
     * Creates a square matrix with `on_diagonal` along its main diagonal and `off_diagonal`
     * everywhere else.
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * let identity = Matrix::diagonal(2, 0, 1)?;
     * assert_eq!(identity, Matrix::from_flat(2, 2, vec![ 1, 0, 0, 1 ])?);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn diagonal(
        size: usize,
        off_diagonal: T,
        on_diagonal: T,
    ) -> Result<Matrix<T>, MatrixError> {
        validate_dimension(size)?;
        let data = (0..size)
            .flat_map(|row| (0..size).map(move |column| row == column))
            .map(|on| if on { on_diagonal.clone() } else { off_diagonal.clone() })
            .collect();
        Ok(Matrix::from_storage(Storage::from_row_major(size, size, data)))
    }
}

/**
 * Methods for matrices with types that can be copied and default constructed, which
 * is what growing a matrix requires.
 */
impl<T: Clone + Default> Matrix<T> {
    /**
     * Grows the capacity to hold at least this many rows and columns, independently in
     * each dimension. Capacity is never reduced, and when there is already enough this does
     * nothing.
     */
    pub fn reserve(&mut self, rows: Row, columns: Column) -> Result<(), MatrixError> {
        self.storage.reserve(rows, columns)
    }

    /**
     * Changes the shape of the matrix, default constructing any new elements. Elements
     * that remain inside the new shape keep their positions.
     *
     * Shrinking keeps the capacity, so growing again afterwards does not reallocate.
     * Fails if either dimension exceeds [MAX_DIMENSION] or if only one of them is 0.
     */
    pub fn resize(&mut self, rows: Row, columns: Column) -> Result<(), MatrixError> {
        self.storage.resize(rows, columns, T::default)
    }

    /**
     * Changes the shape of the matrix, filling any new elements with copies of `value`.
     */
    pub fn resize_with_value(
        &mut self,
        rows: Row,
        columns: Column,
        value: T,
    ) -> Result<(), MatrixError> {
        self.storage.resize(rows, columns, || value.clone())
    }

    /**
     * Inserts a new row of default values so that it has index `row`, shifting this and
     * all following rows down. `row` may be equal to the number of rows to add a row to
     * the end.
     *
     * Rows are shifted by moving entries in a row table, never elements, and spare
     * capacity before the first row or after the last one is used when available.
     * Fails if the matrix is empty, as a row with no columns is not allowed.
     */
    pub fn insert_row(&mut self, row: Row) -> Result<(), MatrixError> {
        self.storage.insert_row(row, |_| T::default())
    }

    /**
     * Inserts a new row with every entry a copy of `value`.
     */
    pub fn insert_row_with_value(&mut self, row: Row, value: T) -> Result<(), MatrixError> {
        self.storage.insert_row(row, |_| value.clone())
    }

    /**
     * Inserts a new row taking its values in sequence from the iterator.
     *
     * Example of inserting column sums:
     * ```
     * use dense_matrix::matrices::Matrix;
     * let mut matrix = Matrix::from_flat(2, 3, vec![
     *     1, 2, 3,
     *     4, 5, 6
     * ])?;
     * let sums: Vec<i32> = (0..3)
     *     .map(|column| matrix.at(0, column).unwrap() + matrix.at(1, column).unwrap())
     *     .collect();
     * matrix.insert_row_with(1, sums)?;
     * assert_eq!(matrix, Matrix::from_flat(3, 3, vec![
     *     1, 2, 3,
     *     5, 7, 9,
     *     4, 5, 6
     * ])?);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     *
     * Fails without modifying the matrix if the iterator yields fewer values than there are
     * columns. Any further values are ignored.
     */
    pub fn insert_row_with<I>(&mut self, row: Row, values: I) -> Result<(), MatrixError>
    where
        I: IntoIterator<Item = T>,
    {
        let columns = self.columns();
        let values = take_exactly(values, columns)?;
        let mut values = values.into_iter();
        self.storage.insert_row(row, |_| values.next().unwrap_or_default())
    }

    /**
     * Inserts a new column of default values so that it has index `column`, shifting this
     * and all following columns right.
     */
    pub fn insert_column(&mut self, column: Column) -> Result<(), MatrixError> {
        self.storage.insert_column(column, |_| T::default())
    }

    /**
     * Inserts a new column with every entry a copy of `value`.
     */
    pub fn insert_column_with_value(
        &mut self,
        column: Column,
        value: T,
    ) -> Result<(), MatrixError> {
        self.storage.insert_column(column, |_| value.clone())
    }

    /**
     * Inserts a new column taking its values in sequence from the iterator. Fails without
     * modifying the matrix if the iterator yields fewer values than there are rows.
     */
    pub fn insert_column_with<I>(&mut self, column: Column, values: I) -> Result<(), MatrixError>
    where
        I: IntoIterator<Item = T>,
    {
        let rows = self.rows();
        let values = take_exactly(values, rows)?;
        let mut values = values.into_iter();
        self.storage.insert_column(column, |_| values.next().unwrap_or_default())
    }
}

fn take_exactly<T, I>(values: I, expected: usize) -> Result<Vec<T>, MatrixError>
where
    I: IntoIterator<Item = T>,
{
    let values: Vec<T> = values.into_iter().take(expected).collect();
    if values.len() < expected {
        return Err(MatrixError::InsufficientInitData {
            expected,
            provided: values.len(),
        });
    }
    Ok(values)
}

impl<T> Default for Matrix<T> {
    fn default() -> Self {
        Matrix::new()
    }
}

/**
 * Any matrix of a Cloneable type implements Clone. The copy has no spare capacity.
 */
impl<T: Clone> Clone for Matrix<T> {
    fn clone(&self) -> Self {
        Matrix::from_storage(self.storage.clone_compact())
    }
}

/**
 * PartialEq is implemented as two matrices are equal if and only if all their elements
 * are equal and they have the same size. Spare capacity is not compared.
 */
impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.rows() != other.rows() {
            return false;
        }
        if self.columns() != other.columns() {
            return false;
        }
        // perform elementwise check, return true only if every element in
        // each matrix is the same
        self.iter().zip(other.iter()).all(|(x, y)| x == y)
    }
}

impl<T: Eq> Eq for Matrix<T> {}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<Vec<&T>> = (0..self.rows())
            .map(|row| (0..self.columns()).map(|column| self.storage.get(row, column)).collect())
            .collect();
        f.debug_struct("Matrix")
            .field("rows", &self.rows())
            .field("columns", &self.columns())
            .field("data", &rows)
            .finish()
    }
}

/**
 * Prints each row in brackets on its own line.
 */
impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            write!(f, "[")?;
            for column in 0..self.columns() {
                if column > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.storage.get(row, column))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/**
 * Indexing by (row, column) panics if the position is out of bounds, use
 * [`at`](Matrix::at) to handle that case instead.
 */
impl<T> Index<(Row, Column)> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, (row, column): (Row, Column)) -> &T {
        match self.at(row, column) {
            Err(error) => panic!("{}", error),
            Ok(value) => value,
        }
    }
}

impl<T> IndexMut<(Row, Column)> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, (row, column): (Row, Column)) -> &mut T {
        match self.at_mut(row, column) {
            Err(error) => panic!("{}", error),
            Ok(value) => value,
        }
    }
}

/**
 * Indexing by a single usize counts elements in row major order and panics if the index is
 * out of bounds, use [`get_flat`](Matrix::get_flat) to handle that case instead.
 */
impl<T> Index<usize> for Matrix<T> {
    type Output = T;

    #[track_caller]
    fn index(&self, index: usize) -> &T {
        match self.get_flat(index) {
            Err(error) => panic!("{}", error),
            Ok(value) => value,
        }
    }
}

impl<T> IndexMut<usize> for Matrix<T> {
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_flat_mut(index) {
            Err(error) => panic!("{}", error),
            Ok(value) => value,
        }
    }
}

impl<'a, T> IntoIterator for &'a Matrix<T> {
    type Item = &'a T;
    type IntoIter = Values<'a, T, RowMajor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[test]
fn test_sync() {
    fn assert_sync<T: Sync>() {}
    assert_sync::<Matrix<f32>>();
    assert_sync::<iterators::ZIterator>();
}

#[test]
fn test_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Matrix<f32>>();
    assert_send::<iterators::ConstMIterator>();
}
