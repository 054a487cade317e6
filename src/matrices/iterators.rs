/*!
 * Random access cursors over a Matrix, and iterators built on them.
 *
 * A [Cursor] is a position in one of sixteen traversals of a matrix: row major ("Z"),
 * column major ("N"), along a main diagonal ("D") or along an anti-diagonal ("M"), each
 * walked forwards or in reverse, and each either read only or read write.
 *
 * Cursors do not borrow the matrix they were created from. They record which backing
 * storage they belong to and the shape it had, so a matrix can be freely mutated while
 * cursors into it exist. Any structural change such as a resize or an insertion may
 * leave a cursor pointing somewhere meaningless, so before relying on a cursor after
 * changing its matrix check it with [`is_valid_for`](Cursor::is_valid_for). Dereferencing
 * always performs that check and reports [`InvalidIterator`](MatrixError::InvalidIterator)
 * rather than reading the wrong element.
 *
 * Cursors can only be positioned through the factory methods on
 * [Matrix](crate::matrices::Matrix), such as [`begin`](crate::matrices::Matrix::begin) or
 * [`cursor_at`](crate::matrices::Matrix::cursor_at).
 *
 * ```
 * use dense_matrix::matrices::Matrix;
 * use dense_matrix::matrices::iterators::{ColumnMajor, RowMajor};
 * let matrix = Matrix::from_flat(2, 2, vec![
 *     1, 2,
 *     3, 4
 * ])?;
 * let mut cursor = matrix.begin::<ColumnMajor>();
 * assert_eq!(*cursor.get(&matrix)?, 1);
 * cursor += 1;
 * assert_eq!(*cursor.get(&matrix)?, 3);
 * assert_eq!(*cursor.get_at(&matrix, 2)?, 4);
 * let end = matrix.end::<ColumnMajor>();
 * assert_eq!((end - cursor)?, 3);
 * assert!(cursor < end);
 * // offsets past either end stop at the end
 * assert_eq!(cursor + 100, end);
 * let values: Vec<i32> = matrix.begin::<RowMajor>().values(&matrix)?.copied().collect();
 * assert_eq!(values, vec![1, 2, 3, 4]);
 * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
 * ```
 */

use std::cmp::Ordering;
use std::fmt;
use std::iter::{ExactSizeIterator, FusedIterator};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::matrices::errors::MatrixError;
use crate::matrices::storage::{Storage, StorageToken};
use crate::matrices::traversal::{self, Direction, Family, Frame, Traversal};
use crate::matrices::{Column, Matrix, Row};

mod sealed {
    pub trait Sealed {}
}

/**
 * Whether a cursor can be used to modify the elements it points at.
 */
pub trait Access: sealed::Sealed {}

/**
 * Marker for cursors that can only read elements.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReadOnly;

/**
 * Marker for cursors that can also write elements through
 * [`get_mut`](Cursor::get_mut) when given exclusive access to their matrix.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReadWrite;

impl sealed::Sealed for ReadOnly {}
impl sealed::Sealed for ReadWrite {}
impl Access for ReadOnly {}
impl Access for ReadWrite {}

/**
 * A traversal a cursor walks, fixed at compile time.
 */
pub trait Strategy: sealed::Sealed {
    const TRAVERSAL: Traversal;
}

/// Strategies walking one row after another.
pub trait RowWise: Strategy {}

/// Strategies walking one column after another.
pub trait ColumnWise: Strategy {}

/// Strategies walking a single main or anti-diagonal.
pub trait Diagonal: Strategy {}

macro_rules! strategy {
    ($(#[$doc:meta])* $name:ident, $family:ident, $direction:ident, $kind:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl Strategy for $name {
            const TRAVERSAL: Traversal = Traversal::new(Family::$family, Direction::$direction);
        }

        impl $kind for $name {}
    };
}

strategy!(
    /// Row major traversal from the top left to the bottom right.
    RowMajor, RowMajor, Forward, RowWise
);
strategy!(
    /// Row major traversal from the bottom right to the top left.
    ReverseRowMajor, RowMajor, Reverse, RowWise
);
strategy!(
    /// Column major traversal from the top left to the bottom right.
    ColumnMajor, ColumnMajor, Forward, ColumnWise
);
strategy!(
    /// Column major traversal from the bottom right to the top left.
    ReverseColumnMajor, ColumnMajor, Reverse, ColumnWise
);
strategy!(
    /// Down and to the right along one main diagonal.
    MainDiagonal, MainDiagonal, Forward, Diagonal
);
strategy!(
    /// Up and to the left along one main diagonal.
    ReverseMainDiagonal, MainDiagonal, Reverse, Diagonal
);
strategy!(
    /// Down and to the left along one anti-diagonal.
    AntiDiagonal, AntiDiagonal, Forward, Diagonal
);
strategy!(
    /// Up and to the right along one anti-diagonal.
    ReverseAntiDiagonal, AntiDiagonal, Reverse, Diagonal
);

/**
 * A random access position in a traversal of a matrix.
 *
 * `S` is the traversal walked and `A` whether the cursor may write elements. Cursors are
 * `Copy`, so a post increment is a copy followed by [`increment`](Cursor::increment).
 *
 * A default constructed cursor is unbound: it belongs to no matrix, is only valid against
 * an empty matrix and never points at an element.
 *
 * Two cursors can be compared or subtracted when they were created from the same storage
 * while it had the same shape (or the same diagonal, for diagonal traversals). Comparing
 * incompatible cursors returns `None` from `partial_cmp`, and subtracting them returns
 * [`IncompatibleIterators`](MatrixError::IncompatibleIterators).
 */
pub struct Cursor<S, A = ReadOnly> {
    token: Option<StorageToken>,
    frame: Frame,
    ordinal: usize,
    _traversal: PhantomData<fn() -> (S, A)>,
}

/// Row major, read write.
pub type ZIterator = Cursor<RowMajor, ReadWrite>;
/// Row major, read only.
pub type ConstZIterator = Cursor<RowMajor, ReadOnly>;
/// Reverse row major, read write.
pub type ReverseZIterator = Cursor<ReverseRowMajor, ReadWrite>;
/// Reverse row major, read only.
pub type ConstReverseZIterator = Cursor<ReverseRowMajor, ReadOnly>;
/// Column major, read write.
pub type NIterator = Cursor<ColumnMajor, ReadWrite>;
/// Column major, read only.
pub type ConstNIterator = Cursor<ColumnMajor, ReadOnly>;
/// Reverse column major, read write.
pub type ReverseNIterator = Cursor<ReverseColumnMajor, ReadWrite>;
/// Reverse column major, read only.
pub type ConstReverseNIterator = Cursor<ReverseColumnMajor, ReadOnly>;
/// Main diagonal, read write.
pub type DIterator = Cursor<MainDiagonal, ReadWrite>;
/// Main diagonal, read only.
pub type ConstDIterator = Cursor<MainDiagonal, ReadOnly>;
/// Reverse main diagonal, read write.
pub type ReverseDIterator = Cursor<ReverseMainDiagonal, ReadWrite>;
/// Reverse main diagonal, read only.
pub type ConstReverseDIterator = Cursor<ReverseMainDiagonal, ReadOnly>;
/// Anti-diagonal, read write.
pub type MIterator = Cursor<AntiDiagonal, ReadWrite>;
/// Anti-diagonal, read only.
pub type ConstMIterator = Cursor<AntiDiagonal, ReadOnly>;
/// Reverse anti-diagonal, read write.
pub type ReverseMIterator = Cursor<ReverseAntiDiagonal, ReadWrite>;
/// Reverse anti-diagonal, read only.
pub type ConstReverseMIterator = Cursor<ReverseAntiDiagonal, ReadOnly>;

impl<S, A> Clone for Cursor<S, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, A> Copy for Cursor<S, A> {}

impl<S: Strategy, A: Access> Default for Cursor<S, A> {
    fn default() -> Self {
        Cursor {
            token: None,
            frame: Frame::unbound(S::TRAVERSAL.family),
            ordinal: 0,
            _traversal: PhantomData,
        }
    }
}

impl<S: Strategy, A: Access> fmt::Debug for Cursor<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("traversal", &S::TRAVERSAL)
            .field("bound", &self.is_bound())
            .field("position", &self.position())
            .field("ordinal", &self.ordinal)
            .field("len", &self.frame.len())
            .finish()
    }
}

/**
 * A read write cursor can always be used where a read only one is expected.
 */
impl<S> From<Cursor<S, ReadWrite>> for Cursor<S, ReadOnly> {
    fn from(cursor: Cursor<S, ReadWrite>) -> Self {
        Cursor {
            token: cursor.token,
            frame: cursor.frame,
            ordinal: cursor.ordinal,
            _traversal: PhantomData,
        }
    }
}

impl<S: Strategy, A: Access> Cursor<S, A> {
    pub(crate) fn bound(token: StorageToken, frame: Frame, ordinal: usize) -> Self {
        Cursor {
            token: Some(token),
            frame,
            ordinal,
            _traversal: PhantomData,
        }
    }

    /// Creates a cursor from a raw position, which must be in range for the direction.
    pub(crate) fn from_raw(token: StorageToken, frame: Frame, raw: isize) -> Self {
        let ordinal = traversal::ordinal_of(S::TRAVERSAL.direction, frame.len(), raw);
        Cursor::bound(token, frame, ordinal)
    }

    /**
     * The traversal this cursor walks.
     */
    pub fn traversal(&self) -> Traversal {
        S::TRAVERSAL
    }

    /**
     * Returns true if this cursor was created from a matrix rather than by `default()`.
     */
    pub fn is_bound(&self) -> bool {
        self.token.is_some()
    }

    /**
     * Returns true if this cursor is at the end of its traversal and so cannot be
     * dereferenced. Unbound cursors are always at the end.
     */
    pub fn is_end(&self) -> bool {
        self.ordinal >= self.frame.len()
    }

    /**
     * Number of elements left to visit from this position to the end of the traversal.
     */
    pub fn remaining(&self) -> usize {
        self.frame.len() - self.ordinal
    }

    /**
     * Checks if this cursor can be used with the matrix. A bound cursor is valid if it was
     * created from the matrix's current backing storage and the matrix still has the shape
     * it had at the time, or for diagonal traversals if the diagonal still exists and has
     * the same length. An unbound cursor is only valid for an empty matrix.
     *
     * This is only ever checked on demand, a cursor is never updated to follow changes
     * to its matrix.
     */
    pub fn is_valid_for<T>(&self, matrix: &Matrix<T>) -> bool {
        let storage = &matrix.storage;
        match self.token {
            None => matrix.is_empty(),
            Some(token) => {
                token == storage.token()
                    && self.frame.matches(S::TRAVERSAL.family, storage.rows(), storage.columns())
            }
        }
    }

    /**
     * Returns true if the two cursors can be compared and subtracted, which is the case
     * when they belong to the same storage and walk the same frame.
     */
    pub fn is_compatible(&self, other: &Self) -> bool {
        let family = S::TRAVERSAL.family;
        self.token == other.token && self.frame.identity(family) == other.frame.identity(family)
    }

    /**
     * The (row, column) this cursor points at, or None if it is unbound. At the end of a
     * traversal this reports the coordinates just outside the matrix, such as
     * `(rows - 1, columns)` for row major traversals or `(0, -1)` for reverse row major.
     */
    pub fn position(&self) -> Option<(isize, isize)> {
        self.token?;
        Some(traversal::coordinates(S::TRAVERSAL, &self.frame, self.ordinal))
    }

    /// The row of [`position`](Cursor::position).
    pub fn row(&self) -> Option<isize> {
        self.position().map(|(row, _)| row)
    }

    /// The column of [`position`](Cursor::position).
    pub fn column(&self) -> Option<isize> {
        self.position().map(|(_, column)| column)
    }

    /**
     * Moves to the next position, stopping at the end.
     */
    pub fn increment(&mut self) {
        *self += 1;
    }

    /**
     * Moves to the previous position, stopping at the first.
     */
    pub fn decrement(&mut self) {
        *self -= 1;
    }

    /**
     * Returns how many increments take `other` to this cursor, which is negative if this
     * cursor comes first.
     */
    pub fn distance_from(&self, other: &Self) -> Result<isize, MatrixError> {
        if !self.is_compatible(other) {
            return Err(MatrixError::IncompatibleIterators);
        }
        Ok(self.ordinal as isize - other.ordinal as isize)
    }

    /**
     * Compares the positions of two cursors in traversal order.
     */
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, MatrixError> {
        if !self.is_compatible(other) {
            return Err(MatrixError::IncompatibleIterators);
        }
        Ok(self.ordinal.cmp(&other.ordinal))
    }

    /// Logical (row, column) of the element at an ordinal, which must be dereferenceable.
    fn cell(&self, ordinal: usize) -> (Row, Column) {
        let (row, column) = traversal::coordinates(S::TRAVERSAL, &self.frame, ordinal);
        (row as usize, column as usize)
    }

    fn check_valid<T>(&self, matrix: &Matrix<T>) -> Result<(), MatrixError> {
        if self.is_valid_for(matrix) {
            Ok(())
        } else {
            Err(MatrixError::InvalidIterator)
        }
    }

    /// Resolves the element `offset` positions away, without clamping.
    fn target(&self, offset: isize) -> Result<(Row, Column), MatrixError> {
        let ordinal = (self.ordinal as isize)
            .checked_add(offset)
            .filter(|ordinal| 0 <= *ordinal && *ordinal < self.frame.len() as isize)
            .ok_or(MatrixError::IteratorIndexOutOfBounds { offset })?;
        Ok(self.cell(ordinal as usize))
    }

    /**
     * Gets a reference to the element this cursor points at.
     *
     * Fails with [`InvalidIterator`](MatrixError::InvalidIterator) if the cursor is not
     * [valid for](Cursor::is_valid_for) the matrix, and with
     * [`DereferenceOfSentinelIterator`](MatrixError::DereferenceOfSentinelIterator) if it is at
     * the end of its traversal.
     */
    pub fn get<'a, T>(&self, matrix: &'a Matrix<T>) -> Result<&'a T, MatrixError> {
        self.check_valid(matrix)?;
        if self.is_end() {
            return Err(MatrixError::DereferenceOfSentinelIterator);
        }
        let (row, column) = self.cell(self.ordinal);
        Ok(matrix.storage.get(row, column))
    }

    /**
     * Gets a reference to the element `offset` positions away from this cursor, the same
     * element `(cursor + offset).get(matrix)` would return except that an offset past
     * either end of the traversal fails with
     * [`IteratorIndexOutOfBounds`](MatrixError::IteratorIndexOutOfBounds) instead of
     * stopping at the end.
     */
    pub fn get_at<'a, T>(
        &self,
        matrix: &'a Matrix<T>,
        offset: isize,
    ) -> Result<&'a T, MatrixError> {
        self.check_valid(matrix)?;
        let (row, column) = self.target(offset)?;
        Ok(matrix.storage.get(row, column))
    }

    /**
     * Returns an iterator over references to the elements from this position up to the end
     * of the traversal.
     */
    pub fn values<'a, T>(self, matrix: &'a Matrix<T>) -> Result<Values<'a, T, S>, MatrixError> {
        self.check_valid(matrix)?;
        Ok(Values {
            storage: &matrix.storage,
            frame: self.frame,
            next: self.ordinal,
            stop: self.frame.len(),
            _traversal: PhantomData,
        })
    }

    /**
     * Returns an iterator over references to the elements from this position up to but not
     * including `end`. If `end` comes before this cursor the iterator is empty.
     */
    pub fn values_to<'a, T>(
        self,
        end: Self,
        matrix: &'a Matrix<T>,
    ) -> Result<Values<'a, T, S>, MatrixError> {
        if !self.is_compatible(&end) {
            return Err(MatrixError::IncompatibleIterators);
        }
        let mut values = self.values(matrix)?;
        values.stop = end.ordinal.max(self.ordinal);
        Ok(values)
    }
}

impl<S: Strategy> Cursor<S, ReadWrite> {
    /**
     * Gets a mutable reference to the element this cursor points at, failing for the same
     * reasons as [`get`](Cursor::get).
     */
    pub fn get_mut<'a, T>(&self, matrix: &'a mut Matrix<T>) -> Result<&'a mut T, MatrixError> {
        self.check_valid(matrix)?;
        if self.is_end() {
            return Err(MatrixError::DereferenceOfSentinelIterator);
        }
        let (row, column) = self.cell(self.ordinal);
        Ok(matrix.storage.get_mut(row, column))
    }

    /**
     * Gets a mutable reference to the element `offset` positions away from this cursor,
     * failing for the same reasons as [`get_at`](Cursor::get_at).
     */
    pub fn get_at_mut<'a, T>(
        &self,
        matrix: &'a mut Matrix<T>,
        offset: isize,
    ) -> Result<&'a mut T, MatrixError> {
        self.check_valid(matrix)?;
        let (row, column) = self.target(offset)?;
        Ok(matrix.storage.get_mut(row, column))
    }

    /**
     * Returns an iterator over mutable references to the elements from this position up to
     * the end of the traversal.
     *
     * ```
     * use dense_matrix::matrices::Matrix;
     * use dense_matrix::matrices::iterators::AntiDiagonal;
     * let mut matrix = Matrix::filled((3, 3), 0)?;
     * let cursor = matrix.begin_mut::<AntiDiagonal>();
     * for element in cursor.values_mut(&mut matrix)? {
     *     *element = 1;
     * }
     * assert_eq!(matrix, Matrix::from_flat(3, 3, vec![
     *     0, 0, 1,
     *     0, 1, 0,
     *     1, 0, 0
     * ])?);
     * # Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
     * ```
     */
    pub fn values_mut<'a, T>(
        self,
        matrix: &'a mut Matrix<T>,
    ) -> Result<ValuesMut<'a, T>, MatrixError> {
        self.check_valid(matrix)?;
        let cells: Vec<(Row, Column)> = (self.ordinal..self.frame.len())
            .map(|ordinal| self.cell(ordinal))
            .collect();
        Ok(ValuesMut::new(matrix.storage.get_many_mut(cells)))
    }
}

impl<S: Diagonal, A: Access> Cursor<S, A> {
    /**
     * The number of the diagonal this cursor walks, or None if it is unbound.
     */
    pub fn diagonal_number(&self) -> Option<isize> {
        self.token?;
        match self.frame {
            Frame::Diagonal { number, .. } => Some(number),
            Frame::Grid { .. } => None,
        }
    }

    /**
     * The raw index along the diagonal counted from its first cell, or None if unbound.
     * Forward cursors end at the diagonal's size and reverse cursors end at -1.
     */
    pub fn diagonal_index(&self) -> Option<isize> {
        self.token?;
        Some(traversal::raw_position(
            S::TRAVERSAL.direction,
            self.frame.len(),
            self.ordinal,
        ))
    }

    /**
     * The number of elements on the diagonal when this cursor was created, or None if
     * unbound.
     */
    pub fn diagonal_size(&self) -> Option<usize> {
        self.token?;
        Some(self.frame.len())
    }
}

/**
 * Moves a cursor forward by some offset, or backward for negative offsets, stopping exactly
 * at the first position or the end.
 */
impl<S: Strategy, A: Access> Add<isize> for Cursor<S, A> {
    type Output = Cursor<S, A>;

    fn add(mut self, offset: isize) -> Self::Output {
        self.ordinal = traversal::offset_ordinal(self.ordinal, self.frame.len(), offset);
        self
    }
}

impl<S: Strategy, A: Access> Sub<isize> for Cursor<S, A> {
    type Output = Cursor<S, A>;

    fn sub(self, offset: isize) -> Self::Output {
        // negating isize::MIN would overflow, and any offset that large clamps the same way
        self + offset.checked_neg().unwrap_or(isize::MAX)
    }
}

impl<S: Strategy, A: Access> AddAssign<isize> for Cursor<S, A> {
    fn add_assign(&mut self, offset: isize) {
        *self = *self + offset;
    }
}

impl<S: Strategy, A: Access> SubAssign<isize> for Cursor<S, A> {
    fn sub_assign(&mut self, offset: isize) {
        *self = *self - offset;
    }
}

/**
 * The distance between two cursors, see [`distance_from`](Cursor::distance_from).
 */
impl<S: Strategy, A: Access> Sub for Cursor<S, A> {
    type Output = Result<isize, MatrixError>;

    fn sub(self, other: Self) -> Self::Output {
        self.distance_from(&other)
    }
}

/**
 * Two cursors are equal if they are compatible and at the same position.
 */
impl<S: Strategy, A: Access> PartialEq for Cursor<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.is_compatible(other) && self.ordinal == other.ordinal
    }
}

/**
 * Cursors are ordered by traversal order, so for reverse traversals the cursor nearer the
 * bottom right of the matrix is the smaller one. Incompatible cursors are unordered.
 */
impl<S: Strategy, A: Access> PartialOrd for Cursor<S, A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

/**
 * An iterator over references to elements of a matrix, following one traversal.
 */
pub struct Values<'a, T, S> {
    storage: &'a Storage<T>,
    frame: Frame,
    next: usize,
    stop: usize,
    _traversal: PhantomData<fn() -> S>,
}

impl<'a, T> Values<'a, T, RowMajor> {
    /// Every element of the storage in row major order.
    pub(crate) fn whole(storage: &'a Storage<T>) -> Self {
        let frame = Frame::grid(storage.rows(), storage.columns());
        Values {
            storage,
            frame,
            next: 0,
            stop: frame.len(),
            _traversal: PhantomData,
        }
    }
}

impl<T, S> fmt::Debug for Values<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values")
            .field("next", &self.next)
            .field("stop", &self.stop)
            .finish()
    }
}

impl<'a, T, S: Strategy> Iterator for Values<'a, T, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.stop {
            return None;
        }
        let (row, column) = traversal::coordinates(S::TRAVERSAL, &self.frame, self.next);
        self.next += 1;
        Some(self.storage.get(row as usize, column as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.stop.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<T, S: Strategy> FusedIterator for Values<'_, T, S> {}
impl<T, S: Strategy> ExactSizeIterator for Values<'_, T, S> {}

/**
 * An iterator over mutable references to elements of a matrix, following one traversal.
 */
#[derive(Debug)]
pub struct ValuesMut<'a, T> {
    elements: std::vec::IntoIter<&'a mut T>,
}

impl<'a, T> ValuesMut<'a, T> {
    pub(crate) fn new(elements: Vec<&'a mut T>) -> Self {
        ValuesMut {
            elements: elements.into_iter(),
        }
    }
}

impl<'a, T> Iterator for ValuesMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.elements.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.elements.size_hint()
    }
}

impl<T> FusedIterator for ValuesMut<'_, T> {}
impl<T> ExactSizeIterator for ValuesMut<'_, T> {}
