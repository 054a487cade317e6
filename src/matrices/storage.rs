/*!
 * Backing storage and capacity management for a [Matrix](crate::matrices::Matrix).
 *
 * All elements live in one contiguous buffer of `row_capacity * column_capacity` slots,
 * organised as `row_capacity` blocks of `column_capacity` slots each. A row table maps every
 * row slot to the physical block holding it, so rows can be inserted, erased and swapped by
 * moving table entries instead of elements.
 *
 * The logical matrix occupies the row slots `row_offset..row_offset + rows` and, within
 * every block, the column slots `column_offset..column_offset + columns`. Anything outside
 * of that is slack which insertions on either side can claim without reallocating.
 */

use std::sync::atomic::{AtomicU64, Ordering};

use log::trace;

use crate::matrices::errors::MatrixError;
use crate::matrices::{Column, MAX_DIMENSION, Row};

/// Counter for unique [`StorageToken`] allocation.
static STORAGE_COUNTER: AtomicU64 = AtomicU64::new(1);

/**
 * Identity of one backing allocation.
 *
 * A fresh token is drawn whenever a new buffer is allocated, so two different buffers never
 * share a token even if one is allocated at the address the other was freed from. Moving a
 * matrix moves its buffer, and so keeps the token.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct StorageToken(u64);

impl StorageToken {
    pub(crate) fn next() -> Self {
        StorageToken(STORAGE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

pub(crate) struct Storage<T> {
    data: Vec<T>,
    row_table: Vec<usize>,
    rows: Row,
    columns: Column,
    row_capacity: Row,
    column_capacity: Column,
    row_offset: Row,
    column_offset: Column,
    token: StorageToken,
}

/// Checks both dimensions are in range and are either both zero or both non zero.
pub(crate) fn validate_shape(rows: Row, columns: Column) -> Result<(), MatrixError> {
    validate_dimension(rows)?;
    validate_dimension(columns)?;
    if (rows == 0) != (columns == 0) {
        return Err(MatrixError::InconsistentShape { rows, columns });
    }
    Ok(())
}

pub(crate) fn validate_dimension(dimension: usize) -> Result<(), MatrixError> {
    if dimension > MAX_DIMENSION {
        return Err(MatrixError::DimensionExceedsMaximum {
            requested: dimension,
            maximum: MAX_DIMENSION,
        });
    }
    Ok(())
}

/// Capacity to allocate when `required` slots are needed and `current` are allocated.
/// Doubles so that repeated growth is amortized constant time per slot.
fn grown(current: usize, required: usize) -> usize {
    required.max(current.saturating_mul(2).min(MAX_DIMENSION))
}

impl<T> Storage<T> {
    pub(crate) fn empty() -> Storage<T> {
        Storage {
            data: Vec::new(),
            row_table: Vec::new(),
            rows: 0,
            columns: 0,
            row_capacity: 0,
            column_capacity: 0,
            row_offset: 0,
            column_offset: 0,
            token: StorageToken::next(),
        }
    }

    /**
     * Creates storage with no slack from row major data. The caller must have checked the
     * shape is valid and that `data` holds exactly `rows * columns` elements.
     */
    pub(crate) fn from_row_major(rows: Row, columns: Column, data: Vec<T>) -> Storage<T> {
        debug_assert_eq!(data.len(), rows * columns);
        Storage {
            data,
            row_table: (0..rows).collect(),
            rows,
            columns,
            row_capacity: rows,
            column_capacity: columns,
            row_offset: 0,
            column_offset: 0,
            token: StorageToken::next(),
        }
    }

    pub(crate) fn rows(&self) -> Row {
        self.rows
    }

    pub(crate) fn columns(&self) -> Column {
        self.columns
    }

    pub(crate) fn row_capacity(&self) -> Row {
        self.row_capacity
    }

    pub(crate) fn column_capacity(&self) -> Column {
        self.column_capacity
    }

    pub(crate) fn token(&self) -> StorageToken {
        self.token
    }

    /// Physical buffer index of a logical position, which must be in range.
    #[inline]
    fn index_of(&self, row: Row, column: Column) -> usize {
        self.row_table[self.row_offset + row] * self.column_capacity + self.column_offset + column
    }

    #[inline]
    pub(crate) fn get(&self, row: Row, column: Column) -> &T {
        &self.data[self.index_of(row, column)]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, row: Row, column: Column) -> &mut T {
        let index = self.index_of(row, column);
        &mut self.data[index]
    }

    /**
     * Returns exclusive references to the elements at each of the logical positions,
     * in the order given. Positions must be in range and distinct, any repeats are skipped.
     *
     * The buffer is split into one slice per physical block, and only the blocks of rows
     * that are actually visited are broken up into elements, so the work done is bounded by
     * the row capacity plus the rows touched, never by the whole buffer.
     */
    pub(crate) fn get_many_mut<I>(&mut self, positions: I) -> Vec<&mut T>
    where
        I: IntoIterator<Item = (Row, Column)>,
    {
        let positions = positions.into_iter();
        if self.column_capacity == 0 {
            return Vec::new();
        }
        let row_table = &self.row_table;
        let row_offset = self.row_offset;
        let column_offset = self.column_offset;
        let columns = self.columns;
        let mut blocks: Vec<Option<&mut [T]>> =
            self.data.chunks_mut(self.column_capacity).map(Some).collect();
        let mut rows: Vec<Option<Vec<Option<&mut T>>>> = (0..self.rows).map(|_| None).collect();
        let mut elements = Vec::with_capacity(positions.size_hint().0);
        for (row, column) in positions {
            let Some(slot) = rows.get_mut(row) else {
                continue;
            };
            let cells = slot.get_or_insert_with(|| {
                blocks
                    .get_mut(row_table[row_offset + row])
                    .and_then(Option::take)
                    .map_or_else(Vec::new, |block| {
                        block
                            .iter_mut()
                            .skip(column_offset)
                            .take(columns)
                            .map(Some)
                            .collect()
                    })
            });
            if let Some(element) = cells.get_mut(column).and_then(Option::take) {
                elements.push(element);
            }
        }
        elements
    }

    pub(crate) fn swap_rows(&mut self, a: Row, b: Row) {
        self.row_table.swap(self.row_offset + a, self.row_offset + b);
    }

    pub(crate) fn swap_columns(&mut self, a: Column, b: Column) {
        if a == b {
            return;
        }
        for row in 0..self.rows {
            let first = self.index_of(row, a);
            let second = self.index_of(row, b);
            self.data.swap(first, second);
        }
    }

    /// Exchanges two elements, both of which must exist.
    pub(crate) fn swap_elements(&mut self, a: (Row, Column), b: (Row, Column)) {
        let first = self.index_of(a.0, a.1);
        let second = self.index_of(b.0, b.1);
        self.data.swap(first, second);
    }

    /**
     * Removes a row which must exist. The erased row's block is rotated out to whichever
     * end of the row slots needs fewer table moves and becomes slack there.
     */
    pub(crate) fn erase_row(&mut self, row: Row) {
        let start = self.row_offset;
        if row < self.rows - 1 - row {
            self.row_table[start..=start + row].rotate_right(1);
            self.row_offset += 1;
        } else {
            self.row_table[start + row..start + self.rows].rotate_left(1);
        }
        self.rows -= 1;
        if self.rows == 0 {
            self.columns = 0;
        }
    }

    /**
     * Removes a column which must exist, shifting the elements on its cheaper side within
     * every row block.
     */
    pub(crate) fn erase_column(&mut self, column: Column) {
        let start = self.column_offset;
        let front = column < self.columns - 1 - column;
        for slot in self.row_offset..self.row_offset + self.rows {
            let block = self.row_table[slot] * self.column_capacity;
            if front {
                self.data[block + start..=block + start + column].rotate_right(1);
            } else {
                self.data[block + start + column..block + start + self.columns].rotate_left(1);
            }
        }
        if front {
            self.column_offset += 1;
        }
        self.columns -= 1;
        if self.columns == 0 {
            self.rows = 0;
        }
    }

    /// Shrinks the logical number of rows, keeping the capacity.
    pub(crate) fn truncate_rows(&mut self, rows: Row) {
        if rows < self.rows {
            self.rows = rows;
            if rows == 0 {
                self.columns = 0;
            }
        }
    }

    /// Shrinks the logical number of columns, keeping the capacity.
    pub(crate) fn truncate_columns(&mut self, columns: Column) {
        if columns < self.columns {
            self.columns = columns;
            if columns == 0 {
                self.rows = 0;
            }
        }
    }

    /// Sets the logical shape to empty, keeping the capacity.
    pub(crate) fn truncate_to_empty(&mut self) {
        self.rows = 0;
        self.columns = 0;
    }

    /**
     * Moves all logical elements out in row major order, leaving this storage empty with
     * a new token.
     */
    pub(crate) fn take_row_major(&mut self) -> Vec<T> {
        let compact = self.row_offset == 0
            && self.column_offset == 0
            && self.row_capacity == self.rows
            && self.column_capacity == self.columns
            && self.row_table.iter().enumerate().all(|(slot, block)| slot == *block);
        let taken = std::mem::replace(self, Storage::empty());
        if compact {
            return taken.data;
        }
        let indexes: Vec<usize> = (0..taken.rows)
            .flat_map(|row| (0..taken.columns).map(move |column| (row, column)))
            .map(|(row, column)| taken.index_of(row, column))
            .collect();
        let mut slots: Vec<Option<T>> = taken.data.into_iter().map(Some).collect();
        indexes
            .into_iter()
            .filter_map(|index| slots.get_mut(index).and_then(Option::take))
            .collect()
    }
}

impl<T: Clone> Storage<T> {
    /// Copies the logical elements into new storage with no slack.
    pub(crate) fn clone_compact(&self) -> Storage<T> {
        let data = (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| self.get(row, column).clone()))
            .collect();
        Storage::from_row_major(self.rows, self.columns, data)
    }
}

impl<T: Default> Storage<T> {
    /**
     * Moves every logical element into a newly allocated buffer with the given capacities
     * and offsets, which must be able to hold the current shape. The new row table is the
     * identity mapping.
     */
    fn relocate(
        &mut self,
        row_capacity: Row,
        column_capacity: Column,
        row_offset: Row,
        column_offset: Column,
    ) {
        debug_assert!(row_offset + self.rows <= row_capacity);
        debug_assert!(column_offset + self.columns <= column_capacity);
        let mut data: Vec<T> = std::iter::repeat_with(T::default)
            .take(row_capacity * column_capacity)
            .collect();
        for row in 0..self.rows {
            for column in 0..self.columns {
                let from = self.index_of(row, column);
                let to = (row_offset + row) * column_capacity + column_offset + column;
                data[to] = std::mem::take(&mut self.data[from]);
            }
        }
        let token = StorageToken::next();
        trace!(
            "matrix storage reallocated from {}x{} to {}x{} capacity, token {:?} -> {:?}",
            self.row_capacity,
            self.column_capacity,
            row_capacity,
            column_capacity,
            self.token,
            token
        );
        self.data = data;
        self.row_table = (0..row_capacity).collect();
        self.row_capacity = row_capacity;
        self.column_capacity = column_capacity;
        self.row_offset = row_offset;
        self.column_offset = column_offset;
        self.token = token;
    }

    /**
     * Grows capacity to at least the requested values in each dimension. Never shrinks and
     * does nothing at all when the current capacity already suffices.
     */
    pub(crate) fn reserve(
        &mut self,
        row_capacity: Row,
        column_capacity: Column,
    ) -> Result<(), MatrixError> {
        validate_dimension(row_capacity)?;
        validate_dimension(column_capacity)?;
        if row_capacity <= self.row_capacity && column_capacity <= self.column_capacity {
            return Ok(());
        }
        self.relocate(
            row_capacity.max(self.row_capacity),
            column_capacity.max(self.column_capacity),
            self.row_offset,
            self.column_offset,
        );
        Ok(())
    }

    /**
     * Ensures there are at least `front` slack row slots before the logical rows and `back`
     * after them, reallocating with extra room when there are not.
     */
    pub(crate) fn ensure_row_slack(&mut self, front: Row, back: Row) {
        let trailing = self.row_capacity - self.row_offset - self.rows;
        if self.row_offset >= front && trailing >= back {
            return;
        }
        let required = self.rows + front + back;
        let capacity = grown(self.row_capacity, required);
        let offset = front + (capacity - required) / 2;
        self.relocate(capacity, self.column_capacity, offset, self.column_offset);
    }

    /// Column counterpart of [`ensure_row_slack`](Storage::ensure_row_slack).
    pub(crate) fn ensure_column_slack(&mut self, front: Column, back: Column) {
        let trailing = self.column_capacity - self.column_offset - self.columns;
        if self.column_offset >= front && trailing >= back {
            return;
        }
        let required = self.columns + front + back;
        let capacity = grown(self.column_capacity, required);
        let offset = front + (capacity - required) / 2;
        self.relocate(self.row_capacity, capacity, self.row_offset, offset);
    }

    /**
     * Changes the logical shape. Shrinking keeps the capacity, growing fills every new
     * position using `fill`.
     */
    pub(crate) fn resize<F>(
        &mut self,
        rows: Row,
        columns: Column,
        mut fill: F,
    ) -> Result<(), MatrixError>
    where
        F: FnMut() -> T,
    {
        validate_shape(rows, columns)?;
        if rows == 0 {
            self.truncate_to_empty();
            return Ok(());
        }
        let row_room = self.row_capacity - self.row_offset;
        let column_room = self.column_capacity - self.column_offset;
        if rows > row_room || columns > column_room {
            let (row_capacity, row_offset) = if rows > row_room {
                let capacity = grown(self.row_capacity, rows);
                (capacity, self.row_offset.min(capacity - rows))
            } else {
                (self.row_capacity, self.row_offset)
            };
            let (column_capacity, column_offset) = if columns > column_room {
                let capacity = grown(self.column_capacity, columns);
                (capacity, self.column_offset.min(capacity - columns))
            } else {
                (self.column_capacity, self.column_offset)
            };
            self.relocate(row_capacity, column_capacity, row_offset, column_offset);
        }
        let kept_rows = self.rows.min(rows);
        let kept_columns = self.columns.min(columns);
        self.rows = rows;
        self.columns = columns;
        for row in 0..rows {
            let first_new = if row < kept_rows { kept_columns } else { 0 };
            for column in first_new..columns {
                *self.get_mut(row, column) = fill();
            }
        }
        Ok(())
    }

    /**
     * Inserts a row at `row`, filling each column using `fill`. Slack on whichever side
     * requires fewer row table moves is used, and the row capacity only grows when there is
     * no slack on either side.
     */
    pub(crate) fn insert_row<F>(&mut self, row: Row, mut fill: F) -> Result<(), MatrixError>
    where
        F: FnMut(Column) -> T,
    {
        if row > self.rows {
            return Err(MatrixError::RowDoesNotExist { row, rows: self.rows });
        }
        if self.columns == 0 {
            return Err(MatrixError::InconsistentShape { rows: 1, columns: 0 });
        }
        if self.rows >= MAX_DIMENSION {
            return Err(MatrixError::MaximumCapacityReached { maximum: MAX_DIMENSION });
        }
        let mut front = self.row_offset > 0;
        let mut back = self.row_offset + self.rows < self.row_capacity;
        if !front && !back {
            let capacity = grown(self.row_capacity, self.rows + 1);
            let offset = (capacity - self.rows) / 2;
            self.relocate(capacity, self.column_capacity, offset, self.column_offset);
            front = self.row_offset > 0;
            back = self.row_offset + self.rows < self.row_capacity;
        }
        let start = self.row_offset;
        if front && (!back || row < self.rows - row) {
            self.row_table[start - 1..start + row].rotate_left(1);
            self.row_offset -= 1;
        } else {
            self.row_table[start + row..=start + self.rows].rotate_right(1);
        }
        self.rows += 1;
        for column in 0..self.columns {
            *self.get_mut(row, column) = fill(column);
        }
        Ok(())
    }

    /**
     * Inserts a column at `column`, filling each row using `fill`. Elements on whichever
     * side of the new column has slack and fewer elements to move are shifted within every
     * row block.
     */
    pub(crate) fn insert_column<F>(
        &mut self,
        column: Column,
        mut fill: F,
    ) -> Result<(), MatrixError>
    where
        F: FnMut(Row) -> T,
    {
        if column > self.columns {
            return Err(MatrixError::ColumnDoesNotExist { column, columns: self.columns });
        }
        if self.rows == 0 {
            return Err(MatrixError::InconsistentShape { rows: 0, columns: 1 });
        }
        if self.columns >= MAX_DIMENSION {
            return Err(MatrixError::MaximumCapacityReached { maximum: MAX_DIMENSION });
        }
        let mut front = self.column_offset > 0;
        let mut back = self.column_offset + self.columns < self.column_capacity;
        if !front && !back {
            let capacity = grown(self.column_capacity, self.columns + 1);
            let offset = (capacity - self.columns) / 2;
            self.relocate(self.row_capacity, capacity, self.row_offset, offset);
            front = self.column_offset > 0;
            back = self.column_offset + self.columns < self.column_capacity;
        }
        let start = self.column_offset;
        let use_front = front && (!back || column < self.columns - column);
        for slot in self.row_offset..self.row_offset + self.rows {
            let block = self.row_table[slot] * self.column_capacity;
            if use_front {
                self.data[block + start - 1..block + start + column].rotate_left(1);
            } else {
                self.data[block + start + column..=block + start + self.columns].rotate_right(1);
            }
        }
        if use_front {
            self.column_offset -= 1;
        }
        self.columns += 1;
        for row in 0..self.rows {
            *self.get_mut(row, column) = fill(row);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(rows: Row, columns: Column) -> Storage<i32> {
        Storage::from_row_major(rows, columns, (0..(rows * columns) as i32).collect())
    }

    fn logical(storage: &Storage<i32>) -> Vec<i32> {
        (0..storage.rows())
            .flat_map(|row| (0..storage.columns()).map(move |column| *storage.get(row, column)))
            .collect()
    }

    #[test]
    fn insert_row_grows_with_slack_on_both_sides() {
        let mut storage = counting(2, 2);
        storage.insert_row(2, |column| 10 + column as i32).unwrap();
        assert_eq!(storage.row_capacity(), 4);
        assert_eq!(logical(&storage), vec![0, 1, 2, 3, 10, 11]);
        // one slot of slack was placed in front, so this needs no reallocation
        let token = storage.token();
        storage.insert_row(0, |_| -1).unwrap();
        assert_eq!(storage.token(), token);
        assert_eq!(storage.row_offset, 0);
        assert_eq!(logical(&storage), vec![-1, -1, 0, 1, 2, 3, 10, 11]);
    }

    #[test]
    fn erase_row_keeps_capacity() {
        let mut storage = counting(4, 2);
        storage.erase_row(0);
        assert_eq!(storage.row_offset, 1);
        storage.erase_row(2);
        assert_eq!(storage.row_capacity(), 4);
        assert_eq!(logical(&storage), vec![2, 3, 4, 5]);
    }

    #[test]
    fn erase_last_column_empties() {
        let mut storage = counting(3, 1);
        storage.erase_column(0);
        assert_eq!((storage.rows(), storage.columns()), (0, 0));
        assert_eq!(storage.column_capacity(), 1);
    }

    #[test]
    fn insert_column_uses_front_slack() {
        let mut storage = counting(2, 3);
        storage.erase_column(0);
        assert_eq!(storage.column_offset, 1);
        let token = storage.token();
        storage.insert_column(1, |row| 100 + row as i32).unwrap();
        assert_eq!(storage.token(), token);
        assert_eq!(storage.column_offset, 0);
        assert_eq!(logical(&storage), vec![1, 100, 2, 4, 101, 5]);
    }

    #[test]
    fn get_many_mut_resolves_rows_through_the_table() {
        let mut storage = counting(3, 3);
        storage.erase_column(0);
        storage.erase_row(0);
        storage.swap_rows(0, 1);
        let elements = storage.get_many_mut(vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 0)]);
        assert_eq!(elements.len(), 4);
        for element in elements {
            *element = -*element;
        }
        assert_eq!(logical(&storage), vec![-7, -8, -4, -5]);
    }

    #[test]
    fn take_row_major_after_row_swaps() {
        let mut storage = counting(3, 2);
        storage.swap_rows(0, 2);
        let data = storage.take_row_major();
        assert_eq!(data, vec![4, 5, 2, 3, 0, 1]);
        assert_eq!((storage.rows(), storage.columns()), (0, 0));
    }

    #[test]
    fn resize_regrow_fills_fresh_values() {
        let mut storage = counting(2, 2);
        storage.resize(1, 1, || 9).unwrap();
        assert_eq!(logical(&storage), vec![0]);
        storage.resize(2, 2, || 9).unwrap();
        assert_eq!(logical(&storage), vec![0, 9, 9, 9]);
        assert_eq!(storage.row_capacity(), 2);
    }

    #[test]
    fn grown_is_capped() {
        assert_eq!(grown(0, 1), 1);
        assert_eq!(grown(3, 4), 6);
        assert_eq!(grown(MAX_DIMENSION - 1, MAX_DIMENSION), MAX_DIMENSION);
    }

    #[test]
    fn tokens_are_unique() {
        assert_ne!(StorageToken::next(), StorageToken::next());
    }
}
