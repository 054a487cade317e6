/*!
 * Traversal strategies and the position arithmetic shared by every
 * [Cursor](crate::matrices::iterators::Cursor).
 *
 * A cursor stores its position as an *ordinal*: how many elements into its traversal it is,
 * from `0` for the first element up to `len` for the end position. Everything else, such as
 * the row and column a cursor points at, the raw index along a diagonal, or the reverse
 * traversals counting down from the last element, is derived from the ordinal here.
 *
 * # Diagonal geometry
 *
 * A main diagonal is numbered by `column - row`, so diagonal `0` starts in the top left
 * corner, positive numbers start further right along the first row and negative numbers
 * start further down the first column.
 *
 * An anti-diagonal runs from top right to bottom left. It is numbered the same way in a copy
 * of the matrix with its columns mirrored: `(columns - 1 - column) - row`, so anti-diagonal
 * `0` starts in the top right corner, positive numbers start further left along the first
 * row and negative numbers start further down the last column.
 *
 * For either kind the diagonal numbered `k` holds
 * `min(rows - max(0, -k), columns - max(0, k))` elements.
 */

use crate::matrices::{Column, Row};

/**
 * The four shapes of traversal a cursor can walk.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Every column of a row before moving to the next row.
    RowMajor,
    /// Every row of a column before moving to the next column.
    ColumnMajor,
    /// One top left to bottom right diagonal.
    MainDiagonal,
    /// One top right to bottom left diagonal.
    AntiDiagonal,
}

impl Family {
    pub fn is_diagonal(self) -> bool {
        matches!(self, Family::MainDiagonal | Family::AntiDiagonal)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
}

/**
 * A traversal family walked in one direction.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Traversal {
    pub family: Family,
    pub direction: Direction,
}

impl Traversal {
    pub const fn new(family: Family, direction: Direction) -> Traversal {
        Traversal { family, direction }
    }
}

/**
 * The elements a cursor walks over, captured from the matrix's shape when the cursor was
 * created.
 */
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Frame {
    /// The whole matrix in a linear traversal.
    Grid { rows: Row, columns: Column },
    /// A single diagonal. The column count is only needed to place anti-diagonals.
    Diagonal { number: isize, size: usize, columns: Column },
}

impl Frame {
    pub(crate) fn grid(rows: Row, columns: Column) -> Frame {
        Frame::Grid { rows, columns }
    }

    /// The frame used for diagonal cursors over an empty matrix, or unbound ones.
    pub(crate) fn empty_diagonal() -> Frame {
        Frame::Diagonal { number: 0, size: 0, columns: 0 }
    }

    /// The frame for a diagonal, if it exists in a matrix of this shape.
    pub(crate) fn diagonal(number: isize, rows: Row, columns: Column) -> Option<Frame> {
        diagonal_size(number, rows, columns).map(|size| Frame::Diagonal { number, size, columns })
    }

    /// The empty frame for a family, as used by unbound cursors.
    pub(crate) fn unbound(family: Family) -> Frame {
        if family.is_diagonal() {
            Frame::empty_diagonal()
        } else {
            Frame::grid(0, 0)
        }
    }

    /// Number of dereferenceable positions, which is also the ordinal of the end position.
    pub(crate) fn len(&self) -> usize {
        match *self {
            Frame::Grid { rows, columns } => rows * columns,
            Frame::Diagonal { size, .. } => size,
        }
    }

    /**
     * The part of the frame two cursors must agree on to be compared or subtracted. Main
     * diagonals do not depend on the column count so it is left out for them.
     */
    pub(crate) fn identity(&self, family: Family) -> Frame {
        match *self {
            Frame::Diagonal { number, size, .. } if family == Family::MainDiagonal => {
                Frame::Diagonal { number, size, columns: 0 }
            }
            frame => frame,
        }
    }

    /**
     * Whether a cursor with this frame still describes a matrix of the given shape. Linear
     * frames must match the shape exactly. Diagonal frames must still exist with the same
     * size, and anti-diagonals additionally need the same number of columns because their
     * coordinates are measured from the last column.
     */
    pub(crate) fn matches(&self, family: Family, rows: Row, columns: Column) -> bool {
        match *self {
            Frame::Grid { rows: cached_rows, columns: cached_columns } => {
                cached_rows == rows && cached_columns == columns
            }
            Frame::Diagonal { number, size, columns: cached_columns } => {
                let same_size = match diagonal_size(number, rows, columns) {
                    Some(current) => current == size,
                    None => size == 0 && rows == 0,
                };
                same_size && (family != Family::AntiDiagonal || cached_columns == columns)
            }
        }
    }
}

/**
 * Length of the diagonal numbered `number` in a matrix of this shape, or None if there is
 * no such diagonal. Main and anti-diagonals share this formula.
 */
pub(crate) fn diagonal_size(number: isize, rows: Row, columns: Column) -> Option<usize> {
    if rows == 0 || columns == 0 {
        return None;
    }
    let rows = rows as isize;
    let columns = columns as isize;
    if number < -(rows - 1) || number > columns - 1 {
        return None;
    }
    Some((rows - (-number).max(0)).min(columns - number.max(0)) as usize)
}

/// The diagonal number of the main or anti-diagonal passing through a cell.
pub(crate) fn diagonal_number(family: Family, columns: Column, row: Row, column: Column) -> isize {
    match family {
        Family::AntiDiagonal => columns as isize - 1 - (row + column) as isize,
        _ => column as isize - row as isize,
    }
}

/// The first cell of a diagonal, before any bounds are applied.
fn diagonal_start(family: Family, number: isize, columns: Column) -> (isize, isize) {
    let row = (-number).max(0);
    match family {
        Family::AntiDiagonal => (row, columns as isize - 1 - number.max(0)),
        _ => (row, number.max(0)),
    }
}

/**
 * Converts an ordinal into the raw position along the frame in forward order. Forward
 * traversals use raw positions `0..=len`, with `len` as the end position, while reverse
 * traversals use `-1..len`, with `-1` as the end position.
 */
pub(crate) fn raw_position(direction: Direction, len: usize, ordinal: usize) -> isize {
    match direction {
        Direction::Forward => ordinal as isize,
        Direction::Reverse => len as isize - 1 - ordinal as isize,
    }
}

/// Inverse of [raw_position], the raw position must be in range for the direction.
pub(crate) fn ordinal_of(direction: Direction, len: usize, raw: isize) -> usize {
    match direction {
        Direction::Forward => raw as usize,
        Direction::Reverse => (len as isize - 1 - raw) as usize,
    }
}

/// Whether a raw position is a dereferenceable or end position for the direction.
pub(crate) fn raw_in_range(direction: Direction, len: usize, raw: isize) -> bool {
    let len = len as isize;
    match direction {
        Direction::Forward => 0 <= raw && raw <= len,
        Direction::Reverse => -1 <= raw && raw < len,
    }
}

/**
 * Moves an ordinal by an offset, stopping exactly at the first position or the end position
 * if the offset would go past either.
 */
pub(crate) fn offset_ordinal(ordinal: usize, len: usize, offset: isize) -> usize {
    (ordinal as isize).saturating_add(offset).clamp(0, len as isize) as usize
}

/**
 * Splits a raw linear position into an (outer, inner) pair, where inner is the dimension
 * walked first. Positions past either end report the sentinel coordinates, one past the last
 * inner index of the last outer line, or one before the first inner index of the first.
 */
fn linear_coordinates(raw: isize, len: usize, outer: usize, inner: usize) -> (isize, isize) {
    if raw < 0 {
        (0, -1)
    } else if raw as usize >= len {
        if len == 0 { (0, 0) } else { (outer as isize - 1, inner as isize) }
    } else {
        let raw = raw as usize;
        ((raw / inner) as isize, (raw % inner) as isize)
    }
}

/**
 * The (row, column) coordinates of an ordinal position. End positions report coordinates
 * just outside the matrix, never a dereferenceable cell.
 */
pub(crate) fn coordinates(traversal: Traversal, frame: &Frame, ordinal: usize) -> (isize, isize) {
    let len = frame.len();
    let raw = raw_position(traversal.direction, len, ordinal);
    match *frame {
        Frame::Grid { rows, columns } => match traversal.family {
            Family::ColumnMajor => {
                let (column, row) = linear_coordinates(raw, len, columns, rows);
                (row, column)
            }
            _ => linear_coordinates(raw, len, rows, columns),
        },
        Frame::Diagonal { number, columns, .. } => {
            let (row, column) = diagonal_start(traversal.family, number, columns);
            match traversal.family {
                Family::AntiDiagonal => (row + raw, column - raw),
                _ => (row + raw, column + raw),
            }
        }
    }
}

/**
 * The frame and raw position of a traversal through a cell, which must exist in a matrix of
 * this shape.
 */
pub(crate) fn project(
    family: Family,
    rows: Row,
    columns: Column,
    row: Row,
    column: Column,
) -> (Frame, isize) {
    match family {
        Family::RowMajor => (Frame::grid(rows, columns), (row * columns + column) as isize),
        Family::ColumnMajor => (Frame::grid(rows, columns), (column * rows + row) as isize),
        Family::MainDiagonal | Family::AntiDiagonal => {
            let number = diagonal_number(family, columns, row, column);
            let size = diagonal_size(number, rows, columns).unwrap_or(0);
            let (start_row, _) = diagonal_start(family, number, columns);
            (
                Frame::Diagonal { number, size, columns },
                row as isize - start_row,
            )
        }
    }
}

/**
 * Raw begin and end positions of one row (for row major traversals) or one column (for
 * column major traversals), given the index of that line and how many elements it holds.
 */
pub(crate) fn line_bounds(direction: Direction, line: usize, line_len: usize) -> (isize, isize) {
    let first = (line * line_len) as isize;
    let len = line_len as isize;
    match direction {
        Direction::Forward => (first, first + len),
        Direction::Reverse => (first + len - 1, first - 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW_MAJOR: Traversal = Traversal::new(Family::RowMajor, Direction::Forward);
    const REVERSE_COLUMN_MAJOR: Traversal = Traversal::new(Family::ColumnMajor, Direction::Reverse);
    const ANTI_DIAGONAL: Traversal = Traversal::new(Family::AntiDiagonal, Direction::Forward);

    #[test]
    fn diagonal_sizes() {
        // 4x3
        assert_eq!(diagonal_size(0, 4, 3), Some(3));
        assert_eq!(diagonal_size(-1, 4, 3), Some(3));
        assert_eq!(diagonal_size(-3, 4, 3), Some(1));
        assert_eq!(diagonal_size(2, 4, 3), Some(1));
        assert_eq!(diagonal_size(3, 4, 3), None);
        assert_eq!(diagonal_size(-4, 4, 3), None);
        assert_eq!(diagonal_size(0, 0, 0), None);
    }

    #[test]
    fn linear_sentinels() {
        let frame = Frame::grid(2, 3);
        assert_eq!(coordinates(ROW_MAJOR, &frame, 0), (0, 0));
        assert_eq!(coordinates(ROW_MAJOR, &frame, 4), (1, 1));
        assert_eq!(coordinates(ROW_MAJOR, &frame, 6), (1, 3));
        assert_eq!(coordinates(REVERSE_COLUMN_MAJOR, &frame, 0), (1, 2));
        assert_eq!(coordinates(REVERSE_COLUMN_MAJOR, &frame, 1), (0, 2));
        assert_eq!(coordinates(REVERSE_COLUMN_MAJOR, &frame, 6), (-1, 0));
    }

    #[test]
    fn anti_diagonal_walks_top_right_to_bottom_left() {
        // 3x4, anti-diagonal 1 starts one left of the top right corner
        let frame = Frame::diagonal(1, 3, 4).unwrap();
        assert_eq!(frame.len(), 3);
        assert_eq!(coordinates(ANTI_DIAGONAL, &frame, 0), (0, 2));
        assert_eq!(coordinates(ANTI_DIAGONAL, &frame, 2), (2, 0));
        assert_eq!(coordinates(ANTI_DIAGONAL, &frame, 3), (3, -1));
        let (projected, raw) = project(Family::AntiDiagonal, 3, 4, 1, 1);
        assert_eq!(projected, frame);
        assert_eq!(raw, 1);
    }

    #[test]
    fn offsets_clamp() {
        assert_eq!(offset_ordinal(2, 5, 10), 5);
        assert_eq!(offset_ordinal(2, 5, -10), 0);
        assert_eq!(offset_ordinal(2, 5, isize::MAX), 5);
        assert_eq!(offset_ordinal(0, 0, 1), 0);
    }

    #[test]
    fn reverse_line_bounds() {
        assert_eq!(line_bounds(Direction::Reverse, 0, 3), (2, -1));
        assert_eq!(line_bounds(Direction::Forward, 1, 3), (3, 6));
    }
}
