extern crate dense_matrix;

#[cfg(test)]
mod tests {
    use dense_matrix::matrices::Matrix;
    use dense_matrix::matrices::errors::MatrixError;
    use dense_matrix::matrices::iterators::{
        AntiDiagonal, ConstDIterator, ConstMIterator, Diagonal, MainDiagonal, ReverseAntiDiagonal,
        ReverseMainDiagonal,
    };

    /// A 4 x 3 matrix with negated values on the diagonal numbered -1.
    fn tall() -> Matrix<i32> {
        Matrix::from_flat(4, 3, vec![
            1, 2, -3,
            4, -5, 6,
            7, -8, 9,
            10, -11, 12
        ]).unwrap()
    }

    fn diagonal<S: Diagonal>(matrix: &Matrix<i32>, number: isize) -> Vec<i32> {
        matrix
            .diagonal_begin::<S>(number)
            .unwrap()
            .values(matrix)
            .unwrap()
            .copied()
            .collect()
    }

    #[test]
    fn check_main_diagonals() {
        let matrix = tall();
        assert_eq!(diagonal::<MainDiagonal>(&matrix, 0), vec![1, -5, 9]);
        assert_eq!(diagonal::<MainDiagonal>(&matrix, 2), vec![-3]);
        assert_eq!(diagonal::<MainDiagonal>(&matrix, -1), vec![4, -8, 12]);
        assert_eq!(diagonal::<MainDiagonal>(&matrix, -3), vec![10]);
        assert_eq!(diagonal::<ReverseMainDiagonal>(&matrix, -1), vec![12, -8, 4]);
    }

    #[test]
    fn check_anti_diagonals() {
        let matrix = tall();
        assert_eq!(diagonal::<AntiDiagonal>(&matrix, 0), vec![-3, -5, 7]);
        assert_eq!(diagonal::<AntiDiagonal>(&matrix, 2), vec![1]);
        assert_eq!(diagonal::<AntiDiagonal>(&matrix, 1), vec![2, 4]);
        assert_eq!(diagonal::<AntiDiagonal>(&matrix, -1), vec![6, -8, 10]);
        assert_eq!(diagonal::<AntiDiagonal>(&matrix, -3), vec![12]);
        assert_eq!(diagonal::<ReverseAntiDiagonal>(&matrix, -1), vec![10, -8, 6]);
    }

    #[test]
    fn check_every_diagonal_size() {
        let matrix = tall();
        let mut total = 0;
        for number in -3..=2 {
            let main = matrix.diagonal_begin::<MainDiagonal>(number).unwrap();
            let anti = matrix.diagonal_begin::<AntiDiagonal>(number).unwrap();
            let expected = (4 - (-number).max(0)).min(3 - number.max(0)) as usize;
            assert_eq!(main.diagonal_size(), Some(expected));
            assert_eq!(anti.diagonal_size(), Some(expected));
            total += expected;
        }
        assert_eq!(total, matrix.len());
        assert_eq!(
            matrix.diagonal_begin::<MainDiagonal>(3),
            Err(MatrixError::DiagonalDoesNotExist { diagonal: 3 })
        );
        assert_eq!(
            matrix.diagonal_end::<ReverseAntiDiagonal>(-4),
            Err(MatrixError::DiagonalDoesNotExist { diagonal: -4 })
        );
    }

    #[test]
    fn check_cursor_through_cell() {
        let matrix = tall();
        let cursor = matrix.cursor_at::<MainDiagonal>(2, 1).unwrap();
        assert_eq!(cursor.get(&matrix), Ok(&-8));
        assert_eq!(cursor.diagonal_number(), Some(-1));
        assert_eq!(cursor.diagonal_index(), Some(1));
        assert_eq!(cursor.position(), Some((2, 1)));

        let cursor = matrix.cursor_at::<AntiDiagonal>(2, 1).unwrap();
        assert_eq!(cursor.diagonal_number(), Some(-1));
        assert_eq!(cursor.diagonal_index(), Some(1));
        assert_eq!(cursor.get_at(&matrix, 1), Ok(&10));

        let cursor = matrix.cursor_at::<ReverseMainDiagonal>(2, 1).unwrap();
        assert_eq!(cursor.diagonal_index(), Some(1));
        assert_eq!(cursor.get_at(&matrix, 1), Ok(&4));
    }

    #[test]
    fn check_diagonal_through() {
        let matrix = tall();
        let begin = matrix.diagonal_begin_through::<MainDiagonal>(3, 2).unwrap();
        let end = matrix.diagonal_end_through::<MainDiagonal>(1, 0).unwrap();
        assert_eq!(end - begin, Ok(3));
        assert_eq!(begin.position(), Some((1, 0)));
        assert_eq!(
            matrix.diagonal_begin_through::<AntiDiagonal>(4, 0),
            Err(MatrixError::RowDoesNotExist { row: 4, rows: 4 })
        );
    }

    #[test]
    fn check_diagonal_sentinels() {
        let matrix = tall();
        let end = matrix.diagonal_end::<MainDiagonal>(-1).unwrap();
        assert_eq!(end.diagonal_index(), Some(3));
        assert_eq!(end.position(), Some((4, 3)));
        assert_eq!(end.get(&matrix), Err(MatrixError::DereferenceOfSentinelIterator));
        let end = matrix.diagonal_end::<ReverseMainDiagonal>(-1).unwrap();
        assert_eq!(end.diagonal_index(), Some(-1));
        assert_eq!(end.position(), Some((0, -1)));
        let end = matrix.diagonal_end::<AntiDiagonal>(0).unwrap();
        assert_eq!(end.position(), Some((3, -1)));
    }

    #[test]
    fn check_diagonal_cursor_at_index() {
        let matrix = tall();
        let cursor = matrix.diagonal_cursor_at::<MainDiagonal>(-1, 2).unwrap();
        assert_eq!(cursor.get(&matrix), Ok(&12));
        let end = matrix.diagonal_cursor_at::<MainDiagonal>(-1, 3).unwrap();
        assert_eq!(end, matrix.diagonal_end::<MainDiagonal>(-1).unwrap());
        let end = matrix.diagonal_cursor_at::<ReverseMainDiagonal>(-1, -1).unwrap();
        assert!(end.is_end());
        assert_eq!(
            matrix.diagonal_cursor_at::<MainDiagonal>(-1, -1),
            Err(MatrixError::DiagonalIndexOutOfBounds { index: -1, size: 3 })
        );
        assert_eq!(
            matrix.diagonal_cursor_at::<ReverseAntiDiagonal>(0, 3),
            Err(MatrixError::DiagonalIndexOutOfBounds { index: 3, size: 3 })
        );
        assert_eq!(
            matrix.diagonal_cursor_at::<AntiDiagonal>(5, 0),
            Err(MatrixError::DiagonalDoesNotExist { diagonal: 5 })
        );
    }

    #[test]
    fn check_whole_matrix_diagonal_factories() {
        let matrix = tall();
        let begin = matrix.begin::<ReverseAntiDiagonal>();
        assert_eq!(begin.diagonal_number(), Some(0));
        assert_eq!(begin.values(&matrix).unwrap().copied().collect::<Vec<i32>>(), vec![7, -5, -3]);
        assert_eq!(matrix.end::<ReverseAntiDiagonal>() - begin, Ok(3));
        let empty = Matrix::<i32>::new();
        let begin = empty.begin::<MainDiagonal>();
        assert!(begin.is_end());
        assert_eq!(begin, empty.end::<MainDiagonal>());
        assert_eq!(begin.diagonal_size(), Some(0));
        assert_eq!(
            empty.diagonal_begin::<MainDiagonal>(0).err(),
            Some(MatrixError::DiagonalDoesNotExist { diagonal: 0 })
        );
    }

    #[test]
    fn check_diagonal_writes() {
        let mut matrix = Matrix::filled((3, 4), 0).unwrap();
        let cursor = matrix.diagonal_begin_mut::<AntiDiagonal>(-1).unwrap();
        for element in cursor.values_mut(&mut matrix).unwrap() {
            *element = 1;
        }
        let end = matrix.diagonal_end_mut::<ReverseMainDiagonal>(1).unwrap();
        *end.get_at_mut(&mut matrix, -1).unwrap() = 2;
        let through = matrix.diagonal_begin_through_mut::<MainDiagonal>(2, 2).unwrap();
        let through_end = matrix.diagonal_end_through_mut::<MainDiagonal>(2, 2).unwrap();
        assert_eq!(through_end - through, Ok(3));
        let at = matrix.diagonal_cursor_at_mut::<ReverseAntiDiagonal>(3, 0).unwrap();
        *at.get_mut(&mut matrix).unwrap() = 3;
        assert_eq!(matrix, Matrix::from_flat(3, 4, vec![
            3, 2, 0, 0,
            0, 0, 0, 1,
            0, 0, 1, 0
        ]).unwrap());
    }

    #[test]
    fn check_main_diagonal_survives_unrelated_column_changes() {
        let mut matrix = tall();
        matrix.reserve(4, 6).unwrap();
        let main: ConstDIterator = matrix.diagonal_begin::<MainDiagonal>(-1).unwrap();
        let anti: ConstMIterator = matrix.diagonal_begin::<AntiDiagonal>(-1).unwrap();
        matrix.insert_column(3).unwrap();
        // diagonal -1 still has three elements in a 4 x 4 matrix
        assert!(main.is_valid_for(&matrix));
        assert_eq!(main.get(&matrix), Ok(&4));
        // anti-diagonals are numbered from the last column, which moved
        assert!(!anti.is_valid_for(&matrix));
        matrix.insert_column(4).unwrap();
        // in a 4 x 5 matrix diagonal -1 still has three elements
        assert!(main.is_valid_for(&matrix));
        matrix.erase_row(3).unwrap();
        assert!(!main.is_valid_for(&matrix));
        assert_eq!(main.get(&matrix), Err(MatrixError::InvalidIterator));
    }

    #[test]
    fn check_main_diagonal_cursors_compare_across_column_changes() {
        let mut matrix = tall();
        matrix.reserve(4, 6).unwrap();
        let before = matrix.diagonal_begin::<MainDiagonal>(-1).unwrap();
        matrix.insert_column(3).unwrap();
        let after = matrix.diagonal_end::<MainDiagonal>(-1).unwrap();
        assert_eq!(after - before, Ok(3));
    }
}
