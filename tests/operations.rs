extern crate dense_matrix;

#[cfg(test)]
mod tests {
    use dense_matrix::matrices::errors::MatrixError;
    use dense_matrix::matrices::{MAX_DIMENSION, Matrix};

    fn counting(rows: usize, columns: usize) -> Matrix<i32> {
        Matrix::from_flat(rows, columns, 0..(rows * columns) as i32).unwrap()
    }

    #[test]
    fn check_transpose() {
        let matrix = counting(2, 3);
        let transposed = matrix.transpose();
        assert_eq!(transposed, Matrix::from_flat(3, 2, vec![
            0, 3,
            1, 4,
            2, 5
        ]).unwrap());
        assert_eq!(transposed.transpose(), matrix);
        assert_eq!(Matrix::<i32>::new().transpose(), Matrix::new());
        let mut destination = counting(5, 5);
        matrix.transpose_into(&mut destination);
        assert_eq!(destination, transposed);
    }

    #[test]
    fn check_transpose_in_place() {
        let mut square = counting(3, 3);
        square.transpose_in_place();
        assert_eq!(square, counting(3, 3).transpose());
        let mut wide = counting(1, 4);
        wide.transpose_in_place();
        assert_eq!(wide, Matrix::from_flat(4, 1, vec![0, 1, 2, 3]).unwrap());
        let mut empty = Matrix::<i32>::new();
        empty.transpose_in_place();
        assert!(empty.is_empty());
    }

    #[test]
    fn check_cat_by_row() {
        let mut result = counting(9, 9);
        result.cat_by_row(&counting(1, 2), &counting(2, 2)).unwrap();
        assert_eq!(result, Matrix::from_flat(3, 2, vec![
            0, 1,
            0, 1,
            2, 3
        ]).unwrap());
        result.cat_by_row(&Matrix::new(), &counting(2, 2)).unwrap();
        assert_eq!(result, counting(2, 2));
        result.cat_by_row(&counting(1, 3), &Matrix::new()).unwrap();
        assert_eq!(result, counting(1, 3));
        result.cat_by_row(&Matrix::new(), &Matrix::new()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn check_cat_by_column() {
        let mut result = Matrix::new();
        result.cat_by_column(&counting(2, 1), &counting(2, 2)).unwrap();
        assert_eq!(result, Matrix::from_flat(2, 3, vec![
            0, 0, 1,
            1, 2, 3
        ]).unwrap());
    }

    #[test]
    fn check_cat_errors_leave_receiver_unchanged() {
        let mut result = counting(1, 1);
        assert_eq!(
            result.cat_by_row(&counting(1, 2), &counting(1, 3)),
            Err(MatrixError::MismatchedShapes { expected: 2, actual: 3 })
        );
        assert_eq!(
            result.cat_by_column(&counting(2, 1), &counting(3, 1)),
            Err(MatrixError::MismatchedShapes { expected: 2, actual: 3 })
        );
        let half = Matrix::filled((MAX_DIMENSION / 2 + 1, 1), 0).unwrap();
        let mut tall = Matrix::new();
        assert_eq!(
            tall.cat_by_row(&half, &half),
            Err(MatrixError::DimensionExceedsMaximum {
                requested: MAX_DIMENSION + 2,
                maximum: MAX_DIMENSION
            })
        );
        assert!(tall.is_empty());
        assert_eq!(result, counting(1, 1));
    }

    #[test]
    fn check_split_by_row() {
        let matrix = counting(3, 2);
        let (top, bottom) = matrix.split_by_row(1).unwrap();
        assert_eq!(top, counting(1, 2));
        assert_eq!(bottom, Matrix::from_flat(2, 2, vec![2, 3, 4, 5]).unwrap());
        let (top, bottom) = matrix.split_by_row(0).unwrap();
        assert!(top.is_empty());
        assert_eq!(bottom, matrix);
        let (top, bottom) = matrix.split_by_row(3).unwrap();
        assert_eq!(top, matrix);
        assert!(bottom.is_empty());
        assert_eq!(
            matrix.split_by_row(4).err(),
            Some(MatrixError::RowDoesNotExist { row: 4, rows: 3 })
        );
    }

    #[test]
    fn check_split_into() {
        let matrix = counting(2, 3);
        let mut left = counting(4, 4);
        let mut right = Matrix::new();
        matrix.split_by_column_into(&mut left, &mut right, 2).unwrap();
        assert_eq!(left, Matrix::from_flat(2, 2, vec![0, 1, 3, 4]).unwrap());
        assert_eq!(right, Matrix::from_flat(2, 1, vec![2, 5]).unwrap());
        assert_eq!(
            matrix.split_by_row_into(&mut left, &mut right, 3),
            Err(MatrixError::RowDoesNotExist { row: 3, rows: 2 })
        );
        assert_eq!(right, Matrix::from_flat(2, 1, vec![2, 5]).unwrap());
        let mut top = Matrix::new();
        let mut bottom = Matrix::new();
        matrix.split_by_row_into(&mut top, &mut bottom, 1).unwrap();
        assert_eq!(top, counting(1, 3));
    }

    #[test]
    fn check_split_off() {
        let mut matrix = counting(2, 4);
        let tail = matrix.split_off_columns(1).unwrap();
        assert_eq!(matrix, Matrix::from_flat(2, 1, vec![0, 4]).unwrap());
        assert_eq!(tail, Matrix::from_flat(2, 3, vec![1, 2, 3, 5, 6, 7]).unwrap());
        assert_eq!(matrix.column_capacity(), 4);
        let tail = matrix.split_off_rows(1).unwrap();
        assert_eq!(tail, Matrix::from_flat(1, 1, vec![4]).unwrap());
        assert_eq!(
            matrix.split_off_rows(2).err(),
            Some(MatrixError::RowDoesNotExist { row: 2, rows: 1 })
        );
    }

    #[test]
    fn check_cat_then_split_recovers_operands() {
        let top = counting(2, 3);
        let bottom = Matrix::filled((4, 3), -1).unwrap();
        let mut joined = Matrix::new();
        joined.cat_by_row(&top, &bottom).unwrap();
        assert_eq!(joined.split_by_row(2).unwrap(), (top.clone(), bottom.clone()));
        let right = bottom.transpose();
        let left = counting(3, 1);
        joined.cat_by_column(&left, &right).unwrap();
        assert_eq!(joined.split_by_column(1).unwrap(), (left, right));
    }

    #[test]
    fn check_self_concatenation() {
        let mut matrix = counting(2, 2);
        let copy = matrix.clone();
        matrix.append_rows(&copy).unwrap();
        matrix.prepend_rows(&copy).unwrap();
        assert_eq!(matrix.size(), (6, 2));
        let mut expected = Matrix::new();
        expected.cat_by_row(&copy, &copy).unwrap();
        let twice = expected.clone();
        expected.cat_by_row(&twice, &copy).unwrap();
        assert_eq!(matrix, expected);

        let mut matrix = counting(2, 2);
        matrix.append_columns(&copy).unwrap();
        matrix.prepend_columns(&Matrix::new()).unwrap();
        assert_eq!(matrix, Matrix::from_flat(2, 4, vec![
            0, 1, 0, 1,
            2, 3, 2, 3
        ]).unwrap());

        let mut empty = Matrix::new();
        empty.prepend_rows(&copy).unwrap();
        assert_eq!(empty, copy);
    }

    #[test]
    fn check_append_uses_capacity() {
        let mut matrix = counting(2, 2);
        matrix.reserve(2, 8).unwrap();
        let capacity = matrix.column_capacity();
        matrix.append_columns(&counting(2, 3)).unwrap();
        matrix.append_columns(&counting(2, 3)).unwrap();
        assert_eq!(matrix.column_capacity(), capacity);
        assert_eq!(matrix.columns(), 8);
        assert_eq!(
            matrix.append_columns(&counting(3, 1)),
            Err(MatrixError::MismatchedShapes { expected: 2, actual: 3 })
        );
        assert_eq!(matrix.columns(), 8);
    }
}
