/*!
Using custom element types examples.

# Using a custom type that can grow a matrix

The following example shows a type defined outside this crate being stored in a
matrix. Anything can be stored, but inserting rows or columns and resizing need new
elements to come from somewhere, so those operations require `Clone` and `Default`.
Implementing [Truthy](crate::truthy::Truthy) as well lets the whole matrix be tested
for truthiness.

```
extern crate dense_matrix;

use dense_matrix::matrices::Matrix;
use dense_matrix::matrices::iterators::MainDiagonal;
use dense_matrix::truthy::Truthy;

#[derive(Clone, Debug, Default, PartialEq)]
struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    fn new(numerator: i64, denominator: i64) -> Fraction {
        Fraction { numerator, denominator }
    }
}

/*
 * The default fraction has a denominator of 0 which is not a number, but it is still
 * never truthy because the numerator is 0 too.
 */
impl Truthy for Fraction {
    fn is_truthy(&self) -> bool {
        self.numerator != 0
    }
}

let mut matrix = Matrix::filled((2, 2), Fraction::new(0, 1))?;
assert!(!matrix.is_truthy());

// default constructed values fill the new column
matrix.insert_column(1)?;
assert_eq!(matrix.at(0, 1)?, &Fraction::default());

// write a half down the main diagonal
let cursor = matrix.begin_mut::<MainDiagonal>();
for element in cursor.values_mut(&mut matrix)? {
    *element = Fraction::new(1, 2);
}
assert!(matrix.is_truthy());
assert_eq!(matrix[(1, 1)], Fraction::new(1, 2));
assert_eq!(matrix[(1, 2)], Fraction::new(0, 1));
# Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
```

# Using a type that cannot be copied

Types which are neither `Clone` nor `Default` can still be stored and rearranged, the
matrix just cannot invent new elements.

```
extern crate dense_matrix;

use dense_matrix::matrices::Matrix;

#[derive(Debug, PartialEq)]
struct Ticket(u32);

let mut matrix = Matrix::from_flat(2, 2, (1..).map(Ticket))?;
matrix.swap_rows(0, 1)?;
matrix.erase_column(0)?;
assert_eq!(matrix.take_storage().into_vec(), vec![ Ticket(4), Ticket(2) ]);
# Ok::<(), dense_matrix::matrices::errors::MatrixError>(())
```
*/
