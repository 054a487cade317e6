/*!
 * Truthiness of element types.
 *
 * A [Matrix](crate::matrices::Matrix) never inspects its elements except through equality
 * and this trait, which decides whether a single element counts as "true" when asking
 * whether a matrix as a whole is truthy with
 * [`is_truthy`](crate::matrices::Matrix::is_truthy).
 *
 * Primitives are truthy when they are not equal to their zero or empty value. Types defined
 * outside this crate can implement the trait themselves, see
 * [using custom types](crate::using_custom_types).
 */

use std::num::Wrapping;

/**
 * A predicate deciding if a value should be considered true.
 */
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

macro_rules! truthy_integral {
    ($T:ty) => {
        impl Truthy for $T {
            #[inline]
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        }
    };
}

macro_rules! truthy_wrapping_integral {
    ($T:ty) => {
        impl Truthy for Wrapping<$T> {
            #[inline]
            fn is_truthy(&self) -> bool {
                self.0 != 0
            }
        }
    };
}

macro_rules! truthy_float {
    ($T:ty) => {
        impl Truthy for $T {
            #[inline]
            fn is_truthy(&self) -> bool {
                // NaN is not equal to zero so is considered true
                *self != 0.0
            }
        }
    };
}

truthy_integral!(u8);
truthy_integral!(i8);
truthy_integral!(u16);
truthy_integral!(i16);
truthy_integral!(u32);
truthy_integral!(i32);
truthy_integral!(u64);
truthy_integral!(i64);
truthy_integral!(u128);
truthy_integral!(i128);
truthy_integral!(usize);
truthy_integral!(isize);
truthy_wrapping_integral!(u8);
truthy_wrapping_integral!(i8);
truthy_wrapping_integral!(u16);
truthy_wrapping_integral!(i16);
truthy_wrapping_integral!(u32);
truthy_wrapping_integral!(i32);
truthy_wrapping_integral!(u64);
truthy_wrapping_integral!(i64);
truthy_wrapping_integral!(u128);
truthy_wrapping_integral!(i128);
truthy_float!(f32);
truthy_float!(f64);

impl Truthy for bool {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for char {
    #[inline]
    fn is_truthy(&self) -> bool {
        *self != '\0'
    }
}

impl Truthy for String {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for &str {
    #[inline]
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/**
 * An optional value is truthy if it is present and the value it contains is truthy.
 */
impl<T: Truthy> Truthy for Option<T> {
    #[inline]
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_values_are_false() {
        assert!(!0_i32.is_truthy());
        assert!(!0.0_f64.is_truthy());
        assert!(!(-0.0_f32).is_truthy());
        assert!(!Wrapping(0_u8).is_truthy());
        assert!(!String::new().is_truthy());
        assert!(!"".is_truthy());
        assert!(!false.is_truthy());
        assert!(!None::<i32>.is_truthy());
        assert!(!Some(0).is_truthy());
    }

    #[test]
    fn non_zero_values_are_true() {
        assert!((-3_i64).is_truthy());
        assert!(0.5_f32.is_truthy());
        assert!(Wrapping(255_u8).is_truthy());
        assert!("x".is_truthy());
        assert!(true.is_truthy());
        assert!(Some(2).is_truthy());
        assert!('a'.is_truthy());
    }
}
