//! Vector distance and normalization helpers shared by the signature and matching code

use num_traits::Float;

/// Euclidean distance between two equal-length vectors
///
/// Components are paired positionally; callers guarantee equal lengths.
/// Summation runs front to back so identical inputs give bit-identical results.
pub fn euclidean_distance<T: Float>(a: &[T], b: &[T]) -> T {
    a.iter()
        .zip(b)
        .fold(T::zero(), |acc, (&x, &y)| {
            let diff = x - y;
            acc + diff * diff
        })
        .sqrt()
}

/// Scale values so they sum to one, with `epsilon` added to the divisor
///
/// An all-zero input stays all zero instead of producing NaN.
pub fn l1_normalize<T: Float>(values: &mut [T], epsilon: T) {
    let total = values.iter().fold(T::zero(), |acc, &v| acc + v.abs());
    let divisor = total + epsilon;
    for value in values.iter_mut() {
        *value = *value / divisor;
    }
}
