//! Montgomery's trick: N inversions for the price of one.

use super::{FieldError, FieldResult};
use crate::arithmetic::traits::Field;

/// Inverts every element of `elements` in place with a single field
/// inversion and `3(N - 1)` multiplications.
///
/// All elements must be non-zero; a zero entry is reported as
/// `DivisionByZero` and leaves the slice untouched.
pub fn batch_invert<F: Field>(elements: &mut [F]) -> FieldResult<()> {
    if elements.is_empty() {
        return Ok(());
    }

    // prefix[i] = x_0 * ... * x_{i-1}
    let mut prefix = Vec::with_capacity(elements.len());
    let mut acc = F::one();
    for element in elements.iter() {
        if element.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        prefix.push(acc);
        acc *= *element;
    }

    let mut inv = acc.inverse()?;

    for (element, before) in elements.iter_mut().zip(prefix).rev() {
        let next = inv * *element;
        *element = inv * before;
        inv = next;
    }

    Ok(())
}
