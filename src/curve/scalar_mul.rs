//! Scalar multiplication.
//!
//! Plain left-to-right double-and-add. It satisfies the contract the group
//! code relies on (`0 * P = O`, `1 * P = P`, `k * O = O`) without any
//! precomputed window tables.

use std::ops::{Add, Neg};

/// The operations scalar multiplication needs from a group.
pub trait CurveGroup: Copy + Eq + Add<Output = Self> + Neg<Output = Self> {
    fn identity() -> Self;

    fn is_identity(&self) -> bool;

    fn double(&self) -> Self;
}

/// Computes `scalar * base` for a little-limb-first scalar of any width.
pub fn scalar_mul<G: CurveGroup>(base: &G, scalar: &[u64]) -> G {
    let mut result = G::identity();
    if base.is_identity() {
        return result;
    }

    let mut found_one = false;
    for limb in scalar.iter().rev() {
        for i in (0..64).rev() {
            if found_one {
                result = result.double();
            }
            if (limb >> i) & 1 == 1 {
                found_one = true;
                result = result + *base;
            }
        }
    }
    result
}
