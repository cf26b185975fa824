use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_traits::{One, Zero};
use rand::Rng;

use super::bigint::BigInteger;
use crate::field::{batch, FieldError, FieldResult};

/// Quadratic character of a field element, as given by Euler's criterion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegendreSymbol {
    Zero,
    QuadraticResidue,
    QuadraticNonResidue,
}

/// Trait for field elements with basic arithmetic operations
pub trait Field:
    Sized
    + Copy
    + Clone
    + Debug
    + Display
    + PartialEq
    + Eq
    + Hash
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Neg<Output = Self>
    + Zero
    + One
{
    /// Squares this element
    fn square(&self) -> Self {
        *self * *self
    }

    /// Adds this element to itself
    fn double(&self) -> Self {
        *self + *self
    }

    /// Returns the multiplicative inverse, or `DivisionByZero` for zero.
    fn inverse(&self) -> FieldResult<Self>;

    /// Raises this element to a machine-word power
    fn pow(&self, exp: u64) -> Self {
        self.pow_limbs(&[exp])
    }

    /// Left-to-right square-and-multiply over the bits of a little-limb-first
    /// exponent. `x^0 = 1` for every `x`, zero included.
    fn pow_limbs(&self, exp: &[u64]) -> Self {
        let mut result = Self::one();
        let mut started = false;
        for limb in exp.iter().rev() {
            for i in (0..64).rev() {
                if started {
                    result = result.square();
                }
                if (limb >> i) & 1 == 1 {
                    result *= *self;
                    started = true;
                }
            }
        }
        result
    }

    fn legendre(&self) -> LegendreSymbol;

    fn is_square(&self) -> bool {
        self.legendre() != LegendreSymbol::QuadraticNonResidue
    }

    /// Square root, or `NonResidue` when none exists.
    fn sqrt(&self) -> FieldResult<Self>;

    /// Samples a uniformly random element.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Samples a uniformly random element from the thread-local generator.
    fn random_element() -> Self {
        Self::random(&mut rand::thread_rng())
    }

    /// Replaces every element by its inverse using one field inversion.
    fn batch_invert(elements: &mut [Self]) -> FieldResult<()> {
        batch::batch_invert(elements)
    }
}

/// Trait for prime fields with modular arithmetic
pub trait PrimeField: Field + From<u64> + FromStr<Err = FieldError> {
    /// Standard (non-Montgomery) representation type.
    type BigInt: BigInteger;

    /// The modulus of the field
    fn modulus() -> Self::BigInt;

    /// Bit length of the modulus.
    fn size_in_bits() -> usize;

    /// Number of bits that always fit below the modulus.
    fn capacity() -> usize {
        Self::size_in_bits() - 1
    }

    /// Largest `s` with `2^s | modulus - 1`.
    fn two_adicity() -> u32;

    fn multiplicative_generator() -> Self;

    /// A root of unity of order `2^two_adicity`.
    fn root_of_unity() -> Self;

    /// Maps a standard representative into the field; `None` if it is not
    /// below the modulus.
    fn from_bigint(value: Self::BigInt) -> Option<Self>;

    /// Returns the standard representative of this element's residue class.
    fn into_bigint(&self) -> Self::BigInt;
}
