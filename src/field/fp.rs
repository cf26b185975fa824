//! Prime field implementation using Montgomery representation

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use num_traits::{One, Zero};
use rand::Rng;

use super::params::FpParams;
use super::{FieldError, FieldResult};
use crate::arithmetic::bigint::{BigInt, BigInteger};
use crate::arithmetic::montgomery::{add_assign_carry, div2, geq, mont_mul, sub_assign_borrow};
use crate::arithmetic::traits::{Field, LegendreSymbol, PrimeField};

/// Montgomery representation of an element of the field described by `P`.
///
/// Holds `x * R mod p` with `R = 2^(64 N)`. Every residue class has exactly
/// one representation, so equality is limb equality.
pub struct Fp<P, const N: usize> {
    mont_repr: BigInt<N>,
    _params: PhantomData<P>,
}

impl<P: FpParams<N>, const N: usize> Fp<P, N> {
    /// Maps any `N`-limb integer into the field, reducing it modulo `p`.
    pub fn new(value: BigInt<N>) -> Self {
        let config = P::config();
        Self::from_mont(BigInt::new(mont_mul(
            &value.0,
            &config.r_squared.0,
            &config.modulus.0,
            config.inv,
        )))
    }

    /// Wraps a value that is already in Montgomery form and below `p`.
    pub const fn from_mont(mont_repr: BigInt<N>) -> Self {
        Self {
            mont_repr,
            _params: PhantomData,
        }
    }

    /// The raw Montgomery representation.
    pub const fn mont_repr(&self) -> &BigInt<N> {
        &self.mont_repr
    }

    /// Inverse Montgomery map: the standard integer in `[0, p)`.
    pub fn as_bigint(&self) -> BigInt<N> {
        let config = P::config();
        BigInt::new(mont_mul(
            &self.mont_repr.0,
            &BigInt::<N>::one().0,
            &config.modulus.0,
            config.inv,
        ))
    }

    /// Lowest limb of the standard representation.
    pub fn as_u64(&self) -> u64 {
        self.as_bigint().0[0]
    }

    fn mul_mont(&self, rhs: &Self) -> Self {
        let config = P::config();
        Self::from_mont(BigInt::new(mont_mul(
            &self.mont_repr.0,
            &rhs.mont_repr.0,
            &config.modulus.0,
            config.inv,
        )))
    }

    /// Binary extended Euclid on the Montgomery value `a = xR`, giving
    /// `(xR)^-1`; one multiplication by `R^3` turns that into `x^-1 R`.
    fn invert_nonzero(&self) -> Self {
        let config = P::config();
        let modulus = &config.modulus.0;

        let mut u = self.mont_repr.0;
        let mut v = *modulus;
        let mut b = BigInt::<N>::one().0;
        let mut c = [0u64; N];

        let halve = |x: &mut [u64; N]| {
            if x[0] & 1 == 0 {
                div2(x, 0);
            } else {
                let carry = add_assign_carry(x, modulus);
                div2(x, carry);
            }
        };
        let sub_mod = |x: &mut [u64; N], y: &[u64; N]| {
            if sub_assign_borrow(x, y) != 0 {
                add_assign_carry(x, modulus);
            }
        };

        // Invariants: b * a = u and c * a = v (mod p).
        while u.iter().any(|&limb| limb != 0) {
            while u[0] & 1 == 0 {
                div2(&mut u, 0);
                halve(&mut b);
            }
            while v[0] & 1 == 0 {
                div2(&mut v, 0);
                halve(&mut c);
            }
            if geq(&u, &v) {
                sub_assign_borrow(&mut u, &v);
                sub_mod(&mut b, &c);
            } else {
                sub_assign_borrow(&mut v, &u);
                sub_mod(&mut c, &b);
            }
        }

        Self::from_mont(BigInt::new(mont_mul(&c, &config.r_cubed.0, modulus, config.inv)))
    }
}

impl<P: FpParams<N>, const N: usize> Field for Fp<P, N> {
    fn inverse(&self) -> FieldResult<Self> {
        if self.is_zero() {
            return Err(FieldError::DivisionByZero);
        }
        Ok(self.invert_nonzero())
    }

    fn legendre(&self) -> LegendreSymbol {
        if self.is_zero() {
            return LegendreSymbol::Zero;
        }
        if self.pow_limbs(&P::config().euler.0).is_one() {
            LegendreSymbol::QuadraticResidue
        } else {
            LegendreSymbol::QuadraticNonResidue
        }
    }

    /// Tonelli-Shanks, after an Euler-criterion check so that non-residues
    /// are reported instead of looping.
    fn sqrt(&self) -> FieldResult<Self> {
        match self.legendre() {
            LegendreSymbol::Zero => return Ok(Self::zero()),
            LegendreSymbol::QuadraticNonResidue => return Err(FieldError::NonResidue),
            LegendreSymbol::QuadraticResidue => {}
        }

        let config = P::config();
        let one = Self::one();

        let mut v = config.s;
        let mut z = Self::from_mont(config.nqr_to_t);
        let w = self.pow_limbs(&config.t_minus_1_over_2.0);
        let mut x = *self * w;
        let mut b = x * w;

        // x^2 = self * b throughout; b has order dividing 2^(v-1).
        while b != one {
            let mut m = 0u32;
            let mut b2m = b;
            while b2m != one {
                b2m = b2m.square();
                m += 1;
                if m >= v {
                    return Err(FieldError::NonResidue);
                }
            }

            let mut w = z;
            for _ in 0..(v - m - 1) {
                w = w.square();
            }

            z = w.square();
            b *= z;
            x *= w;
            v = m;
        }

        Ok(x)
    }

    /// Rejection sampling over `num_bits`-bit integers, so the result is
    /// uniform on `[0, p)`.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let config = P::config();
        let top_bits = config.num_bits - 64 * (N - 1);
        let mask = if top_bits == 64 {
            u64::MAX
        } else {
            (1u64 << top_bits) - 1
        };

        loop {
            let mut limbs = [0u64; N];
            for limb in limbs.iter_mut() {
                *limb = rng.next_u64();
            }
            limbs[N - 1] &= mask;

            let candidate = BigInt::new(limbs);
            if candidate < config.modulus {
                return Self::new(candidate);
            }
        }
    }
}

impl<P: FpParams<N>, const N: usize> PrimeField for Fp<P, N> {
    type BigInt = BigInt<N>;

    fn modulus() -> BigInt<N> {
        P::MODULUS
    }

    fn size_in_bits() -> usize {
        P::config().num_bits
    }

    fn two_adicity() -> u32 {
        P::config().s
    }

    fn multiplicative_generator() -> Self {
        Self::from_mont(P::config().multiplicative_generator)
    }

    fn root_of_unity() -> Self {
        Self::from_mont(P::config().root_of_unity)
    }

    fn from_bigint(value: BigInt<N>) -> Option<Self> {
        if value >= P::MODULUS {
            return None;
        }
        Some(Self::new(value))
    }

    fn into_bigint(&self) -> BigInt<N> {
        self.as_bigint()
    }
}

impl<P, const N: usize> Clone for Fp<P, N> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, const N: usize> Copy for Fp<P, N> {}

impl<P, const N: usize> PartialEq for Fp<P, N> {
    fn eq(&self, other: &Self) -> bool {
        self.mont_repr == other.mont_repr
    }
}

impl<P, const N: usize> Eq for Fp<P, N> {}

impl<P, const N: usize> Hash for Fp<P, N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mont_repr.hash(state);
    }
}

impl<P: FpParams<N>, const N: usize> Default for Fp<P, N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: FpParams<N>, const N: usize> Zero for Fp<P, N> {
    fn zero() -> Self {
        Self::from_mont(BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.mont_repr.is_zero()
    }
}

impl<P: FpParams<N>, const N: usize> One for Fp<P, N> {
    fn one() -> Self {
        Self::from_mont(P::config().r)
    }

    fn is_one(&self) -> bool {
        self.mont_repr == P::config().r
    }
}

impl<P: FpParams<N>, const N: usize> From<u64> for Fp<P, N> {
    fn from(value: u64) -> Self {
        Self::new(BigInt::from_u64(value))
    }
}

/// Negative values map to `p - |value|`.
impl<P: FpParams<N>, const N: usize> From<i64> for Fp<P, N> {
    fn from(value: i64) -> Self {
        let magnitude = Self::from(value.unsigned_abs());
        if value < 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl<P: FpParams<N>, const N: usize> From<BigInt<N>> for Fp<P, N> {
    fn from(value: BigInt<N>) -> Self {
        Self::new(value)
    }
}

// Implement arithmetic operations using Montgomery representation
impl<P: FpParams<N>, const N: usize> Add for Fp<P, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let modulus = &P::MODULUS.0;
        let mut sum = self.mont_repr.0;
        let carry = add_assign_carry(&mut sum, &rhs.mont_repr.0);
        if carry != 0 || geq(&sum, modulus) {
            sub_assign_borrow(&mut sum, modulus);
        }
        Self::from_mont(BigInt::new(sum))
    }
}

impl<P: FpParams<N>, const N: usize> AddAssign for Fp<P, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: FpParams<N>, const N: usize> Sub for Fp<P, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut diff = self.mont_repr.0;
        if sub_assign_borrow(&mut diff, &rhs.mont_repr.0) != 0 {
            add_assign_carry(&mut diff, &P::MODULUS.0);
        }
        Self::from_mont(BigInt::new(diff))
    }
}

impl<P: FpParams<N>, const N: usize> SubAssign for Fp<P, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: FpParams<N>, const N: usize> Mul for Fp<P, N> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.mul_mont(&rhs)
    }
}

impl<P: FpParams<N>, const N: usize> MulAssign for Fp<P, N> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.mul_mont(&rhs);
    }
}

impl<P: FpParams<N>, const N: usize> Div for Fp<P, N> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        match rhs.inverse() {
            Ok(inverse) => self * inverse,
            Err(_) => panic!("division by zero in {}", P::NAME),
        }
    }
}

impl<P: FpParams<N>, const N: usize> DivAssign for Fp<P, N> {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<P: FpParams<N>, const N: usize> Neg for Fp<P, N> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        if self.is_zero() {
            return self;
        }
        let mut result = P::MODULUS.0;
        sub_assign_borrow(&mut result, &self.mont_repr.0);
        Self::from_mont(BigInt::new(result))
    }
}

impl<P: FpParams<N>, const N: usize> Sum for Fp<P, N> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, x| acc + x)
    }
}

impl<P: FpParams<N>, const N: usize> Product for Fp<P, N> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::one(), |acc, x| acc * x)
    }
}

/// Decimal text of the standard representation.
impl<P: FpParams<N>, const N: usize> fmt::Display for Fp<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_bigint())
    }
}

impl<P: FpParams<N>, const N: usize> fmt::Debug for Fp<P, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({})", self.as_bigint())
    }
}

/// Parses canonical decimal text; values at or above the modulus are
/// rejected rather than reduced.
impl<P: FpParams<N>, const N: usize> FromStr for Fp<P, N> {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: BigInt<N> = s.parse()?;
        Self::from_bigint(value).ok_or(FieldError::InvalidElement)
    }
}
