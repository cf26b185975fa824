//! Fixed-width unsigned integers.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{Num, Zero};

use crate::field::FieldError;

/// Common interface of the fixed-width integers used as field-element
/// standard representations and as scalars.
pub trait BigInteger:
    Copy + Clone + fmt::Debug + fmt::Display + Eq + Ord + Send + Sync + AsRef<[u64]> + 'static
{
    /// Number of 64-bit limbs.
    const NUM_LIMBS: usize;

    fn is_zero(&self) -> bool;

    fn is_odd(&self) -> bool;

    fn is_even(&self) -> bool {
        !self.is_odd()
    }

    /// Position of the highest set bit plus one; zero for zero.
    fn num_bits(&self) -> usize;

    fn get_bit(&self, i: usize) -> bool;

    fn to_biguint(&self) -> BigUint;
}

/// An unsigned integer of `N` 64-bit limbs, least significant limb first.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigInt<const N: usize>(pub [u64; N]);

impl<const N: usize> BigInt<N> {
    pub const fn new(limbs: [u64; N]) -> Self {
        Self(limbs)
    }

    pub const fn zero() -> Self {
        Self([0u64; N])
    }

    pub const fn one() -> Self {
        Self::from_u64(1)
    }

    pub const fn from_u64(value: u64) -> Self {
        let mut limbs = [0u64; N];
        limbs[0] = value;
        Self(limbs)
    }

    pub const fn limbs(&self) -> &[u64; N] {
        &self.0
    }

    /// Little-endian byte encoding, `8 * N` bytes long.
    pub fn to_bytes_le(&self) -> Vec<u8> {
        self.0.iter().flat_map(|limb| limb.to_le_bytes()).collect()
    }

    /// Decodes little-endian bytes; returns `None` if the value does not fit
    /// in `N` limbs.
    pub fn from_bytes_le(bytes: &[u8]) -> Option<Self> {
        let mut limbs = [0u64; N];
        for (i, chunk) in bytes.chunks(8).enumerate() {
            let mut limb = 0u64;
            for (j, &byte) in chunk.iter().enumerate() {
                limb |= (byte as u64) << (j * 8);
            }
            if i >= N {
                if limb != 0 {
                    return None;
                }
                continue;
            }
            limbs[i] = limb;
        }
        Some(Self(limbs))
    }

    /// Converts from an arbitrary-precision integer; `None` if it needs more
    /// than `N` limbs.
    pub fn from_biguint(value: &BigUint) -> Option<Self> {
        let digits = value.to_u64_digits();
        if digits.len() > N {
            return None;
        }
        let mut limbs = [0u64; N];
        limbs[..digits.len()].copy_from_slice(&digits);
        Some(Self(limbs))
    }
}

impl<const N: usize> BigInteger for BigInt<N> {
    const NUM_LIMBS: usize = N;

    fn is_zero(&self) -> bool {
        self.0.iter().all(|&limb| limb == 0)
    }

    fn is_odd(&self) -> bool {
        self.0[0] & 1 == 1
    }

    fn num_bits(&self) -> usize {
        for i in (0..N).rev() {
            if self.0[i] != 0 {
                return 64 * i + (64 - self.0[i].leading_zeros() as usize);
            }
        }
        0
    }

    fn get_bit(&self, i: usize) -> bool {
        if i >= 64 * N {
            return false;
        }
        (self.0[i / 64] >> (i % 64)) & 1 == 1
    }

    fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.to_bytes_le())
    }
}

impl<const N: usize> Default for BigInt<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Ord for BigInt<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..N).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl<const N: usize> PartialOrd for BigInt<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Index<usize> for BigInt<N> {
    type Output = u64;

    fn index(&self, i: usize) -> &u64 {
        &self.0[i]
    }
}

impl<const N: usize> AsRef<[u64]> for BigInt<N> {
    fn as_ref(&self) -> &[u64] {
        &self.0
    }
}

impl<const N: usize> From<u64> for BigInt<N> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<const N: usize> fmt::Display for BigInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_biguint())
    }
}

impl<const N: usize> fmt::Debug for BigInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt(0x")?;
        for limb in self.0.iter().rev() {
            write!(f, "{:016x}", limb)?;
        }
        write!(f, ")")
    }
}

impl<const N: usize> FromStr for BigInt<N> {
    type Err = FieldError;

    /// Parses a plain decimal string (ASCII digits only).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::Parse(format!("not a decimal integer: {:?}", s)));
        }
        let value = BigUint::from_str_radix(s, 10)
            .map_err(|e| FieldError::Parse(e.to_string()))?;
        if value.is_zero() {
            return Ok(Self::zero());
        }
        Self::from_biguint(&value)
            .ok_or_else(|| FieldError::Parse(format!("value does not fit in {} limbs", N)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_most_significant_first() {
        let a = BigInt::<2>::new([u64::MAX, 0]);
        let b = BigInt::<2>::new([0, 1]);
        assert!(a < b);
        assert_eq!(a.cmp(&a), Ordering::Equal);
        assert!(BigInt::<2>::zero() < BigInt::<2>::one());
    }

    #[test]
    fn test_bits() {
        assert_eq!(BigInt::<3>::zero().num_bits(), 0);
        assert_eq!(BigInt::<3>::one().num_bits(), 1);
        let x = BigInt::<3>::new([0, 0, 0b101]);
        assert_eq!(x.num_bits(), 131);
        assert!(x.get_bit(128));
        assert!(!x.get_bit(129));
        assert!(x.get_bit(130));
        assert!(!x.get_bit(500));
        assert!(BigInt::<1>::from_u64(7).is_odd());
        assert!(BigInt::<1>::from_u64(8).is_even());
    }

    #[test]
    fn test_decimal_text() {
        let x: BigInt<2> = "340282366920938463463374607431768211455".parse().unwrap();
        assert_eq!(x, BigInt::new([u64::MAX, u64::MAX]));
        assert_eq!(x.to_string(), "340282366920938463463374607431768211455");
        assert_eq!("0".parse::<BigInt<2>>().unwrap(), BigInt::zero());

        assert!("340282366920938463463374607431768211456".parse::<BigInt<2>>().is_err());
        assert!("".parse::<BigInt<2>>().is_err());
        assert!("12a".parse::<BigInt<2>>().is_err());
        assert!("-1".parse::<BigInt<2>>().is_err());
    }

    #[test]
    fn test_bytes() {
        let x = BigInt::<2>::new([0x0102030405060708, 0x1112131415161718]);
        let bytes = x.to_bytes_le();
        assert_eq!(bytes.len(), 16);
        assert_eq!(bytes[0], 0x08);
        assert_eq!(BigInt::<2>::from_bytes_le(&bytes), Some(x));

        let mut too_long = bytes.clone();
        too_long.push(1);
        assert_eq!(BigInt::<2>::from_bytes_le(&too_long), None);
        too_long.pop();
        too_long.push(0);
        assert_eq!(BigInt::<2>::from_bytes_le(&too_long), Some(x));
    }
}
