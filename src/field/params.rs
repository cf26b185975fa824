//! Field descriptors and their derived constants.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use super::{FieldError, FieldResult};
use crate::arithmetic::bigint::{BigInt, BigInteger};
use crate::arithmetic::montgomery::mont_inv;

/// Compile-time description of a prime field of `N` limbs.
///
/// Implementors supply the modulus and a multiplicative generator, and hand
/// out a process-wide [`FpConfig`] that is built on first access (usually
/// through `lazy_static`) and never mutated afterwards.
pub trait FpParams<const N: usize>: 'static + Send + Sync + Sized {
    /// The prime modulus, little-limb-first.
    const MODULUS: BigInt<N>;

    /// A generator of the multiplicative group, as a small integer.
    const GENERATOR: u64;

    /// Human-readable field name used in logs and panics.
    const NAME: &'static str;

    /// Derived constants for this field.
    fn config() -> &'static FpConfig<N>;

    /// Forces constant derivation. Calling it at startup, before any worker
    /// thread touches the field, moves the one-time cost out of hot paths.
    fn static_init() {
        let _ = Self::config();
    }
}

/// Constants derived once from a modulus.
///
/// Values marked "Montgomery" are stored as `x * R mod p` with `R = 2^(64 N)`;
/// the rest are plain integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FpConfig<const N: usize> {
    pub modulus: BigInt<N>,
    pub num_bits: usize,
    /// -modulus^-1 mod 2^64
    pub inv: u64,
    /// R mod p, i.e. one in Montgomery form.
    pub r: BigInt<N>,
    pub r_squared: BigInt<N>,
    pub r_cubed: BigInt<N>,
    /// (modulus - 1) / 2
    pub euler: BigInt<N>,
    /// modulus - 1 = 2^s * t with t odd
    pub s: u32,
    pub t: BigInt<N>,
    /// (t - 1) / 2
    pub t_minus_1_over_2: BigInt<N>,
    /// Smallest quadratic non-residue (Montgomery).
    pub nqr: BigInt<N>,
    /// nqr^t (Montgomery).
    pub nqr_to_t: BigInt<N>,
    /// Montgomery.
    pub multiplicative_generator: BigInt<N>,
    /// generator^t, of order 2^s (Montgomery).
    pub root_of_unity: BigInt<N>,
}

impl<const N: usize> FpConfig<N> {
    /// Derives every constant for `modulus`.
    ///
    /// The modulus must be odd, greater than two and have a non-zero top
    /// limb; `generator` must be a quadratic non-residue.
    pub fn new(modulus: BigInt<N>, generator: u64) -> FieldResult<Self> {
        if N == 0 || modulus.0[N - 1] == 0 {
            return Err(FieldError::InvalidModulus("most significant limb is zero".into()));
        }
        if modulus.is_even() {
            return Err(FieldError::InvalidModulus("modulus is even".into()));
        }

        let p = modulus.to_biguint();
        let one = BigUint::one();
        let r = (&one << (64 * N)) % &p;
        let r_squared = (&r * &r) % &p;
        let r_cubed = (&r_squared * &r) % &p;

        let p_minus_1 = &p - &one;
        let euler = &p_minus_1 >> 1;

        let mut s = 0u32;
        let mut t = p_minus_1.clone();
        while t.is_even() {
            t >>= 1;
            s += 1;
        }
        let t_minus_1_over_2 = (&t - &one) >> 1;

        let g = BigUint::from(generator) % &p;
        if g.modpow(&euler, &p) != p_minus_1 {
            return Err(FieldError::InvalidGenerator(format!(
                "{} is a quadratic residue",
                generator
            )));
        }

        let mut nqr = BigUint::from(2u64);
        while nqr.modpow(&euler, &p) != p_minus_1 {
            nqr += 1u64;
        }
        let nqr_to_t = nqr.modpow(&t, &p);
        let root_of_unity = g.modpow(&t, &p);

        let to_mont = |x: &BigUint| fit::<N>(&((x * &r) % &p));

        let config = Self {
            modulus,
            num_bits: modulus.num_bits(),
            inv: mont_inv(modulus.0[0]),
            r: fit(&r),
            r_squared: fit(&r_squared),
            r_cubed: fit(&r_cubed),
            euler: fit(&euler),
            s,
            t: fit(&t),
            t_minus_1_over_2: fit(&t_minus_1_over_2),
            nqr: to_mont(&nqr),
            nqr_to_t: to_mont(&nqr_to_t),
            multiplicative_generator: to_mont(&g),
            root_of_unity: to_mont(&root_of_unity),
        };

        tracing::debug!(
            bits = config.num_bits,
            two_adicity = config.s,
            "derived prime field constants"
        );

        Ok(config)
    }

    /// Like [`FpConfig::new`], but treats a bad built-in parameter set as a
    /// programming error.
    pub fn for_params<P: FpParams<N>>() -> Self {
        let _span = tracing::debug_span!("FpConfig::for_params", field = P::NAME).entered();
        match Self::new(P::MODULUS, P::GENERATOR) {
            Ok(config) => config,
            Err(e) => panic!("invalid parameters for field {}: {}", P::NAME, e),
        }
    }
}

// Every value reduced mod p fits in N limbs.
fn fit<const N: usize>(value: &BigUint) -> BigInt<N> {
    if value.is_zero() {
        return BigInt::zero();
    }
    let digits = value.to_u64_digits();
    let mut limbs = [0u64; N];
    limbs[..digits.len()].copy_from_slice(&digits);
    BigInt::new(limbs)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2^64 - 59, the largest single-limb prime.
    const P64: BigInt<1> = BigInt::new([0xffffffffffffffc5]);

    #[test]
    fn test_rejects_bad_moduli() {
        assert!(matches!(
            FpConfig::<2>::new(BigInt::new([7, 0]), 3),
            Err(FieldError::InvalidModulus(_))
        ));
        assert!(matches!(
            FpConfig::<1>::new(BigInt::new([16]), 3),
            Err(FieldError::InvalidModulus(_))
        ));
    }

    #[test]
    fn test_rejects_residue_generator() {
        // 4 is a square modulo every odd prime.
        assert!(matches!(
            FpConfig::<1>::new(P64, 4),
            Err(FieldError::InvalidGenerator(_))
        ));
    }

    #[test]
    fn test_two_adic_decomposition() {
        // p - 1 = 2^64 - 60 = 4 * (2^62 - 15)
        let config = FpConfig::<1>::new(P64, 2).unwrap();
        assert_eq!(config.num_bits, 64);
        assert_eq!(config.s, 2);
        assert_eq!(config.t, BigInt::new([(1u64 << 62) - 15]));
        assert_eq!(config.t_minus_1_over_2, BigInt::new([((1u64 << 62) - 16) / 2]));
        assert_eq!(config.euler, BigInt::new([0x7fffffffffffffe2]));
        // R = 2^64 = 59 mod p
        assert_eq!(config.r, BigInt::new([59]));
        assert_eq!(config.r_squared, BigInt::new([59 * 59]));
        assert_eq!(config.r_cubed, BigInt::new([59 * 59 * 59]));
        assert_eq!(config.modulus.0[0].wrapping_mul(config.inv), u64::MAX);
    }
}
