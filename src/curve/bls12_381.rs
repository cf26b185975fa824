//! BLS12-381 G1: `y^2 = x^3 + 4` over a 381-bit prime field.

use lazy_static::lazy_static;

use super::{g1, CurveConfig, CurveParams};
use crate::arithmetic::bigint::BigInt;
use crate::field::{Fp, FpConfig, FpParams};

pub struct FqParams;

impl FpParams<6> for FqParams {
    const MODULUS: BigInt<6> = BigInt::new([
        0xb9feffffffffaaab,
        0x1eabfffeb153ffff,
        0x6730d2a0f6b0f624,
        0x64774b84f38512bf,
        0x4b1ba7b6434bacd7,
        0x1a0111ea397fe69a,
    ]);
    const GENERATOR: u64 = 2;
    const NAME: &'static str = "bls12_381::Fq";

    fn config() -> &'static FpConfig<6> {
        &FQ_CONFIG
    }
}

pub struct FrParams;

impl FpParams<4> for FrParams {
    const MODULUS: BigInt<4> = BigInt::new([
        0xffffffff00000001,
        0x53bda402fffe5bfe,
        0x3339d80809a1d805,
        0x73eda753299d7d48,
    ]);
    const GENERATOR: u64 = 7;
    const NAME: &'static str = "bls12_381::Fr";

    fn config() -> &'static FpConfig<4> {
        &FR_CONFIG
    }
}

pub type Fq = Fp<FqParams, 6>;
pub type Fr = Fp<FrParams, 4>;

pub struct G1Params;

impl CurveParams for G1Params {
    type BaseField = Fq;
    type ScalarField = Fr;

    const NAME: &'static str = "bls12_381::G1";

    fn config() -> &'static CurveConfig<Self> {
        &G1_CONFIG
    }
}

pub type G1 = g1::G1<G1Params>;

const COFACTOR: [u64; 2] = [0x8c00aaab0000aaab, 0x396c8c005555e156];

const GENERATOR_X: BigInt<6> = BigInt::new([
    0xfb3af00adb22c6bb,
    0x6c55e83ff97a1aef,
    0xa14e3a3f171bac58,
    0xc3688c4f9774b905,
    0x2695638c4fa9ac0f,
    0x17f1d3a73197d794,
]);

const GENERATOR_Y: BigInt<6> = BigInt::new([
    0x0caa232946c5e7e1,
    0xd03cc744a2888ae4,
    0x00db18cb2c04b3ed,
    0xfcf5e095d5d00af6,
    0xa09e30ed741d8ae4,
    0x08b3f481e3aaa0f1,
]);

lazy_static! {
    static ref FQ_CONFIG: FpConfig<6> = FpConfig::for_params::<FqParams>();
    static ref FR_CONFIG: FpConfig<4> = FpConfig::for_params::<FrParams>();
    static ref G1_CONFIG: CurveConfig<G1Params> =
        CurveConfig::for_params(0, 4, &COFACTOR, GENERATOR_X, GENERATOR_Y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arithmetic::traits::{Field, PrimeField};
    use num_traits::Zero;

    #[test]
    fn test_field_constants() {
        assert_eq!(Fq::size_in_bits(), 381);
        assert_eq!(Fr::size_in_bits(), 255);
        assert_eq!(Fr::two_adicity(), 32);
        assert_eq!(Fr::root_of_unity().pow(1 << 32), Fr::from(1u64));
        assert_eq!(Fq::modulus().0[0], 0xb9feffffffffaaab);
    }

    #[test]
    fn test_generator_in_subgroup() {
        let g = G1::one();
        assert!(g.is_well_formed());
        assert!(g.is_in_safe_subgroup());
        assert!(!g.z.is_zero());
    }

    #[test]
    fn test_cofactor_clears_non_subgroup_point() {
        // x = 0 gives y^2 = 4, a curve point outside the prime subgroup.
        let p = G1::from_x(Fq::zero(), false).unwrap();
        assert!(p.is_well_formed());
        assert!(!p.is_in_safe_subgroup());
        assert_eq!(p.validate(true), Err(crate::curve::CurveError::NotInSubgroup));
        assert!(p.mul_by_cofactor().is_in_safe_subgroup());
    }
}
