//! BN254 (alt_bn128) G1: `y^2 = x^3 + 3` over a 254-bit prime field.

use lazy_static::lazy_static;

use super::{g1, CurveConfig, CurveParams};
use crate::arithmetic::bigint::BigInt;
use crate::field::{Fp, FpConfig, FpParams};

/// Base field parameters.
pub struct FqParams;

impl FpParams<4> for FqParams {
    const MODULUS: BigInt<4> = BigInt::new([
        0x3c208c16d87cfd47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ]);
    const GENERATOR: u64 = 3;
    const NAME: &'static str = "bn254::Fq";

    fn config() -> &'static FpConfig<4> {
        &FQ_CONFIG
    }
}

/// Scalar field parameters. `r - 1` is divisible by `2^28`.
pub struct FrParams;

impl FpParams<4> for FrParams {
    const MODULUS: BigInt<4> = BigInt::new([
        0x43e1f593f0000001,
        0x2833e84879b97091,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ]);
    const GENERATOR: u64 = 5;
    const NAME: &'static str = "bn254::Fr";

    fn config() -> &'static FpConfig<4> {
        &FR_CONFIG
    }
}

pub type Fq = Fp<FqParams, 4>;
pub type Fr = Fp<FrParams, 4>;

/// Curve parameters. The cofactor is one, so every curve point is in G1.
pub struct G1Params;

impl CurveParams for G1Params {
    type BaseField = Fq;
    type ScalarField = Fr;

    const NAME: &'static str = "bn254::G1";

    fn config() -> &'static CurveConfig<Self> {
        &G1_CONFIG
    }
}

pub type G1 = g1::G1<G1Params>;

lazy_static! {
    static ref FQ_CONFIG: FpConfig<4> = FpConfig::for_params::<FqParams>();
    static ref FR_CONFIG: FpConfig<4> = FpConfig::for_params::<FrParams>();
    static ref G1_CONFIG: CurveConfig<G1Params> =
        CurveConfig::for_params(0, 3, &[1], BigInt::from_u64(1), BigInt::from_u64(2));
}
