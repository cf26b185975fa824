//! Short Weierstrass curves in Jacobian coordinates.
//!
//! A curve is a parameter type implementing [`CurveParams`]; the group
//! element type [`G1`] is generic over it, so switching curves never
//! changes an algorithm.

pub mod bls12_381;
pub mod bn254;
pub mod codec;
pub mod g1;
pub mod observer;
pub mod scalar_mul;

pub use codec::{CodecError, CodecResult, PointCodec, OUTPUT_SEPARATOR};
pub use g1::G1;
pub use observer::{
    install_observer, GroupObserver, ObserverAlreadyInstalled, OpCounter, OpCounts, TracingObserver,
};
pub use scalar_mul::{scalar_mul, CurveGroup};

use crate::arithmetic::traits::{Field, PrimeField};
use crate::field::FieldError;

/// Errors for points that fail validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CurveError {
    #[error("Point is not on the curve")]
    NotOnCurve,

    #[error("Point is not in the prime-order subgroup")]
    NotInSubgroup,

    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Compile-time description of a curve `y^2 = x^3 + a x + b`.
pub trait CurveParams: 'static + Send + Sync + Sized {
    /// Field the coordinates live in.
    type BaseField: PrimeField;

    /// Field of order `r`, the prime subgroup order.
    type ScalarField: PrimeField;

    /// Human-readable curve name used in logs and panics.
    const NAME: &'static str;

    /// Shared curve constants, built once on first access.
    fn config() -> &'static CurveConfig<Self>;

    /// Forces the curve and both field configurations to initialize.
    fn static_init() {
        let _ = Self::config();
        let _ = Self::ScalarField::size_in_bits();
    }
}

/// Curve constants shared by every point of a curve.
pub struct CurveConfig<C: CurveParams> {
    pub coeff_a: C::BaseField,
    pub coeff_b: C::BaseField,
    /// `h`, little-limb-first.
    pub cofactor: Vec<u64>,
    /// `G1_one`, in affine form.
    pub generator: G1<C>,
}

impl<C: CurveParams> CurveConfig<C> {
    /// Builds the curve constants, checking that the generator satisfies the
    /// curve equation.
    pub fn new(
        coeff_a: C::BaseField,
        coeff_b: C::BaseField,
        cofactor: &[u64],
        generator_x: C::BaseField,
        generator_y: C::BaseField,
    ) -> Result<Self, CurveError> {
        let rhs = generator_x.square() * generator_x + coeff_a * generator_x + coeff_b;
        if generator_y.square() != rhs {
            return Err(CurveError::NotOnCurve);
        }

        tracing::debug!(
            curve = C::NAME,
            base_bits = C::BaseField::size_in_bits(),
            "initialized curve constants"
        );

        Ok(Self {
            coeff_a,
            coeff_b,
            cofactor: cofactor.to_vec(),
            generator: G1::from_affine(generator_x, generator_y),
        })
    }

    /// Like [`CurveConfig::new`] for built-in parameter tables, where a bad
    /// generator is a programming error.
    pub fn for_params(
        coeff_a: u64,
        coeff_b: u64,
        cofactor: &[u64],
        generator_x: <C::BaseField as PrimeField>::BigInt,
        generator_y: <C::BaseField as PrimeField>::BigInt,
    ) -> Self {
        let coords = C::BaseField::from_bigint(generator_x)
            .zip(C::BaseField::from_bigint(generator_y))
            .ok_or(CurveError::Field(FieldError::InvalidElement));
        let config = coords.and_then(|(x, y)| {
            Self::new(
                C::BaseField::from(coeff_a),
                C::BaseField::from(coeff_b),
                cofactor,
                x,
                y,
            )
        });
        match config {
            Ok(config) => config,
            Err(e) => panic!("invalid parameters for curve {}: {}", C::NAME, e),
        }
    }
}
