//! zkalgebra: prime-field and elliptic-curve arithmetic for pairing-friendly curves
//!
//! Fields are Montgomery-form residues over fixed-width limb arrays, selected
//! at compile time by a parameter type; curve points live in Jacobian
//! coordinates over those fields. BN254 and BLS12-381 G1 are provided.

pub mod arithmetic;
pub mod curve;
pub mod field;

// Re-export commonly used types
pub use arithmetic::bigint::{BigInt, BigInteger};
pub use arithmetic::traits::{Field, LegendreSymbol, PrimeField};
pub use curve::{CurveError, CurveParams, PointCodec, G1};
pub use field::{batch_invert, FieldError, FieldResult, Fp, FpParams};

/// Feature flags
#[cfg(feature = "parallel")]
pub use rayon;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
