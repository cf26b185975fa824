pub mod bigint;
pub mod montgomery;
pub mod traits;

pub use bigint::{BigInt, BigInteger};
pub use traits::{Field, LegendreSymbol, PrimeField};
