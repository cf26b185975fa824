//! Prime field implementations in Montgomery representation
//!
//! A field is selected at compile time by a parameter type implementing
//! [`FpParams`]; its derived constants live in an [`FpConfig`] computed
//! once on first use and shared read-only afterwards.

pub mod batch;
pub mod fp;
pub mod params;

pub use batch::batch_invert;
pub use fp::Fp;
pub use params::{FpConfig, FpParams};

/// Error types for field operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Element is not a quadratic residue")]
    NonResidue,

    #[error("Invalid field element: value is not below the modulus")]
    InvalidElement,

    #[error("Invalid modulus: {0}")]
    InvalidModulus(String),

    #[error("Invalid multiplicative generator: {0}")]
    InvalidGenerator(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type for field operations
pub type FieldResult<T> = Result<T, FieldError>;
