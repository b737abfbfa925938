//! Hard-failure channel for construction validation and read access.
//!
//! Mutating operations report failure as a `false` return instead; only
//! constructors and authenticated getters produce these errors.

use thiserror::Error;

/// Result type alias using [`InvalidArgument`].
pub type Result<T> = std::result::Result<T, InvalidArgument>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    #[error("invalid gender: {0:?} (expected Male or Female)")]
    InvalidGender(String),

    #[error("invalid policy type: {0:?}")]
    InvalidPolicyType(String),

    #[error("risk profile {0} outside [1, 10]")]
    InvalidRiskProfile(u8),

    #[error("implausible age: {0}")]
    InvalidAge(u32),

    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: String },

    #[error("authentication denied")]
    AuthenticationDenied,
}
