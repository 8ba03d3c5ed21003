//! Presentation helpers for addressable records.
//!
//! # Responsibility
//! - Render postal addresses, phone-like numbers and person names.
//!
//! # Invariants
//! - Formatters are pure and never fail; missing input yields partial output.

pub mod address;
pub mod name;
pub mod number;

/// Treats empty strings as absent.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
