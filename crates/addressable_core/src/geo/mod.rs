//! Geographic helpers: coordinate parsing, distances and the geocoding port.
//!
//! # Responsibility
//! - Parse and hold `(lat, lon)` positions.
//! - Compute great-circle distances in miles, kilometres or nautical miles.
//! - Define the geocoding collaborator contract.
//!
//! # Invariants
//! - Geocoding never runs for blank addresses.
//! - Distance math never produces NaN for valid finite inputs.

pub mod coordinates;
pub mod distance;
pub mod geocode;
