//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository and geocoder calls into use-case level APIs.
//! - Keep callers decoupled from storage and provider details.

pub mod record_service;
