//! Shared domain primitives for the friday calendar backend.
//!
//! This crate is intentionally free of storage and transport concerns.
//! It holds the types every other crate agrees on: the tri-state
//! [`Outcome`] returned by authorization-gated operations, the domain
//! error taxonomy, the deterministic password hasher, and the
//! recurrence-rule text validation used by events.

pub mod error;
pub mod hashing;
pub mod outcome;
pub mod recurrence;
pub mod text;
pub mod types;

pub use error::CoreError;
pub use hashing::Sha512Hasher;
pub use outcome::{Outcome, Status};
