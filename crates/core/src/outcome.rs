//! Tri-state result of an authorization-gated operation.
//!
//! Every operation that acts on an owned resource (session checks, event
//! CRUD, user self-service) reports one of exactly three outcomes:
//! [`Outcome::Ok`] with a value, [`Outcome::NotFound`], or
//! [`Outcome::Unauthorized`]. Expected authorization failures are ordinary
//! control flow, never errors; infrastructure failures travel separately as
//! `Result::Err`.
//!
//! `NotFound` is reserved for "the resource genuinely does not exist and the
//! caller has already proven an ownership-eligible identity". Everything
//! else -- bad token, wrong owner, unknown username on login -- collapses to
//! `Unauthorized` so a caller can never probe which half of a credential
//! pair was wrong, or whether a foreign resource exists.

use serde::Serialize;

/// Status of an [`Outcome`], independent of any carried value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    NotFound,
    Unauthorized,
}

/// Result of an authorization-gated operation.
///
/// `Ok` always carries a value; `NotFound` and `Unauthorized` never do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Ok(T),
    NotFound,
    Unauthorized,
}

impl<T> Outcome<T> {
    /// The status of this outcome, with the value erased.
    pub fn status(&self) -> Status {
        match self {
            Outcome::Ok(_) => Status::Ok,
            Outcome::NotFound => Status::NotFound,
            Outcome::Unauthorized => Status::Unauthorized,
        }
    }

    /// `true` if this outcome carries a value.
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    /// The carried value, or `None` for the failure variants.
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Ok(value) => Some(value),
            _ => None,
        }
    }

    /// Map the carried value, leaving failure variants untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Unauthorized => Outcome::Unauthorized,
        }
    }

    /// Chain a further gated step on the carried value.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => f(value),
            Outcome::NotFound => Outcome::NotFound,
            Outcome::Unauthorized => Outcome::Unauthorized,
        }
    }

    /// Discard the carried value, keeping only the status.
    pub fn unit(self) -> Outcome<()> {
        self.map(|_| ())
    }
}

impl<T> From<Option<T>> for Outcome<T> {
    /// Absence of a looked-up resource is a normal `NotFound`, not an error.
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Outcome::Ok(value),
            None => Outcome::NotFound,
        }
    }
}
