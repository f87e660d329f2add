//! Authentication substrate: session issuance and verification, the
//! ownership guard, and the background expiry sweep.
//!
//! Everything resource-owning in the backend funnels through this crate:
//! [`SessionService`] owns the login/logout protocol and identity checks,
//! [`OwnershipGuard`] composes an identity check with a
//! lookup-and-compare step, and [`ExpirySweeper`] revokes sessions whose
//! sliding lifetime window has lapsed.

pub mod config;
pub mod guard;
pub mod service;
pub mod sweeper;

pub use config::SessionConfig;
pub use guard::OwnershipGuard;
pub use service::{AuthResult, SessionService};
pub use sweeper::{ExpirySweeper, SweeperHandle};
