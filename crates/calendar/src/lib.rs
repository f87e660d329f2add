//! Owner-scoped resource repositories: calendar events and user
//! self-service.
//!
//! Neither repository implements its own authorization logic; everything
//! owner-scoped goes through the session crate's ownership guard, and user
//! self-service re-authenticates with the account password.

pub mod event;
pub mod user;

pub use event::EventRepository;
pub use user::UserRepository;
