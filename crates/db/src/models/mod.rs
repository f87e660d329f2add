//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus the input structs used for inserts and updates.

pub mod event;
pub mod session;
pub mod user;

pub use event::{Event, EventDraft};
pub use session::{NewSession, Session};
pub use user::{DeletedUser, NewUser, User, UserResponse};
