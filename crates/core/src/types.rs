/// All primary keys are server-generated UUIDs.
pub type DbId = uuid::Uuid;

/// Opaque session token. Generated server-side, never derived from user input.
pub type Token = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A resource with a single owning user.
///
/// Implemented by every entity whose lifecycle is gated by the ownership
/// guard; the guard compares this against the authenticated session's owner.
pub trait Owned {
    fn owner_id(&self) -> DbId;
}
