use friday_core::CoreError;

/// Failure of a store operation.
///
/// Authorization outcomes never travel through this type; it covers genuine
/// storage failures plus the two constraint violations callers can act on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint was violated (e.g. duplicate username).
    #[error("Unique constraint violated: {0}")]
    Conflict(String),

    /// An inserted row references an owner that does not exist.
    #[error("Referenced owner row does not exist")]
    MissingOwner,

    /// Any other database failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(constraint) => CoreError::Conflict(constraint),
            StoreError::MissingOwner => {
                CoreError::Conflict("referenced owner row does not exist".into())
            }
            StoreError::Database(e) => CoreError::Internal(e.to_string()),
        }
    }
}

/// Classify a sqlx error into a [`StoreError`].
///
/// - PostgreSQL `23505` (unique violation) becomes [`StoreError::Conflict`]
///   carrying the constraint name.
/// - PostgreSQL `23503` (foreign key violation) becomes
///   [`StoreError::MissingOwner`].
/// - Everything else passes through as [`StoreError::Database`].
pub(crate) fn classify_sqlx_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.code().as_deref() {
            Some("23505") => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return StoreError::Conflict(constraint);
            }
            Some("23503") => return StoreError::MissingOwner,
            _ => {}
        }
    }
    StoreError::Database(err)
}
