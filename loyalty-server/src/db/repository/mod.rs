//! Repository Module
//!
//! Per-entity repositories over the shared SQLite pool. Writes follow a
//! stage-then-commit contract: `add` stages rows in memory, `save_changes`
//! commits the whole stage in one transaction.

pub mod benefit;
pub mod customer;
pub mod membership;
pub mod preference;
pub mod provisioning;

// Re-exports
pub use benefit::BenefitRepository;
pub use customer::CustomerRepository;
pub use membership::MembershipRepository;
pub use preference::PreferenceRepository;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Stage-then-commit repository contract.
///
/// `add` assigns the entity ID and timestamps, validates invariants and
/// stages the row without touching the database. `save_changes` writes
/// every staged row in one transaction; the stage is cleared only after
/// a successful commit, so a failed save keeps the rows staged.
#[allow(async_fn_in_trait)]
pub trait StagedRepository<Entity, CreateDto> {
    fn add(&self, data: CreateDto) -> RepoResult<Entity>;
    async fn save_changes(&self) -> RepoResult<usize>;
}
