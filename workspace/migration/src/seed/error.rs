use common::PasswordError;
use sea_orm::DbErr;
use thiserror::Error;

/// Error types for the seeding routine.
///
/// Every variant is fatal: the schema build that triggered the seed must fail.
#[derive(Error, Debug)]
pub enum SeedError {
    /// Error from the backing store (constraint violations included)
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Error from the password hashing collaborator
    #[error("Password hashing error: {0}")]
    Password(#[from] PasswordError),

    /// A seed data file could not be parsed
    #[error("Invalid seed file '{file}': {source}")]
    Data {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The seed set breaks one of its own invariants
    #[error("Invalid seed data: {0}")]
    Invalid(String),

    /// A row with a seeded key already exists with different values
    #[error("Seed conflict in '{table}': existing row with key {key} differs from seed data")]
    Conflict { table: &'static str, key: String },
}

impl From<SeedError> for DbErr {
    fn from(error: SeedError) -> Self {
        match error {
            SeedError::Database(err) => err,
            other => DbErr::Custom(other.to_string()),
        }
    }
}
