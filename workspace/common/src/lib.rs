//! Helpers shared between the entity crate, the migrations and the CLI.
//!
//! Nothing in here talks to the database: this crate holds the password
//! hashing collaborator, the canonical form used for case-insensitive lookup
//! columns and the currency formatting used when printing prices.

pub mod money;
pub mod normalize;
pub mod password;

pub use money::format_brl;
pub use normalize::normalize;
pub use password::{Argon2Hasher, CredentialHasher, PasswordError};
