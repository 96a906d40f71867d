/// User model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
///     name VARCHAR(100) COLLATE utf8mb4_bin NOT NULL UNIQUE,
///     password VARCHAR(255) NOT NULL
/// );
/// ```
///
/// The `password` column holds an Argon2id PHC string, never plaintext.

use serde::{Deserialize, Serialize};

/// Numeric user identifier, assigned by the store on creation
pub type UserId = i64;

/// A registered user, without credential material
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: UserId,

    /// Unique login name
    pub name: String,
}

/// What a login lookup needs: the user's id and stored password hash
///
/// Deliberately not `Serialize`; the hash never leaves the process.
#[derive(Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UserCredentials {
    /// User ID
    pub id: UserId,

    /// Argon2id password hash (PHC string)
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentials")
            .field("id", &self.id)
            .field("password_hash", &"<redacted>")
            .finish()
    }
}
