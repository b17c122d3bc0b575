use serde::{Deserialize, Serialize};

/// Persisted thread row. `delete_password` holds an Argon2id PHC hash, never
/// the raw secret; `reported` and `delete_password` must not leak into read
/// projections (see `model::redact`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadRecord {
    pub id: String,
    pub board: String,
    pub text: String,
    pub created_on: String,
    pub bumped_on: String,
    pub reported: bool,
    pub delete_password: String,
}

/// Persisted reply row. Replies are append-only: deletion replaces `text`
/// with a tombstone and leaves the row in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRecord {
    pub id: String,
    pub thread_id: String,
    pub text: String,
    pub created_on: String,
    pub reported: bool,
    pub delete_password: String,
}
