//! Bearer-token session store.
//!
//! Raw tokens are handed to the client once and never stored; the store
//! keeps only their SHA-256 digests.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone)]
struct SessionRecord {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

/// Session store keyed by token digest.
pub struct SessionStore {
    sessions: DashMap<String, SessionRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Issue a new session token for a user. Returns the raw token.
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();

        self.sessions.insert(
            digest(&token),
            SessionRecord {
                user_id,
                expires_at: Utc::now() + ttl,
            },
        );
        debug!(user_id = %user_id, "Session issued");
        token
    }

    /// Resolve a raw token to a user id. Expired or unknown tokens
    /// resolve to `None`.
    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        let key = digest(token);
        let record = self.sessions.get(&key)?;
        if record.expires_at <= Utc::now() {
            drop(record);
            self.sessions.remove(&key);
            return None;
        }
        Some(record.user_id)
    }

    pub fn revoke(&self, token: &str) {
        self.sessions.remove(&digest(token));
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
