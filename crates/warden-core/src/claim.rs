//! Claim domain model
//!
//! A claim records one issued bearer token: the opaque token string, the
//! owning user, and when it was minted. A user accumulates claims over
//! time; only the most recent one matters for re-use, and rotation
//! replaces rather than updates.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An issued bearer-token record bound to a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claim {
    /// Unique claim ID
    pub id: Uuid,

    /// The opaque token string
    pub token: String,

    /// When the token was minted
    pub created_at: DateTime<Utc>,

    /// Internal ID of the owning user
    pub user_id: Uuid,
}

impl Claim {
    /// Creates a new claim stamped with the current time.
    ///
    /// # Arguments
    ///
    /// * `token` - The opaque token string
    /// * `user_id` - Internal ID of the owning user
    pub fn new(token: impl Into<String>, user_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            token: token.into(),
            created_at: Utc::now(),
            user_id,
        }
    }

    /// Check whether this claim is still within its freshness window.
    ///
    /// A claim created exactly `window` ago counts as fresh.
    ///
    /// # Arguments
    ///
    /// * `window` - How long a claim stays current after minting
    pub fn is_fresh(&self, window: Duration) -> bool {
        Utc::now() <= self.created_at + window
    }
}
