//! Stored credential records.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use uuid::Uuid;

/// A stored (website, username, password) entry.
///
/// Only `password` matters to the analyzer; the rest is display data.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub id: String,
    pub website: String,
    pub username: String,
    pub password: SecretString,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    /// Creates a record with a fresh UUID v4 id, timestamped now.
    pub fn new(
        website: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), website, username, password)
    }

    /// Creates a record with a caller-supplied id, timestamped now.
    pub fn with_id(
        id: impl Into<String>,
        website: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            id: id.into(),
            website: website.into(),
            username: username.into(),
            password,
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match on website or username.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.website.to_lowercase().contains(&query)
            || self.username.to_lowercase().contains(&query)
    }
}
