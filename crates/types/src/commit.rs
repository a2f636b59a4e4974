//! Commit metadata types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single indexed commit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Commit {
    /// Full commit hash
    pub hash: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Author timestamp
    pub authored_at: DateTime<Utc>,
    /// First line of the commit message
    pub summary: String,
}

impl Commit {
    /// Abbreviated hash for display
    pub fn short_hash(&self) -> &str {
        let end = self.hash.len().min(8);
        &self.hash[..end]
    }
}
