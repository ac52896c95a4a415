// Activity record — the input snapshot for one account.
//
// Assembled by the Reddit fetch layer (or loaded from a JSON file) and
// consumed by the scoring engine. Immutable for the duration of one
// analysis; the engine never mutates or stores it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single post or comment from an account's public history.
///
/// Posts and comments share a shape. For posts, `text` holds the title
/// plus the self-text body when present; for comments, the body. The
/// text may be empty, never null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub created_at: DateTime<Utc>,
    pub subreddit: String,
    pub score: i64,
    #[serde(default)]
    pub text: String,
}

/// The complete public activity snapshot for one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub username: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    pub link_karma: i64,
    pub comment_karma: i64,
    /// Reddit's verified-email flag.
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub posts: Vec<ContentItem>,
    #[serde(default)]
    pub comments: Vec<ContentItem>,
}

impl ActivityRecord {
    /// Combined link and comment karma.
    pub fn total_karma(&self) -> i64 {
        self.link_karma + self.comment_karma
    }
}
