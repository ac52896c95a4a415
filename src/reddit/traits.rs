// Activity source trait — the swap-ready abstraction.
//
// The batch pipeline works against this trait instead of RedditClient
// directly, so tests and offline runs can feed it fixed records.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::reddit::client::RedditClient;
use crate::reddit::{user, FetchError};
use crate::scoring::record::ActivityRecord;

/// Anything that can produce an account's activity record by username.
/// Implementations must be async because the live source is HTTP.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn fetch_activity(&self, username: &str) -> Result<ActivityRecord, FetchError>;
}

#[async_trait]
impl ActivitySource for RedditClient {
    async fn fetch_activity(&self, username: &str) -> Result<ActivityRecord, FetchError> {
        user::fetch_user_activity(self, username).await
    }
}

/// In-memory source backed by a fixed set of records, keyed by username.
/// Unknown usernames come back as NotFound, like the live API.
pub struct StaticSource {
    records: HashMap<String, ActivityRecord>,
}

impl StaticSource {
    pub fn new(records: impl IntoIterator<Item = ActivityRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.username.clone(), record))
                .collect(),
        }
    }
}

#[async_trait]
impl ActivitySource for StaticSource {
    async fn fetch_activity(&self, username: &str) -> Result<ActivityRecord, FetchError> {
        self.records
            .get(username)
            .cloned()
            .ok_or(FetchError::NotFound)
    }
}
