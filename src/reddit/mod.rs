// Reddit fetch layer — public JSON endpoints, no authentication.
//
// Built on reqwest. Each submodule handles one area: the shared HTTP
// client, per-user activity, subreddit listings, and rate limiting.

pub mod client;
pub mod rate_limit;
pub mod subreddit;
pub mod traits;
pub mod user;

use thiserror::Error;

/// Errors surfaced by the fetch layer.
///
/// NotFound and Suspended are expected outcomes for arbitrary usernames;
/// callers report them per account instead of aborting a whole batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("account not found")]
    NotFound,
    #[error("account suspended or inaccessible")]
    Suspended,
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
}

impl FetchError {
    /// True when the server told us to slow down (HTTP 429).
    pub fn is_rate_limited(&self) -> bool {
        match self {
            FetchError::Status(status) => *status == reqwest::StatusCode::TOO_MANY_REQUESTS,
            FetchError::Http(err) => err.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS),
            _ => false,
        }
    }
}
