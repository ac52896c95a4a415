// Public Reddit client — unauthenticated JSON over HTTP.
//
// Reddit's read endpoints are public when addressed with a `.json`
// suffix and don't require OAuth. This client is a thin reqwest wrapper
// with a generic GET helper; every request goes through the shared
// rate limiter and its 429 retry loop.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::reddit::rate_limit::{self, RateLimiter};
use crate::reddit::FetchError;

/// Default public API endpoint.
pub const DEFAULT_API_URL: &str = "https://www.reddit.com";

/// Sliding-window budget for unauthenticated clients.
const MAX_REQUESTS_PER_MINUTE: u32 = 60;

/// Minimum gap between consecutive requests.
const MIN_REQUEST_DELAY_MS: u64 = 1_000;

/// Unauthenticated HTTP client for public Reddit JSON endpoints.
///
/// Holds the rate limiter, so cloning the reqwest client around is never
/// needed: every caller shares one pacing budget through `&RedditClient`.
pub struct RedditClient {
    client: reqwest::Client,
    base_url: String,
    limiter: RateLimiter,
    fetch_limit: u32,
}

impl RedditClient {
    /// Create a new client pointing at the given base URL.
    ///
    /// `user_agent` is mandatory: Reddit throttles default agents hard.
    /// `fetch_limit` caps how many posts and comments are requested per
    /// listing (Reddit itself tops out at 100).
    pub fn new(base_url: &str, user_agent: &str, fetch_limit: u32) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(MAX_REQUESTS_PER_MINUTE, 60, MIN_REQUEST_DELAY_MS),
            fetch_limit,
        })
    }

    /// How many items to request per listing endpoint.
    pub fn fetch_limit(&self) -> u32 {
        self.fetch_limit
    }

    /// Make a GET request to a Reddit path and deserialize the response.
    ///
    /// `path` is the endpoint including the `.json` suffix (e.g.
    /// "/user/spez/about.json"). `params` are query string key-value
    /// pairs. 404 and 403 map to the expected NotFound and Suspended
    /// outcomes; 429 is retried with backoff before surfacing.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);

        debug!(path = path, "Reddit GET request");

        rate_limit::with_retry(&self.limiter, || async {
            let response = self.client.get(&url).query(params).send().await?;

            match response.status() {
                status if status.is_success() => Ok(response.json::<T>().await?),
                reqwest::StatusCode::NOT_FOUND => Err(FetchError::NotFound),
                reqwest::StatusCode::FORBIDDEN => Err(FetchError::Suspended),
                status => Err(FetchError::Status(status)),
            }
        })
        .await
    }
}

// -- Serde envelope for Reddit listing responses --

/// Reddit wraps every JSON payload in a kind/data envelope.
#[derive(Debug, Deserialize)]
pub struct Thing<T> {
    pub data: T,
}

/// Body of a `Listing` thing: one page of wrapped children.
#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub children: Vec<Thing<T>>,
}
