use std::env;

use anyhow::Result;

use crate::reddit::client::DEFAULT_API_URL;

/// Default number of posts/comments requested per listing.
pub const DEFAULT_FETCH_LIMIT: u32 = 50;

/// Central configuration loaded from environment variables.
///
/// Everything has a default, so the CLI works out of the box. The .env
/// file is loaded automatically at startup via dotenvy.
pub struct Config {
    /// User-Agent header sent to Reddit (REDFLAG_USER_AGENT). Reddit
    /// throttles generic agents hard, so the default is descriptive.
    pub user_agent: String,
    /// Public API endpoint (REDFLAG_API_URL, defaults to https://www.reddit.com).
    pub api_url: String,
    /// How many posts and comments to fetch per account (REDFLAG_FETCH_LIMIT).
    pub fetch_limit: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let user_agent = env::var("REDFLAG_USER_AGENT").unwrap_or_else(|_| {
            format!(
                "redflag/{} (bot-likelihood scanner)",
                env!("CARGO_PKG_VERSION")
            )
        });

        let fetch_limit = env::var("REDFLAG_FETCH_LIMIT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_FETCH_LIMIT);

        Ok(Self {
            user_agent,
            api_url: env::var("REDFLAG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            fetch_limit,
        })
    }
}
