// Subreddit scanning — collect recently active authors for batch scoring.
//
// Pulls the newest posts and comments for a subreddit and returns the
// distinct authors, so a whole community can be swept in one command.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::info;

use crate::reddit::client::{Listing, RedditClient, Thing};
use crate::reddit::FetchError;

/// Authors that are never worth scoring.
const SKIPPED_AUTHORS: [&str; 2] = ["AutoModerator", "[deleted]"];

/// Collect distinct authors active in a subreddit's recent posts and
/// comments, in first-seen order (posts first, then comments).
pub async fn collect_authors(
    client: &RedditClient,
    subreddit: &str,
    limit: u32,
) -> Result<Vec<String>, FetchError> {
    let limit = limit.to_string();
    let params = [("limit", limit.as_str())];

    let posts: Thing<Listing<AuthorData>> = client
        .get_json(&format!("/r/{subreddit}/new.json"), &params)
        .await?;
    let comments: Thing<Listing<AuthorData>> = client
        .get_json(&format!("/r/{subreddit}/comments.json"), &params)
        .await?;

    let mut seen = HashSet::new();
    let mut authors = Vec::new();

    for child in posts
        .data
        .children
        .into_iter()
        .chain(comments.data.children)
    {
        if let Some(author) = child.data.author {
            if SKIPPED_AUTHORS.contains(&author.as_str()) {
                continue;
            }
            if seen.insert(author.clone()) {
                authors.push(author);
            }
        }
    }

    info!(
        subreddit = subreddit,
        authors = authors.len(),
        "Collected active authors"
    );

    Ok(authors)
}

// -- Serde types for subreddit listings --

/// The single field needed from a listing child. Deleted items report
/// no author.
#[derive(Debug, Deserialize)]
struct AuthorData {
    author: Option<String>,
}
