// User activity fetching — profile plus recent posts and comments.
//
// Three public endpoints per account: about.json for the profile,
// submitted.json for posts, comments.json for comments. Everything is
// flattened into one ActivityRecord for the scoring engine.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;

use crate::reddit::client::{Listing, RedditClient, Thing};
use crate::reddit::FetchError;
use crate::scoring::record::{ActivityRecord, ContentItem};

/// Fetch an account's profile and recent activity as one record.
///
/// Suspended accounts surface as `FetchError::Suspended` even when the
/// profile endpoint answers 200 — Reddit marks them in the body instead
/// of the status code.
pub async fn fetch_user_activity(
    client: &RedditClient,
    username: &str,
) -> Result<ActivityRecord, FetchError> {
    let about: Thing<AboutData> = client
        .get_json(&format!("/user/{username}/about.json"), &[])
        .await?;

    if about.data.is_suspended {
        return Err(FetchError::Suspended);
    }

    let limit = client.fetch_limit().to_string();
    let params = [("limit", limit.as_str()), ("raw_json", "1")];

    let submitted: Thing<Listing<ItemData>> = client
        .get_json(&format!("/user/{username}/submitted.json"), &params)
        .await?;
    let comment_listing: Thing<Listing<ItemData>> = client
        .get_json(&format!("/user/{username}/comments.json"), &params)
        .await?;

    let posts: Vec<ContentItem> = submitted
        .data
        .children
        .into_iter()
        .map(|child| child.data.into_post())
        .collect();
    let comments: Vec<ContentItem> = comment_listing
        .data
        .children
        .into_iter()
        .map(|child| child.data.into_comment())
        .collect();

    info!(
        username = username,
        posts = posts.len(),
        comments = comments.len(),
        "Collected activity for scoring"
    );

    Ok(ActivityRecord {
        username: username.to_string(),
        created_at: epoch_to_datetime(about.data.created_utc),
        link_karma: about.data.link_karma,
        comment_karma: about.data.comment_karma,
        verified: about.data.verified,
        posts,
        comments,
    })
}

/// Reddit reports times as fractional Unix epochs. Sub-second precision
/// is irrelevant at the day granularity the features work at.
fn epoch_to_datetime(epoch: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(epoch as i64, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

// -- Serde types for user endpoints --

/// Profile fields from about.json. Everything defaults because Reddit
/// sends a reduced body for suspended accounts.
#[derive(Debug, Deserialize)]
struct AboutData {
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    link_karma: i64,
    #[serde(default)]
    comment_karma: i64,
    #[serde(default)]
    verified: bool,
    #[serde(default)]
    is_suspended: bool,
}

/// One listing child from submitted.json or comments.json. Posts carry
/// title/selftext, comments carry body; the other fields are shared.
#[derive(Debug, Deserialize)]
struct ItemData {
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    score: i64,
    title: Option<String>,
    selftext: Option<String>,
    body: Option<String>,
}

impl ItemData {
    fn into_post(self) -> ContentItem {
        let title = self.title.unwrap_or_default();
        let selftext = self.selftext.unwrap_or_default();
        let text = if title.is_empty() {
            selftext
        } else if selftext.is_empty() {
            title
        } else {
            format!("{title}\n{selftext}")
        };

        ContentItem {
            created_at: epoch_to_datetime(self.created_utc),
            subreddit: self.subreddit,
            score: self.score,
            text,
        }
    }

    fn into_comment(self) -> ContentItem {
        ContentItem {
            created_at: epoch_to_datetime(self.created_utc),
            subreddit: self.subreddit,
            score: self.score,
            text: self.body.unwrap_or_default(),
        }
    }
}
