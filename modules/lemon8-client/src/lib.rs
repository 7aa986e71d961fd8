//! Client for the Lemon8 private mobile API.
//!
//! All endpoints live under one versioned base path and expect the Android
//! app's user agent plus the `aid` app id on every call. Responses arrive
//! in a `{"data": ...}` envelope.

pub mod error;
pub mod types;

pub use error::{Lemon8Error, Result};
pub use types::{Comment, Id, Post, UserProfile};

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use types::{ApiResponse, CommentPage, Stream};

const BASE_URL: &str = "https://api22-normal-useast1a.lemon8-app.com/api/550";

/// Lemon8 app id, required as `aid` on every request.
const APP_ID: &str = "2657";

/// User agent of the Android client the API is keyed to.
const USER_AGENT: &str =
    "com.bd.nproject/55014 (Linux; U; Android 9; en_US; unknown; Build/PI;tt-ok/3.12.13.1)";

/// Category id of the per-user post stream.
const USER_STREAM_CATEGORY: &str = "486";

/// Page size for posts and comments. One request, no page walk; the server
/// is trusted to return everything under this bound.
const PAGE_SIZE: &str = "1000";

/// Post captions embed HTML-ish markup tags; the upstream data was built
/// against bodies with those tags removed.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

pub struct Lemon8Client {
    client: reqwest::Client,
}

impl Lemon8Client {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// Fetch a user's profile homepage.
    pub async fn get_user_profile(&self, user_id: &str) -> Result<UserProfile> {
        let resp: ApiResponse<UserProfile> = self
            .get_json(
                "user/profile/homepage",
                &[("user_id", user_id), ("aid", APP_ID)],
            )
            .await?;
        Ok(resp.data)
    }

    /// Fetch a user's post stream. Single request with a large page size.
    pub async fn get_user_posts(&self, user_id: &str) -> Result<Vec<Post>> {
        let body = self
            .get_checked(
                "stream",
                &[
                    ("category", USER_STREAM_CATEGORY),
                    ("count", PAGE_SIZE),
                    ("category_parameter", user_id),
                    ("session_cnt", "1"),
                    ("aid", APP_ID),
                    ("device_platform", "android"),
                ],
            )
            .await?
            .text()
            .await?;

        let stripped = TAG_RE.replace_all(&body, "");
        let resp: ApiResponse<Stream> = serde_json::from_str(&stripped)?;

        tracing::debug!(posts = resp.data.items.len(), "Fetched user post stream");
        Ok(resp.data.items)
    }

    /// Fetch the comment list of a post. Single request, no page walk.
    pub async fn get_comments(&self, post: &Post) -> Result<Vec<Comment>> {
        let resp: ApiResponse<CommentPage> = self
            .get_json(
                "comment_v2/comments",
                &[
                    ("group_id", &post.group_id.to_string()),
                    ("item_id", &post.item_id.to_string()),
                    ("media_id", &post.media_id.to_string()),
                    ("count", PAGE_SIZE),
                    ("aid", APP_ID),
                ],
            )
            .await?;
        Ok(resp.data.data)
    }

    /// Fetch the full detail of a single comment.
    pub async fn get_comment_detail(&self, post: &Post, comment_id: &Id) -> Result<Value> {
        let resp: ApiResponse<Value> = self
            .get_json(
                "comment_v2/detail",
                &[
                    ("group_id", &post.group_id.to_string()),
                    ("item_id", &post.item_id.to_string()),
                    ("media_id", &post.media_id.to_string()),
                    ("comment_id", &comment_id.to_string()),
                    ("count", PAGE_SIZE),
                    ("aid", APP_ID),
                    ("language", "en"),
                ],
            )
            .await?;
        Ok(resp.data)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let resp = self.get_checked(path, params).await?;
        Ok(resp.json().await?)
    }

    async fn get_checked(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<reqwest::Response> {
        let url = format!("{BASE_URL}/{path}");
        let resp = self.client.get(&url).query(params).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Lemon8Error::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(resp)
    }
}
