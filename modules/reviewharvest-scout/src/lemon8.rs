//! Lemon8 harvester: user → posts → comments → comment details.
//!
//! The profile and post list are fetched up front; each post then fans out
//! into one task, and each comment into one nested task. A comment-detail
//! failure is caught and counted against the post's job log; a
//! comment-list failure propagates and aborts the whole run.

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::{join_all, try_join_all};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use lemon8_client::{Comment, Id, Lemon8Client, Post, UserProfile};
use reviewharvest_common::{timefmt, PathPair};
use reviewharvest_sink::{put_pair, JsonSink};

use crate::joblog::{JobLog, JobLogger};
use crate::stats::HarvestStats;

const SITE: &str = "lemon8";
const LINK_BASE: &str = "https://www.lemon8-app.com";

/// Log channel for Lemon8 jobs.
const CHANNEL: &str = "lemon8";

/// Immutable per-post context, passed by value to every comment task and
/// denormalized into each persisted record.
#[derive(Debug, Clone, Serialize)]
pub struct PostContext {
    pub link: String,
    pub domain: String,
    pub tag: Vec<String>,
    pub crawling_time: String,
    pub crawling_time_epoch: i64,
    pub user_detail: UserProfile,
    pub post_detail: Post,
    pub path_data_raw: String,
    pub path_data_clean: String,
}

impl PostContext {
    fn paths(&self) -> PathPair {
        PathPair {
            raw: self.path_data_raw.clone(),
            clean: self.path_data_clean.clone(),
        }
    }

    fn entity(&self) -> String {
        format!(
            "{}/{}",
            self.user_detail.user_unique_name, self.post_detail.item_id
        )
    }
}

/// Build the context for one post. Pure except for the crawl timestamp.
pub fn post_context(user: &UserProfile, post: &Post) -> PostContext {
    let link = format!("{LINK_BASE}/{}/{}", user.user_unique_name, post.item_id);
    let parts: Vec<String> = link.split('/').map(str::to_string).collect();
    let domain = parts[2].clone();
    let tag = parts[2..].to_vec();

    let entity = format!("{}/{}", user.user_unique_name, post.item_id);
    let paths = PathPair::review(SITE, &entity, "detail");

    PostContext {
        link,
        domain,
        tag,
        crawling_time: timefmt::now(),
        crawling_time_epoch: timefmt::now_epoch(),
        user_detail: user.clone(),
        post_detail: post.clone(),
        path_data_raw: paths.raw,
        path_data_clean: paths.clean,
    }
}

/// Assemble a comment-detail record: the post context merged with the
/// vendor detail payload, re-pathed to the comment's own keys.
pub fn comment_record(
    ctx: &PostContext,
    comment_id: &Id,
    detail: Value,
) -> serde_json::Result<(Value, PathPair)> {
    let paths = PathPair::review(SITE, &ctx.entity(), &comment_id.to_string());

    let mut record = serde_json::to_value(ctx)?;
    let map = record
        .as_object_mut()
        .expect("context serializes to an object");
    map.insert("detail_review".to_string(), detail);
    map.insert("path_data_raw".to_string(), Value::String(paths.raw.clone()));
    map.insert(
        "path_data_clean".to_string(),
        Value::String(paths.clean.clone()),
    );

    Ok((record, paths))
}

/// Drive one leaf task to completion and book the outcome on the job
/// log. A failed leaf is recorded and reported as `false`; it never
/// propagates, so sibling leaves always run to completion.
pub async fn settle_leaf<F>(logger: &JobLogger, leaf_id: &str, work: F) -> bool
where
    F: std::future::Future<Output = Result<()>>,
{
    match work.await {
        Ok(()) => {
            logger.leaf_success(leaf_id);
            true
        }
        Err(e) => {
            logger.leaf_failure(leaf_id, &e);
            false
        }
    }
}

pub struct Lemon8Harvester {
    client: Lemon8Client,
    sink: Arc<dyn JsonSink>,
}

impl Lemon8Harvester {
    pub fn new(sink: Arc<dyn JsonSink>) -> Result<Self> {
        Ok(Self {
            client: Lemon8Client::new()?,
            sink,
        })
    }

    /// Run one harvest job for a user.
    pub async fn by_user_id(&self, user_id: &str) -> Result<HarvestStats> {
        let user = self
            .client
            .get_user_profile(user_id)
            .await
            .context("Failed to fetch user profile")?;
        let posts = self
            .client
            .get_user_posts(user_id)
            .await
            .context("Failed to fetch user posts")?;

        info!(
            user = %user.user_unique_name,
            posts = posts.len(),
            "Harvesting Lemon8 user"
        );

        let results =
            try_join_all(posts.iter().map(|post| self.harvest_post(&user, post))).await?;

        let mut stats = HarvestStats::default();
        for s in results {
            stats.merge(s);
        }
        Ok(stats)
    }

    /// Walk one post's comments. Errors here (comment-list fetch, context
    /// doc write) propagate and abort the run; the job log then stays in
    /// `Process`.
    async fn harvest_post(&self, user: &UserProfile, post: &Post) -> Result<HarvestStats> {
        let ctx = post_context(user, post);

        let comments = self
            .client
            .get_comments(post)
            .await
            .with_context(|| format!("Failed to list comments of post {}", post.item_id))?;

        let ctx_doc = serde_json::to_value(&ctx)?;
        put_pair(self.sink.as_ref(), &ctx_doc, &ctx.paths())
            .await
            .context("Failed to write post context document")?;

        let logger = JobLogger::create(
            CHANNEL,
            JobLog::new(
                &ctx.domain,
                &user.user_unique_name,
                &post.item_id.to_string(),
                comments.len(),
            ),
        );

        let mut stats = HarvestStats {
            parents: 1,
            leaves_total: comments.len() as u32,
            docs_written: 1,
            ..Default::default()
        };

        if comments.is_empty() {
            logger.finish();
            return Ok(stats);
        }

        let outcomes = join_all(
            comments
                .iter()
                .map(|comment| self.harvest_comment(&ctx, comment, &logger)),
        )
        .await;

        logger.finish();

        for succeeded in outcomes {
            if succeeded {
                stats.leaves_succeeded += 1;
                stats.docs_written += 1;
            } else {
                stats.leaves_failed += 1;
            }
        }
        Ok(stats)
    }

    /// Fetch, assemble, and persist one comment detail. Failures are
    /// counted against the job log and never abort sibling tasks.
    async fn harvest_comment(
        &self,
        ctx: &PostContext,
        comment: &Comment,
        logger: &JobLogger,
    ) -> bool {
        let leaf_id = comment.id.to_string();
        settle_leaf(logger, &leaf_id, self.try_harvest_comment(ctx, comment)).await
    }

    async fn try_harvest_comment(&self, ctx: &PostContext, comment: &Comment) -> Result<()> {
        let detail = self
            .client
            .get_comment_detail(&ctx.post_detail, &comment.id)
            .await?;
        let (record, paths) = comment_record(ctx, &comment.id, detail)?;
        put_pair(self.sink.as_ref(), &record, &paths).await?;
        Ok(())
    }
}
