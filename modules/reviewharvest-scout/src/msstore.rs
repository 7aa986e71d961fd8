//! Microsoft Store harvester: media type → curated choices → products →
//! (detail, rating summary, full review walk).
//!
//! The collection walk is deliberately truncated: only the first choice
//! and the first products page are processed. The review walk inside a
//! product is complete (all pages).

use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use futures::future::join_all;
use regex::Regex;
use serde_json::{json, Map, Value};
use tracing::{error, info};

use msstore_client::{MsStoreClient, ProductDetail, ProductId, Review, ReviewsSummary};
use reviewharvest_common::{none_if_empty, timefmt, PathPair};
use reviewharvest_sink::{put_pair, JsonSink};

use crate::joblog::{JobLog, JobLogger};
use crate::stats::HarvestStats;

const SITE: &str = "microsoft_store";
const DOMAIN: &str = "microsoft-store.azurewebsites.net";

/// Log channel for Microsoft Store jobs.
const CHANNEL: &str = "microsoft_store";

/// Media types walked by a full run.
const MEDIA_TYPES: [&str; 2] = ["games", "apps"];

/// Only the first curated choice of a media type is walked.
const CHOICE_LIMIT: usize = 1;

/// Page size of the computed-products list.
const PRODUCT_PAGE_SIZE: u32 = 5;

/// The products list stops after one page; `nextPageNumber` is not
/// followed.
const FOLLOW_PRODUCT_PAGES: bool = false;

/// Star-bucket keys in the review summary (`star1Count` … `star5Count`).
/// The digit at index 4 becomes the bucket key.
static STAR_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^star\d{1}Count$").unwrap());

const REVIEW_COUNT_SUFFIX: &str = "ReviewCount";

/// Assemble the product-level headers record: the parent context every
/// review record is denormalized with. Pure except for the crawl
/// timestamp.
pub fn product_headers(
    app: &ProductDetail,
    rating: &ReviewsSummary,
) -> Result<(Value, PathPair)> {
    let link = format!("https://{DOMAIN}/detail/{}", app.product_id);
    let parts: Vec<String> = link.split('/').map(str::to_string).collect();
    let domain = parts[2].clone();
    let tag = parts[2..].to_vec();

    let paths = PathPair::review(SITE, &app.title, "detail");

    let headers = json!({
        "link": link,
        "domain": domain,
        "tag": tag,
        "crawling_time": timefmt::now(),
        "crawling_time_epoch": timefmt::now_epoch(),
        "reviews_name": app.title.clone(),
        "release_date_reviews": timefmt::utc(&app.release_date_utc)?,
        "release_date_epoch_reviews": timefmt::utc_epoch(&app.release_date_utc)?,
        "description_reviews": app.description.clone(),
        "developer_reviews": none_if_empty(&app.developer_name),
        "publisher_reviews": none_if_empty(&app.publisher_name),
        "features_reviews": app.features.clone(),
        "website_url_reviews": app.app_website_url.clone(),
        "product_ratings_reviews": app
            .product_ratings
            .iter()
            .map(|r| r.description.clone())
            .collect::<Vec<_>>(),
        "system_requirements_reviews": system_requirements(&app.system_requirements),
        "approximate_size_in_bytes_reviews": app.approximate_size_in_bytes.clone(),
        "maxInstall_size_in_bytes_reviews": app.max_install_size_in_bytes.clone(),
        "permissions_required_reviews": app.permissions_required.clone(),
        "installation_reviews": app.installation_terms.clone(),
        "allowed_platforms_reviews": app.allowed_platforms.clone(),
        "screenshots_reviews": app
            .screenshots
            .iter()
            .map(|s| s.url.clone())
            .collect::<Vec<_>>(),
        "location_reviews": null,
        "category_reviews": "application",
        "total_reviews": rating.review_count.clone(),
        "review_info": star_buckets(&rating.extra),
        "rating_info": review_count_buckets(&rating.extra),
        "reviews_rating": {
            "total_rating": rating.average_rating.clone(),
            "detail_total_rating": null,
        },
        "path_data_raw": paths.raw.clone(),
        "path_data_clean": paths.clean.clone(),
    });

    Ok((headers, paths))
}

/// Reshape `systemRequirements` groups to `{name, description}` lists,
/// keyed as the vendor keys them. A group without `items` maps to an
/// empty list.
fn system_requirements(groups: &Map<String, Value>) -> Value {
    let reshaped: Map<String, Value> = groups
        .iter()
        .map(|(key, group)| {
            let items: Vec<Value> = group
                .get("items")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .map(|item| {
                            json!({
                                "name": item.get("name").cloned().unwrap_or(Value::Null),
                                "description": item
                                    .get("description")
                                    .cloned()
                                    .unwrap_or(Value::Null),
                            })
                        })
                        .collect()
                })
                .unwrap_or_default();
            (key.clone(), Value::Array(items))
        })
        .collect();
    Value::Object(reshaped)
}

/// `star<N>Count` keys remapped to a rating bucket keyed by the digit N.
fn star_buckets(summary: &Map<String, Value>) -> Value {
    let buckets: Map<String, Value> = summary
        .iter()
        .filter(|(key, _)| STAR_COUNT_RE.is_match(key))
        .filter_map(|(key, value)| {
            key.chars()
                .nth(4)
                .map(|digit| (digit.to_string(), value.clone()))
        })
        .collect();
    Value::Object(buckets)
}

/// Keys ending in `ReviewCount` (`star1ReviewCount`, …) remapped to a
/// bucket keyed by the character at index 4, mirroring the star-count
/// mapping. The lowercase `reviewCount` total does not match.
fn review_count_buckets(summary: &Map<String, Value>) -> Value {
    let buckets: Map<String, Value> = summary
        .iter()
        .filter(|(key, _)| key.ends_with(REVIEW_COUNT_SUFFIX))
        .filter_map(|(key, value)| {
            key.chars()
                .nth(4)
                .map(|c| (c.to_string(), value.clone()))
        })
        .collect();
    Value::Object(buckets)
}

/// Assemble one review record: the product headers merged with the
/// review's own detail, re-pathed under `data_review/{review_id}`.
pub fn review_record(
    headers: &Value,
    title: &str,
    review: &Review,
) -> Result<(Value, PathPair)> {
    let paths = PathPair::review(SITE, title, &format!("data_review/{}", review.review_id));

    let submitted = review
        .submitted_date_time_utc
        .as_deref()
        .ok_or_else(|| {
            anyhow::anyhow!("review {} has no submission timestamp", review.review_id)
        })?;

    let detail = json!({
        "username_reviews": review.reviewer_name.clone(),
        "image_reviews": null,
        "created_time": timefmt::utc(submitted)?,
        "created_time_epoch": timefmt::utc_epoch(submitted)?,
        "email_reviews": null,
        "company_name": null,
        "location_reviews": null,
        "title_detail_reviews": review.title.clone(),
        "reviews_rating": review.rating.clone(),
        "detail_reviews_rating": null,
        "total_likes_reviews": review.helpful_positive.clone(),
        "total_dislikes_reviews": review.helpful_negative.clone(),
        "total_reply_reviews": null,
        "content_reviews": review.review_text.clone(),
        "reply_content_reviews": null,
        "date_of_experience": null,
        "date_of_experience_epoch": null,
    });

    let mut record = headers.clone();
    let map = record
        .as_object_mut()
        .expect("headers serialize to an object");
    map.insert("path_data_raw".to_string(), Value::String(paths.raw.clone()));
    map.insert(
        "path_data_clean".to_string(),
        Value::String(paths.clean.clone()),
    );
    map.insert("detail_reviews".to_string(), detail);

    Ok((record, paths))
}

pub struct MsStoreHarvester {
    client: MsStoreClient,
    sink: Arc<dyn JsonSink>,
}

impl MsStoreHarvester {
    pub fn new(sink: Arc<dyn JsonSink>) -> Self {
        Self {
            client: MsStoreClient::new(),
            sink,
        }
    }

    /// Harvest every media type in sequence.
    pub async fn all(&self) -> Result<HarvestStats> {
        let mut stats = HarvestStats::default();
        for media_type in MEDIA_TYPES {
            stats.merge(self.by_media_type(media_type).await?);
        }
        Ok(stats)
    }

    /// Harvest one media type. A product pipeline failure is surfaced
    /// here, logged, and does not abort sibling products.
    pub async fn by_media_type(&self, media_type: &str) -> Result<HarvestStats> {
        let filters = self
            .client
            .get_collection_filters(media_type)
            .await
            .context("Failed to fetch collection filters")?;

        let mut stats = HarvestStats::default();
        let Some(group) = filters.first() else {
            info!(media_type, "No filter groups returned");
            return Ok(stats);
        };

        for choice in group.choices.iter().take(CHOICE_LIMIT) {
            let list_name = choice.list_name();
            let mut page: u32 = 1;

            loop {
                let products = self
                    .client
                    .get_products_page(&list_name, media_type, page, PRODUCT_PAGE_SIZE)
                    .await
                    .with_context(|| format!("Failed to fetch products page {page}"))?;

                // A negative marker flags the final page, which is skipped.
                if products.next_page_number < 0 {
                    break;
                }

                info!(
                    media_type,
                    list = %list_name,
                    page,
                    products = products.products_list.len(),
                    "Harvesting products page"
                );

                let results = join_all(
                    products
                        .products_list
                        .iter()
                        .map(|p| self.harvest_product(&p.product_id)),
                )
                .await;

                for result in results {
                    match result {
                        Ok(s) => stats.merge(s),
                        Err(e) => {
                            error!(media_type, error = %e, "Product pipeline failed");
                            stats.parent_failures += 1;
                        }
                    }
                }

                if !FOLLOW_PRODUCT_PAGES {
                    break;
                }
                page += 1;
            }
        }

        Ok(stats)
    }

    /// Run the full pipeline for one product: detail + rating summary +
    /// all review pages, then assemble and persist.
    async fn harvest_product(&self, product_id: &ProductId) -> Result<HarvestStats> {
        let app = self
            .client
            .get_product_detail(product_id)
            .await
            .with_context(|| format!("Failed to fetch detail of product {product_id}"))?;
        let rating = self
            .client
            .get_reviews_summary(product_id)
            .await
            .with_context(|| format!("Failed to fetch rating summary of {product_id}"))?;
        let reviews = self
            .client
            .get_reviews(product_id)
            .await
            .with_context(|| format!("Failed to fetch reviews of {product_id}"))?;

        let (headers, header_paths) = product_headers(&app, &rating)?;
        put_pair(self.sink.as_ref(), &headers, &header_paths)
            .await
            .context("Failed to write product headers document")?;

        let logger = JobLogger::create(
            CHANNEL,
            JobLog::new(
                DOMAIN,
                &app.title,
                &app.product_id.to_string(),
                reviews.len(),
            ),
        );

        let mut stats = HarvestStats {
            parents: 1,
            leaves_total: reviews.len() as u32,
            docs_written: 1,
            ..Default::default()
        };

        if reviews.is_empty() {
            logger.finish();
            return Ok(stats);
        }

        for review in &reviews {
            let leaf_id = review.review_id.to_string();
            match self.write_review(&headers, &app.title, review).await {
                Ok(()) => {
                    logger.leaf_success(&leaf_id);
                    stats.leaves_succeeded += 1;
                    stats.docs_written += 1;
                }
                Err(e) => {
                    logger.leaf_failure(&leaf_id, &e);
                    stats.leaves_failed += 1;
                }
            }
        }

        logger.finish();
        Ok(stats)
    }

    async fn write_review(&self, headers: &Value, title: &str, review: &Review) -> Result<()> {
        let (record, paths) = review_record(headers, title, review)?;
        put_pair(self.sink.as_ref(), &record, &paths).await?;
        Ok(())
    }
}
