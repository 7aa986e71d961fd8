//! Client for the unofficial Microsoft Store web API
//! (`microsoft-store.azurewebsites.net`).

pub mod error;
pub mod types;

pub use error::{MsStoreError, Result};
pub use types::{
    Choice, FilterGroup, ProductDetail, ProductId, ProductsPage, Review, ReviewsSummary,
};

use types::ReviewsPage;

const BASE_URL: &str = "https://microsoft-store.azurewebsites.net/api";

/// Reviews are walked in pages of this size until `hasMorePages` is false.
const REVIEW_PAGE_SIZE: u32 = 25;

pub struct MsStoreClient {
    client: reqwest::Client,
}

impl MsStoreClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the curated "choice" collections for a media type
    /// (`games`, `apps`).
    pub async fn get_collection_filters(&self, media_type: &str) -> Result<Vec<FilterGroup>> {
        self.get_json(
            "Reco/GetCollectionFiltersList",
            &[("mediaType", media_type)],
        )
        .await
    }

    /// Fetch one page of the computed products list for a choice.
    pub async fn get_products_page(
        &self,
        list_name: &str,
        media_type: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ProductsPage> {
        self.get_json(
            "Reco/GetComputedProductsList",
            &[
                ("listName", list_name),
                ("pgNo", &page.to_string()),
                ("noItems", &page_size.to_string()),
                ("filteredCategories", "AllProducts"),
                ("mediaType", media_type),
            ],
        )
        .await
    }

    /// Fetch the product detail page.
    pub async fn get_product_detail(&self, product_id: &ProductId) -> Result<ProductDetail> {
        self.get_json("pages/pdp", &[("productId", &product_id.to_string())])
            .await
    }

    /// Fetch the review summary (star buckets, counts, average rating).
    pub async fn get_reviews_summary(&self, product_id: &ProductId) -> Result<ReviewsSummary> {
        self.get_json(&format!("Products/GetReviewsSummary/{product_id}"), &[])
            .await
    }

    /// Fetch all reviews for a product, walking pages until the server
    /// reports no more. Returns one ordered sequence.
    pub async fn get_reviews(&self, product_id: &ProductId) -> Result<Vec<Review>> {
        let mut reviews = Vec::new();
        let mut page: u32 = 1;

        loop {
            let resp: ReviewsPage = self
                .get_json(
                    &format!("products/getReviews/{product_id}"),
                    &[
                        ("pgNo", &page.to_string()),
                        ("noItems", &REVIEW_PAGE_SIZE.to_string()),
                    ],
                )
                .await?;

            reviews.extend(resp.items);

            if !resp.has_more_pages {
                break;
            }
            page += 1;
        }

        tracing::debug!(product_id = %product_id, count = reviews.len(), "Fetched reviews");
        Ok(reviews)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{BASE_URL}/{path}");
        let mut req = self.client.get(&url);
        if !params.is_empty() {
            req = req.query(params);
        }
        let resp = req.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MsStoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }
        Ok(resp.json().await?)
    }
}

impl Default for MsStoreClient {
    fn default() -> Self {
        Self::new()
    }
}
