use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product id that arrives as either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Num(i64),
    Str(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Num(n) => write!(f, "{n}"),
            ProductId::Str(s) => write!(f, "{s}"),
        }
    }
}

/// One group from the collection-filters endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterGroup {
    pub choices: Vec<Choice>,
}

/// A curated sub-category ("choice") within a media type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub choice_id: String,
}

impl Choice {
    /// The computed-products endpoint wants the choice id with its first
    /// letter upper-cased (`topfree` → `Topfree`).
    pub fn list_name(&self) -> String {
        let mut chars = self.choice_id.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

/// One page of the computed-products list. A negative `next_page_number`
/// marks the last page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsPage {
    pub products_list: Vec<ProductSummary>,
    pub next_page_number: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_id: ProductId,
}

/// Product detail page (`/api/pages/pdp`). Typed fields are the ones the
/// record assembler maps; anything else rides along in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub product_id: ProductId,
    pub title: String,
    pub description: Value,
    pub release_date_utc: String,
    pub developer_name: String,
    pub publisher_name: String,
    pub features: Value,
    #[serde(default)]
    pub app_website_url: Option<String>,
    pub product_ratings: Vec<ProductRating>,
    pub system_requirements: Map<String, Value>,
    pub approximate_size_in_bytes: Value,
    pub max_install_size_in_bytes: Value,
    pub permissions_required: Value,
    pub installation_terms: Value,
    pub allowed_platforms: Value,
    pub screenshots: Vec<Screenshot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRating {
    pub description: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenshot {
    pub url: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Review summary (`GetReviewsSummary`). The `star<N>Count` and
/// `*ReviewCount` buckets stay in `extra` for the assembler's key-pattern
/// filters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsSummary {
    pub review_count: Value,
    pub average_rating: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of reviews. `has_more_pages` drives the full page walk.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsPage {
    pub items: Vec<Review>,
    pub has_more_pages: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub review_id: ProductId,
    pub reviewer_name: Value,
    /// Absent for a handful of reviews; the record assembler rejects
    /// those per leaf rather than failing the whole page.
    #[serde(default)]
    pub submitted_date_time_utc: Option<String>,
    pub title: Value,
    pub rating: Value,
    pub helpful_positive: Value,
    pub helpful_negative: Value,
    pub review_text: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_list_name_capitalizes_first_letter() {
        let choice = Choice {
            choice_id: "topfree".to_string(),
        };
        assert_eq!(choice.list_name(), "Topfree");
    }

    #[test]
    fn reviews_page_parses_when_a_timestamp_is_absent() {
        let page: ReviewsPage = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "reviewId": 1,
                        "reviewerName": "alice",
                        "submittedDateTimeUtc": "2024-01-02T03:04:05Z",
                        "title": "Great",
                        "rating": 5,
                        "helpfulPositive": 0,
                        "helpfulNegative": 0,
                        "reviewText": "fun"
                    },
                    {
                        "reviewId": 2,
                        "reviewerName": "bob",
                        "title": null,
                        "rating": 1,
                        "helpfulPositive": 0,
                        "helpfulNegative": 0,
                        "reviewText": null
                    }
                ],
                "hasMorePages": false
            }"#,
        )
        .unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(
            page.items[0].submitted_date_time_utc.as_deref(),
            Some("2024-01-02T03:04:05Z")
        );
        assert_eq!(page.items[1].submitted_date_time_utc, None);
    }

    #[test]
    fn products_page_parses_next_page_marker() {
        let page: ProductsPage = serde_json::from_str(
            r#"{"productsList":[{"productId":"9NBLGGH4R315"}],"nextPageNumber":-1}"#,
        )
        .unwrap();
        assert_eq!(page.next_page_number, -1);
        assert_eq!(page.products_list[0].product_id.to_string(), "9NBLGGH4R315");
    }
}
