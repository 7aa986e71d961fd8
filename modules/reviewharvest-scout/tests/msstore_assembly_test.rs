//! Microsoft Store record assembly: product detail + rating summary +
//! review → headers / review records. No I/O.

use serde_json::json;

use msstore_client::{ProductDetail, Review, ReviewsSummary};
use reviewharvest_scout::msstore::{product_headers, review_record};

fn app() -> ProductDetail {
    serde_json::from_value(json!({
        "productId": "9NBLGGH4R315",
        "title": "Minecraft",
        "description": "Block game",
        "releaseDateUtc": "2015-07-29T07:00:00Z",
        "developerName": "Mojang",
        "publisherName": "",
        "features": ["multiplayer"],
        "appWebsiteUrl": "https://minecraft.net",
        "productRatings": [{"description": "Everyone 10+"}],
        "systemRequirements": {
            "minimum": {"items": [
                {"name": "OS", "description": "Windows 10", "icon": "x"}
            ]},
            "recommended": {}
        },
        "approximateSizeInBytes": 123456,
        "maxInstallSizeInBytes": 654321,
        "permissionsRequired": ["internet"],
        "installationTerms": "Standard terms",
        "allowedPlatforms": ["Windows.Desktop"],
        "screenshots": [{"url": "https://img/1.png"}]
    }))
    .expect("invalid test JSON")
}

fn rating() -> ReviewsSummary {
    serde_json::from_value(json!({
        "reviewCount": 90,
        "averageRating": 4.5,
        "star1Count": 1,
        "star2Count": 2,
        "star3Count": 3,
        "star4Count": 4,
        "star5Count": 80,
        "star1ReviewCount": 1,
        "ratingOnlyReviewCount": 60,
        "starCount": 999
    }))
    .expect("invalid test JSON")
}

fn review() -> Review {
    serde_json::from_value(json!({
        "reviewId": "rev-123",
        "reviewerName": "alice",
        "submittedDateTimeUtc": "2024-01-02T03:04:05Z",
        "title": "Great",
        "rating": 5,
        "helpfulPositive": 7,
        "helpfulNegative": 1,
        "reviewText": "Lots of fun"
    }))
    .expect("invalid test JSON")
}

// ---------------------------------------------------------------------------
// Product headers
// ---------------------------------------------------------------------------

#[test]
fn headers_star_counts_become_digit_buckets() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();

    assert_eq!(headers["review_info"]["5"], 80);
    assert_eq!(headers["review_info"]["1"], 1);
    assert_eq!(headers["review_info"].as_object().unwrap().len(), 5);
    // "starCount" has no digit and must not slip in.
    assert!(headers["review_info"].get("C").is_none());
}

#[test]
fn headers_rating_info_buckets_keyed_by_fifth_character() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();

    let rating_info = headers["rating_info"].as_object().unwrap();
    // "star1ReviewCount" → "1", "ratingOnlyReviewCount" → "n".
    assert_eq!(rating_info["1"], 1);
    assert_eq!(rating_info["n"], 60);
    assert_eq!(rating_info.len(), 2);
    // Lowercase "reviewCount" is the total, not a bucket.
    assert!(rating_info.get("reviewCount").is_none());
}

#[test]
fn headers_empty_publisher_becomes_null() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();

    assert_eq!(headers["developer_reviews"], "Mojang");
    assert!(headers["publisher_reviews"].is_null());
}

#[test]
fn headers_release_date_formatted_and_epoch() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();

    assert_eq!(headers["release_date_reviews"], "2015-07-29 07:00:00");
    assert_eq!(headers["release_date_epoch_reviews"], 1438153200);
}

#[test]
fn headers_system_requirements_reshaped() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();

    let minimum = &headers["system_requirements_reviews"]["minimum"];
    assert_eq!(minimum[0]["name"], "OS");
    assert_eq!(minimum[0]["description"], "Windows 10");
    // Extra vendor fields are dropped in the reshape.
    assert!(minimum[0].get("icon").is_none());
    // A group without items maps to an empty list.
    assert_eq!(
        headers["system_requirements_reviews"]["recommended"],
        json!([])
    );
}

#[test]
fn headers_paths_and_link() {
    let (headers, paths) = product_headers(&app(), &rating()).unwrap();

    assert_eq!(
        headers["link"],
        "https://microsoft-store.azurewebsites.net/detail/9NBLGGH4R315"
    );
    assert_eq!(headers["domain"], "microsoft-store.azurewebsites.net");
    assert_eq!(
        paths.raw,
        "S3://ai-pipeline-statistics/data/data_raw/data_review/microsoft_store/Minecraft/json/detail.json"
    );
    assert_eq!(paths.raw.replace("data_raw", "data_clean"), paths.clean);
}

#[test]
fn headers_fixed_fields() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();

    assert_eq!(headers["category_reviews"], "application");
    assert!(headers["location_reviews"].is_null());
    assert_eq!(headers["total_reviews"], 90);
    assert_eq!(headers["reviews_rating"]["total_rating"], 4.5);
    assert!(headers["reviews_rating"]["detail_total_rating"].is_null());
}

// ---------------------------------------------------------------------------
// Review records
// ---------------------------------------------------------------------------

#[test]
fn review_record_detail_fields() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();
    let (record, paths) = review_record(&headers, "Minecraft", &review()).unwrap();

    let detail = &record["detail_reviews"];
    assert_eq!(detail["username_reviews"], "alice");
    assert_eq!(detail["created_time"], "2024-01-02 03:04:05");
    assert_eq!(detail["reviews_rating"], 5);
    assert_eq!(detail["total_likes_reviews"], 7);
    assert_eq!(detail["total_dislikes_reviews"], 1);
    assert_eq!(detail["content_reviews"], "Lots of fun");
    assert!(detail["email_reviews"].is_null());
    assert!(detail["date_of_experience"].is_null());

    assert!(paths
        .raw
        .ends_with("Minecraft/json/data_review/rev-123.json"));
}

#[test]
fn review_record_keeps_parent_context_and_repaths() {
    let (headers, header_paths) = product_headers(&app(), &rating()).unwrap();
    let (record, paths) = review_record(&headers, "Minecraft", &review()).unwrap();

    // Parent context is denormalized into the leaf record.
    assert_eq!(record["reviews_name"], "Minecraft");
    assert_eq!(record["domain"], "microsoft-store.azurewebsites.net");

    // But the destination keys are the review's own.
    assert_ne!(paths.raw, header_paths.raw);
    assert_eq!(record["path_data_raw"], paths.raw);
    assert_eq!(paths.raw.replace("data_raw", "data_clean"), paths.clean);
}

#[test]
fn review_record_missing_timestamp_is_an_error() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();
    let undated: Review = serde_json::from_value(json!({
        "reviewId": "rev-8",
        "reviewerName": "carol",
        "title": null,
        "rating": 3,
        "helpfulPositive": 0,
        "helpfulNegative": 0,
        "reviewText": null
    }))
    .expect("invalid test JSON");

    let err = review_record(&headers, "Minecraft", &undated).unwrap_err();
    assert!(err.to_string().contains("rev-8"));
}

#[test]
fn review_record_bad_timestamp_is_an_error() {
    let (headers, _) = product_headers(&app(), &rating()).unwrap();
    let bad: Review = serde_json::from_value(json!({
        "reviewId": "rev-9",
        "reviewerName": "bob",
        "submittedDateTimeUtc": "not-a-date",
        "title": null,
        "rating": 1,
        "helpfulPositive": 0,
        "helpfulNegative": 0,
        "reviewText": null
    }))
    .unwrap();

    assert!(review_record(&headers, "Minecraft", &bad).is_err());
}
