use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjPath;
use object_store::{ObjectStore, PutPayload};
use serde_json::Value;

use reviewharvest_common::Config;

use crate::error::Result;
use crate::JsonSink;

/// Uploads records to an S3-compatible bucket. Keys arrive with the legacy
/// storage prefix already stripped.
pub struct S3Sink {
    store: AmazonS3,
    bucket: String,
}

impl S3Sink {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.s3_bucket)
            .with_region(&config.s3_region)
            .with_access_key_id(&config.s3_access_key_id)
            .with_secret_access_key(&config.s3_secret_access_key);
        if let Some(endpoint) = &config.s3_endpoint {
            builder = builder.with_endpoint(endpoint);
        }

        Ok(Self {
            store: builder.build()?,
            bucket: config.s3_bucket.clone(),
        })
    }
}

#[async_trait]
impl JsonSink for S3Sink {
    async fn put(&self, record: &Value, key: &str) -> Result<()> {
        let body = serde_json::to_vec_pretty(record)?;
        let path = ObjPath::from(key);

        self.store.put(&path, PutPayload::from(body)).await?;

        tracing::debug!(bucket = %self.bucket, key, "Uploaded record to object storage");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
