//! Persistence backends for assembled records.
//!
//! One backend is selected per scraper instance at construction time from
//! the `USE_S3` flag; every record is written to both its raw and clean
//! destination keys in one call.

pub mod disk;
pub mod error;
pub mod s3;

pub use disk::DiskSink;
pub use error::{Result, SinkError};
pub use s3::S3Sink;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use reviewharvest_common::{data_dir, Config, PathPair};

#[async_trait]
pub trait JsonSink: Send + Sync {
    /// Write one record under a storage key (legacy prefix already
    /// stripped).
    async fn put(&self, record: &Value, key: &str) -> Result<()>;

    fn name(&self) -> &'static str;
}

/// Select the backend from config: object storage when `use_s3` is set,
/// local disk under `data_dir()` otherwise.
pub fn sink_from_config(config: &Config) -> Result<Arc<dyn JsonSink>> {
    if config.use_s3 {
        Ok(Arc::new(S3Sink::new(config)?))
    } else {
        Ok(Arc::new(DiskSink::new(data_dir())))
    }
}

/// Write a record to both of its destination keys concurrently. Both
/// writes succeed or the first error propagates unchanged; there is no
/// retry and no partial-write recovery.
pub async fn put_pair(sink: &dyn JsonSink, record: &Value, paths: &PathPair) -> Result<()> {
    let (raw_key, clean_key) = paths.storage_keys();
    tokio::try_join!(sink.put(record, &raw_key), sink.put(record, &clean_key))?;
    Ok(())
}
