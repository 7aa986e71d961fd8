use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::JsonSink;

/// Writes records as pretty-printed JSON files under a root directory,
/// creating parent directories as needed. Re-running a job overwrites each
/// file with byte-identical content.
pub struct DiskSink {
    root: PathBuf,
}

impl DiskSink {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

#[async_trait]
impl JsonSink for DiskSink {
    async fn put(&self, record: &Value, key: &str) -> Result<()> {
        let path = self.root.join(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(record)?;
        tokio::fs::write(&path, body).await?;

        tracing::debug!(path = %path.display(), "Wrote record to disk");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "disk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_under_root_creating_directories() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DiskSink::new(dir.path().to_path_buf());
        let record = serde_json::json!({"id": 1});

        sink.put(&record, "data/data_raw/data_review/x/json/detail.json")
            .await
            .unwrap();

        let written = dir
            .path()
            .join("data/data_raw/data_review/x/json/detail.json");
        let body: Value =
            serde_json::from_slice(&std::fs::read(written).unwrap()).unwrap();
        assert_eq!(body, record);
    }

    #[tokio::test]
    async fn rewrite_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DiskSink::new(dir.path().to_path_buf());
        let record = serde_json::json!({"b": [1, 2], "a": "x"});

        sink.put(&record, "r.json").await.unwrap();
        let first = std::fs::read(dir.path().join("r.json")).unwrap();

        sink.put(&record, "r.json").await.unwrap();
        let second = std::fs::read(dir.path().join("r.json")).unwrap();

        assert_eq!(first, second);
    }
}
