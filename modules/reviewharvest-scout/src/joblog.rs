//! Per-job crawl log — one JSON record per top-level entity (a post's
//! comment run, a product's review run), persisted on every update under
//! `{DATA_DIR}/logs/{channel}/{id_sub_source}.json`.
//!
//! Wire keys match the existing log store exactly, including the
//! `Crawlling_time` spelling.
//!
//! Counters are incremented by concurrent leaf tasks, so the record lives
//! behind a mutex; each increment persists the record and emits a tracing
//! line with the leaf id and outcome. A job whose children-listing fetch
//! fails never reaches `finish()` and stays in `Process` — a known gap of
//! the pipeline.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use tracing::{info, warn};

use reviewharvest_common::{data_dir, timefmt};

pub const PROJECT: &str = "Data Intelligence";
pub const SUB_PROJECT: &str = "data review";
pub const ASSIGNEE: &str = "romy";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobStatus {
    Process,
    Done,
}

/// The persisted log record for one job.
#[derive(Debug, Clone, Serialize)]
pub struct JobLog {
    #[serde(rename = "Crawlling_time")]
    pub crawling_time: String,
    pub id_project: Option<String>,
    pub project: String,
    pub sub_project: String,
    pub source_name: String,
    pub sub_source_name: String,
    pub id_sub_source: String,
    pub total_data: usize,
    pub total_success: usize,
    pub total_failed: usize,
    pub status: JobStatus,
    pub assign: String,
}

impl JobLog {
    pub fn new(
        source_name: &str,
        sub_source_name: &str,
        id_sub_source: &str,
        total_data: usize,
    ) -> Self {
        Self {
            crawling_time: timefmt::now(),
            id_project: None,
            project: PROJECT.to_string(),
            sub_project: SUB_PROJECT.to_string(),
            source_name: source_name.to_string(),
            sub_source_name: sub_source_name.to_string(),
            id_sub_source: id_sub_source.to_string(),
            total_data,
            total_success: 0,
            total_failed: 0,
            status: JobStatus::Process,
            assign: ASSIGNEE.to_string(),
        }
    }
}

/// Shared handle mutated by concurrent leaf tasks. A failed log write is
/// warned about rather than propagated — it must not abort the crawl.
pub struct JobLogger {
    channel: String,
    inner: Mutex<JobLog>,
}

impl JobLogger {
    /// Create the handle and persist the initial `Process` record.
    pub fn create(channel: &str, log: JobLog) -> Self {
        let logger = Self {
            channel: channel.to_string(),
            inner: Mutex::new(log),
        };
        logger.persist();
        logger
    }

    /// Record a successful leaf: info line, increment, persist.
    pub fn leaf_success(&self, leaf_id: &str) {
        info!(
            channel = %self.channel,
            leaf_id,
            outcome = "success",
            "Leaf processed"
        );
        {
            let mut log = self.inner.lock().expect("job log lock poisoned");
            log.total_success += 1;
        }
        self.persist();
    }

    /// Record a failed leaf: info line with the cause, increment, persist.
    pub fn leaf_failure(&self, leaf_id: &str, error: &anyhow::Error) {
        info!(
            channel = %self.channel,
            leaf_id,
            outcome = "failed",
            error = %error,
            "Leaf processed"
        );
        {
            let mut log = self.inner.lock().expect("job log lock poisoned");
            log.total_failed += 1;
        }
        self.persist();
    }

    /// Mark the job `Done` and persist once more. Called after all leaves
    /// resolve, or immediately for a job with zero leaves.
    pub fn finish(&self) {
        {
            let mut log = self.inner.lock().expect("job log lock poisoned");
            log.status = JobStatus::Done;
        }
        self.persist();
    }

    pub fn snapshot(&self) -> JobLog {
        self.inner.lock().expect("job log lock poisoned").clone()
    }

    fn path(&self, log: &JobLog) -> PathBuf {
        data_dir()
            .join("logs")
            .join(&self.channel)
            .join(format!("{}.json", log.id_sub_source))
    }

    fn persist(&self) {
        let log = self.snapshot();
        let path = self.path(&log);
        let result = (|| -> anyhow::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, serde_json::to_string_pretty(&log)?)?;
            Ok(())
        })();

        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "Failed to persist job log");
        }
    }
}
