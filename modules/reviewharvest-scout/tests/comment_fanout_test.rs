//! Leaf fan-out accounting: one failing leaf must not disturb its
//! siblings, and the job log must book every outcome.
//!
//! Lives in its own binary because it overrides the process-global
//! `DATA_DIR`.

use anyhow::Result;
use futures::future::join_all;
use serde_json::Value;

use reviewharvest_scout::joblog::{JobLog, JobLogger, JobStatus};
use reviewharvest_scout::lemon8::settle_leaf;

async fn leaf_work(id: usize) -> Result<()> {
    if id == 2 {
        anyhow::bail!("detail fetch failed for leaf {id}");
    }
    Ok(())
}

#[tokio::test]
async fn failing_leaf_leaves_siblings_untouched() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("DATA_DIR", dir.path());

    let logger = JobLogger::create("lemon8", JobLog::new("src", "sub", "fanout-job", 5));

    let outcomes = join_all(
        (0..5).map(|id| {
            let logger = &logger;
            async move {
                let leaf_id = id.to_string();
                settle_leaf(logger, &leaf_id, leaf_work(id)).await
            }
        }),
    )
    .await;

    logger.finish();

    // Every sibling of the failed leaf ran to completion.
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 4);
    assert!(!outcomes[2]);

    let snap = logger.snapshot();
    assert_eq!(snap.status, JobStatus::Done);
    assert_eq!(snap.total_success, 4);
    assert_eq!(snap.total_failed, 1);
    assert_eq!(snap.total_success + snap.total_failed, snap.total_data);

    let persisted: Value = serde_json::from_slice(
        &std::fs::read(dir.path().join("logs/lemon8/fanout-job.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(persisted["total_success"], 4);
    assert_eq!(persisted["total_failed"], 1);
    assert_eq!(persisted["status"], "Done");
}
