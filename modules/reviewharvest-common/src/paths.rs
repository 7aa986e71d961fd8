//! Raw/clean destination paths for persisted records.
//!
//! Every record is written twice: once under `data_raw` and once under
//! `data_clean`, identical content. The `S3://ai-pipeline-statistics/`
//! prefix is a legacy artifact of the path format and is stripped before
//! either backend sees the key — it does not select a protocol.

use serde::Serialize;

/// Legacy storage prefix carried inside record paths. Stripped before use.
pub const STORAGE_PREFIX: &str = "S3://ai-pipeline-statistics/";

/// A pair of destination keys for the same logical record, differing only
/// in the `data_raw` / `data_clean` segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathPair {
    pub raw: String,
    pub clean: String,
}

impl PathPair {
    /// Build the pair for a review-domain record.
    ///
    /// Layout: `data/data_{raw|clean}/data_review/{site}/{entity}/json/{leaf}.json`
    /// where `entity` may span several segments (e.g. `user/post-id`) and
    /// `leaf` may carry a subdirectory (e.g. `data_review/<review-id>`).
    pub fn review(site: &str, entity: &str, leaf: &str) -> Self {
        let tail = format!("data_review/{site}/{entity}/json/{leaf}.json");
        Self {
            raw: format!("{STORAGE_PREFIX}data/data_raw/{tail}"),
            clean: format!("{STORAGE_PREFIX}data/data_clean/{tail}"),
        }
    }

    /// Backend keys with the legacy prefix stripped, raw first.
    pub fn storage_keys(&self) -> (String, String) {
        (strip_prefix(&self.raw), strip_prefix(&self.clean))
    }
}

fn strip_prefix(path: &str) -> String {
    path.strip_prefix(STORAGE_PREFIX).unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_and_clean_differ_only_in_segment() {
        let pair = PathPair::review("lemon8", "someuser/7138", "detail");
        assert_eq!(
            pair.raw.replace("data_raw", "data_clean"),
            pair.clean
        );
    }

    #[test]
    fn storage_keys_drop_legacy_prefix() {
        let pair = PathPair::review("microsoft_store", "Minecraft", "detail");
        let (raw, clean) = pair.storage_keys();
        assert_eq!(
            raw,
            "data/data_raw/data_review/microsoft_store/Minecraft/json/detail.json"
        );
        assert!(!clean.starts_with("S3://"));
    }

    #[test]
    fn leaf_may_carry_a_subdirectory() {
        let pair = PathPair::review("microsoft_store", "Minecraft", "data_review/abc123");
        assert!(pair
            .raw
            .ends_with("Minecraft/json/data_review/abc123.json"));
    }
}
