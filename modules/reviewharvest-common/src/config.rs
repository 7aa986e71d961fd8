use std::env;
use std::path::PathBuf;

/// Root data directory, controlled by `DATA_DIR` env var (default: `"data"`).
/// Both the disk sink and the job-log store write under this root.
pub fn data_dir() -> PathBuf {
    PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()))
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Route record writes to object storage instead of local disk.
    pub use_s3: bool,

    // S3 (required only when use_s3 is set)
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>,
    pub s3_access_key_id: String,
    pub s3_secret_access_key: String,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        let use_s3 = env::var("USE_S3")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if use_s3 {
            Self {
                use_s3,
                s3_bucket: required_env("S3_BUCKET"),
                s3_region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
                s3_endpoint: env::var("S3_ENDPOINT").ok(),
                s3_access_key_id: required_env("S3_ACCESS_KEY_ID"),
                s3_secret_access_key: required_env("S3_SECRET_ACCESS_KEY"),
            }
        } else {
            Self {
                use_s3,
                s3_bucket: String::new(),
                s3_region: String::new(),
                s3_endpoint: None,
                s3_access_key_id: String::new(),
                s3_secret_access_key: String::new(),
            }
        }
    }

    /// Log the effective configuration without credentials.
    pub fn log_redacted(&self) {
        tracing::info!(
            use_s3 = self.use_s3,
            bucket = %self.s3_bucket,
            data_dir = %data_dir().display(),
            "Config loaded"
        );
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
