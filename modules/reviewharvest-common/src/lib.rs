pub mod config;
pub mod paths;
pub mod timefmt;

pub use config::{data_dir, Config};
pub use paths::{PathPair, STORAGE_PREFIX};

/// Map an empty vendor string to an explicit "no value" rather than
/// carrying `""` into the output record.
pub fn none_if_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_becomes_none() {
        assert_eq!(none_if_empty(""), None);
    }

    #[test]
    fn non_empty_string_passes_through() {
        assert_eq!(none_if_empty("Mojang"), Some("Mojang".to_string()));
    }
}
