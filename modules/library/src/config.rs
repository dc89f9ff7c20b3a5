use serde::{Deserialize, Serialize};
use shelf_query::QueryLimits;

/// Configuration for the library module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Page size when `per` is absent.
    pub default_per: u64,
    /// Upper bound for `per`; larger requests are clamped.
    pub max_per: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        let limits = QueryLimits::default();
        Self {
            default_per: limits.default_per,
            max_per: limits.max_per,
        }
    }
}

impl LibraryConfig {
    #[must_use]
    pub fn limits(&self) -> QueryLimits {
        QueryLimits::new()
            .with_default_per(self.default_per)
            .with_max_per(self.max_per)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = LibraryConfig::default();
        assert_eq!(cfg.limits(), QueryLimits::default());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg: LibraryConfig = serde_json::from_str(r#"{"max_per": 50}"#).unwrap();
        assert_eq!(cfg.default_per, 25);
        assert_eq!(cfg.limits().max_per, 50);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(serde_json::from_str::<LibraryConfig>(r#"{"per_page": 5}"#).is_err());
    }
}
