//! Page-size limits applied while building a plan

/// Default configuration for page sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Rows per page when `per` is absent (default: 25)
    pub default_per: u64,
    /// Largest accepted `per`; larger requests are clamped (default: 100)
    pub max_per: u64,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_per: 25,
            max_per: 100,
        }
    }
}

impl QueryLimits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_default_per(mut self, per: u64) -> Self {
        self.default_per = per.max(1);
        self
    }

    #[must_use]
    pub fn with_max_per(mut self, max: u64) -> Self {
        self.max_per = max.max(1);
        self
    }

    /// Clamp a requested page size into `1..=max_per`.
    #[must_use]
    pub fn clamp_per(&self, requested: u64) -> u64 {
        requested.clamp(1, self.max_per.max(1))
    }

    /// Page size used when the client did not ask for one.
    #[must_use]
    pub fn effective_default_per(&self) -> u64 {
        self.clamp_per(self.default_per)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = QueryLimits::default();
        assert_eq!(limits.default_per, 25);
        assert_eq!(limits.max_per, 100);
    }

    #[test]
    fn test_clamp() {
        let limits = QueryLimits::new().with_max_per(10);
        assert_eq!(limits.clamp_per(0), 1);
        assert_eq!(limits.clamp_per(7), 7);
        assert_eq!(limits.clamp_per(1000), 10);
    }

    #[test]
    fn test_default_never_exceeds_max() {
        let limits = QueryLimits::new().with_default_per(50).with_max_per(20);
        assert_eq!(limits.effective_default_per(), 20);
    }

    #[test]
    fn test_zero_settings_are_raised() {
        let limits = QueryLimits::new().with_default_per(0).with_max_per(0);
        assert_eq!(limits.default_per, 1);
        assert_eq!(limits.max_per, 1);
    }
}
