//! Worker budget derived from subdomain parallelism.

/// Concurrent fetches allowed per subdomain.
pub const HTTP_SEPARATE_THREADS: usize = 2;

/// Maximum number of concurrent fetch workers for one layer.
///
/// Each subdomain is assumed to be a separate host that tolerates
/// [`HTTP_SEPARATE_THREADS`] connections. A template without subdomains
/// still gets the fixed factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadBudget {
    subdomain_count: usize,
    per_subdomain: usize,
}

impl ThreadBudget {
    pub fn new(subdomain_count: usize) -> Self {
        Self::with_factor(subdomain_count, HTTP_SEPARATE_THREADS)
    }

    /// Budget with a custom per-subdomain factor (at least 1).
    pub fn with_factor(subdomain_count: usize, per_subdomain: usize) -> Self {
        Self {
            subdomain_count,
            per_subdomain: per_subdomain.max(1),
        }
    }

    pub fn subdomain_count(&self) -> usize {
        self.subdomain_count
    }

    pub fn max_concurrent_fetches(&self) -> usize {
        self.subdomain_count
            .saturating_mul(self.per_subdomain)
            .max(self.per_subdomain)
    }
}
