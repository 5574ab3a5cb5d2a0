//! Sparse set configuration.

use serde::{Deserialize, Serialize};

use crate::error::SparseSetError;

/// Default number of slots per sparse page.
pub const DEFAULT_PAGE_SIZE: usize = 1024;

/// Largest accepted page size. One page of this size holds 4 MiB of slots.
pub const MAX_PAGE_SIZE: usize = 1 << 20;

/// Page sizes must be powers of two no larger than [`MAX_PAGE_SIZE`].
pub(crate) fn check_page_size(page_size: usize) -> Result<(), SparseSetError> {
    if !page_size.is_power_of_two() || page_size > MAX_PAGE_SIZE {
        return Err(SparseSetError::InvalidPageSize(page_size));
    }
    Ok(())
}

/// Construction parameters for a [`SparseSet`](crate::SparseSet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparseSetConfig {
    /// Number of IDs covered by one sparse page. Must be a power of two no
    /// larger than [`MAX_PAGE_SIZE`].
    pub page_size: usize,
    /// Number of values the dense arrays reserve up front.
    pub initial_capacity: usize,
}

impl Default for SparseSetConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            initial_capacity: 0,
        }
    }
}

impl SparseSetConfig {
    /// Override the sparse page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Override the dense capacity reserved at construction.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Check that the configuration can back a sparse set.
    pub fn validate(&self) -> Result<(), SparseSetError> {
        check_page_size(self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SparseSetConfig::default();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.initial_capacity, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_page_sizes() {
        for size in [0, 3, 100, 1000, MAX_PAGE_SIZE * 2, usize::MAX / 2 + 1] {
            let config = SparseSetConfig::default().with_page_size(size);
            assert_eq!(config.validate(), Err(SparseSetError::InvalidPageSize(size)));
        }
        assert!(SparseSetConfig::default().with_page_size(1).validate().is_ok());
        assert!(SparseSetConfig::default().with_page_size(64).validate().is_ok());
        assert!(
            SparseSetConfig::default()
                .with_page_size(MAX_PAGE_SIZE)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: SparseSetConfig = serde_json::from_str(r#"{ "page_size": 256 }"#).unwrap();
        assert_eq!(config.page_size, 256);
        assert_eq!(config.initial_capacity, 0);
    }
}
