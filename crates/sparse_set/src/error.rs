//! Sparse set error types.

use crate::entity::EntityId;

/// Recoverable failures reported by the `try_*` family of [`SparseSet`]
/// operations and by configuration validation.
///
/// [`SparseSet`]: crate::SparseSet
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SparseSetError {
    /// An insert targeted an ID that already holds a value.
    #[error("{0} is already present")]
    AlreadyPresent(EntityId),

    /// A lookup or removal targeted an ID that holds no value.
    #[error("{0} is not present")]
    NotPresent(EntityId),

    /// The configured page size is not a power of two or exceeds
    /// [`MAX_PAGE_SIZE`](crate::MAX_PAGE_SIZE).
    #[error("invalid page size {0}: must be a power of two no larger than {max}", max = crate::MAX_PAGE_SIZE)]
    InvalidPageSize(usize),
}
