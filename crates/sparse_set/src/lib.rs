//! # sparse_set
//!
//! Entity-keyed component storage for ECS worlds: O(1) membership, insert,
//! update and removal, with values packed contiguously for iteration.
//!
//! This crate provides:
//!
//! - [`SparseSet`] — the container, with swap-remove compaction.
//! - [`PagedArray`] — the lazily paged `EntityId → slot` table behind it.
//! - [`EntityId`] — the `u32` key type.
//! - [`SparseSetConfig`] — page size and capacity settings.
//! - [`Outcome`] / [`SparseSetError`] — write results and recoverable errors.
//!
//! ID allocation, multi-component registries and thread-safe wrappers are
//! left to the caller.

pub mod config;
pub mod entity;
pub mod error;
pub mod iter;
pub mod paged;
pub mod sparse_set;

pub use config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SparseSetConfig};
pub use entity::EntityId;
pub use error::SparseSetError;
pub use iter::{IntoIter, Iter, IterMut};
pub use paged::PagedArray;
pub use sparse_set::{Outcome, SparseSet};
