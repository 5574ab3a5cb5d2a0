//! Synthetic ID workload.
//!
//! Inserts an arithmetic progression of IDs, removes a regular subset of
//! them, checks the set's slot bookkeeping, and reports how much sparse
//! memory the surviving IDs cost compared to a flat array.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use sparse_set::{EntityId, SparseSet, SparseSetConfig};

/// Parameters of a probe run.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// First ID inserted.
    pub start: u32,
    /// Gap between consecutive IDs.
    pub stride: u32,
    /// Number of IDs inserted.
    pub count: u32,
    /// Remove every n-th inserted ID (0 = remove nothing).
    pub remove_every: u32,
    /// Sparse page size of the set under test.
    pub page_size: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            start: 0,
            stride: 1,
            count: 10_000,
            remove_every: 0,
            page_size: sparse_set::DEFAULT_PAGE_SIZE,
        }
    }
}

impl WorkloadConfig {
    fn id_at(&self, n: u32) -> Result<EntityId> {
        n.checked_mul(self.stride)
            .and_then(|offset| offset.checked_add(self.start))
            .map(EntityId)
            .with_context(|| {
                format!("ID #{n} overflows u32 (start {}, stride {})", self.start, self.stride)
            })
    }
}

/// Statistics gathered after a probe run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub inserted: u32,
    pub removed: u32,
    pub len: usize,
    pub page_size: usize,
    pub allocated_pages: usize,
    pub page_table_len: usize,
    /// Bytes held by allocated sparse pages.
    pub sparse_bytes: usize,
    /// Bytes a single array sized to the largest live ID would need.
    pub flat_bytes: usize,
}

/// Execute the workload described by `config`.
pub fn run(config: &WorkloadConfig) -> Result<ProbeReport> {
    if config.stride == 0 && config.count > 1 {
        bail!("stride 0 maps all {} IDs onto ID {}", config.count, config.start);
    }

    let set_config = SparseSetConfig::default()
        .with_page_size(config.page_size)
        .with_capacity(config.count as usize);
    let mut set = SparseSet::with_config(set_config)?;

    for n in 0..config.count {
        let id = config.id_at(n)?;
        if set.insert(id, n).is_rejected() {
            bail!("{id} was inserted twice");
        }
    }
    debug!(inserted = config.count, pages = set.sparse().allocated_pages(), "insert phase done");

    let mut removed = 0;
    if config.remove_every > 0 {
        for n in (0..config.count).step_by(config.remove_every as usize) {
            let id = config.id_at(n)?;
            if !set.remove(id) {
                bail!("{id} vanished before it was removed");
            }
            removed += 1;
        }
    }
    debug!(removed, pages = set.sparse().allocated_pages(), "remove phase done");

    verify(&set, config)?;

    let flat_bytes = set
        .ids()
        .iter()
        .max()
        .map_or(0, |id| (id.index() + 1) * std::mem::size_of::<u32>());

    Ok(ProbeReport {
        inserted: config.count,
        removed,
        len: set.len(),
        page_size: set.sparse().page_size(),
        allocated_pages: set.sparse().allocated_pages(),
        page_table_len: set.sparse().page_table_len(),
        sparse_bytes: set.sparse().memory_footprint(),
        flat_bytes,
    })
}

/// Every dense entry must locate back to its own slot and carry the value
/// it was inserted with.
fn verify(set: &SparseSet<u32>, config: &WorkloadConfig) -> Result<()> {
    for (slot, (id, &n)) in set.iter().enumerate() {
        if set.locate(id) != Some(slot) {
            bail!("{id} sits in slot {slot} but locates to {:?}", set.locate(id));
        }
        if config.id_at(n)? != id {
            bail!("{id} holds the value inserted for ID #{n}");
        }
    }
    Ok(())
}
