//! Paged sparse array.
//!
//! The sparse side of a [`SparseSet`](crate::SparseSet) maps every possible
//! [`EntityId`] to a dense slot. A flat `Vec` sized to the largest ID wastes
//! memory when IDs are scattered, so the ID space is cut into fixed-size pages
//! that are allocated on first write and released once their last entry is
//! cleared. Slot memory is proportional to the number of ID ranges in use,
//! not to the largest ID.
//!
//! The page table itself is still one pointer-sized entry per page up to the
//! highest live page, so its length scales with `max_id / page_size`. At the
//! default page size a live `EntityId(u32::MAX)` costs a 32 MiB table.
//!
//! ```text
//!  id ──► page = id >> shift ──► pages[page] ── None ──► empty
//!                                     │
//!                                     └─ Some(page) ──► slots[id & mask]
//! ```

use tracing::trace;

use crate::config::{DEFAULT_PAGE_SIZE, check_page_size};
use crate::entity::EntityId;
use crate::error::SparseSetError;

/// Slot value marking an unused entry inside an allocated page.
const EMPTY: u32 = u32::MAX;

#[derive(Clone)]
struct Page {
    slots: Box<[u32]>,
    /// Number of entries in `slots` that are not [`EMPTY`].
    occupied: usize,
}

impl Page {
    fn new(page_size: usize) -> Self {
        Self {
            slots: vec![EMPTY; page_size].into_boxed_slice(),
            occupied: 0,
        }
    }
}

/// An `EntityId → slot` array backed by lazily allocated pages.
#[derive(Clone)]
pub struct PagedArray {
    pages: Vec<Option<Box<Page>>>,
    page_size: usize,
    shift: u32,
    mask: usize,
    allocated: usize,
}

impl PagedArray {
    /// Create an empty array with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::from_valid_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty array whose pages cover `page_size` IDs each.
    ///
    /// `page_size` must be a power of two no larger than
    /// [`MAX_PAGE_SIZE`](crate::MAX_PAGE_SIZE).
    pub fn with_page_size(page_size: usize) -> Result<Self, SparseSetError> {
        check_page_size(page_size)?;
        Ok(Self::from_valid_page_size(page_size))
    }

    fn from_valid_page_size(page_size: usize) -> Self {
        Self {
            pages: Vec::new(),
            page_size,
            shift: page_size.trailing_zeros(),
            mask: page_size - 1,
            allocated: 0,
        }
    }

    #[inline]
    fn split(&self, id: EntityId) -> (usize, usize) {
        let index = id.index();
        (index >> self.shift, index & self.mask)
    }

    /// Returns the slot stored for `id`, or `None` if the entry is empty or
    /// its page was never allocated. Never allocates.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<usize> {
        let (page, offset) = self.split(id);
        let slot = self.pages.get(page)?.as_ref()?.slots[offset];
        (slot != EMPTY).then_some(slot as usize)
    }

    /// Store `slot` for `id`, allocating the owning page if this is the first
    /// write into its range.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not fit below the internal empty sentinel
    /// (`u32::MAX`).
    pub fn set(&mut self, id: EntityId, slot: usize) {
        assert!(
            slot < EMPTY as usize,
            "dense slot {slot} exceeds the sparse array's addressable range"
        );
        let (page, offset) = self.split(id);
        if self.pages.len() <= page {
            self.pages.resize_with(page + 1, || None);
        }

        let page_size = self.page_size;
        let allocated = &mut self.allocated;
        let entry = self.pages[page].get_or_insert_with(|| {
            *allocated += 1;
            trace!(page, page_size, "allocated sparse page");
            Box::new(Page::new(page_size))
        });

        if entry.slots[offset] == EMPTY {
            entry.occupied += 1;
        }
        entry.slots[offset] = slot as u32;
    }

    /// Mark `id` empty and return the slot it held.
    ///
    /// The owning page is released when its last entry is cleared.
    pub fn clear(&mut self, id: EntityId) -> Option<usize> {
        let (page, offset) = self.split(id);
        let entry = self.pages.get_mut(page)?.as_mut()?;
        let previous = std::mem::replace(&mut entry.slots[offset], EMPTY);
        if previous == EMPTY {
            return None;
        }

        entry.occupied -= 1;
        if entry.occupied == 0 {
            self.pages[page] = None;
            self.allocated -= 1;
            trace!(page, page_size = self.page_size, "released sparse page");
            while matches!(self.pages.last(), Some(None)) {
                self.pages.pop();
            }
        }
        Some(previous as usize)
    }

    /// Drop every page.
    pub fn clear_all(&mut self) {
        self.pages.clear();
        self.allocated = 0;
    }

    /// Number of IDs covered by one page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages currently allocated.
    #[must_use]
    pub fn allocated_pages(&self) -> usize {
        self.allocated
    }

    /// Length of the page table, i.e. one past the highest page index that
    /// is allocated.
    #[must_use]
    pub fn page_table_len(&self) -> usize {
        self.pages.len()
    }

    /// Bytes held by allocated pages.
    #[must_use]
    pub fn memory_footprint(&self) -> usize {
        self.allocated * self.page_size * std::mem::size_of::<u32>()
    }
}

impl Default for PagedArray {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PagedArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedArray")
            .field("page_size", &self.page_size)
            .field("allocated_pages", &self.allocated)
            .field("page_table_len", &self.pages.len())
            .finish()
    }
}
