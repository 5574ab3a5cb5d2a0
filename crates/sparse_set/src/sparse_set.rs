//! The [`SparseSet`] container.
//!
//! Three coupled arrays make up the set:
//!
//! - `sparse` — a [`PagedArray`] mapping an [`EntityId`] to its dense slot.
//! - `ids` — the stored IDs, packed with no holes.
//! - `values` — the stored values, index-aligned with `ids`.
//!
//! Removal swaps the last dense element into the vacated slot, so the dense
//! arrays stay contiguous and every operation is O(1). The price is that
//! dense order is not insertion order once anything has been removed.

use std::ops::{Index, IndexMut};

use tracing::debug;

use crate::config::SparseSetConfig;
use crate::entity::EntityId;
use crate::error::SparseSetError;
use crate::iter::{IntoIter, Iter, IterMut};
use crate::paged::PagedArray;

/// Result of a write into a [`SparseSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub enum Outcome {
    /// The ID was absent and a new entry was appended.
    Inserted,
    /// The ID was present and its value was overwritten in place.
    Updated,
    /// The ID was present and the set was left untouched.
    Rejected,
}

impl Outcome {
    /// Returns `true` for [`Outcome::Inserted`].
    #[must_use]
    pub fn is_inserted(self) -> bool {
        self == Outcome::Inserted
    }

    /// Returns `true` for [`Outcome::Updated`].
    #[must_use]
    pub fn is_updated(self) -> bool {
        self == Outcome::Updated
    }

    /// Returns `true` for [`Outcome::Rejected`].
    #[must_use]
    pub fn is_rejected(self) -> bool {
        self == Outcome::Rejected
    }
}

/// Entity-keyed storage with O(1) lookup and contiguous values.
///
/// The set is a plain single-threaded container: it holds no locks, and
/// callers that share it between threads must serialise access themselves.
///
/// # Examples
///
/// ```rust
/// use sparse_set::{EntityId, Outcome, SparseSet};
///
/// let mut positions = SparseSet::new();
/// assert_eq!(positions.insert(EntityId(5), (0.0, 1.0)), Outcome::Inserted);
/// assert_eq!(positions.insert(EntityId(5), (9.0, 9.0)), Outcome::Rejected);
/// assert_eq!(positions.set_or_insert(EntityId(5), (2.0, 2.0)), Outcome::Updated);
/// assert_eq!(positions[EntityId(5)], (2.0, 2.0));
/// ```
#[derive(Clone)]
pub struct SparseSet<T> {
    sparse: PagedArray,
    ids: Vec<EntityId>,
    values: Vec<T>,
}

impl<T> SparseSet<T> {
    /// Create an empty set with the default page size. Does not allocate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sparse: PagedArray::new(),
            ids: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create an empty set whose dense arrays can hold `capacity` values
    /// without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sparse: PagedArray::new(),
            ids: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Create an empty set from an explicit configuration.
    pub fn with_config(config: SparseSetConfig) -> Result<Self, SparseSetError> {
        config.validate()?;
        debug!(
            page_size = config.page_size,
            capacity = config.initial_capacity,
            "creating sparse set"
        );
        Ok(Self {
            sparse: PagedArray::with_page_size(config.page_size)?,
            ids: Vec::with_capacity(config.initial_capacity),
            values: Vec::with_capacity(config.initial_capacity),
        })
    }

    /// Number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the set holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values the dense arrays can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.values.capacity().min(self.ids.capacity())
    }

    /// Reserve room for at least `additional` more values.
    pub fn reserve(&mut self, additional: usize) {
        self.ids.reserve(additional);
        self.values.reserve(additional);
    }

    /// The paged sparse side, for inspecting page usage.
    #[must_use]
    pub fn sparse(&self) -> &PagedArray {
        &self.sparse
    }

    // -- Index translation --

    /// Returns the dense slot holding `id`'s value.
    ///
    /// An entry only counts if its page is allocated, it is not the empty
    /// sentinel, and the dense ID stored at that slot points back at `id`.
    #[inline]
    #[must_use]
    pub fn locate(&self, id: EntityId) -> Option<usize> {
        let slot = self.sparse.get(id)?;
        (self.ids.get(slot) == Some(&id)).then_some(slot)
    }

    /// Returns `true` if a value is stored for `id`.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.locate(id).is_some()
    }

    // -- Insertion --

    /// Store `value` under `id` if the ID is absent.
    ///
    /// Returns [`Outcome::Inserted`] on success. If `id` is already present
    /// the existing value is kept, `value` is dropped and the result is
    /// [`Outcome::Rejected`].
    pub fn insert(&mut self, id: EntityId, value: T) -> Outcome {
        if self.contains(id) {
            return Outcome::Rejected;
        }
        self.push_new(id, value);
        Outcome::Inserted
    }

    /// Store `value` under `id`, failing with
    /// [`SparseSetError::AlreadyPresent`] if the ID already holds a value.
    pub fn try_insert(&mut self, id: EntityId, value: T) -> Result<&mut T, SparseSetError> {
        if self.contains(id) {
            return Err(SparseSetError::AlreadyPresent(id));
        }
        let slot = self.push_new(id, value);
        Ok(&mut self.values[slot])
    }

    /// Returns the value for `id`, constructing it with `f` first if absent.
    pub fn get_or_insert_with(&mut self, id: EntityId, f: impl FnOnce() -> T) -> &mut T {
        let slot = match self.locate(id) {
            Some(slot) => slot,
            None => self.push_new(id, f()),
        };
        &mut self.values[slot]
    }

    /// Overwrite the value for `id` in place, or insert it if absent.
    ///
    /// Returns [`Outcome::Updated`] or [`Outcome::Inserted`] respectively.
    /// An update never moves the entry within the dense arrays.
    pub fn set_or_insert(&mut self, id: EntityId, value: T) -> Outcome {
        match self.locate(id) {
            Some(slot) => {
                self.values[slot] = value;
                Outcome::Updated
            }
            None => {
                self.push_new(id, value);
                Outcome::Inserted
            }
        }
    }

    /// Like [`set_or_insert`](Self::set_or_insert), but hands back the value
    /// that was overwritten.
    pub fn replace(&mut self, id: EntityId, value: T) -> Option<T> {
        match self.locate(id) {
            Some(slot) => Some(std::mem::replace(&mut self.values[slot], value)),
            None => {
                self.push_new(id, value);
                None
            }
        }
    }

    fn push_new(&mut self, id: EntityId, value: T) -> usize {
        let slot = self.values.len();
        self.sparse.set(id, slot);
        self.ids.push(id);
        self.values.push(value);
        slot
    }

    // -- Removal --

    /// Remove the value stored for `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: EntityId) -> bool {
        self.take(id).is_some()
    }

    /// Remove and return the value stored for `id`.
    ///
    /// The last dense element is moved into the vacated slot and its sparse
    /// entry re-pointed; every other element keeps its slot.
    pub fn take(&mut self, id: EntityId) -> Option<T> {
        let slot = self.locate(id)?;
        self.sparse.clear(id);
        self.ids.swap_remove(slot);
        let value = self.values.swap_remove(slot);
        if let Some(&moved) = self.ids.get(slot) {
            self.sparse.set(moved, slot);
        }
        Some(value)
    }

    /// Remove and return the value stored for `id`, failing with
    /// [`SparseSetError::NotPresent`] if there was none.
    pub fn try_remove(&mut self, id: EntityId) -> Result<T, SparseSetError> {
        self.take(id).ok_or(SparseSetError::NotPresent(id))
    }

    /// Keep only the entries for which `f` returns `true`.
    ///
    /// Removed entries are swap-removed, so the survivors' dense order may
    /// change.
    pub fn retain(&mut self, mut f: impl FnMut(EntityId, &mut T) -> bool) {
        let mut slot = 0;
        while slot < self.values.len() {
            let id = self.ids[slot];
            if f(id, &mut self.values[slot]) {
                slot += 1;
            } else {
                // The former last element now sits in `slot`; visit it next.
                self.take(id);
            }
        }
    }

    /// Drop every value and release every sparse page.
    pub fn clear(&mut self) {
        self.ids.clear();
        self.values.clear();
        self.sparse.clear_all();
    }

    // -- Access --

    /// Returns the value stored for `id`.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.locate(id).map(|slot| &self.values[slot])
    }

    /// Returns the value stored for `id` mutably.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.locate(id).map(|slot| &mut self.values[slot])
    }

    /// Returns the value stored for `id`, failing with
    /// [`SparseSetError::NotPresent`] if there is none.
    pub fn try_get(&self, id: EntityId) -> Result<&T, SparseSetError> {
        self.get(id).ok_or(SparseSetError::NotPresent(id))
    }

    // -- Dense views --

    /// The stored IDs in dense order.
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    /// The stored values in dense order, aligned with [`ids`](Self::ids).
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The stored values in dense order, mutably.
    #[must_use]
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Iterate over `(id, &value)` pairs in dense order.
    ///
    /// Dense order is whatever the insert/remove history left behind. It is
    /// not insertion order and is not preserved by later mutation.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.ids, &self.values)
    }

    /// Iterate over `(id, &mut value)` pairs in dense order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(&self.ids, &mut self.values)
    }
}

impl<T> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SparseSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Direct access to a stored value.
///
/// # Panics
///
/// Panics if `id` is not present. Check with
/// [`contains`](SparseSet::contains) or use [`get`](SparseSet::get) when
/// presence is not already established.
impl<T> Index<EntityId> for SparseSet<T> {
    type Output = T;

    fn index(&self, id: EntityId) -> &T {
        match self.locate(id) {
            Some(slot) => &self.values[slot],
            None => panic!("{id} is not present in the sparse set"),
        }
    }
}

impl<T> IndexMut<EntityId> for SparseSet<T> {
    fn index_mut(&mut self, id: EntityId) -> &mut T {
        match self.locate(id) {
            Some(slot) => &mut self.values[slot],
            None => panic!("{id} is not present in the sparse set"),
        }
    }
}

impl<'a, T> IntoIterator for &'a SparseSet<T> {
    type Item = (EntityId, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SparseSet<T> {
    type Item = (EntityId, &'a mut T);
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for SparseSet<T> {
    type Item = (EntityId, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.ids, self.values)
    }
}

/// Later duplicates overwrite earlier ones, as with
/// [`set_or_insert`](SparseSet::set_or_insert).
impl<T> Extend<(EntityId, T)> for SparseSet<T> {
    fn extend<I: IntoIterator<Item = (EntityId, T)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (id, value) in iter {
            let _ = self.set_or_insert(id, value);
        }
    }
}

impl<T> FromIterator<(EntityId, T)> for SparseSet<T> {
    fn from_iter<I: IntoIterator<Item = (EntityId, T)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn id(raw: u32) -> EntityId {
        EntityId(raw)
    }

    fn raw_ids<T>(set: &SparseSet<T>) -> Vec<u32> {
        set.ids().iter().map(|id| id.raw()).collect()
    }

    /// Dense arrays aligned, hole-free, and every entry points back at itself.
    fn assert_invariants<T>(set: &SparseSet<T>) {
        assert_eq!(set.ids().len(), set.values().len());
        assert_eq!(set.ids().len(), set.len());
        for (slot, &entity) in set.ids().iter().enumerate() {
            assert_eq!(set.locate(entity), Some(slot), "{entity} lost its slot");
            assert_eq!(set.ids()[set.locate(entity).unwrap()], entity);
        }
    }

    #[test]
    fn test_new_set_is_empty() {
        let set: SparseSet<u8> = SparseSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(id(0)));
        assert_eq!(set.sparse().allocated_pages(), 0);
    }

    #[test]
    fn test_swap_remove_scenario() {
        let mut set = SparseSet::new();
        for raw in [5, 2, 9] {
            assert_eq!(set.insert(id(raw), raw * 10), Outcome::Inserted);
        }
        assert_eq!(raw_ids(&set), vec![5, 2, 9]);

        assert!(set.remove(id(2)));
        assert_eq!(raw_ids(&set), vec![5, 9]);
        assert_eq!(set.values(), &[50, 90]);
        assert!(!set.contains(id(2)));
        assert_eq!(set.locate(id(9)), Some(1));
        assert_eq!(set.locate(id(5)), Some(0));
        assert_invariants(&set);
    }

    #[test]
    fn test_set_or_insert_scenario() {
        let mut set = SparseSet::new();
        assert_eq!(set.set_or_insert(id(7), "a"), Outcome::Inserted);
        assert_eq!(set.set_or_insert(id(7), "b"), Outcome::Updated);
        assert_eq!(set.get(id(7)), Some(&"b"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_insert_rejects_duplicate_without_overwriting() {
        let mut set = SparseSet::new();
        assert!(set.insert(id(3), "first").is_inserted());
        assert!(set.insert(id(3), "second").is_rejected());
        assert_eq!(set[id(3)], "first");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_update_does_not_relocate() {
        let mut set = SparseSet::new();
        set.extend([(id(1), 'a'), (id(2), 'b'), (id(3), 'c')]);
        assert!(set.set_or_insert(id(1), 'z').is_updated());
        assert_eq!(raw_ids(&set), vec![1, 2, 3]);
        assert_eq!(set.values(), &['z', 'b', 'c']);
    }

    #[test]
    fn test_remove_last_element_needs_no_swap() {
        let mut set = SparseSet::new();
        set.extend([(id(1), 1), (id(2), 2)]);
        assert!(set.remove(id(2)));
        assert_eq!(raw_ids(&set), vec![1]);
        assert_eq!(set.locate(id(1)), Some(0));
        assert!(set.remove(id(1)));
        assert!(set.is_empty());
        assert_eq!(set.sparse().allocated_pages(), 0);
    }

    #[test]
    fn test_swap_remove_leaves_other_slots_untouched() {
        let mut set: SparseSet<u32> = (0..6).map(|raw| (id(raw), raw)).collect();
        assert!(set.remove(id(1)));
        // 5 moved into slot 1; everybody else stays put.
        assert_eq!(set.locate(id(5)), Some(1));
        for raw in [0, 2, 3, 4] {
            assert_eq!(set.locate(id(raw)), Some(raw as usize));
        }
        assert_invariants(&set);
    }

    #[test]
    fn test_failed_operations_do_not_mutate() {
        let mut set = SparseSet::new();
        set.extend([(id(4), 40), (id(8), 80)]);
        let before_ids = raw_ids(&set);
        let before_pages = set.sparse().allocated_pages();

        assert!(!set.remove(id(5)));
        assert_eq!(set.take(id(1000)), None);
        assert_eq!(set.locate(id(6)), None);
        assert!(set.insert(id(4), 0).is_rejected());

        assert_eq!(raw_ids(&set), before_ids);
        assert_eq!(set.values(), &[40, 80]);
        assert_eq!(set.sparse().allocated_pages(), before_pages);
    }

    #[test]
    fn test_take_returns_value() {
        let mut set = SparseSet::new();
        set.extend([(id(1), String::from("one")), (id(2), String::from("two"))]);
        assert_eq!(set.take(id(1)), Some(String::from("one")));
        assert_eq!(set.take(id(1)), None);
        assert_eq!(set[id(2)], "two");
    }

    #[test]
    fn test_try_variants_report_errors() {
        let mut set = SparseSet::new();
        *set.try_insert(id(9), 1).unwrap() += 1;
        assert_eq!(set.try_get(id(9)), Ok(&2));
        assert_eq!(set.try_insert(id(9), 5), Err(SparseSetError::AlreadyPresent(id(9))));
        assert_eq!(set.try_get(id(3)), Err(SparseSetError::NotPresent(id(3))));
        assert_eq!(set.try_remove(id(9)), Ok(2));
        assert_eq!(set.try_remove(id(9)), Err(SparseSetError::NotPresent(id(9))));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SparseSetError::AlreadyPresent(id(4)).to_string(),
            "EntityId(4) is already present"
        );
        assert_eq!(SparseSetError::NotPresent(id(4)).to_string(), "EntityId(4) is not present");
    }

    #[test]
    fn test_replace_returns_previous_value() {
        let mut set = SparseSet::new();
        assert_eq!(set.replace(id(2), 'a'), None);
        assert_eq!(set.replace(id(2), 'b'), Some('a'));
        assert_eq!(set[id(2)], 'b');
    }

    #[test]
    fn test_get_or_insert_with_only_constructs_when_absent() {
        let mut set = SparseSet::new();
        let mut calls = 0;
        *set.get_or_insert_with(id(3), || {
            calls += 1;
            10
        }) += 1;
        *set.get_or_insert_with(id(3), || {
            calls += 1;
            99
        }) += 1;
        assert_eq!(calls, 1);
        assert_eq!(set[id(3)], 12);
    }

    #[test]
    fn test_index_mut_and_get_mut() {
        let mut set = SparseSet::new();
        set.extend([(id(10), 1.0_f32)]);
        set[id(10)] *= 4.0;
        if let Some(value) = set.get_mut(id(10)) {
            *value += 1.0;
        }
        assert_eq!(set[id(10)], 5.0);
        assert!(set.get_mut(id(11)).is_none());
    }

    #[test]
    #[should_panic(expected = "EntityId(42) is not present")]
    fn test_index_missing_panics() {
        let set: SparseSet<u8> = SparseSet::new();
        let _value = set[id(42)];
    }

    #[test]
    fn test_round_trip_after_set_or_insert() {
        let mut set = SparseSet::new();
        set.extend([(id(1), 0)]);
        for raw in [1, 2] {
            let _ = set.set_or_insert(id(raw), 77);
            assert_eq!(set.get(id(raw)), Some(&77));
        }
    }

    #[test]
    fn test_sparse_ids_allocate_pages_per_range() {
        let config = SparseSetConfig::default().with_page_size(64);
        let mut set = SparseSet::with_config(config).unwrap();
        set.extend([(id(0), ()), (id(1), ()), (id(1_000_000), ())]);
        assert_eq!(set.sparse().allocated_pages(), 2);

        assert!(set.remove(id(1_000_000)));
        assert_eq!(set.sparse().allocated_pages(), 1);
        assert_eq!(set.sparse().page_table_len(), 1);

        assert!(set.remove(id(0)));
        assert_eq!(set.sparse().allocated_pages(), 1);
        assert!(set.remove(id(1)));
        assert_eq!(set.sparse().allocated_pages(), 0);
    }

    #[test]
    fn test_swap_remove_across_pages() {
        let config = SparseSetConfig::default().with_page_size(4);
        let mut set = SparseSet::with_config(config).unwrap();
        set.extend([(id(0), 'a'), (id(100), 'b')]);
        // Removing 0 releases its page and relocates 100 into slot 0.
        assert!(set.remove(id(0)));
        assert_eq!(set.locate(id(100)), Some(0));
        assert_eq!(set.sparse().allocated_pages(), 1);
        assert_invariants(&set);
    }

    #[test]
    fn test_with_config_rejects_invalid_page_size() {
        let config = SparseSetConfig::default().with_page_size(10);
        assert_eq!(
            SparseSet::<u8>::with_config(config).unwrap_err(),
            SparseSetError::InvalidPageSize(10)
        );
    }

    #[test]
    fn test_with_capacity_reserves_dense_storage() {
        let set: SparseSet<u64> = SparseSet::with_capacity(32);
        assert!(set.capacity() >= 32);
        let configured: SparseSet<u64> =
            SparseSet::with_config(SparseSetConfig::default().with_capacity(16)).unwrap();
        assert!(configured.capacity() >= 16);
    }

    #[test]
    fn test_clear_drops_values_and_pages() {
        let mut set: SparseSet<_> = (0..100).map(|raw| (id(raw * 50), raw)).collect();
        assert!(set.sparse().allocated_pages() > 1);
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.sparse().allocated_pages(), 0);
        assert!(!set.contains(id(50)));
        assert!(set.insert(id(50), 1).is_inserted());
    }

    #[test]
    fn test_values_are_dropped_on_remove_and_clear() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut set = SparseSet::new();
        for raw in 0..4 {
            let _ = set.insert(id(raw), Rc::clone(&tracker));
        }
        assert_eq!(Rc::strong_count(&tracker), 5);
        assert!(set.remove(id(1)));
        assert_eq!(Rc::strong_count(&tracker), 4);
        assert!(set.insert(id(0), Rc::clone(&tracker)).is_rejected());
        assert_eq!(Rc::strong_count(&tracker), 4);
        set.clear();
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_retain_filters_and_keeps_invariants() {
        let mut set: SparseSet<u32> = (0..20).map(|raw| (id(raw), raw)).collect();
        set.retain(|_, value| *value % 3 == 0);
        let mut kept = raw_ids(&set);
        kept.sort_unstable();
        assert_eq!(kept, vec![0, 3, 6, 9, 12, 15, 18]);
        assert_invariants(&set);
    }

    #[test]
    fn test_iteration_follows_dense_order() {
        let mut set = SparseSet::new();
        set.extend([(id(5), 'a'), (id(2), 'b'), (id(9), 'c')]);
        assert!(set.remove(id(5)));

        let seen: Vec<_> = set.iter().map(|(entity, &c)| (entity.raw(), c)).collect();
        assert_eq!(seen, vec![(9, 'c'), (2, 'b')]);

        for (_, value) in &mut set {
            *value = value.to_ascii_uppercase();
        }
        let owned: Vec<_> = set.into_iter().collect();
        assert_eq!(owned, vec![(id(9), 'C'), (id(2), 'B')]);
    }

    #[test]
    fn test_from_iter_keeps_last_duplicate() {
        let set: SparseSet<_> = [(id(1), 'a'), (id(2), 'b'), (id(1), 'c')].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(set[id(1)], 'c');
    }

    #[test]
    fn test_debug_lists_entries() {
        let mut set = SparseSet::new();
        let _ = set.insert(id(3), "x");
        assert_eq!(format!("{set:?}"), r#"{EntityId(3): "x"}"#);
    }

    #[test]
    fn test_matches_hash_map_model() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let config = SparseSetConfig::default().with_page_size(8);
        let mut set = SparseSet::with_config(config).unwrap();
        let mut model: HashMap<EntityId, u32> = HashMap::new();

        for step in 0..5_000u32 {
            let entity = id(rng.random_range(0..256));
            match rng.random_range(0..4) {
                0 => {
                    let expected = if model.contains_key(&entity) {
                        Outcome::Rejected
                    } else {
                        model.insert(entity, step);
                        Outcome::Inserted
                    };
                    assert_eq!(set.insert(entity, step), expected);
                }
                1 => {
                    let expected = match model.insert(entity, step) {
                        Some(_) => Outcome::Updated,
                        None => Outcome::Inserted,
                    };
                    assert_eq!(set.set_or_insert(entity, step), expected);
                }
                _ => assert_eq!(set.take(entity), model.remove(&entity)),
            }

            assert_eq!(set.len(), model.len());
            assert_eq!(set.contains(entity), model.contains_key(&entity));
        }

        assert_invariants(&set);
        for (entity, value) in &model {
            assert_eq!(set.get(*entity), Some(value));
        }
        let populated_pages = model
            .keys()
            .map(|entity| entity.index() / 8)
            .collect::<std::collections::HashSet<_>>()
            .len();
        assert_eq!(set.sparse().allocated_pages(), populated_pages);
    }
}
