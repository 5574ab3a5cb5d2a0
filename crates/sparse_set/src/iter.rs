//! Dense-order iterators over a [`SparseSet`](crate::SparseSet).
//!
//! All iterators walk the dense arrays front to back. The order reflects the
//! swap-remove history of the set, not insertion order, and any insert or
//! remove may reorder what a later iteration observes.

use std::iter::FusedIterator;

use crate::entity::EntityId;

/// Borrowing iterator yielding `(EntityId, &T)`.
#[derive(Debug)]
pub struct Iter<'a, T> {
    ids: std::slice::Iter<'a, EntityId>,
    values: std::slice::Iter<'a, T>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(ids: &'a [EntityId], values: &'a [T]) -> Self {
        debug_assert_eq!(ids.len(), values.len());
        Self {
            ids: ids.iter(),
            values: values.iter(),
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
            values: self.values.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (EntityId, &'a T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.ids.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((*self.ids.next_back()?, self.values.next_back()?))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// Borrowing iterator yielding `(EntityId, &mut T)`.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    ids: std::slice::Iter<'a, EntityId>,
    values: std::slice::IterMut<'a, T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(ids: &'a [EntityId], values: &'a mut [T]) -> Self {
        debug_assert_eq!(ids.len(), values.len());
        Self {
            ids: ids.iter(),
            values: values.iter_mut(),
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (EntityId, &'a mut T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.ids.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((*self.ids.next_back()?, self.values.next_back()?))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator yielding `(EntityId, T)`.
#[derive(Debug)]
pub struct IntoIter<T> {
    ids: std::vec::IntoIter<EntityId>,
    values: std::vec::IntoIter<T>,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(ids: Vec<EntityId>, values: Vec<T>) -> Self {
        debug_assert_eq!(ids.len(), values.len());
        Self {
            ids: ids.into_iter(),
            values: values.into_iter(),
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = (EntityId, T);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        Some((self.ids.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.ids.next_back()?, self.values.next_back()?))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
