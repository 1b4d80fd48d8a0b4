//! Binary heaps keyed by an `f64` priority.
//!
//! The backing storage is pooled: `clear` only resets the logical length and the
//! allocation doubles when full, so a heap owned by a long-lived query stops
//! allocating once it has seen its largest workload.

use std::marker::PhantomData;

/// Ordering policy of a [`PriorityHeap`].
pub trait HeapOrder {
    /// `true` if priority `a` belongs above priority `b`.
    fn above(a: f64, b: f64) -> bool;
}

/// Smallest priority at the head.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinOrder;

/// Largest priority at the head.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxOrder;

impl HeapOrder for MinOrder {
    #[inline]
    fn above(a: f64, b: f64) -> bool { a < b }
}

impl HeapOrder for MaxOrder {
    #[inline]
    fn above(a: f64, b: f64) -> bool { a > b }
}

pub type MinHeap<T> = PriorityHeap<T, MinOrder>;
pub type MaxHeap<T> = PriorityHeap<T, MaxOrder>;

#[derive(Debug, Clone)]
pub struct PriorityHeap<T, O: HeapOrder> {
    entries: Vec<(f64, T)>,
    _order: PhantomData<O>,
}

impl<T, O: HeapOrder> Default for PriorityHeap<T, O> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T, O: HeapOrder> PriorityHeap<T, O> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            _order: PhantomData,
        }
    }

    /// Number of entries currently in the heap.
    #[inline]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries the heap can hold before its storage grows.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Drops every entry but keeps the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn head(&self) -> Option<&T> {
        self.entries.first().map(|(_, v)| v)
    }

    pub fn head_priority(&self) -> Option<f64> {
        self.entries.first().map(|&(p, _)| p)
    }

    pub fn push(&mut self, value: T, priority: f64) {
        if self.entries.len() == self.entries.capacity() {
            let grow = self.entries.capacity().max(1);
            log::trace!("heap full at {}, growing by {}", self.entries.len(), grow);
            self.entries.reserve_exact(grow);
        }
        self.entries.push((priority, value));
        self.sift_up(self.entries.len() - 1);
    }

    /// Removes the head entry. `None` only when the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        self.pop_with_priority().map(|(_, v)| v)
    }

    pub fn pop_with_priority(&mut self) -> Option<(f64, T)> {
        if self.entries.is_empty() {
            return None;
        }
        let top = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(top)
    }

    /// Replaces the head entry in one sift, returning the old head.
    pub fn replace_head(&mut self, value: T, priority: f64) -> Option<T> {
        if self.entries.is_empty() {
            self.push(value, priority);
            return None;
        }
        let (_, old) = std::mem::replace(&mut self.entries[0], (priority, value));
        self.sift_down(0);
        Some(old)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !O::above(self.entries[i].0, self.entries[parent].0) {
                break;
            }
            self.entries.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut child = left;
            if right < len && O::above(self.entries[right].0, self.entries[left].0) {
                child = right;
            }
            if !O::above(self.entries[child].0, self.entries[i].0) {
                break;
            }
            self.entries.swap(i, child);
            i = child;
        }
    }
}

impl<T> MaxHeap<T> {
    /// Moves every entry into `out` in storage order and empties the heap.
    pub fn flush_into(&mut self, out: &mut Vec<T>) {
        out.extend(self.entries.drain(..).map(|(_, v)| v));
    }

    /// Drains the heap into `out` smallest priority first.
    pub fn drain_ascending(&mut self, out: &mut Vec<(f64, T)>) {
        let start = out.len();
        while let Some(entry) = self.pop_with_priority() {
            out.push(entry);
        }
        out[start..].reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_heap_pops_in_ascending_order() {
        let mut heap = MinHeap::with_capacity(4);
        for (v, p) in [(0, 5.0), (1, 1.0), (2, 3.0), (3, 0.5), (4, 4.0), (5, 2.0)] {
            heap.push(v, p);
        }
        assert_eq!(heap.count(), 6);
        assert_eq!(heap.head(), Some(&3));
        assert_eq!(heap.head_priority(), Some(0.5));

        let mut order = Vec::new();
        while let Some(v) = heap.pop() {
            order.push(v);
        }
        assert_eq!(order, vec![3, 1, 5, 2, 4, 0]);
        assert!(heap.pop().is_none());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut heap = MinHeap::with_capacity(1);
        for i in 0..100 {
            heap.push(i, i as f64);
        }
        let cap = heap.capacity();
        assert!(cap >= 100);
        heap.clear();
        assert_eq!(heap.count(), 0);
        assert_eq!(heap.capacity(), cap);
    }

    #[test]
    fn max_heap_keeps_largest_on_top() {
        let mut heap = MaxHeap::with_capacity(2);
        heap.push('a', 1.0);
        heap.push('b', 3.0);
        heap.push('c', 2.0);
        assert_eq!(heap.count(), 3);
        assert_eq!(heap.head_priority(), Some(3.0));
        assert_eq!(heap.pop(), Some('b'));
        assert_eq!(heap.head_priority(), Some(2.0));
    }

    #[test]
    fn max_heap_flush_is_storage_order() {
        let mut heap = MaxHeap::with_capacity(10);
        heap.push(1.0f64, 1.0);
        heap.push(3.0, 3.0);
        heap.push(2.0, 2.0);

        let mut out = Vec::new();
        heap.flush_into(&mut out);
        assert_eq!(out, vec![3.0, 1.0, 2.0]);
        assert!(heap.is_empty());
    }

    #[test]
    fn replace_head_resifts() {
        let mut heap = MaxHeap::with_capacity(3);
        heap.push(0, 5.0);
        heap.push(1, 4.0);
        heap.push(2, 3.0);
        assert_eq!(heap.replace_head(3, 1.0), Some(0));
        assert_eq!(heap.head_priority(), Some(4.0));

        let mut sorted = Vec::new();
        heap.drain_ascending(&mut sorted);
        let priorities: Vec<f64> = sorted.iter().map(|&(p, _)| p).collect();
        assert_eq!(priorities, vec![1.0, 3.0, 4.0]);
    }
}
