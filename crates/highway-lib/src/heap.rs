//! Array-backed binary min-heap with caller-supplied ordering keys.
//!
//! Entries are small handles; their priority is read through a key function
//! on every comparison, so the heap always orders by the caller's current
//! view of each entry. The same handle may be pushed several times.

use tracing::trace;

/// Initial slot count for a fresh heap.
pub const DEFAULT_HEAP_CAPACITY: usize = 100;

/// Binary min-heap of copyable handles.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    entries: Vec<T>,
    capacity: usize,
}

impl<T: Copy> MinHeap<T> {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HEAP_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current slot budget. Doubles whenever a push finds it exhausted.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append `item` and sift it up towards the root.
    pub fn push<K, F>(&mut self, item: T, key: F)
    where
        K: Ord,
        F: Fn(T) -> K,
    {
        if self.entries.len() == self.capacity {
            let grown = self.capacity * 2;
            self.entries.reserve_exact(grown - self.entries.len());
            trace!(from = self.capacity, to = grown, "heap grown");
            self.capacity = grown;
        }

        self.entries.push(item);
        let mut index = self.entries.len() - 1;
        while index > 0 {
            let parent = (index - 1) / 2;
            if key(self.entries[parent]) <= key(self.entries[index]) {
                break;
            }
            self.entries.swap(parent, index);
            index = parent;
        }
    }

    /// Remove and return the entry with the smallest key.
    ///
    /// When both children tie, the left child moves up.
    pub fn pop<K, F>(&mut self, key: F) -> Option<T>
    where
        K: Ord,
        F: Fn(T) -> K,
    {
        if self.entries.is_empty() {
            return None;
        }
        let top = self.entries.swap_remove(0);

        let len = self.entries.len();
        let mut index = 0;
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && key(self.entries[left]) < key(self.entries[smallest]) {
                smallest = left;
            }
            if right < len && key(self.entries[right]) < key(self.entries[smallest]) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }

        Some(top)
    }
}

impl<T: Copy> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
