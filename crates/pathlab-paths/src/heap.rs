//! Binary min-heap keyed by an `f64` priority.
//!
//! Entries with equal priority pop in insertion order. Every entry keeps a
//! position index so [`MinHeap::update`] can re-sift it in place.

use std::cmp::Ordering;

/// Stable reference to an entry pushed onto a [`MinHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapHandle(usize);

const POPPED: usize = usize::MAX;

#[derive(Debug)]
struct HeapNode<T> {
    item: T,
    priority: f64,
    /// Insertion sequence; doubles as the handle id.
    id: usize,
}

/// A min-priority queue.
#[derive(Debug)]
pub struct MinHeap<T> {
    nodes: Vec<HeapNode<T>>,
    /// `positions[id]` is the current slot of entry `id` in `nodes`, or
    /// `POPPED` once it has left the heap.
    positions: Vec<usize>,
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            positions: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            positions: Vec::with_capacity(capacity),
        }
    }

    /// Number of entries in the heap.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Insert `item` with `priority`.
    pub fn push(&mut self, item: T, priority: f64) -> HeapHandle {
        let id = self.positions.len();
        let slot = self.nodes.len();
        self.positions.push(slot);
        self.nodes.push(HeapNode { item, priority, id });
        self.sift_up(slot);
        HeapHandle(id)
    }

    /// Remove and return the entry with the smallest priority.
    pub fn pop(&mut self) -> Option<(T, f64)> {
        if self.nodes.is_empty() {
            return None;
        }
        let last = self.nodes.len() - 1;
        self.swap(0, last);
        let node = self.nodes.pop()?;
        self.positions[node.id] = POPPED;
        if !self.nodes.is_empty() {
            self.sift_down(0);
        }
        Some((node.item, node.priority))
    }

    /// Priority of the entry [`pop`](Self::pop) would return next.
    pub fn peek_priority(&self) -> Option<f64> {
        self.nodes.first().map(|n| n.priority)
    }

    /// Whether the entry behind `handle` is still queued.
    pub fn contains(&self, handle: HeapHandle) -> bool {
        self.positions.get(handle.0).is_some_and(|&pos| pos != POPPED)
    }

    /// Change the priority of a queued entry and restore heap order.
    ///
    /// Returns `false` if the entry has already been popped.
    pub fn update(&mut self, handle: HeapHandle, priority: f64) -> bool {
        let Some(&pos) = self.positions.get(handle.0) else {
            return false;
        };
        if pos == POPPED {
            return false;
        }
        self.nodes[pos].priority = priority;
        let moved = self.sift_up(pos);
        if moved == pos {
            self.sift_down(pos);
        }
        true
    }

    fn less(&self, i: usize, j: usize) -> bool {
        let (a, b) = (&self.nodes[i], &self.nodes[j]);
        match a.priority.total_cmp(&b.priority) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a.id < b.id,
        }
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
        self.positions[self.nodes[i].id] = i;
        self.positions[self.nodes[j].id] = j;
    }

    /// Returns the final slot of the entry that started at `i`.
    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.nodes.len();
        loop {
            let left = 2 * i + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let mut smallest = left;
            if right < n && self.less(right, left) {
                smallest = right;
            }
            if !self.less(smallest, i) {
                break;
            }
            self.swap(i, smallest);
            i = smallest;
        }
    }
}
