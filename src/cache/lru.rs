//! LRU Tracker Module
//!
//! Recency ordering for cache eviction, as a doubly linked list whose nodes
//! live in a slab. Every operation is O(1): callers keep the slot returned by
//! [`LruTracker::push_front`] and hand it back to touch or remove the key.

/// Marker for "no neighbour".
const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Node {
    key: String,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// - Head = Most recently used
/// - Tail = Least recently used
#[derive(Debug)]
pub struct LruTracker {
    /// Node slab; `None` marks a free slot
    nodes: Vec<Option<Node>>,
    /// Free slots available for reuse
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl Default for LruTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Inserts a key as the most recently used and returns its slot.
    pub fn push_front(&mut self, key: String) -> usize {
        let node = Node {
            key,
            prev: NIL,
            next: NIL,
        };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = Some(node);
                slot
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.link_front(slot);
        self.len += 1;
        slot
    }

    // == Touch ==
    /// Marks the key in `slot` as recently used (moves it to the head).
    pub fn touch(&mut self, slot: usize) {
        if self.head == slot || self.node(slot).is_none() {
            return;
        }
        self.unlink(slot);
        self.link_front(slot);
    }

    // == Remove ==
    /// Removes the key in `slot`, returning it. `None` if the slot is free.
    pub fn remove(&mut self, slot: usize) -> Option<String> {
        self.node(slot)?;
        self.unlink(slot);
        let node = self.nodes.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(node.key)
    }

    // == Evict Oldest ==
    /// Returns and removes the least recently used key.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        if self.tail == NIL {
            return None;
        }
        self.remove(self.tail)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.node(self.tail).map(|n| n.key.as_str())
    }

    /// Returns the key stored in `slot`.
    pub fn key(&self, slot: usize) -> Option<&str> {
        self.node(slot).map(|n| n.key.as_str())
    }

    // == Clear ==
    /// Forgets every key and releases the slab.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iter ==
    /// Iterates `(slot, key)` pairs from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            tracker: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, slot: usize) -> Option<&Node> {
        self.nodes.get(slot).and_then(Option::as_ref)
    }

    fn link_front(&mut self, slot: usize) {
        let old_head = self.head;
        if let Some(Some(node)) = self.nodes.get_mut(slot) {
            node.prev = NIL;
            node.next = old_head;
        }
        if let Some(Some(head)) = self.nodes.get_mut(old_head) {
            head.prev = slot;
        }
        self.head = slot;
        if self.tail == NIL {
            self.tail = slot;
        }
    }

    fn unlink(&mut self, slot: usize) {
        let (prev, next) = match self.node(slot) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match self.nodes.get_mut(prev) {
            Some(Some(p)) => p.next = next,
            _ => self.head = next,
        }
        match self.nodes.get_mut(next) {
            Some(Some(n)) => n.prev = prev,
            _ => self.tail = prev,
        }

        if let Some(Some(node)) = self.nodes.get_mut(slot) {
            node.prev = NIL;
            node.next = NIL;
        }
    }
}

/// Iterator over tracked keys, most recent first.
pub struct Iter<'a> {
    tracker: &'a LruTracker,
    cursor: usize,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        // `remaining` bounds the walk even if the links were ever corrupted
        if self.remaining == 0 {
            return None;
        }
        let slot = self.cursor;
        let node = self.tracker.node(slot)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some((slot, node.key.as_str()))
    }
}
