//! Doubly linked list threaded through a `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and point at each other by [`SlotId`], so a
//! handle returned by [`push_back`](IntrusiveList::push_back) can be used to
//! splice that node later in O(1) without a search and without raw pointers.
//!
//! ## Layout
//!
//! ```text
//!   head                                       tail
//!    │                                           │
//!    ▼                                           ▼
//!   [k1] ◄──► [k2] ◄──► [k3] ◄──► ... ◄──► [kN]
//!    ▲                                        ▲
//!    │ pop_front (evict)     push_back / move_to_back (insert, promote)
//! ```
//!
//! Each `[k]` is a `Node { value, prev, next }` stored in the arena; the
//! links are `Option<SlotId>` rather than pointers.
//!
//! The ordered map only ever appends at the tail, promotes to the tail and
//! evicts from the head, so the list exposes exactly that shape plus
//! arbitrary unlink.
//!
//! ## Performance
//! - `push_back` / `pop_front` / `remove`: O(1)
//! - `move_to_back`: O(1)
//! - `iter`: O(n), double-ended

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Linked list that stores its nodes in a `SlotArena` and links them by `SlotId`.
#[derive(Debug)]
pub struct IntrusiveList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `id` names a live node.
    pub fn contains(&self, id: SlotId) -> bool {
        self.arena.contains(id)
    }

    /// Value at the head (oldest end).
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    pub fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Value at the tail (newest end).
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    pub fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.arena.get(id).map(|node| &node.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.arena.get_mut(id).map(|node| &mut node.value)
    }

    /// Appends `value` at the tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => {
                if let Some(node) = self.arena.get_mut(tail) {
                    node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Unlinks and returns the head value.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Unlinks node `id` and returns its value.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.detach(id)?;
        self.arena.remove(id).map(|node| node.value)
    }

    /// Moves node `id` to the tail. Returns `false` if `id` is not live.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.arena.contains(id) {
            return false;
        }
        if self.tail == Some(id) {
            return true;
        }
        self.detach(id);
        self.attach_back(id);
        true
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Drops every node and releases the arena's memory.
    pub fn clear_shrink(&mut self) {
        self.clear();
        self.shrink_to_fit();
    }

    /// Releases spare arena memory. Handles of live nodes stay valid.
    pub fn shrink_to_fit(&mut self) {
        self.arena.shrink_to_fit();
    }

    /// Makes room for `additional` more nodes, counting free slots.
    pub fn reserve(&mut self, additional: usize) {
        self.arena.reserve(additional);
    }

    /// Approximate memory footprint in bytes.
    pub fn approx_bytes(&self) -> usize {
        std::mem::size_of::<Self>() - std::mem::size_of::<SlotArena<Node<T>>>()
            + self.arena.approx_bytes()
    }

    /// Iterates values from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len(),
        }
    }

    /// Iterates node handles from head to tail.
    pub fn iter_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        let mut current = self.head;
        std::iter::from_fn(move || {
            let id = current?;
            current = self.arena.get(id)?.next;
            Some(id)
        })
    }

    /// Walks the list and checks link symmetry, head/tail agreement and length.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || !self.is_empty() {
                return Err(InvariantError::new(format!(
                    "list head/tail disagree: head={:?} tail={:?} len={}",
                    self.head,
                    self.tail,
                    self.len()
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(id) = current {
            let node = self
                .arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("dangling list link {id:?}")))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "node {id:?} has prev {:?}, expected {prev:?}",
                    node.prev
                )));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in list"));
            }
            prev = Some(id);
            current = node.next;
        }

        if prev != self.tail {
            return Err(InvariantError::new(format!(
                "walk ended at {prev:?} but tail is {:?}",
                self.tail
            )));
        }
        if count != self.len() {
            return Err(InvariantError::new(format!(
                "walked {count} nodes but arena holds {}",
                self.len()
            )));
        }
        Ok(())
    }

    fn detach(&mut self, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let node = self.arena.get(id)?;
            (node.prev, node.next)
        };

        match prev {
            Some(prev_id) => {
                if let Some(prev_node) = self.arena.get_mut(prev_id) {
                    prev_node.next = next;
                }
            },
            None => self.head = next,
        }

        match next {
            Some(next_id) => {
                if let Some(next_node) = self.arena.get_mut(next_id) {
                    next_node.prev = prev;
                }
            },
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(id) {
            node.prev = None;
            node.next = None;
        }
        Some(())
    }

    fn attach_back(&mut self, id: SlotId) -> Option<()> {
        let old_tail = self.tail;
        let node = self.arena.get_mut(id)?;
        node.prev = old_tail;
        node.next = None;

        match old_tail {
            Some(old_tail) => {
                if let Some(tail_node) = self.arena.get_mut(old_tail) {
                    tail_node.next = Some(id);
                }
            },
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        Some(())
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-to-tail iterator over list values.
pub struct Iter<'a, T> {
    list: &'a IntrusiveList<T>,
    front: Option<SlotId>,
    back: Option<SlotId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.front?)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.arena.get(self.back?)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &IntrusiveList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn push_back_keeps_arrival_order() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(values(&list), vec!["a", "b", "c"]);
        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"c"));
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(c));
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_back_from_head_middle_and_tail() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert!(list.move_to_back(a));
        assert_eq!(values(&list), vec!["b", "c", "a"]);

        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec!["b", "a", "c"]);

        assert!(list.move_to_back(c));
        assert_eq!(values(&list), vec!["b", "a", "c"]);

        assert!(list.contains(b));
        list.check_invariants().unwrap();
    }

    #[test]
    fn move_to_back_single_node() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        assert!(list.move_to_back(a));
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(a));
        list.check_invariants().unwrap();
    }

    #[test]
    fn stale_handle_is_rejected() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        list.remove(a);
        assert!(!list.move_to_back(a));
        assert_eq!(list.remove(a), None);
        assert_eq!(list.get(a), None);
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = IntrusiveList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.remove(b), Some("b"));
        assert_eq!(values(&list), vec!["a", "c"]);
        list.check_invariants().unwrap();

        assert_eq!(list.remove(a), Some("a"));
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"c"));

        assert_eq!(list.remove(c), Some("c"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        list.check_invariants().unwrap();
    }

    #[test]
    fn pop_front_drains_in_order() {
        let mut list = IntrusiveList::new();
        for i in 0..4 {
            list.push_back(i);
        }
        let drained: Vec<_> = std::iter::from_fn(|| list.pop_front()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
        assert!(list.is_empty());
        assert_eq!(list.pop_front(), None);
    }

    #[test]
    fn iter_is_double_ended_and_exact() {
        let mut list = IntrusiveList::new();
        for i in 1..=4 {
            list.push_back(i);
        }
        let mut it = list.iter();
        assert_eq!(it.len(), 4);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next_back(), Some(&3));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);

        let reversed: Vec<_> = list.iter().rev().copied().collect();
        assert_eq!(reversed, vec![4, 3, 2, 1]);
    }

    #[test]
    fn iter_ids_matches_value_order() {
        let mut list = IntrusiveList::new();
        let a = list.push_back('a');
        let b = list.push_back('b');
        let c = list.push_back('c');
        list.move_to_back(a);
        assert_eq!(list.iter_ids().collect::<Vec<_>>(), vec![b, c, a]);
    }

    #[test]
    fn freed_slots_are_reused_after_remove() {
        let mut list = IntrusiveList::new();
        let a = list.push_back(1);
        list.push_back(2);
        list.remove(a);
        let c = list.push_back(3);
        assert_eq!(c.index(), a.index());
        assert_eq!(values(&list), vec![2, 3]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn clear_and_clear_shrink_reset_state() {
        let mut list = IntrusiveList::with_capacity(16);
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.pop_front(), None);

        list.push_back(3);
        list.clear_shrink();
        assert!(list.is_empty());
        assert!(list.approx_bytes() >= std::mem::size_of::<IntrusiveList<i32>>());
        list.check_invariants().unwrap();
    }

    #[test]
    fn shrink_to_fit_keeps_live_handles() {
        let mut list = IntrusiveList::with_capacity(64);
        let ids: Vec<_> = (0..8).map(|i| list.push_back(i)).collect();
        for &id in &ids[4..] {
            list.remove(id);
        }
        list.move_to_back(ids[0]);
        let before = list.approx_bytes();

        list.shrink_to_fit();
        assert!(list.approx_bytes() < before);
        assert_eq!(values(&list), vec![1, 2, 3, 0]);
        assert_eq!(list.get(ids[2]), Some(&2));
        assert!(list.move_to_back(ids[1]));
        assert_eq!(list.back_id(), Some(ids[1]));
        list.check_invariants().unwrap();

        list.reserve(16);
        let e = list.push_back(9);
        assert_eq!(list.back_id(), Some(e));
        list.check_invariants().unwrap();
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut list = IntrusiveList::new();
        let id = list.push_back(10);
        if let Some(value) = list.get_mut(id) {
            *value = 20;
        }
        assert_eq!(list.get(id), Some(&20));
    }
}
