use alloc::vec::Vec;
use core::{fmt, iter::FusedIterator, mem};

use snafu::{Location, OptionExt as _, Snafu, ensure};

use crate::block::MemoryBlock;

/// Errors reported by [`BlockList`] operations.
#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum BlockListError {
    /// A positional operation was given an index beyond the permitted
    /// boundary.
    #[snafu(display("index {index} is out of range for a list of {len} blocks"))]
    OutOfRange {
        index: usize,
        len: usize,
        #[snafu(implicit)]
        location: Location,
    },
    /// A value removal was given a block that is not in the list.
    #[snafu(display("block {block} is not in the list"))]
    UnknownBlock {
        block: MemoryBlock,
        #[snafu(implicit)]
        location: Location,
    },
}

/// Stable handle to a node of a [`BlockList`].
///
/// A handle stays valid until its node is removed; removing or inserting
/// other nodes never invalidates it. Every slot carries a generation
/// counter, so a handle whose node has been removed can never alias a
/// node that later reuses the slot. Handles are only meaningful for the
/// list that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    index: usize,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node {
    block: MemoryBlock,
    next: Option<NodeHandle>,
}

#[derive(Debug, Clone)]
enum Entry {
    Occupied(Node),
    Vacant { next_free: Option<usize> },
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    entry: Entry,
}

/// An ordered, singly-linked sequence of [`MemoryBlock`]s.
///
/// The list owns its nodes in an arena and links them through
/// [`NodeHandle`]s. It tracks the head, the tail, and the element count;
/// head/tail insertion is O(1), everything positional is a linear walk
/// from the head.
///
/// # Examples
///
/// ```
/// use block_list::{BlockList, MemoryBlock};
///
/// let mut list = BlockList::new();
/// list.push_back(MemoryBlock::new(0, 10));
/// list.push_back(MemoryBlock::new(10, 5));
///
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.block_at(1).unwrap(), &MemoryBlock::new(10, 5));
/// assert_eq!(list.to_string(), "(0, 10) (10, 5)");
/// ```
#[derive(Clone, Default)]
pub struct BlockList {
    slots: Vec<Slot>,
    free_slot: Option<usize>,
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
    len: usize,
}

impl BlockList {
    /// Creates a new empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of blocks in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first block of the list, if any.
    #[must_use]
    pub fn first(&self) -> Option<&MemoryBlock> {
        self.head.map(|handle| &self.node(handle).block)
    }

    /// Returns the last block of the list, if any.
    #[must_use]
    pub fn last(&self) -> Option<&MemoryBlock> {
        self.tail.map(|handle| &self.node(handle).block)
    }

    /// Returns the handle of the node at `index`.
    ///
    /// The valid range is strictly `[0, len)`; the past-the-end position
    /// exists only for insertion and is handled by
    /// [`insert_at`](Self::insert_at).
    ///
    /// # Errors
    ///
    /// Returns [`BlockListError::OutOfRange`] if `index >= len`.
    pub fn node_at(&self, index: usize) -> Result<NodeHandle, BlockListError> {
        self.locate(index)
            .map(|(_, handle)| handle)
            .context(block_list_error::OutOfRangeSnafu {
                index,
                len: self.len,
            })
    }

    /// Returns the block stored at `index`. The valid range is strictly
    /// `[0, len)`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockListError::OutOfRange`] if `index >= len`.
    pub fn block_at(&self, index: usize) -> Result<&MemoryBlock, BlockListError> {
        let handle = self.node_at(index)?;
        Ok(&self.node(handle).block)
    }

    /// Inserts `block` so that it becomes the element at `index`,
    /// shifting the elements from `index` onward one position back.
    ///
    /// `index == 0` prepends and `index == len` appends, both in O(1);
    /// interior positions cost O(index). Returns the handle of the new
    /// node.
    ///
    /// # Errors
    ///
    /// Returns [`BlockListError::OutOfRange`] if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_list::{BlockList, MemoryBlock};
    ///
    /// let mut list = BlockList::new();
    /// list.push_back(MemoryBlock::new(0, 1));
    /// list.push_back(MemoryBlock::new(2, 1));
    /// list.insert_at(1, MemoryBlock::new(1, 1))?;
    ///
    /// assert_eq!(list.to_string(), "(0, 1) (1, 1) (2, 1)");
    /// # Ok::<(), block_list::BlockListError>(())
    /// ```
    pub fn insert_at(
        &mut self,
        index: usize,
        block: MemoryBlock,
    ) -> Result<NodeHandle, BlockListError> {
        ensure!(
            index <= self.len,
            block_list_error::OutOfRangeSnafu {
                index,
                len: self.len,
            }
        );
        if index == 0 {
            return Ok(self.push_front(block));
        }
        if index == self.len {
            return Ok(self.push_back(block));
        }
        let prev = self.node_at(index - 1)?;
        let next = self.node(prev).next;
        let handle = self.insert_slot(Node { block, next });
        self.node_mut(prev).next = Some(handle);
        self.len += 1;
        Ok(handle)
    }

    /// Appends `block` at the tail of the list in O(1) and returns the
    /// handle of the new node.
    pub fn push_back(&mut self, block: MemoryBlock) -> NodeHandle {
        let handle = self.insert_slot(Node { block, next: None });
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(handle),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        self.len += 1;
        handle
    }

    /// Prepends `block` at the head of the list in O(1) and returns the
    /// handle of the new node.
    pub fn push_front(&mut self, block: MemoryBlock) -> NodeHandle {
        let handle = self.insert_slot(Node {
            block,
            next: self.head,
        });
        self.head = Some(handle);
        if self.tail.is_none() {
            self.tail = Some(handle);
        }
        self.len += 1;
        handle
    }

    /// Returns the position of the first block equal to `block`, or
    /// `None` if no block compares equal.
    #[must_use]
    pub fn index_of(&self, block: &MemoryBlock) -> Option<usize> {
        self.iter().position(|candidate| candidate == block)
    }

    /// Removes the node identified by `handle`, regardless of how many
    /// other nodes hold an equal block value.
    ///
    /// Returns the removed block, or `None` when the handle does not
    /// name a live node of this list (the list is empty, or the node was
    /// already removed). Removing through a handle never touches nodes
    /// that merely compare equal by value; use
    /// [`remove_block`](Self::remove_block) for that.
    pub fn remove_node(&mut self, handle: NodeHandle) -> Option<MemoryBlock> {
        let mut prev = None;
        let mut current = self.head;
        while let Some(candidate) = current {
            if candidate == handle {
                return Some(self.unlink(prev, candidate));
            }
            prev = Some(candidate);
            current = self.node(candidate).next;
        }
        None
    }

    /// Removes and returns the block at `index`. The valid range is
    /// strictly `[0, len)`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockListError::OutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<MemoryBlock, BlockListError> {
        let (prev, handle) = self
            .locate(index)
            .context(block_list_error::OutOfRangeSnafu {
                index,
                len: self.len,
            })?;
        Ok(self.unlink(prev, handle))
    }

    /// Removes the first block equal to `block` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`BlockListError::UnknownBlock`] if no block in the list
    /// compares equal to `block`.
    pub fn remove_block(&mut self, block: &MemoryBlock) -> Result<MemoryBlock, BlockListError> {
        let index = self
            .index_of(block)
            .context(block_list_error::UnknownBlockSnafu { block: *block })?;
        self.remove_at(index)
    }

    /// Returns a fresh forward iterator over the blocks in list order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Returns a cursor positioned at the head of the list.
    ///
    /// See [`CursorMut`] for the operations it supports.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_> {
        let current = self.head;
        CursorMut {
            list: self,
            prev: None,
            current,
        }
    }

    /// Walks the chain to `index`, returning the handle there together
    /// with its predecessor. `None` when `index >= len`.
    fn locate(&self, index: usize) -> Option<(Option<NodeHandle>, NodeHandle)> {
        let mut prev = None;
        let mut current = self.head?;
        for _ in 0..index {
            prev = Some(current);
            current = self.node(current).next?;
        }
        Some((prev, current))
    }

    /// Splices the node at `handle` out of the chain, `prev` being its
    /// predecessor (`None` for the head), and vacates its slot.
    fn unlink(&mut self, prev: Option<NodeHandle>, handle: NodeHandle) -> MemoryBlock {
        let next = self.node(handle).next;
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        if self.tail == Some(handle) {
            self.tail = prev;
        }
        self.len -= 1;
        self.vacate_slot(handle)
    }

    fn insert_slot(&mut self, node: Node) -> NodeHandle {
        if let Some(index) = self.free_slot {
            let slot = &mut self.slots[index];
            let next_free = match &slot.entry {
                Entry::Vacant { next_free } => *next_free,
                Entry::Occupied(_) => unreachable!("free-slot chain points at an occupied slot"),
            };
            self.free_slot = next_free;
            slot.entry = Entry::Occupied(node);
            NodeHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                entry: Entry::Occupied(node),
            });
            NodeHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Empties the slot behind `handle`, bumping its generation so the
    /// handle (and any copy of it) goes stale, and chains the slot for
    /// reuse.
    fn vacate_slot(&mut self, handle: NodeHandle) -> MemoryBlock {
        let slot = &mut self.slots[handle.index];
        debug_assert_eq!(slot.generation, handle.generation);
        slot.generation = slot.generation.wrapping_add(1);
        let entry = mem::replace(
            &mut slot.entry,
            Entry::Vacant {
                next_free: self.free_slot,
            },
        );
        self.free_slot = Some(handle.index);
        match entry {
            Entry::Occupied(node) => node.block,
            Entry::Vacant { .. } => unreachable!("vacated a slot that was not occupied"),
        }
    }

    fn node(&self, handle: NodeHandle) -> &Node {
        let slot = &self.slots[handle.index];
        assert_eq!(slot.generation, handle.generation, "stale node handle");
        match &slot.entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => panic!("stale node handle"),
        }
    }

    fn node_mut(&mut self, handle: NodeHandle) -> &mut Node {
        let slot = &mut self.slots[handle.index];
        assert_eq!(slot.generation, handle.generation, "stale node handle");
        match &mut slot.entry {
            Entry::Occupied(node) => node,
            Entry::Vacant { .. } => panic!("stale node handle"),
        }
    }
}

impl fmt::Debug for BlockList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for BlockList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut blocks = self.iter();
        if let Some(block) = blocks.next() {
            write!(f, "{block}")?;
        }
        for block in blocks {
            write!(f, " {block}")?;
        }
        Ok(())
    }
}

impl PartialEq for BlockList {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for BlockList {}

impl FromIterator<MemoryBlock> for BlockList {
    fn from_iter<T: IntoIterator<Item = MemoryBlock>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl Extend<MemoryBlock> for BlockList {
    fn extend<T: IntoIterator<Item = MemoryBlock>>(&mut self, iter: T) {
        for block in iter {
            self.push_back(block);
        }
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a MemoryBlock;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A forward iterator over the blocks of a [`BlockList`].
///
/// Created by [`BlockList::iter`]; every call starts a fresh traversal
/// of length `len` at creation time.
pub struct Iter<'a> {
    list: &'a BlockList,
    next: Option<NodeHandle>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a MemoryBlock;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let node = self.list.node(handle);
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// A cursor over a [`BlockList`] that can mutate the list while
/// traversing it.
///
/// The cursor exposes exactly the sequence a first-fit scan needs:
/// inspect the current block, optionally mutate or remove it, advance.
/// After [`remove_current`](Self::remove_current) the cursor moves to the
/// node that followed the removed one, so traversal continues without
/// revisiting or skipping elements.
///
/// # Examples
///
/// ```
/// use block_list::{BlockList, MemoryBlock};
///
/// let mut list: BlockList = [
///     MemoryBlock::new(0, 4),
///     MemoryBlock::new(4, 2),
///     MemoryBlock::new(6, 4),
/// ]
/// .into_iter()
/// .collect();
///
/// // Drop every block shorter than 4 words.
/// let mut cursor = list.cursor_front_mut();
/// while let Some(block) = cursor.current() {
///     if block.length < 4 {
///         cursor.remove_current();
///     } else {
///         cursor.move_next();
///     }
/// }
/// assert_eq!(list.to_string(), "(0, 4) (6, 4)");
/// ```
pub struct CursorMut<'a> {
    list: &'a mut BlockList,
    prev: Option<NodeHandle>,
    current: Option<NodeHandle>,
}

impl CursorMut<'_> {
    /// Returns the handle of the current node, or `None` when the cursor
    /// has moved past the end.
    #[must_use]
    pub fn handle(&self) -> Option<NodeHandle> {
        self.current
    }

    /// Returns the current block, or `None` when the cursor has moved
    /// past the end.
    #[must_use]
    pub fn current(&self) -> Option<&MemoryBlock> {
        self.current.map(|handle| &self.list.node(handle).block)
    }

    /// Returns the current block for in-place mutation.
    pub fn current_mut(&mut self) -> Option<&mut MemoryBlock> {
        self.current
            .map(|handle| &mut self.list.node_mut(handle).block)
    }

    /// Advances the cursor to the next node. Past the end this is a
    /// no-op.
    pub fn move_next(&mut self) {
        if let Some(handle) = self.current {
            self.prev = Some(handle);
            self.current = self.list.node(handle).next;
        }
    }

    /// Removes the current node from the list and returns its block; the
    /// cursor moves to the node that followed it. Past the end this is a
    /// no-op returning `None`.
    pub fn remove_current(&mut self) -> Option<MemoryBlock> {
        let handle = self.current?;
        self.current = self.list.node(handle).next;
        Some(self.list.unlink(self.prev, handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(list: &BlockList) -> Vec<MemoryBlock> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = BlockList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);
    }

    #[test]
    fn test_push_back_tracks_ends() {
        let mut list = BlockList::new();
        list.push_back(MemoryBlock::new(0, 10));
        assert_eq!(list.first(), list.last());
        assert_eq!(list.first(), Some(&MemoryBlock::new(0, 10)));

        list.push_back(MemoryBlock::new(10, 5));
        assert_eq!(list.first(), Some(&MemoryBlock::new(0, 10)));
        assert_eq!(list.last(), Some(&MemoryBlock::new(10, 5)));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_push_front_tracks_ends() {
        let mut list = BlockList::new();
        list.push_front(MemoryBlock::new(10, 5));
        assert_eq!(list.first(), list.last());

        list.push_front(MemoryBlock::new(0, 10));
        assert_eq!(list.first(), Some(&MemoryBlock::new(0, 10)));
        assert_eq!(list.last(), Some(&MemoryBlock::new(10, 5)));
    }

    #[test]
    fn test_insert_at_ends_and_interior() {
        let mut list = BlockList::new();
        list.insert_at(0, MemoryBlock::new(2, 1)).unwrap();
        list.insert_at(0, MemoryBlock::new(0, 1)).unwrap();
        list.insert_at(2, MemoryBlock::new(3, 1)).unwrap();
        list.insert_at(1, MemoryBlock::new(1, 1)).unwrap();

        let bases: Vec<_> = list.iter().map(|block| block.base_address).collect();
        assert_eq!(bases, vec![0, 1, 2, 3]);
        assert_eq!(list.last(), Some(&MemoryBlock::new(3, 1)));
    }

    #[test]
    fn test_insert_at_past_end_is_rejected() {
        let mut list = BlockList::new();
        let err = list.insert_at(1, MemoryBlock::new(0, 1)).unwrap_err();
        assert!(matches!(err, BlockListError::OutOfRange { index: 1, len: 0, .. }));
    }

    #[test]
    fn test_block_at_bounds() {
        let mut list = BlockList::new();
        assert!(matches!(
            list.block_at(0),
            Err(BlockListError::OutOfRange { .. })
        ));

        list.push_back(MemoryBlock::new(0, 10));
        list.push_back(MemoryBlock::new(10, 5));
        assert_eq!(list.block_at(0).unwrap(), &MemoryBlock::new(0, 10));
        assert_eq!(list.block_at(1).unwrap(), &MemoryBlock::new(10, 5));
        // The past-the-end position is not an element.
        assert!(matches!(
            list.block_at(2),
            Err(BlockListError::OutOfRange { index: 2, len: 2, .. })
        ));
    }

    #[test]
    fn test_index_of_first_match() {
        let mut list = BlockList::new();
        list.push_back(MemoryBlock::new(0, 10));
        list.push_back(MemoryBlock::new(10, 5));
        list.push_back(MemoryBlock::new(0, 10));

        assert_eq!(list.index_of(&MemoryBlock::new(0, 10)), Some(0));
        assert_eq!(list.index_of(&MemoryBlock::new(10, 5)), Some(1));
        assert_eq!(list.index_of(&MemoryBlock::new(99, 1)), None);
    }

    #[test]
    fn test_remove_at_each_position() {
        let make = || -> BlockList {
            [
                MemoryBlock::new(0, 1),
                MemoryBlock::new(1, 1),
                MemoryBlock::new(2, 1),
            ]
            .into_iter()
            .collect()
        };

        let mut list = make();
        assert_eq!(list.remove_at(0).unwrap(), MemoryBlock::new(0, 1));
        assert_eq!(list.first(), Some(&MemoryBlock::new(1, 1)));

        let mut list = make();
        assert_eq!(list.remove_at(1).unwrap(), MemoryBlock::new(1, 1));
        assert_eq!(blocks(&list), vec![MemoryBlock::new(0, 1), MemoryBlock::new(2, 1)]);

        let mut list = make();
        assert_eq!(list.remove_at(2).unwrap(), MemoryBlock::new(2, 1));
        assert_eq!(list.last(), Some(&MemoryBlock::new(1, 1)));

        let mut list = make();
        assert!(matches!(
            list.remove_at(3),
            Err(BlockListError::OutOfRange { index: 3, len: 3, .. })
        ));
    }

    #[test]
    fn test_remove_last_element_clears_both_ends() {
        let mut list = BlockList::new();
        list.push_back(MemoryBlock::new(0, 1));
        assert_eq!(list.remove_at(0).unwrap(), MemoryBlock::new(0, 1));
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list.last(), None);

        // The list is fully usable again afterwards.
        list.push_back(MemoryBlock::new(5, 2));
        assert_eq!(list.first(), list.last());
    }

    #[test]
    fn test_remove_block_by_value() {
        let mut list = BlockList::new();
        list.push_back(MemoryBlock::new(0, 10));
        list.push_back(MemoryBlock::new(10, 5));

        assert_eq!(
            list.remove_block(&MemoryBlock::new(10, 5)).unwrap(),
            MemoryBlock::new(10, 5)
        );
        let err = list.remove_block(&MemoryBlock::new(10, 5)).unwrap_err();
        assert!(matches!(err, BlockListError::UnknownBlock { .. }));
    }

    #[test]
    fn test_remove_node_by_handle_ignores_equal_values() {
        let mut list = BlockList::new();
        let first = list.push_back(MemoryBlock::new(0, 10));
        let duplicate = list.push_back(MemoryBlock::new(0, 10));

        // Removing through the second handle must leave the first node
        // alone even though the values compare equal.
        assert_eq!(list.remove_node(duplicate), Some(MemoryBlock::new(0, 10)));
        assert_eq!(list.len(), 1);
        assert_eq!(list.node_at(0).unwrap(), first);
    }

    #[test]
    fn test_remove_node_on_empty_list_is_noop() {
        let mut list = BlockList::new();
        let handle = list.push_back(MemoryBlock::new(0, 1));
        list.remove_node(handle);
        assert_eq!(list.remove_node(handle), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_stale_handle_does_not_alias_recycled_slot() {
        let mut list = BlockList::new();
        let stale = list.push_back(MemoryBlock::new(0, 1));
        list.remove_node(stale);

        // The new node reuses the vacated slot; the old handle must not
        // reach it.
        let fresh = list.push_back(MemoryBlock::new(7, 1));
        assert_ne!(stale, fresh);
        assert_eq!(list.remove_node(stale), None);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_head_updates_first() {
        let mut list = BlockList::new();
        let head = list.push_back(MemoryBlock::new(0, 1));
        list.push_back(MemoryBlock::new(1, 1));

        assert_eq!(list.remove_node(head), Some(MemoryBlock::new(0, 1)));
        assert_eq!(list.first(), Some(&MemoryBlock::new(1, 1)));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_iter_is_restartable() {
        let list: BlockList = [MemoryBlock::new(0, 1), MemoryBlock::new(1, 1)]
            .into_iter()
            .collect();

        let first_pass: Vec<_> = list.iter().copied().collect();
        let second_pass: Vec<_> = list.iter().copied().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(list.iter().len(), 2);
    }

    #[test]
    fn test_cursor_mutates_in_place() {
        let mut list = BlockList::new();
        list.push_back(MemoryBlock::new(250, 20));

        let mut cursor = list.cursor_front_mut();
        let block = cursor.current_mut().unwrap();
        block.base_address += 17;
        block.length -= 17;

        assert_eq!(blocks(&list), vec![MemoryBlock::new(267, 3)]);
    }

    #[test]
    fn test_cursor_remove_current_keeps_traversal_valid() {
        let mut list: BlockList = [
            MemoryBlock::new(0, 1),
            MemoryBlock::new(1, 1),
            MemoryBlock::new(2, 1),
        ]
        .into_iter()
        .collect();

        let mut cursor = list.cursor_front_mut();
        cursor.move_next();
        assert_eq!(cursor.remove_current(), Some(MemoryBlock::new(1, 1)));
        // The cursor now sits on the element that followed the removed one.
        assert_eq!(cursor.current(), Some(&MemoryBlock::new(2, 1)));
        cursor.move_next();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.remove_current(), None);

        assert_eq!(blocks(&list), vec![MemoryBlock::new(0, 1), MemoryBlock::new(2, 1)]);
    }

    #[test]
    fn test_cursor_remove_tail_updates_last() {
        let mut list: BlockList = [MemoryBlock::new(0, 1), MemoryBlock::new(1, 1)]
            .into_iter()
            .collect();

        let mut cursor = list.cursor_front_mut();
        cursor.move_next();
        cursor.remove_current();
        assert_eq!(list.last(), Some(&MemoryBlock::new(0, 1)));

        list.push_back(MemoryBlock::new(9, 1));
        assert_eq!(blocks(&list), vec![MemoryBlock::new(0, 1), MemoryBlock::new(9, 1)]);
    }

    #[test]
    fn test_display_renders_blocks_in_order() {
        let list: BlockList = [MemoryBlock::new(0, 10), MemoryBlock::new(10, 5)]
            .into_iter()
            .collect();
        assert_eq!(list.to_string(), "(0, 10) (10, 5)");
        assert_eq!(BlockList::new().to_string(), "");
    }

    #[test]
    fn test_equality_ignores_arena_history() {
        let mut churned = BlockList::new();
        churned.push_back(MemoryBlock::new(99, 1));
        churned.remove_at(0).unwrap();
        churned.push_back(MemoryBlock::new(0, 10));

        let plain: BlockList = [MemoryBlock::new(0, 10)].into_iter().collect();
        assert_eq!(churned, plain);
        assert_ne!(churned, BlockList::new());
    }
}
