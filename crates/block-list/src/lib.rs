//! An ordered list of memory-block descriptors.
//!
//! `BlockList` is a singly-linked, ordered sequence of [`MemoryBlock`]
//! values, the bookkeeping structure underneath a simulated memory space.
//! The nodes live in an arena owned by the list and are addressed through
//! stable [`NodeHandle`]s, so no node is ever aliased or shared between
//! lists.
//!
//! # Features
//!
//! - **O(1) end insertion**: [`push_front`](BlockList::push_front) and
//!   [`push_back`](BlockList::push_back) splice at the head/tail without
//!   scanning
//! - **Positional and value access**: blocks can be looked up and removed
//!   by index or by value equality
//! - **Stable handles**: every node is addressed by a generational handle
//!   that can never alias a recycled slot
//! - **Mutating cursor**: [`CursorMut`] supports the
//!   inspect-current/remove-current/advance sequence a first-fit scan
//!   needs
//! - **No-std support**: usable in `no_std` environments (requires
//!   `alloc`)
//!
//! # Examples
//!
//! ```
//! use block_list::{BlockList, MemoryBlock};
//!
//! let mut list = BlockList::new();
//! list.push_back(MemoryBlock::new(0, 10));
//! list.push_back(MemoryBlock::new(10, 5));
//! list.push_front(MemoryBlock::new(40, 8));
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.index_of(&MemoryBlock::new(10, 5)), Some(2));
//!
//! // Remove the first block whose length is below 8.
//! let mut cursor = list.cursor_front_mut();
//! while let Some(block) = cursor.current() {
//!     if block.length < 8 {
//!         cursor.remove_current();
//!         break;
//!     }
//!     cursor.move_next();
//! }
//! assert_eq!(list.len(), 2);
//! ```
//!
//! # Performance
//!
//! - Head/tail insertion: O(1)
//! - Positional lookup, insertion, and removal: O(index)
//! - Value lookup and removal: O(n)
//! - Iteration: O(1) per element

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod block;
mod list;

pub use self::{
    block::MemoryBlock,
    list::{BlockList, BlockListError, CursorMut, Iter, NodeHandle},
};
