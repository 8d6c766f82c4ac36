//! A simulated, word-addressed memory space under explicit allocation.
//!
//! [`MemorySpace`] models what a simple heap allocator does without
//! touching real memory: it tracks address ranges as integers, split
//! between a free list and an allocated list. Nothing is read or
//! written at those addresses.
//!
//! # Algorithm
//!
//! - **Allocation** scans the free list in list order and takes the
//!   first block large enough (**first-fit**, not best-fit). An exact
//!   fit consumes the free block; a larger block is split by shrinking
//!   it from the front.
//! - **Release** moves the block starting at the given address back to
//!   the free list as-is, without merging.
//! - **Coalescing** is a separate, explicitly invoked pass that merges
//!   physically adjacent free blocks. Fragmentation from many small
//!   holes is the accepted cost of first-fit; coalescing is the
//!   mitigation, typically run when an allocation comes back empty.
//!
//! # Examples
//!
//! ```
//! use memory_space::MemorySpace;
//!
//! let mut space = MemorySpace::new(100);
//! assert_eq!(space.allocate(20), Some(0));
//! assert_eq!(space.allocate(80), Some(20));
//!
//! // The space is exhausted now.
//! assert_eq!(space.allocate(1), None);
//!
//! space.release(0)?;
//! space.coalesce();
//! assert_eq!(space.allocate(10), Some(0));
//! # Ok::<(), memory_space::ReleaseError>(())
//! ```
//!
//! # Performance Characteristics
//!
//! - Allocation and release: O(n) in the length of the scanned list
//! - Coalescing: O(n log n) (sort by base address, one merging pass)
//!
//! # Thread Safety
//!
//! A `MemorySpace` is a plain owned value with no interior mutability;
//! concurrent use requires external serialization (one mutex around the
//! whole space), since interleaving `allocate` with `release` or
//! `coalesce` would break the list invariants.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use block_list::{BlockList, Iter};
use log::{debug, trace, warn};
use snafu::{Location, Snafu, ensure};

pub use block_list::MemoryBlock;

/// The error returned when [`MemorySpace::release`] is called while
/// nothing is allocated.
#[derive(Debug, Snafu)]
#[snafu(display("release called with no allocated blocks"))]
pub struct ReleaseError {
    #[snafu(implicit)]
    location: Location,
}

/// A managed memory space of a fixed word count.
///
/// The space owns two [`BlockList`]s: the blocks currently free and the
/// blocks currently allocated. Together they always cover the full
/// range `[0, max_size)`; every word is in exactly one list.
///
/// Addresses are plain `usize` offsets into the simulated space; the
/// failure of [`allocate`](Self::allocate) is `None`, never an error.
pub struct MemorySpace {
    free: BlockList,
    allocated: BlockList,
    max_size: usize,
}

impl MemorySpace {
    /// Creates a memory space of `max_size` words, all of it initially
    /// free as the single block `(0, max_size)`.
    ///
    /// # Panics
    ///
    /// Panics if `max_size` is zero.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        assert!(max_size > 0, "a memory space must cover at least one word");
        let mut free = BlockList::new();
        free.push_back(MemoryBlock::new(0, max_size));
        trace!("new memory space of {max_size} words");
        Self {
            free,
            allocated: BlockList::new(),
            max_size,
        }
    }

    /// Returns the total number of words the space manages.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns an iterator over the currently free blocks, in list
    /// order.
    pub fn free_blocks(&self) -> Iter<'_> {
        self.free.iter()
    }

    /// Returns an iterator over the currently allocated blocks, in list
    /// order.
    pub fn allocated_blocks(&self) -> Iter<'_> {
        self.allocated.iter()
    }

    /// Allocates a block of `length` words and returns its base
    /// address, or `None` when no free block is large enough.
    ///
    /// The free list is scanned in list order and the first block of at
    /// least `length` words wins. An exact fit leaves the free list one
    /// block shorter; a larger block stays in place, shrunk from the
    /// front: for a request of 17 words against a free block
    /// `(250, 20)`, the caller gets address 250 and the free block
    /// becomes `(267, 3)`.
    ///
    /// A `None` return leaves both lists untouched. It is an expected
    /// outcome, not an error; callers may [`coalesce`](Self::coalesce)
    /// and retry.
    ///
    /// # Panics
    ///
    /// Panics if `length` is zero.
    #[must_use]
    pub fn allocate(&mut self, length: usize) -> Option<usize> {
        assert!(length > 0, "allocation length must be positive");

        let mut cursor = self.free.cursor_front_mut();
        let granted = loop {
            let Some(candidate) = cursor.current_mut() else {
                break None;
            };
            if candidate.length < length {
                cursor.move_next();
                continue;
            }
            let granted = MemoryBlock::new(candidate.base_address, length);
            if candidate.length == length {
                cursor.remove_current();
            } else {
                // Shrink the free region from the front; the remainder
                // stays free at the same list position.
                candidate.base_address += length;
                candidate.length -= length;
            }
            break Some(granted);
        };

        let Some(granted) = granted else {
            debug!("allocate({length}): no free block is large enough");
            return None;
        };
        self.allocated.push_back(granted);
        trace!("allocate({length}) -> {}", granted.base_address);
        Some(granted.base_address)
    }

    /// Releases the allocated block whose base address equals
    /// `address`, moving it unmerged to the end of the free list.
    ///
    /// An address that matches no allocated block is ignored (a release
    /// of an interior address, or of an address released before, does
    /// nothing); it is logged at `warn` level for diagnosis.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError`] when nothing is currently allocated.
    pub fn release(&mut self, address: usize) -> Result<(), ReleaseError> {
        ensure!(!self.allocated.is_empty(), ReleaseSnafu);

        let mut cursor = self.allocated.cursor_front_mut();
        let released = loop {
            let Some(block) = cursor.current() else {
                break None;
            };
            if block.base_address == address {
                break cursor.remove_current();
            }
            cursor.move_next();
        };

        match released {
            Some(block) => {
                self.free.push_back(block);
                trace!("release({address}): {block} is free again");
            }
            None => warn!("release({address}): no allocated block starts at this address"),
        }
        Ok(())
    }

    /// Merges every pair of physically adjacent free blocks, repeating
    /// until none remains.
    ///
    /// Adjacency means one block ends exactly where another begins;
    /// blocks separated by allocated words are left alone. The free
    /// list comes out ordered by base address.
    pub fn coalesce(&mut self) {
        let mut blocks: Vec<MemoryBlock> = self.free.iter().copied().collect();
        blocks.sort_unstable_by_key(|block| block.base_address);

        let mut iter = blocks.into_iter();
        let Some(mut current) = iter.next() else {
            return;
        };
        let before = self.free.len();
        let mut merged = BlockList::new();
        for block in iter {
            if current.precedes(&block) {
                current.length += block.length;
            } else {
                merged.push_back(current);
                current = block;
            }
        }
        merged.push_back(current);
        if merged.len() < before {
            trace!("coalesce: {before} free blocks merged into {}", merged.len());
        }
        self.free = merged;
    }
}

/// Renders the free list, a line break, then the allocated list, each
/// block as its `(base_address, length)` pair.
impl fmt::Display for MemorySpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.free)?;
        write!(f, "{}", self.allocated)
    }
}
