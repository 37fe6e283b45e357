//! Epochs and block handles.
//!
//! A [`Block`] is a lease on a byte range of the arena. It is epoch-scoped:
//! the `epoch` field allows O(1) staleness checks against the arena's
//! current epoch, and `slot` + `ticket` locate and identify the boundary
//! record without searching.

use std::fmt;

/// Generation counter of an [`Arena`](crate::Arena).
///
/// Starts at zero and is incremented each time the backing region is
/// replaced. Blocks from an older epoch are inert. The counter is 64-bit so
/// an epoch value is never handed out twice; it saturates at `u64::MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Epoch(pub u64);

impl Epoch {
    /// The epoch following this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Epoch {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Location and identity of an allocation within the arena.
///
/// Offsets are absolute addresses in the linear region, the same numbers
/// an external module operating on the region would use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Block {
    /// Arena epoch when this allocation was made.
    pub(crate) epoch: Epoch,
    /// Index of the boundary record in the arena's stack.
    pub(crate) slot: u32,
    /// Per-epoch allocation serial, distinguishes reuse of the same slot.
    pub(crate) ticket: u32,
    /// Start address of the allocation.
    pub(crate) offset: u32,
    /// Length of the allocation in bytes.
    pub(crate) len: u32,
}

impl Block {
    pub(crate) fn new(epoch: Epoch, slot: u32, ticket: u32, offset: u32, len: u32) -> Self {
        Self {
            epoch,
            slot,
            ticket,
            offset,
            len,
        }
    }

    /// The epoch this block belongs to.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Start address within the region.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exclusive end address, the boundary mark this block recorded.
    pub fn end(&self) -> u32 {
        self.offset + self.len
    }

    /// Absolute address of byte `at` within this block.
    pub fn addr(&self, at: u32) -> u32 {
        self.offset + at
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block(epoch={}, slot={}, off={}, len={})",
            self.epoch, self.slot, self.offset, self.len
        )
    }
}
