//! Scoped block acquisition.

use crate::arena::Arena;
use crate::handle::{Block, Epoch};

/// A block that is released when dropped.
///
/// Created by [`Arena::lease`] or [`Arena::with_lease`]. Holds the arena's
/// only mutable borrow, so nothing else can allocate, grow, or replace the
/// region while the lease is alive, and the block is freed on every exit
/// path.
#[must_use]
pub struct Lease<'a> {
    arena: &'a mut Arena,
    block: Block,
}

impl<'a> Lease<'a> {
    pub(crate) fn new(arena: &'a mut Arena, block: Block) -> Self {
        Self { arena, block }
    }

    /// The leased block.
    pub fn block(&self) -> Block {
        self.block
    }

    /// Epoch of the leased block (always the arena's current epoch).
    pub fn epoch(&self) -> Epoch {
        self.block.epoch
    }

    /// The block's bytes.
    ///
    /// The region cannot shrink or be replaced while the lease exists, so
    /// the block is always in bounds.
    pub fn bytes(&self) -> &[u8] {
        let start = self.block.offset as usize;
        &self.arena.region.as_slice()[start..start + self.block.len as usize]
    }

    /// The block's bytes, mutably.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        let start = self.block.offset as usize;
        &mut self.arena.region.as_mut_slice()[start..start + self.block.len as usize]
    }

    /// The whole region, for routines that take absolute addresses.
    pub fn memory(&self) -> &[u8] {
        self.arena.region.as_slice()
    }

    /// The whole region, mutably.
    pub fn memory_mut(&mut self) -> &mut [u8] {
        self.arena.region.as_mut_slice()
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        let _ = self.arena.free(self.block);
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::Arena;
    use crate::config::ArenaConfig;

    #[test]
    fn lease_released_on_drop() {
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        {
            let mut lease = arena.lease(16).unwrap();
            lease.bytes_mut().fill(7);
            assert_eq!(lease.bytes(), &[7; 16]);
        }
        assert!(arena.live_marks().is_empty());
    }

    #[test]
    fn nested_scopes_follow_stack_order() {
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        let outer = arena.allocate(8).unwrap();
        let inner_offset = arena
            .with_lease(32, |lease| {
                lease.bytes_mut()[0] = 1;
                lease.block().offset()
            })
            .unwrap();
        assert_eq!(inner_offset, 8);
        assert_eq!(arena.live_marks(), vec![8]);
        assert!(arena.free(outer).is_released());
    }

    #[test]
    fn lease_released_when_closure_errors() {
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        let result: Result<Result<(), &str>, _> =
            arena.with_lease(64, |_lease| Err("populate failed"));
        assert_eq!(result.unwrap(), Err("populate failed"));
        assert!(arena.live_marks().is_empty());
    }

    #[test]
    fn memory_addresses_match_block_offsets() {
        let mut arena = Arena::new(ArenaConfig::default()).unwrap();
        let _pad = arena.allocate(100).unwrap();
        let mut lease = arena.lease(4).unwrap();
        let addr = lease.block().offset() as usize;
        lease.memory_mut()[addr..addr + 4].copy_from_slice(b"wxyz");
        assert_eq!(lease.bytes(), b"wxyz");
    }
}
