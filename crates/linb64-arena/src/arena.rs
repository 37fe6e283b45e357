//! The arena orchestrator.
//!
//! [`Arena`] owns one [`LinearRegion`] and the [`BoundaryStack`] of the
//! current epoch. It hands out epoch-tagged [`Block`]s, grows the region in
//! whole pages, and replaces the region wholesale once it has grown past the
//! reclamation threshold.
//!
//! The lifecycle of a region is:
//! 1. `Active`: `allocate()` and `free()` operate on it; growth keeps the
//!    epoch.
//! 2. `ScheduledForReset`: a `free()` observed capacity at or above
//!    [`ArenaConfig::reclaim_threshold`]. The region stays current.
//! 3. `settle()` fires the reset: a fresh region and an empty boundary
//!    stack under the next epoch. The old epoch is retired and every
//!    block from it is inert.

use tracing::{debug, info, trace};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::handle::{Block, Epoch};
use crate::lease::Lease;
use crate::marks::{BoundaryStack, Release};
use crate::region::LinearRegion;

/// Outcome of [`Arena::free`].
///
/// None of these are errors: a free that cannot be matched leaks until the
/// region is replaced, which the reclamation threshold bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FreeOutcome {
    /// The block's boundary was released.
    Released,
    /// The block belongs to a retired epoch; nothing was touched.
    Retired,
    /// The block is from the current epoch but no outstanding allocation
    /// matches it (double free or forged handle).
    Unmatched,
}

impl FreeOutcome {
    /// Whether the block's boundary was actually released.
    pub fn is_released(self) -> bool {
        self == Self::Released
    }
}

/// Point-in-time arena statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaStats {
    /// Current epoch.
    pub epoch: Epoch,
    /// Region size in pages.
    pub pages: u32,
    /// Region size in bytes.
    pub capacity: usize,
    /// Address where the next allocation would start.
    pub used: u32,
    /// Outstanding allocations in the current epoch.
    pub live_blocks: usize,
    /// Growth operations in the current epoch.
    pub grow_count: u64,
    /// Region replacements since the arena was created.
    pub replacements: u64,
    /// Whether a replacement is scheduled but has not fired yet.
    pub reset_pending: bool,
}

/// Single-region linear memory arena with epoch-based reclamation.
///
/// Not thread-safe by design: all mutation goes through `&mut self`, so a
/// [`Lease`] (which holds the only mutable borrow) structurally prevents any
/// other allocation, growth, or replacement while it is alive.
pub struct Arena {
    pub(crate) region: LinearRegion,
    pub(crate) marks: BoundaryStack,
    epoch: Epoch,
    reset_pending: bool,
    replacements: u64,
    config: ArenaConfig,
}

impl Arena {
    /// Create an arena with a fresh region of `config.initial_pages` pages.
    ///
    /// Returns `Err(ArenaError::InvalidConfig)` if the configuration
    /// violates an invariant documented on [`ArenaConfig`].
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config
            .validate()
            .map_err(|reason| ArenaError::InvalidConfig { reason })?;
        let region = Self::fresh_region(&config)?;
        Ok(Self {
            region,
            marks: BoundaryStack::new(),
            epoch: Epoch::default(),
            reset_pending: false,
            replacements: 0,
            config,
        })
    }

    fn fresh_region(config: &ArenaConfig) -> Result<LinearRegion, ArenaError> {
        LinearRegion::new(config.page_size, config.initial_pages, config.max_pages)
    }

    /// Allocate `len` bytes at the top of the boundary stack.
    ///
    /// Grows the region by the minimum whole number of pages if the
    /// allocation does not fit. Growth keeps the epoch: blocks stay valid,
    /// only previously borrowed slices die (which the borrow checker
    /// already rules out).
    pub fn allocate(&mut self, len: usize) -> Result<Block, ArenaError> {
        let offset = self.marks.top();
        let end = u32::try_from(len)
            .ok()
            .and_then(|len| offset.checked_add(len))
            .ok_or(ArenaError::AddressOverflow {
                offset,
                requested: len,
            })?;

        let added = self.region.ensure(u64::from(end))?;
        if added > 0 {
            debug!(
                epoch = %self.epoch,
                added_pages = added,
                capacity = self.region.capacity(),
                "grew linear memory"
            );
        }

        let (slot, ticket) = self.marks.push(end);
        Ok(Block::new(self.epoch, slot, ticket, offset, end - offset))
    }

    /// Release a block.
    ///
    /// A block from a retired epoch is ignored. A current-epoch block
    /// releases its boundary record in O(1). Afterwards, if the region has
    /// reached the reclamation threshold, a replacement is scheduled; it
    /// fires on the next [`settle`](Self::settle).
    pub fn free(&mut self, block: Block) -> FreeOutcome {
        if block.epoch != self.epoch {
            trace!(%block, current_epoch = %self.epoch, "free of retired block ignored");
            return FreeOutcome::Retired;
        }

        let outcome = match self.marks.release(block.slot, block.ticket) {
            Release::Released => FreeOutcome::Released,
            Release::Unmatched => {
                trace!(%block, "free matched no outstanding allocation");
                FreeOutcome::Unmatched
            }
        };

        if !self.reset_pending && self.region.capacity() >= self.config.reclaim_threshold {
            self.reset_pending = true;
            info!(
                epoch = %self.epoch,
                capacity = self.region.capacity(),
                threshold = self.config.reclaim_threshold,
                "linear memory scheduled for replacement"
            );
        }
        outcome
    }

    /// Fire a scheduled replacement, if any.
    ///
    /// Call this at points where no block of the current epoch is in use.
    /// Returns whether a replacement happened.
    pub fn settle(&mut self) -> Result<bool, ArenaError> {
        if !self.reset_pending {
            return Ok(false);
        }
        self.replace()?;
        Ok(true)
    }

    /// Replace the region immediately.
    ///
    /// Installs a fresh region and an empty boundary stack under the next
    /// epoch. On failure the current region stays in place.
    pub fn replace(&mut self) -> Result<(), ArenaError> {
        let region = Self::fresh_region(&self.config)?;
        let retired = std::mem::replace(&mut self.region, region);
        let abandoned = self.marks.live_count();
        self.marks = BoundaryStack::new();
        let old_epoch = self.epoch;
        self.epoch = self.epoch.next();
        self.reset_pending = false;
        self.replacements += 1;
        info!(
            retired_epoch = %old_epoch,
            epoch = %self.epoch,
            retired_capacity = retired.capacity(),
            abandoned_blocks = abandoned,
            "linear memory replaced"
        );
        Ok(())
    }

    /// Check that `block` belongs to the current epoch.
    pub fn check(&self, block: &Block) -> Result<(), ArenaError> {
        if block.epoch == self.epoch {
            Ok(())
        } else {
            Err(ArenaError::StaleBlock {
                block_epoch: block.epoch,
                current_epoch: self.epoch,
            })
        }
    }

    /// Borrow the bytes of a current-epoch block.
    pub fn bytes(&self, block: &Block) -> Result<&[u8], ArenaError> {
        self.check(block)?;
        self.region.slice(block.offset, block.len)
    }

    /// Mutably borrow the bytes of a current-epoch block.
    pub fn bytes_mut(&mut self, block: &Block) -> Result<&mut [u8], ArenaError> {
        self.check(block)?;
        self.region.slice_mut(block.offset, block.len)
    }

    /// The whole region, addressed absolutely.
    pub fn memory(&self) -> &[u8] {
        self.region.as_slice()
    }

    /// The whole region, mutably.
    pub fn memory_mut(&mut self) -> &mut [u8] {
        self.region.as_mut_slice()
    }

    /// Allocate a block that is released when the returned guard drops.
    pub fn lease(&mut self, len: usize) -> Result<Lease<'_>, ArenaError> {
        let block = self.allocate(len)?;
        Ok(Lease::new(self, block))
    }

    /// Run `f` with a leased block of `len` bytes, releasing it afterwards.
    ///
    /// The closure cannot reach the arena other than through the lease, so
    /// no other allocation or growth can happen inside it.
    pub fn with_lease<R>(
        &mut self,
        len: usize,
        f: impl FnOnce(&mut Lease<'_>) -> R,
    ) -> Result<R, ArenaError> {
        let mut lease = self.lease(len)?;
        Ok(f(&mut lease))
    }

    /// Current epoch.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Region size in bytes.
    pub fn capacity(&self) -> usize {
        self.region.capacity()
    }

    /// Region size in pages.
    pub fn pages(&self) -> u32 {
        self.region.pages()
    }

    /// End addresses of outstanding allocations in allocation order.
    pub fn live_marks(&self) -> Vec<u32> {
        self.marks.live_marks()
    }

    /// Whether a replacement is scheduled but has not fired.
    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// The configuration this arena was created with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Snapshot of the arena's counters.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            epoch: self.epoch,
            pages: self.region.pages(),
            capacity: self.region.capacity(),
            used: self.marks.top(),
            live_blocks: self.marks.live_count(),
            grow_count: self.region.grow_count(),
            replacements: self.replacements,
            reset_pending: self.reset_pending,
        }
    }
}
