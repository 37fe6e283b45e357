//! Epoch-tagged linear memory arena for the linb64 transcoding bridge.
//!
//! Provides a single growable byte region shared with an external routine
//! that addresses it by absolute offset and can neither allocate nor grow
//! it. The arena hands out generation-tagged blocks, grows the region in
//! whole pages, and bounds growth by replacing the region wholesale.
//!
//! # Architecture
//!
//! ```text
//! Arena (orchestrator, one epoch at a time)
//! ├── LinearRegion (Vec<u8>, whole 64 KiB pages, grow-only)
//! ├── BoundaryStack (end address per allocation, allocation order)
//! └── Epoch (bumped on every replacement)
//!
//! Block { epoch, slot, ticket, offset, len }   (Copy handle)
//! Lease<'a> (&mut Arena + Block, frees on drop)
//! ```
//!
//! # Reclamation
//!
//! Freed space is only reused when frees follow stack order. Once the region
//! reaches [`ArenaConfig::reclaim_threshold`], the next `free` schedules a
//! replacement, which fires on [`Arena::settle`]. Blocks from the retired
//! epoch are then inert: freeing them is a no-op, viewing them is an error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod handle;
pub mod lease;
pub mod marks;
pub mod region;

// Public re-exports for the primary API surface.
pub use arena::{Arena, ArenaStats, FreeOutcome};
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use handle::{Block, Epoch};
pub use lease::Lease;
