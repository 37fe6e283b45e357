//! The transcode capability boundary.
//!
//! A transcode module is an external routine that works purely in place on
//! the shared region, addressed by absolute offsets. It cannot allocate,
//! grow, or report failure: the codec validates every offset it passes.
//! A module loader produces modules bound to one epoch of the arena.

use linb64_arena::Epoch;

use crate::error::LoadError;

/// In-place base64 transcoding over a linear memory region.
///
/// Implementations may read past the logical input by up to the margin
/// their loader documents; they must not write outside the ranges
/// described below. Any violation is a fault of the module, reported by
/// panicking.
pub trait Transcode {
    /// Encode bytes `[src_start, src_end)` to base64 symbols starting at
    /// `dst_start`. Writes one whole 4-symbol group per started 3-byte
    /// group; the trailing group's padding positions are unspecified.
    fn encode(&mut self, memory: &mut [u8], src_start: u32, src_end: u32, dst_start: u32);

    /// Decode symbols `[start, end)` in place: the decoded bytes are
    /// written from `start` onwards.
    fn decode(&mut self, memory: &mut [u8], start: u32, end: u32);
}

impl<T: Transcode + ?Sized> Transcode for Box<T> {
    fn encode(&mut self, memory: &mut [u8], src_start: u32, src_end: u32, dst_start: u32) {
        (**self).encode(memory, src_start, src_end, dst_start)
    }

    fn decode(&mut self, memory: &mut [u8], start: u32, end: u32) {
        (**self).decode(memory, start, end)
    }
}

/// Produces transcode modules bound to an arena epoch.
///
/// The bridge instantiates once up front and again whenever the arena has
/// replaced its region, discarding the module bound to the retired epoch.
pub trait ModuleLoader {
    /// The module type this loader produces.
    type Module: Transcode;

    /// Smallest zeroed margin after the encode payload the module tolerates.
    ///
    /// An encoder reading whole 3-byte groups overreads at most 2 bytes.
    const ENCODE_MARGIN: usize = 2;

    /// Smallest spare region after the decode symbols the module tolerates.
    const DECODE_MARGIN: usize = 16;

    /// Instantiate a module for the region of `epoch`.
    fn instantiate(&self, epoch: Epoch) -> Result<Self::Module, LoadError>;
}

/// A module together with the epoch it was instantiated for.
pub(crate) struct BoundModule<M> {
    pub(crate) epoch: Epoch,
    pub(crate) module: M,
}
