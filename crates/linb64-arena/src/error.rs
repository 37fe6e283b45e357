//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::handle::Epoch;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The runtime refused to extend the region. Fatal for the request
    /// that triggered the allocation.
    GrowthRefused {
        /// Page count the allocation would have required.
        requested_pages: u64,
        /// Page count of the region before the attempt.
        current_pages: u32,
        /// Largest page count the runtime grants.
        max_pages: u32,
    },
    /// `offset + requested` does not fit the 32-bit address space.
    AddressOverflow {
        /// Next free offset at the time of the request.
        offset: u32,
        /// Requested allocation length in bytes.
        requested: usize,
    },
    /// A [`Block`](crate::Block) from an epoch that has been replaced.
    StaleBlock {
        /// The epoch encoded in the block.
        block_epoch: Epoch,
        /// The arena's current epoch.
        current_epoch: Epoch,
    },
    /// A range that lies outside the region.
    OutOfBounds {
        /// Start of the range.
        offset: u32,
        /// Length of the range.
        len: u32,
        /// Current region capacity in bytes.
        capacity: usize,
    },
    /// The arena configuration violates a documented invariant.
    InvalidConfig {
        /// Human-readable description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthRefused {
                requested_pages,
                current_pages,
                max_pages,
            } => {
                write!(
                    f,
                    "memory growth refused: need {requested_pages} pages, have {current_pages}, limit {max_pages}"
                )
            }
            Self::AddressOverflow { offset, requested } => {
                write!(
                    f,
                    "address overflow: {requested} bytes at offset {offset} exceed the 32-bit address space"
                )
            }
            Self::StaleBlock {
                block_epoch,
                current_epoch,
            } => {
                write!(
                    f,
                    "stale block: epoch {block_epoch}, current epoch {current_epoch}"
                )
            }
            Self::OutOfBounds {
                offset,
                len,
                capacity,
            } => {
                write!(
                    f,
                    "range {offset}+{len} out of bounds for region of {capacity} bytes"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
