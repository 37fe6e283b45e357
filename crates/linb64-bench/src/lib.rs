//! Benchmark profiles for the linb64 transcoding bridge.
//!
//! - [`PAYLOAD_SIZES`]: request sizes from sub-batch to multi-page
//! - [`payload`]: deterministic input bytes (from `linb64-test-utils`)
//! - [`warm_bridge`]: a bridge whose arena has already grown for `len`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use linb64_codec::{Base64Bridge, CodecError};

pub use linb64_test_utils::payload;

/// Payload sizes exercised by the codec benchmarks.
///
/// 64 B fits one batch, 4 KiB is one batch of text, 64 KiB forces growth
/// past the first page, 512 KiB crosses the reclamation threshold.
pub const PAYLOAD_SIZES: [usize; 4] = [64, 4 * 1024, 64 * 1024, 512 * 1024];

/// Build a default bridge and run one encode of `len` bytes so the arena
/// has already grown (or been scheduled for replacement) before timing.
pub fn warm_bridge(len: usize) -> Result<Base64Bridge, CodecError> {
    let mut bridge = Base64Bridge::new()?;
    bridge.from_bytes(&payload(len, 0))?;
    Ok(bridge)
}
