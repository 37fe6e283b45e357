//! Test utilities and mock transcode modules for linb64 development.
//!
//! Provides modules that record how the codec drives them and check the
//! memory contract on every call, plus loaders that count or refuse
//! instantiations.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{Call, FailingLoader, RecordingLoader, RecordingModule};

/// Deterministic pseudo-random payload of `len` bytes.
pub fn payload(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}
