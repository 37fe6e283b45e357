//! linb64: base64 transcoding through a shared linear memory arena.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the linb64 sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use linb64::prelude::*;
//!
//! let mut bridge = Base64Bridge::new().unwrap();
//! assert_eq!(bridge.from_bytes(&[0x00]).unwrap(), "AA==");
//! assert_eq!(bridge.to_bytes("AA==").unwrap(), vec![0x00]);
//! assert!(bridge.arena().live_marks().is_empty());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `linb64-arena` | `Arena`, `Block`, `Lease`, epochs and reclamation |
//! | [`codec`] | `linb64-codec` | `Base64Bridge`, layouts, the `Transcode` boundary |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Linear memory arena (`linb64-arena`).
pub use linb64_arena as arena;

/// Buffer-layout protocol and codec bridge (`linb64-codec`).
pub use linb64_codec as codec;

/// Common imports for using the bridge.
pub mod prelude {
    pub use linb64_arena::{Arena, ArenaConfig, ArenaError, Block, Epoch, FreeOutcome, Lease};
    pub use linb64_codec::{
        Base64Bridge, CodecConfig, CodecError, LoadError, ModuleLoader, ScalarLoader, Transcode,
    };
}
