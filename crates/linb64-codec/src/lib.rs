//! Base64 buffer-layout protocol over a shared linear memory arena.
//!
//! Converts bytes to padded base64 text and back by staging each request in
//! a [`linb64_arena::Arena`] block and handing absolute offsets to a
//! [`Transcode`] module that works in place on the region.
//!
//! ```
//! use linb64_codec::Base64Bridge;
//!
//! let mut bridge = Base64Bridge::new().unwrap();
//! let text = bridge.from_bytes(b"linear").unwrap();
//! assert_eq!(text, "bGluZWFy");
//! assert_eq!(bridge.to_bytes(&text).unwrap(), b"linear");
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bridge;
pub mod capability;
pub mod config;
pub mod error;
pub mod layout;
pub mod scalar;
pub mod text;

pub use bridge::{decoded_len, encoded_len, Base64Bridge};
pub use capability::{ModuleLoader, Transcode};
pub use config::CodecConfig;
pub use error::{CodecError, LoadError};
pub use layout::{DecodeLayout, EncodeLayout};
pub use scalar::{ScalarLoader, ScalarModule};
