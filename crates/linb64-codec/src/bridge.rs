//! The codec bridge: bytes ⇄ base64 text through the shared arena.
//!
//! Each request runs one uninterrupted cycle:
//! 1. `settle()` the arena and rebind the module if the epoch changed
//! 2. lease a block sized by [`EncodeLayout`] / [`DecodeLayout`]
//! 3. stage the input, invoke the module on absolute offsets
//! 4. copy the result out, release the block (lease drop)

use linb64_arena::{Arena, ArenaConfig, Epoch};
use tracing::debug;

use crate::capability::{BoundModule, ModuleLoader, Transcode};
use crate::config::CodecConfig;
use crate::error::CodecError;
use crate::layout::{DecodeLayout, EncodeLayout};
use crate::scalar::ScalarLoader;
use crate::text;

/// Base64 codec that stages requests in an [`Arena`] for a transcode module.
///
/// Owns its arena, so the borrow checker guarantees no other code allocates
/// in the region between staging a request and copying its result out.
pub struct Base64Bridge<L: ModuleLoader = ScalarLoader> {
    arena: Arena,
    loader: L,
    bound: BoundModule<L::Module>,
    config: CodecConfig,
}

impl Base64Bridge<ScalarLoader> {
    /// Bridge with default arena and codec configuration and the scalar
    /// reference module.
    pub fn new() -> Result<Self, CodecError> {
        Self::with_loader(ArenaConfig::default(), ScalarLoader, CodecConfig::default())
    }
}

impl<L: ModuleLoader> Base64Bridge<L> {
    /// Create a bridge with a fresh arena, instantiating the module once.
    pub fn with_loader(
        arena_config: ArenaConfig,
        loader: L,
        config: CodecConfig,
    ) -> Result<Self, CodecError> {
        let arena = Arena::new(arena_config)?;
        Self::from_arena(arena, loader, config)
    }

    /// Create a bridge around an existing arena.
    pub fn from_arena(arena: Arena, loader: L, config: CodecConfig) -> Result<Self, CodecError> {
        config
            .validate(L::ENCODE_MARGIN, L::DECODE_MARGIN)
            .map_err(|reason| CodecError::InvalidConfig { reason })?;
        let epoch = arena.epoch();
        let module = loader.instantiate(epoch)?;
        Ok(Self {
            arena,
            loader,
            bound: BoundModule { epoch, module },
            config,
        })
    }

    /// Fire any scheduled arena replacement and make sure the module is
    /// bound to the current epoch.
    pub fn settle(&mut self) -> Result<(), CodecError> {
        self.arena.settle()?;
        let epoch = self.arena.epoch();
        if self.bound.epoch != epoch {
            debug!(retired = %self.bound.epoch, epoch = %epoch, "rebinding transcode module");
            let module = self.loader.instantiate(epoch)?;
            self.bound = BoundModule { epoch, module };
        }
        Ok(())
    }

    /// Encode `bytes` as padded base64 text.
    pub fn from_bytes(&mut self, bytes: &[u8]) -> Result<String, CodecError> {
        self.settle()?;

        let m = bytes.len();
        let layout = EncodeLayout::new(m, self.config.encode_margin);
        let block_len = layout
            .block_len()
            .ok_or(CodecError::InputTooLarge { len: m })?;

        let module = &mut self.bound.module;
        let mut lease = self.arena.lease(block_len)?;
        let block = lease.block();

        let staging = &mut lease.bytes_mut()[..layout.staging];
        staging[..m].copy_from_slice(bytes);
        staging[m..].fill(0);

        // The block fits in u32 address space, so every in-block offset does.
        module.encode(
            lease.memory_mut(),
            block.offset(),
            block.addr(m as u32),
            block.addr(layout.staging as u32),
        );

        let encoded = &lease.bytes()[layout.encoded_range()];
        Ok(text::assemble(encoded, self.config.batch_size, layout.padding))
    }

    /// Decode base64 `text` to bytes.
    ///
    /// Every `=` is stripped wherever it appears. The remaining characters
    /// must be ASCII; symbols outside the alphabet are passed to the module
    /// unchanged.
    pub fn to_bytes(&mut self, text: &str) -> Result<Vec<u8>, CodecError> {
        let mut n = 0usize;
        for (index, ch) in text.char_indices() {
            if ch == '=' {
                continue;
            }
            if !ch.is_ascii() {
                return Err(CodecError::NonAscii { index });
            }
            n += 1;
        }

        self.settle()?;

        let layout = DecodeLayout::new(n, self.config.decode_margin);
        let block_len = layout
            .block_len()
            .ok_or(CodecError::InputTooLarge { len: text.len() })?;

        let module = &mut self.bound.module;
        let mut lease = self.arena.lease(block_len)?;
        let block = lease.block();

        let staged = lease.bytes_mut();
        for (slot, b) in staged.iter_mut().zip(text.bytes().filter(|&b| b != b'=')) {
            *slot = b;
        }
        staged[n..].fill(0);

        module.decode(lease.memory_mut(), block.offset(), block.addr(n as u32));

        Ok(lease.bytes()[..layout.decoded].to_vec())
    }

    /// The arena backing this bridge.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Mutable access to the arena, e.g. to force a replacement.
    pub fn arena_mut(&mut self) -> &mut Arena {
        &mut self.arena
    }

    /// The currently bound module.
    pub fn module(&self) -> &L::Module {
        &self.bound.module
    }

    /// The epoch the current module was instantiated for.
    pub fn module_epoch(&self) -> Epoch {
        self.bound.epoch
    }

    /// The module loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// The codec configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }
}

impl<L> std::fmt::Debug for Base64Bridge<L>
where
    L: ModuleLoader,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Base64Bridge")
            .field("arena", &self.arena.stats())
            .field("module_epoch", &self.bound.epoch)
            .field("config", &self.config)
            .finish()
    }
}

/// Encoded length with padding for `len` input bytes.
pub fn encoded_len(len: usize) -> usize {
    EncodeLayout::new(len, 0).padded
}

/// Decoded length for base64 text with `symbols` non-padding symbols.
pub fn decoded_len(symbols: usize) -> usize {
    DecodeLayout::new(symbols, 0).decoded
}
