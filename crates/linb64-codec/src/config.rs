//! Codec configuration parameters.

/// Buffer-layout constants for the codec bridge.
///
/// The margins belong to the transcode module's contract: they are how far
/// past the logical input the module may read. They may be widened but never
/// set below the minimums the module's loader declares
/// ([`ModuleLoader::ENCODE_MARGIN`](crate::ModuleLoader::ENCODE_MARGIN) and
/// [`ModuleLoader::DECODE_MARGIN`](crate::ModuleLoader::DECODE_MARGIN)).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Zero bytes staged after the encode payload.
    ///
    /// Default: 2 (an encoder reading whole 3-byte groups overreads at most 2).
    /// Must be at least the loader's `ENCODE_MARGIN`.
    pub encode_margin: usize,

    /// Spare bytes allocated after the decode symbols.
    ///
    /// Default: 16. Must be at least the loader's `DECODE_MARGIN`.
    pub decode_margin: usize,

    /// Encoded bytes converted to text per batch.
    ///
    /// Default: 4096. Must be non-zero.
    pub batch_size: usize,
}

impl CodecConfig {
    /// Default encode overread margin in bytes.
    pub const DEFAULT_ENCODE_MARGIN: usize = 2;

    /// Default decode overread margin in bytes.
    pub const DEFAULT_DECODE_MARGIN: usize = 16;

    /// Default text assembly batch size.
    pub const DEFAULT_BATCH_SIZE: usize = 4096;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            encode_margin: Self::DEFAULT_ENCODE_MARGIN,
            decode_margin: Self::DEFAULT_DECODE_MARGIN,
            batch_size: Self::DEFAULT_BATCH_SIZE,
        }
    }

    /// Check the config against a module's minimum margins.
    pub(crate) fn validate(
        &self,
        min_encode_margin: usize,
        min_decode_margin: usize,
    ) -> Result<(), String> {
        if self.encode_margin < min_encode_margin {
            return Err(format!(
                "encode_margin {} below module minimum {min_encode_margin}",
                self.encode_margin
            ));
        }
        if self.decode_margin < min_decode_margin {
            return Err(format!(
                "decode_margin {} below module minimum {min_decode_margin}",
                self.decode_margin
            ));
        }
        if self.batch_size == 0 {
            return Err("batch_size must be non-zero".into());
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::new()
    }
}
