//! Reference transcode module.
//!
//! [`ScalarModule`] implements the standard base64 alphabet one group at a
//! time. It follows the same memory contract as an accelerated module:
//! encoding reads whole 3-byte groups (up to 2 bytes past `src_end`).
//! Decoding reads only `[start, end)`: a trailing partial group is taken
//! symbol by symbol, so nothing past `end` is touched.

use linb64_arena::Epoch;

use crate::capability::{ModuleLoader, Transcode};
use crate::error::LoadError;

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Symbol value per byte; bytes outside the alphabet map to 0.
const DECODE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Scalar in-place base64 transcoder.
///
/// Symbols outside the alphabet decode as zero bits; there is no error
/// channel across the module boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarModule;

impl Transcode for ScalarModule {
    /// # Panics
    ///
    /// Panics if the source groups or destination groups fall outside
    /// `memory`.
    fn encode(&mut self, memory: &mut [u8], src_start: u32, src_end: u32, dst_start: u32) {
        let src = src_start as usize;
        let dst = dst_start as usize;
        let groups = (src_end - src_start).div_ceil(3) as usize;
        for g in 0..groups {
            let i = src + g * 3;
            let (b0, b1, b2) = (memory[i], memory[i + 1], memory[i + 2]);
            let o = dst + g * 4;
            memory[o] = ALPHABET[(b0 >> 2) as usize];
            memory[o + 1] = ALPHABET[(((b0 & 0x03) << 4) | (b1 >> 4)) as usize];
            memory[o + 2] = ALPHABET[(((b1 & 0x0f) << 2) | (b2 >> 6)) as usize];
            memory[o + 3] = ALPHABET[(b2 & 0x3f) as usize];
        }
    }

    /// # Panics
    ///
    /// Panics if a symbol group falls outside `memory`.
    fn decode(&mut self, memory: &mut [u8], start: u32, end: u32) {
        let base = start as usize;
        let n = (end - start) as usize;
        let full = n / 4;
        // Group g is read before it is overwritten: output g lands at
        // [3g, 3g+3), which never passes the symbols of group g+1.
        for g in 0..full {
            let i = base + g * 4;
            let s = [
                DECODE[memory[i] as usize],
                DECODE[memory[i + 1] as usize],
                DECODE[memory[i + 2] as usize],
                DECODE[memory[i + 3] as usize],
            ];
            let o = base + g * 3;
            memory[o] = (s[0] << 2) | (s[1] >> 4);
            memory[o + 1] = (s[1] << 4) | (s[2] >> 2);
            memory[o + 2] = (s[2] << 6) | s[3];
        }

        let rem = n % 4;
        if rem < 2 {
            return;
        }
        let i = base + full * 4;
        let mut s = [0u8; 4];
        for (j, v) in s.iter_mut().enumerate().take(rem) {
            *v = DECODE[memory[i + j] as usize];
        }
        let o = base + full * 3;
        memory[o] = (s[0] << 2) | (s[1] >> 4);
        if rem == 3 {
            memory[o + 1] = (s[1] << 4) | (s[2] >> 2);
        }
    }
}

/// Loader for [`ScalarModule`]. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarLoader;

impl ModuleLoader for ScalarLoader {
    type Module = ScalarModule;

    fn instantiate(&self, _epoch: Epoch) -> Result<ScalarModule, LoadError> {
        Ok(ScalarModule)
    }
}
