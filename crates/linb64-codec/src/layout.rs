//! Byte layouts for encode and decode requests.
//!
//! Pure size arithmetic. Every offset here is relative to the start of the
//! request's block.
//!
//! Encode block (`m` payload bytes, margin 2):
//!
//! ```text
//! 0          m        M = m+2                 M+N
//! ├─ payload ─┼─ zeros ─┼─ encoded (n used of N) ─┤
//! ```
//!
//! Decode block (`n` symbols, margin 16):
//!
//! ```text
//! 0            n             n+16
//! ├── symbols ──┼── margin ───┤
//! ├ decoded (m) ┤  (written in place over the symbols)
//! ```

/// Layout of an encode request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeLayout {
    /// Payload length `m`.
    pub payload: usize,
    /// Staged input length `M`: payload plus the zeroed overread margin.
    /// Also the offset where encoded characters start.
    pub staging: usize,
    /// Encoded length without padding, `n`.
    pub encoded: usize,
    /// Encoded length with padding, `N`.
    pub padded: usize,
    /// Number of `=` characters to append.
    pub padding: usize,
}

impl EncodeLayout {
    /// Compute the layout for `payload` bytes with the given overread margin.
    pub fn new(payload: usize, margin: usize) -> Self {
        let k = payload % 3;
        let whole = payload / 3 * 4;
        let encoded = if k > 0 { whole + k + 1 } else { whole };
        let padded = payload.div_ceil(3) * 4;
        Self {
            payload,
            staging: payload.saturating_add(margin),
            encoded,
            padded,
            padding: padded - encoded,
        }
    }

    /// Block size `N + M`, or `None` if it overflows `usize`.
    pub fn block_len(&self) -> Option<usize> {
        self.padded.checked_add(self.staging)
    }

    /// Range of the meaningful encoded characters within the block.
    pub fn encoded_range(&self) -> std::ops::Range<usize> {
        self.staging..self.staging + self.encoded
    }
}

/// Layout of a decode request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeLayout {
    /// Symbol count `n` after stripping `=`.
    pub symbols: usize,
    /// Decoded length `m`.
    pub decoded: usize,
    /// Spare bytes after the symbols.
    pub margin: usize,
}

impl DecodeLayout {
    /// Compute the layout for `symbols` base64 symbols.
    ///
    /// A dangling single symbol (`n mod 4 == 1`) carries fewer than 8 bits
    /// and contributes no byte.
    pub fn new(symbols: usize, margin: usize) -> Self {
        let rem = symbols % 4;
        let k = if rem > 0 { rem - 1 } else { 0 };
        Self {
            symbols,
            decoded: symbols / 4 * 3 + k,
            margin,
        }
    }

    /// Block size `n + margin`, or `None` if it overflows `usize`.
    pub fn block_len(&self) -> Option<usize> {
        self.symbols.checked_add(self.margin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_empty() {
        let l = EncodeLayout::new(0, 2);
        assert_eq!(
            l,
            EncodeLayout {
                payload: 0,
                staging: 2,
                encoded: 0,
                padded: 0,
                padding: 0,
            }
        );
        assert_eq!(l.block_len(), Some(2));
    }

    #[test]
    fn encode_one_byte_pads_twice() {
        let l = EncodeLayout::new(1, 2);
        assert_eq!((l.encoded, l.padded, l.padding), (2, 4, 2));
        assert_eq!(l.block_len(), Some(7));
        assert_eq!(l.encoded_range(), 3..5);
    }

    #[test]
    fn encode_two_bytes_pads_once() {
        let l = EncodeLayout::new(2, 2);
        assert_eq!((l.encoded, l.padded, l.padding), (3, 4, 1));
    }

    #[test]
    fn encode_whole_groups_unpadded() {
        let l = EncodeLayout::new(9, 2);
        assert_eq!((l.encoded, l.padded, l.padding), (12, 12, 0));
        assert_eq!(l.staging, 11);
        assert_eq!(l.block_len(), Some(23));
    }

    #[test]
    fn encode_block_overflow_detected() {
        let l = EncodeLayout::new(usize::MAX / 2, 2);
        assert_eq!(l.block_len(), None);
    }

    #[test]
    fn decode_lengths() {
        assert_eq!(DecodeLayout::new(0, 16).decoded, 0);
        assert_eq!(DecodeLayout::new(2, 16).decoded, 1);
        assert_eq!(DecodeLayout::new(3, 16).decoded, 2);
        assert_eq!(DecodeLayout::new(4, 16).decoded, 3);
        assert_eq!(DecodeLayout::new(8, 16).decoded, 6);
        assert_eq!(DecodeLayout::new(8, 16).block_len(), Some(24));
    }

    #[test]
    fn decode_dangling_symbol_adds_nothing() {
        assert_eq!(DecodeLayout::new(5, 16).decoded, 3);
        assert_eq!(DecodeLayout::new(1, 16).decoded, 0);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_inverts_encode_lengths(m in 0usize..1_000_000) {
                let enc = EncodeLayout::new(m, 2);
                prop_assert_eq!(DecodeLayout::new(enc.encoded, 16).decoded, m);
            }

            #[test]
            fn padded_is_encoded_plus_padding(m in 0usize..1_000_000) {
                let l = EncodeLayout::new(m, 2);
                prop_assert_eq!(l.padded % 4, 0);
                prop_assert_eq!(l.encoded + l.padding, l.padded);
                let expected = [0, 2, 1][m % 3];
                prop_assert_eq!(l.padding, expected);
            }

            #[test]
            fn encoded_region_fits_block(m in 0usize..1_000_000, margin in 0usize..64) {
                let l = EncodeLayout::new(m, margin);
                let block = l.block_len().unwrap();
                prop_assert!(l.encoded_range().end <= block);
                prop_assert_eq!(block - l.staging, l.padded);
            }
        }
    }
}
