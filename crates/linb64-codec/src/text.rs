//! Text assembly from encoded bytes.

/// Build the output text from `encoded` bytes plus `padding` `=` characters.
///
/// Bytes are mapped one-to-one to chars (U+0000..=U+00FF) and appended in
/// batches of `batch` bytes.
pub fn assemble(encoded: &[u8], batch: usize, padding: usize) -> String {
    let mut text = String::with_capacity(encoded.len() + padding);
    for chunk in encoded.chunks(batch.max(1)) {
        text.extend(chunk.iter().map(|&b| char::from(b)));
    }
    text.extend(std::iter::repeat_n('=', padding));
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_empty_text() {
        assert_eq!(assemble(b"", 4096, 0), "");
    }

    #[test]
    fn padding_appended_after_batches() {
        assert_eq!(assemble(b"AA", 4096, 2), "AA==");
        assert_eq!(assemble(b"AAA", 1, 1), "AAA=");
    }

    #[test]
    fn batches_concatenate_in_order() {
        let encoded: Vec<u8> = (0..10_000).map(|i| b'A' + (i % 26) as u8).collect();
        let text = assemble(&encoded, 4096, 0);
        assert_eq!(text.len(), 10_000);
        assert_eq!(text.as_bytes(), &encoded[..]);
    }
}
