//! Nibble-packed color-map codec.
//!
//! Storage boundary contract: colors are 0-15, so two cells pack into one
//! byte (high nibble first). Odd board sizes leave an odd cell count; the
//! encoder pads with a zero nibble and the decoder must drop it.

/// Pack a color map into bytes, two cells per byte, row-major.
pub fn encode_color_map(colors: &[Vec<u8>]) -> Vec<u8> {
    let flat: Vec<u8> = colors.iter().flat_map(|row| row.iter().copied()).collect();
    flat.chunks(2)
        .map(|pair| {
            let high = pair[0] << 4;
            let low = pair.get(1).copied().unwrap_or(0);
            high | low
        })
        .collect()
}

/// Unpack bytes produced by [`encode_color_map`] back into a `size` x `size`
/// color map, dropping the padding nibble on odd sizes.
pub fn decode_color_map(bytes: &[u8], size: usize) -> Vec<Vec<u8>> {
    let mut flat = Vec::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        flat.push((byte >> 4) & 0xf);
        flat.push(byte & 0xf);
    }
    if size & 1 == 1 {
        flat.pop();
    }
    flat.chunks(size).map(|row| row.to_vec()).collect()
}
