//! Little-endian encoding of 32-bit relocation values

/// Encode a value as it appears in the target binary
pub fn encode_u32(value: u32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Read a little-endian value at `offset`, if four bytes are available
pub fn decode_u32(bytes: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    let word: [u8; 4] = bytes.get(offset..end)?.try_into().ok()?;
    Some(u32::from_le_bytes(word))
}
