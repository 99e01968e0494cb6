//! Numeric argument parsing.

use anyhow::Result;

/// Parse a position given in decimal or with a `0x` prefix.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_number("11702").unwrap(), 0x2DB6);
/// assert_eq!(parse_number("0xafc8").unwrap(), 45000);
/// ```
pub fn parse_number(s: &str) -> Result<u32> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| anyhow::anyhow!("Invalid number '{}': {}", s, e))
}
