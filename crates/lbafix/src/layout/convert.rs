use tracing::{debug, info};

use super::binary::{BLOCK, MIN_CHECK_LEN, MIN_CONVERT_LEN, TRAILER};
use crate::error::{Error, Result};

/// Result of a layout conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutStatus {
    /// The converted binary, same length as the input
    Converted(Vec<u8>),
    /// The trailing blocks already match; nothing to do
    AlreadyConverted,
}

impl LayoutStatus {
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }
}

/// Reshapes a platform-specific binary into the generic boot layout.
///
/// The leading 2 KiB header is dropped and the second-to-last 2 KiB block
/// is appended again, so the output keeps the input length and ends in two
/// identical blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutConverter;

impl LayoutConverter {
    /// Whether the last two 2 KiB blocks are identical
    pub fn is_converted(input: &[u8]) -> Result<bool> {
        let len = input.len();
        if len < MIN_CHECK_LEN {
            return Err(Error::MalformedInput {
                what: "binary",
                len,
                min: MIN_CHECK_LEN,
            });
        }
        let chunk_a = &input[len - TRAILER..len - BLOCK];
        let chunk_b = &input[len - BLOCK..];
        Ok(chunk_a == chunk_b)
    }

    pub fn convert(input: &[u8]) -> Result<LayoutStatus> {
        if Self::is_converted(input)? {
            info!("Binary already in converted format");
            return Ok(LayoutStatus::AlreadyConverted);
        }

        let len = input.len();
        if len < MIN_CONVERT_LEN {
            return Err(Error::MalformedInput {
                what: "binary",
                len,
                min: MIN_CONVERT_LEN,
            });
        }

        let body = &input[BLOCK..];
        let duplicate = &body[body.len() - TRAILER..body.len() - BLOCK];

        let mut output = Vec::with_capacity(len);
        output.extend_from_slice(body);
        output.extend_from_slice(duplicate);
        debug!("Converted binary: {:#x} bytes", output.len());

        Ok(LayoutStatus::Converted(output))
    }
}
