//! Byte pattern scanning.
//!
//! Matches may overlap: after a hit at `p` the scan resumes at `p + 1`,
//! not `p + pattern.len()`, so `AA AA` in `AA AA AA` is found at 0 and 1.

mod codec;

use memchr::memmem::Finder;

pub use codec::{decode_u32, encode_u32};

/// Pre-built searcher for one pattern
#[derive(Debug, Clone)]
pub struct PatternScanner {
    finder: Finder<'static>,
}

impl PatternScanner {
    pub fn new(pattern: &[u8]) -> Self {
        Self {
            finder: Finder::new(pattern).into_owned(),
        }
    }

    /// Scanner for the little-endian encoding of `value`
    pub fn for_u32(value: u32) -> Self {
        Self::new(&encode_u32(value))
    }

    pub fn pattern(&self) -> &[u8] {
        self.finder.needle()
    }

    /// Lazily iterate over every match offset in `haystack`.
    pub fn scan<'a>(&'a self, haystack: &'a [u8]) -> Matches<'a> {
        Matches {
            finder: &self.finder,
            haystack,
            pos: 0,
        }
    }
}

/// Iterator over match offsets, in ascending order
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    finder: &'a Finder<'static>,
    haystack: &'a [u8],
    pos: usize,
}

impl Iterator for Matches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        // An empty needle would match everywhere
        if self.finder.needle().is_empty() {
            return None;
        }

        let rest = self.haystack.get(self.pos..)?;
        match self.finder.find(rest) {
            Some(found) => {
                let offset = self.pos + found;
                self.pos = offset + 1;
                Some(offset)
            }
            None => {
                self.pos = self.haystack.len() + 1;
                None
            }
        }
    }
}

/// Collect every (possibly overlapping) match offset of `pattern`.
pub fn find_all(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
    PatternScanner::new(pattern).scan(haystack).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_is_empty() {
        let buffer = vec![0u8; 64];
        let before = buffer.clone();
        assert!(find_all(&buffer, &[0xCD, 0xE4]).is_empty());
        assert_eq!(buffer, before);
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(find_all(&[0xAA, 0xAA, 0xAA], &[0xAA, 0xAA]), vec![0, 1]);
        assert_eq!(find_all(&[0xAA; 6], &[0xAA, 0xAA, 0xAA]), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_match_at_end_of_buffer() {
        let buffer = [0x00, 0x01, 0xCD, 0xE4, 0x43, 0x6A];
        assert_eq!(find_all(&buffer, &[0xCD, 0xE4, 0x43, 0x6A]), vec![2]);
        // Partial match at the very end is not reported
        assert!(find_all(&buffer[..5], &[0xCD, 0xE4, 0x43, 0x6A]).is_empty());
    }

    #[test]
    fn test_pattern_longer_than_buffer() {
        assert!(find_all(&[0x01, 0x02], &[0x01, 0x02, 0x03]).is_empty());
        assert!(find_all(&[], &[0x01]).is_empty());
    }

    #[test]
    fn test_empty_pattern() {
        assert!(find_all(&[0x01, 0x02], &[]).is_empty());
    }

    #[test]
    fn test_scan_is_restartable() {
        let scanner = PatternScanner::for_u32(0xAFC8);
        let mut buffer = encode_u32(0xAFC8).to_vec();
        buffer.extend_from_slice(&[0u8; 10]);
        buffer.extend_from_slice(&encode_u32(0xAFC8));

        let matches = scanner.scan(&buffer);
        let first: Vec<_> = matches.clone().collect();
        let second: Vec<_> = matches.collect();
        assert_eq!(first, vec![0, 14]);
        assert_eq!(first, second);

        let mut exhausted = scanner.scan(&buffer);
        assert_eq!(exhausted.by_ref().count(), 2);
        assert_eq!(exhausted.next(), None);
    }
}
