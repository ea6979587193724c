//! ROM image loading.
//!
//! Two image formats are accepted:
//! - Raw binary: one instruction byte per file byte
//! - Text (`.txt`): each line contributes one byte made of its first eight
//!   `0`/`1` characters; lines with fewer than eight are skipped, so
//!   comments can go anywhere

use crate::cpu::MEMORY_SIZE;
use std::path::Path;
use log::debug;
use thiserror::Error;

/// A loaded ROM image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RomImage {
    /// The program bytes, starting at address 0.
    pub bytes: Vec<u8>,
}

impl RomImage {
    /// Wrap raw bytes, rejecting images larger than ROM.
    pub fn new(bytes: Vec<u8>) -> Result<Self, RomError> {
        if bytes.len() > MEMORY_SIZE {
            return Err(RomError::TooLarge {
                size: bytes.len(),
                capacity: MEMORY_SIZE,
            });
        }
        Ok(Self { bytes })
    }

    /// Get the number of bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Load a ROM image from disk, choosing the format by extension.
pub fn load_rom<P: AsRef<Path>>(path: P) -> Result<RomImage, RomError> {
    let path = path.as_ref();
    let is_text = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    let image = if is_text {
        let source = std::fs::read_to_string(path)
            .map_err(|e| RomError::IoError(e.to_string()))?;
        parse_rom_text(&source)?
    } else {
        let bytes = std::fs::read(path)
            .map_err(|e| RomError::IoError(e.to_string()))?;
        RomImage::new(bytes)?
    };

    debug!("Loaded {} bytes from {}", image.len(), path.display());
    Ok(image)
}

/// Parse a text ROM image.
pub fn parse_rom_text(source: &str) -> Result<RomImage, RomError> {
    let mut bytes = Vec::new();

    for line in source.lines() {
        let bits: Vec<char> = line
            .chars()
            .filter(|c| matches!(c, '0' | '1'))
            .take(8)
            .collect();

        if bits.len() != 8 {
            continue;
        }

        let byte = bits
            .iter()
            .fold(0u8, |acc, &bit| (acc << 1) | (bit == '1') as u8);
        bytes.push(byte);
    }

    RomImage::new(bytes)
}

/// Errors that can occur while loading a ROM image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RomError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("image of {size} bytes does not fit in {capacity} bytes of ROM")]
    TooLarge { size: usize, capacity: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_image() {
        let source = "\
; hello program
11000001  ldb 65
00001001  out L

00000000  hlt
";
        let image = parse_rom_text(source).unwrap();
        assert_eq!(image.bytes, vec![0b1100_0001, 0b0000_1001, 0]);
    }

    #[test]
    fn test_short_lines_skipped() {
        let image = parse_rom_text("1010\nnothing here\n1111 0000 trailing 1\n").unwrap();
        assert_eq!(image.bytes, vec![0xF0]);
    }

    #[test]
    fn test_only_first_eight_bits_used() {
        let image = parse_rom_text("0000000111111111\n").unwrap();
        assert_eq!(image.bytes, vec![1]);
    }

    #[test]
    fn test_too_large() {
        let err = RomImage::new(vec![0; MEMORY_SIZE + 1]).unwrap_err();
        assert_eq!(err, RomError::TooLarge { size: MEMORY_SIZE + 1, capacity: MEMORY_SIZE });
        assert!(RomImage::new(vec![0; MEMORY_SIZE]).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_rom("/definitely/not/here.bin").unwrap_err();
        assert!(matches!(err, RomError::IoError(_)));
    }

    #[test]
    fn test_load_binary_and_text_files() {
        let dir = std::env::temp_dir();
        let bin = dir.join(format!("hadloc-rom-{}.bin", std::process::id()));
        let txt = dir.join(format!("hadloc-rom-{}.txt", std::process::id()));
        std::fs::write(&bin, [0xC1u8, 0x09, 0x00]).unwrap();
        std::fs::write(&txt, "11000001\n00001001\n00000000\n").unwrap();

        let from_bin = load_rom(&bin).unwrap();
        let from_txt = load_rom(&txt).unwrap();
        let _ = std::fs::remove_file(&bin);
        let _ = std::fs::remove_file(&txt);

        assert_eq!(from_bin, from_txt);
        assert_eq!(from_bin.len(), 3);
    }
}
