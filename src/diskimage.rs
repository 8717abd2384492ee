// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Disk image container for assembled programs.
//!
//! The image is a fixed-size directory followed by the concatenated file
//! contents: a 4-byte magic value, a little-endian u16 entry count, then
//! exactly [`MAX_FILES`] directory slots of [`ENTRY_SIZE`] bytes each
//! (16-byte NUL-padded name, u32-LE offset, u32-LE size). File data starts
//! at byte [`DATA_START`], at the offsets recorded in the directory. The
//! assembler's flat binary output needs no special handling as an input.

use std::io::{self, Write};

use crate::core::error::{AsmError, AsmErrorKind};

pub const MAGIC: [u8; 4] = [0xde, 0xad, 0xbe, 0xef];
pub const MAX_FILES: usize = 64;
pub const ENTRY_SIZE: usize = 24;
pub const NAME_SIZE: usize = 16;
/// Offset of the first data byte: magic + count + full directory.
pub const DATA_START: u32 = (6 + MAX_FILES * ENTRY_SIZE) as u32;

struct DiskEntry {
    name: [u8; NAME_SIZE],
    offset: u32,
    size: u32,
}

/// In-memory disk image builder.
#[derive(Default)]
pub struct DiskImage {
    entries: Vec<DiskEntry>,
    data: Vec<u8>,
}

impl DiskImage {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Add one named blob to the image. Names are stored as NUL-padded
    /// ASCII and truncate to 15 bytes, keeping the final NUL.
    pub fn add_file(&mut self, name: &str, contents: &[u8]) -> Result<(), AsmError> {
        if self.entries.len() >= MAX_FILES {
            return Err(AsmError::new(
                AsmErrorKind::Image,
                "Image directory is full",
                Some(name),
            ));
        }
        if !name.is_ascii() {
            return Err(AsmError::new(
                AsmErrorKind::Image,
                "File name is not ASCII",
                Some(name),
            ));
        }

        let mut stored = [0u8; NAME_SIZE];
        let raw = name.as_bytes();
        let len = raw.len().min(NAME_SIZE - 1);
        stored[..len].copy_from_slice(&raw[..len]);

        self.entries.push(DiskEntry {
            name: stored,
            offset: DATA_START + self.data.len() as u32,
            size: contents.len() as u32,
        });
        self.data.extend_from_slice(contents);
        Ok(())
    }

    /// Write the complete image: header, full directory (unused slots
    /// zeroed), then the data blob.
    pub fn write<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_all(&MAGIC)?;
        out.write_all(&(self.entries.len() as u16).to_le_bytes())?;

        for entry in &self.entries {
            out.write_all(&entry.name)?;
            out.write_all(&entry.offset.to_le_bytes())?;
            out.write_all(&entry.size.to_le_bytes())?;
        }
        for _ in self.entries.len()..MAX_FILES {
            out.write_all(&[0u8; ENTRY_SIZE])?;
        }

        out.write_all(&self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u16_le(bytes: &[u8]) -> u16 {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }

    fn u32_le(bytes: &[u8]) -> u32 {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[test]
    fn empty_image_is_header_and_blank_directory() {
        let image = DiskImage::new();
        let mut out = Vec::new();
        image.write(&mut out).unwrap();
        assert_eq!(out.len(), DATA_START as usize);
        assert_eq!(&out[..4], &MAGIC);
        assert_eq!(u16_le(&out[4..6]), 0);
        assert!(out[6..].iter().all(|b| *b == 0));
    }

    #[test]
    fn entries_record_name_offset_and_size() {
        let mut image = DiskImage::new();
        image.add_file("boot.bin", &[0x01, 0x00, 0x05, 0x00, 0xff]).unwrap();
        image.add_file("data.bin", &[0xaa, 0xbb]).unwrap();
        let mut out = Vec::new();
        image.write(&mut out).unwrap();

        assert_eq!(u16_le(&out[4..6]), 2);

        let entry0 = &out[6..6 + ENTRY_SIZE];
        assert_eq!(&entry0[..8], b"boot.bin");
        assert!(entry0[8..16].iter().all(|b| *b == 0));
        assert_eq!(u32_le(&entry0[16..20]), DATA_START);
        assert_eq!(u32_le(&entry0[20..24]), 5);

        let entry1 = &out[6 + ENTRY_SIZE..6 + 2 * ENTRY_SIZE];
        assert_eq!(&entry1[..8], b"data.bin");
        assert_eq!(u32_le(&entry1[16..20]), DATA_START + 5);
        assert_eq!(u32_le(&entry1[20..24]), 2);

        let data_start = DATA_START as usize;
        assert_eq!(&out[data_start..data_start + 5], &[0x01, 0x00, 0x05, 0x00, 0xff]);
        assert_eq!(&out[data_start + 5..data_start + 7], &[0xaa, 0xbb]);
    }

    #[test]
    fn long_names_truncate_with_terminating_nul() {
        let mut image = DiskImage::new();
        image
            .add_file("a-very-long-program-name.bin", &[0x00])
            .unwrap();
        let mut out = Vec::new();
        image.write(&mut out).unwrap();
        let entry = &out[6..6 + ENTRY_SIZE];
        assert_eq!(&entry[..15], b"a-very-long-pro");
        assert_eq!(entry[15], 0);
    }

    #[test]
    fn directory_is_capped_at_max_files() {
        let mut image = DiskImage::new();
        for i in 0..MAX_FILES {
            image.add_file(&format!("f{i}"), &[0u8]).unwrap();
        }
        let err = image.add_file("overflow", &[0u8]).unwrap_err();
        assert_eq!(err.kind(), AsmErrorKind::Image);
        assert_eq!(image.num_entries(), MAX_FILES);
    }

    #[test]
    fn non_ascii_names_are_rejected() {
        let mut image = DiskImage::new();
        let err = image.add_file("prográm", &[0u8]).unwrap_err();
        assert_eq!(err.kind(), AsmErrorKind::Image);
    }
}
