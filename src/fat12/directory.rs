//! FAT12 Root Directory handling
//!
//! The root directory is a fixed-size region of 32-byte entries at a
//! fixed location between the FAT region and the data region. Lookup
//! compares against the stored 11-byte 8.3 name, stops at the first
//! never-used slot (name byte 0x00) and skips deleted slots (0xE5).

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::fat12::{BootSector, DiskImage, FatError};

// Directory entry attribute flags
/// Volume label (root directory only)
pub const ATTR_VOLUME_ID: u8 = 0x08;
/// Directory
pub const ATTR_DIRECTORY: u8 = 0x10;

/// Size of one on-disk directory entry in bytes
pub const DIR_ENTRY_SIZE: usize = 32;

/// Marker byte: end of valid entries
const ENTRY_END: u8 = 0x00;
/// Marker byte: deleted entry
const ENTRY_DELETED: u8 = 0xE5;

/// FAT12 Directory Entry (32 bytes on disk)
#[derive(Clone, Debug)]
pub struct DirEntry {
    /// Short filename (8 chars, space-padded)
    pub name: [u8; 8],
    /// Extension (3 chars, space-padded)
    pub ext: [u8; 3],
    /// File attributes
    pub attr: u8,
    /// Creation time (raw)
    pub create_time: u16,
    /// Creation date (raw)
    pub create_date: u16,
    /// Last access date (raw)
    pub access_date: u16,
    /// Last modification time (raw)
    pub modify_time: u16,
    /// Last modification date (raw)
    pub modify_date: u16,
    /// First cluster of the file data (FAT12 never sets the high word)
    pub first_cluster: u16,
    /// File size in bytes
    pub size: u32,
}

impl DirEntry {
    /// Parse directory entry from 32 bytes
    ///
    /// # Returns
    /// * `Some(DirEntry)` if the slot holds a valid entry
    /// * `None` if the slot is deleted (0xE5) or the end marker (0x00)
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < DIR_ENTRY_SIZE {
            return None;
        }

        if data[0] == ENTRY_END || data[0] == ENTRY_DELETED {
            return None;
        }

        let mut name = [0u8; 8];
        let mut ext = [0u8; 3];
        name.copy_from_slice(&data[0..8]);
        ext.copy_from_slice(&data[8..11]);

        Some(DirEntry {
            name,
            ext,
            attr: data[11],
            create_time: u16::from_le_bytes([data[14], data[15]]),
            create_date: u16::from_le_bytes([data[16], data[17]]),
            access_date: u16::from_le_bytes([data[18], data[19]]),
            modify_time: u16::from_le_bytes([data[22], data[23]]),
            modify_date: u16::from_le_bytes([data[24], data[25]]),
            first_cluster: u16::from_le_bytes([data[26], data[27]]),
            size: u32::from_le_bytes([data[28], data[29], data[30], data[31]]),
        })
    }

    /// Check if entry is a directory
    #[inline]
    pub fn is_directory(&self) -> bool {
        self.attr & ATTR_DIRECTORY != 0
    }

    /// Check if entry is the volume label
    #[inline]
    pub fn is_volume_label(&self) -> bool {
        self.attr & ATTR_VOLUME_ID != 0
    }

    /// Get display name in standard format (NAME.EXT)
    ///
    /// Removes trailing spaces and combines name with extension.
    pub fn display_name(&self) -> String {
        let name_part: String = self
            .name
            .iter()
            .take_while(|&&b| b != b' ' && b != 0x00)
            .map(|&b| b as char)
            .collect();

        let ext_part: String = self
            .ext
            .iter()
            .take_while(|&&b| b != b' ' && b != 0x00)
            .map(|&b| b as char)
            .collect();

        if ext_part.is_empty() {
            name_part
        } else {
            alloc::format!("{}.{}", name_part, ext_part)
        }
    }
}

/// Normalize a file name into the fixed-width 11-byte 8.3 form
///
/// Characters before the first `.` fill the 8-byte name field,
/// characters after it the 3-byte extension field; both uppercased,
/// space-padded and truncated to their field width. Lookup is therefore
/// case-insensitive against the stored uppercase names.
pub fn to_short_name(name: &str) -> [u8; 11] {
    let mut out = [b' '; 11];

    let (stem, ext) = match name.split_once('.') {
        Some((stem, ext)) => (stem, ext),
        None => (name, ""),
    };

    for (i, b) in stem.bytes().take(8).enumerate() {
        out[i] = b.to_ascii_uppercase();
    }
    for (i, b) in ext.bytes().take(3).enumerate() {
        out[8 + i] = b.to_ascii_uppercase();
    }

    out
}

/// Root directory reader
///
/// Owns a copy of the fixed-size root directory region and resolves
/// names against it.
pub struct RootDirectory {
    data: Vec<u8>,
    entry_count: usize,
}

impl RootDirectory {
    /// Load the root directory region from the image
    ///
    /// The region starts right after the FAT copies and spans
    /// `ceil(root_entries * 32 / bytes_per_sector)` sectors.
    pub fn load<D: DiskImage>(image: &mut D, boot: &BootSector) -> Result<Self, FatError> {
        let offset = boot.root_dir_start_sector() as u64 * boot.bytes_per_sector as u64;
        let len = boot.root_dir_sectors() as usize * boot.bytes_per_sector as usize;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| FatError::Allocation)?;
        data.resize(len, 0);
        image.read_exact_at(offset, &mut data)?;

        Ok(RootDirectory {
            data,
            entry_count: boot.root_entries as usize,
        })
    }

    /// Build a root directory from raw region bytes (testing and tooling)
    pub fn from_bytes(data: Vec<u8>, entry_count: usize) -> Self {
        RootDirectory { data, entry_count }
    }

    /// Raw 32-byte slots up to the entry count
    fn slots(&self) -> impl Iterator<Item = &[u8]> {
        self.data
            .chunks_exact(DIR_ENTRY_SIZE)
            .take(self.entry_count)
    }

    /// Find an entry by file name
    ///
    /// The name is normalized to 8.3 form and compared byte-for-byte
    /// against the stored name+extension field. The scan stops at the
    /// first never-used slot; deleted slots are skipped.
    pub fn find(&self, name: &str) -> Option<DirEntry> {
        let target = to_short_name(name);

        for slot in self.slots() {
            if slot[0] == ENTRY_END {
                break;
            }
            if slot[0] == ENTRY_DELETED {
                continue;
            }
            if slot[0..11] == target {
                return DirEntry::from_bytes(slot);
            }
        }

        None
    }

    /// List all valid entries
    ///
    /// Skips deleted slots and the volume label; stops at the first
    /// never-used slot.
    pub fn entries(&self) -> Vec<DirEntry> {
        let mut out = Vec::new();

        for slot in self.slots() {
            if slot[0] == ENTRY_END {
                break;
            }
            if let Some(entry) = DirEntry::from_bytes(slot) {
                if !entry.is_volume_label() {
                    out.push(entry);
                }
            }
        }

        out
    }
}
