//! FAT (File Allocation Table) handling
//!
//! FAT12 packs two 12-bit entries into every three bytes. For cluster
//! `n`, the entry lives at byte offset `n + n/2`: an even cluster takes
//! the low 12 bits of the little-endian word at that offset, an odd
//! cluster the high 12 bits.

extern crate alloc;
use alloc::vec::Vec;

use crate::fat12::{BootSector, DiskImage, FatError};

/// FAT12 entry types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatEntry {
    /// Cluster is free (0x000)
    Free,
    /// Reserved cluster (0x001)
    Reserved,
    /// Data cluster - value is next cluster number
    Data(u16),
    /// Bad cluster (0xFF7)
    BadCluster,
    /// End of cluster chain (0xFF8-0xFFF)
    EndOfChain,
}

impl FatEntry {
    /// Classify a decoded 12-bit FAT entry value
    pub fn from_raw(value: u16) -> Self {
        match value & 0x0FFF {
            0x000 => FatEntry::Free,
            0x001 => FatEntry::Reserved,
            0xFF7 => FatEntry::BadCluster,
            0xFF8..=0xFFF => FatEntry::EndOfChain,
            n => FatEntry::Data(n),
        }
    }

    /// Check if this entry marks end of chain
    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, FatEntry::EndOfChain)
    }

    /// Get next cluster number if this is a data entry
    #[inline]
    pub fn next_cluster(&self) -> Option<u16> {
        match self {
            FatEntry::Data(n) => Some(*n),
            _ => None,
        }
    }
}

/// FAT table reader
///
/// Owns a copy of the first FAT and provides read-only access to its
/// packed 12-bit entries.
pub struct FatTable {
    data: Vec<u8>,
}

impl FatTable {
    /// Load the first FAT copy from the image
    ///
    /// Reads `sectors_per_fat` sectors starting at the first sector
    /// after the reserved region.
    pub fn load<D: DiskImage>(image: &mut D, boot: &BootSector) -> Result<Self, FatError> {
        let offset = boot.fat_start_sector() as u64 * boot.bytes_per_sector as u64;
        let len = boot.sectors_per_fat as usize * boot.bytes_per_sector as usize;

        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| FatError::Allocation)?;
        data.resize(len, 0);
        image.read_exact_at(offset, &mut data)?;

        Ok(FatTable { data })
    }

    /// Build a FAT table from raw bytes (testing and tooling)
    pub fn from_bytes(data: Vec<u8>) -> Self {
        FatTable { data }
    }

    /// Decode the raw 12-bit entry for a cluster
    ///
    /// An offset past the end of the table decodes as end-of-chain, so
    /// a corrupt chain index terminates instead of panicking.
    pub fn next_cluster(&self, cluster: u16) -> u16 {
        let offset = cluster as usize + cluster as usize / 2;
        if offset + 1 >= self.data.len() {
            return 0xFFF;
        }
        let word = u16::from_le_bytes([self.data[offset], self.data[offset + 1]]);
        if cluster % 2 == 0 {
            word & 0x0FFF
        } else {
            word >> 4
        }
    }

    /// Get the classified FAT entry for a cluster
    #[inline]
    pub fn entry(&self, cluster: u16) -> FatEntry {
        FatEntry::from_raw(self.next_cluster(cluster))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Pack a 12-bit value into a FAT buffer at the given cluster index.
    fn set_entry(fat: &mut [u8], cluster: u16, value: u16) {
        let offset = cluster as usize + cluster as usize / 2;
        if cluster % 2 == 0 {
            fat[offset] = (value & 0xFF) as u8;
            fat[offset + 1] = (fat[offset + 1] & 0xF0) | ((value >> 8) & 0x0F) as u8;
        } else {
            fat[offset] = (fat[offset] & 0x0F) | (((value & 0x0F) << 4) as u8);
            fat[offset + 1] = (value >> 4) as u8;
        }
    }

    #[test]
    fn test_even_odd_packing() {
        let mut data = vec![0u8; 512];
        set_entry(&mut data, 2, 0xABC);
        set_entry(&mut data, 3, 0x123);

        // Clusters 2 and 3 share bytes 3..6: ABC in the low 12 bits of
        // the word at offset 3, 123 in the high 12 bits of the word at
        // offset 4.
        assert_eq!(data[3], 0xBC);
        assert_eq!(data[4], 0x3A);
        assert_eq!(data[5], 0x12);

        let fat = FatTable::from_bytes(data);
        assert_eq!(fat.next_cluster(2), 0xABC);
        assert_eq!(fat.next_cluster(3), 0x123);
    }

    #[test]
    fn test_neighbour_entries_do_not_clobber() {
        let mut data = vec![0u8; 512];
        set_entry(&mut data, 4, 0xFFF);
        set_entry(&mut data, 5, 0x005);
        set_entry(&mut data, 6, 0x006);

        let fat = FatTable::from_bytes(data);
        assert_eq!(fat.next_cluster(4), 0xFFF);
        assert_eq!(fat.next_cluster(5), 0x005);
        assert_eq!(fat.next_cluster(6), 0x006);
    }

    #[test]
    fn test_entry_classification() {
        assert_eq!(FatEntry::from_raw(0x000), FatEntry::Free);
        assert_eq!(FatEntry::from_raw(0x001), FatEntry::Reserved);
        assert_eq!(FatEntry::from_raw(0x064), FatEntry::Data(100));
        assert_eq!(FatEntry::from_raw(0xFF7), FatEntry::BadCluster);
        assert_eq!(FatEntry::from_raw(0xFF8), FatEntry::EndOfChain);
        assert_eq!(FatEntry::from_raw(0xFFF), FatEntry::EndOfChain);
    }

    #[test]
    fn test_entry_methods() {
        assert!(FatEntry::EndOfChain.is_end());
        assert!(!FatEntry::Data(5).is_end());
        assert_eq!(FatEntry::Data(42).next_cluster(), Some(42));
        assert_eq!(FatEntry::EndOfChain.next_cluster(), None);
    }

    #[test]
    fn test_out_of_bounds_is_end_of_chain() {
        let fat = FatTable::from_bytes(vec![0u8; 8]);
        assert_eq!(fat.next_cluster(100), 0xFFF);
        assert!(fat.entry(100).is_end());
    }
}
