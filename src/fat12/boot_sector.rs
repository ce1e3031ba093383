//! FAT12 Boot Sector Parser
//!
//! Parses the first 512 bytes of a FAT12 filesystem to extract
//! the geometry parameters that locate every other on-disk region.

use crate::fat12::FatError;

/// Boot sector structure containing FAT12 filesystem parameters
#[derive(Debug, Clone)]
pub struct BootSector {
    /// Bytes per sector (usually 512)
    pub bytes_per_sector: u16,
    /// Sectors per cluster (power of 2)
    pub sectors_per_cluster: u8,
    /// Number of reserved sectors before the first FAT
    pub reserved_sectors: u16,
    /// Number of FAT copies (usually 2)
    pub fat_count: u8,
    /// Number of 32-byte entries in the root directory
    pub root_entries: u16,
    /// Total sectors in the filesystem
    pub total_sectors: u16,
    /// Sectors per FAT table
    pub sectors_per_fat: u16,
}

impl BootSector {
    /// Parse boot sector from raw bytes
    ///
    /// Fields are read at their fixed byte offsets; the signature and
    /// OEM string are not checked. A zero bytes-per-sector or
    /// sectors-per-cluster would make every later offset computation
    /// divide by zero, so both are rejected here.
    ///
    /// # Arguments
    /// * `data` - Exactly 512 bytes of boot sector data
    pub fn from_bytes(data: &[u8; 512]) -> Result<Self, FatError> {
        let bs = BootSector {
            // Offset 11-12: Bytes per sector
            bytes_per_sector: u16::from_le_bytes([data[11], data[12]]),
            // Offset 13: Sectors per cluster
            sectors_per_cluster: data[13],
            // Offset 14-15: Reserved sector count
            reserved_sectors: u16::from_le_bytes([data[14], data[15]]),
            // Offset 16: Number of FATs
            fat_count: data[16],
            // Offset 17-18: Root directory entry count
            root_entries: u16::from_le_bytes([data[17], data[18]]),
            // Offset 19-20: Total sectors (16-bit)
            total_sectors: u16::from_le_bytes([data[19], data[20]]),
            // Offset 22-23: Sectors per FAT (FAT12/16)
            sectors_per_fat: u16::from_le_bytes([data[22], data[23]]),
        };

        if bs.bytes_per_sector == 0 || bs.sectors_per_cluster == 0 {
            return Err(FatError::InvalidBootSector);
        }

        Ok(bs)
    }

    /// Starting sector of the first FAT copy
    #[inline]
    pub fn fat_start_sector(&self) -> u32 {
        self.reserved_sectors as u32
    }

    /// Starting sector of the root directory region
    #[inline]
    pub fn root_dir_start_sector(&self) -> u32 {
        self.fat_start_sector() + self.fat_count as u32 * self.sectors_per_fat as u32
    }

    /// Size of the root directory region in sectors, rounded up
    #[inline]
    pub fn root_dir_sectors(&self) -> u32 {
        let bytes = self.root_entries as u32 * 32;
        (bytes + self.bytes_per_sector as u32 - 1) / self.bytes_per_sector as u32
    }

    /// Starting sector of the data region (cluster 2)
    #[inline]
    pub fn data_start_sector(&self) -> u32 {
        self.root_dir_start_sector() + self.root_dir_sectors()
    }

    /// Convert cluster number to sector number
    ///
    /// # Arguments
    /// * `cluster` - Cluster number (must be >= 2)
    #[inline]
    pub fn cluster_to_sector(&self, cluster: u16) -> u32 {
        self.data_start_sector() + (cluster as u32 - 2) * self.sectors_per_cluster as u32
    }

    /// Calculate bytes per cluster
    #[inline]
    pub fn bytes_per_cluster(&self) -> u32 {
        self.bytes_per_sector as u32 * self.sectors_per_cluster as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floppy_boot_sector() -> [u8; 512] {
        let mut data = [0u8; 512];
        // Bytes per sector = 512
        data[11] = 0x00;
        data[12] = 0x02;
        // Sectors per cluster = 1
        data[13] = 1;
        // Reserved sectors = 1
        data[14] = 1;
        data[15] = 0;
        // FAT count = 2
        data[16] = 2;
        // Root entries = 224
        data[17..19].copy_from_slice(&224u16.to_le_bytes());
        // Total sectors = 2880
        data[19..21].copy_from_slice(&2880u16.to_le_bytes());
        // Sectors per FAT = 9
        data[22..24].copy_from_slice(&9u16.to_le_bytes());
        data
    }

    #[test]
    fn test_valid_boot_sector() {
        let data = floppy_boot_sector();
        let bs = BootSector::from_bytes(&data).unwrap();
        assert_eq!(bs.bytes_per_sector, 512);
        assert_eq!(bs.sectors_per_cluster, 1);
        assert_eq!(bs.reserved_sectors, 1);
        assert_eq!(bs.fat_count, 2);
        assert_eq!(bs.root_entries, 224);
        assert_eq!(bs.total_sectors, 2880);
        assert_eq!(bs.sectors_per_fat, 9);
    }

    #[test]
    fn test_region_layout() {
        let data = floppy_boot_sector();
        let bs = BootSector::from_bytes(&data).unwrap();
        assert_eq!(bs.fat_start_sector(), 1);
        assert_eq!(bs.root_dir_start_sector(), 1 + 2 * 9);
        // 224 entries * 32 bytes = 7168 bytes = exactly 14 sectors
        assert_eq!(bs.root_dir_sectors(), 14);
        assert_eq!(bs.data_start_sector(), 33);
        assert_eq!(bs.cluster_to_sector(2), 33);
        assert_eq!(bs.cluster_to_sector(5), 36);
        assert_eq!(bs.bytes_per_cluster(), 512);
    }

    #[test]
    fn test_root_dir_sectors_rounds_up() {
        let mut data = floppy_boot_sector();
        // 225 entries * 32 = 7200 bytes -> 15 sectors
        data[17..19].copy_from_slice(&225u16.to_le_bytes());
        let bs = BootSector::from_bytes(&data).unwrap();
        assert_eq!(bs.root_dir_sectors(), 15);
    }

    #[test]
    fn test_zero_geometry_rejected() {
        let mut data = floppy_boot_sector();
        data[11] = 0;
        data[12] = 0;
        assert!(matches!(
            BootSector::from_bytes(&data),
            Err(FatError::InvalidBootSector)
        ));

        let mut data = floppy_boot_sector();
        data[13] = 0;
        assert!(matches!(
            BootSector::from_bytes(&data),
            Err(FatError::InvalidBootSector)
        ));
    }
}
