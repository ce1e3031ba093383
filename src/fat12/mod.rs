//! Read-only FAT12 filesystem implementation
//!
//! A [`Fat12`] value is one reading session: it owns the image handle
//! and the parsed boot sector, and hands out the FAT table and root
//! directory as explicitly owned values. [`Fat12::extract`] runs the
//! whole pipeline for a single file name.

pub mod boot_sector;
pub mod directory;
pub mod fat;
pub mod image;

pub use boot_sector::BootSector;
pub use directory::{to_short_name, DirEntry, RootDirectory};
pub use fat::{FatEntry, FatTable};
pub use image::{DiskImage, SliceImage};

extern crate alloc;
use alloc::vec::Vec;
use core::fmt;

/// First cluster value in the end-of-chain sentinel range
const END_OF_CHAIN_MIN: u16 = 0xFF8;
/// First data cluster number
const FIRST_DATA_CLUSTER: u16 = 2;

/// Errors produced by the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatError {
    /// Short or failed read at any stage
    ImageRead,
    /// Backing-buffer allocation failure
    Allocation,
    /// Boot sector has zero bytes-per-sector or sectors-per-cluster
    InvalidBootSector,
    /// No root directory entry matches the requested name
    FileNotFound,
    /// Cluster chain ended before the declared file size was read
    TruncatedChain {
        /// File size declared by the directory entry
        expected: u32,
        /// Bytes actually covered by the chain
        read: u32,
    },
}

impl fmt::Display for FatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatError::ImageRead => write!(f, "short or failed read from disk image"),
            FatError::Allocation => write!(f, "buffer allocation failed"),
            FatError::InvalidBootSector => write!(f, "invalid boot sector geometry"),
            FatError::FileNotFound => write!(f, "file not found in root directory"),
            FatError::TruncatedChain { expected, read } => write!(
                f,
                "cluster chain ended after {} of {} bytes",
                read, expected
            ),
        }
    }
}

/// One FAT12 reading session over a disk image
pub struct Fat12<D> {
    image: D,
    boot: BootSector,
}

impl<D: DiskImage> Fat12<D> {
    /// Open a session: read and parse the boot sector
    pub fn open(mut image: D) -> Result<Self, FatError> {
        let mut sector = [0u8; 512];
        image.read_exact_at(0, &mut sector)?;
        let boot = BootSector::from_bytes(&sector)?;
        Ok(Fat12 { image, boot })
    }

    /// Parsed boot sector geometry
    #[inline]
    pub fn boot_sector(&self) -> &BootSector {
        &self.boot
    }

    /// Load the first FAT copy
    pub fn load_fat(&mut self) -> Result<FatTable, FatError> {
        FatTable::load(&mut self.image, &self.boot)
    }

    /// Load the root directory region
    pub fn load_root_dir(&mut self) -> Result<RootDirectory, FatError> {
        RootDirectory::load(&mut self.image, &self.boot)
    }

    /// Read a file's contents by walking its cluster chain
    ///
    /// Copies sectors into the output buffer until `entry.size` bytes
    /// have been produced, never copying past the declared size into a
    /// final cluster's padding. A chain that hits the end-of-chain
    /// sentinel before the size is satisfied fails with
    /// [`FatError::TruncatedChain`]; a link to an unallocated cluster
    /// fails with [`FatError::ImageRead`].
    pub fn read_file(&mut self, fat: &FatTable, entry: &DirEntry) -> Result<Vec<u8>, FatError> {
        let size = entry.size as usize;
        let bytes_per_sector = self.boot.bytes_per_sector as usize;
        let sectors_per_cluster = self.boot.sectors_per_cluster as u32;

        let mut out = Vec::new();
        out.try_reserve_exact(size).map_err(|_| FatError::Allocation)?;

        let mut sector = Vec::new();
        sector
            .try_reserve_exact(bytes_per_sector)
            .map_err(|_| FatError::Allocation)?;
        sector.resize(bytes_per_sector, 0);

        let mut cluster = entry.first_cluster;
        while out.len() < size {
            if cluster >= END_OF_CHAIN_MIN {
                return Err(FatError::TruncatedChain {
                    expected: entry.size,
                    read: out.len() as u32,
                });
            }
            // Clusters 0 and 1 are reserved; a link there means the
            // image is corrupt.
            if cluster < FIRST_DATA_CLUSTER {
                return Err(FatError::ImageRead);
            }

            let first_sector = self.boot.cluster_to_sector(cluster);
            for s in 0..sectors_per_cluster {
                if out.len() >= size {
                    break;
                }
                let offset = (first_sector + s) as u64 * bytes_per_sector as u64;
                self.image.read_exact_at(offset, &mut sector)?;
                let take = core::cmp::min(size - out.len(), bytes_per_sector);
                out.extend_from_slice(&sector[..take]);
            }

            cluster = fat.next_cluster(cluster);
        }

        Ok(out)
    }

    /// Resolve a name and read the file in one step
    ///
    /// Loads the FAT and root directory, looks up the name and walks
    /// the chain. The buffer is only returned on full success.
    pub fn extract(&mut self, name: &str) -> Result<Vec<u8>, FatError> {
        let fat = self.load_fat()?;
        let root = self.load_root_dir()?;
        let entry = root.find(name).ok_or(FatError::FileNotFound)?;
        self.read_file(&fat, &entry)
    }
}
