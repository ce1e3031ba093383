//! FAT12 Filesystem Reader
//!
//! A read-only FAT12 implementation: given a raw disk image and a file
//! name, it locates the directory entry in the root directory, follows
//! the cluster chain through the File Allocation Table and reconstructs
//! the file contents.
//!
//! # Features
//! - Boot sector parsing (geometry only)
//! - FAT table loading and 12-bit entry decoding
//! - Root directory loading and 8.3 name lookup
//! - Cluster chain reading bounded by the declared file size
//!
//! # Usage
//! ```ignore
//! use fat12_reader::Fat12;
//! use std::fs::File;
//!
//! let image = File::open("floppy.img")?;
//! let mut fs = Fat12::open(image)?;
//! let content = fs.extract("KERNEL.BIN")?;
//! ```
//!
//! # References
//! - Microsoft FAT12/FAT16 File System Specification
//! - OSDev wiki, "FAT"

extern crate alloc;

pub mod fat12;

// Re-export commonly used types at crate root
pub use fat12::{
    BootSector, DirEntry, DiskImage, Fat12, FatEntry, FatError, FatTable, RootDirectory,
    SliceImage,
};
