//! Disk image access
//!
//! The reader only needs byte-addressable random access to the image.
//! The trait is the seam between the core and whatever backs the image:
//! a file on disk for the CLI, an in-memory buffer for tests.

use crate::fat12::FatError;

/// Byte-addressable, random-access disk image.
pub trait DiskImage {
    /// Read exactly `buf.len()` bytes starting at `offset`.
    ///
    /// A short read (truncated image) must fail with
    /// [`FatError::ImageRead`], never return partial data.
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), FatError>;
}

/// In-memory disk image backed by a byte slice.
pub struct SliceImage<'a> {
    data: &'a [u8],
}

impl<'a> SliceImage<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceImage { data }
    }
}

impl DiskImage for SliceImage<'_> {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), FatError> {
        let start = usize::try_from(offset).map_err(|_| FatError::ImageRead)?;
        let end = start.checked_add(buf.len()).ok_or(FatError::ImageRead)?;
        if end > self.data.len() {
            return Err(FatError::ImageRead);
        }
        buf.copy_from_slice(&self.data[start..end]);
        Ok(())
    }
}

impl DiskImage for std::fs::File {
    fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<(), FatError> {
        use std::io::{Read, Seek, SeekFrom};
        self.seek(SeekFrom::Start(offset))
            .map_err(|_| FatError::ImageRead)?;
        self.read_exact(buf).map_err(|_| FatError::ImageRead)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_image_read() {
        let data = [1u8, 2, 3, 4, 5];
        let mut image = SliceImage::new(&data);
        let mut buf = [0u8; 3];
        image.read_exact_at(1, &mut buf).unwrap();
        assert_eq!(buf, [2, 3, 4]);
    }

    #[test]
    fn test_slice_image_short_read() {
        let data = [0u8; 4];
        let mut image = SliceImage::new(&data);
        let mut buf = [0u8; 3];
        assert!(matches!(
            image.read_exact_at(2, &mut buf),
            Err(FatError::ImageRead)
        ));
    }
}
