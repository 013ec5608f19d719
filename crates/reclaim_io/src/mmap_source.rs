//! Memory-mapped dump source.

use memmap2::Mmap;
use reclaim_core::{BlockSource, CoreError, Result};
use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::Path;

/// Zero-copy [`BlockSource`] over a memory-mapped dump file.
///
/// Block devices on some platforms refuse to mmap; callers fall back to
/// [`FileSource`](crate::FileSource) through [`DumpSource::open`](crate::DumpSource::open).
pub struct MmapSource {
    mmap: Mmap,
    size: u64,
}

impl MmapSource {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let size = file.seek(SeekFrom::End(0))?;

        if size == 0 {
            return Err(CoreError::Io(std::io::Error::other(
                "cannot mmap an empty dump",
            )));
        }

        let mmap = unsafe { Mmap::map(&file) }.map_err(CoreError::Io)?;
        if mmap.len() == 0 {
            return Err(CoreError::Io(std::io::Error::other(
                "mmap returned an empty mapping (block device not supported)",
            )));
        }

        #[cfg(target_os = "linux")]
        {
            use memmap2::Advice;
            let _ = mmap.advise(Advice::Sequential);
        }

        Ok(Self { mmap, size })
    }

    #[inline]
    pub fn slice(&self, offset: u64, len: usize) -> Option<&[u8]> {
        let start = offset as usize;
        if start >= self.mmap.len() {
            return None;
        }
        let end = start.saturating_add(len).min(self.mmap.len());
        Some(&self.mmap[start..end])
    }
}

impl BlockSource for MmapSource {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        if let Some(slice) = self.slice(offset, buffer.len()) {
            let len = slice.len();
            buffer[..len].copy_from_slice(slice);
            Ok(len)
        } else {
            Ok(0)
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}
