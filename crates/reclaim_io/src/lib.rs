mod file_source;
mod mmap_source;
mod sink;

pub use file_source::FileSource;
pub use mmap_source::MmapSource;
pub use sink::DirectorySink;

use reclaim_core::{BlockSource, Result};
use std::path::Path;

/// A dump source that prefers mmap and falls back to seek-and-read.
pub enum DumpSource {
    Mmap(MmapSource),
    File(FileSource),
}

impl DumpSource {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        match MmapSource::new(path_ref) {
            Ok(s) => Ok(DumpSource::Mmap(s)),
            Err(_) => Ok(DumpSource::File(FileSource::new(path_ref)?)),
        }
    }

    #[inline]
    pub fn is_mmap(&self) -> bool {
        matches!(self, DumpSource::Mmap(_))
    }
}

impl BlockSource for DumpSource {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        match self {
            DumpSource::Mmap(s) => s.read_chunk(offset, buffer),
            DumpSource::File(s) => s.read_chunk(offset, buffer),
        }
    }

    fn size(&self) -> u64 {
        match self {
            DumpSource::Mmap(s) => s.size(),
            DumpSource::File(s) => s.size(),
        }
    }
}
