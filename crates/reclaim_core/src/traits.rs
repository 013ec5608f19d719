//! Core traits for the dump source and the artifact sink.
//!
//! These are the seams between the carving logic and the infrastructure
//! adapters: the same pipeline runs against a memory-mapped image file, a
//! plain `File`, or a byte slice in tests.

use crate::error::{CoreError, Result};

/// A source of raw block data, typically a memory card dump or an image file.
///
/// The source is a fixed-length, read-only sequence of bytes; nothing in the
/// pipeline mutates it.
pub trait BlockSource {
    /// Reads a chunk of data from the source at the specified offset.
    ///
    /// Returns the number of bytes actually read, which may be less than
    /// `buffer.len()` if the end of the source is reached.
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize>;

    /// Returns the total size of the source in bytes.
    fn size(&self) -> u64;

    /// Fills `buffer` exactly from `offset`.
    ///
    /// Fails with `OutOfBounds` when the range extends past the end of the
    /// source and with `IncompleteRead` when the underlying read transfers
    /// fewer bytes than requested. Partial reads are never truncated into a
    /// success.
    fn read_exact_at(&mut self, offset: u64, buffer: &mut [u8]) -> Result<()> {
        let len = buffer.len();
        if offset.saturating_add(len as u64) > self.size() {
            return Err(CoreError::OutOfBounds {
                offset,
                len,
                size: self.size(),
            });
        }
        let transferred = self.read_chunk(offset, buffer)?;
        if transferred != len {
            return Err(CoreError::IncompleteRead {
                offset,
                requested: len,
                transferred,
            });
        }
        Ok(())
    }
}

impl BlockSource for &[u8] {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        let start = offset as usize;
        if start >= self.len() {
            return Ok(0);
        }
        let end = start.saturating_add(buffer.len()).min(self.len());
        let slice = &self[start..end];
        buffer[..slice.len()].copy_from_slice(slice);
        Ok(slice.len())
    }

    fn size(&self) -> u64 {
        self.len() as u64
    }
}

/// Destination for extracted cluster runs.
///
/// Each artifact is an independent resource: `begin_artifact` acquires it,
/// `finish_artifact` flushes and releases it. A write failure on one artifact
/// must not corrupt previously completed ones.
pub trait OutputSink {
    /// Opens a new artifact; subsequent `append` calls write to it.
    fn begin_artifact(&mut self) -> Result<()>;

    /// Appends raw bytes to the currently open artifact.
    fn append(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flushes and closes the current artifact, counting it as written.
    fn finish_artifact(&mut self) -> Result<()>;

    /// Number of artifacts completed so far.
    fn artifacts_written(&self) -> u64;
}
