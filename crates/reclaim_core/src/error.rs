use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("read of {len} bytes at offset {offset} is out of bounds (source is {size} bytes)")]
    OutOfBounds { offset: u64, len: usize, size: u64 },

    #[error("short read at offset {offset}: requested {requested} bytes, got {transferred}")]
    IncompleteRead {
        offset: u64,
        requested: usize,
        transferred: usize,
    },

    #[error("short write to artifact: requested {requested} bytes, got {transferred}")]
    IncompleteWrite {
        requested: usize,
        transferred: usize,
    },

    #[error("no plausible volume descriptor in the first {searched} bytes")]
    DescriptorNotFound { searched: u64 },

    #[error("descriptor reports {actual} bytes per sector, scan assumed {assumed}")]
    GeometryMismatch { actual: u32, assumed: u32 },

    #[error("sectors per cluster {0} is outside the FAT32 range 1-128")]
    BadClusterShape(u8),

    #[error("configured sector size {0} is outside the supported range 1-65535")]
    BadSectorSize(u32),
}

pub type Result<T> = std::result::Result<T, CoreError>;
