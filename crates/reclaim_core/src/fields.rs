//! Raw field decoding over a [`BlockSource`].
//!
//! Descriptor fields and cluster signatures are read directly at absolute
//! offsets; there is no record framing anywhere in a dump.

use crate::error::Result;
use crate::traits::BlockSource;

/// Widest numeric field consumed anywhere in the pipeline (sectors-per-FAT
/// and root-directory-first-cluster are 32 bits).
pub const MAX_UINT_WIDTH: usize = 4;

/// Reads `width` bytes at `offset` as an unsigned little-endian integer,
/// zero-extended to 32 bits.
///
/// # Panics
///
/// `width` outside `1..=4` is a caller bug, not a runtime condition.
pub fn read_uint<S: BlockSource>(source: &mut S, offset: u64, width: usize) -> Result<u32> {
    assert!(
        (1..=MAX_UINT_WIDTH).contains(&width),
        "numeric field width {width} outside 1..=4"
    );
    let mut raw = [0u8; MAX_UINT_WIDTH];
    source.read_exact_at(offset, &mut raw[..width])?;
    Ok(u32::from_le_bytes(raw))
}

/// Reads `width` bytes at `offset` and decodes them as text, truncated at the
/// first NUL byte or at `width`, whichever comes first.
///
/// The read width is independent of whatever literal the caller compares the
/// result against; a match on a shorter literal relies on NUL truncation.
pub fn read_text<S: BlockSource>(source: &mut S, offset: u64, width: usize) -> Result<String> {
    let mut raw = vec![0u8; width];
    source.read_exact_at(offset, &mut raw)?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(width);
    Ok(String::from_utf8_lossy(&raw[..end]).into_owned())
}
