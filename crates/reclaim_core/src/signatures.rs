//! Camera-specific head-cluster signatures.
//!
//! A cluster is judged to start a photo when any probe in the set matches.
//! The probes are device-specific: they were derived by hexdumping intact
//! shots from the target camera and noting which bytes every image carried at
//! fixed offsets. Supporting a different camera means supplying a different
//! set, not changing code.

use crate::error::Result;
use crate::fields::read_text;
use crate::traits::BlockSource;

/// One `(offset, expected text)` probe, evaluated relative to a cluster start.
///
/// `read_width` and the length of `expected` are deliberately independent:
/// the decoded text is NUL-truncated, so a 19-byte window can match a
/// 14-character literal regardless of what trails it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSignature {
    pub offset: u64,
    pub read_width: usize,
    pub expected: String,
}

impl TextSignature {
    pub fn new(offset: u64, read_width: usize, expected: &str) -> Self {
        Self {
            offset,
            read_width,
            expected: expected.to_owned(),
        }
    }
}

/// An OR-combined set of [`TextSignature`] probes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureSet {
    signatures: Vec<TextSignature>,
}

impl SignatureSet {
    pub fn new(signatures: Vec<TextSignature>) -> Self {
        Self { signatures }
    }

    /// The probe set for cards written by a Canon EOS 600D: the camera model
    /// string at two offsets it appears at in that camera's JPEGs, plus the
    /// Exif marker near the start of the TIFF header.
    #[must_use]
    pub fn canon_eos_600d() -> Self {
        Self::new(vec![
            TextSignature::new(0xA4, 19, "Canon EOS 600D"),
            TextSignature::new(0x606, 19, "Canon EOS 600D"),
            TextSignature::new(0x6, 4, "Exif"),
        ])
    }

    pub fn signatures(&self) -> &[TextSignature] {
        &self.signatures
    }

    /// Whether the cluster starting at `cluster_offset` matches any probe.
    ///
    /// A probe matches when its expected text is a prefix of the NUL-truncated
    /// window; bytes trailing the literal, NUL or not, never defeat the match.
    /// Pure with respect to the dump contents; a probe window extending past
    /// the end of the source propagates `OutOfBounds` rather than silently
    /// reading short.
    pub fn matches<S: BlockSource>(&self, source: &mut S, cluster_offset: u64) -> Result<bool> {
        for signature in &self.signatures {
            let text = read_text(source, cluster_offset + signature.offset, signature.read_width)?;
            if text.starts_with(&signature.expected) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
