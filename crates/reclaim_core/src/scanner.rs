//! Cluster-by-cluster scan for photo head clusters.

use crate::error::Result;
use crate::geometry::Geometry;
use crate::signatures::SignatureSet;
use crate::traits::BlockSource;

/// Visits every cluster of the dump in ascending order and collects the
/// indices that match the signature set.
///
/// Classification is per-cluster and stateless, so the output is ascending by
/// construction; no sort happens anywhere.
pub struct HeadScanner<'a> {
    signatures: &'a SignatureSet,
    geometry: Geometry,
}

impl<'a> HeadScanner<'a> {
    pub fn new(signatures: &'a SignatureSet, geometry: Geometry) -> Self {
        Self {
            signatures,
            geometry,
        }
    }

    /// Scans all clusters and returns the head-cluster indices.
    pub fn scan<S: BlockSource>(&self, source: &mut S) -> Result<Vec<u64>> {
        self.scan_with_progress(source, |_, _| {})
    }

    /// Like [`scan`](Self::scan), reporting `(clusters done, total)` after
    /// each cluster. The callback is observational only; it cannot influence
    /// the scan.
    pub fn scan_with_progress<S, F>(&self, source: &mut S, mut on_progress: F) -> Result<Vec<u64>>
    where
        S: BlockSource,
        F: FnMut(u64, u64),
    {
        let total = self.geometry.cluster_count;
        let mut heads = Vec::new();

        for index in 0..total {
            let offset = self.geometry.cluster_offset(index);
            if self.signatures.matches(source, offset)? {
                heads.push(index);
            }
            on_progress(index + 1, total);
        }

        Ok(heads)
    }
}
