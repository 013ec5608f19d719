//! Extraction of cluster runs delimited by consecutive head clusters.

use crate::error::Result;
use crate::geometry::Geometry;
use crate::traits::{BlockSource, OutputSink};

/// Outcome of an extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Artifacts fully written and closed.
    pub artifacts_written: u64,
    /// The last detected head, which has no successor to delimit a run and
    /// therefore produced no artifact. `None` when no heads were detected.
    pub trailing_head: Option<u64>,
}

/// Copies each half-open cluster range `[heads[k], heads[k+1])` into a fresh
/// artifact on the sink.
///
/// The copy is verbatim and unvalidated: the signature match at the head is
/// the only correctness check in the pipeline, and a false-positive head just
/// produces a spurious artifact. One cluster of buffer is held at a time, so
/// memory stays bounded for dumps far larger than RAM.
pub struct RunExtractor {
    geometry: Geometry,
}

impl RunExtractor {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    pub fn extract<S, K>(&self, source: &mut S, heads: &[u64], sink: &mut K) -> Result<ExtractionReport>
    where
        S: BlockSource,
        K: OutputSink,
    {
        let mut buffer = vec![0u8; self.geometry.cluster_size as usize];
        let mut artifacts_written = 0u64;

        for pair in heads.windows(2) {
            sink.begin_artifact()?;
            for cluster in pair[0]..pair[1] {
                source.read_exact_at(self.geometry.cluster_offset(cluster), &mut buffer)?;
                sink.append(&buffer)?;
            }
            sink.finish_artifact()?;
            artifacts_written += 1;
        }

        Ok(ExtractionReport {
            artifacts_written,
            trailing_head: heads.last().copied(),
        })
    }
}
