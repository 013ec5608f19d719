//! Cluster geometry derived from an accepted volume descriptor.

use crate::boot::VolumeDescriptor;
use crate::error::{CoreError, Result};

/// Cluster size and cluster count for one dump.
///
/// Derived once from the accepted descriptor and the dump length, then shared
/// read-only by the scanner and the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cluster_size: u64,
    pub cluster_count: u64,
}

impl Geometry {
    /// Computes the geometry for a dump of `dump_len` bytes.
    ///
    /// `assumed_sector_size` is the sector size the locator scanned with. A
    /// descriptor that disagrees describes a medium the scan loop never
    /// modeled, so the mismatch is fatal rather than tolerated.
    ///
    /// Sectors-per-cluster is validated against FAT32's legal range (1-128);
    /// the acceptance heuristic never looks at this field, so a zero here
    /// would otherwise reach the cluster arithmetic.
    pub fn from_descriptor(
        descriptor: &VolumeDescriptor,
        dump_len: u64,
        assumed_sector_size: u32,
    ) -> Result<Self> {
        if u32::from(descriptor.bytes_per_sector) != assumed_sector_size {
            return Err(CoreError::GeometryMismatch {
                actual: u32::from(descriptor.bytes_per_sector),
                assumed: assumed_sector_size,
            });
        }
        if descriptor.sectors_per_cluster == 0 || descriptor.sectors_per_cluster > 128 {
            return Err(CoreError::BadClusterShape(descriptor.sectors_per_cluster));
        }

        let cluster_size =
            u64::from(descriptor.bytes_per_sector) * u64::from(descriptor.sectors_per_cluster);
        Ok(Self {
            cluster_size,
            cluster_count: dump_len / cluster_size,
        })
    }

    /// Byte offset of the first byte of cluster `index`.
    #[inline]
    #[must_use]
    pub fn cluster_offset(&self, index: u64) -> u64 {
        index * self.cluster_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::BOOT_SIGNATURE;

    fn descriptor(bytes_per_sector: u16, sectors_per_cluster: u8) -> VolumeDescriptor {
        VolumeDescriptor {
            bytes_per_sector,
            sectors_per_cluster,
            reserved_sectors: 32,
            fat_count: 2,
            sectors_per_fat: 1024,
            root_dir_first_cluster: 2,
            boot_signature: BOOT_SIGNATURE,
        }
    }

    #[test]
    fn derives_cluster_size_and_count() {
        let geometry = Geometry::from_descriptor(&descriptor(512, 8), 1_000_000, 512).unwrap();
        assert_eq!(geometry.cluster_size, 4096);
        assert_eq!(geometry.cluster_count, 244); // floor(1_000_000 / 4096)
        assert_eq!(geometry.cluster_offset(10), 40960);
    }

    #[test]
    fn dump_length_not_cluster_aligned_rounds_down() {
        let geometry = Geometry::from_descriptor(&descriptor(512, 8), 4096 * 3 + 100, 512).unwrap();
        assert_eq!(geometry.cluster_count, 3);
    }

    #[test]
    fn sector_size_mismatch_is_fatal() {
        let err = Geometry::from_descriptor(&descriptor(4096, 8), 1_000_000, 512).unwrap_err();
        assert!(matches!(
            err,
            CoreError::GeometryMismatch {
                actual: 4096,
                assumed: 512
            }
        ));
    }

    #[test]
    fn zero_sectors_per_cluster_rejected() {
        let err = Geometry::from_descriptor(&descriptor(512, 0), 1_000_000, 512).unwrap_err();
        assert!(matches!(err, CoreError::BadClusterShape(0)));
    }

    #[test]
    fn oversized_sectors_per_cluster_rejected() {
        let err = Geometry::from_descriptor(&descriptor(512, 200), 1_000_000, 512).unwrap_err();
        assert!(matches!(err, CoreError::BadClusterShape(200)));
    }
}
