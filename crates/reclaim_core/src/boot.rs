//! Volume descriptor (FAT32 boot sector) location.
//!
//! The dump is scanned sector by sector from the start until a sector whose
//! byte layout looks like a plausible FAT32 boot sector is found. Acceptance
//! is a heuristic shape check, not a filesystem-correctness check: it ignores
//! the `"FAT32   "` type string and every checksum, so it tolerates boot
//! sectors with overwritten cosmetics at the cost of occasional false
//! positives on unrelated data.

use crate::error::{CoreError, Result};
use crate::fields::read_uint;
use crate::traits::BlockSource;

/// Sector size the scan assumes, matching the vast majority of SD cards.
pub const DEFAULT_SECTOR_SIZE: u32 = 512;

/// How far into the dump to look for a boot sector before giving up.
pub const DEFAULT_SEARCH_LIMIT: u64 = 100_000_000;

/// Value of the two-byte boot signature field when read little-endian.
pub const BOOT_SIGNATURE: u16 = 0xAA55;

/// Geometry fields of a candidate boot sector, decoded at a sector offset.
///
/// Field offsets follow the FAT32 BPB layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeDescriptor {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub fat_count: u8,
    pub sectors_per_fat: u32,
    pub root_dir_first_cluster: u32,
    pub boot_signature: u16,
}

impl VolumeDescriptor {
    /// Decodes the seven descriptor fields at `offset`.
    pub fn read_at<S: BlockSource>(source: &mut S, offset: u64) -> Result<Self> {
        Ok(Self {
            bytes_per_sector: read_uint(source, offset + 0x0B, 2)? as u16,
            sectors_per_cluster: read_uint(source, offset + 0x0D, 1)? as u8,
            reserved_sectors: read_uint(source, offset + 0x0E, 2)? as u16,
            fat_count: read_uint(source, offset + 0x10, 1)? as u8,
            sectors_per_fat: read_uint(source, offset + 0x24, 4)?,
            root_dir_first_cluster: read_uint(source, offset + 0x2C, 4)?,
            boot_signature: read_uint(source, offset + 0x1FE, 2)? as u16,
        })
    }
}

/// Acceptance policy for descriptor candidates.
///
/// Modeled as a trait so alternative heuristics can be substituted without
/// touching the scan loop.
pub trait DescriptorPolicy {
    fn accepts(&self, descriptor: &VolumeDescriptor) -> bool;
}

/// The permissive four-field FAT32 shape check.
///
/// Accepts a candidate iff the boot signature, bytes-per-sector, root
/// directory first cluster and FAT count all carry their conventional FAT32
/// values. Necessary but not sufficient.
#[derive(Debug, Clone, Copy)]
pub struct Fat32Heuristic {
    pub bytes_per_sector: u16,
}

impl Default for Fat32Heuristic {
    fn default() -> Self {
        Self {
            bytes_per_sector: DEFAULT_SECTOR_SIZE as u16,
        }
    }
}

impl DescriptorPolicy for Fat32Heuristic {
    fn accepts(&self, descriptor: &VolumeDescriptor) -> bool {
        descriptor.boot_signature == BOOT_SIGNATURE
            && descriptor.bytes_per_sector == self.bytes_per_sector
            && descriptor.root_dir_first_cluster == 2
            && descriptor.fat_count == 2
    }
}

/// Search parameters for the locator.
#[derive(Debug, Clone, Copy)]
pub struct LocatorConfig {
    pub sector_size: u32,
    pub search_limit: u64,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            sector_size: DEFAULT_SECTOR_SIZE,
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// A descriptor accepted by the policy, together with the sector it sits in.
#[derive(Debug, Clone, Copy)]
pub struct LocatedDescriptor {
    pub sector: u64,
    pub descriptor: VolumeDescriptor,
}

/// Scans sector-aligned offsets for the first plausible volume descriptor.
pub struct VolumeDescriptorLocator<P = Fat32Heuristic> {
    config: LocatorConfig,
    policy: P,
}

impl VolumeDescriptorLocator<Fat32Heuristic> {
    pub fn new(config: LocatorConfig) -> Self {
        // a sector size that does not fit the descriptor's 16-bit field can
        // never be matched; locate() rejects such configs before the
        // heuristic runs
        let bytes_per_sector = u16::try_from(config.sector_size).unwrap_or(0);
        Self {
            policy: Fat32Heuristic { bytes_per_sector },
            config,
        }
    }
}

impl<P: DescriptorPolicy> VolumeDescriptorLocator<P> {
    pub fn with_policy(config: LocatorConfig, policy: P) -> Self {
        Self { config, policy }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Returns the first accepted candidate, scanning from offset 0.
    ///
    /// The scan stops at the first match and never tries to disambiguate
    /// multiple plausible sectors. Candidates are only probed where a full
    /// sector fits before `min(search_limit, dump_len)`.
    ///
    /// The configured sector size is user-supplied; a zero would stall the
    /// step loop and anything beyond the descriptor's 16-bit
    /// bytes-per-sector field can never match, so both fail with
    /// `BadSectorSize` up front.
    pub fn locate<S: BlockSource>(&self, source: &mut S) -> Result<LocatedDescriptor> {
        if self.config.sector_size == 0 || self.config.sector_size > u32::from(u16::MAX) {
            return Err(CoreError::BadSectorSize(self.config.sector_size));
        }
        let sector_size = u64::from(self.config.sector_size);
        let window = source.size().min(self.config.search_limit);

        let mut offset = 0u64;
        while offset + sector_size <= window {
            let descriptor = VolumeDescriptor::read_at(source, offset)?;
            if self.policy.accepts(&descriptor) {
                return Ok(LocatedDescriptor {
                    sector: offset / sector_size,
                    descriptor,
                });
            }
            offset += sector_size;
        }

        Err(CoreError::DescriptorNotFound { searched: window })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a sector that passes the default heuristic.
    fn plausible_boot_sector(sectors_per_cluster: u8) -> [u8; 512] {
        let mut sector = [0u8; 512];
        sector[0x0B..0x0D].copy_from_slice(&512u16.to_le_bytes());
        sector[0x0D] = sectors_per_cluster;
        sector[0x0E..0x10].copy_from_slice(&32u16.to_le_bytes());
        sector[0x10] = 2;
        sector[0x24..0x28].copy_from_slice(&1024u32.to_le_bytes());
        sector[0x2C..0x30].copy_from_slice(&2u32.to_le_bytes());
        sector[0x1FE..0x200].copy_from_slice(&0xAA55u16.to_le_bytes());
        sector
    }

    #[test]
    fn descriptor_field_decoding() {
        let sector = plausible_boot_sector(8);
        let mut source: &[u8] = &sector;

        let descriptor = VolumeDescriptor::read_at(&mut source, 0).unwrap();
        assert_eq!(descriptor.bytes_per_sector, 512);
        assert_eq!(descriptor.sectors_per_cluster, 8);
        assert_eq!(descriptor.reserved_sectors, 32);
        assert_eq!(descriptor.fat_count, 2);
        assert_eq!(descriptor.sectors_per_fat, 1024);
        assert_eq!(descriptor.root_dir_first_cluster, 2);
        assert_eq!(descriptor.boot_signature, BOOT_SIGNATURE);
    }

    #[test]
    fn locator_finds_first_matching_sector() {
        let mut dump = vec![0u8; 512 * 8];
        dump[512 * 3..512 * 4].copy_from_slice(&plausible_boot_sector(8));
        // a second plausible sector further in must not win
        dump[512 * 6..512 * 7].copy_from_slice(&plausible_boot_sector(16));
        let mut source: &[u8] = &dump;

        let locator = VolumeDescriptorLocator::new(LocatorConfig::default());
        let located = locator.locate(&mut source).unwrap();
        assert_eq!(located.sector, 3);
        assert_eq!(located.descriptor.sectors_per_cluster, 8);
    }

    #[test]
    fn locator_reports_not_found() {
        let dump = vec![0u8; 512 * 4];
        let mut source: &[u8] = &dump;

        let locator = VolumeDescriptorLocator::new(LocatorConfig::default());
        let err = locator.locate(&mut source).unwrap_err();
        assert!(matches!(
            err,
            CoreError::DescriptorNotFound { searched: 2048 }
        ));
    }

    #[test]
    fn locator_honors_search_limit() {
        let mut dump = vec![0u8; 512 * 8];
        dump[512 * 5..512 * 6].copy_from_slice(&plausible_boot_sector(8));
        let mut source: &[u8] = &dump;

        let locator = VolumeDescriptorLocator::new(LocatorConfig {
            sector_size: 512,
            search_limit: 512 * 4,
        });
        assert!(locator.locate(&mut source).is_err());
    }

    #[test]
    fn locator_ignores_trailing_partial_sector() {
        // 512 full bytes plus a 100-byte tail; only one candidate offset
        let mut dump = vec![0u8; 612];
        dump[..512].copy_from_slice(&plausible_boot_sector(4));
        let mut source: &[u8] = &dump;

        let locator = VolumeDescriptorLocator::new(LocatorConfig::default());
        assert_eq!(locator.locate(&mut source).unwrap().sector, 0);
    }

    #[test]
    fn heuristic_rejects_each_field_mismatch() {
        let good = VolumeDescriptor {
            bytes_per_sector: 512,
            sectors_per_cluster: 8,
            reserved_sectors: 32,
            fat_count: 2,
            sectors_per_fat: 1024,
            root_dir_first_cluster: 2,
            boot_signature: BOOT_SIGNATURE,
        };
        let heuristic = Fat32Heuristic::default();
        assert!(heuristic.accepts(&good));

        let mut bad = good;
        bad.boot_signature = 0x55AA;
        assert!(!heuristic.accepts(&bad));

        let mut bad = good;
        bad.bytes_per_sector = 4096;
        assert!(!heuristic.accepts(&bad));

        let mut bad = good;
        bad.root_dir_first_cluster = 0;
        assert!(!heuristic.accepts(&bad));

        let mut bad = good;
        bad.fat_count = 1;
        assert!(!heuristic.accepts(&bad));
    }

    #[test]
    fn zero_sector_size_is_rejected_not_divided_by() {
        // a descriptor that reports zero bytes per sector and would be
        // accepted by a zero-sector-size heuristic
        let mut dump = vec![0u8; 1024];
        dump[0x10] = 2;
        dump[0x2C..0x30].copy_from_slice(&2u32.to_le_bytes());
        dump[0x1FE..0x200].copy_from_slice(&0xAA55u16.to_le_bytes());
        let mut source: &[u8] = &dump;

        let locator = VolumeDescriptorLocator::new(LocatorConfig {
            sector_size: 0,
            search_limit: DEFAULT_SEARCH_LIMIT,
        });
        let err = locator.locate(&mut source).unwrap_err();
        assert!(matches!(err, CoreError::BadSectorSize(0)));

        // same config over a dump with no candidate must also error rather
        // than step by zero forever
        let dump = vec![0u8; 1024];
        let mut source: &[u8] = &dump;
        assert!(matches!(
            locator.locate(&mut source).unwrap_err(),
            CoreError::BadSectorSize(0)
        ));
    }

    #[test]
    fn sector_size_beyond_descriptor_field_is_rejected() {
        // 66048 truncates to 512 as u16; the heuristic must not silently
        // accept descriptors the geometry step will refuse
        let mut dump = vec![0u8; 512 * 4];
        dump[..512].copy_from_slice(&plausible_boot_sector(8));
        let mut source: &[u8] = &dump;

        let locator = VolumeDescriptorLocator::new(LocatorConfig {
            sector_size: 66048,
            search_limit: DEFAULT_SEARCH_LIMIT,
        });
        let err = locator.locate(&mut source).unwrap_err();
        assert!(matches!(err, CoreError::BadSectorSize(66048)));
    }

    #[test]
    fn custom_policy_is_pluggable() {
        struct AcceptAnything;
        impl DescriptorPolicy for AcceptAnything {
            fn accepts(&self, _: &VolumeDescriptor) -> bool {
                true
            }
        }

        let dump = vec![0u8; 1024];
        let mut source: &[u8] = &dump;
        let locator =
            VolumeDescriptorLocator::with_policy(LocatorConfig::default(), AcceptAnything);
        assert_eq!(locator.locate(&mut source).unwrap().sector, 0);
    }
}
