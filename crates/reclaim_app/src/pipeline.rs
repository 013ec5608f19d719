//! Recovery pipeline: locate descriptor, derive geometry, scan, extract.

use anyhow::Context;
use humansize::{format_size, BINARY};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;

use reclaim_core::{
    BlockSource, Geometry, HeadScanner, LocatedDescriptor, LocatorConfig, RunExtractor,
    SignatureSet, VolumeDescriptorLocator,
};
use reclaim_io::{DirectorySink, DumpSource};

#[derive(Debug)]
pub struct RecoverySummary {
    pub heads_detected: u64,
    pub artifacts_written: u64,
    pub trailing_head: Option<u64>,
}

pub fn run_recovery(
    dump_path: &Path,
    output_dir: &Path,
    config: LocatorConfig,
) -> anyhow::Result<RecoverySummary> {
    let start_time = Instant::now();

    let mut source = DumpSource::open(dump_path)
        .with_context(|| format!("failed to open dump: {}", dump_path.display()))?;
    if source.is_mmap() {
        eprintln!("[reclaim] Using memory-mapped I/O");
    }

    println!("[reclaim] Dump: {}", dump_path.display());
    println!("[reclaim] Dump size: {}", format_size(source.size(), BINARY));

    let located = VolumeDescriptorLocator::new(config)
        .locate(&mut source)
        .context("volume descriptor search failed")?;
    print_descriptor_report(&located);

    let geometry = Geometry::from_descriptor(&located.descriptor, source.size(), config.sector_size)
        .context("unusable cluster geometry")?;
    println!(
        "[reclaim] Cluster size {} bytes, {} clusters to scan",
        geometry.cluster_size, geometry.cluster_count
    );

    let signatures = SignatureSet::canon_eos_600d();
    let scanner = HeadScanner::new(&signatures, geometry);

    let pb = ProgressBar::new(geometry.cluster_count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:50.cyan/blue}] {pos}/{len} clusters ({eta})")
            .expect("invalid progress bar template - this is a bug")
            .progress_chars("##-"),
    );
    let heads = scanner
        .scan_with_progress(&mut source, |done, _| pb.set_position(done))
        .context("cluster scan failed")?;
    pb.finish_and_clear();

    println!(
        "[reclaim] Detected {} candidate photo heads",
        heads.len()
    );

    let mut sink = DirectorySink::new(output_dir, "jpg")
        .with_context(|| format!("failed to prepare output dir: {}", output_dir.display()))?;
    let report = RunExtractor::new(geometry)
        .extract(&mut source, &heads, &mut sink)
        .context("extraction failed")?;

    let elapsed = start_time.elapsed();

    println!("\n╔════════════════════════════════════════╗");
    println!("║        === Recovery Finished ===       ║");
    println!("╠════════════════════════════════════════╣");
    println!(
        "║ Elapsed Time:       {:>18} ║",
        format!("{:.1}s", elapsed.as_secs_f64())
    );
    println!("║ Heads Detected:     {:>18} ║", heads.len());
    println!("║ Files Recovered:    {:>18} ║", report.artifacts_written);
    println!("╠════════════════════════════════════════╣");
    println!("║ Files saved to:     {:<18} ║", output_dir.display());
    println!("╚════════════════════════════════════════╝");

    if let Some(head) = report.trailing_head {
        // known limitation: the final head has no successor to bound its run
        eprintln!(
            "[reclaim] Trailing head at cluster {} has no closing boundary and was not extracted",
            head
        );
    }

    Ok(RecoverySummary {
        heads_detected: heads.len() as u64,
        artifacts_written: report.artifacts_written,
        trailing_head: report.trailing_head,
    })
}

fn print_descriptor_report(located: &LocatedDescriptor) {
    let d = &located.descriptor;
    println!("========= sector id - {} =========", located.sector);
    println!("Number of bytes per sector   : {}", d.bytes_per_sector);
    println!("Sectors per cluster          : {}", d.sectors_per_cluster);
    println!("Number of reserved sectors   : {}", d.reserved_sectors);
    println!("Number of FATs               : {}", d.fat_count);
    println!("Sectors per FAT              : {}", d.sectors_per_fat);
    println!("Root directory first cluster : {}", d.root_dir_first_cluster);
    println!("Signature                    : {}", d.boot_signature);
    println!("==================================");
}
