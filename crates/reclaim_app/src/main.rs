//! reclaim - recovers photos from a raw dump of a FAT32 memory card.
//!
//! The dump is never mounted: the tool finds the boot sector by signature,
//! derives cluster geometry from it, then carves clusters whose contents
//! match camera-specific header signatures.

mod pipeline;

use anyhow::Result;
use clap::Parser;
use reclaim_core::{CoreError, LocatorConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "reclaim")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Raw byte-for-byte dump of the memory card
    dump: PathBuf,

    /// Directory to write recovered files into
    #[arg(short, long, default_value = "./recovered")]
    output: PathBuf,

    /// Sector size the boot sector search assumes
    #[arg(long, default_value_t = 512)]
    sector_size: u32,

    /// How many bytes from the start of the dump to search for a boot sector
    #[arg(long, default_value_t = 100_000_000)]
    search_limit: u64,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = LocatorConfig {
        sector_size: args.sector_size,
        search_limit: args.search_limit,
    };

    match pipeline::run_recovery(&args.dump, &args.output, config) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        // no geometry means nothing to recover, not a crash
        Err(err) if is_descriptor_not_found(&err) => {
            eprintln!("[reclaim] Could not find a volume descriptor; nothing to recover");
            eprintln!("[reclaim] {err:#}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Err(err),
    }
}

fn is_descriptor_not_found(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<CoreError>(),
        Some(CoreError::DescriptorNotFound { .. })
    )
}
