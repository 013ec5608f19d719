//! Directory-backed artifact sink producing numbered `.jpg` files.

use reclaim_core::{CoreError, OutputSink, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes each artifact to `<dir>/file_NNNN.<extension>`.
///
/// The counter advances only when an artifact is finished, so a failed
/// artifact leaves a reusable name behind and never renumbers completed
/// files. The open handle lives strictly between `begin_artifact` and
/// `finish_artifact`.
pub struct DirectorySink {
    output_dir: PathBuf,
    extension: String,
    next_index: u64,
    completed: u64,
    current: Option<BufWriter<File>>,
}

impl DirectorySink {
    pub fn new(output_dir: impl AsRef<Path>, extension: &str) -> Result<Self> {
        fs::create_dir_all(output_dir.as_ref())?;
        Ok(Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            extension: extension.to_owned(),
            next_index: 0,
            completed: 0,
            current: None,
        })
    }

    /// Path the next artifact will be written to.
    pub fn next_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("file_{:04}.{}", self.next_index, self.extension))
    }
}

impl OutputSink for DirectorySink {
    fn begin_artifact(&mut self) -> Result<()> {
        debug_assert!(self.current.is_none(), "previous artifact still open");
        let file = File::create(self.next_path())?;
        self.current = Some(BufWriter::with_capacity(128 * 1024, file));
        Ok(())
    }

    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let writer = self
            .current
            .as_mut()
            .ok_or_else(|| CoreError::Io(std::io::Error::other("no artifact open")))?;
        writer.write_all(bytes).map_err(|e| {
            if e.kind() == std::io::ErrorKind::WriteZero {
                CoreError::IncompleteWrite {
                    requested: bytes.len(),
                    transferred: 0,
                }
            } else {
                CoreError::Io(e)
            }
        })
    }

    fn finish_artifact(&mut self) -> Result<()> {
        let mut writer = self
            .current
            .take()
            .ok_or_else(|| CoreError::Io(std::io::Error::other("no artifact open")))?;
        writer.flush()?;
        self.next_index += 1;
        self.completed += 1;
        Ok(())
    }

    fn artifacts_written(&self) -> u64 {
        self.completed
    }
}
