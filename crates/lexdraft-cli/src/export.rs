//! Export sink writing approved drafts to disk.

use lexdraft_preview::{ExportRequest, ExportSink};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes approved drafts into a directory as `<base>.<format>`
///
/// The file holds the draft text; conversion to the binary format is left
/// to downstream tooling.
#[derive(Debug)]
pub struct FileExportSink {
    dir: PathBuf,
    last_written: Option<PathBuf>,
}

impl FileExportSink {
    /// Create a sink for the given output directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_written: None,
        }
    }

    /// Path of the most recently written file.
    pub fn last_written(&self) -> Option<&Path> {
        self.last_written.as_deref()
    }
}

impl ExportSink for FileExportSink {
    type Error = io::Error;

    fn deliver(&mut self, request: ExportRequest) -> Result<(), io::Error> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(request.file_name());
        fs::write(&path, request.content())?;
        info!("Wrote {} ({})", path.display(), request.format().mime_type());
        self.last_written = Some(path);
        Ok(())
    }
}
