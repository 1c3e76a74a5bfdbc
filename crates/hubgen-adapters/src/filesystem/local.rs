//! Local file store adapter using std::fs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use hubgen_core::{
    application::{ApplicationError, ports::FileStore},
    error::{HubgenError, HubgenResult},
};

/// Production file store using `std::fs`.
///
/// Each call opens, uses and drops its own handle, so nothing stays open
/// past the call on any exit path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

impl FileStore for LocalFileStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> HubgenResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> HubgenResult<()> {
        let file = File::create(path).map_err(|e| map_io_error(path, e, "create file"))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> HubgenResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> HubgenError {
    ApplicationError::IoFailure {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}
