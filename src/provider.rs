// Raw reader: fetches the current content of a virtual file on each call.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Source of one data source's current text.
///
/// Each call must return freshly read content, never a cached copy. Errors are
/// returned as-is; retry policy belongs to the caller.
pub trait Provider {
    /// Replaces the contents of `buf` with the source's current content.
    fn read_current(&mut self, buf: &mut Vec<u8>) -> std::io::Result<()>;

    /// What is being read, for error messages (usually a path).
    fn target(&self) -> &str;
}

impl<P: Provider + ?Sized> Provider for &mut P {
    fn read_current(&mut self, buf: &mut Vec<u8>) -> std::io::Result<()> {
        (**self).read_current(buf)
    }

    fn target(&self) -> &str {
        (**self).target()
    }
}

/// Reads a file from the start on every call (procfs content is regenerated per open).
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    display: String,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let display = path.display().to_string();
        Self { path, display }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Provider for FileProvider {
    fn read_current(&mut self, buf: &mut Vec<u8>) -> std::io::Result<()> {
        buf.clear();
        let mut file = File::open(&self.path)?;
        file.read_to_end(buf)?;
        Ok(())
    }

    fn target(&self) -> &str {
        &self.display
    }
}
