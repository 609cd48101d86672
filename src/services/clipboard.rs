//! Clipboard and text-file export.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use thiserror::Error;

/// Errors from clipboard access.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {message}")]
    Unavailable { message: String },

    #[error("failed to write clipboard: {message}")]
    WriteFailed { message: String },
}

/// Put text on the system clipboard.
pub trait ClipboardService: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard backed by `arboard`.
///
/// The platform handle is created lazily on first use so constructing the
/// service never fails in headless environments where no copy ever happens.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardService for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self.handle.lock();
        if guard.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(|err| {
                ClipboardError::Unavailable {
                    message: err.to_string(),
                }
            })?;
            *guard = Some(clipboard);
        }
        let Some(clipboard) = guard.as_mut() else {
            return Err(ClipboardError::Unavailable {
                message: "clipboard handle missing".to_string(),
            });
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|err| ClipboardError::WriteFailed {
                message: err.to_string(),
            })
    }
}

/// Errors from file export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write user-visible text files (e.g. an exported recovery key).
pub trait FileExporter: Send + Sync {
    /// Write `contents` under `file_name`, returning the created path.
    fn write_text_file(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError>;
}

/// Exports into a fixed directory, the OS temp dir by default.
pub struct TempDirExporter {
    dir: PathBuf,
}

impl TempDirExporter {
    pub fn new() -> Self {
        Self {
            dir: std::env::temp_dir(),
        }
    }

    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for TempDirExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl FileExporter for TempDirExporter {
    fn write_text_file(&self, file_name: &str, contents: &str) -> Result<PathBuf, ExportError> {
        let path = self.dir.join(file_name);
        fs::write(&path, contents).map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
