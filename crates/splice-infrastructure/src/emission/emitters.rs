//! Implementation emitters
//!
//! | Emitter | Destination |
//! |---------|-------------|
//! | [`FileSystemEmitter`] | Writes each file at its generated path |
//! | [`StdoutEmitter`] | Prints files for dry runs |
//! | [`InMemoryEmitter`] | Keeps rendered text, keyed by path |

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use splice_domain::GeneratedFile;
use splice_domain::error::{Error, Result};
use splice_domain::ports::ImplementationEmitter;
use tracing::{debug, info};

use super::printer::render;
use crate::error_ext::ErrorContext;

/// Writes generated files to disk, creating the `gen/` directory as needed
#[derive(Debug, Default, Clone)]
pub struct FileSystemEmitter;

impl FileSystemEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl ImplementationEmitter for FileSystemEmitter {
    fn emit(&self, file: &GeneratedFile) -> Result<()> {
        if let Some(dir) = file.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .io_context(format!("Failed to create directory {}", dir.display()))?;
        }
        fs::write(&file.path, render(file))
            .io_context(format!("Failed to write {}", file.path.display()))?;
        info!("Wrote {}", file.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "filesystem"
    }
}

/// Prints generated files to stdout instead of writing them
#[derive(Debug, Default, Clone)]
pub struct StdoutEmitter;

impl StdoutEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl ImplementationEmitter for StdoutEmitter {
    fn emit(&self, file: &GeneratedFile) -> Result<()> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "// {}\n{}", file.path.display(), render(file))
            .io_context("Failed to write to stdout")?;
        debug!("Printed {}", file.path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "stdout"
    }
}

/// Collects rendered files in memory
#[derive(Debug, Default)]
pub struct InMemoryEmitter {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl InMemoryEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered text of the file emitted at `path`
    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().ok()?.get(path).cloned()
    }

    /// All emitted files, ordered by path
    pub fn files(&self) -> Result<BTreeMap<PathBuf, String>> {
        self.files
            .lock()
            .map(|files| files.clone())
            .map_err(|_| Error::internal("in-memory emitter lock poisoned"))
    }
}

impl ImplementationEmitter for InMemoryEmitter {
    fn emit(&self, file: &GeneratedFile) -> Result<()> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| Error::internal("in-memory emitter lock poisoned"))?;
        files.insert(file.path.clone(), render(file));
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
