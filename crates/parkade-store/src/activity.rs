use crate::StoreError;
use parkade_schema::Plate;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The kind of vehicle movement being journaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Entered,
    Exited,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Entered => write!(f, "entered"),
            Action::Exited => write!(f, "exited"),
        }
    }
}

/// Append-only journal of vehicle movements.
///
/// Holds only a path. The file handle is opened for append inside each
/// [`append`](Self::append) call and released when the call returns, so a
/// failed write never leaks an open handle. No file locking is performed;
/// concurrent writers from other processes may interleave lines.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    path: PathBuf,
}

impl ActivityLog {
    /// Create a journal handle for the given path. No I/O happens here;
    /// call [`initialize`](Self::initialize) to materialize the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the journal file exists, creating it empty if absent.
    /// An existing journal is never truncated. A missing parent directory
    /// surfaces as [`StoreError::Io`].
    pub fn initialize(&self) -> Result<(), StoreError> {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        Ok(())
    }

    /// Append one movement line: plate, action word, local timestamp at
    /// second precision. The handle is scoped to this call and released
    /// even if the write fails partway.
    pub fn append(&self, plate: &Plate, action: Action) -> Result<(), StoreError> {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        writeln!(file, "{plate} {action} at {timestamp}")?;
        debug!("journal append: {plate} {action}");
        Ok(())
    }

    /// All lines currently in the journal, oldest first.
    pub fn entries(&self) -> Result<Vec<String>, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(content.lines().map(str::to_owned).collect())
    }
}
