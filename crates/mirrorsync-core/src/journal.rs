//! Append-only action log
//!
//! One line per event, human-readable, never truncated:
//!
//! ```text
//! [2024-05-01 12:00:00] - Created: /data/source/a.txt > /backup/replica/a.txt
//! [2024-05-01 12:00:00] - Deleted:  > /backup/replica/old.txt
//! [2024-05-01 12:00:00] - Successfully synced
//! ```
//!
//! Deletions have no source counterpart, so their source side is empty.
//! Control characters in paths are escaped (`\n`, `\u{1b}`) so an entry never
//! spans more than one line.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{Local, NaiveDateTime};

use crate::error::Result;
use crate::sync::{ActionKind, SyncAction};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Label written in front of every log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionLabel {
    /// A directory or file was created in the replica
    Created,
    /// A directory or file was removed from the replica
    Deleted,
    /// A replica file was overwritten from the source
    Modified,
    /// An individual action could not be applied
    Failed,
    /// A cycle ran to completion
    SuccessfullySynced,
    /// A cycle was aborted before it could complete
    SyncFailed,
}

impl fmt::Display for ActionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Created => "Created",
            Self::Deleted => "Deleted",
            Self::Modified => "Modified",
            Self::Failed => "Failed",
            Self::SuccessfullySynced => "Successfully synced",
            Self::SyncFailed => "Sync failed",
        };
        f.write_str(label)
    }
}

impl From<ActionKind> for ActionLabel {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::CreateDir | ActionKind::CreateFile => Self::Created,
            ActionKind::DeleteDir | ActionKind::DeleteFile => Self::Deleted,
            ActionKind::ModifyFile => Self::Modified,
        }
    }
}

/// A single line of the action log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time of the event
    pub timestamp: NaiveDateTime,
    /// What happened
    pub label: ActionLabel,
    /// Source and replica paths, absent for cycle markers
    pub paths: Option<(String, String)>,
}

impl LogEntry {
    /// Entry stamped with the current local time
    #[must_use]
    pub fn now(label: ActionLabel, paths: Option<(String, String)>) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            label,
            paths,
        }
    }

    /// Entry describing an action
    #[must_use]
    pub fn for_action(label: ActionLabel, action: &SyncAction) -> Self {
        let source = action.source().map(escape_path).unwrap_or_default();
        let replica = escape_path(action.replica());
        Self::now(label, Some((source, replica)))
    }
}

fn escape_path(path: &Path) -> String {
    let raw = path.display().to_string();
    if !raw.chars().any(char::is_control) {
        return raw;
    }
    raw.chars()
        .map(|c| {
            if c.is_control() {
                c.escape_default().to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] - {}", self.timestamp.format(TIMESTAMP_FORMAT), self.label)?;
        if let Some((source, replica)) = &self.paths {
            write!(f, ": {source} > {replica}")?;
        }
        Ok(())
    }
}

/// Durable record of every reconciliation action and cycle boundary
#[derive(Debug)]
pub struct ActionLog {
    path: PathBuf,
    file: File,
    echo: bool,
}

impl ActionLog {
    /// Open the log for appending, creating it (and its parent directory) if absent
    ///
    /// An existing log is never truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its parent directory cannot be created.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            echo: false,
        })
    }

    /// Mirror every entry to stdout as well
    #[must_use]
    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Location of the log file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a successfully applied action
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn record(&mut self, action: &SyncAction) -> Result<()> {
        self.write(&LogEntry::for_action(action.kind().into(), action))
    }

    /// Record an action that could not be applied
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn record_failure(&mut self, action: &SyncAction) -> Result<()> {
        self.write(&LogEntry::for_action(ActionLabel::Failed, action))
    }

    /// Mark the end of a completed cycle
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn cycle_completed(&mut self) -> Result<()> {
        self.write(&LogEntry::now(ActionLabel::SuccessfullySynced, None))
    }

    /// Mark a cycle that was aborted
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn cycle_failed(&mut self) -> Result<()> {
        self.write(&LogEntry::now(ActionLabel::SyncFailed, None))
    }

    /// Append one entry and flush it to disk
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written.
    pub fn write(&mut self, entry: &LogEntry) -> Result<()> {
        writeln!(self.file, "{entry}")
            .and_then(|()| self.file.flush())
            .with_context(|| format!("Failed to write to log file: {}", self.path.display()))?;

        if self.echo {
            println!("{entry}");
        }

        Ok(())
    }
}
