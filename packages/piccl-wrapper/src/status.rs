//! Progress reporting towards the invoking service.
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Receives (message, completion percentage) progress entries.
pub trait StatusSink {
  fn report(&mut self, message: &str, completion: Option<u8>) -> io::Result<()>;
}

/// Appends entries to the status file the service polls.
///
/// Each entry is one line: `<percentage>\t<unix timestamp>\t<message>`, with an empty
/// percentage field when none is given.
pub struct StatusFile {
  path: PathBuf,
}

impl StatusFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl StatusSink for StatusFile {
  fn report(&mut self, message: &str, completion: Option<u8>) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
    let completion = completion.map(|c| c.to_string()).unwrap_or_default();
    // Newlines would split the entry.
    let message = message.replace('\n', " ");
    writeln!(file, "{}\t{}\t{}", completion, Utc::now().timestamp(), message)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEntry {
  pub message: String,
  pub completion: Option<u8>,
}

/// Keeps entries in memory.
#[derive(Debug, Default)]
pub struct MemoryStatus {
  entries: Vec<StatusEntry>,
}

impl MemoryStatus {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn entries(&self) -> &[StatusEntry] {
    &self.entries
  }

  pub fn last(&self) -> Option<&StatusEntry> {
    self.entries.last()
  }
}

impl StatusSink for MemoryStatus {
  fn report(&mut self, message: &str, completion: Option<u8>) -> io::Result<()> {
    self.entries.push(StatusEntry {
      message: message.to_string(),
      completion,
    });
    Ok(())
  }
}
