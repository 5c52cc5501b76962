//! Job data handed over by the workflow service: parameters plus the input file list.
use serde::{de, Deserialize, Deserializer};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The complete job description, loaded from the job data file.
#[derive(Debug, Clone, Deserialize)]
pub struct JobData {
  pub parameters: JobParameters,
  #[serde(default)]
  pub input: Vec<InputFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobParameters {
  /// Language code as chosen by the user, e.g. `deu_frak`.
  pub lang: String,
  /// Clip threshold for TICCL's ranking.
  #[serde(deserialize_with = "number_or_string")]
  pub rank: u32,
  /// Maximum edit distance for correction candidates.
  #[serde(deserialize_with = "number_or_string")]
  pub distance: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputFile {
  pub filename: String,
  #[serde(default)]
  pub metadata: InputMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputMetadata {
  #[serde(rename = "inputtemplate", default)]
  pub input_template: Option<String>,
}

impl InputFile {
  pub fn input_template(&self) -> Option<&str> {
    self.metadata.input_template.as_deref()
  }
}

#[derive(Debug, Error)]
pub enum JobDataError {
  #[error("failed to read {}: {source}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error("failed to parse job data: {0}")]
  Parse(#[from] serde_json::Error),
}

impl JobData {
  pub fn load(path: &Path) -> Result<Self, JobDataError> {
    let contents = std::fs::read_to_string(path).map_err(|source| JobDataError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(&contents)
  }

  pub fn from_json(contents: &str) -> Result<Self, JobDataError> {
    Ok(serde_json::from_str(contents)?)
  }
}

/// The service serializes some numeric parameters as text, so accept both.
fn number_or_string<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum NumberOrString {
    Number(u32),
    Text(String),
  }

  match NumberOrString::deserialize(deserializer)? {
    NumberOrString::Number(n) => Ok(n),
    NumberOrString::Text(s) => s
      .trim()
      .parse()
      .map_err(|_| de::Error::custom(format!("expected a non-negative integer, got {s:?}"))),
  }
}
