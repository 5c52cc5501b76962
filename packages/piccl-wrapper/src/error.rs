use std::io;
use std::path::PathBuf;

use piccl_pipeline::PipelineError;
use thiserror::Error;

use crate::job::JobDataError;
use crate::pipelines::Stage;
use crate::reference_data::ReferenceKind;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
/// Reference data for the language is missing or incomplete.
pub const EXIT_REFERENCE_DATA: i32 = 4;
pub const EXIT_INPUT_TYPE: i32 = 5;
/// A pipeline exited non-zero or could not be launched.
pub const EXIT_PIPELINE: i32 = 6;

/// Failures that end a job. The display text is what the service shows the user.
#[derive(Debug, Error)]
pub enum RunnerError {
  #[error("ERROR: Unable to find data files for language '{language}' in path {}", .root.display())]
  MissingLanguageData { language: String, root: PathBuf },

  #[error("ERROR: Unable to find {kind} file for language '{language}' in path {}", .root.display())]
  MissingReferenceFile {
    kind: ReferenceKind,
    language: String,
    root: PathBuf,
  },

  #[error("ERROR: Unable to deduce input type on the basis of input files")]
  UndeducibleInputType,

  #[error("ERROR: {stage} pipeline failed {}", describe_exit(.code))]
  PipelineFailed { stage: Stage, code: Option<i32> },

  #[error("ERROR: {0}")]
  Pipeline(#[from] PipelineError),

  #[error("ERROR: Unable to load job data: {0}")]
  JobData(#[from] JobDataError),

  #[error("ERROR: Unable to write status file: {0}")]
  Status(#[source] io::Error),

  #[error("ERROR: {context}: {source}")]
  Io {
    context: String,
    #[source]
    source: io::Error,
  },
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("with exit code {code}"),
    None => "after being terminated by a signal".to_string(),
  }
}

impl RunnerError {
  pub fn io(context: impl Into<String>, source: io::Error) -> Self {
    Self::Io {
      context: context.into(),
      source,
    }
  }

  /// Process exit code reported to the invoking service.
  pub fn exit_code(&self) -> i32 {
    match self {
      Self::MissingLanguageData { .. } | Self::MissingReferenceFile { .. } => EXIT_REFERENCE_DATA,
      Self::UndeducibleInputType => EXIT_INPUT_TYPE,
      Self::PipelineFailed { .. } | Self::Pipeline(_) => EXIT_PIPELINE,
      Self::JobData(_) | Self::Status(_) | Self::Io { .. } => EXIT_FAILURE,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_exit_codes() {
    let missing = RunnerError::MissingLanguageData {
      language: "deu".into(),
      root: PathBuf::from("/data"),
    };
    assert_eq!(missing.exit_code(), 4);

    let lexicon = RunnerError::MissingReferenceFile {
      kind: ReferenceKind::Lexicon,
      language: "deu".into(),
      root: PathBuf::from("/data"),
    };
    assert_eq!(lexicon.exit_code(), 4);

    assert_eq!(RunnerError::UndeducibleInputType.exit_code(), 5);

    let failed = RunnerError::PipelineFailed {
      stage: Stage::Ticcl,
      code: Some(1),
    };
    assert_eq!(failed.exit_code(), 6);

    let io = RunnerError::io("removing work directory", io::Error::other("boom"));
    assert_eq!(io.exit_code(), 1);
  }

  #[test]
  fn test_messages() {
    let missing = RunnerError::MissingReferenceFile {
      kind: ReferenceKind::Confusion,
      language: "nld".into(),
      root: PathBuf::from("/data"),
    };
    assert_eq!(
      missing.to_string(),
      "ERROR: Unable to find confusion file for language 'nld' in path /data"
    );

    let failed = RunnerError::PipelineFailed {
      stage: Stage::Ocr,
      code: Some(3),
    };
    assert_eq!(failed.to_string(), "ERROR: OCR pipeline failed with exit code 3");

    let killed = RunnerError::PipelineFailed {
      stage: Stage::Ticcl,
      code: None,
    };
    assert_eq!(killed.to_string(), "ERROR: TICCL pipeline failed after being terminated by a signal");
  }
}
