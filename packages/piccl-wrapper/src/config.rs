//! Runner configuration, assembled once by the binary and handed to the runner.
use std::path::PathBuf;

/// Default Nextflow launcher.
pub const DEFAULT_NEXTFLOW: &str = "nextflow";
pub const DEFAULT_OCR_WORKFLOW: &str = "LanguageMachines/PICCL/ocr.nf";
pub const DEFAULT_TICCL_WORKFLOW: &str = "LanguageMachines/PICCL/ticcl.nf";

/// Everything the runner needs to know about where a job lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
  pub input_dir: PathBuf,
  pub output_dir: PathBuf,
  /// Root of the PICCL data; reference files live under `<root>/data/int/<lang>/`.
  pub data_root: PathBuf,
  /// Holds the aliases, `ocr_output/`, trace files and Nextflow's `work/`.
  pub work_dir: PathBuf,
  pub ocr_workflow: String,
  pub ticcl_workflow: String,
  /// Keep Nextflow's `work/` directory when a pipeline fails.
  pub keep_work_on_failure: bool,
}

impl RunnerConfig {
  pub fn new(
    input_dir: impl Into<PathBuf>,
    output_dir: impl Into<PathBuf>,
    data_root: impl Into<PathBuf>,
    work_dir: impl Into<PathBuf>,
  ) -> Self {
    Self {
      input_dir: input_dir.into(),
      output_dir: output_dir.into(),
      data_root: data_root.into(),
      work_dir: work_dir.into(),
      ocr_workflow: DEFAULT_OCR_WORKFLOW.to_string(),
      ticcl_workflow: DEFAULT_TICCL_WORKFLOW.to_string(),
      keep_work_on_failure: false,
    }
  }

  pub fn with_workflows(mut self, ocr: impl Into<String>, ticcl: impl Into<String>) -> Self {
    self.ocr_workflow = ocr.into();
    self.ticcl_workflow = ticcl.into();
    self
  }

  pub fn keep_work_on_failure(mut self, keep: bool) -> Self {
    self.keep_work_on_failure = keep;
    self
  }

  pub fn work_path(&self, name: &str) -> PathBuf {
    self.work_dir.join(name)
  }
}
