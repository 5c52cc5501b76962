//! Drives one job from reference data resolution to the final status entry.
use piccl_pipeline::{CommandSpec, PipelineExecutor, TraceArtifact};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::input_type::{self, InputType};
use crate::job::JobData;
use crate::pipelines::{self, Stage, NEXTFLOW_WORK_DIR, OCR_OUTPUT_DIR};
use crate::reference_data::{self, ReferenceAliases};
use crate::status::StatusSink;

pub const PROGRESS_START: u8 = 0;
pub const PROGRESS_OCR: u8 = 1;
pub const PROGRESS_TICCL: u8 = 50;
pub const PROGRESS_DONE: u8 = 100;

const TRACE_RULE: &str = "-------------------------------";

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
  pub input_type: InputType,
  pub aliases: ReferenceAliases,
  /// Where the correction pipeline read from: the input directory or the OCR output.
  pub correction_input: PathBuf,
}

/// Runs a job's pipelines through `E` and reports progress to `S`.
///
/// Pipeline traces and error messages go to the diagnostics stream, stderr by default,
/// which the invoking service keeps as the job's error log.
pub struct JobRunner<E, S> {
  config: RunnerConfig,
  executor: E,
  status: S,
  diagnostics: Box<dyn Write + Send>,
}

impl<E: PipelineExecutor, S: StatusSink> JobRunner<E, S> {
  pub fn new(config: RunnerConfig, executor: E, status: S) -> Self {
    Self {
      config,
      executor,
      status,
      diagnostics: Box::new(io::stderr()),
    }
  }

  pub fn with_diagnostics(mut self, diagnostics: impl Write + Send + 'static) -> Self {
    self.diagnostics = Box::new(diagnostics);
    self
  }

  pub fn executor(&self) -> &E {
    &self.executor
  }

  pub fn status_sink(&self) -> &S {
    &self.status
  }

  /// Loads the job data file, then runs the job.
  pub async fn run_file(&mut self, data_file: &Path) -> Result<RunSummary, RunnerError> {
    match JobData::load(data_file) {
      Ok(job) => self.run(&job).await,
      Err(e) => {
        let err = RunnerError::from(e);
        self.report_failure(&err);
        Err(err)
      }
    }
  }

  /// Runs the job. Any failure is reported to the status sink at 0% and to the
  /// diagnostics stream before it is returned.
  pub async fn run(&mut self, job: &JobData) -> Result<RunSummary, RunnerError> {
    let result = match self.report("Starting...", PROGRESS_START) {
      Ok(()) => self.execute(job).await,
      Err(e) => Err(e),
    };

    if let Err(err) = &result {
      self.report_failure(err);
    }
    result
  }

  async fn execute(&mut self, job: &JobData) -> Result<RunSummary, RunnerError> {
    let parameters = &job.parameters;
    tracing::info!(
      language = %parameters.lang,
      rank = parameters.rank,
      distance = parameters.distance,
      inputs = job.input.len(),
      "starting job"
    );

    let aliases = reference_data::resolve(&self.config.data_root, &parameters.lang, &self.config.work_dir)?;
    let input_type = input_type::deduce(&job.input).ok_or(RunnerError::UndeducibleInputType)?;
    tracing::info!(input_type = %input_type, "deduced input type");

    let correction_input = match input_type {
      InputType::FoliaOcr => {
        tracing::info!("input is already FoLiA, skipping OCR");
        self.config.input_dir.clone()
      }
      InputType::Images(format) => {
        self.report("Running OCR Pipeline", PROGRESS_OCR)?;
        let ocr_output = self.config.work_path(OCR_OUTPUT_DIR);
        let spec = pipelines::ocr_command(&self.config, format, &parameters.lang, &ocr_output);
        self.run_stage(Stage::Ocr, &spec).await?;
        ocr_output
      }
    };

    self.report("Running TICCL Pipeline", PROGRESS_TICCL)?;
    let spec = pipelines::ticcl_command(&self.config, &correction_input, &aliases, parameters);
    self.run_stage(Stage::Ticcl, &spec).await?;

    self.remove_work_dir().await?;
    self.report("All done!", PROGRESS_DONE)?;

    Ok(RunSummary {
      input_type,
      aliases,
      correction_input,
    })
  }

  async fn run_stage(&mut self, stage: Stage, spec: &CommandSpec) -> Result<(), RunnerError> {
    let result = self.invoke(stage, spec).await;

    if result.is_err() {
      if self.config.keep_work_on_failure {
        tracing::info!(dir = %self.config.work_path(NEXTFLOW_WORK_DIR).display(), "keeping work directory for inspection");
      } else if let Err(e) = self.remove_work_dir().await {
        tracing::warn!(error = %e, "failed to clean up after pipeline failure");
      }
    }
    result
  }

  async fn invoke(&mut self, stage: Stage, spec: &CommandSpec) -> Result<(), RunnerError> {
    tracing::info!(stage = %stage, workflow = %spec.workflow, "running pipeline");
    let outcome = self.executor.run(spec).await?;

    self
      .forward_trace(stage, outcome.trace.as_ref())
      .map_err(|e| RunnerError::io("writing pipeline trace", e))?;

    if !outcome.success() {
      return Err(RunnerError::PipelineFailed {
        stage,
        code: outcome.exit_code,
      });
    }
    tracing::info!(stage = %stage, "pipeline finished");
    Ok(())
  }

  /// Copies the stage's trace under a banner so it ends up in the job's error log.
  fn forward_trace(&mut self, stage: Stage, trace: Option<&TraceArtifact>) -> io::Result<()> {
    writeln!(self.diagnostics, "{stage} pipeline trace summary")?;
    writeln!(self.diagnostics, "{TRACE_RULE}")?;

    match trace {
      Some(trace) => {
        writeln!(self.diagnostics, "{}", trace.contents.trim_end())?;
        if let Some(counts) = trace.status_counts() {
          let tasks = counts
            .iter()
            .map(|(status, count)| format!("{status}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
          tracing::info!(stage = %stage, tasks = %tasks, "pipeline trace");
        }
      }
      None => {
        tracing::warn!(stage = %stage, "pipeline left no trace file");
        writeln!(self.diagnostics, "(no trace file produced)")?;
      }
    }
    self.diagnostics.flush()
  }

  async fn remove_work_dir(&self) -> Result<(), RunnerError> {
    let work = self.config.work_path(NEXTFLOW_WORK_DIR);
    match tokio::fs::remove_dir_all(&work).await {
      Ok(()) => {
        tracing::debug!(dir = %work.display(), "removed work directory");
        Ok(())
      }
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(RunnerError::io(format!("removing {}", work.display()), e)),
    }
  }

  fn report(&mut self, message: &str, completion: u8) -> Result<(), RunnerError> {
    self.status.report(message, Some(completion)).map_err(RunnerError::Status)
  }

  fn report_failure(&mut self, err: &RunnerError) {
    let message = err.to_string();
    if let Err(e) = self.status.report(&message, Some(PROGRESS_START)) {
      tracing::warn!(error = %e, "failed to write error status");
    }
    if let Err(e) = writeln!(self.diagnostics, "{message}") {
      tracing::warn!(error = %e, "failed to write error to diagnostics");
    }
    tracing::error!(exit_code = err.exit_code(), "job failed");
  }
}
