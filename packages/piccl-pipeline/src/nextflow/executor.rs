use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::executor::{CommandSpec, PipelineError, PipelineExecutor, PipelineOutcome};
use crate::trace::TraceArtifact;

use super::command;

/// Runs workflows through the `nextflow` launcher.
///
/// Nextflow's stdout is sent to our stderr so the invoking service's error
/// log holds the whole pipeline transcript; its stderr is inherited.
pub struct NextflowExecutor {
    program: PathBuf,
}

impl NextflowExecutor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for NextflowExecutor {
    fn default() -> Self {
        Self::new("nextflow")
    }
}

#[async_trait]
impl PipelineExecutor for NextflowExecutor {
    async fn run(&self, spec: &CommandSpec) -> Result<PipelineOutcome, PipelineError> {
        let args = command::command_line(spec);
        tracing::info!(
            command = %command::render(&self.program, &args),
            dir = %spec.current_dir.display(),
            "launching pipeline"
        );

        if let Some(file) = &spec.trace_file {
            discard_previous_trace(&spec.current_dir.join(file)).await?;
        }

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(&spec.current_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(std::io::stderr()))
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| PipelineError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        let status = child.wait().await.map_err(PipelineError::Wait)?;
        tracing::debug!(exit_code = ?status.code(), "pipeline process exited");

        let trace = match &spec.trace_file {
            Some(file) => TraceArtifact::load(&spec.current_dir.join(file)).await?,
            None => None,
        };

        Ok(PipelineOutcome {
            exit_code: status.code(),
            trace,
        })
    }
}

/// A trace left by an earlier launch in the same directory must not be read back as this one's.
async fn discard_previous_trace(path: &Path) -> Result<(), PipelineError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed previous trace file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PipelineError::Trace {
            path: path.to_path_buf(),
            source,
        }),
    }
}
