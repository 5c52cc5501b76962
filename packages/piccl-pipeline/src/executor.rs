use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::trace::TraceArtifact;

/// One pipeline invocation: the workflow to run, its named parameters, the
/// directory it is launched from and where it should leave its trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub workflow: String,
    pub params: Vec<(String, String)>,
    pub current_dir: PathBuf,
    pub trace_file: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(workflow: impl Into<String>, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            workflow: workflow.into(),
            params: Vec::new(),
            current_dir: current_dir.into(),
            trace_file: None,
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn with_trace(mut self, trace_file: impl Into<PathBuf>) -> Self {
        self.trace_file = Some(trace_file.into());
        self
    }

    /// Looks up a parameter value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub trace: Option<TraceArtifact>,
}

impl PipelineOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed waiting for pipeline process: {0}")]
    Wait(#[source] io::Error),
    #[error("failed to read trace file {}: {source}", .path.display())]
    Trace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[async_trait]
pub trait PipelineExecutor: Send + Sync {
    async fn run(&self, spec: &CommandSpec) -> Result<PipelineOutcome, PipelineError>;
}
