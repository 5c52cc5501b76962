//! # piccl-wrapper
//!
//! Job wrapper that sits between a CLAM-style workflow service and the PICCL pipelines.
//! It turns a job's parameters and uploaded files into one or two Nextflow runs.
//!
//! ## Flow
//!
//! - **Reference data**: find the lexicon, alphabet and confusion table for the job's language
//!   and link them into the working directory as `lexicon.lst`, `alphabet.lst`, `confusion.lst`
//! - **Input type**: deduce from the input templates whether OCR is needed
//! - **OCR**: run the OCR workflow on image input, skipped for FoLiA input
//! - **Correction**: run the TICCL workflow on the OCR output (or the FoLiA input)
//! - **Status**: append progress to the status file the service polls, and exit with a code
//!   the service understands
//!
//! ## Quick Start
//!
//! ```ignore
//! use piccl_wrapper::prelude::*;
//!
//! let config = RunnerConfig::new("input", "output", "/opt/piccl", "/tmp/project");
//! let mut runner = JobRunner::new(config, NextflowExecutor::default(), StatusFile::new("status.log"));
//! let summary = runner.run_file("clam.json".as_ref()).await?;
//! println!("input type: {}", summary.input_type);
//! ```

pub mod config;
pub mod error;
pub mod input_type;
pub mod job;
pub mod pipelines;
pub mod reference_data;
pub mod runner;
pub mod status;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use input_type::{ImageFormat, InputType};
pub use job::{InputFile, JobData, JobDataError, JobParameters};
pub use pipelines::Stage;
pub use reference_data::{ReferenceAliases, ReferenceKind};
pub use runner::{JobRunner, RunSummary};
pub use status::{MemoryStatus, StatusEntry, StatusFile, StatusSink};

/// Prelude module for convenient imports
pub mod prelude {
  pub use crate::{
    ImageFormat, InputFile, InputType, JobData, JobParameters, JobRunner, MemoryStatus, ReferenceAliases,
    ReferenceKind, RunSummary, RunnerConfig, RunnerError, Stage, StatusFile, StatusSink,
  };
  pub use piccl_pipeline::{CommandSpec, NextflowExecutor, PipelineExecutor, PipelineOutcome, TraceArtifact};
}
