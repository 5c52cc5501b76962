pub mod executor;
pub mod trace;

pub mod nextflow;

pub use executor::{CommandSpec, PipelineError, PipelineExecutor, PipelineOutcome};
pub use nextflow::NextflowExecutor;
pub use trace::TraceArtifact;
