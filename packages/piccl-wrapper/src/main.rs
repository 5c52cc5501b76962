mod cli;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use clap::Parser;
use cli::Args;
use piccl_pipeline::NextflowExecutor;
use piccl_wrapper::error::{EXIT_FAILURE, EXIT_SUCCESS};
use piccl_wrapper::{JobRunner, RunnerConfig, StatusFile};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
  let args = Args::parse();
  init_tracing();

  let config = match runner_config(&args) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Error: {e:#}");
      process::exit(EXIT_FAILURE);
    }
  };

  let executor = NextflowExecutor::new(&args.nextflow);
  tracing::debug!(
    version = env!("CARGO_PKG_VERSION"),
    work_dir = %config.work_dir.display(),
    nextflow = %executor.program().display(),
    "configuration"
  );

  let mut runner = JobRunner::new(config, executor, StatusFile::new(&args.status_file));

  let code = match runner.run_file(&args.data_file).await {
    Ok(_) => EXIT_SUCCESS,
    Err(e) => e.exit_code(),
  };
  process::exit(code);
}

/// Turns the arguments into a runner configuration. Paths are made absolute because the
/// pipelines are launched from the working directory, not from ours.
fn runner_config(args: &Args) -> anyhow::Result<RunnerConfig> {
  let work_dir = match &args.work_dir {
    Some(dir) => absolute(dir)?,
    None => std::env::current_dir().context("failed to determine current directory")?,
  };

  Ok(
    RunnerConfig::new(
      absolute(&args.input_dir)?,
      absolute(&args.output_dir)?,
      absolute(&args.data_root)?,
      work_dir,
    )
    .with_workflows(&args.ocr_workflow, &args.ticcl_workflow)
    .keep_work_on_failure(args.keep_work_on_failure),
  )
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
  std::path::absolute(path).with_context(|| format!("invalid path {}", path.display()))
}

/// Logs go to stderr, next to the pipeline transcripts. `RUST_LOG` overrides the default level.
fn init_tracing() {
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("piccl_wrapper=info,piccl_pipeline=info"));

  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}
