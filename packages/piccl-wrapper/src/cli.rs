//! Command line arguments backing the `piccl-wrapper` binary.
use clap::Parser;
use piccl_wrapper::config::{DEFAULT_NEXTFLOW, DEFAULT_OCR_WORKFLOW, DEFAULT_TICCL_WORKFLOW};
use std::path::PathBuf;

/// The positional arguments follow the order the workflow service passes them in.
#[derive(Parser, Debug)]
#[command(
  name = "piccl-wrapper",
  about = "Runs the PICCL OCR and TICCL correction pipelines for a workflow service job",
  version
)]
pub struct Args {
  /// Job data file (JSON) with the job parameters and input file list
  pub data_file: PathBuf,

  /// Status file progress is appended to
  pub status_file: PathBuf,

  /// Directory holding the uploaded input files
  pub input_dir: PathBuf,

  /// Directory the correction pipeline writes its results to
  pub output_dir: PathBuf,

  /// PICCL data root; reference files are read from <root>/data/int/<lang>/
  pub data_root: PathBuf,

  /// Working directory for reference links, OCR output and pipeline traces [default: current directory]
  #[arg(long)]
  pub work_dir: Option<PathBuf>,

  /// Nextflow executable
  #[arg(long, default_value = DEFAULT_NEXTFLOW)]
  pub nextflow: PathBuf,

  /// OCR workflow to run
  #[arg(long, default_value = DEFAULT_OCR_WORKFLOW)]
  pub ocr_workflow: String,

  /// Correction workflow to run
  #[arg(long, default_value = DEFAULT_TICCL_WORKFLOW)]
  pub ticcl_workflow: String,

  /// Keep Nextflow's work directory when a pipeline fails
  #[arg(long)]
  pub keep_work_on_failure: bool,
}
