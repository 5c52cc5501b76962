//! Command specs for the two PICCL workflows.
use piccl_pipeline::CommandSpec;
use std::fmt;
use std::path::Path;

use crate::config::RunnerConfig;
use crate::input_type::ImageFormat;
use crate::job::JobParameters;
use crate::reference_data::ReferenceAliases;

/// Directory, relative to the working directory, the OCR workflow writes to.
pub const OCR_OUTPUT_DIR: &str = "ocr_output";
pub const TRACE_FILE: &str = "trace.txt";
/// Nextflow's own scratch directory, removed when the job ends.
pub const NEXTFLOW_WORK_DIR: &str = "work";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
  Ocr,
  Ticcl,
}

impl fmt::Display for Stage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Stage::Ocr => f.write_str("OCR"),
      Stage::Ticcl => f.write_str("TICCL"),
    }
  }
}

fn path_arg(path: &Path) -> String {
  path.display().to_string()
}

/// The OCR run. `language` is the tag as the user chose it, so `deu_frak` reaches the
/// OCR models unchanged.
pub fn ocr_command(config: &RunnerConfig, format: ImageFormat, language: &str, output_dir: &Path) -> CommandSpec {
  CommandSpec::new(&config.ocr_workflow, &config.work_dir)
    .param("inputdir", path_arg(&config.input_dir))
    .param("outputdir", path_arg(output_dir))
    .param("inputtype", format.as_str())
    .param("language", language)
    .with_trace(TRACE_FILE)
}

pub fn ticcl_command(
  config: &RunnerConfig,
  input_dir: &Path,
  aliases: &ReferenceAliases,
  parameters: &JobParameters,
) -> CommandSpec {
  CommandSpec::new(&config.ticcl_workflow, &config.work_dir)
    .param("inputdir", path_arg(input_dir))
    .param("outputdir", path_arg(&config.output_dir))
    .param("lexicon", path_arg(&aliases.lexicon))
    .param("alphabet", path_arg(&aliases.alphabet))
    .param("charconfus", path_arg(&aliases.confusion))
    .param("clip", parameters.rank.to_string())
    .param("distance", parameters.distance.to_string())
    .with_trace(TRACE_FILE)
}
