//! Deduces which pipeline path a job takes from the templates of its input files.
use std::fmt;

use crate::job::InputFile;

/// Image batch formats the OCR workflow accepts as `--inputtype`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
  PdfImages,
  Tif,
  Jpg,
  Png,
  Gif,
}

impl ImageFormat {
  pub fn as_str(self) -> &'static str {
    match self {
      ImageFormat::PdfImages => "pdfimages",
      ImageFormat::Tif => "tif",
      ImageFormat::Jpg => "jpg",
      ImageFormat::Png => "png",
      ImageFormat::Gif => "gif",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
  /// Scanned pages that must go through OCR first.
  Images(ImageFormat),
  /// FoLiA documents that already carry text; OCR is skipped.
  FoliaOcr,
}

impl InputType {
  /// Maps an input template tag to its input type.
  pub fn from_template(template: &str) -> Option<Self> {
    let input_type = match template {
      "pdfimages" => InputType::Images(ImageFormat::PdfImages),
      "tif" => InputType::Images(ImageFormat::Tif),
      "jpg" => InputType::Images(ImageFormat::Jpg),
      "png" => InputType::Images(ImageFormat::Png),
      "gif" => InputType::Images(ImageFormat::Gif),
      "foliaocr" => InputType::FoliaOcr,
      _ => return None,
    };
    Some(input_type)
  }
}

impl fmt::Display for InputType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      InputType::Images(format) => f.write_str(format.as_str()),
      InputType::FoliaOcr => f.write_str("foliaocr"),
    }
  }
}

/// The first input with a recognized template decides; unrecognized templates are skipped.
pub fn deduce(inputs: &[InputFile]) -> Option<InputType> {
  let mut recognized = inputs
    .iter()
    .filter_map(|input| input.input_template().and_then(InputType::from_template));

  let chosen = recognized.next()?;
  for other in recognized.filter(|other| *other != chosen) {
    tracing::warn!(chosen = %chosen, ignored = %other, "inputs have mixed templates");
  }
  Some(chosen)
}
