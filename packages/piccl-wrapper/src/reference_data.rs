//! Locates a language's reference files and links them into the working directory under the
//! fixed names the correction pipeline is given.
use crate::error::RunnerError;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReferenceKind {
  Lexicon,
  Alphabet,
  Confusion,
}

impl ReferenceKind {
  /// In the order missing files are reported.
  pub const ALL: [ReferenceKind; 3] = [ReferenceKind::Lexicon, ReferenceKind::Alphabet, ReferenceKind::Confusion];

  pub fn from_extension(extension: &str) -> Option<Self> {
    match extension {
      "dict" => Some(ReferenceKind::Lexicon),
      "chars" => Some(ReferenceKind::Alphabet),
      "confusion" => Some(ReferenceKind::Confusion),
      _ => None,
    }
  }

  /// Name of the link created in the working directory.
  pub fn alias(self) -> &'static str {
    match self {
      ReferenceKind::Lexicon => "lexicon.lst",
      ReferenceKind::Alphabet => "alphabet.lst",
      ReferenceKind::Confusion => "confusion.lst",
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      ReferenceKind::Lexicon => "lexicon",
      ReferenceKind::Alphabet => "alphabet",
      ReferenceKind::Confusion => "confusion",
    }
  }
}

impl fmt::Display for ReferenceKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Paths of the three links in the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceAliases {
  pub lexicon: PathBuf,
  pub alphabet: PathBuf,
  pub confusion: PathBuf,
}

impl ReferenceAliases {
  pub fn path(&self, kind: ReferenceKind) -> &Path {
    match kind {
      ReferenceKind::Lexicon => &self.lexicon,
      ReferenceKind::Alphabet => &self.alphabet,
      ReferenceKind::Confusion => &self.confusion,
    }
  }
}

/// Fraktur German shares the German reference data.
pub fn normalize_language(language: &str) -> &str {
  match language {
    "deu_frak" => "deu",
    other => other,
  }
}

pub fn language_dir(root: &Path, language: &str) -> PathBuf {
  root.join("data").join("int").join(language)
}

/// A language code must name a single entry under `data/int`.
fn is_plain_name(language: &str) -> bool {
  let mut components = Path::new(language).components();
  matches!(
    (components.next(), components.next()),
    (Some(Component::Normal(name)), None) if name == language
  )
}

/// Classifies the files of a language directory by extension.
///
/// Entries are visited in file-name order and the first candidate of each kind wins.
pub fn classify(dir: &Path) -> io::Result<BTreeMap<ReferenceKind, PathBuf>> {
  let mut found: BTreeMap<ReferenceKind, PathBuf> = BTreeMap::new();

  for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
    let entry = entry.map_err(io::Error::from)?;
    if entry.file_type().is_dir() {
      continue;
    }
    let path = entry.path();
    let Some(kind) = path.extension().and_then(|e| e.to_str()).and_then(ReferenceKind::from_extension) else {
      continue;
    };

    match found.get(&kind) {
      Some(chosen) => {
        tracing::warn!(
          kind = %kind,
          chosen = %chosen.display(),
          ignored = %path.display(),
          "multiple reference files of the same kind"
        );
      }
      None => {
        found.insert(kind, path.to_path_buf());
      }
    }
  }

  Ok(found)
}

/// Resolves the reference data for `language` and (re)creates the aliases in `work_dir`.
///
/// Nothing is linked unless all three kinds are present.
pub fn resolve(root: &Path, language: &str, work_dir: &Path) -> Result<ReferenceAliases, RunnerError> {
  let language = normalize_language(language);
  let dir = language_dir(root, language);

  if !is_plain_name(language) || !dir.is_dir() {
    return Err(RunnerError::MissingLanguageData {
      language: language.to_string(),
      root: root.to_path_buf(),
    });
  }

  let dir = fs::canonicalize(&dir).map_err(|e| RunnerError::io(format!("resolving {}", dir.display()), e))?;
  let found = classify(&dir).map_err(|e| RunnerError::io(format!("listing {}", dir.display()), e))?;

  if let Some(kind) = ReferenceKind::ALL.into_iter().find(|kind| !found.contains_key(kind)) {
    return Err(RunnerError::MissingReferenceFile {
      kind,
      language: language.to_string(),
      root: root.to_path_buf(),
    });
  }

  for (kind, target) in &found {
    let alias = work_dir.join(kind.alias());
    bind_alias(&alias, target).map_err(|e| RunnerError::io(format!("linking {}", alias.display()), e))?;
    tracing::debug!(kind = %kind, target = %target.display(), "linked reference file");
  }

  tracing::info!(language, dir = %dir.display(), "reference data resolved");

  Ok(ReferenceAliases {
    lexicon: work_dir.join(ReferenceKind::Lexicon.alias()),
    alphabet: work_dir.join(ReferenceKind::Alphabet.alias()),
    confusion: work_dir.join(ReferenceKind::Confusion.alias()),
  })
}

/// Replaces whatever sits at `alias`, dangling links included, with a link to `target`.
fn bind_alias(alias: &Path, target: &Path) -> io::Result<()> {
  match fs::symlink_metadata(alias) {
    Ok(meta) if meta.is_dir() => {
      return Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        "a directory is in the way of the alias",
      ));
    }
    Ok(_) => fs::remove_file(alias)?,
    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
    Err(e) => return Err(e),
  }
  symlink(target, alias)
}

#[cfg(unix)]
fn symlink(target: &Path, alias: &Path) -> io::Result<()> {
  std::os::unix::fs::symlink(target, alias)
}

#[cfg(windows)]
fn symlink(target: &Path, alias: &Path) -> io::Result<()> {
  std::os::windows::fs::symlink_file(target, alias)
}
