use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::executor::PipelineError;

/// The trace file a pipeline run left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceArtifact {
    pub path: PathBuf,
    pub contents: String,
}

impl TraceArtifact {
    /// Reads a trace file. A file that was never written yields `Ok(None)`.
    pub async fn load(path: &Path) -> Result<Option<Self>, PipelineError> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(Self {
                path: path.to_path_buf(),
                contents: String::from_utf8_lossy(&bytes).into_owned(),
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PipelineError::Trace {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Counts tasks per status for a tab-separated Nextflow trace.
    ///
    /// Returns `None` when the header has no `status` column.
    pub fn status_counts(&self) -> Option<BTreeMap<String, usize>> {
        let mut lines = self.contents.lines();
        let header = lines.next()?;
        let column = header.split('\t').position(|name| name.trim() == "status")?;

        let mut counts = BTreeMap::new();
        for line in lines.filter(|line| !line.trim().is_empty()) {
            if let Some(status) = line.split('\t').nth(column) {
                *counts.entry(status.trim().to_string()).or_insert(0) += 1;
            }
        }
        Some(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(contents: &str) -> TraceArtifact {
        TraceArtifact {
            path: PathBuf::from("trace.txt"),
            contents: contents.to_string(),
        }
    }

    #[test]
    fn test_status_counts() {
        let trace = artifact(
            "task_id\thash\tnative_id\tname\tstatus\texit\n\
             1\tab/123456\t101\tocr (1)\tCOMPLETED\t0\n\
             2\tcd/789012\t102\tocr (2)\tCOMPLETED\t0\n\
             3\tef/345678\t103\tfoliacat\tFAILED\t1\n",
        );
        let counts = trace.status_counts().unwrap();
        assert_eq!(counts.get("COMPLETED"), Some(&2));
        assert_eq!(counts.get("FAILED"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_status_counts_without_status_column() {
        assert!(artifact("not a trace\n").status_counts().is_none());
        assert!(artifact("").status_counts().is_none());
    }

    #[tokio::test]
    async fn test_load_missing_trace() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = TraceArtifact::load(&dir.path().join("trace.txt")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_load_existing_trace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.txt");
        std::fs::write(&path, "task_id\tstatus\n1\tCOMPLETED\n").unwrap();

        let loaded = TraceArtifact::load(&path).await.unwrap().unwrap();
        assert_eq!(loaded.path, path);
        assert!(loaded.contents.contains("COMPLETED"));
    }
}
