// Validate interactor - Checks captured ffprobe JSON documents on disk

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::model::ProbeOutput;
use crate::error::{ErrorKind, ProbeError, ProbeResult};
use crate::probe::parse_output;
use crate::validate::Violation;

/// Outcome for one document
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Valid { streams: usize },
    SyntaxError { message: String },
    SchemaViolation { violations: Vec<Violation> },
    Unreadable { message: String },
}

impl FileReport {
    pub fn is_valid(&self) -> bool {
        matches!(self.outcome, Outcome::Valid { .. })
    }
}

/// Reports for every document found under the requested paths
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub files: Vec<FileReport>,
}

impl ValidationReport {
    pub fn failures(&self) -> usize {
        self.files.iter().filter(|file| !file.is_valid()).count()
    }

    pub fn all_valid(&self) -> bool {
        self.failures() == 0
    }
}

/// Interactor for the captured-document validation use case
#[derive(Debug, Default)]
pub struct ValidateInteractor;

impl ValidateInteractor {
    pub fn new() -> Self {
        Self
    }

    /// Validate every file named in `paths`; directories are walked
    /// recursively for `*.json` files in sorted order.
    pub fn execute(&self, paths: &[PathBuf]) -> ProbeResult<ValidationReport> {
        let mut report = ValidationReport::default();
        for path in paths {
            for file in collect_documents(path)? {
                report.files.push(self.validate_file(&file));
            }
        }
        Ok(report)
    }

    pub fn validate_file(&self, path: &Path) -> FileReport {
        let outcome = match std::fs::read(path) {
            Ok(bytes) => match parse_bytes(bytes) {
                Ok(output) => Outcome::Valid {
                    streams: output.streams.len(),
                },
                Err(err) => classify(err),
            },
            Err(err) => Outcome::Unreadable {
                message: err.to_string(),
            },
        };
        if matches!(outcome, Outcome::Valid { .. }) {
            debug!("{} is valid", path.display());
        } else {
            warn!("{} failed validation", path.display());
        }
        FileReport {
            path: path.to_path_buf(),
            outcome,
        }
    }
}

/// Captured documents get the same treatment as ffprobe's stdout
fn parse_bytes(bytes: Vec<u8>) -> ProbeResult<ProbeOutput> {
    let text = String::from_utf8(bytes).map_err(|err| ProbeError::Syntax {
        message: format!("document is not valid UTF-8: {}", err),
    })?;
    parse_output(&text)
}

fn classify(err: ProbeError) -> Outcome {
    match (err.kind(), err) {
        (_, ProbeError::Schema(validation)) => Outcome::SchemaViolation {
            violations: validation.into_violations(),
        },
        (ErrorKind::Syntax, err) => Outcome::SyntaxError {
            message: err.to_string(),
        },
        (_, err) => Outcome::Unreadable {
            message: err.to_string(),
        },
    }
}

fn collect_documents(path: &Path) -> ProbeResult<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|e| ProbeError::Io(e.into()))?;
        let is_json = entry.path().extension().is_some_and(|ext| ext == "json");
        if entry.file_type().is_file() && is_json {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_walk_classifies_each_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a_broken.json"), "{not json").unwrap();
        std::fs::write(dir.path().join("b_wrong.json"), r#"{"streams": {}}"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let report = ValidateInteractor::new()
            .execute(&[dir.path().to_path_buf()])
            .unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.failures(), 2);
        assert!(matches!(report.files[0].outcome, Outcome::SyntaxError { .. }));
        match &report.files[1].outcome {
            Outcome::SchemaViolation { violations } => {
                let paths: Vec<_> = violations.iter().map(|v| v.path.to_string()).collect();
                assert_eq!(paths, vec!["streams", "format"]);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let report = ValidateInteractor::new()
            .execute(&[PathBuf::from("/nonexistent/probe.json")])
            .unwrap();
        assert!(matches!(report.files[0].outcome, Outcome::Unreadable { .. }));
        assert!(!report.all_valid());
    }

    #[test]
    fn test_invalid_utf8_is_a_syntax_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.json");
        std::fs::write(&path, b"{\"streams\":[],\xff}").unwrap();

        let report = ValidateInteractor::new().validate_file(&path);
        match &report.outcome {
            Outcome::SyntaxError { message } => assert!(message.contains("UTF-8")),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }
}
