//! Run report persistence: write/read/verify a [`RunReport`] on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   report.json          the report's JSON form
//!   report_digest.txt    ASCII digest string (e.g. "sha256:...")
//! ```
//!
//! Reading is fail-closed: a missing file, unparseable JSON, or a digest that
//! does not match the recomputed one is an error.

use std::path::Path;

use orbit_kernel::digest::ContentHash;

use crate::runner::RunReport;

const REPORT_FILENAME: &str = "report.json";
const DIGEST_FILENAME: &str = "report_digest.txt";

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    Io { detail: String },
    /// JSON serialization or hashing failed.
    Serialize { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::Serialize { detail } => write!(f, "serialization error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    Io { detail: String },
    /// A required file is missing.
    MissingFile { filename: String },
    /// `report.json` is not a valid report.
    Malformed { detail: String },
    /// `report_digest.txt` does not parse as a content hash.
    DigestParse { content: String },
    /// `report_digest.txt` doesn't match the recomputed digest.
    DigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::Malformed { detail } => write!(f, "malformed report: {detail}"),
            Self::DigestParse { content } => write!(f, "unparseable digest: {content:?}"),
            Self::DigestMismatch { stored, recomputed } => {
                write!(
                    f,
                    "digest mismatch: stored={stored}, recomputed={recomputed}"
                )
            }
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// Write `report` into `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns [`ReportDirWriteError`] on I/O or serialization failure.
pub fn write_report_dir(report: &RunReport, dir: &Path) -> Result<(), ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create {}: {e}", dir.display()),
    })?;
    let json = serde_json::to_vec_pretty(&report.to_json_value()).map_err(|e| {
        ReportDirWriteError::Serialize {
            detail: e.to_string(),
        }
    })?;
    let digest = report.digest().map_err(|e| ReportDirWriteError::Serialize {
        detail: e.to_string(),
    })?;
    write_atomic(dir.join(REPORT_FILENAME), &json)?;
    write_atomic(dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;
    Ok(())
}

/// Read a report from `dir` and verify it against the stored digest.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] if a file is missing or malformed, or the
/// digest does not match.
pub fn read_report_dir(dir: &Path) -> Result<RunReport, ReportDirReadError> {
    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let digest_bytes = read_required(dir, DIGEST_FILENAME)?;

    let value: serde_json::Value =
        serde_json::from_slice(&report_bytes).map_err(|e| ReportDirReadError::Malformed {
            detail: e.to_string(),
        })?;
    let report = RunReport::from_json_value(&value).ok_or_else(|| ReportDirReadError::Malformed {
        detail: "missing or mistyped field".into(),
    })?;

    let stored_text = String::from_utf8_lossy(&digest_bytes).trim().to_string();
    let stored = ContentHash::parse(&stored_text).ok_or_else(|| ReportDirReadError::DigestParse {
        content: stored_text.clone(),
    })?;
    let recomputed = report.digest().map_err(|e| ReportDirReadError::Malformed {
        detail: e.to_string(),
    })?;
    if stored != recomputed {
        return Err(ReportDirReadError::DigestMismatch {
            stored: stored.as_str().to_string(),
            recomputed: recomputed.as_str().to_string(),
        });
    }
    Ok(report)
}

/// Write `content` to `path` atomically (temp file + rename).
fn write_atomic(path: impl AsRef<Path>, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let path = path.as_ref();
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;

    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} → {}: {e}", temp_path.display(), path.display()),
    })?;
    Ok(())
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    let path = dir.join(filename);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ReportDirReadError::MissingFile {
                filename: filename.to_string(),
            })
        }
        Err(e) => Err(ReportDirReadError::Io {
            detail: format!("read {}: {e}", path.display()),
        }),
    }
}
