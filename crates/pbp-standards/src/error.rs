#![deny(unsafe_code)]

use std::path::PathBuf;

use pbp_model::{BpType, Sex};

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML manifest {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid manifest: {message}")]
    InvalidManifest { message: String },

    #[error("missing required role in manifest: {role}")]
    MissingRole { role: String },

    #[error("duplicate role in manifest: {role}")]
    DuplicateRole { role: String },

    #[error("invalid sha256 for {path}: {message}")]
    InvalidSha256 { path: PathBuf, message: String },

    #[error("invalid manifest path {path}: {message}")]
    InvalidPath { path: PathBuf, message: String },

    #[error("missing reference table file: {path}")]
    MissingFile { path: PathBuf },

    #[error("sha256 mismatch for {path} (expected {expected}, got {actual})")]
    Sha256Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("malformed reference table {table}: {message}")]
    InvalidTable { table: String, message: String },

    #[error("duplicate reference table for {sex} {bp_type}")]
    DuplicateTable { sex: Sex, bp_type: BpType },

    #[error("no reference table for {sex} {bp_type}")]
    MissingTable { sex: Sex, bp_type: BpType },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_table(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidTable {
            table: table.into(),
            message: message.into(),
        }
    }

    /// True when the reference data itself is corrupt, as opposed to a
    /// missing file or a misconfigured directory.
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTable { .. } | Self::Sha256Mismatch { .. } | Self::Csv { .. }
        )
    }
}
