//! Error types for the row processor and the artifact pipeline.
//!
//! Only conditions that abort a run are errors. Rows with empty data and rows
//! whose name already produced an artifact are reported through
//! [`crate::model::RunSummary`] instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for processing operations
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Coarse error category, stable across the variants' payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Source workbook missing or not a readable spreadsheet
    Load,
    /// Output folder or artifact file could not be written
    Io,
    /// A data value could not be turned into a code image
    Encode,
    /// The modified workbook could not be persisted
    Save,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Load => "load_error",
            ErrorKind::Io => "io_error",
            ErrorKind::Encode => "encode_error",
            ErrorKind::Save => "save_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ProcessError {
    /// The source path does not exist
    #[error("workbook {path:?} does not exist")]
    SourceMissing { path: PathBuf },

    /// The source exists but is not a parsable workbook
    #[error("failed to load workbook {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: umya_spreadsheet::XlsxError,
    },

    /// Folder creation or file write failure
    #[error("i/o failure at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data value rejected by the QR encoder (usually too long)
    #[error("cannot encode data for '{name}': {source}")]
    Encode {
        name: String,
        #[source]
        source: qrcode::types::QrError,
    },

    /// Raster could not be serialized as PNG
    #[error("failed to encode png for '{name}': {source}")]
    Image {
        name: String,
        #[source]
        source: image::ImageError,
    },

    /// Final workbook write failed
    #[error("failed to save workbook {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: umya_spreadsheet::XlsxError,
    },
}

impl ProcessError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProcessError::SourceMissing { .. } | ProcessError::Load { .. } => ErrorKind::Load,
            ProcessError::Io { .. } => ErrorKind::Io,
            ProcessError::Encode { .. } | ProcessError::Image { .. } => ErrorKind::Encode,
            ProcessError::Save { .. } => ErrorKind::Save,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProcessError::Io {
            path: path.into(),
            source,
        }
    }
}
