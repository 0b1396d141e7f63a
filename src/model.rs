use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One data row of the source sheet: column A is the name, column B the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    /// 1-based sheet row
    pub row: u32,
    pub name: String,
    pub data: String,
}

impl SourceRow {
    /// Whitespace counts as data; only an absent or empty cell does not.
    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }
}

/// A generated code image written to the output folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub file_name: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    EmptyData,
    DuplicateName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    pub row: u32,
    pub name: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedRecord {
    pub row: u32,
    pub name: String,
    pub anchor: String,
    pub width_px: u32,
    pub height_px: u32,
    pub artifact_width: u32,
    pub artifact_height: u32,
}

/// Outcome of one processing run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub source: String,
    pub output_folder: String,
    pub rows_scanned: u32,
    pub artifacts: Vec<String>,
    pub embeds: Vec<EmbedRecord>,
    pub skipped: Vec<SkippedRow>,
}

impl RunSummary {
    pub fn skipped_count(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }
}
