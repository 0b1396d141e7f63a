//! Image anchoring and sizing relative to the destination cell.

use crate::utils::cell_address;
use serde::{Deserialize, Serialize};

/// Column width used by spreadsheet applications when none is stored (characters).
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;
/// Row height used by spreadsheet applications when none is stored (points).
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;

/// Layout of the cell that holds the data value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellLayout {
    pub column: u32,
    pub row: u32,
    pub column_width: Option<f64>,
    pub row_height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub anchor: String,
    pub width_px: u32,
    pub height_px: u32,
    /// Read from the layout but not part of the sizing.
    pub column_width: f64,
    pub row_height: f64,
}

fn stored_or(value: Option<f64>, default: f64) -> f64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

impl Placement {
    /// Anchors one column right of the data cell, height = row height, width
    /// derived from the artifact's aspect ratio.
    pub fn compute(layout: CellLayout, artifact_width: u32, artifact_height: u32) -> Self {
        let column_width = stored_or(layout.column_width, DEFAULT_COLUMN_WIDTH);
        let row_height = stored_or(layout.row_height, DEFAULT_ROW_HEIGHT);

        let aspect_ratio = f64::from(artifact_height.max(1)) / f64::from(artifact_width.max(1));
        let height = row_height;
        let width = height / aspect_ratio;

        Self {
            anchor: cell_address(layout.column + 1, layout.row),
            width_px: to_px(width),
            height_px: to_px(height),
            column_width,
            row_height,
        }
    }
}

fn to_px(value: f64) -> u32 {
    value.round().clamp(1.0, f64::from(u32::MAX)) as u32
}
