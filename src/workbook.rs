use crate::error::{ProcessError, ProcessResult};
use crate::model::SourceRow;
use crate::placement::{CellLayout, Placement};
use crate::utils::column_number_to_name;
use std::path::{Path, PathBuf};
use umya_spreadsheet::Spreadsheet;
use umya_spreadsheet::reader::xlsx;
use umya_spreadsheet::structs::Image;
use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;

pub const NAME_COLUMN: u32 = 1;
pub const DATA_COLUMN: u32 = 2;
const HEADER_ROW: u32 = 1;

/// In-memory workbook whose active sheet holds `(name, data)` rows.
///
/// Mutations stay in memory until [`SheetStore::save`].
pub struct SheetStore {
    path: PathBuf,
    book: Spreadsheet,
}

impl SheetStore {
    /// A path that exists but is not a workbook (a directory, say) is a
    /// [`ProcessError::Load`].
    pub fn load(path: &Path) -> ProcessResult<Self> {
        if !path.exists() {
            return Err(ProcessError::SourceMissing {
                path: path.to_path_buf(),
            });
        }
        let book = xlsx::read(path).map_err(|source| ProcessError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            book,
        })
    }

    pub fn sheet_name(&self) -> String {
        self.book.get_active_sheet().get_name().to_string()
    }

    /// Every row after the header, up to the highest populated row.
    pub fn rows(&self) -> Vec<SourceRow> {
        let sheet = self.book.get_active_sheet();
        let last = sheet.get_highest_row();
        (HEADER_ROW + 1..=last)
            .map(|row| SourceRow {
                row,
                name: cell_text(sheet, NAME_COLUMN, row),
                data: cell_text(sheet, DATA_COLUMN, row),
            })
            .collect()
    }

    pub fn cell_layout(&self, column: u32, row: u32) -> CellLayout {
        let sheet = self.book.get_active_sheet();
        let letter = column_number_to_name(column);
        let column_width = sheet
            .get_column_dimension(&letter)
            .map(|dim| dim.get_width().to_owned());
        let row_height = sheet
            .get_row_dimension(&row)
            .map(|dim| dim.get_height().to_owned());
        CellLayout {
            column,
            row,
            column_width,
            row_height,
        }
    }

    /// Adds a picture with a one-cell anchor at `placement.anchor`.
    pub fn embed_image(&mut self, image_name: &str, png: &[u8], placement: &Placement) {
        let mut marker = MarkerType::default();
        marker.set_coordinate(placement.anchor.as_str());

        let mut image = Image::default();
        image.new_image_with_dimensions(
            placement.height_px,
            placement.width_px,
            image_name,
            png.to_vec(),
            marker,
        );
        self.book.get_active_sheet_mut().add_image(image);
    }

    /// Persists the workbook over its source path.
    pub fn save(&self) -> ProcessResult<()> {
        umya_spreadsheet::writer::xlsx::write(&self.book, &self.path).map_err(|source| {
            ProcessError::Save {
                path: self.path.clone(),
                source,
            }
        })
    }
}

fn cell_text(sheet: &umya_spreadsheet::Worksheet, column: u32, row: u32) -> String {
    sheet
        .get_cell((column, row))
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}
