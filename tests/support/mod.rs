#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};
use umya_spreadsheet::{self, Spreadsheet};

pub const HEADER: (&str, &str) = ("name", "data");

pub fn write_workbook_to_path<F>(path: &Path, f: F)
where
    F: FnOnce(&mut Spreadsheet),
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create dir");
    }
    let mut book = umya_spreadsheet::new_file();
    f(&mut book);
    umya_spreadsheet::writer::xlsx::write(&book, path).expect("write workbook");
}

/// Fills the first sheet with a header row followed by `rows`.
pub fn fill_rows(book: &mut Spreadsheet, rows: &[(&str, &str)]) {
    let sheet = book.get_sheet_by_name_mut("Sheet1").expect("Sheet1");
    sheet.get_cell_mut("A1").set_value(HEADER.0);
    sheet.get_cell_mut("B1").set_value(HEADER.1);
    for (idx, (name, data)) in rows.iter().enumerate() {
        let row = idx as u32 + 2;
        if !name.is_empty() {
            sheet.get_cell_mut((1, row)).set_value(*name);
        }
        if !data.is_empty() {
            sheet.get_cell_mut((2, row)).set_value(*data);
        }
    }
}

pub fn read_workbook(path: &Path) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read(path).expect("read workbook")
}

pub fn cell_value(book: &Spreadsheet, address: &str) -> String {
    book.get_sheet_by_name("Sheet1")
        .expect("Sheet1")
        .get_cell(address)
        .map(|cell| cell.get_value().to_string())
        .unwrap_or_default()
}

pub fn image_anchors(book: &Spreadsheet) -> Vec<String> {
    book.get_sheet_by_name("Sheet1")
        .expect("Sheet1")
        .get_image_collection()
        .iter()
        .map(|image| image.get_coordinate())
        .collect()
}

pub fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read output dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".png"))
        .collect();
    names.sort();
    names
}

pub struct TestWorkspace {
    _tempdir: TempDir,
    root: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let tempdir = tempdir().expect("tempdir");
        let root = tempdir.path().to_path_buf();
        Self {
            _tempdir: tempdir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn create_workbook<F>(&self, name: &str, f: F) -> PathBuf
    where
        F: FnOnce(&mut Spreadsheet),
    {
        let path = self.path(name);
        write_workbook_to_path(&path, f);
        path
    }

    pub fn create_rows(&self, name: &str, rows: &[(&str, &str)]) -> PathBuf {
        self.create_workbook(name, |book| fill_rows(book, rows))
    }
}
