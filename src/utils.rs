use std::path::Path;

const ARTIFACT_EXTENSION: &str = "png";
const BLANK_NAME_STEM: &str = "%";

pub fn column_number_to_name(column: u32) -> String {
    let mut column = column;
    let mut name = String::new();
    while column > 0 {
        let rem = ((column - 1) % 26) as u8;
        name.insert(0, (b'A' + rem) as char);
        column = (column - 1) / 26;
    }
    name
}

pub fn cell_address(column: u32, row: u32) -> String {
    format!("{}{}", column_number_to_name(column), row)
}

/// File name an artifact for `name` is written under: `"{name}.png"`.
///
/// `%`, `/` and `\` are percent-encoded so the file always lands directly
/// inside the output folder and distinct names never share a file. An empty
/// name maps to the bare `%` stem, which no encoded name can produce.
pub fn artifact_file_name(name: &str) -> String {
    if name.is_empty() {
        return format!("{BLANK_NAME_STEM}.{ARTIFACT_EXTENSION}");
    }
    let mut stem = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => stem.push_str("%25"),
            '/' => stem.push_str("%2F"),
            '\\' => stem.push_str("%5C"),
            _ => stem.push(c),
        }
    }
    format!("{stem}.{ARTIFACT_EXTENSION}")
}

pub fn path_to_forward_slashes(path: &Path) -> String {
    let raw = path.to_string_lossy();
    if raw.contains('\\') {
        raw.replace('\\', "/")
    } else {
        raw.into_owned()
    }
}
