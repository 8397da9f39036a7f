//! Shared helpers for the spreadsheet tools.
//!
//! The tool interface uses 0-based row/column indices; umya-spreadsheet
//! addresses cells with 1-based `(col, row)` pairs. Everything crossing that
//! boundary goes through [`to_coordinate`].

use std::path::Path;

use umya_spreadsheet::Spreadsheet;

/// Open an existing workbook.
pub fn open_workbook(path: &Path) -> Result<Spreadsheet, String> {
    umya_spreadsheet::reader::xlsx::read(path)
        .map_err(|e| format!("Failed to open workbook: {e}"))
}

/// Persist a workbook back to disk.
pub fn save_workbook(book: &Spreadsheet, path: &Path) -> Result<(), String> {
    umya_spreadsheet::writer::xlsx::write(book, path)
        .map_err(|e| format!("Failed to save workbook: {e}"))
}

/// Convert a 0-based (row, col) pair to umya's 1-based (col, row) pair.
pub fn to_coordinate(row: u32, col: u32) -> (u32, u32) {
    (col + 1, row + 1)
}

/// Render a 0-based (row, col) pair as an A1-style cell reference.
pub fn cell_reference(row: u32, col: u32) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

fn column_letters(mut col: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (col % 26) as u8);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_reference() {
        assert_eq!(cell_reference(0, 0), "A1");
        assert_eq!(cell_reference(4, 2), "C5");
        assert_eq!(cell_reference(0, 25), "Z1");
        assert_eq!(cell_reference(0, 26), "AA1");
        assert_eq!(cell_reference(9, 27), "AB10");
        assert_eq!(cell_reference(0, 701), "ZZ1");
    }

    #[test]
    fn test_to_coordinate_is_one_based_col_row() {
        assert_eq!(to_coordinate(0, 0), (1, 1));
        assert_eq!(to_coordinate(3, 1), (2, 4));
    }

    #[test]
    fn test_workbook_round_trip() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("book.xlsx");

        let mut book = umya_spreadsheet::new_file();
        if let Some(sheet) = book.get_sheet_mut(&0) {
            sheet.get_cell_mut(to_coordinate(0, 0)).set_value("hello");
        }
        save_workbook(&book, &path).unwrap();

        let reopened = open_workbook(&path).unwrap();
        let sheet = reopened.get_sheet(&0).unwrap();
        assert_eq!(sheet.get_value(to_coordinate(0, 0)), "hello");
    }
}
