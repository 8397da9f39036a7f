//! Spreadsheet (.xlsx) tools.
//!
//! Workbook and worksheet lifecycle, cell/row access, CSV import/export,
//! and cell merging over local xlsx files. Row and column indices in the
//! tool interface are 0-based; paths are checked against the allowed roots.

mod add_worksheet;
mod common;
mod create;
mod delete_worksheet;
mod export_csv;
mod import_csv;
mod list_worksheets;
mod merge_cells;
mod read_cell;
mod read_row;
mod rename_worksheet;
mod write_cell;
mod write_row;

pub use add_worksheet::{SheetAddWorksheetParams, SheetAddWorksheetTool};
pub use create::{SheetCreateParams, SheetCreateTool};
pub use delete_worksheet::{SheetDeleteWorksheetParams, SheetDeleteWorksheetTool};
pub use export_csv::{SheetExportCsvParams, SheetExportCsvTool};
pub use import_csv::{SheetImportCsvParams, SheetImportCsvTool};
pub use list_worksheets::{SheetListWorksheetsParams, SheetListWorksheetsTool};
pub use merge_cells::{SheetMergeCellsParams, SheetMergeCellsTool};
pub use read_cell::{SheetReadCellParams, SheetReadCellTool};
pub use read_row::{SheetReadRowParams, SheetReadRowTool};
pub use rename_worksheet::{SheetRenameWorksheetParams, SheetRenameWorksheetTool};
pub use write_cell::{SheetWriteCellParams, SheetWriteCellTool};
pub use write_row::{SheetWriteRowParams, SheetWriteRowTool};
