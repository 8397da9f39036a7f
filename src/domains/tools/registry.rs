//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when the http feature is enabled)
//! - Tool metadata for listing

use std::sync::Arc;

use rmcp::model::Tool;

use crate::core::config::Config;

use super::definitions::{
    CwaCityDatasetTool, CwaEarthquakeTool, CwaTownshipForecastTool, CwaWeatherForecastTool,
    DateConvertZoneTool, DateIsTodayTool, DateListZonesTool, DateNowInZoneTool,
    DateRegionZonesTool, DateTodayTool, DriveCreateTool, DriveDeleteTool, DriveDownloadTool,
    DriveInfoTool, DriveListTool, DriveSearchTool, DriveUpdateTool, DriveUploadTool, FsCopyTool,
    FsCreateFileTool, FsDeleteTool, FsExistsTool, FsInfoTool, FsListDirTool, FsMkdirTool,
    FsMoveTool, FsReadFileTool, FsUpdateFileTool, MailSendTool, PlacesAutocompleteTool,
    PlacesDetailsTool, PlacesFieldMasksTool, PlacesNearbyTool, PlacesPhotoTool,
    PlacesTextSearchTool, SheetAddWorksheetTool, SheetCreateTool, SheetDeleteWorksheetTool,
    SheetExportCsvTool, SheetImportCsvTool, SheetListWorksheetsTool, SheetMergeCellsTool,
    SheetReadCellTool, SheetReadRowTool, SheetRenameWorksheetTool, SheetWriteCellTool,
    SheetWriteRowTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when the http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            CwaWeatherForecastTool::NAME,
            CwaTownshipForecastTool::NAME,
            CwaEarthquakeTool::NAME,
            CwaCityDatasetTool::NAME,
            DateTodayTool::NAME,
            DateNowInZoneTool::NAME,
            DateConvertZoneTool::NAME,
            DateListZonesTool::NAME,
            DateRegionZonesTool::NAME,
            DateIsTodayTool::NAME,
            FsExistsTool::NAME,
            FsCreateFileTool::NAME,
            FsReadFileTool::NAME,
            FsUpdateFileTool::NAME,
            FsDeleteTool::NAME,
            FsCopyTool::NAME,
            FsMoveTool::NAME,
            FsListDirTool::NAME,
            FsInfoTool::NAME,
            FsMkdirTool::NAME,
            SheetCreateTool::NAME,
            SheetAddWorksheetTool::NAME,
            SheetDeleteWorksheetTool::NAME,
            SheetRenameWorksheetTool::NAME,
            SheetWriteCellTool::NAME,
            SheetReadCellTool::NAME,
            SheetWriteRowTool::NAME,
            SheetReadRowTool::NAME,
            SheetListWorksheetsTool::NAME,
            SheetMergeCellsTool::NAME,
            SheetImportCsvTool::NAME,
            SheetExportCsvTool::NAME,
            MailSendTool::NAME,
            DriveCreateTool::NAME,
            DriveUploadTool::NAME,
            DriveDownloadTool::NAME,
            DriveUpdateTool::NAME,
            DriveDeleteTool::NAME,
            DriveListTool::NAME,
            DriveSearchTool::NAME,
            DriveInfoTool::NAME,
            PlacesTextSearchTool::NAME,
            PlacesNearbyTool::NAME,
            PlacesAutocompleteTool::NAME,
            PlacesDetailsTool::NAME,
            PlacesPhotoTool::NAME,
            PlacesFieldMasksTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    /// Both HTTP and STDIO/TCP transports use this to get tool metadata.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            CwaWeatherForecastTool::to_tool(),
            CwaTownshipForecastTool::to_tool(),
            CwaEarthquakeTool::to_tool(),
            CwaCityDatasetTool::to_tool(),
            DateTodayTool::to_tool(),
            DateNowInZoneTool::to_tool(),
            DateConvertZoneTool::to_tool(),
            DateListZonesTool::to_tool(),
            DateRegionZonesTool::to_tool(),
            DateIsTodayTool::to_tool(),
            FsExistsTool::to_tool(),
            FsCreateFileTool::to_tool(),
            FsReadFileTool::to_tool(),
            FsUpdateFileTool::to_tool(),
            FsDeleteTool::to_tool(),
            FsCopyTool::to_tool(),
            FsMoveTool::to_tool(),
            FsListDirTool::to_tool(),
            FsInfoTool::to_tool(),
            FsMkdirTool::to_tool(),
            SheetCreateTool::to_tool(),
            SheetAddWorksheetTool::to_tool(),
            SheetDeleteWorksheetTool::to_tool(),
            SheetRenameWorksheetTool::to_tool(),
            SheetWriteCellTool::to_tool(),
            SheetReadCellTool::to_tool(),
            SheetWriteRowTool::to_tool(),
            SheetReadRowTool::to_tool(),
            SheetListWorksheetsTool::to_tool(),
            SheetMergeCellsTool::to_tool(),
            SheetImportCsvTool::to_tool(),
            SheetExportCsvTool::to_tool(),
            MailSendTool::to_tool(),
            DriveCreateTool::to_tool(),
            DriveUploadTool::to_tool(),
            DriveDownloadTool::to_tool(),
            DriveUpdateTool::to_tool(),
            DriveDeleteTool::to_tool(),
            DriveListTool::to_tool(),
            DriveSearchTool::to_tool(),
            DriveInfoTool::to_tool(),
            PlacesTextSearchTool::to_tool(),
            PlacesNearbyTool::to_tool(),
            PlacesAutocompleteTool::to_tool(),
            PlacesDetailsTool::to_tool(),
            PlacesPhotoTool::to_tool(),
            PlacesFieldMasksTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, String> {
        use tracing::warn;

        let config = self.config.clone();

        match name {
            CwaWeatherForecastTool::NAME => CwaWeatherForecastTool::http_handler(arguments, config),
            CwaTownshipForecastTool::NAME => {
                CwaTownshipForecastTool::http_handler(arguments, config)
            }
            CwaEarthquakeTool::NAME => CwaEarthquakeTool::http_handler(arguments, config),
            CwaCityDatasetTool::NAME => CwaCityDatasetTool::http_handler(arguments),
            DateTodayTool::NAME => DateTodayTool::http_handler(arguments),
            DateNowInZoneTool::NAME => DateNowInZoneTool::http_handler(arguments),
            DateConvertZoneTool::NAME => DateConvertZoneTool::http_handler(arguments),
            DateListZonesTool::NAME => DateListZonesTool::http_handler(arguments),
            DateRegionZonesTool::NAME => DateRegionZonesTool::http_handler(arguments),
            DateIsTodayTool::NAME => DateIsTodayTool::http_handler(arguments),
            FsExistsTool::NAME => FsExistsTool::http_handler(arguments, config),
            FsCreateFileTool::NAME => FsCreateFileTool::http_handler(arguments, config),
            FsReadFileTool::NAME => FsReadFileTool::http_handler(arguments, config),
            FsUpdateFileTool::NAME => FsUpdateFileTool::http_handler(arguments, config),
            FsDeleteTool::NAME => FsDeleteTool::http_handler(arguments, config),
            FsCopyTool::NAME => FsCopyTool::http_handler(arguments, config),
            FsMoveTool::NAME => FsMoveTool::http_handler(arguments, config),
            FsListDirTool::NAME => FsListDirTool::http_handler(arguments, config),
            FsInfoTool::NAME => FsInfoTool::http_handler(arguments, config),
            FsMkdirTool::NAME => FsMkdirTool::http_handler(arguments, config),
            SheetCreateTool::NAME => SheetCreateTool::http_handler(arguments, config),
            SheetAddWorksheetTool::NAME => SheetAddWorksheetTool::http_handler(arguments, config),
            SheetDeleteWorksheetTool::NAME => {
                SheetDeleteWorksheetTool::http_handler(arguments, config)
            }
            SheetRenameWorksheetTool::NAME => {
                SheetRenameWorksheetTool::http_handler(arguments, config)
            }
            SheetWriteCellTool::NAME => SheetWriteCellTool::http_handler(arguments, config),
            SheetReadCellTool::NAME => SheetReadCellTool::http_handler(arguments, config),
            SheetWriteRowTool::NAME => SheetWriteRowTool::http_handler(arguments, config),
            SheetReadRowTool::NAME => SheetReadRowTool::http_handler(arguments, config),
            SheetListWorksheetsTool::NAME => {
                SheetListWorksheetsTool::http_handler(arguments, config)
            }
            SheetMergeCellsTool::NAME => SheetMergeCellsTool::http_handler(arguments, config),
            SheetImportCsvTool::NAME => SheetImportCsvTool::http_handler(arguments, config),
            SheetExportCsvTool::NAME => SheetExportCsvTool::http_handler(arguments, config),
            MailSendTool::NAME => MailSendTool::http_handler(arguments, config),
            DriveCreateTool::NAME => DriveCreateTool::http_handler(arguments, config),
            DriveUploadTool::NAME => DriveUploadTool::http_handler(arguments, config),
            DriveDownloadTool::NAME => DriveDownloadTool::http_handler(arguments, config),
            DriveUpdateTool::NAME => DriveUpdateTool::http_handler(arguments, config),
            DriveDeleteTool::NAME => DriveDeleteTool::http_handler(arguments, config),
            DriveListTool::NAME => DriveListTool::http_handler(arguments, config),
            DriveSearchTool::NAME => DriveSearchTool::http_handler(arguments, config),
            DriveInfoTool::NAME => DriveInfoTool::http_handler(arguments, config),
            PlacesTextSearchTool::NAME => PlacesTextSearchTool::http_handler(arguments, config),
            PlacesNearbyTool::NAME => PlacesNearbyTool::http_handler(arguments, config),
            PlacesAutocompleteTool::NAME => PlacesAutocompleteTool::http_handler(arguments, config),
            PlacesDetailsTool::NAME => PlacesDetailsTool::http_handler(arguments, config),
            PlacesPhotoTool::NAME => PlacesPhotoTool::http_handler(arguments, config),
            PlacesFieldMasksTool::NAME => PlacesFieldMasksTool::http_handler(arguments),
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(format!("Unknown tool: {}", name))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = ToolRegistry::new(test_config());
        let names = registry.tool_names();
        assert_eq!(names.len(), 47);
        assert!(names.contains(&"cwa_earthquake"));
        assert!(names.contains(&"cwa_city_dataset"));
        assert!(names.contains(&"date_now_in_zone"));
        assert!(names.contains(&"fs_read_file"));
        assert!(names.contains(&"sheet_import_csv"));
        assert!(names.contains(&"mail_send"));
        assert!(names.contains(&"drive_search"));
        assert!(names.contains(&"places_details"));
    }

    #[test]
    fn test_registry_metadata_count_matches() {
        let registry = ToolRegistry::new(test_config());
        assert_eq!(
            registry.tool_names().len(),
            ToolRegistry::get_all_tools().len()
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_date_today() {
        let registry = ToolRegistry::new(test_config());
        let result = registry.call_tool("date_today", serde_json::json!({}));
        assert!(result.is_ok());
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_registry_call_unknown() {
        let registry = ToolRegistry::new(test_config());
        let result = registry.call_tool("unknown", serde_json::json!({}));
        assert!(result.is_err());
    }
}
