//! Tool Router - builds the rmcp ToolRouter from the definitions.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own
//! route; tools that touch configuration (credentials, security) receive a
//! shared handle to it.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

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

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(config: Arc<Config>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(CwaWeatherForecastTool::create_route(config.clone()))
        .with_route(CwaTownshipForecastTool::create_route(config.clone()))
        .with_route(CwaEarthquakeTool::create_route(config.clone()))
        .with_route(CwaCityDatasetTool::create_route())
        .with_route(DateTodayTool::create_route())
        .with_route(DateNowInZoneTool::create_route())
        .with_route(DateConvertZoneTool::create_route())
        .with_route(DateListZonesTool::create_route())
        .with_route(DateRegionZonesTool::create_route())
        .with_route(DateIsTodayTool::create_route())
        .with_route(FsExistsTool::create_route(config.clone()))
        .with_route(FsCreateFileTool::create_route(config.clone()))
        .with_route(FsReadFileTool::create_route(config.clone()))
        .with_route(FsUpdateFileTool::create_route(config.clone()))
        .with_route(FsDeleteTool::create_route(config.clone()))
        .with_route(FsCopyTool::create_route(config.clone()))
        .with_route(FsMoveTool::create_route(config.clone()))
        .with_route(FsListDirTool::create_route(config.clone()))
        .with_route(FsInfoTool::create_route(config.clone()))
        .with_route(FsMkdirTool::create_route(config.clone()))
        .with_route(SheetCreateTool::create_route(config.clone()))
        .with_route(SheetAddWorksheetTool::create_route(config.clone()))
        .with_route(SheetDeleteWorksheetTool::create_route(config.clone()))
        .with_route(SheetRenameWorksheetTool::create_route(config.clone()))
        .with_route(SheetWriteCellTool::create_route(config.clone()))
        .with_route(SheetReadCellTool::create_route(config.clone()))
        .with_route(SheetWriteRowTool::create_route(config.clone()))
        .with_route(SheetReadRowTool::create_route(config.clone()))
        .with_route(SheetListWorksheetsTool::create_route(config.clone()))
        .with_route(SheetMergeCellsTool::create_route(config.clone()))
        .with_route(SheetImportCsvTool::create_route(config.clone()))
        .with_route(SheetExportCsvTool::create_route(config.clone()))
        .with_route(MailSendTool::create_route(config.clone()))
        .with_route(DriveCreateTool::create_route(config.clone()))
        .with_route(DriveUploadTool::create_route(config.clone()))
        .with_route(DriveDownloadTool::create_route(config.clone()))
        .with_route(DriveUpdateTool::create_route(config.clone()))
        .with_route(DriveDeleteTool::create_route(config.clone()))
        .with_route(DriveListTool::create_route(config.clone()))
        .with_route(DriveSearchTool::create_route(config.clone()))
        .with_route(DriveInfoTool::create_route(config.clone()))
        .with_route(PlacesTextSearchTool::create_route(config.clone()))
        .with_route(PlacesNearbyTool::create_route(config.clone()))
        .with_route(PlacesAutocompleteTool::create_route(config.clone()))
        .with_route(PlacesDetailsTool::create_route(config.clone()))
        .with_route(PlacesPhotoTool::create_route(config))
        .with_route(PlacesFieldMasksTool::create_route())
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;

    struct TestServer {}

    fn test_config() -> Arc<Config> {
        Arc::new(Config::default())
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config());
        let tools = router.list_all();
        assert_eq!(tools.len(), 47);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"cwa_weather_forecast"));
        assert!(names.contains(&"cwa_township_forecast"));
        assert!(names.contains(&"cwa_earthquake"));
        assert!(names.contains(&"cwa_city_dataset"));
        assert!(names.contains(&"date_today"));
        assert!(names.contains(&"date_convert_zone"));
        assert!(names.contains(&"fs_list_dir"));
        assert!(names.contains(&"fs_mkdir"));
        assert!(names.contains(&"sheet_create"));
        assert!(names.contains(&"sheet_merge_cells"));
        assert!(names.contains(&"mail_send"));
        assert!(names.contains(&"drive_upload"));
        assert!(names.contains(&"places_text_search"));
        assert!(names.contains(&"places_photo"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router expose the same tool set
        let config = test_config();
        let registry = ToolRegistry::new(config.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(config);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name), "router is missing {name}");
        }
    }

    #[test]
    fn test_tool_names_are_unique() {
        let router: ToolRouter<TestServer> = build_tool_router(test_config());
        let tools = router.list_all();
        let mut names: Vec<_> = tools.iter().map(|t| t.name.to_string()).collect();
        names.sort();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }
}
