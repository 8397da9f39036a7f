//! Date and timezone tools.
//!
//! Local utilities over chrono and chrono-tz: today's date, the current
//! time in an arbitrary zone, cross-zone conversion, zone listings, and an
//! is-today check. No external service involved.

mod common;
mod convert_zone;
mod is_today;
mod list_zones;
mod now_in_zone;
mod region_zones;
mod today;

pub use convert_zone::{DateConvertZoneParams, DateConvertZoneTool};
pub use is_today::{DateIsTodayParams, DateIsTodayTool};
pub use list_zones::DateListZonesTool;
pub use now_in_zone::{DateNowInZoneParams, DateNowInZoneTool};
pub use region_zones::{DateRegionZonesParams, DateRegionZonesTool};
pub use today::{DateTodayParams, DateTodayTool};
