//! Shared helpers for the date/timezone tools.

use chrono::format::{Item, StrftimeItems};
use chrono_tz::Tz;

/// Parse a strftime pattern up front so bad patterns surface as input
/// errors instead of panicking at render time.
pub fn parse_format(pattern: &str) -> Result<Vec<Item<'_>>, String> {
    StrftimeItems::new(pattern)
        .parse()
        .map_err(|_| format!("Invalid format pattern '{pattern}'"))
}

/// Resolve an IANA zone id such as "Asia/Taipei".
pub fn parse_zone(id: &str) -> Result<Tz, String> {
    id.parse()
        .map_err(|_| format!("Unknown time zone '{id}'"))
}
