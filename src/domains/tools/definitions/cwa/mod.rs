//! Taiwan CWA (Central Weather Administration) open-data tools.
//!
//! Four tools over the `opendata.cwa.gov.tw` datastore endpoints: the
//! 36-hour city forecast, the township forecast, earthquake observations,
//! and the city → dataset-id lookup table. The township and earthquake
//! tools normalize their time windows through [`crate::core::timerange`].

pub mod client;
mod dataset;
mod earthquake;
mod forecast;
mod township;

pub use dataset::{CwaCityDatasetParams, CwaCityDatasetTool};
pub use earthquake::{CwaEarthquakeParams, CwaEarthquakeTool};
pub use forecast::{CwaWeatherForecastParams, CwaWeatherForecastTool};
pub use township::{CwaTownshipForecastParams, CwaTownshipForecastTool};
