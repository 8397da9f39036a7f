//! Google Places (New) tools.
//!
//! Text search, nearby search, autocomplete, place details, photo download,
//! and a field-mask reference over the `places.googleapis.com` v1 REST API.

pub mod client;
mod autocomplete;
mod details;
mod field_masks;
mod nearby;
mod photo;
mod text_search;

pub use autocomplete::{PlacesAutocompleteParams, PlacesAutocompleteTool};
pub use details::{PlacesDetailsParams, PlacesDetailsTool};
pub use field_masks::{PlacesFieldMasksParams, PlacesFieldMasksTool};
pub use nearby::{PlacesNearbyParams, PlacesNearbyTool};
pub use photo::{PlacesPhotoParams, PlacesPhotoTool};
pub use text_search::{PlacesTextSearchParams, PlacesTextSearchTool};
