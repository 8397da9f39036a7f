//! Google Drive tools.
//!
//! File management over the Drive v3 REST API with a pre-provisioned OAuth
//! access token. Uploads use `multipart/related`; downloads use `alt=media`.

pub mod client;
mod create;
mod delete;
mod download;
mod info;
mod list;
mod search;
mod update;
mod upload;

pub use create::{DriveCreateParams, DriveCreateTool};
pub use delete::{DriveDeleteParams, DriveDeleteTool};
pub use download::{DriveDownloadParams, DriveDownloadTool};
pub use info::{DriveInfoParams, DriveInfoTool};
pub use list::{DriveListParams, DriveListTool};
pub use search::{DriveSearchParams, DriveSearchTool};
pub use update::{DriveUpdateParams, DriveUpdateTool};
pub use upload::{DriveUploadParams, DriveUploadTool};
