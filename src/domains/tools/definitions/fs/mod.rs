//! Filesystem tools.
//!
//! Local file and directory operations, every path checked against the
//! configured allowed roots before the disk is touched.

mod copy_file;
mod create_file;
mod delete;
mod exists;
mod info;
mod list_dir;
mod mkdir;
mod move_file;
mod read_file;
mod update_file;

pub use copy_file::{FsCopyParams, FsCopyTool};
pub use create_file::{FsCreateFileParams, FsCreateFileTool};
pub use delete::{FsDeleteParams, FsDeleteTool};
pub use exists::{FsExistsParams, FsExistsTool};
pub use info::{FsInfoParams, FsInfoTool};
pub use list_dir::{FsListDirParams, FsListDirTool};
pub use mkdir::{FsMkdirParams, FsMkdirTool};
pub use move_file::{FsMoveParams, FsMoveTool};
pub use read_file::{FsReadFileParams, FsReadFileTool};
pub use update_file::{FsUpdateFileParams, FsUpdateFileTool};
