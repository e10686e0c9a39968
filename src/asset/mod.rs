//! Asset storage module for attic.
//!
//! This module manages per-tenant upload storage:
//! - Folder creation/deletion under a tenant-scoped root
//! - Three upload variants (direct, base64 image, remote fetch)
//! - Recursive asset listing with filtered, paged queries
//! - Display metadata derivation (title, URL, icon)

mod fetch;
mod item;
mod naming;
mod pager;
mod store;
mod upload;

pub use fetch::WebFetcher;
pub use item::{icon_for, is_image_extension, AssetItem, DOCTYPE_ICON_DIR};
pub use naming::{file_name_from_url, sanitize_file_name, CLIPBOARD_PLACEHOLDER};
pub use pager::Pager;
pub use store::AssetStore;
pub use upload::{BytesUpload, UploadSource};

/// Upload subfolder under the web root.
pub const UPLOAD_DIR: &str = "data";

/// Theme directory under the web root.
pub const THEMES_DIR: &str = "themes";
