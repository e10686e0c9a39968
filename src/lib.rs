//! attic - Tenant-scoped upload storage for web content
//!
//! Manages per-tenant asset folders under a public web root: direct,
//! base64-image and remote-URL uploads, recursive listing with paged
//! queries, and display metadata (title, URL, icon) for stored files.

pub mod asset;
pub mod config;
pub mod error;
pub mod logging;

pub use asset::{
    file_name_from_url, icon_for, sanitize_file_name, AssetItem, AssetStore, BytesUpload, Pager,
    UploadSource, WebFetcher,
};
pub use config::Config;
pub use error::{AtticError, Result};
