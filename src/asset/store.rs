//! Tenant-scoped asset store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::StorageConfig;
use crate::{AtticError, Result};

use super::item::AssetItem;
use super::pager::Pager;
use super::{THEMES_DIR, UPLOAD_DIR};

/// Asset store rooted at `<web_root>/data/<tenant_slug>`.
///
/// The tenant slug is passed explicitly at construction; an empty slug
/// produces a shared, unscoped root (`<web_root>/data`). All managed
/// paths are interpreted relative to [`AssetStore::location`].
///
/// Folder operations and listing are best-effort: failures are logged
/// and degrade to a no-op or an empty result. File deletion and uploads
/// return errors to the caller.
#[derive(Debug, Clone)]
pub struct AssetStore {
    web_root: PathBuf,
    tenant_slug: String,
    location: PathBuf,
}

impl AssetStore {
    /// Create a store for a tenant under the given web root.
    ///
    /// The storage location is created if it does not exist.
    pub fn new(web_root: impl Into<PathBuf>, tenant_slug: impl Into<String>) -> Result<Self> {
        let web_root = web_root.into();
        let tenant_slug = tenant_slug.into();

        let mut location = web_root.join(UPLOAD_DIR);
        if !tenant_slug.is_empty() {
            location = location.join(&tenant_slug);
        }
        fs::create_dir_all(&location)?;

        Ok(Self {
            web_root,
            tenant_slug,
            location,
        })
    }

    /// Create a store from storage configuration.
    pub fn from_config(config: &StorageConfig, tenant_slug: impl Into<String>) -> Result<Self> {
        Self::new(config.web_root_path(), tenant_slug)
    }

    /// The tenant-scoped storage root.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The tenant slug this store is scoped to.
    pub fn tenant_slug(&self) -> &str {
        &self.tenant_slug
    }

    /// The public path prefix for this tenant (`data/<slug>/`).
    pub fn public_prefix(&self) -> String {
        if self.tenant_slug.is_empty() {
            format!("{UPLOAD_DIR}/")
        } else {
            format!("{UPLOAD_DIR}/{}/", self.tenant_slug)
        }
    }

    /// Resolve a managed path under the storage location.
    pub(crate) fn target_dir(&self, path: &str) -> PathBuf {
        if path.is_empty() {
            self.location.clone()
        } else {
            self.location.join(path)
        }
    }

    /// Create a folder under the storage location. Idempotent.
    pub fn create_folder(&self, path: &str) {
        let dir = self.target_dir(path);
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(dir = %dir.display(), error = %e, "folder creation failed");
        }
    }

    /// Recursively delete a folder. No-op when absent.
    pub fn delete_folder(&self, path: &str) {
        let dir = self.target_dir(path);
        match fs::remove_dir_all(&dir) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => warn!(dir = %dir.display(), error = %e, "folder deletion failed"),
        }
    }

    /// Delete a single file.
    ///
    /// Accepts either a location-relative path or a public path carrying
    /// the `data/<slug>/` prefix. Unlike folder deletion, a missing file
    /// is an error.
    pub fn delete_file(&self, path: &str) -> Result<()> {
        let rel = path.strip_prefix(&self.public_prefix()).unwrap_or(path);
        let file_path = self.location.join(rel);

        match fs::remove_file(&file_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AtticError::NotFound(format!("file: {rel}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Recursively list all files under a managed path.
    ///
    /// Entries are sorted by name within each directory so listings are
    /// stable across platforms. Errors (including a missing directory)
    /// degrade to an empty list.
    pub fn assets(&self, path: &str) -> Vec<PathBuf> {
        let dir = self.target_dir(path);
        let mut files = Vec::new();

        if let Err(e) = collect_files(&dir, &mut files) {
            debug!(dir = %dir.display(), error = %e, "asset listing failed");
            return Vec::new();
        }

        files
    }

    /// List immediate subdirectory names of the theme directory.
    ///
    /// Errors degrade to an empty list.
    pub fn themes(&self) -> Vec<String> {
        let dir = self.web_root.join(THEMES_DIR);

        match fs::read_dir(&dir) {
            Ok(entries) => {
                let mut names: Vec<String> = entries
                    .filter_map(|e| e.ok())
                    .filter(|e| e.path().is_dir())
                    .filter_map(|e| e.file_name().into_string().ok())
                    .collect();
                names.sort();
                names
            }
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "theme listing failed");
                Vec::new()
            }
        }
    }

    /// Query assets with an optional filter and a paging cursor.
    ///
    /// The pager is configured with the post-filter total before the
    /// page slice is taken (1-indexed pages).
    pub fn find<F>(
        &self,
        predicate: Option<F>,
        pager: &mut Pager,
        url_root: &str,
        path: &str,
    ) -> Vec<AssetItem>
    where
        F: Fn(&AssetItem) -> bool,
    {
        let mut items: Vec<AssetItem> = self
            .assets(path)
            .iter()
            .map(|p| self.item_for(p, url_root))
            .collect();

        if let Some(pred) = predicate {
            items.retain(|item| pred(item));
        }

        pager.configure(items.len());

        items
            .into_iter()
            .skip(pager.offset())
            .take(pager.limit())
            .collect()
    }

    /// The web-root-relative public path for a stored file, `/`-separated.
    pub(crate) fn public_path(&self, file_path: &Path) -> String {
        let rel = file_path.strip_prefix(&self.web_root).unwrap_or(file_path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Build the display item for a stored file.
    pub(crate) fn item_for(&self, file_path: &Path, url_root: &str) -> AssetItem {
        AssetItem::from_relative(&self.public_path(file_path), url_root)
    }
}

/// Collect all files under `dir` recursively, name-sorted per directory.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }

    Ok(())
}
