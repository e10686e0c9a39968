//! Display metadata for stored assets.

use std::path::Path;

/// Directory holding the fixed document-type icons.
pub const DOCTYPE_ICON_DIR: &str = "lib/img/doctypes";

/// Display metadata for a stored asset.
///
/// Built once from the asset's web-root-relative path; never mutated
/// afterwards. `path` always uses `/` separators regardless of platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetItem {
    /// Display name (the file name).
    pub title: String,
    /// Web-root-relative path, `/`-separated (e.g. `data/acme/img/logo.png`).
    pub path: String,
    /// Public-facing URL.
    pub url: String,
    /// Icon shown in pickers: the asset's own URL for images, a fixed
    /// document-type icon otherwise.
    pub image: String,
}

impl AssetItem {
    /// Build an item from a web-root-relative path and a URL root.
    pub fn from_relative(rel_path: &str, url_root: &str) -> Self {
        let title = rel_path
            .rsplit('/')
            .next()
            .unwrap_or(rel_path)
            .to_string();
        let url = join_url(url_root, rel_path);
        let image = icon_for(rel_path, &url);

        Self {
            title,
            path: rel_path.to_string(),
            url,
            image,
        }
    }
}

/// Join a URL root and a relative path without doubling slashes.
fn join_url(url_root: &str, rel_path: &str) -> String {
    if url_root.is_empty() {
        rel_path.to_string()
    } else {
        format!("{}/{}", url_root.trim_end_matches('/'), rel_path)
    }
}

/// Lower-cased extension of a path, empty when absent.
fn extension_of(path: &str) -> String {
    Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Whether an extension names a previewable image type.
pub fn is_image_extension(ext: &str) -> bool {
    matches!(ext, "png" | "jpg" | "jpeg" | "gif")
}

/// Fixed icon file for a document extension.
fn doctype_icon(ext: &str) -> &'static str {
    match ext {
        "xml" => "xml.png",
        "zip" => "zip.png",
        "txt" => "txt.png",
        "pdf" => "pdf.png",
        "mp3" => "mp3.png",
        "mp4" => "mp4.png",
        "doc" | "docx" => "doc.png",
        "xls" | "xlsx" => "xls.png",
        _ => "blank.png",
    }
}

/// Icon for an asset: its own URL when it is an image, otherwise a fixed
/// document-type icon selected by extension.
pub fn icon_for(path: &str, url: &str) -> String {
    let ext = extension_of(path);
    if is_image_extension(&ext) {
        url.to_string()
    } else {
        format!("{DOCTYPE_ICON_DIR}/{}", doctype_icon(&ext))
    }
}
