//! Upload variants for the asset store.

use std::fs;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::info;

use crate::{AtticError, Result};

use super::fetch::WebFetcher;
use super::item::AssetItem;
use super::naming;
use super::store::AssetStore;

/// Supported inline image payload prefixes and their extensions.
const IMAGE_PREFIXES: &[(&str, &str)] = &[
    ("data:image/png;base64,", "png"),
    ("data:image/jpeg;base64,", "jpg"),
    ("data:image/gif;base64,", "gif"),
];

/// A binary upload source: a declared file name plus a one-shot byte read.
///
/// This is the seam to the surrounding framework's upload abstraction;
/// the store consumes a source exactly once per call.
pub trait UploadSource {
    /// The file name declared by the client.
    fn file_name(&self) -> &str;

    /// Read the full content. Consumes the source.
    fn read(&mut self) -> Result<Vec<u8>>;
}

/// In-memory upload source.
#[derive(Debug)]
pub struct BytesUpload {
    name: String,
    content: Option<Vec<u8>>,
}

impl BytesUpload {
    /// Create a source from a declared name and content bytes.
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content: Some(content),
        }
    }
}

impl UploadSource for BytesUpload {
    fn file_name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<Vec<u8>> {
        self.content
            .take()
            .ok_or_else(|| AtticError::Validation("upload source already consumed".to_string()))
    }
}

impl AssetStore {
    /// Save an uploaded file under a managed path.
    ///
    /// The declared name is sanitized (embedded path separators
    /// stripped); the clipboard-paste placeholder `mceclip0` is replaced
    /// with a collision-checked random name. Ordinary names overwrite an
    /// existing file of the same name.
    pub fn upload<S: UploadSource>(
        &self,
        source: &mut S,
        url_root: &str,
        path: &str,
    ) -> Result<AssetItem> {
        let dir = self.target_dir(path);
        fs::create_dir_all(&dir)?;

        let name = naming::sanitize_file_name(source.file_name());
        let name = naming::resolve_clipboard_name(&dir, &name);

        let content = source.read()?;
        let file_path = dir.join(&name);
        fs::write(&file_path, &content)?;

        info!(file = %file_path.display(), bytes = content.len(), "stored upload");
        Ok(self.item_for(&file_path, url_root))
    }

    /// Decode and save an inline base64 image payload.
    ///
    /// Only `data:image/png`, `data:image/jpeg` and `data:image/gif`
    /// payloads are accepted; anything else is a validation error. The
    /// stored name is a collision-checked random 4-digit name with the
    /// matching extension.
    pub fn upload_base64_image(
        &self,
        payload: &str,
        url_root: &str,
        path: &str,
    ) -> Result<AssetItem> {
        let (data, ext) = split_image_payload(payload)?;
        let content = STANDARD
            .decode(data)
            .map_err(|e| AtticError::Decode(format!("invalid base64 image payload: {e}")))?;

        let dir = self.target_dir(path);
        fs::create_dir_all(&dir)?;

        let name = naming::unique_random_name(&dir, 4, ext);
        let file_path = dir.join(&name);
        fs::write(&file_path, &content)?;

        info!(file = %file_path.display(), bytes = content.len(), "stored pasted image");
        Ok(self.item_for(&file_path, url_root))
    }

    /// Fetch a remote file and save it under a managed path.
    ///
    /// The stored name is derived from the URL (see
    /// [`naming::file_name_from_url`]); fetch failures propagate.
    pub async fn upload_from_web(
        &self,
        fetcher: &WebFetcher,
        url: &str,
        url_root: &str,
        path: &str,
    ) -> Result<AssetItem> {
        let dir = self.target_dir(path);
        let name = naming::file_name_from_url(&dir, url);

        let content = fetcher.fetch(url).await?;

        // The derived name may carry subfolders (legacy handler markers)
        let file_path = dir.join(&name);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file_path, &content)?;

        info!(file = %file_path.display(), url, bytes = content.len(), "stored remote file");
        Ok(self.item_for(&file_path, url_root))
    }
}

/// Split an inline image payload into (base64 data, extension).
fn split_image_payload(payload: &str) -> Result<(&str, &'static str)> {
    for (prefix, ext) in IMAGE_PREFIXES {
        if let Some(rest) = payload.strip_prefix(prefix) {
            return Ok((rest, ext));
        }
    }
    Err(AtticError::Validation(
        "unsupported image payload: expected a png, jpeg or gif data URL".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, AssetStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = AssetStore::new(temp_dir.path(), "acme").unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_upload_basic() {
        let (_temp_dir, store) = setup_store();

        let mut source = BytesUpload::new("cat.png", b"pngdata".to_vec());
        let item = store.upload(&mut source, "https://example.com", "img").unwrap();

        assert_eq!(item.title, "cat.png");
        assert_eq!(item.path, "data/acme/img/cat.png");
        assert_eq!(item.url, "https://example.com/data/acme/img/cat.png");
        assert_eq!(
            fs::read(store.location().join("img/cat.png")).unwrap(),
            b"pngdata"
        );
    }

    #[test]
    fn test_upload_creates_target_dir() {
        let (_temp_dir, store) = setup_store();

        let mut source = BytesUpload::new("a.txt", b"x".to_vec());
        store.upload(&mut source, "", "new/deep/dir").unwrap();

        assert!(store.location().join("new/deep/dir/a.txt").exists());
    }

    #[test]
    fn test_upload_overwrites_same_name() {
        let (_temp_dir, store) = setup_store();

        let mut first = BytesUpload::new("a.txt", b"old".to_vec());
        store.upload(&mut first, "", "").unwrap();

        let mut second = BytesUpload::new("a.txt", b"new".to_vec());
        store.upload(&mut second, "", "").unwrap();

        assert_eq!(fs::read(store.location().join("a.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_upload_sanitizes_declared_name() {
        let (_temp_dir, store) = setup_store();

        let mut source = BytesUpload::new("../../evil.txt", b"x".to_vec());
        let item = store.upload(&mut source, "", "").unwrap();

        assert_eq!(item.title, "evil.txt");
        assert!(store.location().join("evil.txt").exists());
    }

    #[test]
    fn test_upload_clipboard_paste_twice_gets_distinct_names() {
        let (_temp_dir, store) = setup_store();

        let mut first = BytesUpload::new("mceclip0.png", b"one".to_vec());
        let mut second = BytesUpload::new("mceclip0.png", b"two".to_vec());

        let a = store.upload(&mut first, "", "").unwrap();
        let b = store.upload(&mut second, "", "").unwrap();

        assert_ne!(a.title, b.title);
        assert!(a.title.ends_with(".png"));
        assert!(b.title.ends_with(".png"));
        assert_eq!(store.assets("").len(), 2);
    }

    #[test]
    fn test_upload_source_consumed_once() {
        let (_temp_dir, store) = setup_store();

        let mut source = BytesUpload::new("a.txt", b"x".to_vec());
        store.upload(&mut source, "", "").unwrap();

        let result = store.upload(&mut source, "", "");
        assert!(matches!(result, Err(AtticError::Validation(_))));
    }

    #[test]
    fn test_upload_base64_png() {
        let (_temp_dir, store) = setup_store();

        let content = b"fake png bytes";
        let payload = format!("data:image/png;base64,{}", STANDARD.encode(content));

        let item = store
            .upload_base64_image(&payload, "https://example.com", "img")
            .unwrap();

        assert!(item.title.ends_with(".png"));
        // 4 random digits + ".png"
        assert_eq!(item.title.len(), 8);

        let stored = fs::read(store.location().join("img").join(&item.title)).unwrap();
        assert_eq!(stored, content);
    }

    #[test]
    fn test_upload_base64_jpeg_and_gif_extensions() {
        let (_temp_dir, store) = setup_store();
        let data = STANDARD.encode(b"x");

        let jpeg = store
            .upload_base64_image(&format!("data:image/jpeg;base64,{data}"), "", "")
            .unwrap();
        assert!(jpeg.title.ends_with(".jpg"));

        let gif = store
            .upload_base64_image(&format!("data:image/gif;base64,{data}"), "", "")
            .unwrap();
        assert!(gif.title.ends_with(".gif"));
    }

    #[test]
    fn test_upload_base64_unsupported_prefix() {
        let (_temp_dir, store) = setup_store();

        let result = store.upload_base64_image("data:image/webp;base64,AAAA", "", "");
        assert!(matches!(result, Err(AtticError::Validation(_))));
    }

    #[test]
    fn test_upload_base64_malformed_payload() {
        let (_temp_dir, store) = setup_store();

        let result = store.upload_base64_image("data:image/png;base64,!!!not-base64!!!", "", "");
        assert!(matches!(result, Err(AtticError::Decode(_))));
    }

    #[test]
    fn test_split_image_payload() {
        assert_eq!(
            split_image_payload("data:image/png;base64,AAAA").unwrap(),
            ("AAAA", "png")
        );
        assert_eq!(
            split_image_payload("data:image/jpeg;base64,BBBB").unwrap(),
            ("BBBB", "jpg")
        );
        assert!(split_image_payload("image/png;AAAA").is_err());
    }

    #[tokio::test]
    async fn test_upload_from_web_rejects_bad_scheme() {
        let (_temp_dir, store) = setup_store();
        let fetcher = WebFetcher::default();

        let result = store
            .upload_from_web(&fetcher, "ftp://example.com/a.png", "", "")
            .await;
        assert!(matches!(result, Err(AtticError::Validation(_))));
    }
}
