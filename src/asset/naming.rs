//! File-name derivation rules for uploads.
//!
//! Generated names are collision-checked against the destination
//! directory: a candidate that already exists is regenerated.

use std::path::Path;

use rand::Rng;

/// Placeholder name editors assign to clipboard-pasted images.
///
/// Repeated pastes all arrive with this name, so it is replaced with a
/// random name to avoid silently overwriting earlier pastes.
pub const CLIPBOARD_PLACEHOLDER: &str = "mceclip0";

/// Legacy picture-handler marker in migrated URLs.
const PICTURE_MARKER: &str = "picture.axd?picture=";

/// Legacy file-handler marker in migrated URLs.
const FILE_MARKER: &str = "file.axd?file=";

/// Strip any embedded directory components from a declared upload name.
///
/// Browsers and clients may declare names like `C:\photos\cat.png` or
/// `../../etc/passwd`; only the final component is kept.
pub fn sanitize_file_name(name: &str) -> String {
    name.rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .to_string()
}

/// A string of `len` random decimal digits.
fn random_digits(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// Generate a `<digits>.<ext>` name that does not collide in `dir`.
pub(crate) fn unique_random_name(dir: &Path, digits: usize, ext: &str) -> String {
    loop {
        let candidate = format!("{}.{ext}", random_digits(digits));
        if !dir.join(&candidate).exists() {
            return candidate;
        }
    }
}

/// Replace the clipboard-paste placeholder with a fresh random name.
///
/// Names without the placeholder pass through unchanged (and may
/// overwrite an existing file of the same name).
pub(crate) fn resolve_clipboard_name(dir: &Path, file_name: &str) -> String {
    if !file_name.contains(CLIPBOARD_PLACEHOLDER) {
        return file_name.to_string();
    }
    loop {
        let candidate = file_name.replace(CLIPBOARD_PLACEHOLDER, &random_digits(6));
        if !dir.join(&candidate).exists() {
            return candidate;
        }
    }
}

/// Derive a stored file name from a remote URL.
///
/// This is a heuristic for real-world URLs, not a general algorithm; the
/// precedence order is load-bearing:
/// 1. lower-case, unescape `%2f`, strip a trailing `.axdx`
/// 2. a legacy handler marker wins: take everything after it
/// 3. search-engine thumbnails and inline base64 payloads get a random
///    4-digit `.png` name (their URLs carry no usable file name)
/// 4. otherwise take the substring after the last `/`
pub fn file_name_from_url(dir: &Path, url: &str) -> String {
    let mut name = url.to_lowercase();
    name = name.replace("%2f", "/");
    if let Some(stripped) = name.strip_suffix(".axdx") {
        name = stripped.to_string();
    }

    for marker in [PICTURE_MARKER, FILE_MARKER] {
        if let Some(idx) = name.find(marker) {
            return name[idx + marker.len()..].to_string();
        }
    }

    if name.contains("tbn") || name.contains("base64,") {
        return unique_random_name(dir, 4, "png");
    }

    match name.rfind('/') {
        Some(idx) => name[idx + 1..].to_string(),
        None => name,
    }
}
