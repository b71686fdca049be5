//! Image token resolution.
//!
//! Sheet image cells hold whatever the shop owner pasted: bare Google Drive
//! file ids, Drive share links, direct image URLs or inline `data:` URIs.
//! Drive ids and share links are rewritten to Drive's thumbnail endpoint;
//! everything else is passed through untouched.

use std::sync::LazyLock;

use regex::Regex;
use sheetstore_core::ProductRecord;

/// Thumbnail edge length requested from Drive when none is given.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 4000;

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{20,}$").expect("valid bare id regex"));

static PATH_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)").expect("valid path id regex"));

static QUERY_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("valid query id regex"));

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(jpe?g|png|gif|webp|avif|svg)(\?.*)?$").expect("valid extension regex")
});

/// Resolves one image token to a displayable URL at the default size.
#[must_use]
pub fn resolve_image(token: &str) -> String {
    resolve_image_with_size(token, DEFAULT_THUMBNAIL_SIZE)
}

/// Resolves one image token, requesting Drive thumbnails at `size` pixels.
///
/// Rules, first match wins:
/// - empty tokens resolve to `""`;
/// - `data:` URIs, `googleusercontent` URLs, Drive `thumbnail?` links and
///   URLs ending in an image extension are already direct and returned as is;
/// - Drive links carrying a file id (`/file/d/<id>`, `/d/<id>`, `?id=<id>`)
///   and bare file ids become thumbnail URLs;
/// - anything else is returned unchanged.
#[must_use]
pub fn resolve_image_with_size(token: &str, size: u32) -> String {
    let token = token.trim();
    if token.is_empty() {
        return String::new();
    }
    if is_direct(token) {
        return token.to_owned();
    }
    match drive_file_id(token) {
        Some(id) => thumbnail_url(id, size),
        None => token.to_owned(),
    }
}

/// Resolves every token, dropping the ones that resolve to nothing.
#[must_use]
pub fn resolve_images(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| resolve_image(token))
        .filter(|url| !url.is_empty())
        .collect()
}

/// URL of a product's primary image, if it has one.
#[must_use]
pub fn primary_image_url(product: &ProductRecord) -> Option<String> {
    product
        .primary_image_id()
        .map(resolve_image)
        .filter(|url| !url.is_empty())
}

fn is_direct(token: &str) -> bool {
    token.starts_with("data:")
        || token.contains("googleusercontent")
        || token.contains("drive.google.com/thumbnail?")
        || IMAGE_EXTENSION.is_match(token)
}

fn drive_file_id(token: &str) -> Option<&str> {
    if !is_url(token) {
        return BARE_ID.is_match(token).then_some(token);
    }
    if !token.contains("google.com") {
        return None;
    }
    PATH_ID
        .captures(token)
        .or_else(|| QUERY_ID.captures(token))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_url(token: &str) -> bool {
    token.starts_with("https://") || token.starts_with("http://")
}

fn thumbnail_url(id: &str, size: u32) -> String {
    format!("https://drive.google.com/thumbnail?id={id}&sz=s{size}")
}
