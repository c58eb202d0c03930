//! Object key and public URL derivation.
//!
//! Keys have the form `{namespace}/{uuid}_{filename}`. The random UUID keeps
//! concurrent uploads of the same filename from colliding; the filename is
//! kept only as a human-readable hint and is reduced to URL-safe characters.
//! Public URLs are the store's base URL followed by the key, so the key can
//! be recovered from a URL by stripping that base.

use uuid::Uuid;

/// Longest filename hint kept in a key, in characters.
const MAX_FILENAME_HINT: usize = 100;

/// Fallback when a filename hint has no usable characters.
const FALLBACK_FILENAME: &str = "attachment";

/// Build a fresh, unique object key for an upload.
///
/// # Examples
///
/// ```
/// use interview_attachments::key::object_key;
///
/// let key = object_key("interview-experience", "my photo.png");
/// assert!(key.starts_with("interview-experience/"));
/// assert!(key.ends_with("_my_photo.png"));
/// ```
pub fn object_key(namespace: &str, filename: &str) -> String {
    format!(
        "{}/{}_{}",
        namespace.trim_matches('/'),
        Uuid::new_v4(),
        sanitize_filename(filename)
    )
}

/// Reduce a client-supplied filename to `[A-Za-z0-9._-]`.
///
/// Directory components are dropped and every other character becomes `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_FILENAME_HINT)
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned
    }
}

/// Public URL of `key` under `base_url`.
pub fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key)
}

/// Recover the object key from a URL issued under `base_url`.
///
/// Returns `None` when the URL was not issued by this store.
pub fn key_from_url<'a>(base_url: &str, url: &'a str) -> Option<&'a str> {
    url.strip_prefix(base_url.trim_end_matches('/'))
        .and_then(|rest| rest.strip_prefix('/'))
        .filter(|key| !key.is_empty())
}
