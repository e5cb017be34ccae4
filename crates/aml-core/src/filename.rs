//! Derived filenames for cached audio clips.
//!
//! A derived filename is a pure function of the URL, so the same URL always
//! maps to the same cache entry and re-runs skip files already on disk.

use md5::{Digest, Md5};

/// Extensions accepted as-is from the URL path (case-sensitive).
const AUDIO_EXTENSIONS: [&str; 3] = [".ogg", ".mp3", ".wav"];

/// Extension appended to hash-derived names.
const HASH_EXTENSION: &str = ".ogg";

/// Derives the local filename for a clip URL.
///
/// Takes the path segment after the last `/` and strips any query string.
/// If the result does not end in a recognized audio extension, falls back to
/// the hex MD5 digest of the full URL string plus `.ogg`, so extension-less
/// URLs (tokenized CDN links, stream endpoints) still get stable,
/// collision-free names.
///
/// Known limitation, kept deliberately: two distinct URLs that share the
/// same trailing segment with a valid extension map to the same cache entry.
///
/// # Examples
///
/// - `derive_filename("https://x.test/a.ogg")` → `"a.ogg"`
/// - `derive_filename("https://x.test/a.ogg?token=abc")` → `"a.ogg"`
/// - `derive_filename("https://x.test/clip?id=9")` → `"<md5 of the URL>.ogg"`
pub fn derive_filename(url: &str) -> String {
    let tail = url.rsplit('/').next().unwrap_or(url);
    let clean = tail.split('?').next().unwrap_or(tail);
    if has_audio_extension(clean) {
        return clean.to_string();
    }
    let digest = Md5::digest(url.as_bytes());
    format!("{}{}", hex::encode(digest), HASH_EXTENSION)
}

fn has_audio_extension(name: &str) -> bool {
    AUDIO_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
