//! Video URL resolution.
//!
//! Pure, total functions: anything that does not look like a supported video
//! link resolves to `None` and the caller renders an empty embed.

#[cfg(test)]
#[path = "media_test.rs"]
mod media_test;

use std::sync::LazyLock;

use regex::Regex;

use crate::consts::{EMBED_URL_PREFIX, VIDEO_ID_LEN};

/// Matches the last `watch?v=`, `embed/`, `v/`, `u/<c>/`, `youtu.be/` or `&v=`
/// marker and captures everything up to the next `#`, `&` or `?`.
static VIDEO_URL: LazyLock<Option<Regex>> =
    LazyLock::new(|| match Regex::new(r"^.*(youtu.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*).*") {
        Ok(re) => Some(re),
        Err(_) => None,
    });

/// Extract the platform video identifier from `url`.
///
/// The identifier must be exactly 11 characters long.
#[must_use]
pub fn resolve_video_id(url: &str) -> Option<String> {
    let re = VIDEO_URL.as_ref()?;
    let id = re.captures(url)?.get(2)?.as_str();
    (id.chars().count() == VIDEO_ID_LEN).then(|| id.to_string())
}

/// Embeddable player URL for `url`, if it resolves.
#[must_use]
pub fn embed_url(url: &str) -> Option<String> {
    resolve_video_id(url).map(|id| format!("{EMBED_URL_PREFIX}{id}"))
}
