//! Listing URL construction from a resolved location.

use attractions_config::SiteConfig;
use attractions_models::LocationCandidate;

/// Inserts `marker` immediately after the first occurrence of `anchor` in
/// `path`, leaving the rest of the string unchanged.
///
/// If `anchor` does not occur, `path` is returned as is. The result is then
/// not a paginated listing URL, but the run carries on with it.
#[must_use]
pub fn insert_offset_marker(path: &str, anchor: &str, marker: &str) -> String {
    let Some(index) = path.find(anchor) else {
        log::warn!("Offset anchor '{anchor}' not found in '{path}', leaving it unchanged");
        return path.to_owned();
    };

    let split = index + anchor.len();
    let mut out = String::with_capacity(path.len() + marker.len());
    out.push_str(&path[..split]);
    out.push_str(marker);
    out.push_str(&path[split..]);
    out
}

/// Builds the absolute listing URL for `candidate`'s attractions page.
#[must_use]
pub fn target_url_for(candidate: &LocationCandidate, site: &SiteConfig) -> String {
    log::info!("URL before: {}", candidate.attractions_path);
    let path = insert_offset_marker(
        &candidate.attractions_path,
        &site.offset_anchor,
        &site.offset_marker,
    );
    let url = format!("{}{path}", site.origin);
    log::info!("URL after: {url}");
    url
}
