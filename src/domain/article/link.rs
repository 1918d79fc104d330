//! Validity filter applied at the article source boundary.
//!
//! An item is publishable only when its `link` is an absolute URL with both a
//! scheme and a non-empty host. Anything else is dropped without an error:
//! a bad row in the store must never take the wire down.

use serde_json::Value;
use tracing::debug;
use url::Url;

use super::Article;

/// Returns true if `link` parses as an absolute URL with scheme and host.
pub fn is_valid_link(link: &str) -> bool {
    match Url::parse(link.trim()) {
        Ok(url) => !url.scheme().is_empty() && url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Converts raw store items into publishable articles.
///
/// Items that do not deserialize (for example, no identifier or no link) and
/// items whose link fails [`is_valid_link`] are skipped. Order is preserved.
pub fn publishable(items: impl IntoIterator<Item = Value>) -> Vec<Article> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<Article>(item) {
            Ok(article) if is_valid_link(&article.link) => Some(article),
            Ok(article) => {
                debug!(message_id = %article.id, link = %article.link, "Skipping item with invalid link");
                None
            }
            Err(e) => {
                debug!(error = %e, "Skipping malformed item");
                None
            }
        })
        .collect()
}
