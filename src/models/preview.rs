use serde::{Deserialize, Serialize};

/// Social/search preview data derived from the page's tags.
///
/// `title` and `description` fall back to empty strings; `image` stays `null`
/// when neither Open Graph nor Twitter supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
    /// Hostname shown under the preview card; the raw URL when it has none.
    pub domain: String,
}
