//! Deep-link matching.
//!
//! ```text
//! Url (host, path, query)
//!     → pattern.rs (host equality, segment walk, named captures)
//!     → query.rs   (query string → decoded key/value map)
//!     → Fragments + QueryParams handed to the matching UrlHandler
//! ```

mod pattern;
mod query;

use std::borrow::Cow;
use std::collections::BTreeMap;

use url::Url;

pub use pattern::{match_url, path_segments, PatternSegment, UrlPattern};
pub use query::parse_query;

/// Capture name → matched path segment.
pub type Fragments = BTreeMap<String, String>;

/// Query key (as sent) → decoded value.
pub type QueryParams = BTreeMap<String, String>;

/// The URL's path with percent-escapes decoded.
///
/// Falls back to the raw path when the decoded bytes are not UTF-8.
pub fn decoded_path(url: &Url) -> Cow<'_, str> {
    let raw = url.path();
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}
