//! Allow-list matching.

use tracing::debug;

/// Returns the first allowed group that the caller is a member of.
///
/// Matching is exact: no case folding, no prefix matching. An empty allow-list
/// or an empty group list never matches.
pub fn first_allowed<'a>(allowed: &'a [String], groups: &[String]) -> Option<&'a str> {
    allowed
        .iter()
        .inspect(|group| debug!(group = %group, "checking group"))
        .find(|group| groups.contains(group))
        .map(String::as_str)
}
