//! URL path normalization.
//!
//! Both incoming request paths and route templates pass through
//! [`normalize`], so template strings follow exactly the same segment
//! syntax as the paths they match.

/// Splits a raw URL path into its ordered, non-empty segments.
///
/// Leading, trailing, and repeated slashes all collapse away, so
/// `"/misc//code/"` and `"misc/code"` yield the same segments. Any input,
/// including the empty string, produces a (possibly empty) segment list.
#[must_use]
pub fn normalize(raw: &str) -> Vec<String> {
    raw.split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_owned)
        .collect()
}
