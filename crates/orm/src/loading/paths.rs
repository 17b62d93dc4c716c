//! Dotted attribute path helpers

use std::collections::BTreeSet;

/// Join a prefix and a segment with a dot; an empty prefix yields the segment
pub fn join_path(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", prefix, segment)
    }
}

/// Split a comma separated attribute list such as `"roles.permissions, addresses"`
///
/// Entries are trimmed and blanks are skipped.
pub fn parse_attribute_paths(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Whether `ancestor` is a strict prefix of `path` at a segment boundary
pub fn is_strict_prefix(ancestor: &str, path: &str) -> bool {
    path.len() > ancestor.len()
        && path.starts_with(ancestor)
        && path.as_bytes()[ancestor.len()] == b'.'
}

/// Number of segments in a path
pub fn depth(path: &str) -> usize {
    if path.is_empty() {
        0
    } else {
        path.split('.').count()
    }
}

/// Keep only the deepest paths: drop every path that is a strict prefix of another
pub fn reduce_paths<I>(paths: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    let all: BTreeSet<String> = paths.into_iter().collect();
    all.iter()
        .filter(|path| !all.iter().any(|other| is_strict_prefix(path, other)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "roles"), "roles");
        assert_eq!(join_path("roles", "permissions"), "roles.permissions");
    }

    #[test]
    fn test_parse_attribute_paths() {
        let paths = parse_attribute_paths(" roles.permissions, addresses,, ");
        assert_eq!(paths.len(), 2);
        assert!(paths.contains("roles.permissions"));
        assert!(paths.contains("addresses"));
        assert!(parse_attribute_paths("").is_empty());
    }

    #[test]
    fn test_strict_prefix_respects_segments() {
        assert!(is_strict_prefix("roles", "roles.permissions"));
        assert!(!is_strict_prefix("roles", "roles"));
        assert!(!is_strict_prefix("role", "roles.permissions"));
    }

    #[test]
    fn test_reduce_keeps_deepest_paths() {
        let reduced = reduce_paths(
            ["roles", "roles.permissions", "addresses", "roles.permissions"]
                .into_iter()
                .map(String::from),
        );
        let expected: BTreeSet<String> = ["addresses", "roles.permissions"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(reduced, expected);
    }

    #[test]
    fn test_depth() {
        assert_eq!(depth(""), 0);
        assert_eq!(depth("roles.permissions"), 2);
    }
}
