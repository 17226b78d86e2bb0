//! Label-boundary suffix matching of query names against blocked patterns.
//!
//! A pattern `example.com` blocks `example.com`, `sub.example.com` and
//! `a.b.example.com`, but never `notexample.com`: the comparison walks whole
//! labels from the top-level label inward instead of comparing raw bytes.
//!
//! Labels are compared case-sensitively.

/// Splits a domain name into its labels after dropping one trailing separator.
///
/// `"www.example.com."` and `"www.example.com"` both yield
/// `["www", "example", "com"]`.
pub fn labels(name: &str) -> Vec<&str> {
    name.strip_suffix('.').unwrap_or(name).split('.').collect()
}

/// Returns true when `query_labels` ends with `blocked_labels`, label for label.
pub fn matches(query_labels: &[&str], blocked_labels: &[&str]) -> bool {
    if query_labels.len() < blocked_labels.len() {
        return false;
    }

    query_labels
        .iter()
        .rev()
        .zip(blocked_labels.iter().rev())
        .all(|(query, blocked)| query == blocked)
}

/// A query name split once and matched against any number of patterns.
pub struct DomainMatcher<'a> {
    query_labels: Vec<&'a str>,
}

impl<'a> DomainMatcher<'a> {
    pub fn new(query_name: &'a str) -> Self {
        Self {
            query_labels: labels(query_name),
        }
    }

    pub fn is_blocked_by(&self, pattern: &str) -> bool {
        matches(&self.query_labels, &labels(pattern))
    }

    /// Returns the first pattern that blocks the query, if any.
    pub fn first_match<'p, I>(&self, patterns: I) -> Option<&'p str>
    where
        I: IntoIterator<Item = &'p str>,
    {
        patterns
            .into_iter()
            .find(|pattern| self.is_blocked_by(pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_strips_single_trailing_dot() {
        assert_eq!(labels("www.example.com."), vec!["www", "example", "com"]);
        assert_eq!(labels("www.example.com"), vec!["www", "example", "com"]);
    }

    #[test]
    fn test_matches_exact_and_subdomains() {
        assert!(matches(&["example", "com"], &["example", "com"]));
        assert!(matches(&["a", "b", "example", "com"], &["example", "com"]));
    }

    #[test]
    fn test_matches_respects_label_boundary() {
        assert!(!matches(&["notexample", "com"], &["example", "com"]));
        assert!(!matches(&["com"], &["example", "com"]));
    }
}
