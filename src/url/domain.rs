use crate::url::normalize::with_default_scheme;
use url::Url;

/// Extracts the lowercase hostname from a URL string
///
/// The port, user-info, path, query and fragment are never part of the result.
/// Scheme-relative input (`//host/...`) is read as http. Returns `None` when
/// the string does not parse or has an empty host.
///
/// # Examples
///
/// ```
/// use site_tally::url::extract_domain;
///
/// assert_eq!(extract_domain("https://EXAMPLE.COM:8080/path"), Some("example.com".to_string()));
/// assert_eq!(extract_domain("not a url"), None);
/// ```
pub fn extract_domain(raw: &str) -> Option<String> {
    let url = Url::parse(&with_default_scheme(raw)).ok()?;
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Returns true if both URLs point at the same host
///
/// Only the hostname takes part in the comparison, case-insensitively. A URL
/// that fails to parse or has no host is never in scope, so ambiguous input
/// is treated as foreign. Subdomains are distinct hosts: `www.example.com`
/// and `example.com` do not match.
///
/// # Examples
///
/// ```
/// use site_tally::url::same_domain;
///
/// assert!(same_domain("http://a.com", "https://a.com:8080/x"));
/// assert!(!same_domain("http://a.com", "http://www.a.com"));
/// assert!(!same_domain("", "http://a.com"));
/// ```
pub fn same_domain(base: &str, other: &str) -> bool {
    match (extract_domain(base), extract_domain(other)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        assert_eq!(
            extract_domain("https://example.com/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_port_and_user_info() {
        assert_eq!(
            extract_domain("https://user:pw@example.com:8080/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_mixed_case() {
        assert_eq!(
            extract_domain("https://Example.COM/"),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_extract_hostless() {
        assert_eq!(extract_domain("mailto:a@example.com"), None);
        assert_eq!(extract_domain("/relative/path"), None);
        assert_eq!(extract_domain(""), None);
    }

    #[test]
    fn test_same_domain_ignores_scheme_and_port() {
        assert!(same_domain("http://a.com", "https://a.com:8080"));
        assert!(same_domain("https://example.com:443", "https://example.com"));
    }

    #[test]
    fn test_same_domain_ignores_path_query_fragment() {
        assert!(same_domain(
            "https://example.com/",
            "https://example.com/a/b?q=1#frag"
        ));
    }

    #[test]
    fn test_same_domain_ignores_user_info() {
        assert!(same_domain("https://example.com", "https://user:pw@example.com"));
    }

    #[test]
    fn test_same_domain_case_insensitive() {
        assert!(same_domain("https://EXAMPLE.com", "https://example.COM/x"));
    }

    #[test]
    fn test_same_domain_ip_address() {
        assert!(same_domain("http://127.0.0.1:3000/", "http://127.0.0.1:4000/a"));
    }

    #[test]
    fn test_subdomain_is_foreign() {
        assert!(!same_domain("http://a.com", "http://www.a.com"));
        assert!(!same_domain("https://blog.example.com", "https://example.com"));
    }

    #[test]
    fn test_scheme_relative_in_scope() {
        assert!(same_domain("http://a.com", "//A.com/x"));
    }

    #[test]
    fn test_different_domains() {
        assert!(!same_domain("https://example.com", "https://example.org"));
    }

    #[test]
    fn test_unparseable_fails_closed() {
        assert!(!same_domain("", "http://a.com"));
        assert!(!same_domain("http://a.com", ""));
        assert!(!same_domain("http://a.com", "mailto:x@a.com"));
    }
}
