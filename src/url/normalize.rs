use std::borrow::Cow;
use url::Url;

/// Reads scheme-relative input (`//host/...`) as http
///
/// Anything else is returned unchanged.
pub fn with_default_scheme(raw: &str) -> Cow<'_, str> {
    if raw.starts_with("//") {
        Cow::Owned(format!("http:{}", raw))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Normalizes a URL into the key used by the visited registry
///
/// # Normalization Steps
///
/// 1. Scheme-relative input (`//host/...`) is treated as `http:`
/// 2. Parse the URL; if that fails, salvage `host/path` from a
///    `scheme://authority/path` shape, otherwise return the input verbatim
/// 3. Lowercase the host, drop port 80 for http and 443 for https, keep any
///    other explicit port
/// 4. Drop query, fragment and user-info
/// 5. Remove the trailing slash; a root path collapses to nothing
/// 6. Join host and path and lowercase the whole key
///
/// Input without a recognizable host (`mailto:`, `example.com/path`) is
/// returned unchanged, which keeps the function idempotent on its own output.
///
/// # Examples
///
/// ```
/// use site_tally::url::normalize_url;
///
/// assert_eq!(normalize_url("HTTP://Example.com:80/X/"), "example.com/x");
/// assert_eq!(normalize_url("http://example.com:8080"), "example.com:8080");
/// ```
pub fn normalize_url(raw: &str) -> String {
    let candidate = with_default_scheme(raw);

    let url = match Url::parse(&candidate) {
        Ok(url) => url,
        Err(_) => {
            return match salvage_host_path(&candidate) {
                Some((host, path)) => join_key(&host, &path),
                None => raw.to_string(),
            }
        }
    };

    let host = match url.host_str() {
        Some(h) if !h.is_empty() => h.to_lowercase(),
        _ => return raw.to_string(),
    };

    // `Url` elides the default port of every special scheme, so for anything
    // but http(s) an elided port is recovered from the authority as written
    let port = match (url.scheme(), url.port()) {
        ("http", Some(80)) | ("https", Some(443)) | ("http" | "https", None) => None,
        (_, Some(port)) => Some(port),
        (_, None) => explicit_port(&candidate),
    };
    let host = match port {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    };

    join_key(&host, url.path())
}

/// Builds the final `host[/path]` key
fn join_key(host: &str, path: &str) -> String {
    let path = if path.len() > 1 && path.ends_with('/') {
        &path[..path.len() - 1]
    } else {
        path
    };

    if path.is_empty() || path == "/" {
        return host.to_lowercase();
    }

    if path.starts_with('/') {
        format!("{}{}", host, path).to_lowercase()
    } else {
        format!("{}/{}", host, path).to_lowercase()
    }
}

/// Splits `scheme://authority/...` into the scheme, the host-and-port part
/// of the authority (user-info removed) and the remainder
fn split_authority(raw: &str) -> Option<(&str, &str, &str)> {
    let (scheme, rest) = raw.split_once("://")?;
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c)) {
        return None;
    }

    let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    Some((scheme, host_port, &rest[authority_end..]))
}

/// Port written in the authority, if any
fn explicit_port(raw: &str) -> Option<u16> {
    let (_, host_port, _) = split_authority(raw)?;
    let (_, port) = host_port.rsplit_once(':')?;
    port.parse().ok()
}

/// Best-effort extraction for URLs the parser rejects (bad port, stray
/// characters in the authority). Only `scheme://authority/...` input is
/// considered; anything else has no host to salvage.
fn salvage_host_path(raw: &str) -> Option<(String, String)> {
    let (scheme, host, tail) = split_authority(raw)?;
    if host.is_empty() || host.starts_with(':') {
        return None;
    }

    let path_end = tail.find(['?', '#']).unwrap_or(tail.len());

    let scheme = scheme.to_ascii_lowercase();
    let host = host.to_lowercase();
    let host = match host.rsplit_once(':') {
        Some((name, "80")) if scheme == "http" => name.to_string(),
        Some((name, "443")) if scheme == "https" => name.to_string(),
        _ => host,
    };

    Some((host, tail[..path_end].to_string()))
}
