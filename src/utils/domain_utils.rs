//! Domain name helpers shared by the front end and the bundled sources.

use url::Url;

/// Characters that may appear inside a hostname label
#[inline]
#[must_use]
pub fn is_hostname_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Normalize user input into a bare domain name
///
/// Accepts a bare name or a URL; scheme, userinfo, port, path and a trailing
/// dot are dropped and the host is lowercased (IDNs come back as punycode).
/// Unlike URL-based host extraction a leading `www.` is kept:
/// `www.example.com` is a legitimate enumeration target of its own.
///
/// Returns `None` when nothing usable is left.
#[must_use]
pub fn normalize_domain(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{trimmed}"))
    }
    .ok()?;

    let host = parsed.host_str()?.trim_end_matches('.').to_lowercase();
    if host.is_empty() || !host.chars().all(|c| is_hostname_char(c) || c == '.') {
        return None;
    }
    Some(host)
}

/// Whether `candidate` is a strict subdomain of `base`
///
/// Both arguments are compared case-insensitively; the base itself is not
/// its own subdomain.
#[must_use]
pub fn is_strict_subdomain(candidate: &str, base: &str) -> bool {
    let candidate = candidate.trim_end_matches('.');
    let base = base.trim_end_matches('.');
    if candidate.len() <= base.len() + 1 {
        return false;
    }
    let split = candidate.len() - base.len();
    candidate.is_char_boundary(split)
        && candidate[split..].eq_ignore_ascii_case(base)
        && candidate.as_bytes()[split - 1] == b'.'
}
