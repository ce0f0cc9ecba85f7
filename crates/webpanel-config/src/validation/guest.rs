//! Guest URL and origin-pattern validation.

use crate::schema::WebPanelConfig;

pub(super) fn validate_guest(errors: &mut Vec<String>, config: &WebPanelConfig) {
    let g = &config.guest;

    match url::Url::parse(&g.url) {
        Ok(u) if u.scheme() == "https" || u.scheme() == "http" => {}
        Ok(u) => errors.push(format!(
            "guest.url must use http or https, got scheme '{}'",
            u.scheme()
        )),
        Err(e) => errors.push(format!("guest.url '{}' is not a valid URL: {e}", g.url)),
    }

    for pattern in &g.allowed_origins {
        if !is_origin_pattern(pattern) {
            errors.push(format!(
                "guest.allowed_origins entry '{pattern}' must look like scheme://host[:port]"
            ));
        }
    }

    for pattern in &g.login_origins {
        if !is_origin_pattern(pattern) {
            errors.push(format!(
                "guest.login_origins entry '{pattern}' must look like scheme://host[:port]"
            ));
        }
    }

    if g.admin_blocked_patterns.iter().any(|p| p.trim().is_empty()) {
        errors.push("guest.admin_blocked_patterns must not contain empty patterns".into());
    }
}

/// `scheme://host[:port]` with no path, query or fragment. `*` is allowed
/// anywhere in the host and port.
fn is_origin_pattern(pattern: &str) -> bool {
    let Some((scheme, rest)) = pattern.split_once("://") else {
        return false;
    };
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.') {
        return false;
    }
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    !rest.is_empty() && !rest.contains(['/', '?', '#'])
}

#[cfg(test)]
mod tests {
    use super::is_origin_pattern;

    #[test]
    fn origin_pattern_shapes() {
        assert!(is_origin_pattern("https://example.com"));
        assert!(is_origin_pattern("https://*.example.com"));
        assert!(is_origin_pattern("http://localhost:*"));
        assert!(is_origin_pattern("https://example.com/"));
        assert!(!is_origin_pattern("example.com"));
        assert!(!is_origin_pattern("https://example.com/path"));
        assert!(!is_origin_pattern("https://"));
        assert!(!is_origin_pattern("://example.com"));
    }
}
