//! Wildcard patterns over origins and full URLs.

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("origin pattern '{0}' must look like scheme://host[:port]")]
    BadOrigin(String),

    #[error("pattern '{pattern}' did not compile: {reason}")]
    Compile { pattern: String, reason: String },
}

/// Matches serialized origins such as `https://app.example.com:8443`.
///
/// `*` in the host matches any run of characters other than `/` and `:`;
/// `*` as the port matches any port, including the scheme default.
#[derive(Debug, Clone)]
pub struct OriginPattern {
    source: String,
    regex: Regex,
}

impl OriginPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let trimmed = pattern.trim().trim_end_matches('/');
        let (scheme, authority) = trimmed
            .split_once("://")
            .ok_or_else(|| PatternError::BadOrigin(pattern.to_string()))?;
        if scheme.is_empty() || authority.is_empty() || authority.contains(['/', '?', '#']) {
            return Err(PatternError::BadOrigin(pattern.to_string()));
        }

        let scheme = scheme.to_ascii_lowercase();
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) if !host.is_empty() => (host, Some(port)),
            _ => (authority, None),
        };
        // Serialized origins never carry the scheme's default port.
        let port = port.filter(|p| Some(*p) != default_port(&scheme));

        let host_re = glob_to_regex(&host.to_ascii_lowercase(), "[^/:]*");
        let port_re = match port {
            Some("*") => "(:[0-9]+)?".to_string(),
            Some(p) => format!(":{}", regex::escape(p)),
            None => String::new(),
        };
        let expr = format!(
            "^{}://{}{}$",
            regex::escape(&scheme),
            host_re,
            port_re
        );

        let regex = Regex::new(&expr).map_err(|e| PatternError::Compile {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, origin: &str) -> bool {
        self.regex.is_match(origin)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Matches whole URLs; `*` matches any run of characters.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    regex: Regex,
}

impl UrlPattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let expr = format!("^{}$", glob_to_regex(pattern.trim(), ".*"));
        let regex = Regex::new(&expr).map_err(|e| PatternError::Compile {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn default_port(scheme: &str) -> Option<&'static str> {
    match scheme {
        "http" | "ws" => Some("80"),
        "https" | "wss" => Some("443"),
        _ => None,
    }
}

fn glob_to_regex(glob: &str, wildcard: &str) -> String {
    glob.split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(wildcard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_origin() {
        let p = OriginPattern::parse("https://app.example.com").unwrap();
        assert!(p.matches("https://app.example.com"));
        assert!(!p.matches("https://app.example.com:8443"));
        assert!(!p.matches("http://app.example.com"));
        assert!(!p.matches("https://evil.app.example.com"));
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let p = OriginPattern::parse("https://app.example.com/").unwrap();
        assert!(p.matches("https://app.example.com"));
    }

    #[test]
    fn wildcard_subdomain() {
        let p = OriginPattern::parse("https://*.example.com").unwrap();
        assert!(p.matches("https://a.example.com"));
        assert!(p.matches("https://a.b.example.com"));
        assert!(!p.matches("https://example.com"));
        assert!(!p.matches("https://a.example.com.evil.net"));
    }

    #[test]
    fn wildcard_port() {
        let p = OriginPattern::parse("http://localhost:*").unwrap();
        assert!(p.matches("http://localhost"));
        assert!(p.matches("http://localhost:3000"));
        assert!(!p.matches("http://localhost.evil.net"));
    }

    #[test]
    fn explicit_port() {
        let p = OriginPattern::parse("https://cdn.example.net:8443").unwrap();
        assert!(p.matches("https://cdn.example.net:8443"));
        assert!(!p.matches("https://cdn.example.net"));
    }

    #[test]
    fn default_port_is_normalized_away() {
        let p = OriginPattern::parse("https://login.example.net:443").unwrap();
        assert!(p.matches("https://login.example.net"));
        assert!(!p.matches("https://login.example.net:8443"));

        let p = OriginPattern::parse("http://intranet.local:80").unwrap();
        assert!(p.matches("http://intranet.local"));

        // 80 is not the https default and stays significant.
        let p = OriginPattern::parse("https://login.example.net:80").unwrap();
        assert!(p.matches("https://login.example.net:80"));
        assert!(!p.matches("https://login.example.net"));
    }

    #[test]
    fn host_match_is_case_insensitive_on_pattern_side() {
        let p = OriginPattern::parse("https://APP.Example.com").unwrap();
        assert!(p.matches("https://app.example.com"));
    }

    #[test]
    fn rejects_malformed_origin_patterns() {
        assert!(OriginPattern::parse("example.com").is_err());
        assert!(OriginPattern::parse("https://example.com/path").is_err());
        assert!(OriginPattern::parse("https://").is_err());
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let p = OriginPattern::parse("https://a+b.example.com").unwrap();
        assert!(p.matches("https://a+b.example.com"));
        assert!(!p.matches("https://aab.example.com"));
    }

    #[test]
    fn url_pattern_wildcards() {
        let p = UrlPattern::parse("https://panel.example.com/blocked*").unwrap();
        assert!(p.matches("https://panel.example.com/blocked"));
        assert!(p.matches("https://panel.example.com/blocked/page?x=1"));
        assert!(!p.matches("https://panel.example.com/open"));
    }

    #[test]
    fn url_pattern_is_anchored() {
        let p = UrlPattern::parse("https://example.com/a").unwrap();
        assert!(p.matches("https://example.com/a"));
        assert!(!p.matches("https://example.com/ab"));
        assert!(!p.matches("xhttps://example.com/a"));
    }
}
