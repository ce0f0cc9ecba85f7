//! Classification of committed top-level pages.

use tracing::warn;
use url::Url;
use webpanel_config::schema::GuestConfig;

use crate::navigation::{origin_of, OriginPattern};

/// What kind of page the guest committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    Regular,
    Login,
    GuestError,
    LoadError,
}

#[derive(Debug, Clone)]
pub struct PageClassifier {
    login: Vec<OriginPattern>,
}

impl PageClassifier {
    pub fn from_config(config: &GuestConfig) -> Self {
        let login = config
            .login_origins
            .iter()
            .filter_map(|p| match OriginPattern::parse(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!(pattern = %p, error = %e, "ignoring login origin pattern");
                    None
                }
            })
            .collect();
        Self { login }
    }

    /// Classify a committed URL whose origin is not opaque.
    pub fn classify(&self, url: &str) -> PageType {
        let Some(origin) = origin_of(url) else {
            return PageType::LoadError;
        };
        if self.login.iter().any(|p| p.matches(&origin)) {
            return PageType::Login;
        }
        if is_sorry_path(url) {
            return PageType::GuestError;
        }
        PageType::Regular
    }
}

fn is_sorry_path(url: &str) -> bool {
    Url::parse(url)
        .map(|u| {
            let path = u.path();
            path == "/sorry" || path.starts_with("/sorry/")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PageClassifier {
        PageClassifier::from_config(&GuestConfig::default())
    }

    #[test]
    fn login_provider_is_login() {
        assert_eq!(
            classifier().classify("https://accounts.google.com/signin?continue=x"),
            PageType::Login
        );
    }

    #[test]
    fn sorry_paths_are_guest_errors() {
        let c = classifier();
        assert_eq!(
            c.classify("https://panel.example.com/sorry"),
            PageType::GuestError
        );
        assert_eq!(
            c.classify("https://panel.example.com/sorry/index?continue=1"),
            PageType::GuestError
        );
        assert_eq!(
            c.classify("https://panel.example.com/sorryish"),
            PageType::Regular
        );
    }

    #[test]
    fn other_pages_are_regular() {
        assert_eq!(
            classifier().classify("https://panel.example.com/app"),
            PageType::Regular
        );
    }

    #[test]
    fn opaque_origin_is_load_error() {
        assert_eq!(classifier().classify("about:blank"), PageType::LoadError);
    }

    #[test]
    fn bad_login_patterns_are_skipped() {
        let config = GuestConfig {
            login_origins: vec!["nonsense".into(), "https://id.example.org".into()],
            ..GuestConfig::default()
        };
        let c = PageClassifier::from_config(&config);
        assert_eq!(c.classify("https://id.example.org/login"), PageType::Login);
    }
}
