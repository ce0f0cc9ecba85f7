//! Pre-navigation request policy for the guest.
//!
//! Runs synchronously before every request the guest makes:
//! - subframe requests are always allowed
//! - top-level requests matching an admin-blocked pattern are denied
//! - other top-level requests must land on the default guest origin or an
//!   allowlisted origin, unless development mode is on

mod pattern;

pub use pattern::{OriginPattern, PatternError, UrlPattern};

use tracing::warn;
use url::{Origin, Url};
use webpanel_config::schema::GuestConfig;

use crate::events::FrameKind;

/// Serialized origin of `url`, or `None` when the origin is opaque
/// (`data:`, `about:blank`, `file:`, unparseable input, ...).
pub fn origin_of(url: &str) -> Option<String> {
    match Url::parse(url).ok()?.origin() {
        origin @ Origin::Tuple(..) => Some(origin.ascii_serialization()),
        Origin::Opaque(_) => None,
    }
}

/// Outcome of checking a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestDecision {
    Allow,
    Cancel,
    DeniedByAdmin,
}

impl RequestDecision {
    pub fn is_allowed(self) -> bool {
        self == Self::Allow
    }
}

#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    default_origin: Option<String>,
    allowed: Vec<OriginPattern>,
    blocked: Vec<UrlPattern>,
    dev_mode: bool,
}

impl NavigationPolicy {
    pub fn from_config(config: &GuestConfig) -> Result<Self, PatternError> {
        let allowed = config
            .allowed_origins
            .iter()
            .map(|p| OriginPattern::parse(p))
            .collect::<Result<Vec<_>, _>>()?;
        let blocked = config
            .admin_blocked_patterns
            .iter()
            .map(|p| UrlPattern::parse(p))
            .collect::<Result<Vec<_>, _>>()?;

        let default_origin = origin_of(&config.url);
        if default_origin.is_none() {
            warn!(url = %config.url, "default guest URL has an opaque origin");
        }

        Ok(Self {
            default_origin,
            allowed,
            blocked,
            dev_mode: config.dev_mode,
        })
    }

    pub fn check(&self, url: &str, frame: FrameKind) -> RequestDecision {
        if frame == FrameKind::Subframe {
            return RequestDecision::Allow;
        }

        if self.blocked.iter().any(|p| p.matches(url)) {
            return RequestDecision::DeniedByAdmin;
        }

        if self.dev_mode {
            return RequestDecision::Allow;
        }

        let Some(origin) = origin_of(url) else {
            return RequestDecision::Cancel;
        };

        let is_default = self.default_origin.as_deref() == Some(origin.as_str());
        if is_default || self.allowed.iter().any(|p| p.matches(&origin)) {
            RequestDecision::Allow
        } else {
            RequestDecision::Cancel
        }
    }

    pub fn default_origin(&self) -> Option<&str> {
        self.default_origin.as_deref()
    }
}

// =============================================================================
// TESTS
// =============================================================================
