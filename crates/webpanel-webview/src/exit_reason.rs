//! Mapping from renderer exit reason strings to a fixed code table.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExitReason {
    Normal,
    Abnormal,
    Crashed,
    Killed,
    OomKilled,
    Oom,
    FailedToLaunch,
    IntegrityFailure,
    Unknown,
}

impl ExitReason {
    /// Map a renderer-reported reason. Unrecognized strings map to `Unknown`.
    pub fn from_reason(reason: &str) -> Self {
        match reason {
            "normal" => Self::Normal,
            "abnormal" => Self::Abnormal,
            "crashed" => Self::Crashed,
            "killed" => Self::Killed,
            "oom killed" => Self::OomKilled,
            "oom" => Self::Oom,
            "failed to launch" => Self::FailedToLaunch,
            "integrity failure" => Self::IntegrityFailure,
            _ => Self::Unknown,
        }
    }

    /// Stable numeric code for diagnostics.
    pub fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::Normal => 1,
            Self::Abnormal => 2,
            Self::Crashed => 3,
            Self::Killed => 4,
            Self::OomKilled => 5,
            Self::Oom => 6,
            Self::FailedToLaunch => 7,
            Self::IntegrityFailure => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Abnormal => "ABNORMAL",
            Self::Crashed => "CRASHED",
            Self::Killed => "KILLED",
            Self::OomKilled => "OOM_KILLED",
            Self::Oom => "OOM",
            Self::FailedToLaunch => "FAILED_TO_LAUNCH",
            Self::IntegrityFailure => "INTEGRITY_FAILURE",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn is_normal(self) -> bool {
        self == Self::Normal
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_reasons() {
        assert_eq!(ExitReason::from_reason("normal"), ExitReason::Normal);
        assert_eq!(ExitReason::from_reason("abnormal"), ExitReason::Abnormal);
        assert_eq!(ExitReason::from_reason("crashed"), ExitReason::Crashed);
        assert_eq!(ExitReason::from_reason("killed"), ExitReason::Killed);
        assert_eq!(ExitReason::from_reason("oom killed"), ExitReason::OomKilled);
        assert_eq!(ExitReason::from_reason("oom"), ExitReason::Oom);
        assert_eq!(
            ExitReason::from_reason("failed to launch"),
            ExitReason::FailedToLaunch
        );
        assert_eq!(
            ExitReason::from_reason("integrity failure"),
            ExitReason::IntegrityFailure
        );
    }

    #[test]
    fn unrecognized_reason_is_unknown() {
        assert_eq!(ExitReason::from_reason("segfault"), ExitReason::Unknown);
        assert_eq!(ExitReason::from_reason(""), ExitReason::Unknown);
        assert_eq!(ExitReason::from_reason("OOM KILLED"), ExitReason::Unknown);
    }

    #[test]
    fn oom_killed_display() {
        assert_eq!(ExitReason::OomKilled.to_string(), "OOM_KILLED");
        assert_eq!(
            serde_json::to_string(&ExitReason::OomKilled).unwrap(),
            "\"OOM_KILLED\""
        );
    }

    #[test]
    fn codes_are_distinct() {
        let all = [
            ExitReason::Normal,
            ExitReason::Abnormal,
            ExitReason::Crashed,
            ExitReason::Killed,
            ExitReason::OomKilled,
            ExitReason::Oom,
            ExitReason::FailedToLaunch,
            ExitReason::IntegrityFailure,
            ExitReason::Unknown,
        ];
        let mut codes: Vec<u8> = all.iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }
}
