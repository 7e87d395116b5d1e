use std::fmt;

use serde::{Serialize, Deserialize};

/// Lowest score that counts as a full match.
pub const MATCH_THRESHOLD: f64 = 0.90;
/// Lowest score that counts as a partial match.
pub const PARTIAL_MATCH_THRESHOLD: f64 = 0.50;

/// How alarming a verdict should look when displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    /// CSS-style class name for the severity.
    pub fn class(self) -> &'static str {
        match self {
            Severity::Success => "is-success",
            Severity::Warning => "is-warning",
            Severity::Danger => "is-danger",
        }
    }
}

/// Discrete reading of a detector score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Match,
    PartialMatch,
    NoMatch,
}

impl Verdict {
    /// `>= 0.90` is a match, `>= 0.50` a partial match, anything else no match.
    /// NaN falls through to `NoMatch`.
    pub fn from_score(score: f64) -> Verdict {
        if score >= MATCH_THRESHOLD {
            Verdict::Match
        } else if score >= PARTIAL_MATCH_THRESHOLD {
            Verdict::PartialMatch
        } else {
            Verdict::NoMatch
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Verdict::Match => "match",
            Verdict::PartialMatch => "partial match",
            Verdict::NoMatch => "no match",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Verdict::Match => Severity::Success,
            Verdict::PartialMatch => Severity::Warning,
            Verdict::NoMatch => Severity::Danger,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
