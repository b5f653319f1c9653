//! Decision types for hook responses.

use crate::rules::Category;
use serde::Serialize;

/// The result of analyzing a tool invocation.
///
/// Variants are ordered by severity: `Allow < Ask < Deny`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Allow the tool to proceed.
    Allow,
    /// Require explicit user confirmation.
    Ask(DecisionInfo),
    /// Block the tool outright.
    Deny(DecisionInfo),
}

/// Information about why a tool was asked about or denied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecisionInfo {
    /// Human-readable reason shown to the user.
    pub reason: String,
    /// The rule category that matched.
    pub category: Category,
    /// The normalized sub-command or file path that triggered the match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl DecisionInfo {
    pub fn new(category: Category, reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            category,
            subject: None,
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }
}

/// Permission level as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Allow,
    Ask,
    Deny,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Allow => "allow",
            Permission::Ask => "ask",
            Permission::Deny => "deny",
        }
    }
}

impl Decision {
    /// Create an allow decision.
    pub fn allow() -> Self {
        Decision::Allow
    }

    pub fn permission(&self) -> Permission {
        match self {
            Decision::Allow => Permission::Allow,
            Decision::Ask(_) => Permission::Ask,
            Decision::Deny(_) => Permission::Deny,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, Decision::Deny(_))
    }

    pub fn is_ask(&self) -> bool {
        matches!(self, Decision::Ask(_))
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Get the ask/deny details, if any.
    pub fn info(&self) -> Option<&DecisionInfo> {
        match self {
            Decision::Ask(info) | Decision::Deny(info) => Some(info),
            Decision::Allow => None,
        }
    }

    /// The reason string (absent for allow).
    pub fn reason(&self) -> Option<&str> {
        self.info().map(|info| info.reason.as_str())
    }
}
