//! PreToolUse hook response.

use crate::decision::{Decision, Permission};
use serde::Serialize;
use std::fmt::Display;

/// Event name Claude Code expects on every PreToolUse response.
pub const HOOK_EVENT_NAME: &str = "PreToolUse";

/// Emitted when even serialization fails; must stay valid JSON.
const FALLBACK_JSON: &str = r#"{"hookSpecificOutput":{"hookEventName":"PreToolUse","permissionDecision":"deny","permissionDecisionReason":"hook error: failed to serialize decision"}}"#;

/// Top-level JSON object written to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    pub hook_specific_output: HookSpecificOutput,
}

/// The hook-specific output for PreToolUse hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HookSpecificOutput {
    /// Always "PreToolUse".
    pub hook_event_name: &'static str,
    pub permission_decision: Permission,
    /// Present for ask and deny.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission_decision_reason: Option<String>,
}

impl HookOutput {
    pub fn from_decision(decision: &Decision) -> Self {
        Self::new(
            decision.permission(),
            decision.reason().map(String::from),
        )
    }

    /// Deny output for a fault the hook could not evaluate past.
    pub fn fault(error: impl Display) -> Self {
        Self::new(Permission::Deny, Some(format!("hook error: {}", error)))
    }

    fn new(permission: Permission, reason: Option<String>) -> Self {
        Self {
            hook_specific_output: HookSpecificOutput {
                hook_event_name: HOOK_EVENT_NAME,
                permission_decision: permission,
                permission_decision_reason: reason,
            },
        }
    }

    pub fn permission(&self) -> Permission {
        self.hook_specific_output.permission_decision
    }

    /// Compact single-line JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| FALLBACK_JSON.to_string())
    }
}
