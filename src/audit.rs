//! Audit logging for hook decisions.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::decision::{Decision, Permission};
use crate::input::HookInput;
use crate::output::redact_secrets;
use crate::rules::Category;

const SUMMARY_MAX_CHARS: usize = 200;

/// One JSONL audit record.
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub tool: String,
    pub decision: Permission,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Command or file path, redacted and truncated.
    pub summary: String,
}

impl AuditEntry {
    pub fn new(input: &HookInput, decision: &Decision) -> Self {
        let summary = input
            .command()
            .or_else(|| input.file_path())
            .map(|text| truncate_chars(&redact_secrets(text), SUMMARY_MAX_CHARS))
            .unwrap_or_else(|| "<unknown>".to_string());

        Self {
            timestamp: Utc::now(),
            session_id: input.session_id.clone(),
            tool: input.tool().to_string(),
            decision: decision.permission(),
            category: decision.info().map(|info| info.category),
            reason: decision.reason().map(redact_secrets),
            summary,
        }
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let head: String = s.chars().take(max_chars - 3).collect();
    format!("{}...", head)
}

/// Audit logger for writing entries to a file.
pub struct AuditLogger {
    file: File,
}

impl AuditLogger {
    /// Open or create an audit log file.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Write an audit entry to the log.
    pub fn log(&mut self, entry: &AuditEntry) -> std::io::Result<()> {
        let json = serde_json::to_string(entry)?;
        writeln!(self.file, "{}", json)?;
        self.file.flush()
    }

    /// Log a decision for an input.
    pub fn log_decision(&mut self, input: &HookInput, decision: &Decision) -> std::io::Result<()> {
        self.log(&AuditEntry::new(input, decision))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::DecisionInfo;
    use tempfile::NamedTempFile;

    fn input(json: &str) -> HookInput {
        HookInput::parse(json).unwrap()
    }

    #[test]
    fn test_audit_entry_allow() {
        let entry = AuditEntry::new(
            &input(r#"{"tool_name":"Bash","tool_input":{"command":"ls -la"}}"#),
            &Decision::allow(),
        );
        assert_eq!(entry.tool, "Bash");
        assert_eq!(entry.decision, Permission::Allow);
        assert!(entry.category.is_none());
        assert!(entry.reason.is_none());
        assert_eq!(entry.summary, "ls -la");
    }

    #[test]
    fn test_audit_entry_deny() {
        let entry = AuditEntry::new(
            &input(r#"{"tool_name":"Bash","tool_input":{"command":"rm -rf /"},"session_id":"s1"}"#),
            &Decision::Deny(DecisionInfo::new(Category::RootDeletion, "test reason")),
        );
        assert_eq!(entry.decision, Permission::Deny);
        assert_eq!(entry.category, Some(Category::RootDeletion));
        assert_eq!(entry.reason.as_deref(), Some("test reason"));
        assert_eq!(entry.session_id.as_deref(), Some("s1"));
    }

    #[test]
    fn test_file_path_summary() {
        let entry = AuditEntry::new(
            &input(r#"{"tool_name":"Write","tool_input":{"file_path":"src/lib.rs"}}"#),
            &Decision::allow(),
        );
        assert_eq!(entry.summary, "src/lib.rs");
    }

    #[test]
    fn test_missing_tool() {
        let entry = AuditEntry::new(&input("{}"), &Decision::allow());
        assert_eq!(entry.tool, "");
        assert_eq!(entry.summary, "<unknown>");
    }

    #[test]
    fn test_summary_redacted() {
        let entry = AuditEntry::new(
            &input(r#"{"tool_name":"Bash","tool_input":{"command":"TOKEN=abcdefgh12345678 rm -rf /"}}"#),
            &Decision::Deny(DecisionInfo::new(
                Category::RootDeletion,
                "command blocked: TOKEN=abcdefgh12345678 rm",
            )),
        );
        assert!(!entry.summary.contains("abcdefgh12345678"));
        assert!(!entry.reason.unwrap().contains("abcdefgh12345678"));
    }

    #[test]
    fn test_truncate_summary() {
        let long_command = "é".repeat(300);
        let json = format!(
            r#"{{"tool_name":"Bash","tool_input":{{"command":"{}"}}}}"#,
            long_command
        );
        let entry = AuditEntry::new(&input(&json), &Decision::allow());
        assert_eq!(entry.summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(entry.summary.ends_with("..."));
    }

    #[test]
    fn test_audit_logger() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut logger = AuditLogger::open(temp_file.path()).unwrap();

        let hook_input = input(r#"{"tool_name":"Bash","tool_input":{"command":"git clean -fd"}}"#);
        let ask = Decision::Ask(DecisionInfo::new(Category::VersionControlRewrite, "confirm"));
        logger.log_decision(&hook_input, &ask).unwrap();
        logger.log_decision(&hook_input, &Decision::allow()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["decision"], "ask");
        assert_eq!(lines[0]["category"], "version_control_rewrite");
        assert_eq!(lines[1]["decision"], "allow");
        assert!(lines[1].get("reason").is_none());
    }
}
