//! Input parsing for Claude Code hook invocations.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when parsing hook input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The raw input from Claude Code's PreToolUse hook.
#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    /// The tool being invoked (e.g., "Bash", "Write"). Absent means nothing to gate.
    #[serde(default)]
    pub tool_name: Option<String>,

    /// The tool's input parameters as raw JSON.
    #[serde(default)]
    pub tool_input: serde_json::Value,

    /// Current working directory (optional).
    #[serde(default)]
    pub cwd: Option<String>,

    /// Session ID for audit logging (optional).
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Parsed input for the Bash tool.
#[derive(Debug, Clone)]
pub struct BashInput {
    /// The command to execute.
    pub command: String,
}

/// Parsed input for a file-mutating tool (Write, Edit).
#[derive(Debug, Clone)]
pub struct FileWriteInput {
    /// The tool name, kept for the reason text.
    pub tool: String,
    /// The target file, if supplied.
    pub file_path: Option<String>,
}

impl HookInput {
    /// Parse from JSON string.
    pub fn parse(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn tool(&self) -> &str {
        self.tool_name.as_deref().unwrap_or_default()
    }

    /// Try to extract as Bash input. A missing, non-string, or blank command yields `None`.
    pub fn as_bash(&self) -> Option<BashInput> {
        if self.tool() != "Bash" {
            return None;
        }
        let command = self.command()?.trim();
        if command.is_empty() {
            return None;
        }
        Some(BashInput {
            command: command.to_string(),
        })
    }

    /// Extract as file-write input, whatever the tool name.
    pub fn as_file_write(&self) -> FileWriteInput {
        FileWriteInput {
            tool: self.tool().to_string(),
            file_path: self.file_path().map(String::from),
        }
    }

    /// Get the primary path being accessed (for any file-based tool).
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.get("file_path").and_then(|v| v.as_str())
    }

    /// Get the command (for Bash tool).
    pub fn command(&self) -> Option<&str> {
        self.tool_input.get("command").and_then(|v| v.as_str())
    }
}
