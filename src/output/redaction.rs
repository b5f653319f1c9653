//! Secret redaction for text that leaves the process (audit log, diagnostics).

use once_cell::sync::Lazy;
use regex::Regex;

/// Credential shapes that show up inline in shell commands.
const SECRET_PATTERNS: &[(&str, &str)] = &[
    // KEY=value style assignments and flags
    (
        r#"(?i)\b([a-z0-9_]*(?:api[_-]?key|secret|token|password|passwd))(\s*[:=]\s*|\s+)['"]?[^\s'"]{8,}['"]?"#,
        "$1$2<REDACTED>",
    ),
    (r"(?i)(bearer\s+)[a-z0-9_\-\.=]{16,}", "$1<REDACTED>"),
    // user:password@host in URLs
    (r"(://[^:/\s]+:)[^@\s]+@", "$1<REDACTED>@"),
    (r"AKIA[0-9A-Z]{16}", "<AWS_ACCESS_KEY_REDACTED>"),
    (r"gh[pousr]_[A-Za-z0-9]{36}", "<GITHUB_TOKEN_REDACTED>"),
    (r"github_pat_[A-Za-z0-9_]{22,}", "<GITHUB_PAT_REDACTED>"),
];

static COMPILED: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SECRET_PATTERNS
        .iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, *replacement)))
        .collect()
});

/// Redact secrets from text.
pub fn redact_secrets(text: &str) -> String {
    let mut result = text.to_string();
    for (re, replacement) in COMPILED.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}
