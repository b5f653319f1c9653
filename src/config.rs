//! Configuration loading and merging.

use crate::rules::{Category, Outcome, Rule, RuleSet};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the user config path.
pub const CONFIG_ENV: &str = "BYPASS_GUARD_CONFIG";

/// Project config file name, looked up in the hook's cwd.
pub const PROJECT_CONFIG_FILE: &str = ".bypass-guard.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid regex pattern '{pattern}': {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Include the built-in deny and ask tables.
    pub builtin_rules: bool,

    /// Extra deny rules, checked after the built-in ones.
    pub deny: Vec<RuleConfig>,

    /// Extra ask rules, checked after the built-in ones.
    pub ask: Vec<RuleConfig>,

    /// File-write confirmation settings.
    pub file_writes: FileWriteConfig,

    /// Audit logging settings.
    pub audit: AuditConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            builtin_rules: true,
            deny: vec![],
            ask: vec![],
            file_writes: FileWriteConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

/// A user-supplied pattern rule.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    /// Regex matched against the normalized sub-command.
    pub pattern: String,
    /// Category reported in the reason.
    #[serde(default = "default_category")]
    pub category: Category,
}

fn default_category() -> Category {
    Category::Custom
}

/// Tools treated as file writes when no `tools` list is configured.
pub const DEFAULT_FILE_WRITE_TOOLS: &[&str] = &["Write", "Edit"];

/// Confirmation for file-mutating tools. Off by default.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FileWriteConfig {
    /// Ask before any listed tool writes a file.
    pub confirm: bool,
    /// Tool names treated as file writes; `None` means the defaults.
    pub tools: Option<Vec<String>>,
}

impl FileWriteConfig {
    /// Whether `tool` counts as a file write.
    pub fn covers(&self, tool: &str) -> bool {
        match &self.tools {
            Some(tools) => tools.iter().any(|t| t == tool),
            None => DEFAULT_FILE_WRITE_TOOLS.contains(&tool),
        }
    }

    /// Add tools to the list, starting from the defaults if none was set.
    fn extend_tools(&mut self, extra: Vec<String>) {
        let tools = self.tools.get_or_insert_with(|| {
            DEFAULT_FILE_WRITE_TOOLS
                .iter()
                .map(|t| t.to_string())
                .collect()
        });
        for tool in extra {
            if !tools.contains(&tool) {
                tools.push(tool);
            }
        }
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging.
    pub enabled: bool,
    /// Path to audit log file.
    pub path: Option<String>,
}

/// Configuration with its rule set compiled.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    /// The raw config.
    pub raw: Config,
    /// Deny and ask rules, built-in first.
    pub rules: RuleSet,
}

impl Config {
    /// Load configuration, merging user and project configs.
    pub fn load(cwd: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(Self::user_config_path().as_deref(), cwd)
    }

    /// Load from an explicit user config path plus the project config in `cwd`.
    pub fn load_from(user_path: Option<&Path>, cwd: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(user_config) = user_path.map(Self::read_file).transpose()?.flatten() {
            config = user_config;
        }

        if let Some(cwd) = cwd {
            if let Some(project_config) = Self::read_file(&cwd.join(PROJECT_CONFIG_FILE))? {
                config.merge(project_config);
            }
        }

        Ok(config)
    }

    /// Parse a TOML config file; a missing file is `None`.
    fn read_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Some(Self::parse(&content)?))
    }

    /// Parse a config from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Get user config path.
    /// Respects BYPASS_GUARD_CONFIG for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|h| h.join(".claude/bypass-guard.toml"))
    }

    /// Merge a project config into this one.
    ///
    /// Rules extend, and tool lists extend only when the project sets one.
    /// A project can turn confirmation and auditing on but cannot drop the
    /// built-in rules.
    fn merge(&mut self, other: Config) {
        self.deny.extend(other.deny);
        self.ask.extend(other.ask);

        if let Some(tools) = other.file_writes.tools {
            self.file_writes.extend_tools(tools);
        }
        if other.file_writes.confirm {
            self.file_writes.confirm = true;
        }

        if other.audit.enabled {
            self.audit.enabled = true;
            if other.audit.path.is_some() {
                self.audit.path = other.audit.path;
            }
        }
    }

    /// Compile the rule set.
    pub fn compile(self) -> Result<CompiledConfig, ConfigError> {
        let mut rules = if self.builtin_rules {
            RuleSet::builtin().map_err(|source| ConfigError::Regex {
                pattern: "<builtin>".to_string(),
                source,
            })?
        } else {
            RuleSet::empty()
        };

        let extra = self
            .deny
            .iter()
            .map(|r| (r, Outcome::Deny))
            .chain(self.ask.iter().map(|r| (r, Outcome::Ask)));
        for (rule, outcome) in extra {
            let compiled =
                Rule::new(&rule.pattern, outcome, rule.category).map_err(|source| {
                    ConfigError::Regex {
                        pattern: rule.pattern.clone(),
                        source,
                    }
                })?;
            rules.push(compiled);
        }

        tracing::debug!(
            deny = rules.deny_rules().len(),
            ask = rules.ask_rules().len(),
            "compiled rule set"
        );
        Ok(CompiledConfig { raw: self, rules })
    }
}

impl CompiledConfig {
    /// Pair a config with an externally built rule set.
    pub fn with_rules(raw: Config, rules: RuleSet) -> Self {
        Self { raw, rules }
    }

    /// Whether `tool` is one of the configured file-write tools.
    pub fn is_file_write_tool(&self, tool: &str) -> bool {
        self.raw.file_writes.covers(tool)
    }

    /// Audit log path, if auditing is on.
    pub fn audit_path(&self) -> Option<&Path> {
        if !self.raw.audit.enabled {
            return None;
        }
        self.raw.audit.path.as_deref().map(Path::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.builtin_rules);
        assert!(!config.file_writes.confirm);
        assert!(config.file_writes.tools.is_none());
        assert!(config.file_writes.covers("Write"));
        assert!(config.file_writes.covers("Edit"));
        assert!(!config.file_writes.covers("Read"));
        assert!(!config.audit.enabled);
    }

    #[test]
    fn test_compile_default_has_builtins() {
        let compiled = Config::default().compile().unwrap();
        assert!(!compiled.rules.deny_rules().is_empty());
        assert!(!compiled.rules.ask_rules().is_empty());
        assert!(compiled.rules.classify("rm -rf /").is_denied());
    }

    #[test]
    fn test_parse_extra_rules() {
        let config = Config::parse(
            r#"
[[deny]]
pattern = '^shred\b'
category = "disk_overwrite"

[[ask]]
pattern = '^npm\s+publish\b'
"#,
        )
        .unwrap();
        assert_eq!(config.deny[0].category, Category::DiskOverwrite);
        assert_eq!(config.ask[0].category, Category::Custom);

        let compiled = config.compile().unwrap();
        let decision = compiled.rules.classify("shred /dev/sda");
        assert!(decision.is_denied());
        assert_eq!(decision.info().unwrap().category, Category::DiskOverwrite);
        assert!(compiled.rules.classify("npm publish").is_ask());
    }

    #[test]
    fn test_without_builtins() {
        let config = Config::parse("builtin_rules = false").unwrap();
        let compiled = config.compile().unwrap();
        assert!(compiled.rules.classify("rm -rf /").is_allowed());
    }

    #[test]
    fn test_invalid_regex() {
        let config = Config::parse("[[deny]]\npattern = '[invalid'").unwrap();
        let err = config.compile().unwrap_err();
        assert!(matches!(err, ConfigError::Regex { .. }));
        assert!(err.to_string().contains("[invalid"));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Config::parse("builtin_rules = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Config::parse("[[ask]]\npattern = 'x'\ncategory = \"nope\"").is_err());
    }

    #[test]
    fn test_load_missing_files() {
        let dir = TempDir::new().unwrap();
        let config =
            Config::load_from(Some(&dir.path().join("none.toml")), Some(dir.path())).unwrap();
        assert!(config.builtin_rules);
        assert!(config.deny.is_empty());
    }

    #[test]
    fn test_load_and_merge_project() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let user_path = home.path().join("bypass-guard.toml");
        fs::write(
            &user_path,
            "[[deny]]\npattern = '^shred'\n\n[file_writes]\ntools = ['Write']\n",
        )
        .unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "builtin_rules = false\n\n[[deny]]\npattern = '^wipefs'\n\n[file_writes]\nconfirm = true\ntools = ['NotebookEdit']\n\n[audit]\nenabled = true\npath = '/tmp/audit.jsonl'\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&user_path), Some(project.path())).unwrap();
        assert_eq!(config.deny.len(), 2);
        assert!(config.builtin_rules, "project config cannot drop built-ins");
        assert!(config.file_writes.confirm);
        assert_eq!(
            config.file_writes.tools.as_deref(),
            Some(&["Write".to_string(), "NotebookEdit".to_string()][..])
        );
        assert!(config.audit.enabled);

        let compiled = config.compile().unwrap();
        assert!(compiled.is_file_write_tool("NotebookEdit"));
        assert_eq!(compiled.audit_path(), Some(Path::new("/tmp/audit.jsonl")));
    }

    #[test]
    fn test_project_without_file_writes_keeps_user_tools() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let user_path = home.path().join("bypass-guard.toml");
        fs::write(&user_path, "[file_writes]\nconfirm = true\ntools = ['Write']\n").unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "[[ask]]\npattern = '^npm'\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&user_path), Some(project.path())).unwrap();
        assert_eq!(config.file_writes.tools, Some(vec!["Write".to_string()]));

        let compiled = config.compile().unwrap();
        assert!(compiled.is_file_write_tool("Write"));
        assert!(!compiled.is_file_write_tool("Edit"));
    }

    #[test]
    fn test_project_tools_extend_defaults() {
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "[file_writes]\ntools = ['NotebookEdit']\n",
        )
        .unwrap();

        let config = Config::load_from(None, Some(project.path())).unwrap();
        assert!(config.file_writes.covers("Write"));
        assert!(config.file_writes.covers("Edit"));
        assert!(config.file_writes.covers("NotebookEdit"));
    }

    #[test]
    fn test_load_invalid_user_file() {
        let home = TempDir::new().unwrap();
        let user_path = home.path().join("bypass-guard.toml");
        fs::write(&user_path, "not = [valid").unwrap();
        assert!(Config::load_from(Some(&user_path), None).is_err());
    }

    #[test]
    fn test_audit_path_requires_enabled() {
        let mut config = Config::default();
        config.audit.path = Some("/tmp/x.jsonl".to_string());
        let compiled = config.compile().unwrap();
        assert!(compiled.audit_path().is_none());
    }

    #[test]
    fn test_with_rules_injection() {
        let mut rules = RuleSet::empty();
        rules.push(Rule::new("^echo", Outcome::Deny, Category::Custom).unwrap());
        let compiled = CompiledConfig::with_rules(Config::default(), rules);
        assert!(compiled.rules.classify("echo hi").is_denied());
        assert!(compiled.rules.classify("rm -rf /").is_allowed());
    }
}
