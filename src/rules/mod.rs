//! Pattern rules and the deny/ask classifier.
//!
//! Rules are plain regexes over a normalized command string. Matching is
//! purely lexical: a rule knows nothing about shell grammar, so a dangerous
//! command hidden inside quotes, subshells, or pipes may slip through, and a
//! harmless one that happens to match is still flagged.

mod builtin;

pub use builtin::{ASK_RULES, DENY_RULES};

use crate::decision::{Decision, DecisionInfo};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a matching rule asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Ask,
    Deny,
}

/// The kind of operation a rule guards against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    // Deny categories.
    RootDeletion,
    SystemDirectoryDeletion,
    DiskOverwrite,
    FilesystemFormat,
    PermissionChange,
    MassProcessKill,
    DatabaseDestruction,
    BlockDeviceWrite,
    // Ask categories.
    VersionControlRewrite,
    FileRemoval,
    DiskOperation,
    PowerControl,
    ProcessTermination,
    ContainerDeletion,
    FileWrite,
    /// User-supplied rule without an explicit category.
    Custom,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::RootDeletion => "recursive deletion of the filesystem root",
            Category::SystemDirectoryDeletion => "recursive deletion of a system directory",
            Category::DiskOverwrite => "raw disk overwrite",
            Category::FilesystemFormat => "filesystem format",
            Category::PermissionChange => "permission change on the filesystem root",
            Category::MassProcessKill => "termination of all processes",
            Category::DatabaseDestruction => "destructive database statement",
            Category::BlockDeviceWrite => "direct write to a block device",
            Category::VersionControlRewrite => "version control history rewrite",
            Category::FileRemoval => "file removal",
            Category::DiskOperation => "disk operation",
            Category::PowerControl => "power control",
            Category::ProcessTermination => "process termination",
            Category::ContainerDeletion => "container or cluster resource deletion",
            Category::FileWrite => "file write",
            Category::Custom => "custom rule",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A compiled pattern plus what it means when it matches.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    outcome: Outcome,
    category: Category,
}

impl Rule {
    pub fn new(pattern: &str, outcome: Outcome, category: Category) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            outcome,
            category,
        })
    }

    pub fn is_match(&self, command: &str) -> bool {
        self.pattern.is_match(command)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Ordered deny and ask rule lists.
///
/// Deny rules are always consulted before ask rules; within a list the first
/// match wins.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    deny: Vec<Rule>,
    ask: Vec<Rule>,
}

impl RuleSet {
    /// A rule set with no rules (classifies everything as allow).
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in rule tables.
    pub fn builtin() -> Result<Self, regex::Error> {
        let mut rules = Self::empty();
        for (pattern, category) in DENY_RULES {
            rules.push(Rule::new(pattern, Outcome::Deny, *category)?);
        }
        for (pattern, category) in ASK_RULES {
            rules.push(Rule::new(pattern, Outcome::Ask, *category)?);
        }
        Ok(rules)
    }

    /// Append a rule to the list matching its outcome.
    pub fn push(&mut self, rule: Rule) {
        match rule.outcome() {
            Outcome::Deny => self.deny.push(rule),
            Outcome::Ask => self.ask.push(rule),
        }
    }

    pub fn deny_rules(&self) -> &[Rule] {
        &self.deny
    }

    pub fn ask_rules(&self) -> &[Rule] {
        &self.ask
    }

    /// First rule that matches, deny list first.
    pub fn find_match(&self, command: &str) -> Option<&Rule> {
        self.deny
            .iter()
            .chain(self.ask.iter())
            .find(|rule| rule.is_match(command))
    }

    /// Classify an already-normalized command.
    pub fn classify(&self, command: &str) -> Decision {
        let Some(rule) = self.find_match(command) else {
            return Decision::allow();
        };

        let category = rule.category();
        tracing::trace!(pattern = rule.pattern(), %category, "rule matched");

        match rule.outcome() {
            Outcome::Deny => Decision::Deny(
                DecisionInfo::new(
                    category,
                    format!(
                        "command blocked: {} ({}) is a prohibited destructive operation",
                        command, category
                    ),
                )
                .with_subject(command),
            ),
            Outcome::Ask => Decision::Ask(
                DecisionInfo::new(
                    category,
                    format!("confirmation required: {} ({})", command, category),
                )
                .with_subject(command),
            ),
        }
    }
}
