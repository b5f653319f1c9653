//! bypass-guard - Claude Code security hook.
//!
//! A PreToolUse hook that allows, asks about, or denies shell commands by
//! matching each sub-command of a chain against deny and ask pattern tables.
//! It is meant as a last line of defense when permission prompts are
//! bypassed, not as a shell parser or a sandbox.

pub mod analysis;
pub mod audit;
pub mod config;
pub mod decision;
pub mod hook;
pub mod input;
pub mod output;
pub mod rules;
pub mod shell;

pub use analysis::{analyze_bash, analyze_file_write, evaluate};
pub use config::{CompiledConfig, Config};
pub use decision::{Decision, Permission};
pub use input::HookInput;
pub use output::HookOutput;
pub use rules::{Category, RuleSet};
