//! Bash tool analysis.

use crate::config::CompiledConfig;
use crate::decision::Decision;
use crate::input::BashInput;
use crate::output::redact_secrets;
use crate::shell::{normalize, split_chain};

/// Analyze a Bash tool invocation.
///
/// Each sub-command of the chain is normalized and classified in order. The
/// first deny ends the evaluation; otherwise the first ask wins; otherwise
/// the command is allowed.
pub fn analyze_bash(input: &BashInput, config: &CompiledConfig) -> Decision {
    let mut first_ask: Option<Decision> = None;

    for segment in split_chain(&input.command) {
        let command = normalize(&segment);
        let decision = config.rules.classify(&command);
        tracing::debug!(
            segment = %redact_secrets(&segment),
            normalized = %redact_secrets(&command),
            permission = decision.permission().as_str(),
            "classified sub-command"
        );

        match decision {
            Decision::Deny(_) => return decision,
            Decision::Ask(_) if first_ask.is_none() => first_ask = Some(decision),
            _ => {}
        }
    }

    first_ask.unwrap_or(Decision::Allow)
}
