//! Tool analysis entry points.

mod bash;
mod write;

pub use bash::analyze_bash;
pub use write::analyze_file_write;

use crate::config::CompiledConfig;
use crate::decision::Decision;
use crate::input::HookInput;

/// Decide on one tool invocation.
///
/// Bash commands are classified; configured file-write tools ask only when
/// confirmation is enabled; everything else, including a Bash call without a
/// usable command, is allowed.
pub fn evaluate(input: &HookInput, config: &CompiledConfig) -> Decision {
    let tool = input.tool();

    if tool == "Bash" {
        return match input.as_bash() {
            Some(bash) => analyze_bash(&bash, config),
            None => Decision::allow(),
        };
    }

    if config.is_file_write_tool(tool) {
        return analyze_file_write(&input.as_file_write(), config);
    }

    Decision::allow()
}
