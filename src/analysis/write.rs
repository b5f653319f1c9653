//! File-write tool analysis.

use crate::config::CompiledConfig;
use crate::decision::{Decision, DecisionInfo};
use crate::input::FileWriteInput;
use crate::rules::Category;

/// Analyze a Write/Edit style tool invocation.
///
/// Allowed unless `file_writes.confirm` is set.
pub fn analyze_file_write(input: &FileWriteInput, config: &CompiledConfig) -> Decision {
    if !config.raw.file_writes.confirm {
        return Decision::allow();
    }

    let path = input.file_path.as_deref().unwrap_or("<unknown path>");
    let action = match input.tool.as_str() {
        "Write" => "write/overwrite",
        "Edit" => "edit",
        _ => "modify",
    };

    Decision::Ask(
        DecisionInfo::new(Category::FileWrite, format!("about to {} file: {}", action, path))
            .with_subject(path),
    )
}
