//! One-shot hook driver: raw event text in, decision object out.
//!
//! Evaluation itself is permissive about data it understands as absent
//! (no tool name, no command). Anything the driver cannot get past, such as
//! unreadable input, invalid JSON, a broken config, or a panic, becomes a
//! deny via [`HookOutput::fault`].

use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use thiserror::Error;

use crate::analysis::evaluate;
use crate::audit::AuditLogger;
use crate::config::{CompiledConfig, Config, ConfigError};
use crate::input::{HookInput, InputError};
use crate::output::HookOutput;

/// Faults that stop a hook run before a decision is reached.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to read hook input: {0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Parse the event, load config for its cwd, and decide.
pub fn handle(raw: &str) -> Result<HookOutput, HookError> {
    let input = HookInput::parse(raw)?;
    let cwd = input.cwd.as_deref().map(Path::new);
    let config = Config::load(cwd)?.compile()?;
    Ok(respond(&input, &config))
}

/// Decide on a parsed event and write the audit entry if enabled.
pub fn respond(input: &HookInput, config: &CompiledConfig) -> HookOutput {
    let decision = evaluate(input, config);
    tracing::debug!(
        tool = input.tool(),
        permission = decision.permission().as_str(),
        "decision"
    );

    if let Some(path) = config.audit_path() {
        let logged =
            AuditLogger::open(path).and_then(|mut logger| logger.log_decision(input, &decision));
        if let Err(err) = logged {
            tracing::warn!(path = %path.display(), error = %err, "failed to write audit entry");
        }
    }

    HookOutput::from_decision(&decision)
}

/// Run the whole hook inside a catch-all region. Always yields an output.
pub fn run_guarded<F>(read_event: F) -> HookOutput
where
    F: FnOnce() -> io::Result<String>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        let raw = read_event().map_err(HookError::Read)?;
        handle(&raw)
    }));

    match result {
        Ok(Ok(output)) => output,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "hook fault");
            HookOutput::fault(err)
        }
        Err(payload) => HookOutput::fault(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panic: {}", msg)
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panic: {}", msg)
    } else {
        "panic during evaluation".to_string()
    }
}
