//! Argv construction for permission fixes.

use crate::config::ShortcutConfig;
use crate::oracle::PermissionDecision;
use std::path::Path;

/// Build the argv applying `decision` to `path`.
///
/// The result is `[escalation prefix.., chmod, <expr>, --, <path>]`, with the prefix only
/// when the decision requires elevation. Returns `None` when no change is needed.
pub fn permission_fix_argv(
    config: &ShortcutConfig,
    decision: &PermissionDecision,
    path: &Path,
) -> Option<Vec<String>> {
    if !decision.needs_change {
        return None;
    }
    let expression = decision.mode_expression()?;

    let mut argv = Vec::with_capacity(config.escalation_prefix.len() + 4);
    if decision.requires_elevation {
        argv.extend(config.escalation_prefix.iter().cloned());
    }
    argv.push(config.chmod_program.clone());
    argv.push(expression);
    argv.push("--".to_string());
    argv.push(path.to_string_lossy().into_owned());
    Some(argv)
}
