//! Shared helpers for command handlers.

use std::io::IsTerminal;

use acos_api::Protocol;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal to ask on, the operation is refused rather than
/// silently approved.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Show a vendor protocol code by name where one is known.
pub fn protocol_label(code: &str) -> String {
    match code.parse::<u8>().map(Protocol) {
        Ok(Protocol::TCP) => "tcp".into(),
        Ok(Protocol::UDP) => "udp".into(),
        _ => code.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_protocols_get_names() {
        assert_eq!(protocol_label("2"), "tcp");
        assert_eq!(protocol_label("3"), "udp");
        assert_eq!(protocol_label("12"), "12");
        assert_eq!(protocol_label(""), "");
    }

    #[test]
    fn yes_skips_the_prompt() {
        assert!(matches!(confirm("Delete?", "delete", true), Ok(true)));
    }
}
