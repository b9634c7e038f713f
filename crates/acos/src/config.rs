//! CLI configuration: thin wrapper around `acos_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--host, --username, --insecure, --timeout).

use std::io::IsTerminal;
use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::warn;

use acos_api::TlsMode;
use acos_config::Connection;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use acos_config::{Config, Profile, config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format from `defaults.output`, falling back to table.
pub fn default_output(config: &Config) -> OutputFormat {
    OutputFormat::from_str(&config.defaults.output, true).unwrap_or_else(|_| {
        warn!(output = %config.defaults.output, "unknown defaults.output, using table");
        OutputFormat::Table
    })
}

/// Build the device connection from the config file, profile and flags,
/// returning it with the active profile name.
///
/// Flags win over profile values. Without a matching profile, `--host`
/// alone is enough as long as credentials come from flags or env.
pub fn resolve_connection(global: &GlobalOpts) -> Result<(String, Connection), CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let adhoc;
    let profile = match (cfg.profiles.get(&profile_name), global.host.as_deref()) {
        (Some(profile), _) => profile,
        (None, Some(_)) => {
            adhoc = Profile::default();
            &adhoc
        }
        (None, None) if global.profile.is_some() => {
            let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
            available.sort();
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            });
        }
        (None, None) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    // 1. Host (flag > env > profile)
    let host = global.host.as_deref().unwrap_or(&profile.host);
    let base_url = acos_api::endpoint::base_url(host).map_err(|_| CliError::Validation {
        field: "host".into(),
        reason: format!("invalid host: {host}"),
    })?;

    // 2. Transport
    let mut transport = acos_config::resolve_transport(profile, &cfg.defaults);
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        transport.timeout = Duration::from_secs(secs);
    }

    // 3. Credentials
    let username = match global.username {
        Some(ref u) => u.clone(),
        None => acos_config::resolve_username(profile, &profile_name)?,
    };
    let password = match global.password {
        Some(ref p) => SecretString::from(p.clone()),
        None => match acos_config::resolve_password(profile, &profile_name) {
            Ok(pw) => pw,
            Err(_) if std::io::stdin().is_terminal() => prompt_password(&username)?,
            Err(e) => return Err(e.into()),
        },
    };

    let connection = Connection {
        base_url,
        transport,
        username,
        password,
    };
    Ok((profile_name, connection))
}

fn prompt_password(username: &str) -> Result<SecretString, CliError> {
    let pw = rpassword::prompt_password(format!("Password for {username}: "))?;
    Ok(SecretString::from(pw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_output(output: &str) -> Config {
        let mut cfg = Config::default();
        cfg.defaults.output = output.into();
        cfg
    }

    #[test]
    fn default_output_follows_config() {
        assert_eq!(default_output(&with_output("yaml")), OutputFormat::Yaml);
        assert_eq!(default_output(&with_output("json-compact")), OutputFormat::JsonCompact);
        assert_eq!(default_output(&with_output("PLAIN")), OutputFormat::Plain);
    }

    #[test]
    fn unknown_default_output_is_table() {
        assert_eq!(default_output(&with_output("xml")), OutputFormat::Table);
        assert_eq!(default_output(&Config::default()), OutputFormat::Table);
    }
}
