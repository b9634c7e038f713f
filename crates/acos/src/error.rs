//! CLI error types with miette diagnostics.
//!
//! Maps `acos_api::Error` and `acos_config::ConfigError` into user-facing
//! errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use acos_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to device at {url}")]
    #[diagnostic(
        code(acos::connection_failed),
        help(
            "Check that the device management interface is reachable.\n\
             URL: {url}"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("TLS setup failed: {message}")]
    #[diagnostic(
        code(acos::tls_error),
        help(
            "Use --insecure (-k) to accept self-signed certificates,\n\
             or point ca_cert in your profile at a PEM bundle."
        )
    )]
    TlsError { message: String },

    #[error("Unexpected HTTP status {status} from {method}")]
    #[diagnostic(
        code(acos::http_status),
        help("Check that the host serves the ACOS v2.1 REST API.")
    )]
    HttpStatus { method: String, status: u16 },

    #[error("Request timed out")]
    #[diagnostic(
        code(acos::timeout),
        help("Increase timeout with --timeout or check device responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(acos::auth_failed),
        help(
            "Verify the username and password for profile '{profile}'.\n\
             Run: acos config set-password --profile {profile}"
        )
    )]
    AuthFailed { profile: String, message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(acos::no_credentials),
        help(
            "Configure credentials with: acos config init\n\
             Or set ACOS_USERNAME and ACOS_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(acos::not_found),
        help("Run: acos {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("API error ({code}): {message}")]
    #[diagnostic(code(acos::api_error))]
    ApiError { code: String, message: String },

    #[error("Device returned an unrecognised response to {method}")]
    #[diagnostic(code(acos::bad_response), help("Re-run with -vv to see the body."))]
    BadResponse { method: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(acos::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(acos::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: acos config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No device configured")]
    #[diagnostic(
        code(acos::no_config),
        help(
            "Create a profile with: acos config init\n\
             Or pass --host. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(acos::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(acos::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(acos::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } | Self::HttpStatus { .. } => {
                exit_code::CONNECTION
            }
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Like `From<acos_api::Error>`, but names the object on "no such" errors.
    pub fn for_object(
        err: acos_api::Error,
        resource_type: &str,
        identifier: &str,
        list_command: &str,
    ) -> Self {
        if err.is_not_found() {
            Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            }
        } else {
            err.into()
        }
    }

    /// Name the device `origin` on connection errors that lack one.
    #[must_use]
    pub fn at_device(self, origin: &str) -> Self {
        match self {
            Self::ConnectionFailed { url, source } if url.is_empty() => Self::ConnectionFailed {
                url: origin.to_owned(),
                source,
            },
            other => other,
        }
    }
}

// ── acos_api::Error → CliError ───────────────────────────────────────

impl From<acos_api::Error> for CliError {
    fn from(err: acos_api::Error) -> Self {
        use acos_api::Error as Api;

        match err {
            Api::Transport(e) if e.is_timeout() => Self::Timeout,

            // Request URLs carry the session id; the device is filled in
            // by `at_device`.
            Api::Transport(e) => Self::ConnectionFailed {
                url: String::new(),
                source: Box::new(e.without_url()),
            },

            Api::Tls(message) => Self::TlsError { message },

            Api::HttpStatus { method, status } => Self::HttpStatus { method, status },

            Api::Authentication { message } => Self::AuthFailed {
                profile: "current".into(),
                message,
            },

            Api::NoSession => Self::AuthFailed {
                profile: "current".into(),
                message: "no open session".into(),
            },

            Api::InvalidUrl(e) => Self::Validation {
                field: "host".into(),
                reason: e.to_string(),
            },

            Api::InvalidSpec {
                kind,
                input,
                reason,
            } => Self::Validation {
                field: kind.into(),
                reason: format!("'{input}': {reason}"),
            },

            Api::Api { code, message, .. } => Self::ApiError {
                code: code.to_string(),
                message: message.trim().to_owned(),
            },

            Api::BadResponse { method, .. } => Self::BadResponse { method },

            Api::Deserialization { message, .. } => Self::ApiError {
                code: "decode".into(),
                message,
            },
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(Box::new(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_object() {
        let err = acos_api::Error::Api {
            code: 67_174_402,
            message: " No such Server".into(),
            body: String::new(),
        };
        let cli = CliError::for_object(err, "server", "web01", "servers list");
        assert!(matches!(cli, CliError::NotFound { ref identifier, .. } if identifier == "web01"));
        assert_eq!(cli.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn vendor_message_is_trimmed() {
        let err = acos_api::Error::Api {
            code: 1023,
            message: " Name already exists ".into(),
            body: String::new(),
        };
        let cli = CliError::for_object(err, "server", "web01", "servers list");
        assert_eq!(cli.to_string(), "API error (1023): Name already exists");
        assert_eq!(cli.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn connection_errors_name_only_the_device() {
        let plain = CliError::Timeout.at_device("https://lb1");
        assert!(matches!(plain, CliError::Timeout));

        let err = CliError::ConnectionFailed {
            url: String::new(),
            source: "connection refused".into(),
        }
        .at_device("https://lb1:8443");
        assert_eq!(err.to_string(), "Could not connect to device at https://lb1:8443");
        assert_eq!(err.exit_code(), exit_code::CONNECTION);
    }

    #[test]
    fn bad_specs_are_usage_errors() {
        let err = acos_api::Error::InvalidSpec {
            kind: "port",
            input: "eighty".into(),
            reason: "not a port number".into(),
        };
        let cli = CliError::from(err);
        assert_eq!(cli.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn config_credentials_map_to_auth() {
        let cli = CliError::from(ConfigError::NoCredentials {
            profile: "lab".into(),
        });
        assert_eq!(cli.exit_code(), exit_code::AUTH);
    }
}
