use thiserror::Error;

/// Top-level error type for the `acos-api` crate.
///
/// Transport and decoding failures propagate as-is. Responses that decode
/// but carry the wrong shape are only errors where the caller asked for a
/// status (mutations); list endpoints degrade to empty results instead.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected or the auth response was unusable.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A session-bound call was made before `login`.
    #[error("No open session -- call login first")]
    NoSession,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    ///
    /// Built with the request URL stripped; request URLs carry the session id.
    #[error("HTTP transport error: {0}")]
    Transport(reqwest::Error),

    /// The device answered with something other than 200 OK.
    #[error("Unexpected HTTP status {status} from {method}")]
    HttpStatus { method: String, status: u16 },

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── ACOS API ────────────────────────────────────────────────────
    /// The device returned `{"response": {"status": "fail", "err": {...}}}`.
    #[error("ACOS API error ({code}): {message}")]
    Api {
        code: i64,
        message: String,
        body: String,
    },

    /// The response did not carry a recognisable status envelope.
    #[error("Bad response from {method}: {body}")]
    BadResponse { method: String, body: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// A port / member / virtual-port tuple could not be parsed.
    #[error("Invalid {kind} '{input}': {reason}")]
    InvalidSpec {
        kind: &'static str,
        input: String,
        reason: String,
    },
}

/// Vendor error code for " No such Server".
const NO_SUCH_SERVER: i64 = 67_174_402;

impl Error {
    /// Returns `true` if this error indicates the session is gone
    /// and logging in again might resolve it.
    pub fn is_auth_expired(&self) -> bool {
        match self {
            Self::Authentication { .. } | Self::NoSession => true,
            Self::Api { message, .. } => message.to_ascii_lowercase().contains("session"),
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if the device reported that the named object does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { code, message, .. } => {
                *code == NO_SUCH_SERVER || message.to_ascii_lowercase().contains("no such")
            }
            Self::HttpStatus { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Extract the vendor error code, if available.
    pub fn api_error_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_by_code_and_message() {
        let by_code = Error::Api {
            code: 67_174_402,
            message: String::new(),
            body: String::new(),
        };
        assert!(by_code.is_not_found());

        let by_message = Error::Api {
            code: 1,
            message: " No such Service Group".into(),
            body: String::new(),
        };
        assert!(by_message.is_not_found());

        let other = Error::Api {
            code: 1,
            message: "Name already exists".into(),
            body: String::new(),
        };
        assert!(!other.is_not_found());
        assert_eq!(other.api_error_code(), Some(1));
    }

    #[test]
    fn server_errors_are_transient() {
        let err = Error::HttpStatus {
            method: "slb.server.getAll".into(),
            status: 503,
        };
        assert!(err.is_transient());
        assert!(!Error::NoSession.is_transient());
        assert!(Error::NoSession.is_auth_expired());
    }
}
