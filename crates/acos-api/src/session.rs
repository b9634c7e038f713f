// Session login / logout
//
// `authenticate` returns `{"session_id": "..."}` on success. Every later
// call carries the id in its query string, and `session.close` ends it.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info};

use crate::client::{AUTHENTICATE, AcosClient};
use crate::endpoint;
use crate::error::Error;
use crate::payload::{Credentials, SessionClose};

impl AcosClient {
    /// Open a session with username/password.
    ///
    /// `POST ?format=json&method=authenticate` with
    /// `{"username": ..., "password": ...}`. The returned session id is kept
    /// in the client and replaces any previous one.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = endpoint::api_url(self.base_url(), AUTHENTICATE)?;
        debug!(username, "authenticating");

        let body = Credentials {
            username,
            password: password.expose_secret(),
        };
        let resp = self.post_bytes(AUTHENTICATE, url, &body).await?;

        let id = parse_session_id(&resp)?;
        self.set_session(Some(id));
        info!(host = self.base_url().host_str().unwrap_or_default(), "session opened");
        Ok(())
    }

    /// Close the current session.
    ///
    /// `POST ?method=session.close&session_id=<id>` with `{"session_id": <id>}`.
    /// Only transport failures are errors; the local session is dropped
    /// either way. Without a session this does nothing.
    pub async fn logout(&self) -> Result<(), Error> {
        let Some(id) = self.session_id() else {
            debug!("logout without session");
            return Ok(());
        };
        let url = self.session_url("session.close")?;
        self.set_session(None);

        let body = SessionClose {
            session_id: id.expose_secret(),
        };
        self.post_bytes("session.close", url, &body).await?;
        info!("session closed");
        Ok(())
    }
}

/// Pull `session_id` out of an `authenticate` response.
fn parse_session_id(body: &[u8]) -> Result<SecretString, Error> {
    let value: Value = serde_json::from_slice(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
    })?;

    match value.get("session_id") {
        Some(Value::String(id)) => Ok(SecretString::from(id.clone())),
        Some(_) => Err(Error::Authentication {
            message: "auth session_id not a string".into(),
        }),
        None => {
            // A rejected login still answers 200 with the status envelope.
            let vendor = value
                .pointer("/response/err/msg")
                .and_then(Value::as_str)
                .map(str::trim);
            Err(Error::Authentication {
                message: vendor.map_or_else(
                    || "auth response missing session_id".into(),
                    str::to_owned,
                ),
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_extracted() {
        let id = parse_session_id(br#"{"session_id": "0123456789abcdef"}"#).unwrap();
        assert_eq!(id.expose_secret(), "0123456789abcdef");
    }

    #[test]
    fn missing_session_id() {
        let err = parse_session_id(br"{}").unwrap_err();
        assert!(
            matches!(err, Error::Authentication { ref message } if message == "auth response missing session_id")
        );
    }

    #[test]
    fn non_string_session_id() {
        let err = parse_session_id(br#"{"session_id": 42}"#).unwrap_err();
        assert!(
            matches!(err, Error::Authentication { ref message } if message == "auth session_id not a string")
        );
    }

    #[test]
    fn vendor_rejection_message() {
        let body = br#"{"response": {"status": "fail", "err": {"code": 520749062, "msg": " Invalid username or password"}}}"#;
        let err = parse_session_id(body).unwrap_err();
        assert!(
            matches!(err, Error::Authentication { ref message } if message == "Invalid username or password")
        );
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            parse_session_id(b"<html>login</html>"),
            Err(Error::Deserialization { .. })
        ));
    }
}
