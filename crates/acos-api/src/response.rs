// ACOS status envelope
//
// Mutating methods answer with one of:
//
//   {"response": {"status": "OK"}}
//   {"response": {"status": "fail", "err": {"code": 67174402, "msg": " No such Server"}}}
//
// Anything else is a bad response.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::extract;

#[derive(Debug, Deserialize)]
struct Envelope {
    response: Value,
}

/// Validate the status envelope of a mutation response.
pub fn check_status(method: &str, body: &[u8]) -> Result<(), Error> {
    let bad = || Error::BadResponse {
        method: method.to_owned(),
        body: String::from_utf8_lossy(body).into_owned(),
    };

    let envelope: Envelope = match serde_json::from_slice(body) {
        Ok(env) => env,
        Err(e) => {
            debug!(method, error = %e, "response is not a status envelope");
            return Err(bad());
        }
    };

    let Some(response) = envelope.response.as_object() else {
        debug!(method, "response is not a map");
        return Err(bad());
    };

    match response.get("status").and_then(Value::as_str) {
        Some("OK") => Ok(()),
        Some(status) => {
            debug!(method, status, "status is not OK");
            let (code, msg) = match response.get("err").and_then(Value::as_object) {
                Some(err) => (
                    extract::get_value(err, "code").trim().parse().unwrap_or_default(),
                    extract::get_value(err, "msg").trim().to_owned(),
                ),
                None => (0, String::new()),
            };
            Err(Error::Api {
                code,
                message: if msg.is_empty() {
                    format!("status={status}")
                } else {
                    msg
                },
                body: String::from_utf8_lossy(body).into_owned(),
            })
        }
        None => {
            debug!(method, "response has no status");
            Err(bad())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ok_status() {
        check_status("slb.server.create", br#"{"response": {"status": "OK"}}"#).unwrap();
    }

    #[test]
    fn fail_status_carries_vendor_error() {
        let body = br#"{"response": {"status": "fail", "err": {"code": 67174402, "msg": " No such Server"}}}"#;
        let err = check_status("slb.server.delete", body).unwrap_err();
        match err {
            Error::Api { code, ref message, .. } => {
                assert_eq!(code, 67_174_402);
                assert_eq!(message, "No such Server");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
        assert!(check_status("slb.server.delete", body).unwrap_err().is_not_found());
    }

    #[test]
    fn fail_with_string_code_keeps_message() {
        let body = br#"{"response": {"status": "fail", "err": {"code": "67174402", "msg": "No such Server"}}}"#;
        let err = check_status("slb.server.delete", body).unwrap_err();
        assert!(err.is_not_found());
        match err {
            Error::Api { code, ref message, .. } => {
                assert_eq!(code, 67_174_402);
                assert_eq!(message, "No such Server");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }

        let body = br#"{"response": {"status": "fail", "err": {"code": "n/a", "msg": "busy"}}}"#;
        let err = check_status("slb.server.create", body).unwrap_err();
        assert!(matches!(err, Error::Api { code: 0, ref message, .. } if message == "busy"));
    }

    #[test]
    fn fail_without_err_block() {
        let err = check_status("m", br#"{"response": {"status": "fail"}}"#).unwrap_err();
        assert!(matches!(err, Error::Api { code: 0, ref message, .. } if message == "status=fail"));
    }

    #[test]
    fn malformed_envelopes_are_bad_responses() {
        for body in [
            &b""[..],
            b"not json",
            br#"{"status": "OK"}"#,
            br#"{"response": "OK"}"#,
            br#"{"response": {"code": 1}}"#,
        ] {
            let err = check_status("slb.server.update", body).unwrap_err();
            assert!(
                matches!(err, Error::BadResponse { ref method, .. } if method == "slb.server.update"),
                "body {:?} gave {err:?}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
