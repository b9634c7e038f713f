// ACOS v2.1 endpoint URLs
//
// Every call goes to the same path; the operation is selected by the
// `method` query parameter and session-bound calls add `session_id`:
//
//   https://<host>/services/rest/v2.1/?format=json&method=<name>&session_id=<id>
//
// A base URL with a path (a reverse proxy prefix) keeps it in front of the
// REST path.

use url::Url;

use crate::error::Error;

const REST_PATH: &str = "services/rest/v2.1/";

/// Resolve a device address into a base URL.
///
/// A bare host (`10.255.255.6`, `lb1:8443`) gets `https://`. Anything that
/// already carries a scheme is taken as-is.
pub fn base_url(host: &str) -> Result<Url, Error> {
    let host = host.trim();
    if host.contains("://") {
        Ok(Url::parse(host)?)
    } else {
        Ok(Url::parse(&format!("https://{host}"))?)
    }
}

/// `<base>/services/rest/v2.1/?format=json&method=<method>`
pub fn api_url(base: &Url, method: &str) -> Result<Url, Error> {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let path = format!("{}/", dir.path());
        dir.set_path(&path);
    }
    let mut url = dir.join(REST_PATH)?;
    url.query_pairs_mut()
        .clear()
        .append_pair("format", "json")
        .append_pair("method", method);
    Ok(url)
}

/// [`api_url`] plus `&session_id=<id>`.
pub fn session_url(base: &Url, method: &str, session_id: &str) -> Result<Url, Error> {
    let mut url = api_url(base, method)?;
    url.query_pairs_mut().append_pair("session_id", session_id);
    Ok(url)
}

/// Render a URL for logging with the session id masked.
pub(crate) fn redacted(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "session_id") {
        return url.to_string();
    }
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "session_id" { "****".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_defaults_to_https() {
        let base = base_url("10.255.255.6").unwrap();
        assert_eq!(base.as_str(), "https://10.255.255.6/");

        let with_scheme = base_url("http://127.0.0.1:8080").unwrap();
        assert_eq!(with_scheme.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn api_url_selects_method() {
        let base = base_url("lb1").unwrap();
        let url = api_url(&base, "authenticate").unwrap();
        assert_eq!(
            url.as_str(),
            "https://lb1/services/rest/v2.1/?format=json&method=authenticate"
        );
    }

    #[test]
    fn session_url_appends_session_id_last() {
        let base = base_url("lb1").unwrap();
        let url = session_url(&base, "slb.server.getAll", "0123abcd").unwrap();
        assert_eq!(
            url.as_str(),
            "https://lb1/services/rest/v2.1/?format=json&method=slb.server.getAll&session_id=0123abcd"
        );
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let base = Url::parse("https://lb1/some/prefix/").unwrap();
        let url = api_url(&base, "session.close").unwrap();
        assert_eq!(url.path(), "/some/prefix/services/rest/v2.1/");

        let base = base_url("https://proxy.example/acos").unwrap();
        let url = api_url(&base, "session.close").unwrap();
        assert_eq!(
            url.as_str(),
            "https://proxy.example/acos/services/rest/v2.1/?format=json&method=session.close"
        );
    }

    #[test]
    fn redaction_masks_only_session_id() {
        let base = base_url("lb1").unwrap();
        let url = session_url(&base, "slb.server.create", "secret-id").unwrap();
        let shown = redacted(&url);
        assert!(!shown.contains("secret-id"));
        assert!(shown.ends_with("method=slb.server.create&session_id=****"));

        let plain = api_url(&base, "authenticate").unwrap();
        assert_eq!(redacted(&plain), plain.to_string());
    }
}
