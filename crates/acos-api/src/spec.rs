// Port / member / virtual-port tuples
//
// Callers describe nested objects as short strings, fields separated by
// commas and/or whitespace:
//
//   port          "80"            "80,2"           "53 udp"
//   member        "web01,80"      "web01,80,2"
//   virtual port  "sg-web,80"     "sg-web 443 12"
//
// A missing protocol defaults to TCP.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// ACOS protocol code (`2` = TCP, `3` = UDP, higher codes for L7 vports).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Protocol(pub u8);

impl Protocol {
    pub const TCP: Self = Self(2);
    pub const UDP: Self = Self(3);
}

impl Default for Protocol {
    fn default() -> Self {
        Self::TCP
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("tcp") {
            return Ok(Self::TCP);
        }
        if s.eq_ignore_ascii_case("udp") {
            return Ok(Self::UDP);
        }
        s.parse::<u8>().map(Self).map_err(|_| Error::InvalidSpec {
            kind: "protocol",
            input: s.to_owned(),
            reason: "expected a protocol code or 'tcp'/'udp'".into(),
        })
    }
}

fn fields(input: &str) -> Vec<&str> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect()
}

fn parse_port(kind: &'static str, input: &str, field: &str) -> Result<u16, Error> {
    field.parse::<u16>().map_err(|_| Error::InvalidSpec {
        kind,
        input: input.to_owned(),
        reason: format!("'{field}' is not a port number"),
    })
}

fn parse_protocol(
    kind: &'static str,
    input: &str,
    field: Option<&&str>,
) -> Result<Protocol, Error> {
    match field {
        Some(p) => p.parse().map_err(|_| Error::InvalidSpec {
            kind,
            input: input.to_owned(),
            reason: format!("'{p}' is not a protocol"),
        }),
        None => {
            debug!(kind, input, protocol = %Protocol::TCP, "defaulting protocol");
            Ok(Protocol::TCP)
        }
    }
}

fn missing(kind: &'static str, input: &str, what: &str) -> Error {
    Error::InvalidSpec {
        kind,
        input: input.to_owned(),
        reason: format!("missing {what}"),
    }
}

/// A server port: `"port[,protocol]"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortSpec {
    pub number: u16,
    pub protocol: Protocol,
}

impl PortSpec {
    pub fn new(number: u16, protocol: Protocol) -> Self {
        Self { number, protocol }
    }
}

impl FromStr for PortSpec {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        const KIND: &str = "port";
        let f = fields(input);
        let number = f.first().ok_or_else(|| missing(KIND, input, "port number"))?;
        Ok(Self {
            number: parse_port(KIND, input, number)?,
            protocol: parse_protocol(KIND, input, f.get(1))?,
        })
    }
}

/// A service group member: `"server,port[,protocol]"`.
///
/// The protocol is accepted for symmetry with the other tuples but the
/// member payload has no field for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSpec {
    pub server: String,
    pub port: u16,
    pub protocol: Protocol,
}

impl MemberSpec {
    pub fn new(server: impl Into<String>, port: u16) -> Self {
        Self {
            server: server.into(),
            port,
            protocol: Protocol::TCP,
        }
    }
}

impl FromStr for MemberSpec {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        const KIND: &str = "member";
        let f = fields(input);
        let server = f.first().ok_or_else(|| missing(KIND, input, "server name"))?;
        let port = f.get(1).ok_or_else(|| missing(KIND, input, "port number"))?;
        Ok(Self {
            server: (*server).to_owned(),
            port: parse_port(KIND, input, port)?,
            protocol: parse_protocol(KIND, input, f.get(2))?,
        })
    }
}

/// A virtual port: `"service_group,port[,protocol]"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualPortSpec {
    pub service_group: String,
    pub port: u16,
    pub protocol: Protocol,
}

impl VirtualPortSpec {
    pub fn new(service_group: impl Into<String>, port: u16, protocol: Protocol) -> Self {
        Self {
            service_group: service_group.into(),
            port,
            protocol,
        }
    }
}

impl FromStr for VirtualPortSpec {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        const KIND: &str = "virtual port";
        let f = fields(input);
        let (Some(group), Some(port)) = (f.first(), f.get(1)) else {
            return Err(missing(KIND, input, "service group or port number"));
        };
        Ok(Self {
            service_group: (*group).to_owned(),
            port: parse_port(KIND, input, port)?,
            protocol: parse_protocol(KIND, input, f.get(2))?,
        })
    }
}

/// Parse a whole list of tuples, failing on the first bad one.
pub fn parse_all<T: FromStr<Err = Error>>(inputs: &[impl AsRef<str>]) -> Result<Vec<T>, Error> {
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_to_tcp() {
        let p: PortSpec = "8888".parse().unwrap();
        assert_eq!(p, PortSpec::new(8888, Protocol::TCP));
    }

    #[test]
    fn port_separators_are_commas_or_whitespace() {
        for input in ["53,3", "53 3", " 53 ,\t3 ", "53,udp", "53 UDP"] {
            let p: PortSpec = input.parse().unwrap();
            assert_eq!(p, PortSpec::new(53, Protocol::UDP), "input {input:?}");
        }
    }

    #[test]
    fn port_rejects_garbage() {
        assert!(matches!(
            "".parse::<PortSpec>(),
            Err(Error::InvalidSpec { kind: "port", .. })
        ));
        assert!("http".parse::<PortSpec>().is_err());
        assert!("70000".parse::<PortSpec>().is_err());
        assert!("80,sctp".parse::<PortSpec>().is_err());
    }

    #[test]
    fn member_needs_server_and_port() {
        let m: MemberSpec = "web01,1111".parse().unwrap();
        assert_eq!(m, MemberSpec::new("web01", 1111));

        let m: MemberSpec = "web01 1111 3".parse().unwrap();
        assert_eq!(m.protocol, Protocol::UDP);

        assert!("web01".parse::<MemberSpec>().is_err());
        assert!("".parse::<MemberSpec>().is_err());
    }

    #[test]
    fn virtual_port_needs_group_and_port() {
        let v: VirtualPortSpec = "sg00,8888".parse().unwrap();
        assert_eq!(v, VirtualPortSpec::new("sg00", 8888, Protocol::TCP));

        let v: VirtualPortSpec = "sg00,443,12".parse().unwrap();
        assert_eq!(v.protocol, Protocol(12));

        let err = "sg00".parse::<VirtualPortSpec>().unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn parse_all_stops_on_first_error() {
        let ok: Vec<PortSpec> = parse_all(&["80", "443"]).unwrap();
        assert_eq!(ok.len(), 2);

        let err = parse_all::<PortSpec>(&["80", "x", "443"]).unwrap_err();
        assert!(matches!(err, Error::InvalidSpec { ref input, .. } if input == "x"));
    }
}
