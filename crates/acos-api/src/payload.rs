// Request bodies
//
// Shapes are fixed by the device: field names, nesting and whether a value
// is a JSON number or a string must match exactly. Note that the virtual
// port protocol is a string while every other protocol is a number.

use serde::Serialize;

use crate::spec::{MemberSpec, PortSpec, Protocol, VirtualPortSpec};

/// Enabled. The API also accepts 0 but nothing here creates disabled objects.
const STATUS_ENABLED: u8 = 1;

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionClose<'a> {
    pub session_id: &'a str,
}

/// Delete bodies for service groups and virtual servers: `{"name": ...}`.
#[derive(Debug, Serialize)]
pub(crate) struct ByName<'a> {
    pub name: &'a str,
}

// ── Server ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct ServerBody<'a> {
    pub server: ServerFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ServerFields<'a> {
    pub name: &'a str,
    pub host: &'a str,
    pub status: u8,
    pub port_list: Vec<ServerPortFields>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ServerPortFields {
    pub port_num: u16,
    pub protocol: Protocol,
}

/// `{"server": {"name": ...}}`
#[derive(Debug, Serialize)]
pub(crate) struct ServerDelete<'a> {
    pub server: ByName<'a>,
}

impl<'a> ServerBody<'a> {
    pub fn new(name: &'a str, host: &'a str, ports: &[PortSpec]) -> Self {
        Self {
            server: ServerFields {
                name,
                host,
                status: STATUS_ENABLED,
                port_list: ports
                    .iter()
                    .map(|p| ServerPortFields {
                        port_num: p.number,
                        protocol: p.protocol,
                    })
                    .collect(),
            },
        }
    }
}

// ── Service group ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct ServiceGroupBody<'a> {
    pub service_group: ServiceGroupFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ServiceGroupFields<'a> {
    pub name: &'a str,
    pub protocol: Protocol,
    pub member_list: Vec<MemberFields<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MemberFields<'a> {
    pub server: &'a str,
    pub port: u16,
}

impl<'a> ServiceGroupBody<'a> {
    pub fn new(name: &'a str, protocol: Protocol, members: &'a [MemberSpec]) -> Self {
        Self {
            service_group: ServiceGroupFields {
                name,
                protocol,
                member_list: members
                    .iter()
                    .map(|m| MemberFields {
                        server: &m.server,
                        port: m.port,
                    })
                    .collect(),
            },
        }
    }
}

// ── Virtual server ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(crate) struct VirtualServerBody<'a> {
    pub virtual_server: VirtualServerFields<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VirtualServerFields<'a> {
    pub name: &'a str,
    pub address: &'a str,
    pub status: u8,
    pub vport_list: Vec<VirtualPortFields<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct VirtualPortFields<'a> {
    pub port: u16,
    pub service_group: &'a str,
    pub protocol: String,
}

impl<'a> VirtualServerBody<'a> {
    pub fn new(name: &'a str, address: &'a str, ports: &'a [VirtualPortSpec]) -> Self {
        Self {
            virtual_server: VirtualServerFields {
                name,
                address,
                status: STATUS_ENABLED,
                vport_list: ports
                    .iter()
                    .map(|v| VirtualPortFields {
                        port: v.port,
                        service_group: &v.service_group,
                        protocol: v.protocol.to_string(),
                    })
                    .collect(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    fn to_value(body: &impl Serialize) -> Value {
        // Round-trip through text so the test sees exactly what goes on the wire.
        let text = serde_json::to_string(body).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn server_body_shape() {
        let ports = [
            PortSpec::new(8888, Protocol::TCP),
            PortSpec::new(9999, Protocol::UDP),
        ];
        let body = ServerBody::new("a10server_test00", "99.99.99.99", &ports);
        assert_eq!(
            to_value(&body),
            json!({
                "server": {
                    "name": "a10server_test00",
                    "host": "99.99.99.99",
                    "status": 1,
                    "port_list": [
                        { "port_num": 8888, "protocol": 2 },
                        { "port_num": 9999, "protocol": 3 }
                    ]
                }
            })
        );
    }

    #[test]
    fn server_body_without_ports_clears_list() {
        let body = ServerBody::new("s", "1.2.3.4", &[]);
        assert_eq!(to_value(&body)["server"]["port_list"], json!([]));
    }

    #[test]
    fn server_fields_keep_wire_order() {
        let body = ServerBody::new("s", "h", &[PortSpec::new(80, Protocol::TCP)]);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"server":{"name":"s","host":"h","status":1,"port_list":[{"port_num":80,"protocol":2}]}}"#
        );
    }

    #[test]
    fn names_with_quotes_stay_valid_json() {
        let body = ServerBody::new(r#"we"ird"#, "h", &[]);
        let v = to_value(&body);
        assert_eq!(v["server"]["name"], r#"we"ird"#);
    }

    #[test]
    fn service_group_members_omit_protocol() {
        let members = [
            MemberSpec::new("sg00_server00", 1111),
            MemberSpec {
                server: "sg00_server01".into(),
                port: 1111,
                protocol: Protocol::UDP,
            },
        ];
        let body = ServiceGroupBody::new("a10vgroup_sg00", Protocol::TCP, &members);
        assert_eq!(
            to_value(&body),
            json!({
                "service_group": {
                    "name": "a10vgroup_sg00",
                    "protocol": 2,
                    "member_list": [
                        { "server": "sg00_server00", "port": 1111 },
                        { "server": "sg00_server01", "port": 1111 }
                    ]
                }
            })
        );
    }

    #[test]
    fn virtual_port_protocol_is_a_string() {
        let vports = [VirtualPortSpec::new("a10vgroup_sg00", 8888, Protocol::TCP)];
        let body = VirtualServerBody::new("a10vserver_vs00", "88.88.88.88", &vports);
        assert_eq!(
            to_value(&body),
            json!({
                "virtual_server": {
                    "name": "a10vserver_vs00",
                    "address": "88.88.88.88",
                    "status": 1,
                    "vport_list": [
                        { "port": 8888, "service_group": "a10vgroup_sg00", "protocol": "2" }
                    ]
                }
            })
        );
    }

    #[test]
    fn delete_bodies() {
        assert_eq!(
            to_value(&ServerDelete { server: ByName { name: "s1" } }),
            json!({ "server": { "name": "s1" } })
        );
        assert_eq!(to_value(&ByName { name: "vs1" }), json!({ "name": "vs1" }));
        assert_eq!(
            to_value(&SessionClose { session_id: "abc" }),
            json!({ "session_id": "abc" })
        );
    }
}
