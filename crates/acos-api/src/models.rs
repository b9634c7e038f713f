// Resource models returned by the list endpoints
//
// Values are kept as text exactly as the device rendered them; the same
// field arrives as a number on one firmware and a string on another.

use serde::{Deserialize, Serialize};

/// A real server from `slb.server.getAll`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    pub name: String,
    pub host: String,
    #[serde(default)]
    pub ports: Vec<ServerPort>,
}

/// Port/protocol pair of a [`Server`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPort {
    pub number: String,
    pub protocol: String,
}

/// A service group from `slb.service_group.getAll`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub name: String,
    pub protocol: String,
    #[serde(default)]
    pub members: Vec<ServiceGroupMember>,
}

/// Member of a [`ServiceGroup`]: a server name and the port it serves on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceGroupMember {
    pub server: String,
    pub port: String,
}

/// A virtual server from `slb.virtual_server.getAll`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualServer {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub virtual_ports: Vec<VirtualPort>,
}

/// Virtual port of a [`VirtualServer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VirtualPort {
    pub port: String,
    pub protocol: String,
    pub service_group: String,
}
