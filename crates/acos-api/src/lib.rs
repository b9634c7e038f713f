// acos-api: Async Rust client for the A10 Networks ACOS v2.1 management API

pub mod client;
pub mod endpoint;
pub mod error;
pub mod extract;
pub mod models;
mod payload;
pub mod response;
mod servers;
mod service_groups;
mod session;
pub mod spec;
pub mod transport;
mod virtual_servers;

pub use client::{AcosClient, ClientOptions};
pub use error::Error;
pub use models::{
    Server, ServerPort, ServiceGroup, ServiceGroupMember, VirtualPort, VirtualServer,
};
pub use spec::{MemberSpec, PortSpec, Protocol, VirtualPortSpec};
pub use transport::{TlsMode, TransportConfig};
