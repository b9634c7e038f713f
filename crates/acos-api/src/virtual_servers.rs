// Virtual server endpoints
//
// `slb.virtual_server.*`. Each virtual port forwards to a service group.

use tracing::debug;

use crate::client::AcosClient;
use crate::error::Error;
use crate::extract::{self, Object};
use crate::models::{VirtualPort, VirtualServer};
use crate::payload::{ByName, VirtualServerBody};
use crate::spec::VirtualPortSpec;

impl AcosClient {
    /// List all virtual servers.
    ///
    /// `GET slb.virtual_server.getAll` → `virtual_server_list[*]`
    pub async fn list_virtual_servers(&self) -> Result<Vec<VirtualServer>, Error> {
        let body = self.get_raw("slb.virtual_server.getAll").await?;
        let list = extract::extract_list(&body, "virtual_server_list")?;
        Ok(extract::objects(&list, "virtual server")
            .map(parse_virtual_server)
            .collect())
    }

    /// Create a virtual server at `address`.
    ///
    /// `POST slb.virtual_server.create`
    pub async fn create_virtual_server(
        &self,
        name: &str,
        address: &str,
        ports: &[VirtualPortSpec],
    ) -> Result<(), Error> {
        debug!(name, address, ports = ports.len(), "creating virtual server");
        self.mutate(
            "slb.virtual_server.create",
            &VirtualServerBody::new(name, address, ports),
        )
        .await
    }

    /// Update a virtual server, replacing its virtual ports.
    ///
    /// `POST slb.virtual_server.update`
    pub async fn update_virtual_server(
        &self,
        name: &str,
        address: &str,
        ports: &[VirtualPortSpec],
    ) -> Result<(), Error> {
        debug!(name, address, ports = ports.len(), "updating virtual server");
        self.mutate(
            "slb.virtual_server.update",
            &VirtualServerBody::new(name, address, ports),
        )
        .await
    }

    /// Delete a virtual server by name.
    ///
    /// `POST slb.virtual_server.delete` with `{"name": ...}`
    pub async fn delete_virtual_server(&self, name: &str) -> Result<(), Error> {
        debug!(name, "deleting virtual server");
        self.mutate("slb.virtual_server.delete", &ByName { name })
            .await
    }
}

pub(crate) fn parse_virtual_server(obj: &Object) -> VirtualServer {
    let name = extract::get_str(obj, "name");
    let virtual_ports = extract::objects(extract::get_list(obj, "vport_list"), "virtual port")
        .map(|p| {
            let vport = VirtualPort {
                port: extract::get_value(p, "port"),
                protocol: extract::get_value(p, "protocol"),
                service_group: extract::get_str(p, "service_group"),
            };
            debug!(
                server = %name,
                port = %vport.port,
                service_group = %vport.service_group,
                "parsed virtual port"
            );
            vport
        })
        .collect();

    VirtualServer {
        address: extract::get_str(obj, "address"),
        virtual_ports,
        name,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn virtual_ports_are_parsed() {
        let v = json!({
            "name": "vs00",
            "address": "88.88.88.88",
            "vport_list": [
                { "port": 8888, "protocol": 2, "service_group": "sg00" },
                { "port": 443, "protocol": "12", "service_group": "sg01", "name": "_443" },
                42
            ]
        });
        let vs = parse_virtual_server(v.as_object().unwrap());
        assert_eq!(vs.name, "vs00");
        assert_eq!(vs.address, "88.88.88.88");
        assert_eq!(
            vs.virtual_ports,
            vec![
                VirtualPort {
                    port: "8888".into(),
                    protocol: "2".into(),
                    service_group: "sg00".into(),
                },
                VirtualPort {
                    port: "443".into(),
                    protocol: "12".into(),
                    service_group: "sg01".into(),
                },
            ]
        );
    }

    #[test]
    fn virtual_server_without_vports_is_kept() {
        let v = json!({ "name": "vs-empty", "address": "1.1.1.1", "vport_list": {} });
        let vs = parse_virtual_server(v.as_object().unwrap());
        assert_eq!(vs.name, "vs-empty");
        assert!(vs.virtual_ports.is_empty());
    }
}
