// Real server endpoints
//
// `slb.server.*`: list, create, update (replaces the port list) and delete.

use tracing::debug;

use crate::client::AcosClient;
use crate::error::Error;
use crate::extract::{self, Object};
use crate::models::{Server, ServerPort};
use crate::payload::{ByName, ServerBody, ServerDelete};
use crate::spec::PortSpec;

impl AcosClient {
    /// List all real servers.
    ///
    /// `GET slb.server.getAll` → `server_list[*]`
    pub async fn list_servers(&self) -> Result<Vec<Server>, Error> {
        let body = self.get_raw("slb.server.getAll").await?;
        let list = extract::extract_list(&body, "server_list")?;
        Ok(extract::objects(&list, "server").map(parse_server).collect())
    }

    /// Create a real server listening on `ports`.
    ///
    /// `POST slb.server.create`
    pub async fn create_server(
        &self,
        name: &str,
        host: &str,
        ports: &[PortSpec],
    ) -> Result<(), Error> {
        debug!(name, host, ports = ports.len(), "creating server");
        self.mutate("slb.server.create", &ServerBody::new(name, host, ports))
            .await
    }

    /// Update a real server. The device replaces its port list with
    /// `ports`, so an empty slice clears it.
    ///
    /// `POST slb.server.update`
    pub async fn update_server(
        &self,
        name: &str,
        host: &str,
        ports: &[PortSpec],
    ) -> Result<(), Error> {
        debug!(name, host, ports = ports.len(), "updating server");
        self.mutate("slb.server.update", &ServerBody::new(name, host, ports))
            .await
    }

    /// Delete a real server by name.
    ///
    /// `POST slb.server.delete` with `{"server": {"name": ...}}`
    pub async fn delete_server(&self, name: &str) -> Result<(), Error> {
        debug!(name, "deleting server");
        let body = ServerDelete {
            server: ByName { name },
        };
        self.mutate("slb.server.delete", &body).await
    }
}

pub(crate) fn parse_server(obj: &Object) -> Server {
    let name = extract::get_str(obj, "name");
    debug!(server = %name, "parsed server");
    Server {
        host: extract::get_str(obj, "host"),
        ports: extract::objects(extract::get_list(obj, "port_list"), "server port")
            .map(|p| ServerPort {
                number: extract::get_value(p, "port_num"),
                protocol: extract::get_value(p, "protocol"),
            })
            .collect(),
        name,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn server_with_mixed_port_entries() {
        let v = json!({
            "name": "web01",
            "host": "10.0.0.1",
            "port_list": [
                { "port_num": 80, "protocol": 2 },
                "garbage",
                { "port_num": "443", "protocol": 2 }
            ]
        });
        let s = parse_server(v.as_object().unwrap());
        assert_eq!(s.name, "web01");
        assert_eq!(s.host, "10.0.0.1");
        assert_eq!(
            s.ports,
            vec![
                ServerPort {
                    number: "80".into(),
                    protocol: "2".into(),
                },
                ServerPort {
                    number: "443".into(),
                    protocol: "2".into(),
                },
            ]
        );
    }

    #[test]
    fn server_without_port_list_is_kept() {
        let v = json!({ "name": "bare", "host": 7 });
        let s = parse_server(v.as_object().unwrap());
        assert_eq!(s.name, "bare");
        assert_eq!(s.host, "");
        assert!(s.ports.is_empty());
    }
}
