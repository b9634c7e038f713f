// Service group endpoints
//
// `slb.service_group.*`. Members reference real servers by name, so the
// servers must exist before a group that lists them is created.

use tracing::debug;

use crate::client::AcosClient;
use crate::error::Error;
use crate::extract::{self, Object};
use crate::models::{ServiceGroup, ServiceGroupMember};
use crate::payload::{ByName, ServiceGroupBody};
use crate::spec::{MemberSpec, Protocol};

impl AcosClient {
    /// List all service groups.
    ///
    /// `GET slb.service_group.getAll` → `service_group_list[*]`
    pub async fn list_service_groups(&self) -> Result<Vec<ServiceGroup>, Error> {
        let body = self.get_raw("slb.service_group.getAll").await?;
        let list = extract::extract_list(&body, "service_group_list")?;
        Ok(extract::objects(&list, "service group")
            .map(parse_service_group)
            .collect())
    }

    /// Create a service group.
    ///
    /// `POST slb.service_group.create`
    pub async fn create_service_group(
        &self,
        name: &str,
        protocol: Protocol,
        members: &[MemberSpec],
    ) -> Result<(), Error> {
        debug!(name, %protocol, members = members.len(), "creating service group");
        self.mutate(
            "slb.service_group.create",
            &ServiceGroupBody::new(name, protocol, members),
        )
        .await
    }

    /// Update a service group, replacing its member list.
    ///
    /// `POST slb.service_group.update`
    pub async fn update_service_group(
        &self,
        name: &str,
        protocol: Protocol,
        members: &[MemberSpec],
    ) -> Result<(), Error> {
        debug!(name, %protocol, members = members.len(), "updating service group");
        self.mutate(
            "slb.service_group.update",
            &ServiceGroupBody::new(name, protocol, members),
        )
        .await
    }

    /// Delete a service group by name.
    ///
    /// `POST slb.service_group.delete` with `{"name": ...}`
    pub async fn delete_service_group(&self, name: &str) -> Result<(), Error> {
        debug!(name, "deleting service group");
        self.mutate("slb.service_group.delete", &ByName { name })
            .await
    }
}

pub(crate) fn parse_service_group(obj: &Object) -> ServiceGroup {
    let group = ServiceGroup {
        name: extract::get_str(obj, "name"),
        protocol: extract::get_value(obj, "protocol"),
        members: extract::objects(extract::get_list(obj, "member_list"), "member")
            .map(|m| ServiceGroupMember {
                server: extract::get_str(m, "server"),
                port: extract::get_value(m, "port"),
            })
            .collect(),
    };
    debug!(group = %group.name, protocol = %group.protocol, "parsed service group");
    group
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn group_members_are_parsed() {
        let v = json!({
            "name": "sg-web",
            "protocol": 2,
            "member_list": [
                { "server": "web01", "port": 80, "status": 1 },
                { "server": 5, "port": 80 },
                []
            ]
        });
        let g = parse_service_group(v.as_object().unwrap());
        assert_eq!(g.name, "sg-web");
        assert_eq!(g.protocol, "2");
        assert_eq!(g.members.len(), 2);
        assert_eq!(g.members[0].server, "web01");
        assert_eq!(g.members[1].server, "");
        assert_eq!(g.members[1].port, "80");
    }

    #[test]
    fn group_without_members() {
        let v = json!({ "name": "empty", "protocol": "2", "member_list": null });
        let g = parse_service_group(v.as_object().unwrap());
        assert_eq!(g.protocol, "2");
        assert!(g.members.is_empty());
    }
}
