//! Service group command handlers.

use tabled::Tabled;

use acos_api::{AcosClient, MemberSpec, Protocol, ServiceGroup, spec};

use crate::cli::{GlobalOpts, GroupSpecArgs, GroupsArgs, GroupsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Protocol")]
    protocol: String,
    #[tabled(rename = "Members")]
    members: String,
}

impl From<&ServiceGroup> for GroupRow {
    fn from(g: &ServiceGroup) -> Self {
        Self {
            name: g.name.clone(),
            protocol: util::protocol_label(&g.protocol),
            members: output::cell(&g.members, |m| format!("{}:{}", m.server, m.port)),
        }
    }
}

// ── Parsed request ──────────────────────────────────────────────────

#[derive(Debug)]
pub struct GroupSpec {
    name: String,
    protocol: Protocol,
    members: Vec<MemberSpec>,
}

impl TryFrom<GroupSpecArgs> for GroupSpec {
    type Error = CliError;

    fn try_from(args: GroupSpecArgs) -> Result<Self, CliError> {
        Ok(Self {
            protocol: args.protocol.parse()?,
            members: spec::parse_all(&args.members)?,
            name: args.name,
        })
    }
}

/// A `groups` subcommand with its protocol and members already validated.
#[derive(Debug)]
pub enum Action {
    List,
    Create(GroupSpec),
    Update(GroupSpec),
    Delete { name: String },
}

impl TryFrom<GroupsArgs> for Action {
    type Error = CliError;

    fn try_from(args: GroupsArgs) -> Result<Self, CliError> {
        Ok(match args.command {
            GroupsCommand::List => Self::List,
            GroupsCommand::Create(group) => Self::Create(group.try_into()?),
            GroupsCommand::Update(group) => Self::Update(group.try_into()?),
            GroupsCommand::Delete { name } => Self::Delete { name },
        })
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &AcosClient,
    action: Action,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match action {
        Action::List => {
            let groups = client.list_service_groups().await?;
            let out = output::render_list(
                global.format(),
                &groups,
                |g| GroupRow::from(g),
                |g| g.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        Action::Create(group) => {
            client
                .create_service_group(&group.name, group.protocol, &group.members)
                .await?;
            output::print_done(global, &format!("Service group '{}' created", group.name));
            Ok(())
        }

        Action::Update(group) => {
            client
                .update_service_group(&group.name, group.protocol, &group.members)
                .await
                .map_err(|e| {
                    CliError::for_object(e, "service group", &group.name, "groups list")
                })?;
            output::print_done(global, &format!("Service group '{}' updated", group.name));
            Ok(())
        }

        Action::Delete { name } => {
            if !util::confirm(
                &format!("Delete service group '{name}'?"),
                "groups delete",
                global.yes,
            )? {
                return Ok(());
            }
            client
                .delete_service_group(&name)
                .await
                .map_err(|e| CliError::for_object(e, "service group", &name, "groups list"))?;
            output::print_done(global, &format!("Service group '{name}' deleted"));
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn group_args(protocol: &str, members: &[&str]) -> GroupSpecArgs {
        GroupSpecArgs {
            name: "web".into(),
            members: members.iter().map(ToString::to_string).collect(),
            protocol: protocol.into(),
        }
    }

    #[test]
    fn group_spec_parses_protocol_and_members() {
        let group = GroupSpec::try_from(group_args("udp", &["dns1,53"])).unwrap();
        assert_eq!(group.protocol, Protocol::UDP);
        assert_eq!(group.members.len(), 1);
    }

    #[test]
    fn bad_member_or_protocol_is_rejected() {
        for args in [group_args("tcp", &["web01"]), group_args("sctp", &["web01,80"])] {
            let err = GroupSpec::try_from(args).unwrap_err();
            assert!(matches!(err, CliError::Validation { .. }), "got: {err:?}");
        }
    }
}
