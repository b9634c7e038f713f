//! Virtual server command handlers.

use tabled::Tabled;

use acos_api::{AcosClient, VirtualPortSpec, VirtualServer, spec};

use crate::cli::{GlobalOpts, VserverSpecArgs, VserversArgs, VserversCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct VserverRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Virtual Ports")]
    ports: String,
}

impl From<&VirtualServer> for VserverRow {
    fn from(v: &VirtualServer) -> Self {
        Self {
            name: v.name.clone(),
            address: v.address.clone(),
            ports: output::cell(&v.virtual_ports, |p| {
                format!(
                    "{}/{} -> {}",
                    p.port,
                    util::protocol_label(&p.protocol),
                    p.service_group
                )
            }),
        }
    }
}

// ── Parsed request ──────────────────────────────────────────────────

#[derive(Debug)]
pub struct VserverSpec {
    name: String,
    address: String,
    ports: Vec<VirtualPortSpec>,
}

impl TryFrom<VserverSpecArgs> for VserverSpec {
    type Error = CliError;

    fn try_from(args: VserverSpecArgs) -> Result<Self, CliError> {
        Ok(Self {
            ports: spec::parse_all(&args.ports)?,
            name: args.name,
            address: args.address,
        })
    }
}

/// A `vservers` subcommand with its virtual ports already validated.
#[derive(Debug)]
pub enum Action {
    List,
    Create(VserverSpec),
    Update(VserverSpec),
    Delete { name: String },
}

impl TryFrom<VserversArgs> for Action {
    type Error = CliError;

    fn try_from(args: VserversArgs) -> Result<Self, CliError> {
        Ok(match args.command {
            VserversCommand::List => Self::List,
            VserversCommand::Create(vserver) => Self::Create(vserver.try_into()?),
            VserversCommand::Update(vserver) => Self::Update(vserver.try_into()?),
            VserversCommand::Delete { name } => Self::Delete { name },
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
            let vservers = client.list_virtual_servers().await?;
            let out = output::render_list(
                global.format(),
                &vservers,
                |v| VserverRow::from(v),
                |v| v.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        Action::Create(vserver) => {
            client
                .create_virtual_server(&vserver.name, &vserver.address, &vserver.ports)
                .await?;
            output::print_done(global, &format!("Virtual server '{}' created", vserver.name));
            Ok(())
        }

        Action::Update(vserver) => {
            client
                .update_virtual_server(&vserver.name, &vserver.address, &vserver.ports)
                .await
                .map_err(|e| {
                    CliError::for_object(e, "virtual server", &vserver.name, "vservers list")
                })?;
            output::print_done(global, &format!("Virtual server '{}' updated", vserver.name));
            Ok(())
        }

        Action::Delete { name } => {
            if !util::confirm(
                &format!("Delete virtual server '{name}'?"),
                "vservers delete",
                global.yes,
            )? {
                return Ok(());
            }
            client
                .delete_virtual_server(&name)
                .await
                .map_err(|e| CliError::for_object(e, "virtual server", &name, "vservers list"))?;
            output::print_done(global, &format!("Virtual server '{name}' deleted"));
            Ok(())
        }
    }
}
