//! Real server command handlers.

use tabled::Tabled;

use acos_api::{AcosClient, PortSpec, Server, spec};

use crate::cli::{GlobalOpts, ServerSpecArgs, ServersArgs, ServersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ServerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Ports")]
    ports: String,
}

impl From<&Server> for ServerRow {
    fn from(s: &Server) -> Self {
        Self {
            name: s.name.clone(),
            host: s.host.clone(),
            ports: output::cell(&s.ports, |p| {
                format!("{}/{}", p.number, util::protocol_label(&p.protocol))
            }),
        }
    }
}

// ── Parsed request ──────────────────────────────────────────────────

#[derive(Debug)]
pub struct ServerSpec {
    name: String,
    host: String,
    ports: Vec<PortSpec>,
}

impl TryFrom<ServerSpecArgs> for ServerSpec {
    type Error = CliError;

    fn try_from(args: ServerSpecArgs) -> Result<Self, CliError> {
        Ok(Self {
            ports: spec::parse_all(&args.ports)?,
            name: args.name,
            host: args.host,
        })
    }
}

/// A `servers` subcommand with its port tuples already validated.
#[derive(Debug)]
pub enum Action {
    List,
    Create(ServerSpec),
    Update(ServerSpec),
    Delete { name: String },
}

impl TryFrom<ServersArgs> for Action {
    type Error = CliError;

    fn try_from(args: ServersArgs) -> Result<Self, CliError> {
        Ok(match args.command {
            ServersCommand::List => Self::List,
            ServersCommand::Create(server) => Self::Create(server.try_into()?),
            ServersCommand::Update(server) => Self::Update(server.try_into()?),
            ServersCommand::Delete { name } => Self::Delete { name },
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
            let servers = client.list_servers().await?;
            let out = output::render_list(
                global.format(),
                &servers,
                |s| ServerRow::from(s),
                |s| s.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        Action::Create(server) => {
            client
                .create_server(&server.name, &server.host, &server.ports)
                .await?;
            output::print_done(global, &format!("Server '{}' created", server.name));
            Ok(())
        }

        Action::Update(server) => {
            client
                .update_server(&server.name, &server.host, &server.ports)
                .await
                .map_err(|e| CliError::for_object(e, "server", &server.name, "servers list"))?;
            output::print_done(global, &format!("Server '{}' updated", server.name));
            Ok(())
        }

        Action::Delete { name } => {
            if !util::confirm(
                &format!("Delete server '{name}'?"),
                "servers delete",
                global.yes,
            )? {
                return Ok(());
            }
            client
                .delete_server(&name)
                .await
                .map_err(|e| CliError::for_object(e, "server", &name, "servers list"))?;
            output::print_done(global, &format!("Server '{name}' deleted"));
            Ok(())
        }
    }
}
