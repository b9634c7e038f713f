//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod config_cmd;
pub mod groups;
pub mod servers;
pub mod util;
pub mod vservers;

use acos_api::AcosClient;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// A device-bound command whose arguments have been parsed.
///
/// Built before login so that malformed tuples never open a session.
#[derive(Debug)]
pub enum Job {
    Servers(servers::Action),
    Groups(groups::Action),
    Vservers(vservers::Action),
}

/// Run `job` against a logged-in client.
///
/// The caller owns the session.
pub async fn dispatch(job: Job, client: &AcosClient, global: &GlobalOpts) -> Result<(), CliError> {
    match job {
        Job::Servers(action) => servers::handle(client, action, global).await,
        Job::Groups(action) => groups::handle(client, action, global).await,
        Job::Vservers(action) => vservers::handle(client, action, global).await,
    }
}
