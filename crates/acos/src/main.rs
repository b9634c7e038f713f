mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use acos_api::{AcosClient, ClientOptions};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::commands::Job;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if cli.global.output.is_none() {
        cli.global.output = Some(config::default_output(&config::load_config_or_default()));
    }

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 if std::env::var_os("DEBUG").is_some() => "debug",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a device connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "acos", &mut std::io::stdout());
            Ok(())
        }

        Command::Servers(args) => with_session(Job::Servers(args.try_into()?), &cli.global).await,
        Command::Groups(args) => with_session(Job::Groups(args.try_into()?), &cli.global).await,
        Command::Vservers(args) => {
            with_session(Job::Vservers(args.try_into()?), &cli.global).await
        }
    }
}

/// Log in, run `job`, and always close the session afterwards.
async fn with_session(job: Job, global: &GlobalOpts) -> Result<(), CliError> {
    let (profile, conn) = config::resolve_connection(global)?;
    let origin = conn.base_url.origin().ascii_serialization();
    let options = ClientOptions {
        dry_run: global.dry_run,
    };
    let client = AcosClient::new(conn.base_url, options, &conn.transport)?;

    client
        .login(&conn.username, &conn.password)
        .await
        .map_err(|e| match e {
            acos_api::Error::Authentication { message } => {
                CliError::AuthFailed { profile, message }
            }
            other => CliError::from(other).at_device(&origin),
        })?;

    debug!(?job, "dispatching command");
    let result = commands::dispatch(job, &client, global)
        .await
        .map_err(|e| e.at_device(&origin));

    if let Err(e) = client.logout().await {
        warn!(error = %e, "failed to close session");
    }
    result
}
