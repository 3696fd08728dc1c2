mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nso_api::RestconfClient;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
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

async fn run(mut cli: Cli) -> Result<(), CliError> {
    if let Command::Completions(ref args) = cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "nso", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config_or_default();
    cli.global.output = Some(config::resolve_output(&cli.global, &cfg)?);

    let conn = config::resolve_connection(&cli.global, &cfg)?;
    let client = RestconfClient::new(conn.params, &conn.transport)?;
    tracing::debug!(base_url = client.base_url(), user = client.username(), "client ready");

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &client, &cli.global).await
}
