//! fadup - Find All Domain User Projects

use clap::Parser;

mod cli;
mod client;
mod config;
mod enumerate;
mod error;
mod models;
mod output;

use cli::{Cli, Commands, GlobalOptions};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Projects) {
        Commands::Projects => cli::projects::run(&opts).await,
        Commands::Users => cli::users::run(&opts).await,
        Commands::Status { verify } => cli::status::run(&opts, verify).await,
        Commands::Init => cli::init::run(&opts),
        Commands::Completion { shell } => {
            cli::completion::run(shell);
            Ok(())
        }
    }
}

/// Log to stderr at `warn`, or `debug` for fadup with `--debug`.
/// `RUST_LOG` takes precedence over both.
fn init_logging(debug: bool) {
    let default = if debug { "warn,fadup=debug" } else { "warn" };
    let env = env_logger::Env::default().filter_or("RUST_LOG", default);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}
