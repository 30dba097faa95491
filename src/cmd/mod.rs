//! Subcommand dispatch and execution.
//!
//! The [`dispatch`] function routes the parsed CLI to the appropriate
//! subcommand handler: [`run`] or [`health`]. Each handler lives in its
//! own submodule.

pub mod health;
pub mod run;

use crate::cli::{Cli, Commands};
use crate::error::GatewayError;

pub async fn dispatch(cli: Cli) -> Result<(), GatewayError> {
    match cli.command {
        Some(Commands::Run(args)) => run::execute(*args).await,
        Some(Commands::Health(args)) => health::execute(args).await,
        None => {
            print_welcome();
            Ok(())
        }
    }
}

fn print_welcome() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "\n  portico v{version} \u{2014} API gateway for internal HTTP microservices\n\n  \
         No command provided. To get started:\n\n    \
         portico run                       Start the gateway with default service URLs\n    \
         portico run --pretty --debug      Start in local dev mode\n    \
         portico health                    Probe a running instance\n    \
         portico --help                    See all commands and options\n"
    );
}
