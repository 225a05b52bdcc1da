// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build a client from the parsed
//   flags and hand one command to the UI layer.
// - Returns `anyhow::Result` so failures print and exit non-zero.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tw5_cli::ui::{self, Cli};
use tw5_cli::{Config, WikiClient};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::new(cli.host()?)
        .context("Couldn't set configuration")?
        .strict_status(cli.strict);
    let client = WikiClient::new(&config)?;
    tracing::debug!(base_url = %client.base_url(), strict = cli.strict, "client ready");

    let stdout = std::io::stdout();
    ui::run(&client, cli.command, &mut stdout.lock())
}

// RUST_LOG wins over -v; logs go to stderr so stdout stays parseable.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
