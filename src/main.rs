use clap::Parser;
use tracing_subscriber::EnvFilter;

use padel_club_client::cli::{self, Cli};

fn main() {
    // Quiet by default; RUST_LOG opts into request-level tracing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .try_init();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("erro: {e}");
        std::process::exit(1);
    }
}
