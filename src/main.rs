use clap::Parser;
use naba::cli::{self, Cli};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_filter = if args.verbose { "naba=debug" } else { "naba=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("Starting naba {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = cli::run(args).await {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }

    Ok(())
}
