//! bldd - backward ldd
//!
//! A CLI tool that lists, for every shared library, the ELF executables that
//! depend on it.

use anyhow::Result;
use bldd::cli::{Args, CliApp};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();
    init_logging(&args);
    debug!("Arguments: {:?}", args);

    // Create and run the CLI application
    let app = CliApp::new(args);
    let exit_code = app.run().await?;

    // Exit with the appropriate code
    std::process::exit(exit_code);
}

fn init_logging(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    // RUST_LOG takes precedence over the command line
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bldd={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(!args.no_color)
                .with_writer(std::io::stderr),
        )
        .init();
}
