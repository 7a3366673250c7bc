use anyhow::Result;

mod cli;
mod platform;
mod report;

use cli::Args;
use report::PlatformReport;

fn main() {
    let args = Args::parse_or_exit();

    if let Err(e) = run(args) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    init_logging(args.verbose);

    tracing::debug!(
        "Probing {} ({})",
        std::env::consts::OS,
        std::env::consts::ARCH
    );

    let probe = platform::native();
    let report = PlatformReport::collect(&probe);

    report.write_to(&args.output)?;

    println!("Successfully wrote to {}", args.output.display());

    Ok(())
}

/// Initialize logging
///
/// Diagnostics go to stderr; stdout only carries the success message.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level)))
        .init();
}
