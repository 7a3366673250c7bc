use clap::Parser;
use std::path::PathBuf;

/// Platform Info Probe
///
/// Writes the operating system identity and the primary display
/// resolution to a text file, one per line.
#[derive(Parser, Debug)]
#[command(name = "os-probe")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File to write the report to (created or overwritten)
    pub output: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse the process arguments
    ///
    /// Usage errors are printed and exit with status 1 rather than clap's
    /// default of 2; `--help` and `--version` still exit with 0.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse() {
            Ok(args) => args,
            Err(e) => {
                let code = if e.use_stderr() { 1 } else { 0 };
                let _ = e.print();
                std::process::exit(code);
            }
        }
    }
}
