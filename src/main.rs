//! CLI entry point for tile edge motif extraction

use clap::Parser;
use edgemotif::io::cli::Cli;
use env_logger::Env;

fn main() -> edgemotif::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();
    cli.run()
}
