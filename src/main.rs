use clap::Parser;
use tracing_subscriber::EnvFilter;

use hirgc_decompress::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("hirgc_decompress=debug,info")
    } else {
        EnvFilter::new("hirgc_decompress=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    cli::decompress::run(cli.args, cli.format, cli.verbose)?;

    Ok(())
}
