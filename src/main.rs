use clap::Parser;
use prot_match::cli;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("prot_match=debug,info")
    } else {
        EnvFilter::new("prot_match=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Search(args) => {
            cli::search::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Align(args) => {
            cli::align::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Matrix(args) => {
            cli::matrix::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Export(args) => {
            cli::export::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
