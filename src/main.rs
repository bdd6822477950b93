use calib_solver::cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flags
    let filter = EnvFilter::new(cli::log_filter(cli.verbose, cli.quiet));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match cli.command {
        cli::Commands::Match(args) => {
            cli::match_light::run(args, cli.format)?;
        }
        cli::Commands::Batch(args) => {
            cli::batch::run(args, cli.format)?;
        }
        cli::Commands::Show(args) => {
            cli::show::run(args, cli.format)?;
        }
    }

    Ok(())
}
