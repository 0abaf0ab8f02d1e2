mod cli;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cvsift=info,cvsift_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = cli::load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Parse {
            file,
            endpoints,
            pretty,
        } => cli::parse::run(&file, &settings, &endpoints, pretty),
        Commands::Segment { file } => cli::segment::run(&file, &settings),
        Commands::Dates { file, segment } => cli::dates::run(&file, &settings, segment),
        Commands::Serve { endpoints, port } => {
            let parser = cli::build_parser(&settings, &endpoints)?;
            cli::serve::run(parser, port.unwrap_or(settings.port))
        }
    }
}
