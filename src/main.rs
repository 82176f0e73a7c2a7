//! hostip - resolve a file of hostnames to FQDNs and IP addresses

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use hostip::{batch, BatchError, Config, HostResolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File with one hostname (or IP literal) per line
    hostnames_file: Option<PathBuf>,

    /// Ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    rest: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::new("hostip=warn"))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    if !cli.rest.is_empty() {
        tracing::debug!(ignored = ?cli.rest, "extra arguments ignored");
    }
    let Some(input) = cli.hostnames_file else {
        println!("Usage: hostip <hostnames_file>");
        return ExitCode::FAILURE;
    };

    match run(input).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<BatchError>() {
                Some(BatchError::InputNotFound(_)) => println!("Error: {e}"),
                _ => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(input: PathBuf) -> Result<()> {
    // Fail before building the resolver
    if !input.exists() {
        return Err(BatchError::InputNotFound(input).into());
    }

    let config = Config::default();
    let resolver = HostResolver::system(config.dns_records);
    tracing::debug!(?resolver, ?config, "starting batch");

    let output = batch::run(&config, &resolver, &input).await?;
    println!("\nResults saved to: {}", output.display());
    Ok(())
}
