//! hostip-debug - print the raw answer of every lookup strategy

use clap::Parser;
use hostip::{dns::GaiHostEntry, inspect, HostResolver};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_HOSTNAMES: [&str; 2] = ["localhost", "google.com"];

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Hostnames to inspect
    #[arg(allow_hyphen_values = true)]
    hostnames: Vec<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::new("hostip=warn"))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let hostnames = if cli.hostnames.is_empty() {
        println!("Usage: hostip-debug <hostname> [hostname ...]");
        println!("\nTrying with some examples...");
        DEFAULT_HOSTNAMES.iter().map(|h| h.to_string()).collect()
    } else {
        cli.hostnames
    };

    let resolver = HostResolver::system(true);
    let host_entries = GaiHostEntry::new();
    for hostname in &hostnames {
        let report = inspect::inspect(&resolver, &host_entries, hostname).await;
        print!("{report}");
    }

    println!("\n{}", "=".repeat(60));
}
