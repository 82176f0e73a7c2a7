//! Debug inspector: raw per-strategy output for a hostname.
//!
//! Nothing is merged or deduplicated here. Each strategy's answer is shown
//! as the system returned it, zone ids included, so disagreements between
//! strategies are visible.

use crate::dns::{address_text, Family, HostEntry, HostEntryLookup, Name};
use crate::resolver::HostResolver;
use std::{fmt, net::SocketAddr};

const RULE_WIDTH: usize = 60;
const HOST_ENTRY_TITLE: &str = "gethostbyname_ex-style lookup (IPv4, canonical name)";

/// Output of one strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub outcome: Result<Vec<SocketAddr>, String>,
}

/// Everything the inspector found for one hostname.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub hostname: String,
    pub fqdn: Result<Option<String>, String>,
    pub sections: Vec<Section>,
    /// Answer of the legacy-style host entry lookup, run on its own.
    pub host_entry: Result<HostEntry, String>,
}

/// Runs every strategy of `resolver` separately against `hostname`, then
/// the legacy-style host entry lookup.
pub async fn inspect(
    resolver: &HostResolver,
    host_entries: &dyn HostEntryLookup,
    hostname: &str,
) -> Report {
    let name = Name::new(hostname);

    let fqdn = resolver
        .canonical()
        .canonical_name(name.clone())
        .await
        .map_err(|e| e.to_string());

    let mut sections = Vec::with_capacity(resolver.strategies().len());
    for strategy in resolver.strategies() {
        let outcome = match strategy.resolve(name.clone()).await {
            Ok(addrs) => Ok(addrs.collect()),
            Err(e) => Err(e.to_string()),
        };
        sections.push(Section {
            title: strategy.label().to_string(),
            outcome,
        });
    }

    let host_entry = host_entries
        .host_entry(name)
        .await
        .map_err(|e| e.to_string());

    Report {
        hostname: hostname.to_string(),
        fqdn,
        sections,
        host_entry,
    }
}

fn family_name(addr: &SocketAddr) -> &'static str {
    match Family::of(addr) {
        Family::Ipv6 => "IPv6",
        _ => "IPv4",
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(f, "\n{rule}")?;
        writeln!(f, "Hostname: {}", self.hostname)?;
        writeln!(f, "{rule}")?;

        match &self.fqdn {
            Ok(Some(fqdn)) => writeln!(f, "FQDN: {fqdn}")?,
            Ok(None) => writeln!(f, "FQDN: (none)")?,
            Err(e) => writeln!(f, "FQDN: {e}")?,
        }

        for section in &self.sections {
            writeln!(f, "\n--- {} ---", section.title)?;
            match &section.outcome {
                Ok(addrs) if addrs.is_empty() => writeln!(f, "(no addresses)")?,
                Ok(addrs) => {
                    for (i, addr) in addrs.iter().enumerate() {
                        writeln!(
                            f,
                            "{}. Family: {}, Address: {}",
                            i + 1,
                            family_name(addr),
                            address_text(addr)
                        )?;
                    }
                }
                Err(e) => writeln!(f, "Error: {e}")?,
            }
        }

        writeln!(f, "\n--- {HOST_ENTRY_TITLE} ---")?;
        match &self.host_entry {
            Ok(entry) => {
                writeln!(f, "Name: {}", entry.name)?;
                if let Some(first) = entry.addresses.first() {
                    writeln!(f, "Address: {first}")?;
                }
                let all: Vec<String> = entry.addresses.iter().map(ToString::to_string).collect();
                writeln!(f, "Addresses: {}", all.join(", "))
            }
            Err(e) => writeln!(f, "Error: {e}"),
        }
    }
}
