//! Deterministic stand-ins for the system lookups.

#![allow(dead_code)]

use hostip::dns::{Addrs, CanonicalName, Name, Naming, Resolve, Resolving};
use hostip::{HostResolver, ResolveError};
use std::collections::HashMap;
use std::net::SocketAddr;

/// Answers from a fixed table; unknown names fail like NXDOMAIN.
pub struct TableResolver {
    pub label: &'static str,
    pub table: HashMap<&'static str, Vec<SocketAddr>>,
}

impl TableResolver {
    /// `entries` maps a host to space-separated socket addresses.
    pub fn new(label: &'static str, entries: &[(&'static str, &str)]) -> Self {
        let table = entries
            .iter()
            .map(|(host, addrs)| {
                let addrs = addrs
                    .split_whitespace()
                    .map(|a| a.parse().unwrap())
                    .collect();
                (*host, addrs)
            })
            .collect();
        Self { label, table }
    }
}

impl Resolve for TableResolver {
    fn label(&self) -> &str {
        self.label
    }

    fn resolve(&self, name: Name) -> Resolving {
        let found = self.table.get(name.as_str()).cloned();
        Box::pin(async move {
            match found {
                Some(addrs) => Ok(Box::new(addrs.into_iter()) as Addrs),
                None => Err(ResolveError::not_found(name.as_str(), "NXDOMAIN")),
            }
        })
    }
}

/// Canonical name is the input itself for known names, else none.
pub struct EchoName(pub &'static [&'static str]);

impl CanonicalName for EchoName {
    fn canonical_name(&self, name: Name) -> Naming {
        let known = self.0.contains(&name.as_str());
        Box::pin(async move { Ok(known.then(|| name.as_str().to_string())) })
    }
}

/// A resolver with an unspecified, an IPv4 and an IPv6 table.
pub fn mock_resolver() -> HostResolver {
    HostResolver::builder()
        .canonical_name(EchoName(&["alpha.example", "beta.example"]))
        .strategy(TableResolver::new(
            "unspec",
            &[
                ("alpha.example", "192.0.2.10:0 [2001:db8::10]:0"),
                ("beta.example", "[2001:db8::20]:0"),
            ],
        ))
        .strategy(TableResolver::new(
            "v4",
            &[("alpha.example", "192.0.2.11:0 192.0.2.10:0")],
        ))
        .strategy(TableResolver::new(
            "v6",
            &[
                ("alpha.example", "[2001:db8::10]:0"),
                ("beta.example", "[fe80::20%7]:0 [2001:db8::20]:0"),
            ],
        ))
        .build()
}
