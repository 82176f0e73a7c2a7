//! Host resolver: an ordered list of lookup strategies folded into one record.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostip::HostResolver;
//!
//! let resolver = HostResolver::builder()
//!     .system_strategies()
//!     .dns_records(true)
//!     .build();
//!
//! let record = resolver.resolve("example.com").await;
//! println!("{:?}", record.ipv4());
//! ```

use crate::dns::{
    system_resolver, CanonicalName, Family, GaiCanonicalName, GaiResolver, Name, RecordKind,
    RecordResolver, Resolve,
};
use crate::record::{HostResolutionRecord, RecordBuilder};
use std::{fmt, sync::Arc};

/// Resolves hostnames into [`HostResolutionRecord`]s.
///
/// Strategies run in order for every hostname. A strategy that finds
/// nothing is skipped; whatever the others find is merged in first-seen
/// order. Only an unexpected failure (a lookup task dying) ends the
/// resolution early.
#[derive(Clone)]
pub struct HostResolver {
    canonical: Arc<dyn CanonicalName>,
    strategies: Vec<Arc<dyn Resolve>>,
}

impl HostResolver {
    /// Create a new resolver builder.
    pub fn builder() -> HostResolverBuilder {
        HostResolverBuilder::default()
    }

    /// The standard setup: the three getaddrinfo strategies, plus A/AAAA
    /// record queries when `dns_records` is set and available.
    pub fn system(dns_records: bool) -> Self {
        Self::builder()
            .system_strategies()
            .dns_records(dns_records)
            .build()
    }

    /// Strategies in the order they run.
    pub fn strategies(&self) -> &[Arc<dyn Resolve>] {
        &self.strategies
    }

    /// The canonical-name lookup used for the `fqdn` field.
    pub fn canonical(&self) -> &Arc<dyn CanonicalName> {
        &self.canonical
    }

    /// Resolve one hostname. Never fails: failures land in `error`.
    pub async fn resolve(&self, hostname: &str) -> HostResolutionRecord {
        let name = Name::new(hostname);
        let mut record = RecordBuilder::new(hostname);

        match self.canonical.canonical_name(name.clone()).await {
            Ok(fqdn) => {
                record.fqdn(fqdn);
            }
            Err(e) if e.is_unexpected() => {
                tracing::warn!(host = %name, error = %e, "canonical name lookup aborted");
                return record.fail(&e);
            }
            Err(e) => {
                tracing::debug!(host = %name, error = %e, "no canonical name");
            }
        }

        for strategy in &self.strategies {
            match strategy.resolve(name.clone()).await {
                Ok(addrs) => {
                    let mut added = 0usize;
                    for addr in addrs {
                        if record.add(&addr) {
                            added += 1;
                        }
                    }
                    tracing::debug!(host = %name, strategy = strategy.label(), added, "strategy merged");
                }
                Err(e) if e.is_unexpected() => {
                    tracing::warn!(host = %name, strategy = strategy.label(), error = %e, "resolution aborted");
                    return record.fail(&e);
                }
                Err(e) => {
                    tracing::debug!(host = %name, strategy = strategy.label(), error = %e, "strategy found nothing");
                }
            }
        }

        let record = record.finish();
        if let Some(error) = record.error() {
            tracing::info!(host = %name, error, "hostname not resolved");
        }
        record
    }
}

impl fmt::Debug for HostResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.strategies.iter().map(|s| s.label()).collect();
        f.debug_struct("HostResolver")
            .field("strategies", &labels)
            .finish_non_exhaustive()
    }
}

/// Builder for [`HostResolver`].
#[derive(Default)]
pub struct HostResolverBuilder {
    canonical: Option<Arc<dyn CanonicalName>>,
    strategies: Vec<Arc<dyn Resolve>>,
    dns_records: bool,
}

impl HostResolverBuilder {
    /// Use `canonical` for the `fqdn` field instead of the system lookup.
    pub fn canonical_name(mut self, canonical: impl CanonicalName + 'static) -> Self {
        self.canonical = Some(Arc::new(canonical));
        self
    }

    /// Append a strategy.
    pub fn strategy(mut self, strategy: impl Resolve + 'static) -> Self {
        self.strategies.push(Arc::new(strategy));
        self
    }

    /// Append getaddrinfo with unspecified, IPv4 and IPv6 hints, in that order.
    pub fn system_strategies(self) -> Self {
        self.strategy(GaiResolver::new(Family::Unspecified))
            .strategy(GaiResolver::new(Family::Ipv4))
            .strategy(GaiResolver::new(Family::Ipv6))
    }

    /// Append direct A and AAAA queries at build time.
    ///
    /// If the system DNS configuration can't be read the queries are left
    /// out and the resolver runs without them.
    pub fn dns_records(mut self, enabled: bool) -> Self {
        self.dns_records = enabled;
        self
    }

    /// Build the resolver.
    pub fn build(mut self) -> HostResolver {
        if self.dns_records {
            match system_resolver() {
                Ok(resolver) => {
                    self.strategies
                        .push(Arc::new(RecordResolver::new(resolver.clone(), RecordKind::A)));
                    self.strategies
                        .push(Arc::new(RecordResolver::new(resolver, RecordKind::Aaaa)));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "DNS record queries unavailable, continuing without them");
                }
            }
        }

        HostResolver {
            canonical: self
                .canonical
                .unwrap_or_else(|| Arc::new(GaiCanonicalName::new())),
            strategies: self.strategies,
        }
    }
}
