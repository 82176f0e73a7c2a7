//! Direct DNS record queries using hickory-dns.
//!
//! Where `GaiResolver` asks the system's name service switch (hosts file,
//! mDNS, caches, ...), this resolver sends A and AAAA queries straight to
//! the nameservers listed in the system DNS configuration, the way
//! `nslookup` does. The two can disagree.

use super::{Addrs, Name, Resolve, Resolving};
use crate::base::error::ResolveError;
use hickory_resolver::TokioResolver;
use std::{
    fmt, io,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

/// Builds a hickory resolver from the system DNS configuration.
///
/// There is no fallback to public nameservers: if the system config can't
/// be read the record-query capability is simply unavailable.
pub fn system_resolver() -> io::Result<Arc<TokioResolver>> {
    let builder = TokioResolver::builder_tokio().map_err(|e| {
        tracing::warn!(error = %e, "Failed to read system DNS config");
        io::Error::new(io::ErrorKind::NotFound, e.to_string())
    })?;
    tracing::debug!("Using system DNS configuration");
    Ok(Arc::new(builder.build()))
}

/// DNS record type queried by a [`RecordResolver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
}

/// Async A or AAAA record lookup backed by hickory-dns.
///
/// # Example
///
/// ```rust,ignore
/// use hostip::dns::{system_resolver, Name, RecordKind, RecordResolver, Resolve};
///
/// let resolver = RecordResolver::new(system_resolver()?, RecordKind::Aaaa);
/// let addrs = resolver.resolve(Name::new("example.com")).await?;
/// ```
#[derive(Clone)]
pub struct RecordResolver {
    resolver: Arc<TokioResolver>,
    kind: RecordKind,
}

impl RecordResolver {
    /// Creates a resolver querying `kind` records through `resolver`.
    pub fn new(resolver: Arc<TokioResolver>, kind: RecordKind) -> Self {
        Self { resolver, kind }
    }

    /// Returns the record type this resolver queries.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }
}

impl Resolve for RecordResolver {
    fn label(&self) -> &str {
        match self.kind {
            RecordKind::A => "DNS query (A records)",
            RecordKind::Aaaa => "DNS query (AAAA records)",
        }
    }

    fn resolve(&self, name: Name) -> Resolving {
        let resolver = self.resolver.clone();
        let kind = self.kind;
        Box::pin(async move {
            let domain = name.as_str();
            if domain.parse::<IpAddr>().is_ok() {
                return Err(ResolveError::not_found(domain, "Address literal has no DNS records"));
            }
            tracing::debug!(domain = %domain, kind = ?kind, "querying via hickory-dns");

            let ips: Vec<IpAddr> = match kind {
                RecordKind::A => resolver
                    .ipv4_lookup(domain)
                    .await
                    .map(|lookup| lookup.iter().map(|a| IpAddr::V4(a.0)).collect::<Vec<_>>()),
                RecordKind::Aaaa => resolver
                    .ipv6_lookup(domain)
                    .await
                    .map(|lookup| lookup.iter().map(|aaaa| IpAddr::V6(aaaa.0)).collect::<Vec<_>>()),
            }
            .map_err(|e| {
                tracing::debug!(domain = %domain, error = %e, "hickory-dns lookup failed");
                ResolveError::not_found(domain, e.to_string())
            })?;

            if ips.is_empty() {
                return Err(ResolveError::not_found(domain, "No records returned"));
            }

            tracing::debug!(domain = %domain, count = ips.len(), "hickory-dns query complete");
            let addrs: Vec<SocketAddr> = ips.into_iter().map(|ip| SocketAddr::new(ip, 0)).collect();
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}

impl fmt::Debug for RecordResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordResolver")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
