//! System DNS resolver using getaddrinfo.
//!
//! These lookups use the operating system's native resolution via
//! `getaddrinfo`/`getnameinfo`, executed in tokio's blocking pool so the
//! async driver is never blocked.
//!
//! Unlike `std::net::ToSocketAddrs`, the calls here accept an address
//! family hint, which is what lets the resolver ask for IPv4-only and
//! IPv6-only answers separately.

use super::{
    Addrs, CanonicalName, Entry, Family, HostEntry, HostEntryLookup, Name, Naming, Resolve,
    Resolving,
};
use crate::base::{context::IoResultExt, error::ResolveError};
use dns_lookup::{AddrFamily, AddrInfo, AddrInfoHints};
use std::{io, net::IpAddr};

/// `AF_UNSPEC` is zero on every platform getaddrinfo exists on.
const AF_UNSPEC: i32 = 0;

/// `AI_CANONNAME` (0x0002 on Linux, the BSDs, macOS and Windows).
const AI_CANONNAME: i32 = 0x0002;

impl Family {
    fn as_raw(self) -> i32 {
        match self {
            Family::Unspecified => AF_UNSPEC,
            Family::Ipv4 => AddrFamily::Inet.into(),
            Family::Ipv6 => AddrFamily::Inet6.into(),
        }
    }
}

/// Runs one `getaddrinfo` call and collects every entry it returns.
///
/// No socket type is set in the hints, so the system reports each address
/// once per socket type. Callers that need unique addresses dedupe.
fn getaddrinfo(host: &str, family: Family, flags: i32) -> io::Result<Vec<AddrInfo>> {
    let hints = AddrInfoHints {
        address: family.as_raw(),
        flags,
        ..AddrInfoHints::default()
    };
    dns_lookup::getaddrinfo(Some(host), None, Some(hints))
        .map_err(io::Error::from)?
        .collect()
}

/// System DNS resolver using `getaddrinfo` with a fixed family hint.
///
/// Each resolution spawns a blocking task.
#[derive(Clone, Copy, Debug)]
pub struct GaiResolver {
    family: Family,
    label: &'static str,
}

impl GaiResolver {
    /// Creates a `GaiResolver` that passes `family` as the hint.
    pub fn new(family: Family) -> Self {
        let label = match family {
            Family::Unspecified => "getaddrinfo AF_UNSPEC (all families)",
            Family::Ipv4 => "getaddrinfo AF_INET (IPv4 only)",
            Family::Ipv6 => "getaddrinfo AF_INET6 (IPv6 only)",
        };
        Self { family, label }
    }

    /// Returns the family hint this resolver uses.
    pub fn family(&self) -> Family {
        self.family
    }
}

impl Resolve for GaiResolver {
    fn label(&self) -> &str {
        self.label
    }

    fn resolve(&self, name: Name) -> Resolving {
        let family = self.family;
        Box::pin(async move {
            let host = name.as_str().to_string();
            let domain = host.clone();

            let result = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, family = family.label(), "resolving via getaddrinfo");
                getaddrinfo(&host, family, 0)
            })
            .await;

            // Handle task join error (cancellation, panic)
            let infos = result
                .map_err(|e| {
                    tracing::error!(error = %e, "DNS resolution task failed");
                    ResolveError::from(e)
                })?
                .map_err(|e| {
                    tracing::debug!(domain = %domain, error = %e, "DNS resolution failed");
                    e
                })
                .dns_context(&domain)?;

            if infos.is_empty() {
                return Err(ResolveError::not_found(
                    domain,
                    "No addresses returned by getaddrinfo",
                ));
            }

            tracing::debug!(domain = %domain, count = infos.len(), "DNS resolution complete");
            let addrs: Vec<_> = infos.into_iter().map(|info| info.sockaddr).collect();
            Ok(Box::new(addrs.into_iter()) as Addrs)
        })
    }
}

/// Fully-qualified name lookup through the system resolver.
///
/// Follows the classic `getfqdn` recipe: forward-resolve the name asking
/// for the canonical name, reverse-resolve the first address, then prefer
/// the first candidate that contains a dot. An empty name or `0.0.0.0`
/// stands for the local machine.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaiCanonicalName;

impl GaiCanonicalName {
    /// Creates a new `GaiCanonicalName`.
    pub fn new() -> Self {
        Self
    }
}

impl CanonicalName for GaiCanonicalName {
    fn canonical_name(&self, name: Name) -> Naming {
        Box::pin(async move {
            let host = name.as_str().to_string();
            let fqdn = tokio::task::spawn_blocking(move || fqdn_blocking(&host)).await?;
            Ok(fqdn)
        })
    }
}

fn fqdn_blocking(name: &str) -> Option<String> {
    let mut host = name.trim().to_string();
    let mut local = None;
    if host.is_empty() || host == "0.0.0.0" {
        match dns_lookup::get_hostname() {
            Ok(hostname) => {
                host = hostname.clone();
                local = Some(hostname);
            }
            Err(e) => {
                tracing::debug!(error = %e, "gethostname failed");
                return None;
            }
        }
    }

    let infos = match getaddrinfo(&host, Family::Unspecified, AI_CANONNAME) {
        Ok(infos) => infos,
        Err(e) => {
            tracing::debug!(host = %host, error = %e, "canonical name lookup failed");
            return local;
        }
    };

    let canonical = infos
        .iter()
        .find_map(|info| info.canonname.clone())
        .and_then(name_only);
    let reverse = infos
        .first()
        .and_then(|info| reverse_name(info.sockaddr.ip()));

    pick_fqdn([reverse, canonical, local])
}

/// A numeric address is not a name.
fn name_only(candidate: String) -> Option<String> {
    match candidate.parse::<IpAddr>() {
        Ok(_) => None,
        Err(_) => Some(candidate),
    }
}

fn reverse_name(ip: IpAddr) -> Option<String> {
    match dns_lookup::lookup_addr(&ip) {
        Ok(name) => name_only(name),
        Err(e) => {
            tracing::debug!(ip = %ip, error = %e, "reverse lookup failed");
            None
        }
    }
}

/// `gethostbyname_ex`-style lookup: IPv4 only, with the canonical name.
///
/// `getaddrinfo` does not report aliases, so the entry carries none.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaiHostEntry;

impl GaiHostEntry {
    /// Creates a new `GaiHostEntry`.
    pub fn new() -> Self {
        Self
    }
}

impl HostEntryLookup for GaiHostEntry {
    fn host_entry(&self, name: Name) -> Entry {
        Box::pin(async move {
            let host = name.as_str().to_string();
            let domain = host.clone();

            let infos = tokio::task::spawn_blocking(move || {
                tracing::debug!(host = %host, "host entry lookup");
                getaddrinfo(&host, Family::Ipv4, AI_CANONNAME)
            })
            .await?
            .dns_context(&domain)?;

            let canonical = infos.iter().find_map(|info| info.canonname.clone());
            host_entry(&domain, canonical, infos.iter().map(|info| info.sockaddr.ip()))
        })
    }
}

fn host_entry<I>(
    domain: &str,
    canonical: Option<String>,
    ips: I,
) -> Result<HostEntry, ResolveError>
where
    I: IntoIterator<Item = IpAddr>,
{
    let mut addresses = Vec::new();
    for ip in ips {
        if !addresses.contains(&ip) {
            addresses.push(ip);
        }
    }
    if addresses.is_empty() {
        return Err(ResolveError::not_found(domain, "No addresses returned by getaddrinfo"));
    }
    let name = canonical
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| domain.to_string());
    Ok(HostEntry { name, addresses })
}

/// First dotted candidate, else the first candidate at all.
fn pick_fqdn<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let names: Vec<String> = candidates
        .into_iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .collect();
    names
        .iter()
        .find(|name| name.contains('.'))
        .or_else(|| names.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_fqdn_prefers_dotted_name() {
        let picked = pick_fqdn([
            Some("localhost".to_string()),
            Some("host.example.com".to_string()),
        ]);
        assert_eq!(picked.as_deref(), Some("host.example.com"));
    }

    #[test]
    fn test_pick_fqdn_falls_back_to_first() {
        let picked = pick_fqdn([None, Some("localhost".to_string()), Some("box".to_string())]);
        assert_eq!(picked.as_deref(), Some("localhost"));
    }

    #[test]
    fn test_pick_fqdn_none() {
        assert_eq!(pick_fqdn([None, Some(String::new()), None]), None);
    }

    #[test]
    fn test_numeric_canonical_name_is_not_a_name() {
        assert_eq!(name_only("192.0.2.1".to_string()), None);
        assert_eq!(name_only("::1".to_string()), None);
        assert_eq!(name_only("host.example.com".to_string()).as_deref(), Some("host.example.com"));

        let canonical = name_only("127.0.0.1".to_string());
        assert_eq!(pick_fqdn([None, canonical, None]), None);
    }

    #[test]
    fn test_host_entry_dedupes_in_order() {
        let ips = [[192, 0, 2, 2], [192, 0, 2, 1], [192, 0, 2, 2]].map(IpAddr::from);
        let entry = host_entry("www.example.com", Some("example.com".into()), ips).unwrap();

        assert_eq!(entry.name, "example.com");
        assert_eq!(
            entry.addresses,
            [IpAddr::from([192, 0, 2, 2]), IpAddr::from([192, 0, 2, 1])]
        );
    }

    #[test]
    fn test_host_entry_falls_back_to_queried_name() {
        let entry = host_entry("box", None, [IpAddr::from([10, 0, 0, 1])]).unwrap();
        assert_eq!(entry.name, "box");

        let err = host_entry("box", None, Vec::new()).unwrap_err();
        assert!(matches!(err, ResolveError::NameNotResolved { .. }));
    }

    #[tokio::test]
    async fn test_host_entry_localhost() {
        let entry = GaiHostEntry::new()
            .host_entry(Name::new("localhost"))
            .await
            .unwrap();
        assert!(entry.addresses.iter().all(IpAddr::is_ipv4));
        assert!(entry.addresses.contains(&IpAddr::from([127, 0, 0, 1])));
    }

    #[test]
    fn test_family_hints() {
        assert_eq!(Family::Unspecified.as_raw(), AF_UNSPEC);
        assert_ne!(Family::Ipv4.as_raw(), Family::Ipv6.as_raw());
    }

    #[tokio::test]
    async fn test_gai_resolver_localhost() {
        let resolver = GaiResolver::new(Family::Ipv4);
        let result = resolver.resolve(Name::new("localhost")).await;

        // localhost should always resolve
        assert!(result.is_ok());
        let addrs: Vec<_> = result.unwrap().collect();
        assert!(addrs.iter().any(|a| a.ip() == IpAddr::from([127, 0, 0, 1])));
    }

    #[tokio::test]
    async fn test_gai_resolver_ip_literal() {
        let resolver = GaiResolver::new(Family::Unspecified);
        let addrs: Vec<_> = resolver
            .resolve(Name::new("8.8.8.8"))
            .await
            .unwrap()
            .collect();

        assert!(addrs.iter().all(|a| a.ip() == IpAddr::from([8, 8, 8, 8])));
    }

    #[tokio::test]
    async fn test_gai_resolver_invalid_domain() {
        let resolver = GaiResolver::new(Family::Unspecified);
        let result = resolver
            .resolve(Name::new("this-hostname-does-not-exist-12345.invalid"))
            .await;

        match result.err().expect("Should have error") {
            ResolveError::NameNotResolved { domain, .. } => {
                assert_eq!(domain, "this-hostname-does-not-exist-12345.invalid");
            }
            other => panic!("Unexpected error type: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_canonical_name_localhost() {
        let fqdn = GaiCanonicalName::new()
            .canonical_name(Name::new("localhost"))
            .await
            .unwrap();
        assert!(fqdn.is_some());
    }
}
