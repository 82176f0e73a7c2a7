//! Core DNS resolution types and traits.
//!
//! This module defines the `Resolve` and `CanonicalName` traits and the
//! supporting types every lookup strategy shares.

use crate::base::error::ResolveError;
use std::{
    fmt,
    future::Future,
    net::{IpAddr, SocketAddr},
    pin::Pin,
    sync::Arc,
};

/// A domain name to resolve into IP addresses.
///
/// This is a lightweight wrapper around a hostname string. The string is
/// kept exactly as given: no case folding, no trailing-dot handling.
#[derive(Clone, Hash, Eq, PartialEq)]
pub struct Name {
    host: Box<str>,
}

impl Name {
    /// Creates a new [`Name`] from any string-like type.
    #[inline]
    pub fn new(host: impl Into<Box<str>>) -> Self {
        Self { host: host.into() }
    }

    /// View the hostname as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.host
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name::new(value)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.host, f)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.host, f)
    }
}

/// Address family hint passed to the system resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Family {
    /// Both IPv4 and IPv6 candidates.
    Unspecified,
    Ipv4,
    Ipv6,
}

impl Family {
    /// Short label used in logs and inspector output.
    pub fn label(&self) -> &'static str {
        match self {
            Family::Unspecified => "AF_UNSPEC",
            Family::Ipv4 => "AF_INET",
            Family::Ipv6 => "AF_INET6",
        }
    }

    /// Family of a concrete socket address.
    pub fn of(addr: &SocketAddr) -> Self {
        match addr {
            SocketAddr::V4(_) => Family::Ipv4,
            SocketAddr::V6(_) => Family::Ipv6,
        }
    }
}

/// Alias for an `Iterator` trait object over `SocketAddr`.
///
/// IPv6 entries keep their scope id so diagnostic output can show it.
pub type Addrs = Box<dyn Iterator<Item = SocketAddr> + Send>;

/// Alias for the `Future` type returned by a lookup strategy.
pub type Resolving = Pin<Box<dyn Future<Output = Result<Addrs, ResolveError>> + Send>>;

/// Alias for the `Future` type returned by a canonical-name lookup.
pub type Naming = Pin<Box<dyn Future<Output = Result<Option<String>, ResolveError>> + Send>>;

/// Host entry in the shape of the legacy `gethostbyname_ex` answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostEntry {
    /// Canonical name reported by the system, or the queried name.
    pub name: String,
    /// Unique addresses in the order the system returned them.
    pub addresses: Vec<IpAddr>,
}

/// Alias for the `Future` type returned by a host-entry lookup.
pub type Entry = Pin<Box<dyn Future<Output = Result<HostEntry, ResolveError>> + Send>>;

/// A single address lookup strategy.
///
/// Implementations must be thread-safe. A strategy that finds nothing
/// returns `ResolveError::NameNotResolved`; the caller decides whether
/// that is fatal.
pub trait Resolve: Send + Sync {
    /// Human-readable name of the strategy.
    fn label(&self) -> &str;

    /// Resolves a domain name to socket addresses (port 0).
    fn resolve(&self, name: Name) -> Resolving;
}

/// Lookup of the fully-qualified name of a host.
pub trait CanonicalName: Send + Sync {
    /// Returns `Ok(None)` when no name could be determined.
    fn canonical_name(&self, name: Name) -> Naming;
}

/// Legacy-style IPv4 host entry lookup, used for diagnostics only.
pub trait HostEntryLookup: Send + Sync {
    fn host_entry(&self, name: Name) -> Entry;
}

/// Blanket implementation for Arc-wrapped resolvers.
impl<R: Resolve + ?Sized> Resolve for Arc<R> {
    fn label(&self) -> &str {
        (**self).label()
    }

    fn resolve(&self, name: Name) -> Resolving {
        (**self).resolve(name)
    }
}

impl<C: CanonicalName + ?Sized> CanonicalName for Arc<C> {
    fn canonical_name(&self, name: Name) -> Naming {
        (**self).canonical_name(name)
    }
}

/// Raw textual form of an address as the system reports it.
///
/// Link-local IPv6 addresses carry their zone id, e.g. `fe80::1%2`.
pub fn address_text(addr: &SocketAddr) -> String {
    match addr {
        SocketAddr::V4(v4) => v4.ip().to_string(),
        SocketAddr::V6(v6) if v6.scope_id() != 0 => format!("{}%{}", v6.ip(), v6.scope_id()),
        SocketAddr::V6(v6) => v6.ip().to_string(),
    }
}

/// Drops the zone/scope suffix (everything from the first `%`).
pub fn strip_zone_id(addr: &str) -> &str {
    match addr.split_once('%') {
        Some((ip, _zone)) => ip,
        None => addr,
    }
}
