//! DNS Resolution Module
//!
//! Provides the lookup strategies the host resolver folds together:
//! - System resolver (getaddrinfo with a family hint, via thread pool)
//! - Canonical-name lookup (getaddrinfo + getnameinfo)
//! - Legacy-style IPv4 host entry (diagnostics only)
//! - Direct A/AAAA record queries through hickory-dns
//!
//! # Architecture
//!
//! The `Resolve` trait is the core abstraction: every strategy turns a
//! [`Name`] into socket addresses or an error, and strategies are
//! interchangeable behind `Arc<dyn Resolve>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostip::dns::{Family, GaiResolver, Name, Resolve};
//!
//! let resolver = GaiResolver::new(Family::Ipv6);
//! let addrs = resolver.resolve(Name::new("example.com")).await?;
//! for addr in addrs {
//!     println!("Resolved: {}", addr.ip());
//! }
//! ```

mod gai;
mod hickory;
mod resolve;

pub use gai::{GaiCanonicalName, GaiHostEntry, GaiResolver};
pub use hickory::{system_resolver, RecordKind, RecordResolver};
pub use resolve::{
    address_text, strip_zone_id, Addrs, CanonicalName, Entry, Family, HostEntry, HostEntryLookup,
    Name, Naming, Resolve, Resolving,
};
