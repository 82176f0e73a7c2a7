//! Per-hostname result records.
//!
//! A [`HostResolutionRecord`] is produced once per input line by a
//! [`RecordBuilder`] and never changes afterwards. It serializes with the
//! field order `hostname, fqdn, ipv4, ipv6, error`; `error` is omitted
//! when absent.

use crate::base::error::ResolveError;
use crate::dns::{address_text, strip_zone_id, Family};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Insertion-ordered, duplicate-free list of address strings.
///
/// Zone ids are stripped before comparison, so `fe80::1%eth0` and
/// `fe80::1%2` collapse into a single `fe80::1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct AddressSet {
    addrs: Vec<String>,
}

impl AddressSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `addr` unless it is already present. Returns true if added.
    pub fn insert(&mut self, addr: &str) -> bool {
        let addr = strip_zone_id(addr);
        if self.contains(addr) {
            return false;
        }
        self.addrs.push(addr.to_string());
        true
    }

    /// Whether `addr`, zone id ignored, is already present.
    pub fn contains(&self, addr: &str) -> bool {
        let addr = strip_zone_id(addr);
        self.addrs.iter().any(|a| a == addr)
    }

    /// Number of addresses.
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    /// True if no address was added.
    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    /// Addresses in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addrs.iter().map(String::as_str)
    }

    /// Addresses in insertion order, as stored.
    pub fn as_slice(&self) -> &[String] {
        &self.addrs
    }

    fn clear(&mut self) {
        self.addrs.clear();
    }
}

impl From<Vec<String>> for AddressSet {
    fn from(addrs: Vec<String>) -> Self {
        let mut set = AddressSet::new();
        for addr in &addrs {
            set.insert(addr);
        }
        set
    }
}

impl From<AddressSet> for Vec<String> {
    fn from(set: AddressSet) -> Self {
        set.addrs
    }
}

impl<'a> FromIterator<&'a str> for AddressSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = AddressSet::new();
        for addr in iter {
            set.insert(addr);
        }
        set
    }
}

/// Resolution result for one input hostname.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostResolutionRecord {
    hostname: String,
    fqdn: Option<String>,
    ipv4: AddressSet,
    ipv6: AddressSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl HostResolutionRecord {
    /// The hostname exactly as it appeared in the input.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Fully-qualified name, if the host was resolvable.
    pub fn fqdn(&self) -> Option<&str> {
        self.fqdn.as_deref()
    }

    /// Unique IPv4 addresses in discovery order.
    pub fn ipv4(&self) -> &AddressSet {
        &self.ipv4
    }

    /// Unique IPv6 addresses in discovery order, zone ids stripped.
    pub fn ipv6(&self) -> &AddressSet {
        &self.ipv6
    }

    /// Failure message; present exactly when both address lists are empty.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when no error was recorded.
    pub fn is_resolved(&self) -> bool {
        self.error.is_none()
    }
}

/// Accumulates strategy results for one hostname.
#[derive(Debug)]
pub struct RecordBuilder {
    hostname: String,
    fqdn: Option<String>,
    ipv4: AddressSet,
    ipv6: AddressSet,
}

impl RecordBuilder {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            fqdn: None,
            ipv4: AddressSet::new(),
            ipv6: AddressSet::new(),
        }
    }

    pub fn fqdn(&mut self, fqdn: Option<String>) -> &mut Self {
        self.fqdn = fqdn;
        self
    }

    /// Files `addr` under its own family. Returns true if it was new.
    pub fn add(&mut self, addr: &SocketAddr) -> bool {
        let text = address_text(addr);
        match Family::of(addr) {
            Family::Ipv6 => self.ipv6.insert(&text),
            _ => self.ipv4.insert(&text),
        }
    }

    /// Completes the record; no addresses at all becomes an error.
    pub fn finish(self) -> HostResolutionRecord {
        let error = if self.ipv4.is_empty() && self.ipv6.is_empty() {
            Some(ResolveError::NoAddresses.to_string())
        } else {
            None
        };
        HostResolutionRecord {
            hostname: self.hostname,
            fqdn: self.fqdn,
            ipv4: self.ipv4,
            ipv6: self.ipv6,
            error,
        }
    }

    /// Completes the record as failed, discarding partial addresses.
    pub fn fail(mut self, err: &ResolveError) -> HostResolutionRecord {
        self.ipv4.clear();
        self.ipv6.clear();
        HostResolutionRecord {
            hostname: self.hostname,
            fqdn: self.fqdn,
            ipv4: self.ipv4,
            ipv6: self.ipv6,
            error: Some(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv6Addr, SocketAddrV6};

    #[test]
    fn test_address_set_keeps_first_seen_order() {
        let set: AddressSet = ["10.0.0.2", "10.0.0.1", "10.0.0.2", "10.0.0.3"]
            .into_iter()
            .collect();
        assert_eq!(set.as_slice(), ["10.0.0.2", "10.0.0.1", "10.0.0.3"]);
    }

    #[test]
    fn test_address_set_strips_zone_before_dedup() {
        let mut set = AddressSet::new();
        assert!(set.insert("fe80::1%eth0"));
        assert!(!set.insert("fe80::1%2"));
        assert!(!set.insert("fe80::1"));
        assert_eq!(set.as_slice(), ["fe80::1"]);
        assert!(set.contains("fe80::1%eth1"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_address_set_deserialize_dedupes() {
        let set: AddressSet = serde_json::from_str(r#"["::1", "::1%lo", "::2"]"#).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_builder_classifies_by_family() {
        let mut builder = RecordBuilder::new("dual.example");
        builder.add(&"192.0.2.1:0".parse().unwrap());
        builder.add(&"[2001:db8::1]:0".parse().unwrap());
        builder.add(&"192.0.2.1:443".parse().unwrap());

        let record = builder.finish();
        assert_eq!(record.ipv4().as_slice(), ["192.0.2.1"]);
        assert_eq!(record.ipv6().as_slice(), ["2001:db8::1"]);
        assert!(record.is_resolved());
    }

    #[test]
    fn test_builder_strips_scope_id() {
        let link_local: Ipv6Addr = "fe80::1".parse().unwrap();
        let mut builder = RecordBuilder::new("router.local");
        builder.add(&SocketAddr::V6(SocketAddrV6::new(link_local, 0, 0, 4)));

        let record = builder.finish();
        assert_eq!(record.ipv6().as_slice(), ["fe80::1"]);
    }

    #[test]
    fn test_builder_empty_is_error() {
        let record = RecordBuilder::new("nothing.invalid").finish();
        assert_eq!(record.error(), Some("DNS lookup failed: No addresses found"));
        assert!(record.ipv4().is_empty() && record.ipv6().is_empty());
    }

    #[test]
    fn test_builder_fail_discards_partial_results() {
        let mut builder = RecordBuilder::new("flaky.example");
        builder.add(&"192.0.2.7:0".parse().unwrap());

        let record = builder.fail(&ResolveError::Task("task panicked".into()));
        assert_eq!(record.error(), Some("Error: task panicked"));
        assert!(record.ipv4().is_empty());
    }

    #[test]
    fn test_json_shape() {
        let mut builder = RecordBuilder::new("localhost");
        builder.fqdn(Some("localhost".into()));
        builder.add(&"127.0.0.1:0".parse().unwrap());
        let json = serde_json::to_string(&builder.finish()).unwrap();

        assert_eq!(
            json,
            r#"{"hostname":"localhost","fqdn":"localhost","ipv4":["127.0.0.1"],"ipv6":[]}"#
        );
    }

    #[test]
    fn test_json_shape_with_error() {
        let json = serde_json::to_value(RecordBuilder::new("x.invalid").finish()).unwrap();

        assert!(json["fqdn"].is_null());
        assert_eq!(json["error"], "DNS lookup failed: No addresses found");
    }
}
