//! # hostip
//!
//! Batch host-to-IP resolution.
//!
//! `hostip` takes a list of hostnames, resolves each one to its
//! fully-qualified name and its IPv4/IPv6 addresses, and writes the
//! results to a JSON file.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use hostip::HostResolver;
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolver = HostResolver::system(true);
//!     let record = resolver.resolve("example.com").await;
//!     println!("{}", serde_json::to_string_pretty(&record).unwrap());
//! }
//! ```
//!
//! ## Resolution strategies
//!
//! Several lookups run for every hostname, in a fixed order, and their
//! answers are merged without duplicates:
//!
//! 1. `getaddrinfo` with no family hint
//! 2. `getaddrinfo` restricted to IPv4
//! 3. `getaddrinfo` restricted to IPv6
//! 4. direct A and AAAA record queries (optional)
//!
//! A strategy that finds nothing is skipped. A hostname for which no
//! strategy finds anything gets an `error` instead of addresses.
//!
//! ## Modules
//!
//! - [`base`] - Error types and error context helpers
//! - [`dns`] - Individual lookup strategies
//! - [`record`] - Result records and ordered address sets
//! - [`resolver`] - Strategy list and merge
//! - [`batch`] - File-to-file driver
//! - [`inspect`] - Raw per-strategy diagnostics

pub mod base;
pub mod batch;
pub mod config;
pub mod dns;
pub mod inspect;
pub mod record;
pub mod resolver;

pub use base::{BatchError, ResolveError};
pub use config::Config;
pub use record::{AddressSet, HostResolutionRecord};
pub use resolver::{HostResolver, HostResolverBuilder};
