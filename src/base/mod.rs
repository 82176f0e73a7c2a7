//! Base types and error handling.
//!
//! - [`ResolveError`]: per-hostname lookup failures
//! - [`BatchError`]: fatal input/output failures of a batch run
//! - [`IoResultExt`]: context helpers for `io::Result`

pub mod context;
pub mod error;

pub use context::IoResultExt;
pub use error::{BatchError, ResolveError};
