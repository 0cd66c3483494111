//! Error types.
//!
//! Lookups never fail: a missing key is an `Option::None`, and deleting an
//! unknown list reference returns `false`. The only fallible boundary is
//! building a cache from caller-supplied settings.

/// Errors returned when a cache cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Result alias used by the fallible constructors of this crate.
pub type Result<T> = core::result::Result<T, Error>;
