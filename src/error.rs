//! Error types for evictkit.
//!
//! - [`ConfigError`]: a map was configured with an invalid parameter. Names
//!   the offending field so callers building maps from external settings
//!   can report it.
//! - [`InvariantError`]: `check_invariants` found the hash index and the
//!   ordering list out of step.
//!
//! A missing key is never an error; lookups return `Option`.
//!
//! ```
//! use evictkit::OrderedEvictingMap;
//! use evictkit::config::OrderingMode;
//!
//! let err = OrderedEvictingMap::<u32, u32>::new(Some(0), OrderingMode::Access).unwrap_err();
//! assert_eq!(err.field(), "capacity");
//! assert_eq!(err.to_string(), "capacity must be a positive integer, got 0");
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Invalid construction parameter.
///
/// Produced by [`OrderedEvictingMap::new`](crate::OrderedEvictingMap::new),
/// [`MapConfig::validate`](crate::config::MapConfig::validate) and
/// [`OrderedMapBuilder::try_build`](crate::builder::OrderedMapBuilder::try_build).
/// No partially built map is ever returned alongside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    field: &'static str,
    reason: String,
}

impl ConfigError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn zero_capacity() -> Self {
        Self::new("capacity", "must be a positive integer, got 0")
    }

    /// Name of the rejected configuration field.
    #[inline]
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Why the value was rejected.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Internal map state is inconsistent. Carries a description of the failed
/// check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ordered map invariant violated: {}", self.0)
    }
}

impl std::error::Error for InvariantError {}
