//! Error types for custom-tab host selection.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```
//! use custom_tabs_select::{Result, Selector};
//!
//! fn example() -> Result<Selector> {
//!     Selector::builder()
//!         .probe_url("http://www.example.com/")
//!         .build()
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Platform registry | [`Error::Registry`] |
//!
//! Absence of a suitable candidate package is **not** an error; the selector
//! surfaces it as `Option::None`.

// ============================================================================
// Imports
// ============================================================================

use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when selector configuration is invalid, for example a
    /// malformed probe URL or an empty fallback chain.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Platform Registry Errors
    // ========================================================================
    /// Runtime fault reported by the platform package registry.
    ///
    /// Produced by [`PackageRegistry`](crate::registry::PackageRegistry)
    /// implementations when a query cannot be completed. The selector
    /// swallows this fault at the specialized-handler probe; it never
    /// reaches a `resolve` caller.
    #[error("Registry error: {message}")]
    Registry {
        /// Description of the registry fault.
        message: String,
    },
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a registry fault.
    #[inline]
    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a configuration error.
    #[inline]
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }

    /// Returns `true` if this is a platform registry fault.
    #[inline]
    #[must_use]
    pub fn is_registry(&self) -> bool {
        matches!(self, Self::Registry { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
