//! Type-safe identifiers for packages, components, and service clients.
//!
//! Newtype wrappers prevent mixing incompatible identifiers at compile time.
//!
//! # Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`PackageName`] | Installed application identifier (e.g. `com.android.chrome`) |
//! | [`ComponentName`] | `package/class` pair naming a component inside an application |
//! | [`ClientHandle`] | Opaque handle for a connected warmup-service client |

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

// ============================================================================
// PackageName
// ============================================================================

/// Opaque identifier for an installed application.
///
/// A thin wrapper over the platform's package string. No structure is
/// imposed beyond non-emptiness; comparisons are exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Creates a package name from a raw string.
    ///
    /// Returns `None` for an empty string; the platform never reports an
    /// installed application with an empty identifier, so an empty value
    /// always indicates a caller bug.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() { None } else { Some(Self(raw)) }
    }

    /// Returns the package name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for PackageName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PackageName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ============================================================================
// ComponentName
// ============================================================================

/// Names a concrete component inside an application.
///
/// Delivered alongside connection events so a callback can tell which
/// service component the platform bound. Displayed as `package/class`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentName {
    /// Owning application package.
    package: PackageName,
    /// Fully qualified class name of the component.
    class: String,
}

impl ComponentName {
    /// Creates a component name from a package and class.
    #[inline]
    #[must_use]
    pub fn new(package: PackageName, class: impl Into<String>) -> Self {
        Self {
            package,
            class: class.into(),
        }
    }

    /// Returns the owning application package.
    #[inline]
    #[must_use]
    pub fn package(&self) -> &PackageName {
        &self.package
    }

    /// Returns the component class name.
    #[inline]
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

// ============================================================================
// ClientHandle
// ============================================================================

/// Opaque handle standing in for a connected warmup-service client.
///
/// The connection source mints one per established binding and the relay
/// forwards it untouched; the crate never inspects the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientHandle(u64);

/// Next handle value, process-wide.
static NEXT_CLIENT_HANDLE: AtomicU64 = AtomicU64::new(1);

impl ClientHandle {
    /// Returns the next unique handle.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_CLIENT_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    /// Creates a handle from a raw value minted elsewhere.
    #[inline]
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[inline]
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "client#{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
