//! Platform package-registry boundary.
//!
//! The selector never talks to the platform directly; it consumes a
//! [`PackageRegistry`] implemented by the host. The trait mirrors the four
//! queries the heuristic needs:
//!
//! 1. Default handler for a generic "view a web page" action
//! 2. All handlers for that action
//! 3. Whether a package exposes the custom-tabs warmup service
//! 4. Handlers with resolved intent-filter metadata (the only fallible query)
//!
//! # Specialized Handlers
//!
//! A handler is *specialized* when its intent filter declares at least one
//! data authority and at least one data path, i.e. it claims specific URLs
//! rather than acting as a catch-all browser. The presence of any
//! specialized handler disables the default-handler shortcut during
//! selection, since the probe URL may be captured by an app the user never
//! picked as a browser.

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::Result;
use crate::identifiers::PackageName;

// ============================================================================
// Constants
// ============================================================================

/// Intent action exposed by packages that support warmup connections.
pub const WARMUP_SERVICE_ACTION: &str = "android.support.customtabs.action.CustomTabsService";

/// Probe URL used to resolve generic web-view handlers.
pub const DEFAULT_PROBE_URL: &str = "http://www.example.com/";

/// Well-known stable browser build.
pub const STABLE_PACKAGE: &str = "com.android.chrome";

/// Well-known beta browser build.
pub const BETA_PACKAGE: &str = "com.chrome.beta";

/// Well-known dev browser build.
pub const DEV_PACKAGE: &str = "com.chrome.dev";

/// Well-known local/alternate browser build.
pub const LOCAL_PACKAGE: &str = "com.google.android.apps.chrome";

// ============================================================================
// IntentFilter
// ============================================================================

/// Resolved intent-filter metadata for a view handler.
///
/// Only the data authorities and paths matter for selection; everything else
/// the platform resolves is dropped at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntentFilter {
    /// Data authorities the filter declares.
    authorities: Vec<String>,
    /// Data paths the filter declares.
    paths: Vec<String>,
}

impl IntentFilter {
    /// Creates a filter from its declared authorities and paths.
    #[inline]
    #[must_use]
    pub fn new(authorities: Vec<String>, paths: Vec<String>) -> Self {
        Self { authorities, paths }
    }

    /// Creates a catch-all filter with no authorities or paths.
    #[inline]
    #[must_use]
    pub fn catch_all() -> Self {
        Self::default()
    }

    /// Returns the declared data authorities.
    #[inline]
    #[must_use]
    pub fn authorities(&self) -> &[String] {
        &self.authorities
    }

    /// Returns the declared data paths.
    #[inline]
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns `true` if the filter claims a specific authority AND path.
    #[inline]
    #[must_use]
    pub fn is_specialized(&self) -> bool {
        !self.authorities.is_empty() && !self.paths.is_empty()
    }
}

// ============================================================================
// ResolvedHandler
// ============================================================================

/// A view-action handler together with its resolved filter metadata.
///
/// `filter` is `None` when the platform could not resolve one; such a
/// handler is never specialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHandler {
    /// Handling application package.
    package: PackageName,
    /// Resolved intent filter, if the platform produced one.
    filter: Option<IntentFilter>,
}

impl ResolvedHandler {
    /// Creates a resolved handler.
    #[inline]
    #[must_use]
    pub fn new(package: PackageName, filter: Option<IntentFilter>) -> Self {
        Self { package, filter }
    }

    /// Returns the handling application package.
    #[inline]
    #[must_use]
    pub fn package(&self) -> &PackageName {
        &self.package
    }

    /// Returns the resolved filter, if any.
    #[inline]
    #[must_use]
    pub fn filter(&self) -> Option<&IntentFilter> {
        self.filter.as_ref()
    }

    /// Returns `true` if this handler registers a specialized filter.
    #[inline]
    #[must_use]
    pub fn is_specialized(&self) -> bool {
        self.filter.as_ref().is_some_and(IntentFilter::is_specialized)
    }
}

// ============================================================================
// PackageRegistry
// ============================================================================

/// Host-supplied view into the platform's application registry.
///
/// Implementations wrap whatever the platform offers (on Android, a
/// `PackageManager`); tests use in-memory fixtures. All queries are
/// synchronous and must be cheap enough to call on the resolving thread.
pub trait PackageRegistry {
    /// Returns the user-chosen default handler for viewing `probe`, if any.
    fn default_view_handler(&self, probe: &Url) -> Option<PackageName>;

    /// Returns every application able to handle viewing `probe`.
    ///
    /// Order is meaningful: the selector preserves it when reducing to the
    /// candidate set. Duplicates are tolerated and dropped downstream.
    fn view_handlers(&self, probe: &Url) -> Vec<PackageName>;

    /// Returns `true` if `package` exposes the custom-tabs warmup service
    /// ([`WARMUP_SERVICE_ACTION`]).
    fn has_warmup_service(&self, package: &PackageName) -> bool;

    /// Returns every handler for viewing `probe` with resolved filter
    /// metadata.
    ///
    /// # Errors
    ///
    /// [`Error::Registry`](crate::Error::Registry) on a platform fault.
    /// This is the only registry query that may fail at runtime; the
    /// selector treats a fault as "no specialized handler found".
    fn view_handlers_with_filters(&self, probe: &Url) -> Result<Vec<ResolvedHandler>>;
}

// ============================================================================
// Tests
// ============================================================================
