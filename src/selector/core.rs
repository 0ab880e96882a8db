//! Core selection heuristic and resolution cache.
//!
//! Walks every application that both handles a generic web-view action and
//! exposes the custom-tabs warmup service, then picks one:
//!
//! 1. Empty candidate set → no result
//! 2. Sole candidate → that candidate
//! 3. The user's default handler, if it is a candidate and no app registers
//!    a specialized handler for the action
//! 4. First fallback-chain entry present in the candidate set
//! 5. Otherwise no result
//!
//! The first non-empty result is cached for the remaining process lifetime;
//! an empty outcome is re-queried on the next call.

// ============================================================================
// Imports
// ============================================================================

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::{debug, warn};
use url::Url;

use crate::identifiers::PackageName;
use crate::registry::{PackageRegistry, ResolvedHandler};

use super::builder::SelectorBuilder;

// ============================================================================
// Shared Selector
// ============================================================================

/// Process-wide selector backing [`preferred_package`].
static SHARED: Lazy<Selector> = Lazy::new(Selector::default);

/// Resolves the preferred custom-tabs host with a process-wide [`Selector`].
///
/// The first non-empty resolution is cached for the remaining process
/// lifetime; subsequent calls return it without touching `registry`. Hosts
/// that need a private cache or a non-stock configuration should build their
/// own [`Selector`] instead.
pub fn preferred_package(registry: &dyn PackageRegistry) -> Option<PackageName> {
    SHARED.resolve(registry)
}

// ============================================================================
// Selector
// ============================================================================

/// Picks the installed application best suited to host custom tabs.
///
/// Construction goes through [`Selector::builder()`]. The selector owns a
/// write-once resolution cache; cloning the configuration requires a new
/// builder, there is deliberately no `Clone`.
///
/// # Thread Safety
///
/// The cache slot is mutex-gated, so `resolve` is safe to call from multiple
/// threads. Concurrent *first* calls may each query the registry; the first
/// writer wins and every caller observes that value.
#[derive(Debug)]
pub struct Selector {
    /// Probe URL used for handler resolution.
    probe: Url,
    /// Fallback precedence chain, highest priority first.
    fallbacks: Vec<PackageName>,
    /// Write-once resolution cache.
    cache: Mutex<Option<PackageName>>,
}

impl Selector {
    /// Creates a selector builder with stock defaults.
    #[inline]
    #[must_use]
    pub fn builder() -> SelectorBuilder {
        SelectorBuilder::new()
    }

    /// Creates a selector from validated configuration.
    pub(crate) fn new(probe: Url, fallbacks: Vec<PackageName>) -> Self {
        Self {
            probe,
            fallbacks,
            cache: Mutex::new(None),
        }
    }

    /// Returns the probe URL used for handler resolution.
    #[inline]
    #[must_use]
    pub fn probe_url(&self) -> &Url {
        &self.probe
    }

    /// Returns the fallback precedence chain.
    #[inline]
    #[must_use]
    pub fn fallbacks(&self) -> &[PackageName] {
        &self.fallbacks
    }

    /// Returns the cached resolution, if one has been made.
    #[inline]
    #[must_use]
    pub fn cached(&self) -> Option<PackageName> {
        self.cache.lock().clone()
    }

    /// Resolves the preferred custom-tabs host.
    ///
    /// Returns the cached value when present; otherwise runs the heuristic
    /// against `registry` and caches a non-empty result. `None` means no
    /// installed application handles both the web-view action and the
    /// warmup service — that outcome is NOT cached, so a later call sees
    /// packages installed in the meantime.
    pub fn resolve(&self, registry: &dyn PackageRegistry) -> Option<PackageName> {
        if let Some(cached) = self.cached() {
            debug!(package = %cached, "Returning cached custom-tabs host");
            return Some(cached);
        }

        match self.query(registry) {
            Some(package) => {
                // First writer wins under concurrent first calls.
                let winner = self.cache.lock().get_or_insert(package).clone();
                debug!(package = %winner, "Resolved custom-tabs host");
                Some(winner)
            }
            None => {
                debug!("No installed package supports custom tabs");
                None
            }
        }
    }

    /// Runs the selection heuristic against the registry.
    fn query(&self, registry: &dyn PackageRegistry) -> Option<PackageName> {
        let default_handler = registry.default_view_handler(&self.probe);

        // Candidate set: view handlers that also expose the warmup service,
        // de-duplicated, registry order preserved.
        let mut seen = FxHashSet::default();
        let mut candidates: Vec<PackageName> = Vec::new();
        for package in registry.view_handlers(&self.probe) {
            if !seen.insert(package.clone()) {
                continue;
            }
            if registry.has_warmup_service(&package) {
                candidates.push(package);
            }
        }

        if candidates.is_empty() {
            return None;
        }
        if candidates.len() == 1 {
            return candidates.pop();
        }

        // The default handler wins only when it is a candidate and nothing
        // claims specific URLs for the action; a specialized handler means
        // the probe may route somewhere the user never picked as a browser.
        if let Some(default) = default_handler
            && candidates.contains(&default)
            && !self.has_specialized_handlers(registry)
        {
            return Some(default);
        }

        self.fallbacks
            .iter()
            .find(|package| candidates.contains(package))
            .cloned()
    }

    /// Returns `true` if any installed handler registers a specialized
    /// filter for the probe.
    ///
    /// A registry fault is swallowed: logged at warn level and treated as
    /// "no specialized handler found", matching the conservative contract.
    fn has_specialized_handlers(&self, registry: &dyn PackageRegistry) -> bool {
        match registry.view_handlers_with_filters(&self.probe) {
            Ok(handlers) => handlers.iter().any(ResolvedHandler::is_specialized),
            Err(error) => {
                warn!(%error, "Registry fault while probing for specialized handlers");
                false
            }
        }
    }
}

impl Default for Selector {
    /// Stock configuration: default probe URL and fallback chain.
    fn default() -> Self {
        SelectorBuilder::new()
            .build()
            .expect("stock selector configuration is valid")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use proptest::prelude::*;

    use crate::error::{Error, Result};
    use crate::registry::{
        BETA_PACKAGE, DEV_PACKAGE, IntentFilter, STABLE_PACKAGE,
    };

    fn pkg(raw: &str) -> PackageName {
        PackageName::new(raw).unwrap()
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("custom_tabs_select=trace")
            .with_test_writer()
            .try_init();
    }

    /// In-memory registry double with per-query call counters.
    #[derive(Default)]
    struct FakeRegistry {
        default_handler: Option<PackageName>,
        handlers: Vec<PackageName>,
        warmup: Vec<PackageName>,
        specialized: bool,
        filter_query_faults: bool,
        handler_queries: Cell<usize>,
        warmup_queries: Cell<usize>,
        filter_queries: Cell<usize>,
    }

    impl FakeRegistry {
        /// Registry where every handler also exposes the warmup service.
        fn with_candidates(handlers: &[&str]) -> Self {
            let packages: Vec<PackageName> = handlers.iter().map(|raw| pkg(raw)).collect();
            Self {
                handlers: packages.clone(),
                warmup: packages,
                ..Self::default()
            }
        }

        fn default_handler(mut self, raw: &str) -> Self {
            self.default_handler = Some(pkg(raw));
            self
        }

        fn specialized(mut self) -> Self {
            self.specialized = true;
            self
        }

        fn faulting_filters(mut self) -> Self {
            self.filter_query_faults = true;
            self
        }
    }

    impl PackageRegistry for FakeRegistry {
        fn default_view_handler(&self, _probe: &Url) -> Option<PackageName> {
            self.default_handler.clone()
        }

        fn view_handlers(&self, _probe: &Url) -> Vec<PackageName> {
            self.handler_queries.set(self.handler_queries.get() + 1);
            self.handlers.clone()
        }

        fn has_warmup_service(&self, package: &PackageName) -> bool {
            self.warmup_queries.set(self.warmup_queries.get() + 1);
            self.warmup.contains(package)
        }

        fn view_handlers_with_filters(&self, _probe: &Url) -> Result<Vec<ResolvedHandler>> {
            self.filter_queries.set(self.filter_queries.get() + 1);
            if self.filter_query_faults {
                return Err(Error::registry("package manager transaction failed"));
            }

            let mut handlers: Vec<ResolvedHandler> = self
                .handlers
                .iter()
                .map(|p| ResolvedHandler::new(p.clone(), Some(IntentFilter::catch_all())))
                .collect();
            if self.specialized {
                handlers.push(ResolvedHandler::new(
                    pkg("org.example.maps"),
                    Some(IntentFilter::new(
                        vec!["maps.example.com".into()],
                        vec!["/place".into()],
                    )),
                ));
            }
            Ok(handlers)
        }
    }

    fn selector() -> Selector {
        Selector::builder().build().unwrap()
    }

    #[test]
    fn test_empty_candidate_set_resolves_none() {
        let registry = FakeRegistry::with_candidates(&[]);
        assert_eq!(selector().resolve(&registry), None);
    }

    #[test]
    fn test_handlers_without_warmup_service_are_not_candidates() {
        let mut registry = FakeRegistry::with_candidates(&["org.example.browser"]);
        registry.warmup.clear();
        assert_eq!(selector().resolve(&registry), None);
    }

    #[test]
    fn test_sole_candidate_wins_regardless_of_default_and_fallbacks() {
        let registry =
            FakeRegistry::with_candidates(&["org.example.browser"]).default_handler(STABLE_PACKAGE);
        assert_eq!(
            selector().resolve(&registry),
            Some(pkg("org.example.browser"))
        );
    }

    #[test]
    fn test_stable_beats_beta_without_default_handler() {
        let registry = FakeRegistry::with_candidates(&[BETA_PACKAGE, STABLE_PACKAGE]);
        assert_eq!(selector().resolve(&registry), Some(pkg(STABLE_PACKAGE)));
    }

    #[test]
    fn test_default_handler_wins_when_candidate_and_no_specialized() {
        let registry =
            FakeRegistry::with_candidates(&[BETA_PACKAGE, DEV_PACKAGE]).default_handler(BETA_PACKAGE);
        assert_eq!(selector().resolve(&registry), Some(pkg(BETA_PACKAGE)));
    }

    #[test]
    fn test_specialized_handler_skips_default_shortcut() {
        // Default handler is a candidate but outside the fallback chain;
        // with a specialized handler present it must not win.
        let registry = FakeRegistry::with_candidates(&["org.other.browser", DEV_PACKAGE])
            .default_handler("org.other.browser")
            .specialized();
        assert_eq!(selector().resolve(&registry), Some(pkg(DEV_PACKAGE)));
    }

    #[test]
    fn test_specialized_handler_falls_through_to_chain_containing_default() {
        // The shortcut is skipped, but beta still wins via the chain.
        let registry = FakeRegistry::with_candidates(&[BETA_PACKAGE, DEV_PACKAGE])
            .default_handler(BETA_PACKAGE)
            .specialized();
        assert_eq!(selector().resolve(&registry), Some(pkg(BETA_PACKAGE)));
    }

    #[test]
    fn test_default_handler_outside_candidate_set_is_ignored() {
        let registry = FakeRegistry::with_candidates(&[DEV_PACKAGE, BETA_PACKAGE])
            .default_handler("org.not.a.candidate");
        assert_eq!(selector().resolve(&registry), Some(pkg(BETA_PACKAGE)));
        // Membership fails first, so the filter query is never issued.
        assert_eq!(registry.filter_queries.get(), 0);
    }

    #[test]
    fn test_no_fallback_match_resolves_none() {
        let registry =
            FakeRegistry::with_candidates(&["org.a.browser", "org.b.browser"]);
        assert_eq!(selector().resolve(&registry), None);
    }

    #[test]
    fn test_duplicate_handlers_probe_warmup_once() {
        let registry =
            FakeRegistry::with_candidates(&[STABLE_PACKAGE, STABLE_PACKAGE, BETA_PACKAGE]);
        assert_eq!(selector().resolve(&registry), Some(pkg(STABLE_PACKAGE)));
        // One warmup probe per distinct handler.
        assert_eq!(registry.warmup_queries.get(), 2);
    }

    #[test]
    fn test_resolution_is_cached_and_registry_queried_once() {
        let registry = FakeRegistry::with_candidates(&[STABLE_PACKAGE, BETA_PACKAGE]);
        let selector = selector();

        let first = selector.resolve(&registry);
        let second = selector.resolve(&registry);

        assert_eq!(first, Some(pkg(STABLE_PACKAGE)));
        assert_eq!(second, first);
        assert_eq!(selector.cached(), first);
        assert_eq!(registry.handler_queries.get(), 1);
    }

    #[test]
    fn test_none_outcome_is_not_cached() {
        let registry = FakeRegistry::with_candidates(&[]);
        let selector = selector();

        assert_eq!(selector.resolve(&registry), None);
        assert_eq!(selector.resolve(&registry), None);

        // Each empty outcome re-queries the registry.
        assert_eq!(registry.handler_queries.get(), 2);
        assert_eq!(selector.cached(), None);
    }

    #[test]
    fn test_registry_fault_is_swallowed_as_no_specialized_handler() {
        init_tracing();

        let registry = FakeRegistry::with_candidates(&[BETA_PACKAGE, DEV_PACKAGE])
            .default_handler(BETA_PACKAGE)
            .faulting_filters();

        // The fault is logged and treated as "no specialized handler", so
        // the default-handler shortcut still applies.
        assert_eq!(selector().resolve(&registry), Some(pkg(BETA_PACKAGE)));
        assert_eq!(registry.filter_queries.get(), 1);
    }

    // The only test that touches the process-wide selector; everything else
    // builds its own to keep cache state isolated.
    #[test]
    fn test_preferred_package_caches_across_calls() {
        let registry = FakeRegistry::with_candidates(&[STABLE_PACKAGE]);

        assert_eq!(preferred_package(&registry), Some(pkg(STABLE_PACKAGE)));
        assert_eq!(preferred_package(&registry), Some(pkg(STABLE_PACKAGE)));
        assert_eq!(registry.handler_queries.get(), 1);
    }

    #[test]
    fn test_custom_fallback_chain_is_honored() {
        let custom = Selector::builder()
            .fallbacks([pkg("org.b.browser"), pkg("org.a.browser")])
            .build()
            .unwrap();
        let registry = FakeRegistry::with_candidates(&["org.a.browser", "org.b.browser"]);
        assert_eq!(custom.resolve(&registry), Some(pkg("org.b.browser")));
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Pool of handler names the properties draw from: the stock chain plus
    /// extras that never match a fallback.
    fn handler_pool() -> Vec<&'static str> {
        vec![
            STABLE_PACKAGE,
            BETA_PACKAGE,
            DEV_PACKAGE,
            "org.extra.one",
            "org.extra.two",
        ]
    }

    proptest! {
        /// Whatever the candidate order, the result is a candidate or none.
        #[test]
        fn prop_result_is_candidate_or_none(indices in proptest::collection::vec(0usize..5, 0..8)) {
            let pool = handler_pool();
            let handlers: Vec<&str> = indices.iter().map(|&i| pool[i]).collect();
            let registry = FakeRegistry::with_candidates(&handlers);

            if let Some(resolved) = selector().resolve(&registry) {
                prop_assert!(handlers.iter().any(|h| resolved == *h));
            }
        }

        /// Without a default handler, multi-candidate sets resolve to the
        /// first fallback-chain entry present, independent of order.
        #[test]
        fn prop_fallback_chain_order_is_authoritative(indices in proptest::collection::vec(0usize..5, 2..8)) {
            let pool = handler_pool();
            let handlers: Vec<&str> = indices.iter().map(|&i| pool[i]).collect();
            let registry = FakeRegistry::with_candidates(&handlers);

            let sel = selector();
            let resolved = sel.resolve(&registry);

            let mut distinct: Vec<&str> = Vec::new();
            for h in &handlers {
                if !distinct.contains(h) {
                    distinct.push(h);
                }
            }

            let expected = if distinct.len() == 1 {
                Some(pkg(distinct[0]))
            } else {
                sel.fallbacks()
                    .iter()
                    .find(|f| distinct.iter().any(|d| **f == **d))
                    .cloned()
            };
            prop_assert_eq!(resolved, expected);
        }
    }
}
