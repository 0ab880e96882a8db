//! Builder pattern for selector configuration.
//!
//! Provides a fluent API for configuring and creating [`Selector`] instances.
//!
//! # Example
//!
//! ```
//! use custom_tabs_select::Selector;
//!
//! # fn example() -> custom_tabs_select::Result<()> {
//! let selector = Selector::builder()
//!     .probe_url("https://example.org/")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::PackageName;
use crate::registry::{
    BETA_PACKAGE, DEFAULT_PROBE_URL, DEV_PACKAGE, LOCAL_PACKAGE, STABLE_PACKAGE,
};

use super::core::Selector;

// ============================================================================
// SelectorBuilder
// ============================================================================

/// Builder for configuring a [`Selector`] instance.
///
/// Use [`Selector::builder()`] to create a new builder. Every setting has a
/// default matching the stock heuristic, so `Selector::builder().build()`
/// always succeeds.
#[derive(Debug, Default, Clone)]
pub struct SelectorBuilder {
    /// Probe URL used for handler resolution.
    probe_url: Option<String>,
    /// Fallback precedence chain.
    fallbacks: Option<Vec<PackageName>>,
}

// ============================================================================
// SelectorBuilder Implementation
// ============================================================================

impl SelectorBuilder {
    /// Creates a new selector builder with no configuration.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the probe URL used to resolve generic web-view handlers.
    ///
    /// Defaults to [`DEFAULT_PROBE_URL`]. The concrete page never loads;
    /// only the scheme and host shape matter to the platform resolver.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL (e.g., "http://www.example.com/")
    #[inline]
    #[must_use]
    pub fn probe_url(mut self, url: impl Into<String>) -> Self {
        self.probe_url = Some(url.into());
        self
    }

    /// Sets the fallback precedence chain consulted after the default
    /// handler, highest priority first.
    ///
    /// Defaults to the well-known stable, beta, dev, and local browser
    /// builds, in that order.
    #[inline]
    #[must_use]
    pub fn fallbacks(mut self, fallbacks: impl IntoIterator<Item = PackageName>) -> Self {
        self.fallbacks = Some(fallbacks.into_iter().collect());
        self
    }

    /// Builds the selector with validation.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the probe URL does not parse as an absolute URL
    /// - [`Error::Config`] if an explicitly supplied fallback chain is empty
    pub fn build(self) -> Result<Selector> {
        let probe = self.validate_probe_url()?;
        let fallbacks = self.validate_fallbacks()?;

        Ok(Selector::new(probe, fallbacks))
    }
}

// ============================================================================
// Validation
// ============================================================================

impl SelectorBuilder {
    /// Validates the probe URL configuration.
    fn validate_probe_url(&self) -> Result<Url> {
        let raw = self.probe_url.as_deref().unwrap_or(DEFAULT_PROBE_URL);

        Url::parse(raw).map_err(|e| {
            Error::config(format!(
                "Probe URL is not a valid absolute URL: {raw} ({e})\n\
                 Example: Selector::builder().probe_url(\"http://www.example.com/\")"
            ))
        })
    }

    /// Validates the fallback chain configuration.
    fn validate_fallbacks(&self) -> Result<Vec<PackageName>> {
        let fallbacks = match &self.fallbacks {
            Some(fallbacks) => fallbacks.clone(),
            None => default_fallbacks(),
        };

        if fallbacks.is_empty() {
            return Err(Error::config(
                "Fallback chain is empty. Supply at least one package, or omit \
                 .fallbacks() to use the stock chain.",
            ));
        }

        Ok(fallbacks)
    }
}

/// Stock fallback chain: stable, beta, dev, local — in that order.
fn default_fallbacks() -> Vec<PackageName> {
    [STABLE_PACKAGE, BETA_PACKAGE, DEV_PACKAGE, LOCAL_PACKAGE]
        .into_iter()
        .filter_map(PackageName::new)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = SelectorBuilder::new();
        assert!(builder.probe_url.is_none());
        assert!(builder.fallbacks.is_none());
    }

    #[test]
    fn test_build_with_defaults_succeeds() {
        let selector = SelectorBuilder::new().build().unwrap();
        assert_eq!(selector.probe_url().as_str(), DEFAULT_PROBE_URL);
        assert_eq!(selector.fallbacks().len(), 4);
        assert_eq!(selector.fallbacks()[0], STABLE_PACKAGE);
        assert_eq!(selector.fallbacks()[3], LOCAL_PACKAGE);
    }

    #[test]
    fn test_probe_url_sets_url() {
        let selector = SelectorBuilder::new()
            .probe_url("https://example.org/landing")
            .build()
            .unwrap();
        assert_eq!(selector.probe_url().as_str(), "https://example.org/landing");
    }

    #[test]
    fn test_build_fails_with_invalid_probe_url() {
        let result = SelectorBuilder::new().probe_url("not a url").build();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("Probe URL"));
    }

    #[test]
    fn test_build_fails_with_relative_probe_url() {
        let result = SelectorBuilder::new().probe_url("/relative/only").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_fallbacks_replace_stock_chain() {
        let custom = PackageName::new("org.example.browser").unwrap();
        let selector = SelectorBuilder::new()
            .fallbacks([custom.clone()])
            .build()
            .unwrap();
        assert_eq!(selector.fallbacks(), [custom]);
    }

    #[test]
    fn test_build_fails_with_empty_fallback_chain() {
        let result = SelectorBuilder::new().fallbacks([]).build();
        assert!(result.is_err());

        let err = result.unwrap_err();
        assert!(err.to_string().contains("Fallback chain"));
    }

    #[test]
    fn test_builder_is_clone() {
        let builder = SelectorBuilder::new().probe_url("http://a.test/");
        let cloned = builder.clone();
        assert_eq!(builder.probe_url, cloned.probe_url);
    }
}
