//! Custom-tabs host selection.
//!
//! This module provides the main entry point for resolving which installed
//! browser should host a custom-tab session.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Selector`] | Runs the selection heuristic and caches the result |
//! | [`SelectorBuilder`] | Fluent configuration builder |
//! | [`preferred_package`] | Process-wide convenience over a shared [`Selector`] |
//!
//! # Example
//!
//! ```
//! use custom_tabs_select::{PackageRegistry, Result, Selector};
//!
//! fn pick(registry: &dyn PackageRegistry) -> Result<()> {
//!     let selector = Selector::builder().build()?;
//!
//!     match selector.resolve(registry) {
//!         Some(package) => println!("hosting custom tabs in {package}"),
//!         None => println!("no installed browser supports custom tabs"),
//!     }
//!     Ok(())
//! }
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder pattern for selector configuration.
pub mod builder;

/// Core selection heuristic and resolution cache.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::SelectorBuilder;
pub use core::{Selector, preferred_package};
