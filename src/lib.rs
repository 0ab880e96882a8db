//! Custom-tab host selection for in-app browsing.
//!
//! This library picks, among installed browser applications, the one best
//! suited to host an in-app "custom tab" session, and provides a leak-free
//! relay for warmup-service connection events.
//!
//! # Architecture
//!
//! Two independent pieces:
//!
//! - **Selector**: walks every application that handles a generic web-view
//!   action and exposes the warmup service, then applies a fixed precedence
//!   (user default, then stable/beta/dev/local builds). The first non-empty
//!   resolution is cached for the process lifetime.
//! - **Connection relay**: forwards connected/disconnected events to a
//!   [`ConnectionCallback`] held through a weak reference, so the relay
//!   never extends the callback's lifetime.
//!
//! The platform's application registry is abstracted behind the
//! [`PackageRegistry`] trait; this crate consumes it. It never binds
//! services or launches anything itself.
//!
//! # Quick Start
//!
//! ```
//! use custom_tabs_select::{PackageRegistry, preferred_package};
//!
//! fn warm_up(registry: &dyn PackageRegistry) {
//!     match preferred_package(registry) {
//!         Some(package) => println!("connect warmup service of {package}"),
//!         None => println!("fall back to an external browser"),
//!     }
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`connection`] | [`ServiceConnection`] relay and [`ConnectionCallback`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe identifier wrappers |
//! | [`registry`] | [`PackageRegistry`] boundary trait and handler metadata |
//! | [`selector`] | Selection heuristic, builder, process-wide entry point |

// ============================================================================
// Modules
// ============================================================================

/// Warmup-service connection relay.
///
/// [`ServiceConnection`] forwards connection events to a weakly-held
/// [`ConnectionCallback`].
pub mod connection;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for packages, components, and service clients.
///
/// Newtype wrappers prevent mixing incompatible identifiers at compile time.
pub mod identifiers;

/// Platform package-registry boundary.
///
/// The host implements [`PackageRegistry`]; the selector consumes it.
pub mod registry;

/// Custom-tabs host selection.
///
/// Use [`Selector::builder()`] or the process-wide [`preferred_package`].
pub mod selector;

// ============================================================================
// Re-exports
// ============================================================================

// Connection types
pub use connection::{ConnectionCallback, ServiceConnection};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ClientHandle, ComponentName, PackageName};

// Registry types
pub use registry::{IntentFilter, PackageRegistry, ResolvedHandler};

// Selector types
pub use selector::{Selector, SelectorBuilder, preferred_package};
