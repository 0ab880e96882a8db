//! Warmup-service connection relay.
//!
//! The platform's service-binding machinery delivers connected/disconnected
//! events for the warmup service of the selected package. Host code reacts
//! through a [`ConnectionCallback`]; the [`ServiceConnection`] relay sits
//! between the two and holds the callback through a [`Weak`] reference, so
//! registering with a long-lived connection source never extends the
//! callback's lifetime.
//!
//! # Lifecycle
//!
//! There is no state machine. Either event may fire zero, one, or many
//! times, in any order the connection source dictates. Once the callback's
//! last [`Arc`] is dropped, deliveries become silent no-ops.
//!
//! # Thread Safety
//!
//! The relay adds no locking; events are forwarded on whatever thread the
//! connection source uses. The `Send + Sync` bound on the callback makes
//! the implementation own its thread-safety.

// ============================================================================
// Imports
// ============================================================================

use std::sync::{Arc, Weak};

use tracing::trace;

use crate::identifiers::{ClientHandle, ComponentName};

// ============================================================================
// ConnectionCallback
// ============================================================================

/// Events a host observes on the warmup-service connection.
pub trait ConnectionCallback: Send + Sync {
    /// Called when the service is connected.
    ///
    /// `client` is the opaque handle for the established binding.
    fn on_service_connected(&self, client: ClientHandle);

    /// Called when the service is disconnected.
    fn on_service_disconnected(&self);
}

// ============================================================================
// ServiceConnection
// ============================================================================

/// Relay that forwards connection events without owning its callback.
///
/// Holds the [`ConnectionCallback`] through a [`Weak`]; once the host drops
/// its last strong reference, the relay no-ops instead of keeping the
/// callback alive.
pub struct ServiceConnection {
    /// Non-owning reference to the registered callback.
    callback: Weak<dyn ConnectionCallback>,
}

impl ServiceConnection {
    /// Creates a relay for `callback`.
    ///
    /// Only a weak reference is retained; the caller keeps ownership.
    #[must_use]
    pub fn new(callback: &Arc<dyn ConnectionCallback>) -> Self {
        Self {
            callback: Arc::downgrade(callback),
        }
    }

    /// Returns `true` if the registered callback is still alive.
    #[inline]
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.callback.strong_count() > 0
    }

    /// Delivers a "service connected" event.
    ///
    /// `name` identifies the bound component; the forwarding logic does not
    /// consume it beyond logging. No-op if the callback has been dropped.
    pub fn service_connected(&self, name: &ComponentName, client: ClientHandle) {
        match self.callback.upgrade() {
            Some(callback) => {
                trace!(component = %name, %client, "Forwarding service connect");
                callback.on_service_connected(client);
            }
            None => trace!(component = %name, "Dropping connect event, callback is gone"),
        }
    }

    /// Delivers a "service disconnected" event.
    ///
    /// No-op if the callback has been dropped.
    pub fn service_disconnected(&self, name: &ComponentName) {
        match self.callback.upgrade() {
            Some(callback) => {
                trace!(component = %name, "Forwarding service disconnect");
                callback.on_service_disconnected();
            }
            None => trace!(component = %name, "Dropping disconnect event, callback is gone"),
        }
    }
}

impl std::fmt::Debug for ServiceConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConnection")
            .field("alive", &self.is_alive())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
