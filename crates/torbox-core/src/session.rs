// ── Credential & connection state ──
//
// One `Session` per dashboard, shared by handle with the gateway and every
// loader. The key lives behind a short-lived std lock (never held across
// an await); connection status is published on a `watch` channel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::watch;
use tracing::{debug, info};

/// Connection status observable by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    /// No successful probe for the current key.
    #[default]
    Disconnected,
    /// A probe is in flight.
    Checking,
    /// The last probe with the current key succeeded.
    Connected,
    /// The last probe failed.
    Failed,
}

impl ConnectionStatus {
    /// Label shown in the connection indicator.
    pub fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "Not connected",
            Self::Checking => "Connecting...",
            Self::Connected => "Connected",
            Self::Failed => "Connection Failed",
        }
    }
}

/// Shared credential holder. Cheaply cloneable.
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    api_key: RwLock<Option<SecretString>>,
    /// Bumped on every key change; lets a probe detect that the key it
    /// verified is no longer current.
    generation: AtomicU64,
    /// Survives a re-check of the same key; only a failure or a key change
    /// clears it.
    verified: AtomicBool,
    status: watch::Sender<ConnectionStatus>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("api_key_present", &self.has_api_key())
            .field("status", &self.status())
            .finish()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session with no key and no verification.
    pub fn new() -> Self {
        let (status, _) = watch::channel(ConnectionStatus::Disconnected);
        Self {
            inner: Arc::new(SessionInner {
                api_key: RwLock::new(None),
                generation: AtomicU64::new(0),
                verified: AtomicBool::new(false),
                status,
            }),
        }
    }

    /// Replace the API key. Input is trimmed; blank input clears the key.
    ///
    /// Returns `true` when the stored key changed. A changed key drops any
    /// verification obtained with the previous one.
    pub fn set_api_key(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        let changed = {
            let mut slot = self
                .inner
                .api_key
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let current = slot.as_ref().map(ExposeSecret::expose_secret);
            let next = (!trimmed.is_empty()).then_some(trimmed);
            if current == next {
                false
            } else {
                *slot = next.map(|k| SecretString::from(k.to_owned()));
                true
            }
        };

        if changed {
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            self.inner.verified.store(false, Ordering::SeqCst);
            debug!(present = !trimmed.is_empty(), "api key replaced");
            self.inner.status.send_if_modified(|status| {
                let reset = *status != ConnectionStatus::Disconnected;
                *status = ConnectionStatus::Disconnected;
                reset
            });
        }
        changed
    }

    /// A copy of the current key, if one is set.
    pub fn api_key(&self) -> Option<SecretString> {
        self.inner
            .api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_api_key(&self) -> bool {
        self.inner
            .api_key
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Whether the current key has passed a connection probe. Stays `true`
    /// while the same key is being checked again.
    pub fn is_verified(&self) -> bool {
        self.inner.verified.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> ConnectionStatus {
        *self.inner.status.borrow()
    }

    /// Subscribe to connection status changes.
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.inner.status.subscribe()
    }

    /// Identifies the current key; changes whenever the key does.
    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::SeqCst)
    }

    pub(crate) fn set_status(&self, next: ConnectionStatus) {
        match next {
            ConnectionStatus::Connected => self.inner.verified.store(true, Ordering::SeqCst),
            ConnectionStatus::Disconnected | ConnectionStatus::Failed => {
                self.inner.verified.store(false, Ordering::SeqCst);
            }
            ConnectionStatus::Checking => {}
        }
        let changed = self.inner.status.send_if_modified(|status| {
            let changed = *status != next;
            *status = next;
            changed
        });
        if changed {
            info!(status = next.label(), "connection status changed");
        }
    }
}
