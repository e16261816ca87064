// ── Global busy indicator ──
//
// Reference-counted: overlapping requests keep the indicator raised until
// the last one resolves. Observers only see the boolean.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared busy counter. Cheaply cloneable.
#[derive(Clone)]
pub struct BusyIndicator {
    inner: Arc<BusyInner>,
}

struct BusyInner {
    count: watch::Sender<usize>,
    busy: watch::Sender<bool>,
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyIndicator {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0);
        let (busy, _) = watch::channel(false);
        Self {
            inner: Arc::new(BusyInner { count, busy }),
        }
    }

    /// Raise the indicator until the returned guard is dropped.
    pub fn begin(&self) -> BusyGuard {
        self.adjust(true);
        BusyGuard {
            indicator: self.clone(),
        }
    }

    pub fn is_busy(&self) -> bool {
        *self.inner.busy.borrow()
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        *self.inner.count.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.busy.subscribe()
    }

    fn adjust(&self, raise: bool) {
        // `send_modify` holds the count lock, so the flag update is ordered
        // with the count change.
        self.inner.count.send_modify(|n| {
            *n = if raise { *n + 1 } else { n.saturating_sub(1) };
            let busy = *n > 0;
            self.inner.busy.send_if_modified(|flag| {
                let changed = *flag != busy;
                *flag = busy;
                changed
            });
        });
    }
}

/// Lowers the busy indicator on drop, whatever path the request took.
#[must_use = "dropping the guard immediately lowers the busy indicator"]
pub struct BusyGuard {
    indicator: BusyIndicator,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.indicator.adjust(false);
    }
}
