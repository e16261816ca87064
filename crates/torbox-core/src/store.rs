// ── Panel store ──
//
// Concurrent per-panel storage with ticketed writes. A loader takes a
// ticket before it dispatches; its render is committed only if no newer
// ticket was issued for the same panel in the meantime.

use std::sync::Arc;

use dashmap::DashMap;
use strum::IntoEnumIterator;
use tokio::sync::watch;

use crate::model::Panel;
use crate::render::PanelContent;

/// Monotonic per-panel load ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

struct Slot {
    /// Last ticket handed out.
    issued: u64,
    /// Ticket whose render is currently stored (0 = initial content).
    committed: u64,
    content: Arc<PanelContent>,
}

/// Current content of every panel.
pub(crate) struct PanelStore {
    slots: DashMap<Panel, Slot>,
    /// Bumped on every accepted write.
    version: watch::Sender<u64>,
}

impl PanelStore {
    pub(crate) fn new() -> Self {
        let slots = DashMap::new();
        for panel in Panel::iter() {
            slots.insert(
                panel,
                Slot {
                    issued: 0,
                    committed: 0,
                    content: Arc::new(PanelContent::initial(panel)),
                },
            );
        }
        let (version, _) = watch::channel(0u64);
        Self { slots, version }
    }

    /// Reserve the next ticket for `panel`.
    pub(crate) fn ticket(&self, panel: Panel) -> Ticket {
        let mut slot = self.slot_mut(panel);
        slot.issued += 1;
        Ticket(slot.issued)
    }

    /// Store `content` if `ticket` is still the newest for `panel`.
    /// Returns `false` when the render was stale and dropped.
    pub(crate) fn commit(&self, panel: Panel, ticket: Ticket, content: PanelContent) -> bool {
        {
            let mut slot = self.slot_mut(panel);
            if ticket.0 < slot.issued {
                return false;
            }
            slot.committed = ticket.0;
            slot.content = Arc::new(content);
        }
        self.bump_version();
        true
    }

    /// Take a ticket and store immediately (renders that need no request).
    pub(crate) fn replace(&self, panel: Panel, content: PanelContent) {
        let ticket = self.ticket(panel);
        self.commit(panel, ticket, content);
    }

    /// Current content (cheap `Arc` clone).
    pub(crate) fn get(&self, panel: Panel) -> Arc<PanelContent> {
        self.slots.get(&panel).map_or_else(
            || Arc::new(PanelContent::initial(panel)),
            |slot| Arc::clone(&slot.content),
        )
    }

    /// Ticket of the render currently stored for `panel`.
    #[cfg(test)]
    pub(crate) fn committed(&self, panel: Panel) -> Ticket {
        Ticket(self.slots.get(&panel).map_or(0, |slot| slot.committed))
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn slot_mut(&self, panel: Panel) -> dashmap::mapref::one::RefMut<'_, Panel, Slot> {
        self.slots.entry(panel).or_insert_with(|| Slot {
            issued: 0,
            committed: 0,
            content: Arc::new(PanelContent::initial(panel)),
        })
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}
