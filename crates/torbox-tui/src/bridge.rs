//! Data bridge — connects [`Dashboard`] observables to TUI actions.
//!
//! Runs as a background task: forwards notifications, panel updates,
//! connection status, the busy flag and the active view as [`Action`]s
//! through the TUI's action channel until cancelled.

use strum::IntoEnumIterator;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use torbox_core::{Dashboard, DashboardEvent, Panel};

use crate::action::Action;

pub async fn spawn_data_bridge(
    dashboard: Dashboard,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut events = dashboard.events();
    let mut status = dashboard.connection_status();
    let mut busy = dashboard.busy();
    let mut view = dashboard.active_view();

    // Initial snapshots so screens have content immediately
    let _ = action_tx.send(Action::ConnectionChanged(*status.borrow_and_update()));
    let _ = action_tx.send(Action::BusyChanged(*busy.borrow_and_update()));
    let _ = action_tx.send(Action::ViewChanged(*view.borrow_and_update()));
    send_all_panels(&dashboard, &action_tx);

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            event = events.recv() => match event {
                Ok(DashboardEvent::Notify(n)) => {
                    let _ = action_tx.send(Action::Notify(n));
                }
                Ok(DashboardEvent::PanelUpdated(panel)) => {
                    let _ = action_tx.send(Action::PanelUpdated(panel, dashboard.panel(panel)));
                }
                Err(RecvError::Lagged(missed)) => {
                    warn!(missed, "event bridge lagged, resending panels");
                    send_all_panels(&dashboard, &action_tx);
                }
                Err(RecvError::Closed) => break,
            },
            Ok(()) = status.changed() => {
                let _ = action_tx.send(Action::ConnectionChanged(*status.borrow_and_update()));
            }
            Ok(()) = busy.changed() => {
                let _ = action_tx.send(Action::BusyChanged(*busy.borrow_and_update()));
            }
            Ok(()) = view.changed() => {
                let _ = action_tx.send(Action::ViewChanged(*view.borrow_and_update()));
            }
        }
    }

    debug!("data bridge shut down");
}

fn send_all_panels(dashboard: &Dashboard, action_tx: &mpsc::UnboundedSender<Action>) {
    for panel in Panel::iter() {
        let _ = action_tx.send(Action::PanelUpdated(panel, dashboard.panel(panel)));
    }
}
