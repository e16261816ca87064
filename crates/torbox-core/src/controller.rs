// ── Dashboard controller ──
//
// The session controller: owns the session, the gateway and the panel
// store, routes views and runs the resource loaders. Loaders never return
// errors; every outcome ends up in a panel or a notification.

use std::str::FromStr;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use strum::IntoEnumIterator;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use torbox_api::{
    ControlTorrentRequest, Endpoint, ResourceId, ServiceStats, TorboxClient, TorrentOperation,
    TransportConfig, UserProfile,
};

use crate::busy::BusyIndicator;
use crate::config::DashboardConfig;
use crate::error::CoreError;
use crate::gateway::Gateway;
use crate::model::{Panel, View};
use crate::notify::Notification;
use crate::outcome::RequestOutcome;
use crate::render::{
    self, PanelContent, Placeholder, download_rows, list_content, torrent_rows,
};
use crate::requests::{Confirmation, NewDownload, NewTorrent, Trigger};
use crate::session::{ConnectionStatus, Session};
use crate::store::{PanelStore, Ticket};

const EVENT_CHANNEL_SIZE: usize = 256;

// ── Events ───────────────────────────────────────────────────────────

/// Push notifications for the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    Notify(Notification),
    /// New content is available via [`Dashboard::panel`].
    PanelUpdated(Panel),
}

/// Destination for copied download links.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

/// Text of the confirmation prompt for a torrent operation.
pub fn confirmation_prompt(operation: TorrentOperation) -> String {
    format!("Are you sure you want to {operation} this torrent?")
}

// ── Dashboard ────────────────────────────────────────────────────────

/// The main entry point for frontends.
///
/// Cheaply cloneable via `Arc<DashboardInner>`. Every operation is safe to
/// run concurrently with any other.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<DashboardInner>,
}

struct DashboardInner {
    config: DashboardConfig,
    gateway: Gateway,
    store: PanelStore,
    active_view: watch::Sender<View>,
    event_tx: broadcast::Sender<DashboardEvent>,
}

impl Dashboard {
    /// Build a dashboard and its HTTP client from configuration.
    pub fn new(config: DashboardConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = TorboxClient::new(config.base_url.clone(), &config.api_prefix, &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Build a dashboard around an existing client.
    pub fn with_client(config: DashboardConfig, client: TorboxClient) -> Self {
        let session = Session::new();
        let gateway = Gateway::new(client, session, BusyIndicator::new());
        let (active_view, _) = watch::channel(View::default());
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);

        Self {
            inner: Arc::new(DashboardInner {
                config,
                gateway,
                store: PanelStore::new(),
                active_view,
                event_tx,
            }),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Session {
        self.inner.gateway.session()
    }

    pub fn gateway(&self) -> &Gateway {
        &self.inner.gateway
    }

    // ── Observables ──────────────────────────────────────────────────

    pub fn events(&self) -> broadcast::Receiver<DashboardEvent> {
        self.inner.event_tx.subscribe()
    }

    pub fn connection_status(&self) -> watch::Receiver<ConnectionStatus> {
        self.session().subscribe()
    }

    pub fn busy(&self) -> watch::Receiver<bool> {
        self.inner.gateway.busy().subscribe()
    }

    pub fn active_view(&self) -> watch::Receiver<View> {
        self.inner.active_view.subscribe()
    }

    pub fn current_view(&self) -> View {
        *self.inner.active_view.borrow()
    }

    /// Current content of a panel.
    pub fn panel(&self, panel: Panel) -> Arc<PanelContent> {
        self.inner.store.get(panel)
    }

    /// Bumped whenever any panel changes.
    pub fn panel_version(&self) -> watch::Receiver<u64> {
        self.inner.store.subscribe()
    }

    // ── Session management ───────────────────────────────────────────

    /// Replace the API key. When the key actually changes, panels that
    /// need a connection fall back to their connect placeholder and any
    /// in-flight render for them is dropped.
    pub fn set_api_key(&self, raw: &str) -> bool {
        let changed = self.session().set_api_key(raw);
        if changed {
            for panel in View::iter()
                .filter(|v| v.requires_connection())
                .flat_map(View::panels)
            {
                self.show_placeholder(*panel, Placeholder::connect(*panel));
            }
        }
        changed
    }

    /// Probe the API with the current key.
    ///
    /// On success the session becomes verified and the dashboard summary is
    /// loaded. Returns whether the probe succeeded.
    pub async fn test_connection(&self) -> bool {
        let session = self.session();
        if !session.has_api_key() {
            self.notify(Notification::warning("Please enter an API key"));
            return false;
        }

        let generation = session.generation();
        session.set_status(ConnectionStatus::Checking);
        let outcome = self
            .inner
            .gateway
            .get::<UserProfile>(&Endpoint::UserMe { settings: false })
            .await;

        if session.generation() != generation {
            debug!("api key changed during probe, result discarded");
            return false;
        }

        match outcome.error_message() {
            None => {
                session.set_status(ConnectionStatus::Connected);
                info!("connected to TorBox API");
                self.notify(Notification::success("Successfully connected to TorBox API"));
                self.load_dashboard(Trigger::Passive).await;
                true
            }
            Some(message) => {
                session.set_status(ConnectionStatus::Failed);
                warn!(%message, "connection test failed");
                self.notify(Notification::api_error(message));
                false
            }
        }
    }

    // ── View routing ─────────────────────────────────────────────────

    /// Activate the view called `name` and load its data.
    ///
    /// Unknown names are logged and ignored. Returns the activated view.
    pub async fn show_view(&self, name: &str) -> Option<View> {
        let Ok(view) = View::from_str(name.trim()) else {
            warn!(name, "unknown view requested");
            return None;
        };
        self.activate(view).await;
        Some(view)
    }

    /// Activate a known view and load its data.
    pub async fn activate(&self, view: View) {
        debug!(%view, "switching view");
        self.inner.active_view.send_replace(view);
        self.load_view(view, Trigger::Passive).await;
    }

    /// Run the loader(s) behind `view`.
    pub async fn load_view(&self, view: View, trigger: Trigger) {
        match view {
            View::Dashboard => self.load_dashboard(trigger).await,
            View::Torrents => self.load_torrents(trigger).await,
            View::WebDownloads => self.load_web_downloads(trigger).await,
            View::Usenet => self.load_usenet_downloads(trigger).await,
            View::Profile => self.load_profile(trigger).await,
            View::Status => self.load_service_status(trigger).await,
        }
    }

    /// Reload the active view on the user's behalf.
    pub async fn refresh(&self) {
        self.load_view(self.current_view(), Trigger::User).await;
    }

    // ── Resource loaders ─────────────────────────────────────────────

    /// Dashboard summary: account probe and service counters, fetched
    /// concurrently.
    pub async fn load_dashboard(&self, trigger: Trigger) {
        let panel = Panel::QuickStats;
        if !self.session().is_verified() {
            self.show_placeholder(panel, Placeholder::connect(panel));
            return;
        }

        let ticket = self.inner.store.ticket(panel);
        let gateway = &self.inner.gateway;
        let (user, stats) = tokio::join!(
            gateway.get::<UserProfile>(&Endpoint::UserMe { settings: false }),
            gateway.get::<ServiceStats>(&Endpoint::Stats),
        );

        if !user.is_success() && !stats.is_success() {
            self.report(trigger, &user);
        }
        self.commit(panel, ticket, render::quick_stats_content(&user, &stats));
    }

    pub async fn load_torrents(&self, trigger: Trigger) {
        self.load_list(Panel::Torrents, &Endpoint::TorrentList, torrent_rows, trigger)
            .await;
    }

    pub async fn load_web_downloads(&self, trigger: Trigger) {
        self.load_list(
            Panel::WebDownloads,
            &Endpoint::WebDownloadList,
            download_rows,
            trigger,
        )
        .await;
    }

    pub async fn load_usenet_downloads(&self, trigger: Trigger) {
        self.load_list(Panel::Usenet, &Endpoint::UsenetList, download_rows, trigger)
            .await;
    }

    pub async fn load_profile(&self, trigger: Trigger) {
        let panel = Panel::Profile;
        if !self.session().is_verified() {
            self.show_placeholder(panel, Placeholder::connect(panel));
            return;
        }

        let ticket = self.inner.store.ticket(panel);
        let outcome = self
            .inner
            .gateway
            .get::<UserProfile>(&Endpoint::UserMe { settings: true })
            .await;
        self.report(trigger, &outcome);
        self.commit(panel, ticket, render::profile_content(&outcome));
    }

    /// Service uptime and statistics. Public endpoints, so this runs
    /// whether or not the session is verified. Each panel renders on its own.
    pub async fn load_service_status(&self, trigger: Trigger) {
        let uptime_ticket = self.inner.store.ticket(Panel::Uptime);
        let stats_ticket = self.inner.store.ticket(Panel::ServiceStats);
        let gateway = &self.inner.gateway;
        let (uptime, stats) = tokio::join!(
            gateway.get::<serde_json::Value>(&Endpoint::UpStatus),
            gateway.get::<ServiceStats>(&Endpoint::Stats),
        );

        self.report(trigger, &uptime);
        if uptime.is_success() {
            self.report(trigger, &stats);
        }
        self.commit(Panel::Uptime, uptime_ticket, render::uptime_content(&uptime));
        self.commit(
            Panel::ServiceStats,
            stats_ticket,
            render::service_stats_content(&stats),
        );
    }

    async fn load_list<T: DeserializeOwned>(
        &self,
        panel: Panel,
        endpoint: &Endpoint,
        build: fn(&[T]) -> PanelContent,
        trigger: Trigger,
    ) {
        if !self.session().is_verified() {
            self.show_placeholder(panel, Placeholder::connect(panel));
            return;
        }

        let ticket = self.inner.store.ticket(panel);
        let outcome = self.inner.gateway.get::<Vec<T>>(endpoint).await;
        self.report(trigger, &outcome);
        self.commit(panel, ticket, list_content(panel, &outcome, build));
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Add a torrent from a magnet link. Returns whether it was accepted.
    pub async fn create_torrent(&self, form: &NewTorrent) -> bool {
        if form.magnet.trim().is_empty() {
            self.notify(Notification::warning("Magnet link is required"));
            return false;
        }
        let outcome = self
            .inner
            .gateway
            .post::<serde_json::Value, _>(&Endpoint::CreateTorrent, &form.to_request())
            .await;
        if self.settle(&outcome, "Torrent added successfully") {
            self.load_torrents(Trigger::Passive).await;
            return true;
        }
        false
    }

    pub async fn create_web_download(&self, form: &NewDownload) -> bool {
        if form.url.trim().is_empty() {
            self.notify(Notification::warning("URL is required"));
            return false;
        }
        let outcome = self
            .inner
            .gateway
            .post::<serde_json::Value, _>(&Endpoint::CreateWebDownload, &form.to_request())
            .await;
        if self.settle(&outcome, "Web download added successfully") {
            self.load_web_downloads(Trigger::Passive).await;
            return true;
        }
        false
    }

    pub async fn create_usenet_download(&self, form: &NewDownload) -> bool {
        if form.url.trim().is_empty() {
            self.notify(Notification::warning("NZB URL is required"));
            return false;
        }
        let outcome = self
            .inner
            .gateway
            .post::<serde_json::Value, _>(&Endpoint::CreateUsenetDownload, &form.to_request())
            .await;
        if self.settle(&outcome, "Usenet download added successfully") {
            self.load_usenet_downloads(Trigger::Passive).await;
            return true;
        }
        false
    }

    /// Resume, pause or delete a torrent. Nothing is sent unless the
    /// operation was confirmed.
    pub async fn control_torrent(
        &self,
        torrent_id: &ResourceId,
        operation: TorrentOperation,
        confirmation: Confirmation,
    ) -> bool {
        if confirmation == Confirmation::Denied {
            debug!(%torrent_id, %operation, "torrent operation not confirmed");
            return false;
        }
        let request = ControlTorrentRequest {
            torrent_id: torrent_id.clone(),
            operation,
        };
        let outcome = self
            .inner
            .gateway
            .post::<serde_json::Value, _>(&Endpoint::ControlTorrent, &request)
            .await;
        if self.settle(&outcome, &format!("Torrent {operation} successful")) {
            self.load_torrents(Trigger::Passive).await;
            return true;
        }
        false
    }

    /// Fetch a torrent's download link and copy it. When the clipboard is
    /// unavailable the link is shown in the notification instead.
    pub async fn request_download_link(
        &self,
        torrent_id: &ResourceId,
        clipboard: &dyn Clipboard,
    ) -> Option<String> {
        let endpoint = Endpoint::RequestDownload {
            torrent_id: torrent_id.to_string(),
        };
        let outcome = self.inner.gateway.get::<String>(&endpoint).await;
        let link = match outcome {
            RequestOutcome::Success(Some(link)) if !link.is_empty() => link,
            RequestOutcome::Success(_) => {
                self.notify(Notification::warning("No download link available"));
                return None;
            }
            failed => {
                self.report(Trigger::User, &failed);
                return None;
            }
        };

        match clipboard.write_text(&link) {
            Ok(()) => self.notify(Notification::success("Download link copied to clipboard!")),
            Err(e) => {
                debug!(error = %e, "clipboard unavailable");
                self.notify(Notification::info(format!("Download link: {link}")));
            }
        }
        Some(link)
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn notify(&self, notification: Notification) {
        debug!(level = %notification.level, message = %notification.message, "notify");
        // No receivers simply means no frontend is listening.
        let _ = self.inner.event_tx.send(DashboardEvent::Notify(notification));
    }

    /// Error notification for a failed user-initiated request.
    fn report<T>(&self, trigger: Trigger, outcome: &RequestOutcome<T>) {
        if trigger != Trigger::User {
            return;
        }
        if let Some(message) = outcome.error_message() {
            self.notify(Notification::api_error(message));
        }
    }

    /// Notify the result of a mutation. Returns whether it succeeded.
    fn settle<T>(&self, outcome: &RequestOutcome<T>, success: &str) -> bool {
        match outcome.error_message() {
            None => {
                self.notify(Notification::success(success));
                true
            }
            Some(message) => {
                self.notify(Notification::api_error(message));
                false
            }
        }
    }

    fn show_placeholder(&self, panel: Panel, placeholder: Placeholder) {
        self.inner
            .store
            .replace(panel, PanelContent::Placeholder(placeholder));
        let _ = self.inner.event_tx.send(DashboardEvent::PanelUpdated(panel));
    }

    fn commit(&self, panel: Panel, ticket: Ticket, content: PanelContent) {
        if self.inner.store.commit(panel, ticket, content) {
            let _ = self.inner.event_tx.send(DashboardEvent::PanelUpdated(panel));
        } else {
            debug!(%panel, "newer load in flight, stale render dropped");
        }
    }
}
