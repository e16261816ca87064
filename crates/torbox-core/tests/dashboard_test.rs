#![allow(clippy::unwrap_used)]
// End-to-end tests for `Dashboard` against a wiremock TorBox API.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;
use tokio::sync::broadcast;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use torbox_api::{Endpoint, TorboxClient, TransportConfig};
use torbox_core::{
    Clipboard, Confirmation, ConnectionStatus, Dashboard, DashboardConfig, DashboardEvent,
    NewDownload, NewTorrent, Notification, NotificationLevel, Panel, PanelContent,
    PlaceholderKind, RequestOutcome, ResourceId, TorrentOperation, Trigger, View,
    confirmation_prompt,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn api_path(suffix: &str) -> String {
    format!("/v1/api/{suffix}")
}

fn dashboard_for(base: &str) -> Dashboard {
    let base_url = Url::parse(base).unwrap();
    let client = TorboxClient::new(base_url.clone(), "/v1/api", &TransportConfig::default())
        .unwrap();
    Dashboard::with_client(DashboardConfig::new(base_url), client)
}

async fn setup() -> (MockServer, Dashboard, broadcast::Receiver<DashboardEvent>) {
    let server = MockServer::start().await;
    let dashboard = dashboard_for(&server.uri());
    let events = dashboard.events();
    (server, dashboard, events)
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "success": true, "data": data }))
}

/// Mount the account probe and quick-stats endpoints, then connect.
async fn connect(server: &MockServer, dashboard: &Dashboard) {
    Mock::given(method("GET"))
        .and(path(api_path("user/me")))
        .respond_with(ok(json!({ "id": 1, "email": "user@example.com", "plan": 2 })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("general/getstats")))
        .respond_with(ok(json!({ "total_torrents": 12, "total_downloads": 34 })))
        .mount(server)
        .await;

    dashboard.set_api_key("tb-test-key");
    assert!(dashboard.test_connection().await);
}

fn notifications(events: &mut broadcast::Receiver<DashboardEvent>) -> Vec<Notification> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let DashboardEvent::Notify(n) = event {
            out.push(n);
        }
    }
    out
}

fn placeholder_message(dashboard: &Dashboard, panel: Panel) -> Option<String> {
    dashboard
        .panel(panel)
        .placeholder()
        .map(|p| p.message.clone())
}

struct RecordingClipboard {
    fail: bool,
    written: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    fn new(fail: bool) -> Self {
        Self {
            fail,
            written: Mutex::new(Vec::new()),
        }
    }
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if self.fail {
            return Err("no display".into());
        }
        self.written.lock().unwrap().push(text.to_owned());
        Ok(())
    }
}

// ── Connection ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_connection_without_key_warns() {
    let (server, dashboard, mut events) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!dashboard.test_connection().await);
    assert_eq!(
        notifications(&mut events),
        vec![Notification::warning("Please enter an API key")]
    );
    assert!(!dashboard.session().is_verified());
}

#[tokio::test]
async fn test_connection_success_loads_quick_stats() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;

    assert_eq!(dashboard.session().status(), ConnectionStatus::Connected);
    assert_eq!(
        notifications(&mut events),
        vec![Notification::success("Successfully connected to TorBox API")]
    );

    let PanelContent::Stats(stats) = &*dashboard.panel(Panel::QuickStats) else {
        panic!("expected quick stats");
    };
    let labels: Vec<&str> = stats.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Email", "Plan", "Total Torrents", "Total Downloads"]);
    assert_eq!(stats.items[1].value, "Pro");
    assert_eq!(stats.items[3].value, "34");
}

#[tokio::test]
async fn test_connection_rejected_key() {
    let (server, dashboard, mut events) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("user/me")))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "success": false, "error": "BAD_TOKEN" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("general/getstats")))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    dashboard.set_api_key("wrong");
    assert!(!dashboard.test_connection().await);

    assert!(!dashboard.session().is_verified());
    assert_eq!(dashboard.session().status(), ConnectionStatus::Failed);
    assert_eq!(dashboard.session().status().label(), "Connection Failed");
    assert_eq!(
        notifications(&mut events),
        vec![Notification::api_error("BAD_TOKEN")]
    );
    assert_eq!(dashboard.current_view(), View::Dashboard);
    assert_eq!(
        dashboard.panel(Panel::QuickStats).placeholder().map(|p| p.kind),
        Some(PlaceholderKind::Connect)
    );
}

#[tokio::test]
async fn test_key_change_drops_verification_and_panels() {
    let (server, dashboard, _events) = setup().await;
    connect(&server, &dashboard).await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([{ "id": 1, "name": "a" }])))
        .mount(&server)
        .await;
    dashboard.show_view("torrents").await;
    assert_eq!(dashboard.panel(Panel::Torrents).row_count(), 1);

    assert!(dashboard.set_api_key("  another-key "));
    assert_eq!(dashboard.session().status(), ConnectionStatus::Disconnected);
    assert_eq!(
        placeholder_message(&dashboard, Panel::Torrents).as_deref(),
        Some("Connect your API key to view torrents")
    );
}

#[tokio::test]
async fn test_recheck_keeps_views_loading() {
    let (server, dashboard, _events) = setup().await;

    // Two fast answers for the first connect and its dashboard load, then a
    // slow one for the re-check.
    Mock::given(method("GET"))
        .and(path(api_path("user/me")))
        .respond_with(ok(json!({ "id": 1, "email": "user@example.com" })))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("user/me")))
        .respond_with(
            ok(json!({ "id": 1, "email": "user@example.com" }))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("general/getstats")))
        .respond_with(ok(json!({ "total_torrents": 1 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([{ "id": 1, "name": "a" }])))
        .mount(&server)
        .await;

    dashboard.set_api_key("tb-test-key");
    assert!(dashboard.test_connection().await);

    let recheck = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.test_connection().await })
    };

    let me_path = api_path("user/me");
    loop {
        let received = server.received_requests().await.unwrap();
        if received.iter().filter(|r| r.url.path() == me_path).count() >= 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(dashboard.session().status(), ConnectionStatus::Checking);
    assert!(dashboard.session().is_verified());

    dashboard.show_view("torrents").await;
    assert_eq!(dashboard.panel(Panel::Torrents).row_count(), 1);

    assert!(recheck.await.unwrap());
    assert_eq!(dashboard.session().status(), ConnectionStatus::Connected);
}

// ── Gateway ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_precondition_sends_nothing() {
    let (server, dashboard, _events) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut busy = dashboard.busy();
    let outcome = dashboard
        .gateway()
        .get::<serde_json::Value>(&Endpoint::TorrentList)
        .await;

    assert_eq!(
        outcome,
        RequestOutcome::PreconditionFailed("API key required".into())
    );
    assert!(busy.has_changed().unwrap());
    assert!(!*busy.borrow_and_update());
}

#[tokio::test]
async fn test_busy_round_trip() {
    let (server, dashboard, _events) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("general/getupstatus")))
        .respond_with(ok(json!({ "status": "up" })).set_delay(Duration::from_millis(200)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("general/getstats")))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "success": false, "error": "boom" }))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let mut busy = dashboard.busy();
    assert!(!*busy.borrow_and_update());

    let task = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.load_service_status(Trigger::Passive).await })
    };

    busy.changed().await.unwrap();
    assert!(*busy.borrow_and_update());

    task.await.unwrap();
    assert!(!*busy.borrow_and_update());
    assert_eq!(dashboard.gateway().busy().in_flight(), 0);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let dashboard = dashboard_for("http://127.0.0.1:9");

    let outcome = dashboard
        .gateway()
        .get::<serde_json::Value>(&Endpoint::Stats)
        .await;

    assert!(matches!(outcome, RequestOutcome::TransportError(_)), "got: {outcome:?}");
    assert!(!dashboard.gateway().busy().is_busy());
}

// ── View routing ────────────────────────────────────────────────────

#[tokio::test]
async fn test_unverified_views_render_connect_placeholder() {
    let (server, dashboard, _events) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    dashboard.set_api_key("present-but-unverified");
    assert_eq!(dashboard.show_view("torrents").await, Some(View::Torrents));

    assert_eq!(dashboard.current_view(), View::Torrents);
    assert_eq!(
        placeholder_message(&dashboard, Panel::Torrents).as_deref(),
        Some("Connect your API key to view torrents")
    );

    dashboard.show_view("profile").await;
    assert_eq!(
        placeholder_message(&dashboard, Panel::Profile).as_deref(),
        Some("Connect your API key to view profile information")
    );
}

#[tokio::test]
async fn test_unknown_view_is_ignored() {
    let (_server, dashboard, _events) = setup().await;
    let mut view = dashboard.active_view();

    assert_eq!(dashboard.show_view("settings").await, None);

    assert_eq!(dashboard.current_view(), View::Dashboard);
    assert!(!view.has_changed().unwrap());
}

#[tokio::test]
async fn test_status_view_loads_while_unverified() {
    let (server, dashboard, _events) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("general/getupstatus")))
        .respond_with(ok(json!({ "status": "up" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("general/getstats")))
        .respond_with(ok(json!({ "total_downloads": 5 })))
        .expect(1)
        .mount(&server)
        .await;

    dashboard.show_view("status").await;

    let PanelContent::Uptime(uptime) = &*dashboard.panel(Panel::Uptime) else {
        panic!("expected uptime view");
    };
    assert!(uptime.operational);
    assert_eq!(uptime.headline, "Service is operational");

    let PanelContent::Stats(stats) = &*dashboard.panel(Panel::ServiceStats) else {
        panic!("expected stats view");
    };
    assert_eq!(stats.items[0].label, "TOTAL DOWNLOADS");
    assert_eq!(stats.items[0].value, "5");
}

#[tokio::test]
async fn test_status_view_reports_degraded_service() {
    let (server, dashboard, _events) = setup().await;

    Mock::given(method("GET"))
        .and(path(api_path("general/getupstatus")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false, "detail": "Maintenance" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("general/getstats")))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    dashboard.show_view("status").await;

    let PanelContent::Uptime(uptime) = &*dashboard.panel(Panel::Uptime) else {
        panic!("expected uptime view");
    };
    assert!(!uptime.operational);
    assert_eq!(uptime.headline, "Service issues detected");
    assert_eq!(
        placeholder_message(&dashboard, Panel::ServiceStats).as_deref(),
        Some("Could not load statistics")
    );
}

#[tokio::test]
async fn test_show_view_is_idempotent() {
    let (server, dashboard, _events) = setup().await;
    connect(&server, &dashboard).await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([
            { "id": 1, "name": "one", "size": 1536, "download_state": "seeding" },
            { "id": 2, "name": "two", "progress": 0.5, "download_state": "paused" }
        ])))
        .expect(2)
        .mount(&server)
        .await;

    dashboard.show_view("torrents").await;
    let first = dashboard.panel(Panel::Torrents);
    dashboard.show_view("torrents").await;
    let second = dashboard.panel(Panel::Torrents);

    assert_eq!(*first, *second);
    assert_eq!(second.row_count(), 2);
}

// ── Loaders ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_torrent_list() {
    let (server, dashboard, _events) = setup().await;
    connect(&server, &dashboard).await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([])))
        .mount(&server)
        .await;

    dashboard.show_view("torrents").await;

    let content = dashboard.panel(Panel::Torrents);
    let placeholder = content.placeholder().unwrap();
    assert_eq!(placeholder.kind, PlaceholderKind::Empty);
    assert_eq!(placeholder.message, "No torrents found");
}

#[tokio::test]
async fn test_malformed_torrent_item_keeps_list() {
    let (server, dashboard, _events) = setup().await;
    connect(&server, &dashboard).await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([
            { "id": 1, "name": "good.iso", "size": 1024, "eta": 12.5 },
            { "name": "no-id.iso", "size": "2048", "progress": "half" }
        ])))
        .mount(&server)
        .await;

    dashboard.show_view("torrents").await;

    let PanelContent::Torrents(rows) = &*dashboard.panel(Panel::Torrents) else {
        panic!("expected torrent rows");
    };
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].actions.len(), 4);
    assert_eq!(rows[1].name, "no-id.iso");
    assert_eq!(rows[1].size, "2 KB");
    assert!(rows[1].actions.is_empty());
}

#[tokio::test]
async fn test_failed_load_notifies_only_when_user_initiated() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);

    Mock::given(method("GET"))
        .and(path(api_path("webdl/mylist")))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "DATABASE_ERROR" })))
        .mount(&server)
        .await;

    dashboard.show_view("webdownloads").await;
    assert!(notifications(&mut events).is_empty());
    assert_eq!(
        placeholder_message(&dashboard, Panel::WebDownloads).as_deref(),
        Some("Failed to load web downloads")
    );

    dashboard.refresh().await;
    assert_eq!(
        notifications(&mut events),
        vec![Notification::api_error("DATABASE_ERROR")]
    );
}

#[tokio::test]
async fn test_usenet_rows() {
    let (server, dashboard, _events) = setup().await;
    connect(&server, &dashboard).await;

    Mock::given(method("GET"))
        .and(path(api_path("usenet/mylist")))
        .respond_with(ok(json!([
            { "id": "u1", "name": "linux.nzb", "download_state": "completed", "size": 2048 }
        ])))
        .mount(&server)
        .await;

    dashboard.show_view("usenet").await;

    let PanelContent::Downloads(rows) = &*dashboard.panel(Panel::Usenet) else {
        panic!("expected download rows");
    };
    assert_eq!(rows[0].name, "linux.nzb");
    assert_eq!(rows[0].size, "2 KB");
    assert_eq!(rows[0].id, ResourceId::Text("u1".into()));
}

#[tokio::test]
async fn test_profile_view() {
    let (server, dashboard, _events) = setup().await;
    connect(&server, &dashboard).await;

    dashboard.show_view("profile").await;

    let PanelContent::Profile(profile) = &*dashboard.panel(Panel::Profile) else {
        panic!("expected profile view");
    };
    assert_eq!(profile.fields[0].label, "Email");
    assert_eq!(profile.fields[0].value, "user@example.com");
    assert!(profile.raw_json.contains("\"plan\": 2"));
}

#[tokio::test]
async fn test_stale_render_is_dropped() {
    let (server, dashboard, _events) = setup().await;
    connect(&server, &dashboard).await;

    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([{ "id": 1, "name": "old" }])).set_delay(Duration::from_millis(300)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([{ "id": 2, "name": "new" }])))
        .mount(&server)
        .await;

    let slow = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.load_torrents(Trigger::Passive).await })
    };

    // Wait until the slow request has reached the server.
    let list_path = api_path("torrents/mylist");
    loop {
        let received = server.received_requests().await.unwrap();
        if received.iter().any(|r| r.url.path() == list_path) {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    dashboard.load_torrents(Trigger::Passive).await;
    slow.await.unwrap();

    let PanelContent::Torrents(rows) = &*dashboard.panel(Panel::Torrents) else {
        panic!("expected torrent rows");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "new");
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_magnet_is_rejected_locally() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);

    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let form = NewTorrent {
        magnet: "   ".into(),
        ..NewTorrent::default()
    };
    assert!(!dashboard.create_torrent(&form).await);
    assert_eq!(
        notifications(&mut events),
        vec![Notification::warning("Magnet link is required")]
    );
}

#[tokio::test]
async fn test_create_torrent_reloads_list() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);

    Mock::given(method("POST"))
        .and(path(api_path("torrents/createtorrent")))
        .and(body_json(json!({
            "magnet": "magnet:?xt=urn:btih:abc",
            "name": "My torrent",
            "seed": 1,
            "allow_zip": 1
        })))
        .respond_with(ok(json!({ "torrent_id": 9 })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([{ "id": 9, "name": "My torrent" }])))
        .expect(1)
        .mount(&server)
        .await;

    let form = NewTorrent {
        magnet: "magnet:?xt=urn:btih:abc".into(),
        name: "My torrent".into(),
        seed: true,
        allow_zip: true,
    };
    assert!(dashboard.create_torrent(&form).await);
    assert_eq!(
        notifications(&mut events),
        vec![Notification::success("Torrent added successfully")]
    );
    assert_eq!(dashboard.panel(Panel::Torrents).row_count(), 1);
}

#[tokio::test]
async fn test_download_forms_validate_urls() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);

    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    assert!(!dashboard.create_web_download(&NewDownload::default()).await);
    assert!(!dashboard.create_usenet_download(&NewDownload::default()).await);
    assert_eq!(
        notifications(&mut events),
        vec![
            Notification::warning("URL is required"),
            Notification::warning("NZB URL is required"),
        ]
    );
}

#[tokio::test]
async fn test_failed_mutation_does_not_reload() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);

    Mock::given(method("POST"))
        .and(path(api_path("usenet/createusenetdownload")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "detail": "Invalid NZB" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("usenet/mylist")))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let form = NewDownload {
        url: "https://example.com/file.nzb".into(),
        name: String::new(),
    };
    assert!(!dashboard.create_usenet_download(&form).await);
    assert_eq!(
        notifications(&mut events),
        vec![Notification::api_error("Invalid NZB")]
    );
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);

    Mock::given(method("POST"))
        .and(path(api_path("torrents/controltorrent")))
        .and(body_json(json!({ "torrent_id": 7, "operation": "delete" })))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api_path("torrents/mylist")))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let id = ResourceId::Number(7);
    assert_eq!(
        confirmation_prompt(TorrentOperation::Delete),
        "Are you sure you want to delete this torrent?"
    );

    assert!(
        !dashboard
            .control_torrent(&id, TorrentOperation::Delete, Confirmation::Denied)
            .await
    );
    assert!(notifications(&mut events).is_empty());

    assert!(
        dashboard
            .control_torrent(&id, TorrentOperation::Delete, Confirmation::Granted)
            .await
    );
    assert_eq!(
        notifications(&mut events),
        vec![Notification::success("Torrent delete successful")]
    );
    assert_eq!(
        placeholder_message(&dashboard, Panel::Torrents).as_deref(),
        Some("No torrents found")
    );
}

// ── Download links ──────────────────────────────────────────────────

async fn mount_download_link(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(api_path("torrents/requestdl")))
        .respond_with(ok(json!("https://cdn.example/file.zip")))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_download_link_copied() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);
    mount_download_link(&server).await;

    let clipboard = RecordingClipboard::new(false);
    let link = dashboard
        .request_download_link(&ResourceId::Number(3), &clipboard)
        .await;

    assert_eq!(link.as_deref(), Some("https://cdn.example/file.zip"));
    assert_eq!(
        *clipboard.written.lock().unwrap(),
        vec!["https://cdn.example/file.zip".to_owned()]
    );
    assert_eq!(
        notifications(&mut events),
        vec![Notification::success("Download link copied to clipboard!")]
    );
}

#[tokio::test]
async fn test_download_link_clipboard_fallback() {
    let (server, dashboard, mut events) = setup().await;
    connect(&server, &dashboard).await;
    notifications(&mut events);
    mount_download_link(&server).await;

    let clipboard = RecordingClipboard::new(true);
    dashboard
        .request_download_link(&ResourceId::Number(3), &clipboard)
        .await;

    let notes = notifications(&mut events);
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].level, NotificationLevel::Info);
    assert_eq!(notes[0].message, "Download link: https://cdn.example/file.zip");
}
