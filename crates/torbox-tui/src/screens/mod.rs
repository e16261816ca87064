//! One screen per navigable view.

pub mod dashboard;
pub mod downloads;
pub mod profile;
pub mod status;
pub mod torrents;

use torbox_core::View;

use crate::component::Component;

use self::downloads::Queue;

/// Create every screen, keyed by the view it renders.
pub fn create_screens() -> Vec<(View, Box<dyn Component>)> {
    vec![
        (View::Dashboard, Box::new(dashboard::DashboardScreen::new())),
        (View::Torrents, Box::new(torrents::TorrentsScreen::new())),
        (
            View::WebDownloads,
            Box::new(downloads::DownloadsScreen::new(Queue::Web)),
        ),
        (
            View::Usenet,
            Box::new(downloads::DownloadsScreen::new(Queue::Usenet)),
        ),
        (View::Profile, Box::new(profile::ProfileScreen::new())),
        (View::Status, Box::new(status::StatusScreen::new())),
    ]
}
