// ── Domain model ──
//
// Navigation targets, panels and download status classification. Wire
// types live in `torbox_api::models`; these are the dashboard's own.

pub mod status;
pub mod view;

pub use status::{DownloadStatus, StatusTone};
pub use view::{Panel, View};
