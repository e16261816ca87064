// ── Operation inputs ──
//
// Values the frontend hands to `Dashboard` operations. They mirror the
// create forms and the confirmation dialog, not the wire bodies.

use torbox_api::{CreateDownloadRequest, CreateTorrentRequest};

/// Who asked for a load. Only user-initiated loads report failures as
/// notifications; the panel placeholder covers passive ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    User,
    #[default]
    Passive,
}

/// Answer to a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Denied,
}

impl From<bool> for Confirmation {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// The add-torrent form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTorrent {
    pub magnet: String,
    pub name: String,
    pub seed: bool,
    pub allow_zip: bool,
}

impl NewTorrent {
    pub(crate) fn to_request(&self) -> CreateTorrentRequest {
        CreateTorrentRequest {
            magnet: self.magnet.trim().to_owned(),
            name: self.name.trim().to_owned(),
            seed: u8::from(self.seed),
            allow_zip: u8::from(self.allow_zip),
        }
    }
}

/// The add-web-download and add-usenet-download forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDownload {
    pub url: String,
    pub name: String,
}

impl NewDownload {
    pub(crate) fn to_request(&self) -> CreateDownloadRequest {
        CreateDownloadRequest {
            url: self.url.trim().to_owned(),
            name: self.name.trim().to_owned(),
        }
    }
}
