//! System clipboard for download links.

use std::sync::{Mutex, PoisonError};

use torbox_core::Clipboard;

/// What [`SystemClipboard`] needs from a platform clipboard.
pub trait Backend: Sized + Send {
    fn open() -> Result<Self, arboard::Error>;
    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error>;
}

impl Backend for arboard::Clipboard {
    fn open() -> Result<Self, arboard::Error> {
        arboard::Clipboard::new()
    }

    fn set_text(&mut self, text: &str) -> Result<(), arboard::Error> {
        arboard::Clipboard::set_text(self, text)
    }
}

/// Platform clipboard, opened on first use and kept for the life of the
/// app. On X11 and Wayland the copied text only stays available while the
/// handle that set it is alive. A failed write drops the handle so the
/// next one reopens it; headless sessions keep failing, and the dashboard
/// falls back to showing the link.
pub struct SystemClipboard<B = arboard::Clipboard> {
    handle: Mutex<Option<B>>,
}

impl<B: Backend> SystemClipboard<B> {
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
        }
    }
}

impl<B: Backend> Default for SystemClipboard<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Clipboard for SystemClipboard<B> {
    fn write_text(&self, text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut slot = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        let mut handle = match slot.take() {
            Some(handle) => handle,
            None => B::open()?,
        };
        handle.set_text(text)?;
        *slot = Some(handle);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use super::*;

    static OPENS: AtomicUsize = AtomicUsize::new(0);
    static FAIL_NEXT: AtomicBool = AtomicBool::new(false);

    struct CountingBackend {
        text: String,
    }

    impl Backend for CountingBackend {
        fn open() -> Result<Self, arboard::Error> {
            OPENS.fetch_add(1, Ordering::SeqCst);
            Ok(Self {
                text: String::new(),
            })
        }

        fn set_text(&mut self, text: &str) -> Result<(), arboard::Error> {
            if FAIL_NEXT.swap(false, Ordering::SeqCst) {
                return Err(arboard::Error::ClipboardOccupied);
            }
            self.text = text.to_owned();
            Ok(())
        }
    }

    #[test]
    fn handle_is_kept_between_writes_and_reopened_after_failure() {
        let clipboard = SystemClipboard::<CountingBackend>::new();

        clipboard.write_text("https://a").unwrap();
        clipboard.write_text("https://b").unwrap();
        assert_eq!(OPENS.load(Ordering::SeqCst), 1);
        assert_eq!(
            clipboard.handle.lock().unwrap().as_ref().map(|h| h.text.as_str()),
            Some("https://b")
        );

        FAIL_NEXT.store(true, Ordering::SeqCst);
        assert!(clipboard.write_text("https://c").is_err());
        assert!(clipboard.handle.lock().unwrap().is_none());

        clipboard.write_text("https://d").unwrap();
        assert_eq!(OPENS.load(Ordering::SeqCst), 2);
    }
}
