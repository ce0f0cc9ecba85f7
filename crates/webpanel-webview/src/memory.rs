//! State that outlives individual guest surfaces.
//!
//! Holds the last URL worth reloading and whether it has already been used
//! for a load. The panel controller owns one `SharedMemory` and hands a
//! clone to every guest surface it builds.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistentMemory {
    pub remembered_url: Option<String>,
    pub remembered_url_consumed: bool,
}

impl PersistentMemory {
    /// Returns the remembered URL if it has not been used yet, marking it used.
    pub fn take_start_url(&mut self) -> Option<String> {
        if self.remembered_url_consumed {
            return None;
        }
        let url = self.remembered_url.clone()?;
        self.remembered_url_consumed = true;
        Some(url)
    }

    /// Called when the guest client reports it is responsive. A URL that has
    /// already been used is forgotten.
    pub fn on_client_responsive(&mut self) {
        if self.remembered_url_consumed {
            self.remembered_url = None;
            self.remembered_url_consumed = false;
        }
    }

    pub fn remember_url(&mut self, url: impl Into<String>) {
        self.remembered_url = Some(url.into());
        self.remembered_url_consumed = false;
    }
}

#[derive(Debug, Clone, Default)]
pub struct SharedMemory(Arc<Mutex<PersistentMemory>>);

impl SharedMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PersistentMemory> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn take_start_url(&self) -> Option<String> {
        let url = self.lock().take_start_url();
        if let Some(url) = &url {
            debug!(url = %url, "using remembered URL");
        }
        url
    }

    pub fn on_client_responsive(&self) {
        self.lock().on_client_responsive();
    }

    pub fn remember_url(&self, url: impl Into<String>) {
        let url = url.into();
        debug!(url = %url, "remembering URL for next load");
        self.lock().remember_url(url);
    }

    pub fn snapshot(&self) -> PersistentMemory {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_memory_has_no_start_url() {
        let mut memory = PersistentMemory::default();
        assert_eq!(memory.take_start_url(), None);
        assert!(!memory.remembered_url_consumed);
    }

    #[test]
    fn remembered_url_is_used_once() {
        let mut memory = PersistentMemory::default();
        memory.remember_url("https://panel.example.com/thread/1");
        assert_eq!(
            memory.take_start_url().as_deref(),
            Some("https://panel.example.com/thread/1")
        );
        assert_eq!(memory.take_start_url(), None);
    }

    #[test]
    fn responsive_after_use_clears() {
        let mut memory = PersistentMemory::default();
        memory.remember_url("https://panel.example.com/a");
        memory.take_start_url();
        memory.on_client_responsive();
        assert_eq!(memory, PersistentMemory::default());
    }

    #[test]
    fn responsive_before_use_keeps_url() {
        let mut memory = PersistentMemory::default();
        memory.remember_url("https://panel.example.com/a");
        memory.on_client_responsive();
        assert_eq!(
            memory.take_start_url().as_deref(),
            Some("https://panel.example.com/a")
        );
    }

    #[test]
    fn remember_resets_consumed_flag() {
        let mut memory = PersistentMemory::default();
        memory.remember_url("https://panel.example.com/a");
        memory.take_start_url();
        memory.remember_url("https://panel.example.com/b");
        assert!(!memory.remembered_url_consumed);
        assert_eq!(
            memory.take_start_url().as_deref(),
            Some("https://panel.example.com/b")
        );
    }

    #[test]
    fn shared_memory_clones_share_state() {
        let a = SharedMemory::new();
        let b = a.clone();
        a.remember_url("https://panel.example.com/x");
        assert_eq!(
            b.take_start_url().as_deref(),
            Some("https://panel.example.com/x")
        );
        assert!(a.snapshot().remembered_url_consumed);
    }
}
