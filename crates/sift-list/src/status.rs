//! Transient status message with a single scoped expiry timer.

use std::time::Duration;

use futures::future::{AbortHandle, Abortable};
use sift_core::Command;
use tracing::debug;

/// How long a status message stays up by default.
pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(1);

/// A status line that clears itself after a lifetime.
///
/// Each [`show`](StatusMessage::show) bumps a generation id and aborts the
/// previous timer, so at most one timer is ever pending. Expiry messages
/// carry the generation they were scheduled for; stale ones are ignored.
#[derive(Debug)]
pub struct StatusMessage {
    text: Option<String>,
    lifetime: Duration,
    generation: u64,
    timer: Option<AbortHandle>,
}

impl Default for StatusMessage {
    fn default() -> Self {
        Self::new(DEFAULT_LIFETIME)
    }
}

impl StatusMessage {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            text: None,
            lifetime,
            generation: 0,
            timer: None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    pub fn set_lifetime(&mut self, lifetime: Duration) {
        self.lifetime = lifetime;
    }

    /// Generation of the message currently shown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Show `text` and schedule its expiry.
    ///
    /// The returned command resolves to `on_expire(generation)` after the
    /// lifetime, or immediately if a newer message replaced this one first.
    pub fn show<Msg: Send + 'static>(
        &mut self,
        text: impl Into<String>,
        on_expire: impl FnOnce(u64) -> Msg + Send + 'static,
    ) -> Command<Msg> {
        self.cancel_timer();
        self.generation = self.generation.wrapping_add(1);
        self.text = Some(text.into());

        let (handle, registration) = AbortHandle::new_pair();
        self.timer = Some(handle);
        let id = self.generation;
        let lifetime = self.lifetime;
        debug!(id, ?lifetime, "status timer scheduled");
        // The sleep is created lazily so that scheduling needs no runtime.
        let sleep = async move { tokio::time::sleep(lifetime).await };
        Command::perform(Abortable::new(sleep, registration), move |_| {
            on_expire(id)
        })
    }

    /// Clear the message if `id` is still current. Returns whether it cleared.
    pub fn expire(&mut self, id: u64) -> bool {
        if id != self.generation || self.text.is_none() {
            return false;
        }
        debug!(id, "status message expired");
        self.timer = None;
        self.text = None;
        true
    }

    /// Clear the message now and release its timer.
    pub fn hide(&mut self) {
        self.cancel_timer();
        self.text = None;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
