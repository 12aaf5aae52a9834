use futures_channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use tracing::warn;

use super::route::Route;

/// Messages a screen sends up to the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Navigate(Route),
    /// The user is no longer in a room; the landing screen forgets its code.
    LeftRoom,
    /// Full navigation away from the client, e.g. the playback authorization page.
    ExternalRedirect(String),
}

pub type EventReceiver = UnboundedReceiver<AppEvent>;

#[derive(Debug, Clone)]
pub struct EventSender {
    inner: UnboundedSender<AppEvent>,
}

impl EventSender {
    pub fn emit(&self, event: AppEvent) {
        if let Err(e) = self.inner.unbounded_send(event) {
            warn!("Dropping {:?}, app shell is gone", e.into_inner());
        }
    }
}

pub fn channel() -> (EventSender, EventReceiver) {
    let (inner, receiver) = unbounded();
    (EventSender { inner }, receiver)
}
