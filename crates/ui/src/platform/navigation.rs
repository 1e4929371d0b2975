use services::Navigator;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Receiving end of [`ChannelNavigator`], drained by the view that owns the
/// router.
pub type BackRequests = UnboundedReceiver<()>;

/// Forwards "go back" requests from the player clock to the UI thread.
///
/// The player fires `back` from its tick task, where the router is not
/// reachable, so the request is queued and the view performs it.
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    tx: UnboundedSender<()>,
}

impl ChannelNavigator {
    #[must_use]
    pub fn channel() -> (Self, BackRequests) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn back(&self) {
        if self.tx.send(()).is_err() {
            tracing::debug!("back request dropped, view already gone");
        }
    }
}
