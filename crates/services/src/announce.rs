use crate::error::AnnounceError;

/// Speech output for phase changes.
///
/// Implementations must return quickly: the player calls this from its tick
/// handler and never waits for speech to finish.
pub trait Announcer: Send + Sync {
    /// # Errors
    ///
    /// Returns `AnnounceError` if speech could not be started. The player logs
    /// and ignores it.
    fn announce(&self, text: &str) -> Result<(), AnnounceError>;
}

/// Leaves the player view once a session has finished.
pub trait Navigator: Send + Sync {
    fn back(&self);
}

/// Announcer that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAnnouncer;

impl Announcer for LogAnnouncer {
    fn announce(&self, text: &str) -> Result<(), AnnounceError> {
        tracing::info!(text, "announce");
        Ok(())
    }
}

/// Navigator that does nothing, for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct StayNavigator;

impl Navigator for StayNavigator {
    fn back(&self) {}
}
