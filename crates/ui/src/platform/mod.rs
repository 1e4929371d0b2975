mod navigation;
mod speech;

pub use navigation::{BackRequests, ChannelNavigator};
pub use speech::SpeechAnnouncer;
