use std::sync::{Arc, Mutex, MutexGuard};

use drill_core::model::PostId;
use drill_core::{Player, PlayerConfig, PlayerEvent, PlayerSnapshot};
use tokio::sync::watch;

use super::ticker::TickSource;
use crate::announce::{Announcer, Navigator};
use crate::loader::SessionLoader;

/// Lifecycle of the player view, independent of the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Nothing requested yet.
    Idle,
    Loading,
    /// A session with at least one drill is loaded.
    Ready,
    /// The session loaded but has nothing to play.
    NoDrills,
    /// Loading failed. Terminal until another load is requested.
    Failed(String),
    /// The last drill ran out.
    Finished,
}

/// What the view renders. Published after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub status: PlayerStatus,
    pub post_id: Option<PostId>,
    pub session_title: Option<String>,
    pub snapshot: Option<PlayerSnapshot>,
}

impl PlayerView {
    fn idle() -> Self {
        Self {
            status: PlayerStatus::Idle,
            post_id: None,
            session_title: None,
            snapshot: None,
        }
    }
}

/// The single owned state cell. Ticks and controls both go through it.
struct Cell {
    player: Option<Player>,
    status: PlayerStatus,
    post_id: Option<PostId>,
    session_title: Option<String>,
    /// Bumped whenever the tick source is cancelled; a tick from an older
    /// generation is discarded.
    generation: u64,
    /// Bumped on every load request; a load result from an older request is
    /// discarded.
    load_seq: u64,
}

impl Cell {
    fn view(&self) -> PlayerView {
        PlayerView {
            status: self.status.clone(),
            post_id: self.post_id,
            session_title: self.session_title.clone(),
            snapshot: self.player.as_ref().map(Player::snapshot),
        }
    }
}

struct Shared {
    cell: Mutex<Cell>,
    view_tx: watch::Sender<PlayerView>,
    announcer: Arc<dyn Announcer>,
    navigator: Arc<dyn Navigator>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Cell> {
        // A poisoned cell only means a panic happened mid-update; the data is
        // still a valid Player state.
        self.cell
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn publish(&self, cell: &Cell) {
        self.view_tx.send_replace(cell.view());
    }

    /// Tick handler. Reads the live cell at fire time. Returns whether the
    /// tick source should keep running.
    fn on_tick(&self, generation: u64) -> bool {
        let (events, keep_running) = {
            let mut cell = self.lock();
            if cell.generation != generation {
                return false;
            }
            let Some(player) = cell.player.as_mut() else {
                return false;
            };
            if !player.is_playing() {
                return false;
            }
            let events = player.tick();
            let finished = player.is_finished();
            if finished {
                cell.status = PlayerStatus::Finished;
            }
            self.publish(&cell);
            (events, !finished)
        };
        self.dispatch(events);
        keep_running
    }

    fn dispatch(&self, events: Vec<PlayerEvent>) {
        for event in events {
            match event {
                PlayerEvent::Announce(text) => {
                    if let Err(err) = self.announcer.announce(&text) {
                        tracing::warn!(%err, text, "announcement failed");
                    }
                }
                PlayerEvent::PhaseStarted { drill_index, phase } => {
                    tracing::debug!(drill_index, %phase, "phase started");
                }
                PlayerEvent::Finished => {
                    tracing::info!("training session finished");
                    self.navigator.back();
                }
            }
        }
    }
}

/// Drives a [`Player`] from a wall-clock tick source.
///
/// Owns at most one armed [`TickSource`]. Every control that can change
/// whether or where the clock runs cancels the current source before arming
/// a new one, and dropping the player cancels it unconditionally.
pub struct SessionPlayer {
    shared: Arc<Shared>,
    loader: Arc<dyn SessionLoader>,
    config: PlayerConfig,
    ticker: Mutex<Option<TickSource>>,
}

impl SessionPlayer {
    #[must_use]
    pub fn new(
        loader: Arc<dyn SessionLoader>,
        announcer: Arc<dyn Announcer>,
        navigator: Arc<dyn Navigator>,
        config: PlayerConfig,
    ) -> Self {
        let (view_tx, _) = watch::channel(PlayerView::idle());
        Self {
            shared: Arc::new(Shared {
                cell: Mutex::new(Cell {
                    player: None,
                    status: PlayerStatus::Idle,
                    post_id: None,
                    session_title: None,
                    generation: 0,
                    load_seq: 0,
                }),
                view_tx,
                announcer,
                navigator,
            }),
            loader,
            config,
            ticker: Mutex::new(None),
        }
    }

    /// Receiver that yields a new [`PlayerView`] after every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlayerView> {
        self.shared.view_tx.subscribe()
    }

    #[must_use]
    pub fn view(&self) -> PlayerView {
        self.shared.lock().view()
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// True while a tick source is armed and the player is playing.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        let slot = self.ticker_slot();
        let cell = self.shared.lock();
        slot.as_ref()
            .is_some_and(|source| source.generation() == cell.generation)
            && cell.player.as_ref().is_some_and(Player::is_playing)
    }

    /// Load a session and reset to a paused countdown on its first drill.
    ///
    /// Any running clock from a previous session is cancelled before the
    /// request starts. If another load is requested while this one is in
    /// flight, this result is dropped.
    pub async fn load(&self, id: PostId) {
        let seq = {
            let mut slot = self.ticker_slot();
            let mut cell = self.shared.lock();
            cancel(&mut slot, &mut cell);
            cell.load_seq += 1;
            cell.player = None;
            cell.status = PlayerStatus::Loading;
            cell.post_id = Some(id);
            cell.session_title = None;
            self.shared.publish(&cell);
            cell.load_seq
        };

        let result = self.loader.load(id).await;

        let mut cell = self.shared.lock();
        if cell.load_seq != seq {
            tracing::debug!(post_id = %id, "discarding stale session load");
            return;
        }
        match result {
            Ok(post) => {
                cell.session_title = Some(post.title().to_string());
                match Player::new(post.drills().to_vec(), self.config) {
                    Ok(player) => {
                        tracing::info!(post_id = %id, drills = post.drills().len(), "session loaded");
                        cell.player = Some(player);
                        cell.status = PlayerStatus::Ready;
                    }
                    Err(err) => {
                        tracing::info!(post_id = %id, %err, "session is not playable");
                        cell.status = PlayerStatus::NoDrills;
                    }
                }
            }
            Err(err) => {
                tracing::warn!(post_id = %id, %err, "session load failed");
                cell.status = PlayerStatus::Failed(err.to_string());
            }
        }
        self.shared.publish(&cell);
    }

    /// Flip play/pause. No effect unless a playable session is loaded.
    pub fn toggle_play_pause(&self) {
        self.control(|player| {
            player.toggle_play_pause();
            true
        });
    }

    pub fn play(&self) {
        self.control(|player| {
            let was = player.is_playing();
            player.play();
            was != player.is_playing()
        });
    }

    pub fn pause(&self) {
        self.control(|player| {
            let was = player.is_playing();
            player.pause();
            was != player.is_playing()
        });
    }

    /// Next drill, paused at its countdown. No-op on the last drill.
    pub fn skip_forward(&self) {
        self.control(Player::skip_forward);
    }

    /// Previous drill, paused at its countdown. No-op on the first drill.
    pub fn skip_backward(&self) {
        self.control(Player::skip_backward);
    }

    /// Stop the clock for good. Called when the view is torn down; also run
    /// on drop.
    pub fn shutdown(&self) {
        let mut slot = self.ticker_slot();
        let mut cell = self.shared.lock();
        cancel(&mut slot, &mut cell);
        cell.load_seq += 1;
        if let Some(player) = cell.player.as_mut() {
            player.pause();
        }
        self.shared.publish(&cell);
    }

    /// Apply a control to the live player, then cancel and rearm the tick
    /// source if the control changed anything.
    fn control(&self, apply: impl FnOnce(&mut Player) -> bool) {
        let mut slot = self.ticker_slot();
        let mut cell = self.shared.lock();
        if cell.status != PlayerStatus::Ready {
            return;
        }
        let Some(player) = cell.player.as_mut() else {
            return;
        };
        if !apply(player) {
            return;
        }
        let state = player.state();
        tracing::debug!(
            drill_index = state.current_drill_index,
            phase = %state.phase,
            time_left = state.time_left_secs,
            playing = state.is_playing,
            "player control"
        );

        cancel(&mut slot, &mut cell);
        if state.is_playing {
            let shared = Arc::clone(&self.shared);
            let generation = cell.generation;
            *slot = Some(TickSource::arm(
                self.config.tick_interval(),
                generation,
                move || shared.on_tick(generation),
            ));
        }
        self.shared.publish(&cell);
    }

    fn ticker_slot(&self) -> MutexGuard<'_, Option<TickSource>> {
        self.ticker
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Cancel the armed source, if any, and invalidate ticks already in flight.
fn cancel(slot: &mut Option<TickSource>, cell: &mut Cell) {
    if let Some(source) = slot.take() {
        source.cancel();
    }
    cell.generation += 1;
}

impl Drop for SessionPlayer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
