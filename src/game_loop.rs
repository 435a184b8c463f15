//! Session owner: simulation state plus the score store
//!
//! `GameLoop` is the only thing that touches [`GameState`]. It forwards each
//! tick to [`sim::tick`](crate::sim::tick), reports game over to the
//! [`ScoreStore`] and builds the render snapshot.

use std::time::Duration;

use crate::highscores::ScoreStore;
use crate::render::{PlatformView, Snapshot};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub struct GameLoop<S: ScoreStore> {
    state: GameState,
    store: S,
    /// Read from the store at startup and after each save
    top_score: u32,
}

impl<S: ScoreStore> GameLoop<S> {
    /// Start a session. Without a configured seed one is drawn from the OS.
    pub fn new(settings: &Settings, store: S) -> Self {
        let settings = settings.clone().sanitized();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let state = GameState::new(seed)
            .with_screen(settings.screen_width, settings.screen_height)
            .with_spawn_probability(settings.spawn_probability);
        Self::with_state(state, store)
    }

    /// Wrap an already built state
    pub fn with_state(state: GameState, store: S) -> Self {
        let top_score = match store.top_score() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Could not read top score: {}", e);
                0
            }
        };
        log::info!(
            "Session started (seed {}, top score {})",
            state.seed,
            top_score
        );
        Self {
            state,
            store,
            top_score,
        }
    }

    /// Advance one tick with the input gathered since the last one
    pub fn tick(&mut self, input: &TickInput, elapsed: Duration) {
        tick(&mut self.state, input, elapsed);

        let game_over = self.state.events.iter().find_map(|e| match e {
            GameEvent::GameOver { score } => Some(*score),
            _ => None,
        });
        if let Some(score) = game_over {
            self.record_score(score);
        }
    }

    /// Store failures are logged and the game carries on
    fn record_score(&mut self, score: u32) {
        match self.store.save_score(score) {
            Ok(true) => log::info!("New top score: {}", score),
            Ok(false) => {}
            Err(e) => {
                log::warn!("Could not save score {}: {}", score, e);
                return;
            }
        }
        match self.store.top_score() {
            Ok(top) => self.top_score = top,
            Err(e) => log::warn!("Could not read top score: {}", e),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.state.time_ticks,
            player: self.state.player.pos,
            platforms: self.state.platforms.iter().map(PlatformView::from).collect(),
            score: self.state.score,
            top_score: self.top_score,
            game_over: self.state.is_game_over(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn top_score(&self) -> u32 {
        self.top_score
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }
}
