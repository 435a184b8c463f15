//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation by one frame.

use std::time::Duration;

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::input::InputEvent;

/// Input collected since the previous tick, in arrival order
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn jump() -> Self {
        Self::from_events([InputEvent::Jump])
    }

    pub fn restart() -> Self {
        Self::from_events([InputEvent::Restart])
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

const SCORE_INTERVAL: Duration = Duration::from_millis(SCORE_INTERVAL_MS);

/// Advance the game state by one tick.
///
/// `elapsed` is the wall-clock time since the previous tick and only feeds
/// the score clock; movement is per tick.
pub fn tick(state: &mut GameState, input: &TickInput, elapsed: Duration) {
    state.events.clear();

    if apply_input(state, input) {
        // A restart tick only shows the fresh round
        return;
    }

    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    // "Above" is judged on positions from before anything moves this tick
    let player_before = state.player;
    state.player.update();

    for index in 0..state.platforms.slot_count() {
        let Some(platform) = state.platforms.get_mut(index) else {
            continue;
        };
        let was_above = player_before.is_above(platform);
        platform.update();
        let platform = *platform;

        if was_above && state.player.collides_with(&platform) {
            state.player.land_on(&platform);
            state.events.push(GameEvent::Landed {
                platform: platform.id,
            });
        }

        if platform.is_off_screen() {
            state.platforms.retire(index);
            debug!("Platform {} left the screen", platform.id);
            state.events.push(GameEvent::PlatformDespawned {
                platform: platform.id,
            });
        }
    }
    state.platforms.compact();

    if state.rng.random_bool(state.spawn_probability()) {
        let pos = Vec2::new(
            state.screen_width,
            state.rng.random_range(SPAWN_Y_MIN..SPAWN_Y_MAX),
        );
        let id = state.spawn_platform(pos);
        debug!("Spawned platform {} at y={:.1}", id, pos.y);
        state.events.push(GameEvent::PlatformSpawned { platform: id });
    }

    if state.player.pos.y > state.screen_height {
        state.phase = GamePhase::GameOver;
        info!(
            "Game over at tick {} with score {}",
            state.time_ticks, state.score
        );
        state.events.push(GameEvent::GameOver { score: state.score });
        return;
    }

    state.score_clock += elapsed;
    // A long tick can cover several whole intervals
    while state.score_clock >= SCORE_INTERVAL {
        state.score += 1;
        state.score_clock -= SCORE_INTERVAL;
        state.events.push(GameEvent::ScoreIncreased { score: state.score });
    }
}

/// Apply queued input in order. Returns true if the round was restarted.
fn apply_input(state: &mut GameState, input: &TickInput) -> bool {
    let mut restarted = false;

    for event in &input.events {
        match (event, state.phase) {
            (InputEvent::Restart, GamePhase::GameOver) => {
                state.reset();
                restarted = true;
                info!("Restarted (seed {})", state.seed);
                state.events.push(GameEvent::Restarted);
            }
            (InputEvent::Jump, GamePhase::Running) => {
                state.player.jump();
                state.events.push(GameEvent::Jumped);
            }
            // Restart while running, jump while game over
            _ => {}
        }
    }

    restarted
}
