//! Platform Jump - a side-scrolling platform jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player physics, platform lifecycle, game state)
//! - `game_loop`: Owns the simulation state and talks to the score store
//! - `runner`: Fixed-cadence tick thread with pause/resume
//! - `input`: Jump/Restart events queued from any thread
//! - `render`: Read-only frame snapshot handed to the render sink
//! - `highscores`: Best-score persistence
//! - `settings`: Data-driven configuration

pub mod game_loop;
pub mod highscores;
pub mod input;
pub mod render;
pub mod runner;
pub mod settings;
pub mod sim;

pub use game_loop::GameLoop;
pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreStore, ScoreStoreError};
pub use input::{InputEvent, InputQueue, InputSender};
pub use render::{RenderSink, Snapshot};
pub use runner::{GameRunner, RunnerHandle};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Nominal tick interval (~58.8 Hz)
    pub const TICK_INTERVAL_MS: u64 = 17;
    /// Milliseconds of active play per score point
    pub const SCORE_INTERVAL_MS: u64 = 1000;

    /// Player box is square
    pub const PLAYER_SIZE: f32 = 100.0;
    /// Downward acceleration per tick
    pub const GRAVITY: f32 = 1.0;
    /// Velocity set by a jump (negative = up)
    pub const JUMP_STRENGTH: f32 = -15.0;
    pub const PLAYER_START: Vec2 = Vec2::new(100.0, 500.0);

    pub const PLATFORM_WIDTH: f32 = 200.0;
    pub const PLATFORM_HEIGHT: f32 = 50.0;
    /// Leftward scroll per tick
    pub const PLATFORM_SPEED: f32 = 5.0;
    /// Where the one platform present at (re)start sits
    pub const SEED_PLATFORM: Vec2 = Vec2::new(500.0, 600.0);

    /// Chance per tick of spawning a platform
    pub const SPAWN_PROBABILITY: f64 = 0.02;
    /// Spawned platform top edge, half-open range
    pub const SPAWN_Y_MIN: f32 = 400.0;
    pub const SPAWN_Y_MAX: f32 = 600.0;

    /// Default logical screen size (portrait)
    pub const SCREEN_WIDTH: f32 = 1080.0;
    pub const SCREEN_HEIGHT: f32 = 1920.0;
}
