//! Frame snapshot handed to whatever draws the game
//!
//! The simulation never draws. After each tick the runner builds a
//! [`Snapshot`] and passes it to a [`RenderSink`].

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::Platform;

/// Platform as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlatformView {
    pub pos: Vec2,
    pub size: Vec2,
}

impl From<&Platform> for PlatformView {
    fn from(platform: &Platform) -> Self {
        Self {
            pos: platform.pos,
            size: Vec2::new(PLATFORM_WIDTH, PLATFORM_HEIGHT),
        }
    }
}

/// Read-only view of one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub player: Vec2,
    pub platforms: Vec<PlatformView>,
    pub score: u32,
    pub top_score: u32,
    pub game_over: bool,
}

impl Snapshot {
    /// HUD line, e.g. `Score: 4  Top Score: 12`
    pub fn status_line(&self) -> String {
        if self.game_over {
            format!(
                "Game Over! Final Score: {}  Top Score: {}  (restart to play again)",
                self.score, self.top_score
            )
        } else {
            format!("Score: {}  Top Score: {}", self.score, self.top_score)
        }
    }
}

/// Consumes one snapshot per tick
pub trait RenderSink {
    fn present(&mut self, frame: &Snapshot);
}

impl<F: FnMut(&Snapshot)> RenderSink for F {
    fn present(&mut self, frame: &Snapshot) {
        self(frame)
    }
}
