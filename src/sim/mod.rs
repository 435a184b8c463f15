//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per tick, wall-clock time only drives the score
//! - Seeded RNG only
//! - Stable iteration order (arena insertion order)
//! - No rendering, persistence or threading dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collides_with, is_above, overlaps};
pub use state::{GameEvent, GamePhase, GameState, Platform, PlatformArena, Player};
pub use tick::{TickInput, tick};
