//! Game state and core simulation types

use std::time::Duration;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{self, Aabb};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player fell off the bottom of the screen, waiting for restart
    GameOver,
}

/// The player: a 100x100 box that only moves vertically
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity per tick (negative = up)
    pub velocity_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START)
    }
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            velocity_y: 0.0,
        }
    }

    /// Integrate one tick: position uses last tick's velocity, then gravity applies
    pub fn update(&mut self) {
        self.pos.y += self.velocity_y;
        self.velocity_y += GRAVITY;
    }

    /// No grounded check, jumps work mid-air
    pub fn jump(&mut self) {
        self.velocity_y = JUMP_STRENGTH;
    }

    /// Snap onto the platform's top surface and stop falling
    pub fn land_on(&mut self, platform: &Platform) {
        self.pos.y = platform.pos.y - PLAYER_SIZE;
        self.velocity_y = 0.0;
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::player(self.pos)
    }

    pub fn collides_with(&self, platform: &Platform) -> bool {
        collision::collides_with(self.pos, platform.pos)
    }

    pub fn is_above(&self, platform: &Platform) -> bool {
        collision::is_above(self.pos, platform.pos)
    }
}

/// A platform scrolling right to left at constant speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self { id, pos }
    }

    pub fn update(&mut self) {
        self.pos.x -= PLATFORM_SPEED;
    }

    /// Right edge has passed the left screen boundary
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + PLATFORM_WIDTH < 0.0
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::platform(self.pos)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    platform: Platform,
    retired: bool,
}

/// Index-stable platform storage.
///
/// Retiring a platform only flags its slot, so indices stay valid while a
/// pass walks the arena. `compact()` drops retired slots once the pass is done.
#[derive(Debug, Clone, Default)]
pub struct PlatformArena {
    slots: Vec<Slot>,
}

impl PlatformArena {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn push(&mut self, platform: Platform) {
        self.slots.push(Slot {
            platform,
            retired: false,
        });
    }

    /// Number of slots, retired ones included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Active platform in slot `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Platform> {
        self.slots
            .get_mut(index)
            .filter(|s| !s.retired)
            .map(|s| &mut s.platform)
    }

    /// Flag slot `index` for removal. Returns the platform if it was active.
    pub fn retire(&mut self, index: usize) -> Option<Platform> {
        let slot = self.slots.get_mut(index)?;
        if slot.retired {
            return None;
        }
        slot.retired = true;
        Some(slot.platform)
    }

    /// Drop retired slots
    pub fn compact(&mut self) {
        self.slots.retain(|s| !s.retired);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Active platforms in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.slots.iter().filter(|s| !s.retired).map(|s| &s.platform)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: u32) -> Option<&Platform> {
        self.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed { platform: u32 },
    PlatformSpawned { platform: u32 },
    PlatformDespawned { platform: u32 },
    ScoreIncreased { score: u32 },
    GameOver { score: u32 },
    Restarted,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub platforms: PlatformArena,
    /// Seconds of active play survived
    pub score: u32,
    /// Active play accumulated toward the next score point
    pub score_clock: Duration,
    /// Simulation tick counter (not reset on restart)
    pub time_ticks: u64,
    /// Logical screen width; platforms spawn at this x
    pub screen_width: f32,
    /// Falling below this y ends the run
    pub screen_height: f32,
    /// Chance per tick of spawning a platform, always within `0.0..=1.0`
    pub(crate) spawn_probability: f64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and default screen
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            phase: GamePhase::Running,
            player: Player::default(),
            platforms: PlatformArena::new(),
            score: 0,
            score_clock: Duration::ZERO,
            time_ticks: 0,
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            spawn_probability: SPAWN_PROBABILITY,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };

        state.spawn_platform(SEED_PLATFORM);

        state
    }

    pub fn with_screen(mut self, width: f32, height: f32) -> Self {
        self.screen_width = width;
        self.screen_height = height;
        self
    }

    pub fn with_spawn_probability(mut self, probability: f64) -> Self {
        self.spawn_probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        self
    }

    pub fn spawn_probability(&self) -> f64 {
        self.spawn_probability
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Add a platform at `pos`, returning its id
    pub fn spawn_platform(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.platforms.push(Platform::new(id, pos));
        id
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Start a fresh round: new player, only the seed platform, score 0.
    ///
    /// The RNG stream and id counter carry on so rounds differ and ids stay unique.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Running;
        self.player = Player::default();
        self.platforms.clear();
        self.spawn_platform(SEED_PLATFORM);
        self.score = 0;
        self.score_clock = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_has_seed_platform() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos, Vec2::new(100.0, 500.0));
        assert_eq!(state.player.velocity_y, 0.0);
        let platforms: Vec<_> = state.platforms.iter().collect();
        assert_eq!(platforms.len(), 1);
        assert_eq!(platforms[0].pos, Vec2::new(500.0, 600.0));
    }

    #[test]
    fn test_player_update_order() {
        let mut player = Player::new(Vec2::new(0.0, 100.0));
        player.velocity_y = 3.0;
        player.update();
        // Position moved by the old velocity, then gravity
        assert_eq!(player.pos.y, 103.0);
        assert_eq!(player.velocity_y, 4.0);
    }

    #[test]
    fn test_jump_is_unconditional() {
        let mut player = Player::default();
        player.velocity_y = 12.0;
        player.jump();
        assert_eq!(player.velocity_y, JUMP_STRENGTH);
        player.update();
        player.jump();
        assert_eq!(player.velocity_y, JUMP_STRENGTH);
    }

    #[test]
    fn test_platform_scrolls_100_ticks() {
        let mut platform = Platform::new(1, Vec2::new(500.0, 600.0));
        for _ in 0..100 {
            platform.update();
        }
        assert_eq!(platform.pos.x, 0.0);
        assert!(!platform.is_off_screen());
    }

    #[test]
    fn test_platform_off_screen_edge() {
        let platform = Platform::new(1, Vec2::new(-200.0, 0.0));
        assert!(!platform.is_off_screen());
        let platform = Platform::new(1, Vec2::new(-200.5, 0.0));
        assert!(platform.is_off_screen());
    }

    #[test]
    fn test_arena_retire_keeps_indices_until_compact() {
        let mut arena = PlatformArena::new();
        for id in 1..=3 {
            arena.push(Platform::new(id, Vec2::new(id as f32 * 10.0, 0.0)));
        }

        assert_eq!(arena.retire(1).map(|p| p.id), Some(2));
        assert!(arena.retire(1).is_none());
        assert!(arena.get_mut(1).is_none());
        assert_eq!(arena.get_mut(2).map(|p| p.id), Some(3));
        assert_eq!(arena.slot_count(), 3);
        assert_eq!(arena.len(), 2);

        arena.compact();
        assert_eq!(arena.slot_count(), 2);
        let ids: Vec<_> = arena.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_reset_keeps_ids_unique() {
        let mut state = GameState::new(7);
        let first_seed_id = state.platforms.iter().next().map(|p| p.id);
        state.spawn_platform(Vec2::new(900.0, 450.0));
        state.score = 12;
        state.phase = GamePhase::GameOver;

        state.reset();

        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.platforms.len(), 1);
        let seed = state.platforms.iter().next().copied();
        assert_eq!(seed.map(|p| p.pos), Some(SEED_PLATFORM));
        assert_ne!(seed.map(|p| p.id), first_seed_id);
    }

    #[test]
    fn test_spawn_probability_is_clamped() {
        assert_eq!(GameState::new(0).with_spawn_probability(3.0).spawn_probability(), 1.0);
        assert_eq!(GameState::new(0).with_spawn_probability(-1.0).spawn_probability(), 0.0);
        assert_eq!(GameState::new(0).with_spawn_probability(f64::NAN).spawn_probability(), 0.0);
    }
}
