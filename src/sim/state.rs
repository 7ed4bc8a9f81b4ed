//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here, owned by [`GameState`].
//! No entity holds a reference to another entity; all interactions are
//! resolved by scanning the collections in `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; only a restart request leaves this phase
    GameOver,
}

/// Enemy archetypes, decided once at spawn and never mutated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyVariant {
    Basic,
    Fast,
    /// Slow, three hit points, returns fire
    Tank,
}

/// Power-up categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Rapid fire for a fixed duration
    Rapid,
    /// Triple shot for a fixed duration
    Spread,
    /// One extra hit absorbed before lives are touched
    Shield,
}

/// The player ship
///
/// Exactly one instance; it is reset on restart, never destroyed. The `y`
/// coordinate is fixed after spawn, only `x` moves.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub half: Vec2,
    pub speed: f32,
    /// Seconds until the next shot is allowed
    pub fire_cooldown: f32,
    pub base_fire_interval: f32,
    /// Effective interval, derived from the rapid-fire timer each tick
    pub fire_interval: f32,
    /// 1 normally, 3 while the spread buff is active
    pub bullets_per_shot: u32,
    /// Grace period remaining after a hit; damage is ignored while > 0
    pub invuln_timer: f32,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(PLAY_WIDTH / 2.0, PLAY_HEIGHT - PLAYER_SPAWN_INSET),
            half: Vec2::splat(PLAYER_SIZE / 2.0),
            speed: PLAYER_SPEED,
            fire_cooldown: 0.0,
            base_fire_interval: BASE_FIRE_INTERVAL,
            fire_interval: BASE_FIRE_INTERVAL,
            bullets_per_shot: 1,
            invuln_timer: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.half)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// A player-fired bullet, moving straight up
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub half: Vec2,
    pub speed: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.half)
    }
}

/// A tank-fired bullet, moving straight down
#[derive(Debug, Clone)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
}

/// A descending enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Half of the (square) hull size
    pub half: f32,
    /// Vertical speed, pixels per second
    pub speed_y: f32,
    /// Horizontal drift amplitude; the sign sets the initial direction
    pub drift: f32,
    /// Oscillation phase driving the sideways weave
    pub phase: f32,
    pub variant: EnemyVariant,
    pub hp: u32,
    pub max_hp: u32,
    /// Score credited on destruction
    pub points: u32,
    /// Seconds until the next shot; present only on tanks
    pub shoot_timer: Option<f32>,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.half))
    }

    pub fn hp_ratio(&self) -> f32 {
        self.hp as f32 / self.max_hp as f32
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub fall_speed: f32,
    /// Pickup radius
    pub radius: f32,
    pub kind: PowerUpKind,
}

/// Score, lives, shield charges, and the two buff timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progression {
    pub score: u32,
    pub lives: u32,
    pub shield_charges: u32,
    /// Seconds of rapid fire remaining
    pub rapid_timer: f32,
    /// Seconds of triple shot remaining
    pub spread_timer: f32,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: MAX_LIVES,
            shield_charges: 0,
            rapid_timer: 0.0,
            spread_timer: 0.0,
        }
    }

    /// Apply a collected power-up. Timed buffs overwrite their timer rather
    /// than stacking; shields accumulate without bound.
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Rapid => self.rapid_timer = RAPID_DURATION,
            PowerUpKind::Spread => self.spread_timer = SPREAD_DURATION,
            PowerUpKind::Shield => self.shield_charges += 1,
        }
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

/// Effect events emitted during a tick for the cosmetic particle system.
///
/// Cleared at the start of every tick; each causing collision emits exactly
/// one event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// An enemy was destroyed at this position
    Explosion { pos: Vec2, variant: EnemyVariant },
    /// A bullet damaged (but did not destroy) an enemy
    HitSpark { pos: Vec2 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub power_ups: Vec<PowerUp>,
    pub progression: Progression,
    /// Countdown to the next enemy spawn; starts at zero so the first tick
    /// of a run spawns immediately
    pub spawn_timer: f32,
    /// Cosmetic screen-flash timer; decays even after game over
    pub hit_flash: f32,
    /// Events emitted during the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            time_ticks: 0,
            player: Player::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            enemy_bullets: Vec::new(),
            power_ups: Vec::new(),
            progression: Progression::new(),
            spawn_timer: 0.0,
            hit_flash: 0.0,
            events: Vec::new(),
        }
    }

    /// Restart the run if it has ended; a no-op while playing.
    pub fn request_restart(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        log::info!("restarting after game over (score {})", self.progression.score);
        self.reset();
    }

    /// Reinitialize everything except the RNG stream, so a restarted run
    /// does not replay the previous one.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        *self = Self::new(self.seed);
        self.rng = rng;
    }

    /// The sole entry point for damage, from any source.
    ///
    /// Order: invulnerability gates everything, then shield charges are
    /// consumed, then lives. Driving lives to zero transitions to game over
    /// exactly once.
    pub fn lose_life(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if self.player.invuln_timer > 0.0 {
            return;
        }

        self.hit_flash = HIT_FLASH_SECS;

        if self.progression.shield_charges > 0 {
            self.progression.shield_charges -= 1;
            self.player.invuln_timer = SHIELD_INVULN_SECS;
            return;
        }

        self.progression.lives = self.progression.lives.saturating_sub(1);
        self.player.invuln_timer = HIT_INVULN_SECS;

        if self.progression.lives == 0 {
            self.phase = GamePhase::GameOver;
            log::info!("game over at score {}", self.progression.score);
        }
    }
}
