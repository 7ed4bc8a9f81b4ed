//! Nova Raid - a vertical-scrolling arcade shooter core
//!
//! This crate is the simulation engine only. All gameplay logic lives in
//! `sim`; rendering, audio, input devices, and HUD presentation are external
//! collaborators. They feed a [`sim::TickInput`] into [`sim::tick`] once per
//! frame and read back the [`sim::FrameSnapshot`] / [`sim::HudSnapshot`]
//! projections plus the per-tick effect events.

pub mod sim;

pub use sim::{FrameSnapshot, GameEvent, GamePhase, GameState, HudSnapshot, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions in world pixels
    pub const PLAY_WIDTH: f32 = 480.0;
    pub const PLAY_HEIGHT: f32 = 640.0;

    /// Lives at the start of a run
    pub const MAX_LIVES: u32 = 3;

    /// Player ship defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Horizontal clamp inset for the ship center
    pub const PLAYER_MARGIN: f32 = 30.0;
    /// Seconds between shots without any buff
    pub const BASE_FIRE_INTERVAL: f32 = 0.22;
    /// Distance from the bottom edge to the ship center at spawn
    pub const PLAYER_SPAWN_INSET: f32 = 80.0;

    /// Player bullet defaults
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 14.0;
    pub const BULLET_SPEED: f32 = 460.0;
    /// Horizontal muzzle offsets while the spread buff is active
    pub const SPREAD_OFFSETS: [f32; 3] = [-12.0, 0.0, 12.0];

    /// Enemy bullet defaults
    pub const ENEMY_BULLET_RADIUS: f32 = 4.0;
    pub const ENEMY_BULLET_SPEED: f32 = 240.0;

    /// Power-up defaults
    pub const POWER_UP_RADIUS: f32 = 12.0;
    pub const POWER_UP_FALL_SPEED: f32 = 70.0;
    /// Chance that a destroyed enemy drops anything at all
    pub const POWER_UP_DROP_CHANCE: f64 = 0.16;

    /// Buff durations (seconds, overwrite on re-pickup)
    pub const RAPID_DURATION: f32 = 7.0;
    pub const SPREAD_DURATION: f32 = 8.0;
    /// Fire-interval multiplier while rapid fire is active
    pub const RAPID_FIRE_SCALE: f32 = 0.4;

    /// Grace period after a shield charge absorbs a hit
    pub const SHIELD_INVULN_SECS: f32 = 1.0;
    /// Grace period after losing a life
    pub const HIT_INVULN_SECS: f32 = 1.2;

    /// Cosmetic screen-flash duration after any hit
    pub const HIT_FLASH_SECS: f32 = 0.35;

    /// Enemy spawn pacing: interval shrinks with score down to the floor
    pub const SPAWN_INTERVAL_BASE: f32 = 1.0;
    pub const SPAWN_INTERVAL_FLOOR: f32 = 0.25;
    pub const SPAWN_INTERVAL_SCORE_SCALE: f32 = 1000.0;
}
