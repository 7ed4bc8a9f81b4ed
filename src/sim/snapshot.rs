//! Read-only projections of the simulation for external consumers
//!
//! The renderer and the HUD sink never touch [`GameState`] directly; after
//! each tick they are handed these copied-out views instead.

use glam::Vec2;
use serde::Serialize;

use super::state::{EnemyVariant, GamePhase, GameState, PowerUpKind};

/// Player pose for the renderer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub half: Vec2,
    /// Renderers typically blink the ship while this is set
    pub invulnerable: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub half: f32,
    pub variant: EnemyVariant,
    /// Remaining HP fraction in (0, 1], for health bars
    pub hp_ratio: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub half: Vec2,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct EnemyBulletView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerUpView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: PowerUpKind,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub enemy_bullets: Vec<EnemyBulletView>,
    pub power_ups: Vec<PowerUpView>,
    /// Screen-flash intensity timer, seconds remaining
    pub hit_flash: f32,
    pub game_over: bool,
}

/// A timed buff currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ActiveBuff {
    pub kind: BuffKind,
    /// Seconds until the buff expires
    pub remaining: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BuffKind {
    RapidFire,
    TripleShot,
}

impl BuffKind {
    pub fn label(self) -> &'static str {
        match self {
            BuffKind::RapidFire => "rapid fire",
            BuffKind::TripleShot => "triple shot",
        }
    }
}

/// Everything the HUD sink needs after a tick
#[derive(Debug, Clone, Serialize)]
pub struct HudSnapshot {
    pub score: u32,
    pub lives: u32,
    pub shield_charges: u32,
    pub buffs: Vec<ActiveBuff>,
}

impl GameState {
    /// Copy out the current frame for the renderer
    pub fn frame_snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            player: PlayerView {
                pos: self.player.pos,
                half: self.player.half,
                invulnerable: self.player.invuln_timer > 0.0,
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyView {
                    pos: e.pos,
                    half: e.half,
                    variant: e.variant,
                    hp_ratio: e.hp_ratio(),
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .map(|b| BulletView {
                    pos: b.pos,
                    half: b.half,
                })
                .collect(),
            enemy_bullets: self
                .enemy_bullets
                .iter()
                .map(|b| EnemyBulletView {
                    pos: b.pos,
                    radius: b.radius,
                })
                .collect(),
            power_ups: self
                .power_ups
                .iter()
                .map(|p| PowerUpView {
                    pos: p.pos,
                    radius: p.radius,
                    kind: p.kind,
                })
                .collect(),
            hit_flash: self.hit_flash,
            game_over: self.phase == GamePhase::GameOver,
        }
    }

    /// Copy out the scoreboard for the HUD sink
    pub fn hud_snapshot(&self) -> HudSnapshot {
        let mut buffs = Vec::new();
        if self.progression.rapid_timer > 0.0 {
            buffs.push(ActiveBuff {
                kind: BuffKind::RapidFire,
                remaining: self.progression.rapid_timer,
            });
        }
        if self.progression.spread_timer > 0.0 {
            buffs.push(ActiveBuff {
                kind: BuffKind::TripleShot,
                remaining: self.progression.spread_timer,
            });
        }
        HudSnapshot {
            score: self.progression.score,
            lives: self.progression.lives,
            shield_charges: self.progression.shield_charges,
            buffs,
        }
    }
}
