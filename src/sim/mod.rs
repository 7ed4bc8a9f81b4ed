//! Arcade shooter simulation
//!
//! All gameplay logic lives here. This module must stay deterministic and
//! self-contained:
//! - Seeded RNG only, one generator per run
//! - Stable iteration order (insertion order of each collection)
//! - No rendering or platform dependencies
//!
//! Interactions between entities are resolved by `tick` scanning the
//! collections in a fixed order; entities never reference each other.

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_overlaps_rect, rects_overlap};
pub use snapshot::{
    ActiveBuff, BuffKind, BulletView, EnemyBulletView, EnemyView, FrameSnapshot, HudSnapshot,
    PlayerView, PowerUpView,
};
pub use state::{
    Bullet, Enemy, EnemyBullet, EnemyVariant, GameEvent, GamePhase, GameState, Player, PowerUp,
    PowerUpKind, Progression,
};
pub use tick::{TickInput, tick};
