//! Spawn decisions: enemy pacing, stat rolls, and power-up drops
//!
//! Difficulty escalates two ways with score: the spawn interval shrinks
//! toward a floor, and both the variant mix and the per-variant stat rolls
//! shift upward. All randomness goes through the injected `Rng` so a run is
//! reproducible from its seed.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyVariant, PowerUp, PowerUpKind};
use crate::consts::*;

/// Seconds between enemy spawns at the given score, floored at four per
/// second.
pub fn spawn_interval(score: u32) -> f32 {
    (SPAWN_INTERVAL_BASE - score as f32 / SPAWN_INTERVAL_SCORE_SCALE).max(SPAWN_INTERVAL_FLOOR)
}

/// Score-gated variant selection
fn roll_variant(rng: &mut impl Rng, score: u32) -> EnemyVariant {
    if score < 80 {
        return EnemyVariant::Basic;
    }
    let roll: f32 = rng.random();
    if score < 250 {
        if roll < 0.70 {
            EnemyVariant::Basic
        } else if roll < 0.92 {
            EnemyVariant::Fast
        } else {
            EnemyVariant::Tank
        }
    } else if roll < 0.50 {
        EnemyVariant::Basic
    } else if roll < 0.80 {
        EnemyVariant::Fast
    } else {
        EnemyVariant::Tank
    }
}

/// Roll a fresh enemy for the current score.
///
/// Spawns just above the top edge, horizontally uniform across the playfield
/// inset by the enemy's half-size.
pub fn roll_enemy(rng: &mut impl Rng, score: u32) -> Enemy {
    let variant = roll_variant(rng, score);

    let (size, speed_y, drift, hp, points, shoot_timer) = match variant {
        EnemyVariant::Basic => (
            rng.random_range(26.0..40.0),
            rng.random_range(90.0..150.0) + score as f32 * 0.18,
            rng.random_range(-38.0..38.0),
            1,
            10,
            None,
        ),
        EnemyVariant::Fast => (
            rng.random_range(20.0..28.0),
            rng.random_range(180.0..260.0) + score as f32 * 0.25,
            rng.random_range(-18.0..18.0),
            1,
            15,
            None,
        ),
        EnemyVariant::Tank => (
            rng.random_range(42.0..54.0),
            rng.random_range(55.0..85.0) + score as f32 * 0.12,
            rng.random_range(-24.0..24.0),
            3,
            25,
            Some(rng.random_range(1.4..2.7)),
        ),
    };

    let half = size / 2.0;
    let x = rng.random_range(half..(PLAY_WIDTH - half));

    Enemy {
        pos: Vec2::new(x, -size),
        half,
        speed_y,
        drift,
        phase: rng.random_range(0.0..std::f32::consts::TAU),
        variant,
        hp,
        max_hp: hp,
        points,
        shoot_timer,
    }
}

/// Roll the power-up drop for a destroyed enemy.
///
/// The drop-chance roll and the kind roll are separate draws, in that order.
pub fn roll_power_up(rng: &mut impl Rng, pos: Vec2) -> Option<PowerUp> {
    if !rng.random_bool(POWER_UP_DROP_CHANCE) {
        return None;
    }

    let roll: f32 = rng.random();
    let kind = if roll < 0.4 {
        PowerUpKind::Rapid
    } else if roll < 0.8 {
        PowerUpKind::Spread
    } else {
        PowerUpKind::Shield
    };

    Some(PowerUp {
        pos,
        fall_speed: POWER_UP_FALL_SPEED,
        radius: POWER_UP_RADIUS,
        kind,
    })
}

/// Cooldown until a tank's next shot
pub fn reseed_shoot_timer(rng: &mut impl Rng) -> f32 {
    rng.random_range(2.4..4.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn interval_shrinks_with_score_and_floors() {
        assert_eq!(spawn_interval(0), 1.0);
        assert!(spawn_interval(400) < spawn_interval(100));
        assert_eq!(spawn_interval(1000), SPAWN_INTERVAL_FLOOR);
        assert_eq!(spawn_interval(50_000), SPAWN_INTERVAL_FLOOR);
    }

    #[test]
    fn low_score_spawns_only_basic() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..200 {
            let enemy = roll_enemy(&mut rng, 79);
            assert_eq!(enemy.variant, EnemyVariant::Basic);
        }
    }

    #[test]
    fn high_score_produces_all_variants() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..500 {
            match roll_enemy(&mut rng, 500).variant {
                EnemyVariant::Basic => seen[0] = true,
                EnemyVariant::Fast => seen[1] = true,
                EnemyVariant::Tank => seen[2] = true,
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn tank_stats() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..500 {
            let enemy = roll_enemy(&mut rng, 5000);
            if enemy.variant != EnemyVariant::Tank {
                continue;
            }
            assert_eq!(enemy.hp, 3);
            assert_eq!(enemy.points, 25);
            let timer = enemy.shoot_timer.expect("tanks return fire");
            assert!((1.4..2.7).contains(&timer));
        }
    }

    #[test]
    fn spawn_position_respects_inset() {
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..500 {
            let enemy = roll_enemy(&mut rng, 300);
            assert!(enemy.pos.x >= enemy.half);
            assert!(enemy.pos.x <= PLAY_WIDTH - enemy.half);
            // Fully above the top edge
            assert!(enemy.pos.y + enemy.half <= 0.0);
        }
    }

    #[test]
    fn drop_rate_is_roughly_sixteen_percent() {
        let mut rng = Pcg32::seed_from_u64(3);
        let drops = (0..10_000)
            .filter(|_| roll_power_up(&mut rng, Vec2::ZERO).is_some())
            .count();
        assert!((1300..1900).contains(&drops), "drops = {drops}");
    }
}
