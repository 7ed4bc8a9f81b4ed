//! Per-frame simulation update
//!
//! One [`tick`] call per rendering frame, synchronous and single-threaded;
//! every collection mutation happens inside it. `dt` is wall-clock elapsed
//! seconds between frames, not a fixed step, so a very large spike (a
//! backgrounded tab) can tunnel fast entities through each other. That is
//! accepted variable-timestep behavior, not a defect.
//!
//! Order within a tick: input-driven player motion and firing, then the
//! spawner, then motion integration for everything (including entities
//! spawned this tick), then off-screen pruning, then collision resolution.

use glam::Vec2;

use super::collision::{circle_overlaps_rect, rects_overlap};
use super::spawn;
use super::state::{Bullet, EnemyBullet, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Held controls sampled once at the start of a tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub fire: bool,
    /// Discrete restart request; honored only after game over
    pub restart: bool,
}

/// Advance the simulation by `dt` seconds. The sole mutator of [`GameState`].
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // A negative or non-finite dt is a caller defect; freeze this frame
    // instead of integrating corrupted motion.
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    state.events.clear();

    // The cosmetic flash keeps fading after the run ends
    state.hit_flash = (state.hit_flash - dt).max(0.0);

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.request_restart();
        }
        return;
    }

    state.time_ticks += 1;

    state.player.invuln_timer = (state.player.invuln_timer - dt).max(0.0);
    update_buffs(state, dt);
    move_and_fire(state, input, dt);
    run_spawner(state, dt);
    integrate(state, dt);
    prune(state);
    resolve_collisions(state);
}

/// Decay the buff timers and derive the player's fire parameters from them
fn update_buffs(state: &mut GameState, dt: f32) {
    let prog = &mut state.progression;
    prog.rapid_timer = (prog.rapid_timer - dt).max(0.0);
    prog.spread_timer = (prog.spread_timer - dt).max(0.0);

    let scale = if prog.rapid_timer > 0.0 {
        RAPID_FIRE_SCALE
    } else {
        1.0
    };
    state.player.fire_interval = state.player.base_fire_interval * scale;
    state.player.bullets_per_shot = if prog.spread_timer > 0.0 { 3 } else { 1 };
}

fn move_and_fire(state: &mut GameState, input: &TickInput, dt: f32) {
    let GameState {
        player, bullets, ..
    } = state;

    let mut direction = 0.0;
    if input.move_left {
        direction -= 1.0;
    }
    if input.move_right {
        direction += 1.0;
    }
    player.pos.x = (player.pos.x + direction * player.speed * dt)
        .clamp(PLAYER_MARGIN, PLAY_WIDTH - PLAYER_MARGIN);

    player.fire_cooldown = (player.fire_cooldown - dt).max(0.0);
    if input.fire && player.fire_cooldown <= 0.0 {
        let nose_y = player.pos.y - player.half.y;
        let offsets: &[f32] = if player.bullets_per_shot == 3 {
            &SPREAD_OFFSETS
        } else {
            &[0.0]
        };
        for &offset in offsets {
            bullets.push(Bullet {
                pos: Vec2::new(player.pos.x + offset, nose_y),
                half: Vec2::new(BULLET_WIDTH / 2.0, BULLET_HEIGHT / 2.0),
                speed: BULLET_SPEED,
            });
        }
        player.fire_cooldown = player.fire_interval;
    }
}

/// Countdown-driven enemy spawning; at most one enemy per tick
fn run_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer -= dt;
    if state.spawn_timer <= 0.0 {
        let score = state.progression.score;
        let enemy = spawn::roll_enemy(&mut state.rng, score);
        state.enemies.push(enemy);
        state.spawn_timer = spawn::spawn_interval(score);
    }
}

fn integrate(state: &mut GameState, dt: f32) {
    let GameState {
        bullets,
        enemies,
        enemy_bullets,
        power_ups,
        rng,
        ..
    } = state;

    for enemy in enemies.iter_mut() {
        enemy.phase += 2.0 * dt;
        enemy.pos.x = (enemy.pos.x + enemy.phase.sin() * enemy.drift * dt)
            .clamp(enemy.half, PLAY_WIDTH - enemy.half);
        enemy.pos.y += enemy.speed_y * dt;

        if let Some(timer) = enemy.shoot_timer.as_mut() {
            *timer -= dt;
            if *timer <= 0.0 {
                enemy_bullets.push(EnemyBullet {
                    pos: Vec2::new(enemy.pos.x, enemy.pos.y + enemy.half * 0.6),
                    radius: ENEMY_BULLET_RADIUS,
                    speed: ENEMY_BULLET_SPEED,
                });
                *timer = spawn::reseed_shoot_timer(rng);
            }
        }
    }

    for bullet in bullets.iter_mut() {
        bullet.pos.y -= bullet.speed * dt;
    }
    for bullet in enemy_bullets.iter_mut() {
        bullet.pos.y += bullet.speed * dt;
    }
    for power_up in power_ups.iter_mut() {
        power_up.pos.y += power_up.fall_speed * dt;
    }
}

/// Remove entities whose shape has fully left the playfield, before any
/// collision checks run. Enemies escaping past the bottom edge are not a
/// silent despawn: each one costs a life.
fn prune(state: &mut GameState) {
    state.bullets.retain(|b| b.pos.y + b.half.y > 0.0);
    state.enemy_bullets.retain(|b| b.pos.y - b.radius < PLAY_HEIGHT);
    state.power_ups.retain(|p| p.pos.y - p.radius < PLAY_HEIGHT);

    let mut escaped = 0;
    state.enemies.retain(|e| {
        if e.pos.y - e.half > PLAY_HEIGHT {
            escaped += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..escaped {
        state.lose_life();
    }
}

/// Resolve all pairwise interactions in a fixed order, so a single entity
/// dies at most once per tick:
/// 1. enemy vs player, 2. enemy bullet vs player, 3. power-up vs player,
/// 4. player bullet vs enemy.
fn resolve_collisions(state: &mut GameState) {
    let player_rect = state.player.rect();

    // 1. Ramming enemies are destroyed (no score) and cost a life each
    let mut rams = 0;
    state.enemies.retain(|e| {
        if rects_overlap(&player_rect, &e.rect()) {
            rams += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..rams {
        state.lose_life();
    }

    // 2. Enemy bullets
    let mut hits = 0;
    state.enemy_bullets.retain(|b| {
        if circle_overlaps_rect(b.pos, b.radius, &player_rect) {
            hits += 1;
            false
        } else {
            true
        }
    });
    for _ in 0..hits {
        state.lose_life();
    }

    // 3. Power-up pickups
    let mut collected = Vec::new();
    state.power_ups.retain(|p| {
        if circle_overlaps_rect(p.pos, p.radius, &player_rect) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        state.progression.apply_power_up(kind);
    }

    // 4. Player bullets vs enemies
    resolve_bullet_hits(state);
}

/// Each bullet resolves against the first enemy it overlaps and is consumed;
/// an enemy destroyed earlier in the same pass no longer blocks later
/// bullets. Removal is deferred to a retain pass after the scan.
fn resolve_bullet_hits(state: &mut GameState) {
    let GameState {
        bullets,
        enemies,
        power_ups,
        progression,
        events,
        rng,
        ..
    } = state;

    let mut spent = vec![false; bullets.len()];
    for (bullet_idx, bullet) in bullets.iter().enumerate() {
        let bullet_rect = bullet.rect();
        for enemy in enemies.iter_mut() {
            if enemy.hp == 0 {
                continue;
            }
            if !rects_overlap(&bullet_rect, &enemy.rect()) {
                continue;
            }
            spent[bullet_idx] = true;

            if enemy.hp > 1 {
                enemy.hp -= 1;
                events.push(GameEvent::HitSpark { pos: bullet.pos });
            } else {
                enemy.hp = 0;
                progression.score += enemy.points;
                events.push(GameEvent::Explosion {
                    pos: enemy.pos,
                    variant: enemy.variant,
                });
                if let Some(drop) = spawn::roll_power_up(rng, enemy.pos) {
                    power_ups.push(drop);
                }
            }
            break;
        }
    }

    let mut idx = 0;
    bullets.retain(|_| {
        let keep = !spent[idx];
        idx += 1;
        keep
    });
    enemies.retain(|e| e.hp > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyVariant, PowerUp, PowerUpKind};

    /// A stationary enemy parked at `pos`, out of the spawner's way
    fn parked_enemy(pos: Vec2, half: f32, hp: u32) -> Enemy {
        Enemy {
            pos,
            half,
            speed_y: 0.0,
            drift: 0.0,
            phase: 0.0,
            variant: if hp > 1 {
                EnemyVariant::Tank
            } else {
                EnemyVariant::Basic
            },
            hp,
            max_hp: hp,
            points: if hp > 1 { 25 } else { 10 },
            shoot_timer: None,
        }
    }

    /// Fresh state with the spawner pushed far into the future
    fn quiet_state() -> GameState {
        let mut state = GameState::new(1);
        state.spawn_timer = 1_000.0;
        state
    }

    fn bullet_at(pos: Vec2) -> Bullet {
        Bullet {
            pos,
            half: Vec2::new(BULLET_WIDTH / 2.0, BULLET_HEIGHT / 2.0),
            speed: BULLET_SPEED,
        }
    }

    #[test]
    fn first_tick_spawns_an_enemy() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.enemies.len(), 1);
        assert!((state.spawn_timer - 1.0).abs() < 1e-6);
    }

    #[test]
    fn fire_spawns_one_bullet_and_sets_cooldown() {
        let mut state = quiet_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.player.fire_cooldown, BASE_FIRE_INTERVAL);

        // Cooldown not yet elapsed: no second shot
        tick(&mut state, &input, 0.1);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn spread_buff_fires_three_bullets() {
        let mut state = quiet_state();
        state.progression.spread_timer = 8.0;
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.0);
        assert_eq!(state.bullets.len(), 3);
        let xs: Vec<f32> = state.bullets.iter().map(|b| b.pos.x - state.player.pos.x).collect();
        assert_eq!(xs, SPREAD_OFFSETS.to_vec());
    }

    #[test]
    fn rapid_buff_shortens_fire_interval() {
        let mut state = quiet_state();
        state.progression.rapid_timer = 7.0;
        tick(&mut state, &TickInput::default(), 0.016);
        assert!((state.player.fire_interval - BASE_FIRE_INTERVAL * RAPID_FIRE_SCALE).abs() < 1e-6);

        // Expired: back to the base interval
        state.progression.rapid_timer = 0.0;
        tick(&mut state, &TickInput::default(), 0.016);
        assert_eq!(state.player.fire_interval, BASE_FIRE_INTERVAL);
    }

    #[test]
    fn tank_dies_on_third_hit_with_sparks_then_explosion() {
        let mut state = quiet_state();
        let tank_pos = Vec2::new(200.0, 300.0);
        state.enemies.push(parked_enemy(tank_pos, 24.0, 3));

        for expected_hp in [2, 1] {
            state.bullets.push(bullet_at(tank_pos));
            tick(&mut state, &TickInput::default(), 0.0);
            assert_eq!(state.enemies[0].hp, expected_hp);
            assert_eq!(state.events, vec![GameEvent::HitSpark { pos: tank_pos }]);
            assert!(state.bullets.is_empty());
            assert_eq!(state.progression.score, 0);
        }

        state.bullets.push(bullet_at(tank_pos));
        tick(&mut state, &TickInput::default(), 0.0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.progression.score, 25);
        assert_eq!(
            state.events,
            vec![GameEvent::Explosion {
                pos: tank_pos,
                variant: EnemyVariant::Tank
            }]
        );
    }

    #[test]
    fn bullet_resolves_against_first_enemy_only() {
        let mut state = quiet_state();
        let pos = Vec2::new(200.0, 300.0);
        state.enemies.push(parked_enemy(pos, 20.0, 1));
        state.enemies.push(parked_enemy(pos, 20.0, 1));
        state.bullets.push(bullet_at(pos));

        tick(&mut state, &TickInput::default(), 0.0);

        // One enemy destroyed, the stacked one untouched, bullet consumed
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, 1);
        assert!(state.bullets.is_empty());
        assert_eq!(state.progression.score, 10);
    }

    #[test]
    fn two_bullets_kill_two_stacked_enemies() {
        let mut state = quiet_state();
        let pos = Vec2::new(200.0, 300.0);
        state.enemies.push(parked_enemy(pos, 20.0, 1));
        state.enemies.push(parked_enemy(pos, 20.0, 1));
        state.bullets.push(bullet_at(pos));
        state.bullets.push(bullet_at(pos));

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.enemies.is_empty());
        assert_eq!(state.progression.score, 20);
    }

    #[test]
    fn enemy_escaping_bottom_costs_a_life() {
        let mut state = quiet_state();
        let mut enemy = parked_enemy(Vec2::new(100.0, PLAY_HEIGHT - 1.0), 15.0, 1);
        enemy.speed_y = 2_000.0;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), 0.1);

        assert!(state.enemies.is_empty());
        assert_eq!(state.progression.lives, MAX_LIVES - 1);
    }

    #[test]
    fn ramming_enemy_is_removed_and_costs_a_life() {
        let mut state = quiet_state();
        state.enemies.push(parked_enemy(state.player.pos, 20.0, 3));

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.enemies.is_empty());
        assert_eq!(state.progression.lives, MAX_LIVES - 1);
        // Destroyed by contact, not by a bullet: no score, no explosion event
        assert_eq!(state.progression.score, 0);
        assert!(state.events.is_empty());
    }

    #[test]
    fn enemy_bullet_hit_consumes_shield_first() {
        let mut state = quiet_state();
        state.progression.shield_charges = 1;
        state.enemy_bullets.push(EnemyBullet {
            pos: state.player.pos,
            radius: ENEMY_BULLET_RADIUS,
            speed: ENEMY_BULLET_SPEED,
        });

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.progression.shield_charges, 0);
        assert_eq!(state.progression.lives, MAX_LIVES);
        assert_eq!(state.player.invuln_timer, SHIELD_INVULN_SECS);
    }

    #[test]
    fn power_up_pickup_applies_buff() {
        let mut state = quiet_state();
        state.power_ups.push(PowerUp {
            pos: state.player.pos,
            fall_speed: POWER_UP_FALL_SPEED,
            radius: POWER_UP_RADIUS,
            kind: PowerUpKind::Spread,
        });

        tick(&mut state, &TickInput::default(), 0.0);

        assert!(state.power_ups.is_empty());
        assert_eq!(state.progression.spread_timer, SPREAD_DURATION);
    }

    #[test]
    fn tank_shoot_timer_emits_bullet_and_reseeds() {
        let mut state = quiet_state();
        let mut tank = parked_enemy(Vec2::new(200.0, 100.0), 24.0, 3);
        tank.shoot_timer = Some(0.01);
        state.enemies.push(tank);

        tick(&mut state, &TickInput::default(), 0.02);

        assert_eq!(state.enemy_bullets.len(), 1);
        let timer = state.enemies[0].shoot_timer.expect("timer reseeded");
        assert!((2.4..4.0).contains(&timer));
    }

    #[test]
    fn invalid_dt_freezes_motion() {
        for bad_dt in [-0.5, f32::NAN, f32::INFINITY] {
            let mut state = quiet_state();
            state.enemies.push(parked_enemy(Vec2::new(100.0, 100.0), 15.0, 1));
            state.enemies[0].speed_y = 100.0;
            let before = state.enemies[0].pos;

            let input = TickInput {
                move_right: true,
                ..Default::default()
            };
            tick(&mut state, &input, bad_dt);

            assert_eq!(state.enemies[0].pos, before);
            assert_eq!(state.player.pos.x, PLAY_WIDTH / 2.0);
        }
    }

    #[test]
    fn game_over_freezes_gameplay() {
        let mut state = quiet_state();
        state.enemies.push(parked_enemy(Vec2::new(100.0, 100.0), 15.0, 1));
        state.enemies[0].speed_y = 100.0;
        state.phase = GamePhase::GameOver;

        tick(&mut state, &TickInput::default(), 0.1);

        assert_eq!(state.enemies[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn restart_input_revives_after_game_over() {
        let mut state = quiet_state();
        state.progression.lives = 0;
        state.progression.score = 999;
        state.phase = GamePhase::GameOver;

        let input = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input, 0.016);

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.progression.score, 0);
        assert_eq!(state.progression.lives, MAX_LIVES);
    }

    #[test]
    fn bullets_leaving_the_top_are_pruned() {
        let mut state = quiet_state();
        state.bullets.push(bullet_at(Vec2::new(100.0, 5.0)));

        tick(&mut state, &TickInput::default(), 0.1);

        assert!(state.bullets.is_empty());
    }

    #[test]
    fn player_clamped_to_margins() {
        let mut state = quiet_state();
        let input = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..200 {
            tick(&mut state, &input, 0.05);
        }
        assert_eq!(state.player.pos.x, PLAYER_MARGIN);
    }
}
