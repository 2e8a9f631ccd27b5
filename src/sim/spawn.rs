//! Asteroid spawning and difficulty curve
//!
//! Spawn rate scales with score, asteroid speed scales with run time, and
//! once a run is old enough asteroids start cutting in from the sides on
//! angled trajectories aimed at the middle of the field.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::Asteroid;
use crate::consts::{TARGET_BAND_MAX, TARGET_BAND_MIN};
use crate::tuning::Tuning;

/// Which edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntrySide {
    Top,
    Left,
    Right,
}

/// A freshly rolled asteroid, not yet assigned an ID
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidSpawn {
    pub side: EntrySide,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl AsteroidSpawn {
    pub fn into_asteroid(self, id: u32) -> Asteroid {
        Asteroid {
            id,
            pos: self.pos,
            vel: self.vel,
            size: self.size,
            rotation: self.rotation,
            rotation_speed: self.rotation_speed,
        }
    }
}

/// Milliseconds between spawns at the given score
///
/// Shrinks by one step per `spawn_interval_score_step` points, floored at the
/// minimum interval.
pub fn spawn_interval_ms(score: u64, tuning: &Tuning) -> f64 {
    let tiers = (score / tuning.spawn_interval_score_step) as f64;
    (tuning.initial_spawn_interval_ms - tiers * tuning.spawn_interval_step_ms)
        .max(tuning.min_spawn_interval_ms)
}

/// Asteroid speed (logical px per tick) after `elapsed_ms` of run time
pub fn asteroid_speed(elapsed_ms: f64, tuning: &Tuning) -> f32 {
    let elapsed_secs = elapsed_ms / 1000.0;
    let tiers = (elapsed_secs / tuning.speed_step_secs).floor() as f32;
    (tuning.initial_asteroid_speed + tiers * tuning.speed_step).min(tuning.max_asteroid_speed)
}

/// Whether side entries are unlocked after `elapsed_ms` of run time
pub fn angled_entry_unlocked(elapsed_ms: f64, tuning: &Tuning) -> bool {
    tuning
        .angled_entry_after_secs
        .is_some_and(|after| elapsed_ms / 1000.0 >= after)
}

/// Spawn an asteroid if the interval has elapsed since `last_spawn_ms`
pub fn maybe_spawn<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    now_ms: f64,
    elapsed_ms: f64,
    score: u64,
    last_spawn_ms: f64,
) -> Option<AsteroidSpawn> {
    if now_ms - last_spawn_ms < spawn_interval_ms(score, tuning) {
        return None;
    }
    Some(roll_asteroid(rng, tuning, elapsed_ms))
}

/// Roll size, spin and entry trajectory for a new asteroid
pub fn roll_asteroid<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, elapsed_ms: f64) -> AsteroidSpawn {
    let speed = asteroid_speed(elapsed_ms, tuning);
    let size = rng.random_range(tuning.asteroid_min_size..tuning.asteroid_max_size);
    let rotation: f32 = rng.random_range(-180.0..180.0);
    let spin = tuning.max_rotation_speed;
    let rotation_speed = if spin > 0.0 {
        rng.random_range(-spin..=spin)
    } else {
        0.0
    };

    let side = if angled_entry_unlocked(elapsed_ms, tuning) {
        match rng.random_range(0..3u8) {
            0 => EntrySide::Top,
            1 => EntrySide::Left,
            _ => EntrySide::Right,
        }
    } else {
        EntrySide::Top
    };

    let (pos, vel) = match side {
        EntrySide::Top => {
            let x = rng.random_range(0.0..tuning.field_width - size);
            (Vec2::new(x, -size), Vec2::new(0.0, speed))
        }
        EntrySide::Left | EntrySide::Right => {
            let y = rng.random_range(0.0..tuning.field_height - size);
            let x = if side == EntrySide::Left {
                -size
            } else {
                tuning.field_width
            };
            let pos = Vec2::new(x, y);
            let target = Vec2::new(
                rng.random_range(
                    tuning.field_width * TARGET_BAND_MIN..=tuning.field_width * TARGET_BAND_MAX,
                ),
                rng.random_range(
                    tuning.field_height * TARGET_BAND_MIN..=tuning.field_height * TARGET_BAND_MAX,
                ),
            );
            (pos, (target - pos).normalize_or_zero() * speed)
        }
    };

    AsteroidSpawn {
        side,
        pos,
        vel,
        size,
        rotation,
        rotation_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const SECS: f64 = 1000.0;

    #[test]
    fn test_spawn_interval_by_score() {
        let tuning = Tuning::default();
        assert_eq!(spawn_interval_ms(0, &tuning), 1000.0);
        assert_eq!(spawn_interval_ms(99, &tuning), 1000.0);
        assert_eq!(spawn_interval_ms(250, &tuning), 900.0);
        assert_eq!(spawn_interval_ms(1000, &tuning), 500.0);
        // Floored at the minimum
        assert_eq!(spawn_interval_ms(5000, &tuning), 500.0);
    }

    #[test]
    fn test_speed_by_elapsed_time() {
        let tuning = Tuning::default();
        assert!((asteroid_speed(0.0, &tuning) - 1.0).abs() < 1e-5);
        assert!((asteroid_speed(9.999 * SECS, &tuning) - 1.0).abs() < 1e-5);
        // floor(10 / 10) = 1 tier
        assert!((asteroid_speed(10.0 * SECS, &tuning) - 1.2).abs() < 1e-5);
        assert!((asteroid_speed(25.0 * SECS, &tuning) - 1.4).abs() < 1e-5);
        // Capped
        assert_eq!(asteroid_speed(3600.0 * SECS, &tuning), tuning.max_asteroid_speed);
    }

    #[test]
    fn test_waits_for_interval() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(maybe_spawn(&mut rng, &tuning, 1999.0, 999.0, 0, 1000.0).is_none());
        assert!(maybe_spawn(&mut rng, &tuning, 2000.0, 1000.0, 0, 1000.0).is_some());
        // Higher score shortens the wait
        assert!(maybe_spawn(&mut rng, &tuning, 1900.0, 900.0, 250, 1000.0).is_some());
    }

    #[test]
    fn test_early_spawns_fall_from_top() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..500 {
            let spawn = roll_asteroid(&mut rng, &tuning, 179.0 * SECS);
            assert_eq!(spawn.side, EntrySide::Top);
            assert_eq!(spawn.pos.y, -spawn.size);
            assert!(spawn.pos.x >= 0.0 && spawn.pos.x <= tuning.field_width - spawn.size);
            assert_eq!(spawn.vel.x, 0.0);
            assert!((spawn.vel.y - asteroid_speed(179.0 * SECS, &tuning)).abs() < 1e-5);
            assert!(spawn.size >= tuning.asteroid_min_size && spawn.size <= tuning.asteroid_max_size);
            assert!(spawn.rotation >= -180.0 && spawn.rotation <= 180.0);
            assert!(spawn.rotation_speed.abs() <= tuning.max_rotation_speed);
        }
    }

    #[test]
    fn test_late_spawns_use_all_sides() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let elapsed = 200.0 * SECS;
        let speed = asteroid_speed(elapsed, &tuning);
        let mut seen = [false; 3];

        for _ in 0..600 {
            let spawn = roll_asteroid(&mut rng, &tuning, elapsed);
            assert!((spawn.vel.length() - speed).abs() < 1e-3);
            match spawn.side {
                EntrySide::Top => {
                    seen[0] = true;
                    assert_eq!(spawn.vel.x, 0.0);
                }
                EntrySide::Left => {
                    seen[1] = true;
                    assert_eq!(spawn.pos.x, -spawn.size);
                    assert!(spawn.vel.x > 0.0, "left entries head into the field");
                }
                EntrySide::Right => {
                    seen[2] = true;
                    assert_eq!(spawn.pos.x, tuning.field_width);
                    assert!(spawn.vel.x < 0.0, "right entries head into the field");
                }
            }
            if spawn.side != EntrySide::Top {
                assert!(spawn.pos.y >= 0.0 && spawn.pos.y <= tuning.field_height - spawn.size);
            }
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_angled_trajectory_passes_through_center_band() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(9);
        let elapsed = 300.0 * SECS;
        let band_x = tuning.field_width * TARGET_BAND_MIN..=tuning.field_width * TARGET_BAND_MAX;
        let band_y = tuning.field_height * TARGET_BAND_MIN..=tuning.field_height * TARGET_BAND_MAX;

        for _ in 0..300 {
            let spawn = roll_asteroid(&mut rng, &tuning, elapsed);
            if spawn.side == EntrySide::Top {
                continue;
            }
            // Slab test: the trajectory line must cross the band rectangle
            let t0 = (band_x.start() - spawn.pos.x) / spawn.vel.x;
            let t1 = (band_x.end() - spawn.pos.x) / spawn.vel.x;
            let y0 = spawn.pos.y + spawn.vel.y * t0;
            let y1 = spawn.pos.y + spawn.vel.y * t1;
            let (lo, hi) = (y0.min(y1), y0.max(y1));
            assert!(
                hi >= band_y.start() - 1e-2 && lo <= band_y.end() + 1e-2,
                "trajectory misses the center band"
            );
        }
    }

    #[test]
    fn test_top_only_when_angled_entry_disabled() {
        let tuning = Tuning {
            angled_entry_after_secs: None,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let spawn = roll_asteroid(&mut rng, &tuning, 10_000.0 * SECS);
            assert_eq!(spawn.side, EntrySide::Top);
        }
    }

    #[test]
    fn test_same_seed_same_asteroids() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(77);
        let mut b = Pcg32::seed_from_u64(77);
        for i in 0..50 {
            let elapsed = i as f64 * 10.0 * SECS;
            assert_eq!(
                roll_asteroid(&mut a, &tuning, elapsed),
                roll_asteroid(&mut b, &tuning, elapsed)
            );
        }
    }
}
