/// Projectiles fired by the player and by enemies.

use rand::Rng;

use crate::geometry::Rect;

pub const PROJECTILE_WIDTH: f32 = 8.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;

/// Speeds are tuned per update at 60 FPS; multiplying by `dt` and this
/// constant keeps motion frame-rate independent.
pub const FRAME_RATE_NORMALIZATION: f32 = 60.0;

/// Per-update chance that a live bomb detonates.
pub const BOMB_DETONATION_CHANCE: f64 = 0.01;

/// Seconds the explosion visual of a detonated bomb lasts.
pub const EXPLOSION_DURATION: f64 = 0.5;

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    /// Negative travels up the screen, positive travels down.
    pub speed: f32,
    pub is_bomb: bool,
    pub exploded: bool,
    /// Session clock value at detonation; meaningless until `exploded`.
    pub explosion_time: f64,
}

impl Projectile {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            x,
            y,
            speed,
            is_bomb: false,
            exploded: false,
            explosion_time: 0.0,
        }
    }

    pub fn bomb(x: f32, y: f32, speed: f32) -> Self {
        Self {
            is_bomb: true,
            ..Self::new(x, y, speed)
        }
    }

    /// Advance one update. `now` is the session clock in seconds.
    pub fn update(&mut self, dt: f32, now: f64, rng: &mut impl Rng) {
        if self.is_bomb && !self.exploded && rng.gen_bool(BOMB_DETONATION_CHANCE) {
            self.exploded = true;
            self.explosion_time = now;
        }
        if !self.exploded {
            self.y += self.speed * dt * FRAME_RATE_NORMALIZATION;
        }
    }

    /// Upward projectiles leave through the top edge, downward ones through
    /// the bottom edge. A projectile with zero speed never leaves.
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        let bounds = self.bounds();
        if self.speed > 0.0 {
            bounds.y > screen_height
        } else if self.speed < 0.0 {
            bounds.bottom() < 0.0
        } else {
            false
        }
    }

    /// True once a detonated bomb's explosion visual has run its course.
    pub fn is_expired(&self, now: f64) -> bool {
        self.exploded && now - self.explosion_time >= EXPLOSION_DURATION
    }

    /// Fraction of the explosion visual elapsed, in `[0, 1]`, or `None` when
    /// the projectile has not detonated.
    pub fn explosion_progress(&self, now: f64) -> Option<f32> {
        if !self.exploded {
            return None;
        }
        let t = ((now - self.explosion_time) / EXPLOSION_DURATION).clamp(0.0, 1.0);
        Some(t as f32)
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.x, self.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// Update every projectile in `projectiles`, dropping those that left the
/// screen or whose explosion finished.
pub fn update_all(
    projectiles: &mut Vec<Projectile>,
    dt: f32,
    now: f64,
    screen_height: f32,
    rng: &mut impl Rng,
) {
    for p in projectiles.iter_mut() {
        p.update(dt, now, rng);
    }
    projectiles.retain(|p| !p.is_off_screen(screen_height) && !p.is_expired(now));
}
