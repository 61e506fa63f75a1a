/// Enemy ships and their ENTERING → FORMATION → ATTACKING behaviour.
///
/// Each state has its own update function returning the next state, so the
/// motion formulas stay isolated and can be exercised one state at a time.

use rand::Rng;

use crate::config::Tunables;
use crate::entities::DifficultyTier;
use crate::geometry::Rect;
use crate::projectile::{self, Projectile, FRAME_RATE_NORMALIZATION};

/// Enemies settle into formation once they descend past this row.
/// Fixed in world units regardless of the virtual screen height.
pub const FORMATION_ENTRY_Y: f32 = 100.0;

/// Vertical speed multiplier while diving.
const ATTACK_DESCENT_RATE: f32 = 40.0;
/// Horizontal sway multiplier while diving.
const ATTACK_SWAY_RATE: f32 = 100.0;
const ATTACK_SWAY_FREQUENCY: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnemyState {
    /// Flying straight down onto the field.
    Entering,
    /// Holding station, swaying around `anchor_x`.
    Formation { anchor_x: f32, elapsed: f32 },
    /// Diving toward the bottom of the screen.
    Attacking,
}

impl EnemyState {
    /// Position in the one-way progression; never decreases for an enemy.
    pub fn phase(&self) -> u8 {
        match self {
            EnemyState::Entering => 0,
            EnemyState::Formation { .. } => 1,
            EnemyState::Attacking => 2,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    pub size: f32,
    pub tier: DifficultyTier,
    pub health: i32,
    pub state: EnemyState,
    /// Seconds since the last shot.
    pub shoot_timer: f32,
    /// Drives the sway patterns; reset on each state change.
    pub pattern_clock: f32,
    pub projectiles: Vec<Projectile>,
}

impl Enemy {
    pub fn new(x: f32, y: f32, speed: f32, size: f32, tier: DifficultyTier) -> Self {
        Self {
            x,
            y,
            speed,
            size,
            tier,
            health: tier.health(),
            state: EnemyState::Entering,
            shoot_timer: 0.0,
            pattern_clock: 0.0,
            projectiles: Vec::new(),
        }
    }

    pub fn update(&mut self, dt: f32, now: f64, tunables: &Tunables, rng: &mut impl Rng) {
        self.pattern_clock += dt;

        self.state = match self.state {
            EnemyState::Entering => self.update_entering(dt),
            EnemyState::Formation { anchor_x, elapsed } => {
                self.update_formation(anchor_x, elapsed + dt, tunables)
            }
            EnemyState::Attacking => self.update_attacking(dt, tunables.screen_width),
        };

        if self.state != EnemyState::Entering {
            self.shoot_timer += dt;
            if self.shoot_timer >= tunables.enemy_shoot_cooldown {
                self.shoot_timer = 0.0;
                self.shoot(tunables);
            }
        }

        projectile::update_all(&mut self.projectiles, dt, now, tunables.screen_height, rng);
    }

    fn update_entering(&mut self, dt: f32) -> EnemyState {
        self.y += self.speed * dt * FRAME_RATE_NORMALIZATION;
        if self.y > FORMATION_ENTRY_Y {
            self.pattern_clock = 0.0;
            EnemyState::Formation {
                anchor_x: self.x,
                elapsed: 0.0,
            }
        } else {
            EnemyState::Entering
        }
    }

    fn update_formation(&mut self, anchor_x: f32, elapsed: f32, tunables: &Tunables) -> EnemyState {
        self.x = anchor_x + (self.pattern_clock * self.speed).sin() * tunables.formation_amplitude;
        if elapsed >= tunables.formation_duration {
            self.pattern_clock = 0.0;
            EnemyState::Attacking
        } else {
            EnemyState::Formation { anchor_x, elapsed }
        }
    }

    fn update_attacking(&mut self, dt: f32, screen_width: f32) -> EnemyState {
        self.y += self.speed * dt * ATTACK_DESCENT_RATE;
        self.x += (self.pattern_clock * ATTACK_SWAY_FREQUENCY).cos() * self.speed * dt * ATTACK_SWAY_RATE;

        let half = self.size / 2.0;
        self.x = self.x.clamp(half, (screen_width - half).max(half));
        EnemyState::Attacking
    }

    fn shoot(&mut self, tunables: &Tunables) {
        let muzzle_y = self.y + self.size / 2.0;
        let shot = if self.tier.fires_bombs() {
            Projectile::bomb(self.x, muzzle_y, tunables.bomb_speed)
        } else {
            Projectile::new(self.x, muzzle_y, tunables.enemy_projectile_speed)
        };
        self.projectiles.push(shot);
    }

    pub fn take_damage(&mut self) {
        self.health -= 1;
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0
    }

    /// True once the whole ship is below the bottom edge.
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        self.bounds().y > screen_height
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.x, self.y, self.size, self.size)
    }

    /// Hand over every projectile still in flight, leaving this enemy with none.
    pub fn take_projectiles(&mut self) -> Vec<Projectile> {
        std::mem::take(&mut self.projectiles)
    }
}
