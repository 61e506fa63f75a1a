/// The player ship.
///
/// Position is stored as a fraction of the screen so placement survives a
/// change of virtual resolution; pixel coordinates are re-derived each update.

use rand::Rng;

use crate::config::Tunables;
use crate::entities::PlayerInput;
use crate::geometry::Rect;
use crate::projectile::{self, Projectile};

/// Fractional spawn / respawn position.
pub const DEFAULT_POSITION: (f32, f32) = (0.5, 0.9);

#[derive(Clone, Debug)]
pub struct Player {
    pub pos_x_percent: f32,
    pub pos_y_percent: f32,
    /// Pixel position derived from the fractions on the last update.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub movement_speed: f32,
    pub shoot_cooldown: f32,
    pub time_since_last_shot: f32,
    pub lives: u32,
    pub exploding: bool,
    /// Seconds since the last life was lost. Only advances while exploding.
    pub explosion_timer: f32,
    /// Which cannon the next shot leaves from.
    pub fire_from_left: bool,
    pub projectiles: Vec<Projectile>,
}

impl Player {
    pub fn new(tunables: &Tunables) -> Self {
        let (px, py) = DEFAULT_POSITION;
        let mut player = Self {
            pos_x_percent: px,
            pos_y_percent: py,
            x: 0.0,
            y: 0.0,
            width: tunables.player_width,
            height: tunables.player_height,
            movement_speed: tunables.player_speed,
            shoot_cooldown: tunables.player_shoot_cooldown,
            // Allow a shot on the very first frame.
            time_since_last_shot: tunables.player_shoot_cooldown,
            lives: tunables.player_lives,
            exploding: false,
            explosion_timer: 0.0,
            fire_from_left: true,
            projectiles: Vec::new(),
        };
        player.sync_pixels(tunables.screen_width, tunables.screen_height);
        player
    }

    pub fn update(
        &mut self,
        input: &PlayerInput,
        dt: f32,
        now: f64,
        tunables: &Tunables,
        rng: &mut impl Rng,
    ) {
        if self.exploding {
            self.explosion_timer += dt;
            return;
        }

        let (sw, sh) = (tunables.screen_width, tunables.screen_height);

        if input.right {
            self.pos_x_percent += self.movement_speed / sw;
        }
        if input.left {
            self.pos_x_percent -= self.movement_speed / sw;
        }
        if input.down {
            self.pos_y_percent += self.movement_speed / sh;
        }
        if input.up {
            self.pos_y_percent -= self.movement_speed / sh;
        }

        self.pos_x_percent = clamp_fraction(self.pos_x_percent, self.width / 2.0 / sw);
        self.pos_y_percent = clamp_fraction(self.pos_y_percent, self.height / 2.0 / sh);
        self.sync_pixels(sw, sh);

        self.time_since_last_shot += dt;
        if input.fire && self.time_since_last_shot >= self.shoot_cooldown {
            self.shoot(tunables.player_projectile_speed);
            self.time_since_last_shot = 0.0;
        }

        projectile::update_all(&mut self.projectiles, dt, now, sh, rng);
    }

    fn shoot(&mut self, speed: f32) {
        let offset = self.width / 4.0;
        let x = if self.fire_from_left {
            self.x - offset
        } else {
            self.x + offset
        };
        self.fire_from_left = !self.fire_from_left;
        self.projectiles
            .push(Projectile::new(x, self.y - self.height / 2.0, speed));
    }

    /// Lose a life and start exploding. Shots in flight are lost with the ship.
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.exploding = true;
        self.explosion_timer = 0.0;
        self.projectiles.clear();
    }

    pub fn respawn(&mut self, screen_width: f32, screen_height: f32) {
        let (px, py) = DEFAULT_POSITION;
        self.pos_x_percent = px;
        self.pos_y_percent = py;
        self.exploding = false;
        self.explosion_timer = 0.0;
        self.sync_pixels(screen_width, screen_height);
    }

    fn sync_pixels(&mut self, screen_width: f32, screen_height: f32) {
        self.x = self.pos_x_percent * screen_width;
        self.y = self.pos_y_percent * screen_height;
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn is_exploding(&self) -> bool {
        self.exploding
    }

    pub fn bounds(&self) -> Rect {
        Rect::centered(self.x, self.y, self.width, self.height)
    }
}

/// Clamp a fraction so a sprite whose half-extent is `half` (as a fraction
/// of the screen) stays fully visible. Sprites wider than the screen are
/// centred.
fn clamp_fraction(value: f32, half: f32) -> f32 {
    if half >= 0.5 {
        0.5
    } else {
        value.clamp(half, 1.0 - half)
    }
}
