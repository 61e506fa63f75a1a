/// Background starfield. Purely decorative.

use rand::Rng;

use crate::projectile::FRAME_RATE_NORMALIZATION;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// 100..=255, used by the renderer to pick a shade.
    pub brightness: u8,
}

impl Star {
    /// A star at a random point of the screen.
    pub fn new(screen_width: f32, screen_height: f32, rng: &mut impl Rng) -> Self {
        Self {
            x: rng.gen_range(0.0..=screen_width),
            y: rng.gen_range(0.0..=screen_height),
            speed: rng.gen_range(1..=5) as f32,
            brightness: rng.gen_range(100..=255),
        }
    }

    /// Drift downward; once past the bottom, recycle at the top with a fresh
    /// column, speed and brightness.
    pub fn update(&mut self, dt: f32, screen_width: f32, screen_height: f32, rng: &mut impl Rng) {
        self.y += self.speed * dt * FRAME_RATE_NORMALIZATION;
        if self.y > screen_height {
            self.y = 0.0;
            self.x = rng.gen_range(0.0..=screen_width);
            self.speed = rng.gen_range(1..=5) as f32;
            self.brightness = rng.gen_range(100..=255);
        }
    }
}

pub fn starfield(count: usize, screen_width: f32, screen_height: f32, rng: &mut impl Rng) -> Vec<Star> {
    (0..count)
        .map(|_| Star::new(screen_width, screen_height, rng))
        .collect()
}
