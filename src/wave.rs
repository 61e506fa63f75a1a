/// Wave spawning: how many enemies a wave holds, how fast they fly and how
/// they are laid out before descending onto the field.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Tunables;
use crate::enemy::Enemy;
use crate::entities::DifficultyTier;

pub const BASE_ENEMY_COUNT: usize = 5;
pub const MAX_ENEMIES_PER_WAVE: usize = 20;
pub const BASE_ENEMY_SPEED: f32 = 1.5;
pub const GRID_COLUMNS: usize = 5;
/// Vertical gap between grid rows; rows start above the top edge.
pub const ROW_SPACING: f32 = 60.0;

pub fn enemy_count(level: u32, wave: u32) -> usize {
    let extra = level.saturating_sub(1) as usize * 2 + wave as usize;
    (BASE_ENEMY_COUNT + extra).min(MAX_ENEMIES_PER_WAVE)
}

pub fn enemy_speed(level: u32) -> f32 {
    BASE_ENEMY_SPEED * (1.0 + level as f32 * 0.1)
}

/// Tiers an enemy may be drawn from at `level`.
pub fn tier_palette(level: u32) -> &'static [DifficultyTier] {
    const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Scout,
        DifficultyTier::Fighter,
        DifficultyTier::Guard,
        DifficultyTier::Bomber,
    ];
    match level {
        0 | 1 => &ALL[..2],
        2 => &ALL[..3],
        _ => &ALL[..],
    }
}

/// Build the enemies of one wave, laid out in a grid above the screen.
pub fn spawn_enemies(level: u32, wave: u32, tunables: &Tunables, rng: &mut impl Rng) -> Vec<Enemy> {
    let count = enemy_count(level, wave);
    let speed = enemy_speed(level);
    let palette = tier_palette(level);
    let column_width = tunables.screen_width / (GRID_COLUMNS + 1) as f32;

    let enemies: Vec<Enemy> = (0..count)
        .map(|i| {
            let col = i % GRID_COLUMNS;
            let row = i / GRID_COLUMNS;
            let x = (col + 1) as f32 * column_width;
            let y = -((row + 1) as f32) * ROW_SPACING;
            let tier = palette.choose(rng).copied().unwrap_or(DifficultyTier::Scout);
            Enemy::new(x, y, speed, tunables.enemy_size, tier)
        })
        .collect();

    tracing::debug!(level, wave, count, speed, "spawned wave");
    enemies
}
