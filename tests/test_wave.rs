use std::collections::HashSet;

use galaga_shooter::config::Tunables;
use galaga_shooter::enemy::EnemyState;
use galaga_shooter::entities::DifficultyTier;
use galaga_shooter::wave::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(11)
}

// ── Counts & speeds ───────────────────────────────────────────────────────────

#[test]
fn count_grows_with_level_and_wave() {
    assert_eq!(enemy_count(1, 1), 6);
    assert_eq!(enemy_count(1, 3), 8);
    assert_eq!(enemy_count(3, 2), 11);
}

#[test]
fn count_is_capped() {
    assert_eq!(enemy_count(8, 3), MAX_ENEMIES_PER_WAVE);
    assert_eq!(enemy_count(50, 1), MAX_ENEMIES_PER_WAVE);
}

#[test]
fn speed_scales_ten_percent_per_level() {
    assert!((enemy_speed(1) - 1.65).abs() < 1e-5);
    assert!((enemy_speed(5) - 2.25).abs() < 1e-5);
}

#[test]
fn palette_widens_with_level() {
    assert_eq!(tier_palette(1), &[DifficultyTier::Scout, DifficultyTier::Fighter]);
    assert_eq!(tier_palette(2).len(), 3);
    assert_eq!(tier_palette(3).len(), 4);
    assert_eq!(tier_palette(9).len(), 4);
    assert!(!tier_palette(2).contains(&DifficultyTier::Bomber));
}

// ── spawn_enemies ─────────────────────────────────────────────────────────────

#[test]
fn first_wave_has_six_entering_enemies_at_level_speed() {
    let t = Tunables::default();
    let enemies = spawn_enemies(1, 1, &t, &mut seeded_rng());
    assert_eq!(enemies.len(), 6);
    for e in &enemies {
        assert!((e.speed - 1.65).abs() < 1e-5);
        assert!(e.y < 0.0, "enemies start above the screen");
        assert_eq!(e.state, EnemyState::Entering);
        assert!(tier_palette(1).contains(&e.tier));
        assert_eq!(e.health, e.tier.health());
    }
}

#[test]
fn grid_columns_divide_screen_width_and_rows_stagger_upward() {
    let t = Tunables::default();
    let enemies = spawn_enemies(1, 1, &t, &mut seeded_rng());
    let column = t.screen_width / (GRID_COLUMNS + 1) as f32;
    for (i, e) in enemies.iter().enumerate() {
        let col = i % GRID_COLUMNS;
        let row = i / GRID_COLUMNS;
        assert!((e.x - (col + 1) as f32 * column).abs() < 1e-3);
        assert_eq!(e.y, -((row + 1) as f32) * ROW_SPACING);
    }
    // Sixth enemy opens the second row.
    assert!(enemies[5].y < enemies[0].y);
}

#[test]
fn later_levels_draw_from_every_tier() {
    let t = Tunables::default();
    let mut rng = seeded_rng();
    let mut seen = HashSet::new();
    for wave in 1..=10 {
        for e in spawn_enemies(3, wave, &t, &mut rng) {
            seen.insert(e.tier);
        }
    }
    assert_eq!(seen.len(), 4);
}

#[test]
fn level_one_never_spawns_top_tiers() {
    let t = Tunables::default();
    let mut rng = seeded_rng();
    for wave in 1..=3 {
        for e in spawn_enemies(1, wave, &t, &mut rng) {
            assert!(matches!(e.tier, DifficultyTier::Scout | DifficultyTier::Fighter));
        }
    }
}
