use galaga_shooter::config::Tunables;
use galaga_shooter::enemy::*;
use galaga_shooter::entities::DifficultyTier;

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Run `frames` updates of one 60 FPS frame each.
fn run(enemy: &mut Enemy, frames: usize, t: &Tunables, rng: &mut StdRng) {
    for i in 0..frames {
        enemy.update(DT, i as f64 * DT as f64, t, rng);
    }
}

fn in_formation(x: f32, y: f32, tier: DifficultyTier) -> Enemy {
    let mut e = Enemy::new(x, y, 1.5, 32.0, tier);
    e.state = EnemyState::Formation { anchor_x: x, elapsed: 0.0 };
    e
}

// ── Construction & damage ─────────────────────────────────────────────────────

#[test]
fn health_follows_tier() {
    let health = |tier| Enemy::new(0.0, 0.0, 1.0, 32.0, tier).health;
    assert_eq!(health(DifficultyTier::Scout), 1);
    assert_eq!(health(DifficultyTier::Fighter), 2);
    assert_eq!(health(DifficultyTier::Guard), 3);
    assert_eq!(health(DifficultyTier::Bomber), 3);
}

#[test]
fn new_enemy_is_entering_with_no_shots() {
    let e = Enemy::new(10.0, -60.0, 1.5, 32.0, DifficultyTier::Scout);
    assert_eq!(e.state, EnemyState::Entering);
    assert!(e.projectiles.is_empty());
}

#[test]
fn take_damage_removes_exactly_one_health() {
    let mut e = Enemy::new(0.0, 0.0, 1.0, 32.0, DifficultyTier::Guard);
    e.take_damage();
    assert_eq!(e.health, 2);
    assert!(!e.is_destroyed());
    e.take_damage();
    e.take_damage();
    assert_eq!(e.health, 0);
    assert!(e.is_destroyed());
}

// ── ENTERING ──────────────────────────────────────────────────────────────────

#[test]
fn entering_descends_at_speed_per_frame() {
    let t = Tunables::default();
    let mut e = Enemy::new(200.0, -60.0, 1.65, 32.0, DifficultyTier::Scout);
    e.update(DT, 0.0, &t, &mut seeded_rng());
    assert!(approx(e.y, -58.35), "y = {}", e.y);
    assert_eq!(e.x, 200.0);
    assert_eq!(e.state, EnemyState::Entering);
}

#[test]
fn entering_becomes_formation_past_row_100() {
    let t = Tunables::default();
    let mut e = Enemy::new(200.0, 99.5, 1.5, 32.0, DifficultyTier::Scout);
    e.update(DT, 0.0, &t, &mut seeded_rng());
    assert!(e.y > FORMATION_ENTRY_Y);
    assert_eq!(e.state, EnemyState::Formation { anchor_x: 200.0, elapsed: 0.0 });
}

#[test]
fn entering_enemy_never_shoots() {
    let t = Tunables::default();
    let mut e = Enemy::new(200.0, -1000.0, 1.0, 32.0, DifficultyTier::Scout);
    run(&mut e, 300, &t, &mut seeded_rng()); // five seconds
    assert_eq!(e.state, EnemyState::Entering);
    assert!(e.projectiles.is_empty());
}

// ── FORMATION ─────────────────────────────────────────────────────────────────

#[test]
fn formation_holds_row_and_sways_within_amplitude() {
    let t = Tunables::default();
    let mut rng = seeded_rng();
    let mut e = in_formation(400.0, 150.0, DifficultyTier::Scout);
    for i in 0..300 {
        e.update(DT, i as f64 * DT as f64, &t, &mut rng);
        assert_eq!(e.y, 150.0);
        assert!((e.x - 400.0).abs() <= t.formation_amplitude + 1e-3);
    }
}

#[test]
fn formation_turns_to_attack_after_its_duration() {
    let t = Tunables::default();
    let mut rng = seeded_rng();
    let mut e = in_formation(400.0, 150.0, DifficultyTier::Scout);

    run(&mut e, 590, &t, &mut rng);
    assert!(matches!(e.state, EnemyState::Formation { .. }));

    run(&mut e, 20, &t, &mut rng);
    assert_eq!(e.state, EnemyState::Attacking);
}

// ── ATTACKING ─────────────────────────────────────────────────────────────────

#[test]
fn attacking_dives_downward() {
    let t = Tunables::default();
    let mut e = Enemy::new(400.0, 200.0, 1.5, 32.0, DifficultyTier::Scout);
    e.state = EnemyState::Attacking;
    e.update(DT, 0.0, &t, &mut seeded_rng());
    // speed * dt * 40 = 1.0
    assert!(approx(e.y, 201.0), "y = {}", e.y);
}

#[test]
fn attacking_stays_inside_horizontal_bounds() {
    let t = Tunables::default();
    let mut rng = seeded_rng();
    for start_x in [0.0, 799.0] {
        let mut e = Enemy::new(start_x, -5000.0, 3.0, 32.0, DifficultyTier::Scout);
        e.state = EnemyState::Attacking;
        for i in 0..400 {
            e.update(DT, i as f64 * DT as f64, &t, &mut rng);
            assert!(e.x >= 16.0 && e.x <= 784.0, "x = {}", e.x);
        }
    }
}

// ── Shooting ──────────────────────────────────────────────────────────────────

#[test]
fn fires_plain_shot_after_cooldown() {
    let t = Tunables::default();
    let mut e = in_formation(400.0, 150.0, DifficultyTier::Fighter);
    let mut rng = seeded_rng();

    run(&mut e, 110, &t, &mut rng);
    assert!(e.projectiles.is_empty());

    run(&mut e, 20, &t, &mut rng);
    assert_eq!(e.projectiles.len(), 1);
    let shot = &e.projectiles[0];
    assert!(!shot.is_bomb);
    assert!(shot.speed > 0.0);
}

#[test]
fn bomber_drops_bombs() {
    let t = Tunables::default();
    let mut e = in_formation(400.0, 150.0, DifficultyTier::Bomber);
    run(&mut e, 130, &t, &mut seeded_rng());
    assert_eq!(e.projectiles.len(), 1);
    assert!(e.projectiles[0].is_bomb);
    assert_eq!(e.projectiles[0].speed, t.bomb_speed);
}

#[test]
fn take_projectiles_leaves_enemy_empty() {
    let t = Tunables::default();
    let mut e = in_formation(400.0, 150.0, DifficultyTier::Scout);
    run(&mut e, 130, &t, &mut seeded_rng());
    let taken = e.take_projectiles();
    assert_eq!(taken.len(), 1);
    assert!(e.projectiles.is_empty());
}

// ── Whole life cycle ──────────────────────────────────────────────────────────

#[test]
fn state_progression_is_one_way() {
    let t = Tunables::default();
    let mut rng = seeded_rng();
    let mut e = Enemy::new(300.0, -60.0, 1.65, 32.0, DifficultyTier::Bomber);
    let mut phase = e.state.phase();
    for i in 0..1500 {
        e.update(DT, i as f64 * DT as f64, &t, &mut rng);
        let next = e.state.phase();
        assert!(next >= phase, "went from phase {phase} back to {next}");
        phase = next;
    }
    assert_eq!(e.state, EnemyState::Attacking);
}

#[test]
fn off_screen_once_fully_below_bottom() {
    let e = Enemy::new(0.0, 617.0, 1.0, 32.0, DifficultyTier::Scout);
    assert!(e.is_off_screen(600.0));
    let e = Enemy::new(0.0, 615.0, 1.0, 32.0, DifficultyTier::Scout);
    assert!(!e.is_off_screen(600.0));
}
