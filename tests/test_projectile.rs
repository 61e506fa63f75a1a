use galaga_shooter::projectile::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[test]
fn upward_projectile_moves_up_by_speed_per_frame() {
    let mut p = Projectile::new(100.0, 300.0, -10.0);
    p.update(DT, 0.0, &mut seeded_rng());
    assert!(approx(p.y, 290.0), "y = {}", p.y);
    assert_eq!(p.x, 100.0);
}

#[test]
fn downward_projectile_moves_down() {
    let mut p = Projectile::new(100.0, 300.0, 5.0);
    p.update(DT, 0.0, &mut seeded_rng());
    assert!(approx(p.y, 305.0));
}

#[test]
fn motion_scales_with_frame_time() {
    // Two half-length frames cover the same ground as one full frame.
    let mut rng = seeded_rng();
    let mut a = Projectile::new(0.0, 300.0, -10.0);
    let mut b = a.clone();
    a.update(DT, 0.0, &mut rng);
    b.update(DT / 2.0, 0.0, &mut rng);
    b.update(DT / 2.0, 0.0, &mut rng);
    assert!(approx(a.y, b.y));
}

// ── Off-screen detection ──────────────────────────────────────────────────────

#[test]
fn upward_projectile_leaves_through_top_only() {
    // Height 10 → bottom edge is y + 5.
    assert!(Projectile::new(0.0, -6.0, -10.0).is_off_screen(600.0));
    assert!(!Projectile::new(0.0, -4.0, -10.0).is_off_screen(600.0));
    // Far below the screen but travelling up: still in play.
    assert!(!Projectile::new(0.0, 900.0, -10.0).is_off_screen(600.0));
}

#[test]
fn downward_projectile_leaves_through_bottom_only() {
    // Top edge is y - 5.
    assert!(Projectile::new(0.0, 606.0, 5.0).is_off_screen(600.0));
    assert!(!Projectile::new(0.0, 604.0, 5.0).is_off_screen(600.0));
    // Above the screen but travelling down: still in play.
    assert!(!Projectile::new(0.0, -100.0, 5.0).is_off_screen(600.0));
}

#[test]
fn stationary_projectile_is_never_off_screen() {
    assert!(!Projectile::new(0.0, -500.0, 0.0).is_off_screen(600.0));
    assert!(!Projectile::new(0.0, 5000.0, 0.0).is_off_screen(600.0));
}

#[test]
fn bounds_are_centred_on_position() {
    let b = Projectile::new(104.0, 105.0, -10.0).bounds();
    assert_eq!((b.x, b.y, b.width, b.height), (100.0, 100.0, 8.0, 10.0));
}

// ── Bombs ─────────────────────────────────────────────────────────────────────

#[test]
fn plain_projectile_never_explodes() {
    let mut rng = seeded_rng();
    let mut p = Projectile::new(0.0, 0.0, 0.0);
    for i in 0..2000 {
        p.update(DT, i as f64 * DT as f64, &mut rng);
    }
    assert!(!p.exploded);
}

#[test]
fn bomb_eventually_detonates_and_records_time() {
    let mut rng = seeded_rng();
    let mut bomb = Projectile::bomb(50.0, 0.0, 0.0);
    let mut detonated_at = None;
    for i in 0..5000 {
        let now = i as f64;
        bomb.update(DT, now, &mut rng);
        if bomb.exploded {
            detonated_at = Some(now);
            break;
        }
    }
    let now = detonated_at.expect("a 1% per-frame bomb should go off within 5000 frames");
    assert_eq!(bomb.explosion_time, now);
}

#[test]
fn exploded_bomb_stops_moving() {
    let mut rng = seeded_rng();
    let mut bomb = Projectile::bomb(50.0, 100.0, 2.0);
    bomb.exploded = true;
    bomb.explosion_time = 0.0;
    for _ in 0..10 {
        bomb.update(DT, 0.1, &mut rng);
    }
    assert_eq!(bomb.y, 100.0);
}

#[test]
fn explosion_expires_after_half_a_second() {
    let mut bomb = Projectile::bomb(0.0, 0.0, 2.0);
    assert!(!bomb.is_expired(100.0));
    assert_eq!(bomb.explosion_progress(100.0), None);

    bomb.exploded = true;
    bomb.explosion_time = 1.0;
    assert!(!bomb.is_expired(1.4));
    assert!(bomb.is_expired(1.5));
    assert_eq!(bomb.explosion_progress(1.25), Some(0.5));
    assert_eq!(bomb.explosion_progress(9.0), Some(1.0));
}

// ── update_all ────────────────────────────────────────────────────────────────

#[test]
fn update_all_prunes_departed_and_expired() {
    let mut rng = seeded_rng();
    let mut expired = Projectile::bomb(10.0, 300.0, 2.0);
    expired.exploded = true;
    expired.explosion_time = 0.0;

    let mut shots = vec![
        Projectile::new(10.0, 300.0, -10.0), // stays
        Projectile::new(20.0, 4.0, -10.0),   // moves to -6 → gone
        Projectile::new(30.0, 600.0, 10.0),  // moves to 610 → gone
        expired,
    ];
    update_all(&mut shots, DT, 2.0, 600.0, &mut rng);
    assert_eq!(shots.len(), 1);
    assert_eq!(shots[0].x, 10.0);
}
