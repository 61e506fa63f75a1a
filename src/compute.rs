/// Session-level game logic: the per-frame update, the collision sweep,
/// wave/level progression, respawning and the screen state machine.
///
/// All randomness comes through the injected RNG so callers control
/// determinism (tests use a seeded `StdRng`).

use rand::Rng;

use crate::config::Tunables;
use crate::entities::{Command, PlayerInput, Screen, Session, Settings};
use crate::geometry::Rect;
use crate::player::Player;
use crate::projectile;
use crate::star;
use crate::wave::spawn_enemies;

/// Score awarded per enemy destroyed.
pub const ENEMY_SCORE: u32 = 100;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build a fresh session sitting on the main menu, with the first wave
/// already queued above the screen.
pub fn init_session(tunables: Tunables, high_score: u32, rng: &mut impl Rng) -> Session {
    let settings = Settings {
        starfield: true,
        target_fps: tunables.target_fps,
    };
    let stars = star::starfield(
        tunables.star_count,
        tunables.screen_width,
        tunables.screen_height,
        rng,
    );
    Session {
        player: Player::new(&tunables),
        enemies: spawn_enemies(1, 1, &tunables, rng),
        enemy_projectiles: Vec::new(),
        stars,
        score: 0,
        high_score,
        level: 1,
        wave: 1,
        clock: 0.0,
        frame: 0,
        screen: Screen::Menu,
        return_screen: Screen::Menu,
        exit_requested: false,
        settings,
        tunables,
    }
}

/// Throw away the current play state and start over on the Playing screen.
/// Tunables, settings and the high score carry over.
pub fn restart(session: &mut Session, rng: &mut impl Rng) {
    let high_score = session.high_score.max(session.score);
    let settings = session.settings.clone();
    *session = init_session(session.tunables.clone(), high_score, rng);
    session.settings = settings;
    session.screen = Screen::Playing;
}

// ── Per-frame update ────────────────────────────────────────────────────────

/// Advance the session by one update of `dt` seconds. Does nothing unless
/// the session is on the Playing screen.
pub fn tick(session: &mut Session, input: &PlayerInput, dt: f32, rng: &mut impl Rng) {
    if session.screen != Screen::Playing {
        return;
    }
    session.frame += 1;
    session.clock += dt as f64;
    let now = session.clock;
    let (width, height) = (session.tunables.screen_width, session.tunables.screen_height);

    session.player.update(input, dt, now, &session.tunables, rng);

    for star in session.stars.iter_mut() {
        star.update(dt, width, height, rng);
    }

    for enemy in session.enemies.iter_mut() {
        enemy.update(dt, now, &session.tunables, rng);
    }
    projectile::update_all(&mut session.enemy_projectiles, dt, now, height, rng);
    remove_departed_enemies(session);

    if !session.player.exploding {
        resolve_collisions(session);
    }
    if session.screen == Screen::GameOver {
        return;
    }

    if wave_cleared(session) {
        advance_wave(session, rng);
    }

    try_respawn(session);
    session.high_score = session.high_score.max(session.score);
}

/// Drop enemies that flew off the bottom of the screen. They are not scored;
/// their shots stay in play.
fn remove_departed_enemies(session: &mut Session) {
    let height = session.tunables.screen_height;
    let mut i = 0;
    while i < session.enemies.len() {
        if session.enemies[i].is_off_screen(height) {
            let mut departed = session.enemies.remove(i);
            session.enemy_projectiles.extend(departed.take_projectiles());
        } else {
            i += 1;
        }
    }
}

// ── Collisions ──────────────────────────────────────────────────────────────

/// What one collision sweep did, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Player shots that struck an enemy.
    pub hits: u32,
    /// Enemies destroyed by those hits.
    pub kills: u32,
    /// Whether the player lost a life.
    pub player_hit: bool,
}

/// Run the full collision sweep for one frame.
///
/// Each player shot damages at most one enemy and is consumed by it. The
/// player then loses at most one life, from touching an enemy or an enemy
/// shot; once exploding, nothing else can hit the ship this frame.
pub fn resolve_collisions(session: &mut Session) -> CollisionReport {
    let mut report = CollisionReport::default();

    let mut i = 0;
    while i < session.player.projectiles.len() {
        let shot = session.player.projectiles[i].bounds();
        let Some(target) = session
            .enemies
            .iter()
            .position(|e| e.bounds().intersects(&shot))
        else {
            i += 1;
            continue;
        };

        report.hits += 1;
        let enemy = &mut session.enemies[target];
        enemy.take_damage();
        if enemy.is_destroyed() {
            let mut destroyed = session.enemies.remove(target);
            session.enemy_projectiles.extend(destroyed.take_projectiles());
            session.score += ENEMY_SCORE;
            report.kills += 1;
            tracing::debug!(tier = ?destroyed.tier, score = session.score, "enemy destroyed");
        }
        session.player.projectiles.remove(i);
    }

    if session.player.exploding {
        return report;
    }
    let ship = session.player.bounds();

    if session.enemies.iter().any(|e| e.bounds().intersects(&ship)) {
        player_hit(session);
        report.player_hit = true;
        return report;
    }

    if consume_enemy_shot(session, &ship) {
        player_hit(session);
        report.player_hit = true;
    }

    report
}

/// Remove the first enemy shot overlapping `ship`, searching the orphaned
/// shots first and then each enemy's own. A detonated bomb still hits on
/// contact until it is pruned, but never beyond its own bounds.
fn consume_enemy_shot(session: &mut Session, ship: &Rect) -> bool {
    let touches = |p: &projectile::Projectile| p.bounds().intersects(ship);

    if let Some(idx) = session.enemy_projectiles.iter().position(touches) {
        session.enemy_projectiles.remove(idx);
        return true;
    }
    for enemy in session.enemies.iter_mut() {
        if let Some(idx) = enemy.projectiles.iter().position(touches) {
            enemy.projectiles.remove(idx);
            return true;
        }
    }
    false
}

fn player_hit(session: &mut Session) {
    session.player.lose_life();
    tracing::debug!(lives = session.player.lives, "player lost a life");
    if session.player.lives == 0 {
        session.high_score = session.high_score.max(session.score);
        session.screen = Screen::GameOver;
        tracing::info!(score = session.score, level = session.level, wave = session.wave, "game over");
    }
}

// ── Waves & respawn ─────────────────────────────────────────────────────────

/// A wave is over once no enemy remains on or above the screen.
pub fn wave_cleared(session: &Session) -> bool {
    let height = session.tunables.screen_height;
    session.enemies.iter().all(|e| e.is_off_screen(height))
}

/// Move to the next wave (and level, every `level + 2` waves) and spawn it.
pub fn advance_wave(session: &mut Session, rng: &mut impl Rng) {
    session.wave += 1;
    if session.wave > session.level + 2 {
        session.level += 1;
        session.wave = 1;
        tracing::info!(level = session.level, "level up");
    }

    for mut leftover in session.enemies.drain(..) {
        session.enemy_projectiles.extend(leftover.take_projectiles());
    }
    session.enemies = spawn_enemies(session.level, session.wave, &session.tunables, rng);
}

/// Bring the ship back once it has been down long enough and no enemy is
/// near where it went down.
pub fn try_respawn(session: &mut Session) -> bool {
    let player = &session.player;
    let tunables = &session.tunables;
    if !player.exploding || player.lives == 0 || player.explosion_timer < tunables.respawn_delay {
        return false;
    }

    let zone = Rect::centered(
        player.x,
        player.y,
        tunables.respawn_clearance,
        tunables.respawn_clearance,
    );
    if session.enemies.iter().any(|e| e.bounds().intersects(&zone)) {
        return false;
    }

    session
        .player
        .respawn(tunables.screen_width, tunables.screen_height);
    tracing::debug!("player respawned");
    true
}

// ── Screen state machine ────────────────────────────────────────────────────

/// Apply one UI command to the screen state machine.
pub fn apply_command(session: &mut Session, command: Command, rng: &mut impl Rng) {
    let before = session.screen;

    match (session.screen, command) {
        (Screen::Menu, Command::Start) | (Screen::GameOver, Command::Start) => {
            restart(session, rng);
        }
        (Screen::Menu, Command::OpenSettings) | (Screen::Paused, Command::OpenSettings) => {
            session.return_screen = session.screen;
            session.screen = Screen::Settings;
        }
        (Screen::Menu, Command::Escape) => {
            session.return_screen = Screen::Menu;
            session.screen = Screen::ExitConfirmation;
        }
        (Screen::Playing, Command::Escape) => session.screen = Screen::Paused,
        (Screen::Paused, Command::Escape) | (Screen::Paused, Command::Start) => {
            session.screen = Screen::Playing;
        }
        (Screen::Paused, Command::ToMenu) | (Screen::GameOver, Command::ToMenu) => {
            session.high_score = session.high_score.max(session.score);
            session.screen = Screen::Menu;
        }
        (Screen::GameOver, Command::Escape) => session.screen = Screen::Menu,
        (Screen::Settings, Command::ToggleStarfield) => {
            session.settings.starfield = !session.settings.starfield;
        }
        (Screen::Settings, Command::CycleFrameRate) => {
            session.settings.target_fps = if session.settings.target_fps >= 60 { 30 } else { 60 };
        }
        (Screen::Settings, Command::Escape) | (Screen::Settings, Command::ToMenu) => {
            session.screen = session.return_screen;
        }
        (Screen::ExitConfirmation, Command::ConfirmExit) => session.exit_requested = true,
        (Screen::ExitConfirmation, Command::Escape) | (Screen::ExitConfirmation, Command::ToMenu) => {
            session.screen = session.return_screen;
        }
        _ => {}
    }

    if session.screen != before {
        tracing::debug!(from = ?before, to = ?session.screen, "screen changed");
    }
}
