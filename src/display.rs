/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// session. No game logic is performed; this module only translates world
/// coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use galaga_shooter::assets::SpriteSheet;
use galaga_shooter::entities::{DifficultyTier, Screen, Session};
use galaga_shooter::projectile::Projectile;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_WAVE: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_PLAYER_EXPLODING: Color = Color::Red;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_BOMB: Color = Color::DarkYellow;
const C_EXPLOSION: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

fn tier_color(tier: DifficultyTier) -> Color {
    match tier {
        DifficultyTier::Scout => Color::Green,
        DifficultyTier::Fighter => Color::Yellow,
        DifficultyTier::Guard => Color::Red,
        DifficultyTier::Bomber => Color::Magenta,
    }
}

// ── World → terminal mapping ──────────────────────────────────────────────────

/// Maps the virtual play field onto the terminal cells inside the border
/// (columns 1..width-1, rows 2..height-2).
struct Viewport {
    world_w: f32,
    world_h: f32,
    cols: u16,
    rows: u16,
}

impl Viewport {
    fn new(session: &Session, width: u16, height: u16) -> Self {
        Self {
            world_w: session.tunables.screen_width,
            world_h: session.tunables.screen_height,
            cols: width.saturating_sub(2).max(1),
            rows: height.saturating_sub(4).max(1),
        }
    }

    /// The cell containing world point `(x, y)`, or `None` outside the field.
    fn cell(&self, x: f32, y: f32) -> Option<(i32, i32)> {
        if x < 0.0 || y < 0.0 || x > self.world_w || y > self.world_h {
            return None;
        }
        let col = (x / self.world_w * (self.cols - 1) as f32).round() as i32 + 1;
        let row = (y / self.world_h * (self.rows - 1) as f32).round() as i32 + 2;
        Some((col, row))
    }

    fn contains(&self, col: i32, row: i32) -> bool {
        col >= 1 && col <= self.cols as i32 && row >= 2 && row < self.rows as i32 + 2
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame for whichever screen the session is on.
pub fn render<W: Write>(
    out: &mut W,
    session: &Session,
    sprites: &SpriteSheet,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match session.screen {
        Screen::Menu => draw_menu(out, session, width, height)?,
        Screen::ExitConfirmation => {
            draw_menu(out, session, width, height)?;
            draw_dialog(
                out,
                width,
                height,
                "QUIT?",
                Color::Red,
                &["Y / Enter - Quit", "N / Esc - Stay"],
            )?;
        }
        Screen::Settings => draw_settings(out, session, width, height)?,
        Screen::Playing | Screen::Paused | Screen::GameOver => {
            let view = Viewport::new(session, width, height);
            draw_border(out, width, height)?;
            draw_field(out, session, sprites, &view)?;
            draw_hud(out, session, width)?;
            draw_controls_hint(out, height)?;
            match session.screen {
                Screen::Paused => draw_dialog(
                    out,
                    width,
                    height,
                    "PAUSED",
                    Color::Cyan,
                    &["Esc / Enter - Resume", "O - Settings", "M - Main Menu"],
                )?,
                Screen::GameOver => draw_game_over(out, session, width, height)?,
                _ => {}
            }
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1: top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2: bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, session: &Session, width: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>7}  Hi:{:>7}",
        session.score, session.high_score
    )))?;

    let wave_str = format!("[ LEVEL {}  WAVE {} ]", session.level, session.wave);
    let wx = (width / 2).saturating_sub(wave_str.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(wx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_WAVE))?;
    out.queue(Print(&wave_str))?;

    let hearts: String = "♥".repeat(session.player.lives() as usize);
    let lives_str = format!("Lives:{}", hearts);
    let lx = width.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;

    Ok(())
}

// ── Play field ────────────────────────────────────────────────────────────────

fn draw_field<W: Write>(
    out: &mut W,
    session: &Session,
    sprites: &SpriteSheet,
    view: &Viewport,
) -> std::io::Result<()> {
    if session.settings.starfield {
        for star in &session.stars {
            let shade = if star.brightness >= 180 { Color::White } else { Color::DarkGrey };
            put(out, view, star.x, star.y, ".", shade)?;
        }
    }

    for enemy in &session.enemies {
        draw_sprite(out, view, enemy.x, enemy.y, sprites.enemy(enemy.tier), tier_color(enemy.tier))?;
        for shot in &enemy.projectiles {
            draw_enemy_shot(out, view, shot, sprites, session.clock)?;
        }
    }
    for shot in &session.enemy_projectiles {
        draw_enemy_shot(out, view, shot, sprites, session.clock)?;
    }

    for shot in &session.player.projectiles {
        put(out, view, shot.x, shot.y, &sprites.player_shot, C_BULLET_PLAYER)?;
    }

    let (px, py) = session.player.position();
    if session.player.is_exploding() {
        // Blink the wreck a few times per second.
        if (session.player.explosion_timer * 6.0) as u32 % 2 == 0 {
            put(out, view, px, py, &sprites.explosion, C_PLAYER_EXPLODING)?;
        }
    } else {
        draw_sprite(out, view, px, py, &sprites.player, C_PLAYER)?;
    }
    Ok(())
}

fn draw_enemy_shot<W: Write>(
    out: &mut W,
    view: &Viewport,
    shot: &Projectile,
    sprites: &SpriteSheet,
    now: f64,
) -> std::io::Result<()> {
    match shot.explosion_progress(now) {
        Some(progress) => {
            // Expanding ring, up to three cells out.
            let Some((col, row)) = view.cell(shot.x, shot.y) else {
                return Ok(());
            };
            let r = (progress * 3.0).round() as i32;
            out.queue(style::SetForegroundColor(C_EXPLOSION))?;
            for (dc, dr) in [(0, 0), (-r, 0), (r, 0), (0, -r), (0, r)] {
                put_cell(out, view, col + dc * 2, row + dr, &sprites.explosion)?;
            }
            Ok(())
        }
        None if shot.is_bomb => put(out, view, shot.x, shot.y, &sprites.bomb, C_BOMB),
        None => put(out, view, shot.x, shot.y, &sprites.enemy_shot, C_BULLET_ENEMY),
    }
}

/// Draw a multi-row sprite centred on world point `(x, y)`, clipped to the field.
fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    x: f32,
    y: f32,
    rows: &[String],
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(x, y) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    let top = row - rows.len() as i32 / 2;
    for (i, line) in rows.iter().enumerate() {
        let left = col - line.chars().count() as i32 / 2;
        put_cell(out, view, left, top + i as i32, line)?;
    }
    Ok(())
}

fn put<W: Write>(out: &mut W, view: &Viewport, x: f32, y: f32, glyph: &str, color: Color) -> std::io::Result<()> {
    if let Some((col, row)) = view.cell(x, y) {
        out.queue(style::SetForegroundColor(color))?;
        put_cell(out, view, col, row, glyph)?;
    }
    Ok(())
}

fn put_cell<W: Write>(out: &mut W, view: &Viewport, col: i32, row: i32, text: &str) -> std::io::Result<()> {
    let len = text.chars().count() as i32;
    if view.contains(col, row) && view.contains(col + len - 1, row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print(text))?;
    }
    Ok(())
}

// ── Menus ─────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, session: &Session, width: u16, height: u16) -> std::io::Result<()> {
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  G A L A G A  ★";
    centered(out, cx, cy.saturating_sub(6), title, Color::Cyan)?;

    if session.high_score > 0 {
        let hs = format!("Best Score: {}", session.high_score);
        centered(out, cx, cy.saturating_sub(5), &hs, Color::Yellow)?;
    }

    let options: &[(&str, &str)] = &[
        ("Enter", "Start Game"),
        ("O", "Settings"),
        ("Esc", "Quit"),
    ];
    for (i, (key, label)) in options.iter().enumerate() {
        let row = cy.saturating_sub(2) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{:^5}] ", key)))?;
        out.queue(style::SetForegroundColor(Color::White))?;
        out.queue(Print(*label))?;
    }

    // Tier legend
    let legend: &[(DifficultyTier, &str)] = &[
        (DifficultyTier::Scout, "Scout   1 hit"),
        (DifficultyTier::Fighter, "Fighter 2 hits"),
        (DifficultyTier::Guard, "Guard   3 hits"),
        (DifficultyTier::Bomber, "Bomber  3 hits, drops bombs"),
    ];
    for (i, (tier, desc)) in legend.iter().enumerate() {
        let row = cy + 2 + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(10), row))?;
        out.queue(style::SetForegroundColor(tier_color(*tier)))?;
        out.queue(Print("■ "))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(*desc))?;
    }
    Ok(())
}

fn draw_settings<W: Write>(out: &mut W, session: &Session, width: u16, height: u16) -> std::io::Result<()> {
    let on_off = |b: bool| if b { "ON" } else { "OFF" };
    let starfield = format!("S - Starfield: {}", on_off(session.settings.starfield));
    let fps = format!("F - Frame rate: {} FPS", session.settings.target_fps);
    draw_dialog(
        out,
        width,
        height,
        "SETTINGS",
        Color::Yellow,
        &[starfield.as_str(), fps.as_str(), "Esc - Back"],
    )
}

fn draw_game_over<W: Write>(out: &mut W, session: &Session, width: u16, height: u16) -> std::io::Result<()> {
    let score_line = format!("Final Score: {:>7}", session.score);
    let best_line = if session.score >= session.high_score && session.score > 0 {
        format!("★ NEW BEST: {:>7} ★", session.score)
    } else {
        format!("Best Score:  {:>7}", session.high_score)
    };
    let reached = format!("Reached level {} wave {}", session.level, session.wave);
    draw_dialog(
        out,
        width,
        height,
        "GAME  OVER",
        Color::Red,
        &[
            score_line.as_str(),
            best_line.as_str(),
            reached.as_str(),
            "Enter - Play Again  M - Menu",
        ],
    )
}

/// A boxed title followed by centred lines, in the middle of the screen.
fn draw_dialog<W: Write>(
    out: &mut W,
    width: u16,
    height: u16,
    title: &str,
    color: Color,
    lines: &[&str],
) -> std::io::Result<()> {
    let inner = 20usize.max(title.chars().count() + 4);
    let pad = inner - title.chars().count();
    let boxed = [
        format!("╔{}╗", "═".repeat(inner)),
        format!("║{}{}{}║", " ".repeat(pad / 2), title, " ".repeat(pad - pad / 2)),
        format!("╚{}╝", "═".repeat(inner)),
    ];

    let cx = width / 2;
    let total_rows = (boxed.len() + lines.len()) as u16;
    let start_row = (height / 2).saturating_sub(total_rows / 2);

    for (i, line) in boxed.iter().enumerate() {
        centered(out, cx, start_row + i as u16, line, color)?;
    }
    for (i, line) in lines.iter().enumerate() {
        centered(out, cx, start_row + (boxed.len() + i) as u16, line, Color::White)?;
    }
    Ok(())
}

fn centered<W: Write>(out: &mut W, cx: u16, row: u16, text: &str, color: Color) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(cx.saturating_sub(text.chars().count() as u16 / 2), row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → ↑ ↓ / WASD : Move   SPACE : Shoot   ESC : Pause"))?;
    Ok(())
}
