mod display;
mod input;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use galaga_shooter::assets::SpriteSheet;
use galaga_shooter::compute::{apply_command, init_session, tick};
use galaga_shooter::config::Tunables;
use galaga_shooter::entities::{Screen, Session};

use input::{HeldKeys, KeyAction};

/// Upper bound on the time step fed to the simulation, so a stalled
/// terminal does not teleport everything on the next frame.
const MAX_FRAME_TIME: f32 = 0.1;

#[derive(Parser)]
#[command(name = "galaga_shooter")]
#[command(about = "A Galaga-style arcade shooter for the terminal")]
struct Args {
    /// JSON file overriding gameplay tunables
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON file overriding the sprite glyphs
    #[arg(long)]
    sprites: Option<PathBuf>,
    /// Seed the RNG for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Where log output goes (the terminal is busy drawing the game)
    #[arg(long, default_value = "galaga_shooter.log")]
    log_file: PathBuf,
}

// ── High-score persistence ────────────────────────────────────────────────────

fn high_score_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".galaga_shooter_score")
}

fn load_high_score() -> u32 {
    std::fs::read_to_string(high_score_path())
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn save_high_score(score: u32) {
    if let Err(err) = std::fs::write(high_score_path(), score.to_string()) {
        tracing::warn!("could not save high score: {err}");
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Run frames until the player confirms exit or presses Ctrl+C.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    sprites: &SpriteSheet,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> anyhow::Result<()> {
    let mut keys = HeldKeys::default();
    let mut frame: u64 = 0;
    let mut last = Instant::now();
    let mut saved_high_score = session.high_score;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(key) = ev else { continue };
            match keys.record(key, session.screen, frame) {
                Some(KeyAction::Abort) => return Ok(()),
                Some(KeyAction::Command(command)) => {
                    apply_command(session, command, rng);
                    if session.screen != Screen::Playing {
                        keys.clear();
                    }
                }
                None => {}
            }
        }
        if session.exit_requested {
            return Ok(());
        }

        let dt = last.elapsed().as_secs_f32().min(MAX_FRAME_TIME);
        last = Instant::now();
        let controls = keys.snapshot(frame);
        tick(session, &controls, dt, rng);

        if session.high_score > saved_high_score && session.screen != Screen::Playing {
            save_high_score(session.high_score);
            saved_high_score = session.high_score;
        }

        let (width, height) = terminal::size().context("failed to query terminal size")?;
        display::render(out, session, sprites, width, height)?;

        let budget = session.settings.frame_time();
        let elapsed = frame_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let tunables = match &args.config {
        Some(path) => Tunables::load(path)?,
        None => Tunables::default(),
    };
    let sprites = SpriteSheet::load_or_default(args.sprites.as_deref());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting");

    let mut session = init_session(tunables, load_high_score(), &mut rng);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &mut session, &sprites, &mut rng, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let best = session.high_score.max(session.score);
    if best > load_high_score() {
        save_high_score(best);
    }
    tracing::info!(score = session.score, high_score = best, "exiting");

    result
}
