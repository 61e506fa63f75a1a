/// Shared game data types and the master session state.

use std::time::Duration;

use crate::config::Tunables;
use crate::enemy::Enemy;
use crate::player::Player;
use crate::projectile::Projectile;
use crate::star::Star;

/// Enemy difficulty. Health and firing behaviour derive from the tier; the
/// renderer picks a colour per tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DifficultyTier {
    /// One hit.
    Scout,
    /// Two hits.
    Fighter,
    /// Three hits.
    Guard,
    /// Three hits, and drops bombs instead of plain shots.
    Bomber,
}

impl DifficultyTier {
    pub fn health(self) -> i32 {
        match self {
            DifficultyTier::Scout => 1,
            DifficultyTier::Fighter => 2,
            DifficultyTier::Guard | DifficultyTier::Bomber => 3,
        }
    }

    pub fn fires_bombs(self) -> bool {
        self == DifficultyTier::Bomber
    }
}

/// Top-level screen the session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    Settings,
    GameOver,
    ExitConfirmation,
}

/// UI intents fed to the screen state machine by the front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Start a new game, or resume when paused.
    Start,
    /// The escape key: pause, back out of a sub-screen or ask to quit.
    Escape,
    OpenSettings,
    ToggleStarfield,
    CycleFrameRate,
    /// Leave the current screen for the main menu.
    ToMenu,
    ConfirmExit,
}

/// Held controls for one update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub starfield: bool,
    pub target_fps: u32,
}

impl Settings {
    /// Wall-clock budget for one frame at the selected rate.
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.target_fps.max(1) as f32)
    }
}

// ── Master session state ──────────────────────────────────────────────────────

/// Everything the frame loop mutates. Owned by the front end and passed by
/// `&mut` into the update functions in `compute`.
#[derive(Clone, Debug)]
pub struct Session {
    pub tunables: Tunables,
    pub settings: Settings,
    pub screen: Screen,
    /// Where Escape leads back to from Settings or ExitConfirmation.
    pub return_screen: Screen,
    pub exit_requested: bool,
    pub player: Player,
    /// Live enemies; every one has positive health.
    pub enemies: Vec<Enemy>,
    /// Shots whose enemy is gone but which are still in flight.
    pub enemy_projectiles: Vec<Projectile>,
    pub stars: Vec<Star>,
    pub score: u32,
    /// The highest score seen so far (updated live during play).
    pub high_score: u32,
    pub level: u32,
    pub wave: u32,
    /// Seconds of play elapsed; stops while not on the Playing screen.
    pub clock: f64,
    pub frame: u64,
}
