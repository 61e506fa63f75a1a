/// Tunable gameplay constants.
///
/// Every field has a default matching the stock game, so a config file only
/// needs to name the values it wants to change.

use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tunables {
    // ── Virtual screen ──────────────────────────────────────────────────────
    /// Width of the virtual play field, in world units.
    pub screen_width: f32,
    /// Height of the virtual play field, in world units.
    pub screen_height: f32,
    /// Logic updates per second.
    pub target_fps: u32,

    // ── Player ───────────────────────────────────────────────────────────────
    pub player_width: f32,
    pub player_height: f32,
    /// World units per update; divided by the screen dimension to get the
    /// fractional step.
    pub player_speed: f32,
    /// Seconds between shots.
    pub player_shoot_cooldown: f32,
    pub player_lives: u32,
    pub player_projectile_speed: f32,

    // ── Enemies ──────────────────────────────────────────────────────────────
    pub enemy_size: f32,
    /// Seconds between enemy shots once out of the ENTERING state.
    pub enemy_shoot_cooldown: f32,
    /// Seconds spent holding formation before diving.
    pub formation_duration: f32,
    /// Peak horizontal sway while in formation.
    pub formation_amplitude: f32,
    pub enemy_projectile_speed: f32,
    pub bomb_speed: f32,

    // ── Respawn ──────────────────────────────────────────────────────────────
    /// Minimum seconds the player stays exploded.
    pub respawn_delay: f32,
    /// Side length of the square around the player that must be clear of
    /// enemies before respawning.
    pub respawn_clearance: f32,

    // ── Background ───────────────────────────────────────────────────────────
    pub star_count: usize,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            target_fps: 60,
            player_width: 48.0,
            player_height: 32.0,
            player_speed: 8.0,
            player_shoot_cooldown: 0.2,
            player_lives: 3,
            player_projectile_speed: -10.0,
            enemy_size: 32.0,
            enemy_shoot_cooldown: 2.0,
            formation_duration: 10.0,
            formation_amplitude: 40.0,
            enemy_projectile_speed: 5.0,
            bomb_speed: 2.0,
            respawn_delay: 2.0,
            respawn_clearance: 160.0,
            star_count: 60,
        }
    }
}

impl Tunables {
    /// Load tunables from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let tunables: Tunables = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tunables
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded tunables");
        Ok(tunables)
    }

    /// Reject values the simulation cannot run with: an empty play field,
    /// negative sizes or timings, or a zero frame rate.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("enemy_size", self.enemy_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("`{name}` must be positive, got {value}");
            }
        }
        for (name, value) in [
            ("player_speed", self.player_speed),
            ("player_shoot_cooldown", self.player_shoot_cooldown),
            ("enemy_shoot_cooldown", self.enemy_shoot_cooldown),
            ("formation_duration", self.formation_duration),
            ("formation_amplitude", self.formation_amplitude),
            ("respawn_delay", self.respawn_delay),
            ("respawn_clearance", self.respawn_clearance),
        ] {
            if !value.is_finite() || value < 0.0 {
                bail!("`{name}` must not be negative, got {value}");
            }
        }
        if self.target_fps == 0 {
            bail!("`target_fps` must be at least 1");
        }
        Ok(())
    }
}
