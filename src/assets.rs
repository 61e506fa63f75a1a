/// Glyph sprites for the terminal renderer.
///
/// Sprites can be overridden from a JSON file. A missing or malformed file
/// is never fatal: the built-in glyphs are used instead.

use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;

use crate::entities::DifficultyTier;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpriteSheet {
    /// Rows of the player ship, top to bottom.
    pub player: Vec<String>,
    pub scout: Vec<String>,
    pub fighter: Vec<String>,
    pub guard: Vec<String>,
    pub bomber: Vec<String>,
    pub player_shot: String,
    pub enemy_shot: String,
    pub bomb: String,
    /// Shown where a bomb detonated.
    pub explosion: String,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        fn rows(r: &[&str]) -> Vec<String> {
            r.iter().map(|s| s.to_string()).collect()
        }
        Self {
            player: rows(&[" ▲ ", "/█\\"]),
            scout: rows(&["«▼»", "╚═╝"]),
            fighter: rows(&["(◎)", "╰─╯"]),
            guard: rows(&["[▼]", "╘═╛"]),
            bomber: rows(&["{●}", "╲▾╱"]),
            player_shot: "║".to_string(),
            enemy_shot: "↓".to_string(),
            bomb: "●".to_string(),
            explosion: "✹".to_string(),
        }
    }
}

impl SpriteSheet {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sprites {}", path.display()))?;
        let sheet: SpriteSheet = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse sprites {}", path.display()))?;
        sheet.validate()?;
        Ok(sheet)
    }

    /// Load `path` if given, falling back to the built-in sprites on any error.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match Self::load(path) {
            Ok(sheet) => sheet,
            Err(err) => {
                tracing::warn!("using built-in sprites: {err:#}");
                Self::default()
            }
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let ships = [
            ("player", &self.player),
            ("scout", &self.scout),
            ("fighter", &self.fighter),
            ("guard", &self.guard),
            ("bomber", &self.bomber),
        ];
        for (name, rows) in ships {
            if rows.is_empty() || rows.iter().all(|r| r.trim().is_empty()) {
                bail!("sprite `{name}` has no visible rows");
            }
        }
        for (name, glyph) in [
            ("player_shot", &self.player_shot),
            ("enemy_shot", &self.enemy_shot),
            ("bomb", &self.bomb),
            ("explosion", &self.explosion),
        ] {
            if glyph.chars().count() != 1 {
                bail!("sprite `{name}` must be a single character");
            }
        }
        Ok(())
    }

    pub fn enemy(&self, tier: DifficultyTier) -> &[String] {
        match tier {
            DifficultyTier::Scout => &self.scout,
            DifficultyTier::Fighter => &self.fighter,
            DifficultyTier::Guard => &self.guard,
            DifficultyTier::Bomber => &self.bomber,
        }
    }
}
