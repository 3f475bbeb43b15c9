//! Spell catalog: canonical cooldown durations and icon asset ids
//!
//! Definitions are loaded from TOML in two layers:
//! - **Builtin**: embedded in the binary (read-only)
//! - **Custom**: an optional user file that overrides builtins by spell name
//!
//! The catalog is config data, not business logic: the live feed omits
//! explicit cooldown values most of the time, and the values here must match
//! what the game actually uses or every seeded countdown is wrong.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Builtin catalog shipped with the application.
const BUILTIN_CATALOG: &str = include_str!("../../data/spells.toml");

/// Level scaling for spells whose cooldown shortens as the owner levels up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelScaling {
    /// Seconds removed from the base per level.
    pub per_level_secs: u32,
    /// The cooldown never drops below this.
    pub floor_secs: u32,
}

/// One spell's canonical data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellDefinition {
    pub name: String,
    pub cooldown_secs: u32,
    /// ddragon asset id for the icon cache, e.g. "SummonerFlash".
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub scaling: Option<LevelScaling>,
}

/// On-disk catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_fallback")]
    pub fallback_cooldown_secs: u32,
    #[serde(default, rename = "spell")]
    pub spells: Vec<SpellDefinition>,
}

fn default_fallback() -> u32 {
    180
}

/// Cooldown lookup table, keyed by display name.
#[derive(Debug, Clone)]
pub struct SpellCatalog {
    spells: HashMap<String, SpellDefinition>,
    fallback_cooldown_secs: u32,
}

impl SpellCatalog {
    /// Load the builtin catalog, then merge the user override file on top
    /// if one exists. A broken override is logged and skipped; it never
    /// takes the builtin data down with it.
    pub fn load(custom_path: Option<&Path>) -> Result<Self, CatalogError> {
        let builtin: CatalogConfig =
            toml::from_str(BUILTIN_CATALOG).map_err(CatalogError::BuiltinParse)?;

        let mut catalog = Self::from_config(builtin);

        if let Some(path) = custom_path
            && path.exists()
        {
            match load_file(path) {
                Ok(config) => catalog.merge(config),
                Err(e) => warn!("ignoring spell catalog override: {e}"),
            }
        }

        Ok(catalog)
    }

    fn from_config(config: CatalogConfig) -> Self {
        let mut spells = HashMap::with_capacity(config.spells.len());
        for def in config.spells {
            spells.insert(def.name.clone(), def);
        }
        Self {
            spells,
            fallback_cooldown_secs: config.fallback_cooldown_secs,
        }
    }

    /// Overlay another config on top of this one, replacing by name.
    fn merge(&mut self, config: CatalogConfig) {
        for def in config.spells {
            self.spells.insert(def.name.clone(), def);
        }
    }

    /// Canonical cooldown in seconds for `name` at the owner's `level`.
    ///
    /// Unknown spells get the fallback duration so a new or renamed spell
    /// still produces a usable countdown.
    pub fn cooldown_secs(&self, name: &str, level: u32) -> u32 {
        match self.spells.get(name) {
            Some(def) => match def.scaling {
                Some(scaling) => def
                    .cooldown_secs
                    .saturating_sub(scaling.per_level_secs.saturating_mul(level))
                    .max(scaling.floor_secs),
                None => def.cooldown_secs,
            },
            None => self.fallback_cooldown_secs,
        }
    }

    /// ddragon asset id for a spell's icon, if the catalog knows one.
    pub fn icon_id(&self, name: &str) -> Option<&str> {
        self.spells.get(name).and_then(|def| def.icon.as_deref())
    }

    /// Default location of the user override file.
    pub fn default_custom_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sumtrack").join("spells.toml"))
    }
}

/// Load a single TOML catalog file.
fn load_file(path: &Path) -> Result<CatalogConfig, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Errors raised while loading catalog data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("builtin spell catalog is invalid: {0}")]
    BuiltinParse(#[source] toml::de::Error),
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> SpellCatalog {
        SpellCatalog::load(None).unwrap()
    }

    #[test]
    fn test_fixed_cooldowns() {
        let catalog = builtin();
        assert_eq!(catalog.cooldown_secs("Flash", 1), 300);
        assert_eq!(catalog.cooldown_secs("Flash", 18), 300);
        assert_eq!(catalog.cooldown_secs("Smite", 9), 90);
        assert_eq!(catalog.cooldown_secs("Exhaust", 3), 210);
    }

    #[test]
    fn test_level_scaled_cooldown_with_floor() {
        let catalog = builtin();
        // 330 - 10/level, floored at 240
        assert_eq!(catalog.cooldown_secs("Unleashed Teleport", 1), 320);
        assert_eq!(catalog.cooldown_secs("Unleashed Teleport", 9), 240);
        assert_eq!(catalog.cooldown_secs("Unleashed Teleport", 10), 240);
        assert_eq!(catalog.cooldown_secs("Unleashed Teleport", 15), 240);
    }

    #[test]
    fn test_scaled_cooldown_tolerates_absurd_level() {
        // The telemetry feed is lenient, so a garbage level must clamp to
        // the floor rather than overflow.
        let catalog = builtin();
        assert_eq!(catalog.cooldown_secs("Unleashed Teleport", u32::MAX), 240);
    }

    #[test]
    fn test_unknown_spell_uses_fallback() {
        let catalog = builtin();
        assert_eq!(catalog.cooldown_secs("Mystery Spell", 7), 180);
        assert_eq!(catalog.icon_id("Mystery Spell"), None);
    }

    #[test]
    fn test_icon_ids() {
        let catalog = builtin();
        assert_eq!(catalog.icon_id("Flash"), Some("SummonerFlash"));
        assert_eq!(catalog.icon_id("Ignite"), Some("SummonerDot"));
        assert_eq!(catalog.icon_id("Unleashed Teleport"), Some("SummonerTeleport"));
    }

    #[test]
    fn test_parse_override_toml() {
        let toml = r#"
[[spell]]
name = "Flash"
cooldown_secs = 270
icon = "SummonerFlash"
"#;
        let config: CatalogConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.spells.len(), 1);

        let mut catalog = builtin();
        catalog.merge(config);
        assert_eq!(catalog.cooldown_secs("Flash", 1), 270);
        // Untouched entries survive the merge
        assert_eq!(catalog.cooldown_secs("Heal", 1), 240);
    }
}
