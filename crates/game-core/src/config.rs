//! Game configuration loaded from `flipflop.toml`.

use audio::AudioConfig;
use boat::BoatTimings;
use common::{GameError, GameResult};
use fishing::FishingRules;
use island::{IslandLayout, DEFAULT_SPEED};
use serde::Deserialize;

use crate::input::KeyBindings;

/// Player movement settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Distance covered per frame.
    pub speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }
}

/// Every tunable of the simulation. Missing sections use the defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub island: IslandLayout,
    pub movement: MovementConfig,
    pub boat: BoatTimings,
    pub fishing: FishingRules,
    pub audio: AudioConfig,
    pub input: KeyBindings,
    /// Seed for reward placement; random when absent.
    pub seed: Option<u64>,
    /// Draw with the high contrast palette.
    pub colorblind: bool,
}

impl GameConfig {
    /// Loads configuration from a file if it exists.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Self::parse(&data)
    }

    /// Parses configuration from TOML text.
    pub fn parse(data: &str) -> GameResult<Self> {
        let config: Self = toml::from_str(data).map_err(|e| GameError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> GameResult<()> {
        let fishing = &self.fishing;
        if !(fishing.reward_min_radius >= 0.0
            && fishing.reward_min_radius < fishing.reward_max_radius)
        {
            return Err(GameError::Config(format!(
                "fishing reward radius must satisfy 0 <= min < max, got [{}, {})",
                fishing.reward_min_radius, fishing.reward_max_radius
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_nonexistent_returns_default() {
        let cfg = GameConfig::load("/no/such/flipflop.toml").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.fishing.capacity, 5);
        assert_eq!(cfg.boat.cycle_ms(), 33_000);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(GameConfig::parse("").unwrap(), GameConfig::default());
    }

    #[test]
    fn load_overrides_fields() {
        let mut path = std::env::temp_dir();
        path.push("test_flipflop.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "seed = 9").unwrap();
        writeln!(file, "[fishing]").unwrap();
        writeln!(file, "tick_ms = 1000").unwrap();
        writeln!(file, "[input]").unwrap();
        writeln!(file, "interact = [\"e\"]").unwrap();
        let cfg = GameConfig::load(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(path).unwrap();
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.fishing.tick_ms, 1000);
        assert_eq!(cfg.fishing.capacity, 5);
        assert_eq!(cfg.input.interact, vec!["e".to_string()]);
        assert_eq!(cfg.input.up, KeyBindings::default().up);
    }

    #[test]
    fn island_section_overrides_zones() {
        let cfg = GameConfig::parse(
            "[island]\nradius = 5.0\n[island.pier]\nmin_x = 0.0\nmax_x = 1.0\nmin_z = 0.0\nmax_z = 1.0\n",
        )
        .unwrap();
        assert_eq!(cfg.island.radius, 5.0);
        assert_eq!(cfg.island.pier.max_x, 1.0);
        assert_eq!(cfg.island.shed_reach, IslandLayout::default().shed_reach);
    }

    #[test]
    fn colorblind_flag_parses() {
        assert!(!GameConfig::default().colorblind);
        assert!(GameConfig::parse("colorblind = true\n").unwrap().colorblind);
    }

    #[test]
    fn empty_reward_ring_is_rejected() {
        let res = GameConfig::parse("[fishing]\nreward_min_radius = 3.0\nreward_max_radius = 3.0\n");
        assert!(matches!(res, Err(GameError::Config(_))));
        let res = GameConfig::parse("[fishing]\nreward_min_radius = 4.0\n");
        assert!(matches!(res, Err(GameError::Config(_))));
        assert!(GameConfig::parse("[fishing]\nreward_max_radius = 4.0\n").is_ok());
    }

    #[test]
    fn malformed_file_is_config_error() {
        let res = GameConfig::parse("[boat\n");
        assert!(matches!(res, Err(GameError::Config(_))));
    }
}
