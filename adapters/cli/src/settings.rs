//! TOML settings file with `[simulation]`, `[growth]`, `[fire]`, `[actors]`
//! and `[scenery]` tables.

use std::{fs, path::Path, time::Duration};

use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use skogshuggare_core::DEFAULT_MAX_ITERATIONS;
use skogshuggare_simulation::Config;
use skogshuggare_system_fire as fire;
use skogshuggare_system_growth as growth;
use skogshuggare_system_squirrels as squirrels;

/// Tunables for one run. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    pub(crate) simulation: SimulationSettings,
    pub(crate) growth: GrowthSettings,
    pub(crate) fire: FireSettings,
    pub(crate) actors: ActorSettings,
    pub(crate) scenery: ScenerySettings,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationSettings {
    /// Master seed; a random one is drawn when absent.
    pub(crate) seed: Option<u64>,
    pub(crate) tick_ms: u64,
    pub(crate) animation_ms: u64,
    pub(crate) max_iterations: u32,
    pub(crate) chop_stages: u32,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: 30,
            animation_ms: 200,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            chop_stages: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GrowthSettings {
    pub(crate) seed_chance: f64,
    pub(crate) sapling_chance: f64,
    pub(crate) seeding_chance: f64,
    pub(crate) seeding_max: u32,
    pub(crate) initial_trees_min: u32,
    pub(crate) initial_trees_max: u32,
    pub(crate) initial_grass_min: u32,
    pub(crate) initial_grass_max: u32,
}

impl Default for GrowthSettings {
    fn default() -> Self {
        Self {
            seed_chance: 0.010,
            sapling_chance: 0.005,
            seeding_chance: 0.005,
            seeding_max: 3,
            initial_trees_min: 10,
            initial_trees_max: 40,
            initial_grass_min: 20,
            initial_grass_max: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct FireSettings {
    pub(crate) spread_chance: f64,
    /// Age in ticks at which a fire has even odds of burning out.
    pub(crate) burnout_halflife: f64,
    pub(crate) spawn_chance: f64,
    pub(crate) damage: u32,
}

impl Default for FireSettings {
    fn default() -> Self {
        Self {
            spread_chance: 0.01,
            burnout_halflife: 150.0,
            spawn_chance: 0.0005,
            damage: 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ActorSettings {
    pub(crate) player_hit_points: u32,
    pub(crate) squirrel_hit_points: u32,
    pub(crate) vision_radius: u32,
}

impl Default for ActorSettings {
    fn default() -> Self {
        Self {
            player_hit_points: 100,
            squirrel_hit_points: 10,
            vision_radius: 8,
        }
    }
}

/// Cosmetic birds and clouds drifting over the map.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ScenerySettings {
    pub(crate) birds: u32,
    pub(crate) clouds: u32,
}

impl Default for ScenerySettings {
    fn default() -> Self {
        Self {
            birds: 3,
            clouds: 2,
        }
    }
}

impl Settings {
    /// Reads and validates a settings file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&text)
            .with_context(|| format!("failed to parse settings in {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        let chances = [
            ("growth.seed_chance", self.growth.seed_chance),
            ("growth.sapling_chance", self.growth.sapling_chance),
            ("growth.seeding_chance", self.growth.seeding_chance),
            ("fire.spread_chance", self.fire.spread_chance),
            ("fire.spawn_chance", self.fire.spawn_chance),
        ];
        for (key, chance) in chances {
            ensure!(
                (0.0..=1.0).contains(&chance),
                "{key} must lie in [0, 1], got {chance}"
            );
        }
        ensure!(
            self.growth.initial_trees_min <= self.growth.initial_trees_max,
            "growth.initial_trees_min exceeds growth.initial_trees_max"
        );
        ensure!(
            self.growth.initial_grass_min <= self.growth.initial_grass_max,
            "growth.initial_grass_min exceeds growth.initial_grass_max"
        );
        ensure!(
            self.fire.burnout_halflife > 0.0,
            "fire.burnout_halflife must be positive, got {}",
            self.fire.burnout_halflife
        );
        ensure!(
            self.simulation.chop_stages > 0,
            "simulation.chop_stages must be positive"
        );
        ensure!(
            self.simulation.max_iterations > 0,
            "simulation.max_iterations must be positive"
        );
        ensure!(
            self.actors.player_hit_points > 0 && self.actors.squirrel_hit_points > 0,
            "actors need at least one hit point"
        );
        Ok(())
    }

    /// Interval between state ticks.
    pub(crate) fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.simulation.tick_ms)
    }

    /// Interval between animation frames.
    pub(crate) fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.simulation.animation_ms)
    }

    /// Builds the simulation configuration seeded with `seed`.
    pub(crate) fn simulation_config(&self, seed: u64) -> Config {
        let max_iterations = self.simulation.max_iterations;
        let growth = growth::Config::new(
            self.growth.seed_chance,
            self.growth.sapling_chance,
            max_iterations,
            0,
        )
        .with_seeding(self.growth.seeding_chance, self.growth.seeding_max)
        .with_initial_trees(self.growth.initial_trees_min, self.growth.initial_trees_max)
        .with_initial_grass(self.growth.initial_grass_min, self.growth.initial_grass_max);
        let fire = fire::Config::new(
            self.fire.spread_chance,
            self.fire.burnout_halflife,
            self.fire.spawn_chance,
            self.fire.damage,
            max_iterations,
            0,
        );

        Config::new(
            growth,
            fire,
            squirrels::Config::new(max_iterations, 0),
            self.simulation.chop_stages,
        )
        .seeded(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let settings: Settings = toml::from_str(
            "[simulation]\nseed = 7\ntick_ms = 10\n\n[fire]\nspread_chance = 0.5\n",
        )
        .expect("valid toml");

        assert_eq!(settings.simulation.seed, Some(7));
        assert_eq!(settings.tick_interval(), Duration::from_millis(10));
        assert_eq!(settings.frame_interval(), Duration::from_millis(200));
        assert_eq!(settings.fire.spread_chance, 0.5);
        assert_eq!(settings.fire.damage, 1);
        assert_eq!(settings.growth, GrowthSettings::default());
        assert_eq!(settings.actors, ActorSettings::default());
    }

    #[test]
    fn defaults_match_the_system_defaults() {
        let config = Settings::default().simulation_config(0);
        let expected = Config::new(
            growth::Config::default(),
            fire::Config::default(),
            squirrels::Config::default(),
            1,
        )
        .seeded(0);

        assert_eq!(config, expected);
    }

    #[test]
    fn load_rejects_out_of_range_chances() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[growth]\nseed_chance = 1.5").expect("write settings");

        let error = Settings::load(file.path()).expect_err("chance above one");
        assert!(error.to_string().contains("growth.seed_chance"), "{error}");
    }

    #[test]
    fn load_rejects_chops_that_never_harvest() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[simulation]\nchop_stages = 0").expect("write settings");

        let error = Settings::load(file.path()).expect_err("zero chop stages");
        assert!(error.to_string().contains("simulation.chop_stages"), "{error}");
    }

    #[test]
    fn load_rejects_non_positive_burnout_halflife() {
        for halflife in ["0.0", "-3.5"] {
            let mut file = tempfile::NamedTempFile::new().expect("temp file");
            writeln!(file, "[fire]\nburnout_halflife = {halflife}").expect("write settings");

            let error = Settings::load(file.path()).expect_err("halflife must be positive");
            assert!(error.to_string().contains("fire.burnout_halflife"), "{error}");
        }
    }

    #[test]
    fn load_accepts_scenery_and_grass_tables() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[growth]\ninitial_grass_min = 0\ninitial_grass_max = 5\n\n[scenery]\nbirds = 0"
        )
        .expect("write settings");

        let settings = Settings::load(file.path()).expect("valid settings");
        assert_eq!(settings.growth.initial_grass_max, 5);
        assert_eq!(settings.scenery.birds, 0);
        assert_eq!(settings.scenery.clouds, 2);
    }

    #[test]
    fn load_reports_unknown_keys_with_the_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[fire]\nspred_chance = 0.1").expect("write settings");

        let error = Settings::load(file.path()).expect_err("typo");
        assert!(
            error.to_string().contains("failed to parse settings"),
            "{error:#}"
        );
    }
}
