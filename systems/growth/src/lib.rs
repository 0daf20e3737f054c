#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stochastic tree growth, initial forest population and spontaneous seeding.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skogshuggare_core::{
    sample_coordinate, Command, Coordinate, SearchExhausted, TreeState, DEFAULT_MAX_ITERATIONS,
};
use skogshuggare_world::{query, World};
use tracing::debug;

/// Configuration parameters required to construct the growth system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    seed_chance: f64,
    sapling_chance: f64,
    seed_creation_chance: f64,
    seed_creation_max: u32,
    initial_trees_min: u32,
    initial_trees_max: u32,
    initial_grass_min: u32,
    initial_grass_max: u32,
    max_iterations: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from per-tick growth chances.
    ///
    /// Seeding and initial population start from their defaults and can be
    /// adjusted with [`Config::with_seeding`], [`Config::with_initial_trees`]
    /// and [`Config::with_initial_grass`].
    #[must_use]
    pub const fn new(
        seed_chance: f64,
        sapling_chance: f64,
        max_iterations: u32,
        rng_seed: u64,
    ) -> Self {
        Self {
            seed_chance,
            sapling_chance,
            seed_creation_chance: 0.005,
            seed_creation_max: 3,
            initial_trees_min: 10,
            initial_trees_max: 40,
            initial_grass_min: 20,
            initial_grass_max: 60,
            max_iterations,
            rng_seed,
        }
    }

    /// Returns the configuration with a different spontaneous seeding rule.
    #[must_use]
    pub const fn with_seeding(mut self, chance: f64, max_seeds: u32) -> Self {
        self.seed_creation_chance = chance;
        self.seed_creation_max = max_seeds;
        self
    }

    /// Returns the configuration with a different initial tree count range.
    ///
    /// The count is drawn from `min..max`; a collapsed range places exactly `min`.
    #[must_use]
    pub const fn with_initial_trees(mut self, min: u32, max: u32) -> Self {
        self.initial_trees_min = min;
        self.initial_trees_max = max;
        self
    }

    /// Returns the configuration with a different initial grass tile range.
    #[must_use]
    pub const fn with_initial_grass(mut self, min: u32, max: u32) -> Self {
        self.initial_grass_min = min;
        self.initial_grass_max = max;
        self
    }

    /// Returns the configuration with a different random seed.
    #[must_use]
    pub const fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Per-tick chance that a tree in `state` grows, if it can grow at all.
    #[must_use]
    pub fn chance_for(&self, state: TreeState) -> Option<f64> {
        match state {
            TreeState::Seed => Some(self.seed_chance),
            TreeState::Sapling => Some(self.sapling_chance),
            _ => None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0.010, 0.005, DEFAULT_MAX_ITERATIONS, 0)
    }
}

/// Pure system that rolls tree growth and emits planting commands.
#[derive(Debug)]
pub struct Growth {
    config: Config,
    rng: ChaCha8Rng,
}

impl Growth {
    /// Creates a new growth system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits placement commands for the initial forest and its grass.
    ///
    /// Trees start in a random growth state. Trees and grass only go on tiles
    /// that hold no content and no actor, and never share a tile. Returns the
    /// number of tiles claimed.
    pub fn populate(
        &mut self,
        world: &World,
        out: &mut Vec<Command>,
    ) -> Result<usize, SearchExhausted> {
        let trees = self.draw_count(self.config.initial_trees_min, self.config.initial_trees_max);
        let grass = self.draw_count(self.config.initial_grass_min, self.config.initial_grass_max);

        let mut claimed = HashSet::new();
        for _ in 0..trees {
            let at = self.sample_empty(world, &claimed, "tree population")?;
            let _ = claimed.insert(at);
            let state = TreeState::GROWING[self.rng.gen_range(0..TreeState::GROWING.len())];
            out.push(Command::PlaceTree { at, state });
        }
        for _ in 0..grass {
            let at = self.sample_empty(world, &claimed, "grass population")?;
            let _ = claimed.insert(at);
            out.push(Command::PlaceGrass { at });
        }

        debug!(trees, grass, "forest populated");
        Ok(claimed.len())
    }

    fn draw_count(&mut self, min: u32, max: u32) -> u32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Rolls growth for every tree and, occasionally, scatters new seeds.
    pub fn handle(&mut self, world: &World, out: &mut Vec<Command>) -> Result<(), SearchExhausted> {
        for (at, state) in query::trees(world) {
            let Some(chance) = self.config.chance_for(state) else {
                continue;
            };
            if self.rng.gen::<f64>() < chance {
                out.push(Command::GrowTree { at });
            }
        }

        if self.config.seed_creation_max == 0
            || self.rng.gen::<f64>() >= self.config.seed_creation_chance
        {
            return Ok(());
        }

        let seeds = self.rng.gen_range(1..=self.config.seed_creation_max);
        let mut claimed = HashSet::new();
        for _ in 0..seeds {
            let at = self.sample_empty(world, &claimed, "seed creation")?;
            let _ = claimed.insert(at);
            out.push(Command::PlantSeed { at });
        }
        debug!(seeds, "seeds scattered");
        Ok(())
    }

    fn sample_empty(
        &mut self,
        world: &World,
        claimed: &HashSet<Coordinate>,
        search: &'static str,
    ) -> Result<Coordinate, SearchExhausted> {
        let (width, height) = query::dimensions(world);
        sample_coordinate(
            &mut self.rng,
            width,
            height,
            self.config.max_iterations,
            search,
            |at| {
                query::is_plantable(world, at)
                    && !claimed.contains(&at)
                    && !query::hosts_actor(world, at)
            },
        )
    }
}
