#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fire spread, burnout, spontaneous ignition and fire damage.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skogshuggare_core::{
    sample_coordinate, Command, Content, Direction, Fire, SearchExhausted, DEFAULT_MAX_ITERATIONS,
};
use skogshuggare_world::{query, World};
use tracing::debug;

/// Configuration parameters required to construct the fire system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    spread_chance: f64,
    burnout_halflife: f64,
    spawn_chance: f64,
    damage: u32,
    max_iterations: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from explicit chances, damage and seed.
    #[must_use]
    pub const fn new(
        spread_chance: f64,
        burnout_halflife: f64,
        spawn_chance: f64,
        damage: u32,
        max_iterations: u32,
        rng_seed: u64,
    ) -> Self {
        Self {
            spread_chance,
            burnout_halflife,
            spawn_chance,
            damage,
            max_iterations,
            rng_seed,
        }
    }

    /// Returns the configuration with a different random seed.
    #[must_use]
    pub const fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Age in ticks at which a fire is equally likely to burn out or not.
    #[must_use]
    pub const fn burnout_halflife(&self) -> f64 {
        self.burnout_halflife
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0.01, 150.0, 0.0005, 1, DEFAULT_MAX_ITERATIONS, 0)
    }
}

/// Probability that a fire of `age` ticks burns out this tick.
///
/// Zero for a fresh fire, exactly one half at `halflife`, approaching one as
/// the fire ages. A non-positive half-life burns out any fire older than zero.
#[must_use]
pub fn burnout_chance(age: u32, halflife: f64) -> f64 {
    if age == 0 {
        return 0.0;
    }
    if halflife <= 0.0 {
        return 1.0;
    }
    1.0 - 1.0 / (1.0 + f64::from(age) / halflife)
}

/// Pure system that evolves every fire once per tick.
#[derive(Debug)]
pub struct FireSpread {
    config: Config,
    rng: ChaCha8Rng,
}

impl FireSpread {
    /// Creates a new fire system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Emits the fire commands for one tick.
    ///
    /// Each existing fire first rolls for burnout; a surviving fire then
    /// rolls to spread in a random direction. Survivors age by one, a single
    /// spontaneous ignition is rolled, and actors standing in fire are
    /// damaged last.
    pub fn handle(&mut self, world: &World, out: &mut Vec<Command>) -> Result<(), SearchExhausted> {
        let fires = query::fires(world);
        let mut survivors = Vec::with_capacity(fires.len());
        let mut burned_out = 0;
        let mut spread_attempts = 0;

        for at in fires {
            let age = query::content(world, at)
                .and_then(Content::as_fire)
                .map_or(0, Fire::age);

            if self.rng.gen::<f64>() < burnout_chance(age, self.config.burnout_halflife) {
                out.push(Command::BurnOut { at });
                burned_out += 1;
                continue;
            }
            survivors.push(at);

            if self.rng.gen::<f64>() < self.config.spread_chance {
                let direction = Direction::random(&mut self.rng);
                out.push(Command::SpreadFire {
                    from: at,
                    to: at.step(direction, 1),
                });
                spread_attempts += 1;
            }
        }

        if !survivors.is_empty() {
            out.push(Command::AgeFires { at: survivors });
        }

        if self.rng.gen::<f64>() < self.config.spawn_chance {
            let (width, height) = query::dimensions(world);
            let at = sample_coordinate(
                &mut self.rng,
                width,
                height,
                self.config.max_iterations,
                "fire ignition",
                |at| query::is_flammable(world, at),
            )?;
            out.push(Command::IgniteFire { at });
        }

        if self.config.damage > 0 {
            out.push(Command::ApplyFireDamage {
                amount: self.config.damage,
            });
        }

        if burned_out > 0 || spread_attempts > 0 {
            debug!(burned_out, spread_attempts, "fire tick");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burnout_is_impossible_for_fresh_fires() {
        assert_eq!(burnout_chance(0, 150.0), 0.0);
        assert_eq!(burnout_chance(0, 0.0), 0.0);
    }

    #[test]
    fn burnout_is_even_at_the_halflife() {
        assert_eq!(burnout_chance(150, 150.0), 0.5);
        assert_eq!(burnout_chance(40, 40.0), 0.5);
    }

    #[test]
    fn burnout_grows_strictly_with_age() {
        let halflife = Config::default().burnout_halflife();
        let mut previous = burnout_chance(0, halflife);
        for age in 1..2_000 {
            let chance = burnout_chance(age, halflife);
            assert!(chance > previous, "age {age}: {chance} <= {previous}");
            assert!(chance < 1.0);
            previous = chance;
        }
    }
}
