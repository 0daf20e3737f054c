#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick orchestration for Skogshuggare.
//!
//! [`Simulation`] owns the world and every system, and advances them through
//! the fixed phase order: player input, squirrels, tree growth, fire. Each
//! phase reads the world, emits a command batch, and has that batch applied
//! before the next phase looks at the world. A tick runs under `&mut self`,
//! so nothing else can observe or mutate the world halfway through it.

mod schedule;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skogshuggare_core::{ActorId, Command, Event, PlayerAction, SearchExhausted};
use skogshuggare_system_fire::{self as fire, FireSpread};
use skogshuggare_system_growth::{self as growth, Growth};
use skogshuggare_system_squirrels::{self as squirrels, Squirrels};
use skogshuggare_world::{self as world, query, World};
use thiserror::Error;
use tracing::{debug, info};

pub use schedule::{Phase, Schedule};

const GROWTH_SALT: u64 = 0x9e37_79b9_7f4a_7c15;
const FIRE_SALT: u64 = 0xc2b2_ae3d_27d4_eb4f;
const SQUIRREL_SALT: u64 = 0x1656_67b1_9e37_79f9;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A bounded search gave up; continuing would desynchronise the game.
    #[error("simulation aborted at tick {tick}: {source}")]
    SearchExhausted {
        /// Tick during which the search failed.
        tick: u64,
        /// Search that gave up.
        #[source]
        source: SearchExhausted,
    },
}

/// Configuration parameters required to construct the simulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    growth: growth::Config,
    fire: fire::Config,
    squirrels: squirrels::Config,
    chop_stages: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration from per-system settings.
    #[must_use]
    pub const fn new(
        growth: growth::Config,
        fire: fire::Config,
        squirrels: squirrels::Config,
        chop_stages: u32,
    ) -> Self {
        Self {
            growth,
            fire,
            squirrels,
            chop_stages,
            rng_seed: 0,
        }
    }

    /// Derives distinct seeds for the input layer and every system from `seed`.
    #[must_use]
    pub fn seeded(mut self, seed: u64) -> Self {
        self.rng_seed = seed;
        self.growth = self.growth.with_rng_seed(seed ^ GROWTH_SALT);
        self.fire = self.fire.with_rng_seed(seed ^ FIRE_SALT);
        self.squirrels = self.squirrels.with_rng_seed(seed ^ SQUIRREL_SALT);
        self
    }

    /// Harvest stages applied by each player chop.
    #[must_use]
    pub const fn chop_stages(&self) -> u32 {
        self.chop_stages
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            growth::Config::default(),
            fire::Config::default(),
            squirrels::Config::default(),
            1,
        )
    }
}

/// Counts of what happened during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,
    /// Whether the player changed tiles.
    pub player_moved: bool,
    /// Harvest stages applied to trees.
    pub trees_harvested: u32,
    /// Trees cleared completely.
    pub trees_removed: u32,
    /// Firebreaks dug.
    pub firebreaks_dug: u32,
    /// Seeds planted by squirrels or spontaneous seeding.
    pub seeds_planted: u32,
    /// Trees that grew one state.
    pub trees_grown: u32,
    /// Fires started spontaneously.
    pub fires_ignited: u32,
    /// Fires that reached a new tile.
    pub fires_spread: u32,
    /// Fires that burned out.
    pub fires_burned_out: u32,
    /// Actors hurt by fire.
    pub actors_burned: u32,
    /// Squirrels that died.
    pub squirrels_died: u32,
    /// Whether the player died.
    pub player_died: bool,
}

impl TickReport {
    fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    fn record(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::ActorMoved {
                    actor: ActorId::Player,
                    ..
                } => self.player_moved = true,
                Event::TreeHarvested { .. } => self.trees_harvested += 1,
                Event::TreeRemoved { .. } => self.trees_removed += 1,
                Event::FirebreakDug { .. } => self.firebreaks_dug += 1,
                Event::SeedPlanted { .. } => self.seeds_planted += 1,
                Event::TreeGrew { .. } => self.trees_grown += 1,
                Event::FireIgnited { .. } => self.fires_ignited += 1,
                Event::FireSpread { .. } => self.fires_spread += 1,
                Event::FireBurnedOut { .. } => self.fires_burned_out += 1,
                Event::ActorDamaged { .. } => self.actors_burned += 1,
                Event::SquirrelDied { squirrel } => {
                    self.squirrels_died += 1;
                    info!(squirrel = squirrel.get(), tick = self.tick, "squirrel burned to death");
                }
                Event::PlayerDied => self.player_died = true,
                _ => {}
            }
        }
    }
}

/// Owns the world and drives every system through the tick phases.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    growth: Growth,
    fire: FireSpread,
    squirrels: Squirrels,
    input_rng: ChaCha8Rng,
    chop_stages: u32,
    tick: u64,
    exit: bool,
}

impl Simulation {
    /// Wraps a loaded world and populates its initial forest.
    pub fn new(mut world: World, config: Config) -> Result<Self, SimulationError> {
        let mut growth = Growth::new(config.growth);
        let mut commands = Vec::new();
        let placed = growth
            .populate(&world, &mut commands)
            .map_err(|source| SimulationError::SearchExhausted { tick: 0, source })?;
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        debug!(placed, "initial forest planted");

        Ok(Self {
            world,
            growth,
            fire: FireSpread::new(config.fire),
            squirrels: Squirrels::new(config.squirrels),
            input_rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            chop_stages: config.chop_stages,
            tick: 0,
            exit: false,
        })
    }

    /// Read-only access to the world for renderers.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Ticks completed so far.
    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.tick
    }

    /// Trees fully harvested by the player.
    #[must_use]
    pub fn score(&self) -> u32 {
        query::player(&self.world).score()
    }

    /// Whether the run has ended, either by request or by the player's death.
    #[must_use]
    pub const fn should_exit(&self) -> bool {
        self.exit
    }

    /// Asks the run to stop; later calls to [`Simulation::step`] do nothing.
    pub fn request_exit(&mut self) {
        self.exit = true;
    }

    /// Advances the world by one tick, consuming at most one player action.
    ///
    /// Once the run has ended the world is left untouched and an empty report
    /// is returned.
    pub fn step(&mut self, action: PlayerAction) -> Result<TickReport, SimulationError> {
        if self.exit {
            return Ok(TickReport::new(self.tick));
        }

        self.tick += 1;
        let tick = self.tick;
        let mut report = TickReport::new(tick);
        let abort = |source| SimulationError::SearchExhausted { tick, source };

        let mut commands = self.player_commands(action);
        self.apply_phase(commands, &mut report);

        commands = Vec::new();
        self.squirrels
            .handle(&self.world, &mut commands)
            .map_err(abort)?;
        self.apply_phase(commands, &mut report);

        commands = Vec::new();
        self.growth.handle(&self.world, &mut commands).map_err(abort)?;
        self.apply_phase(commands, &mut report);

        commands = Vec::new();
        self.fire.handle(&self.world, &mut commands).map_err(abort)?;
        self.apply_phase(commands, &mut report);

        if report.player_died {
            info!(tick, score = self.score(), "player burned to death");
            self.exit = true;
        }
        debug!(?report, "tick complete");
        Ok(report)
    }

    /// Advances cosmetic animation stages, returning how many changed.
    pub fn animate(&mut self) -> usize {
        let mut events = Vec::new();
        world::apply(&mut self.world, Command::AdvanceAnimation, &mut events);
        events
            .iter()
            .map(|event| match event {
                Event::AnimationAdvanced { changed } => *changed,
                _ => 0,
            })
            .sum()
    }

    fn player_commands(&mut self, action: PlayerAction) -> Vec<Command> {
        let actor = ActorId::Player;
        match action {
            PlayerAction::Move(heading) => vec![Command::MoveActor {
                actor,
                distance: 1,
                direction: heading.resolve(&mut self.input_rng),
            }],
            PlayerAction::Chop(reach) => vec![Command::Chop {
                actor,
                reach,
                stages: self.chop_stages,
            }],
            PlayerAction::Dig(direction) => vec![Command::Dig { actor, direction }],
            PlayerAction::Wait => Vec::new(),
        }
    }

    fn apply_phase(&mut self, commands: Vec<Command>, report: &mut TickReport) {
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }
        report.record(&events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skogshuggare_core::{Coordinate, Heading};
    use skogshuggare_world::Actor;

    #[test]
    fn report_counts_player_moves_and_deaths() {
        let mut report = TickReport::new(4);
        report.record(&[
            Event::ActorMoved {
                actor: ActorId::Player,
                from: Coordinate::new(1, 1),
                to: Coordinate::new(2, 1),
            },
            Event::FireSpread {
                from: Coordinate::new(5, 5),
                to: Coordinate::new(5, 6),
            },
            Event::PlayerDied,
        ]);

        assert!(report.player_moved);
        assert_eq!(report.fires_spread, 1);
        assert!(report.player_died);
    }

    #[test]
    fn exit_request_freezes_the_world() {
        let world = World::new(5, 5, Actor::new(Coordinate::new(2, 2), 10, 8));
        let config = Config::new(
            growth::Config::default()
                .with_initial_trees(0, 0)
                .with_initial_grass(0, 0),
            fire::Config::default(),
            squirrels::Config::default(),
            1,
        );
        let mut simulation = Simulation::new(world, config).expect("empty forest");

        simulation.request_exit();
        let report = simulation
            .step(PlayerAction::Move(Heading::Random))
            .expect("no-op step");

        assert_eq!(report, TickReport::new(0));
        assert_eq!(simulation.ticks(), 0);
        assert_eq!(
            query::player(simulation.world()).position(),
            Coordinate::new(2, 2)
        );
    }
}
