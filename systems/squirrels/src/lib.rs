#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Autonomous squirrels that roam towards empty tiles and plant seeds there.
//!
//! Every tick each squirrel on the roster follows the same policy: keep a
//! destination that is still free, plant as soon as it stands next to it,
//! and otherwise take one step along its route. Routes come from the shared
//! path search and are recomputed whenever a remaining step becomes blocked.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use skogshuggare_core::{
    sample_coordinate, ActorId, Command, Coordinate, Path, SearchExhausted, SquirrelId,
    DEFAULT_MAX_ITERATIONS,
};
use skogshuggare_system_pathfinding::{
    self as pathfinding, is_obstructed, next_direction, Pathfinder,
};
use skogshuggare_world::{query, World};
use tracing::warn;

/// Consecutive unreachable destinations after which a squirrel is reported as stuck.
const STALL_WARNING: u32 = 50;

/// Configuration parameters required to construct the squirrel system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_iterations: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a configuration with the search cap shared by sampling and routing.
    #[must_use]
    pub const fn new(max_iterations: u32, rng_seed: u64) -> Self {
        Self {
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
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS, 0)
    }
}

#[derive(Clone, Debug)]
struct Route {
    destination: Coordinate,
    path: Path,
}

/// Pure system steering every squirrel on the roster.
#[derive(Debug)]
pub struct Squirrels {
    config: Config,
    rng: ChaCha8Rng,
    pathfinder: Pathfinder,
    stalls: BTreeMap<SquirrelId, u32>,
}

impl Squirrels {
    /// Creates a new squirrel system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            pathfinder: Pathfinder::new(pathfinding::Config::new(config.max_iterations)),
            stalls: BTreeMap::new(),
        }
    }

    /// Emits route, planting and movement commands for every squirrel.
    ///
    /// Squirrels are visited in identifier order against the world as it was
    /// at the start of the pass; the world rejects commands that later
    /// squirrels invalidate.
    pub fn handle(&mut self, world: &World, out: &mut Vec<Command>) -> Result<(), SearchExhausted> {
        let roster: Vec<(SquirrelId, Coordinate, Option<Route>)> = query::squirrels(world)
            .map(|(id, squirrel)| {
                let route = squirrel.destination().map(|destination| Route {
                    destination,
                    path: squirrel.path().clone(),
                });
                (id, squirrel.position(), route)
            })
            .collect();
        self.stalls
            .retain(|id, _| roster.iter().any(|(squirrel, _, _)| squirrel == id));

        for (id, position, route) in roster {
            self.steer(world, id, position, route, out)?;
        }
        Ok(())
    }

    fn steer(
        &mut self,
        world: &World,
        id: SquirrelId,
        position: Coordinate,
        route: Option<Route>,
        out: &mut Vec<Command>,
    ) -> Result<(), SearchExhausted> {
        let mut route = match route {
            Some(route) if !query::is_path_blocked(world, route.destination) => route,
            _ => self.plan_route(world, id, position, None, out)?,
        };

        if position.is_adjacent_to(route.destination) {
            out.push(Command::PlantSeed {
                at: route.destination,
            });
            let _ = self.plan_route(world, id, position, Some(route.destination), out)?;
            return Ok(());
        }

        if is_obstructed(&route.path, |at| query::is_path_blocked(world, at)) {
            route.path = self.search(world, position, route.destination)?;
            out.push(Command::AssignRoute {
                squirrel: id,
                destination: route.destination,
                path: route.path.clone(),
            });
        }

        let direction = match next_direction(position, route.path.next_step()) {
            Some(direction) => Some(direction),
            None => {
                let fresh = self.plan_route(world, id, position, None, out)?;
                next_direction(position, fresh.path.next_step())
            }
        };

        if let Some(direction) = direction {
            out.push(Command::MoveActor {
                actor: ActorId::Squirrel(id),
                distance: 1,
                direction,
            });
        }
        Ok(())
    }

    fn plan_route(
        &mut self,
        world: &World,
        id: SquirrelId,
        position: Coordinate,
        planted: Option<Coordinate>,
        out: &mut Vec<Command>,
    ) -> Result<Route, SearchExhausted> {
        let (width, height) = query::dimensions(world);
        let destination = sample_coordinate(
            &mut self.rng,
            width,
            height,
            self.config.max_iterations,
            "squirrel destination",
            |at| {
                at != position
                    && Some(at) != planted
                    && query::is_plantable(world, at)
                    && !query::hosts_actor(world, at)
            },
        )?;
        let path = self.search(world, position, destination)?;

        let stalls = self.stalls.entry(id).or_default();
        if path == Path::unreachable(position) {
            *stalls += 1;
            if *stalls == STALL_WARNING {
                warn!(
                    squirrel = id.get(),
                    x = position.x(),
                    y = position.y(),
                    "squirrel keeps choosing unreachable destinations"
                );
            }
        } else {
            *stalls = 0;
        }

        out.push(Command::AssignRoute {
            squirrel: id,
            destination,
            path: path.clone(),
        });
        Ok(Route { destination, path })
    }

    fn search(
        &mut self,
        world: &World,
        start: Coordinate,
        destination: Coordinate,
    ) -> Result<Path, SearchExhausted> {
        let (width, height) = query::dimensions(world);
        self.pathfinder
            .find_path(width, height, start, destination, |at| {
                query::is_path_blocked(world, at)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skogshuggare_world::Actor;

    #[test]
    fn stall_counter_resets_once_a_route_is_found() {
        let mut world = World::new(3, 3, Actor::new(Coordinate::new(0, 0), 10, 8));
        let id = world.add_squirrel(Actor::new(Coordinate::new(1, 1), 10, 4));
        let mut squirrels = Squirrels::new(Config::new(1_000, 3));
        let _ = squirrels.stalls.insert(id, 7);
        let mut out = Vec::new();

        let route = squirrels
            .plan_route(&world, id, Coordinate::new(1, 1), None, &mut out)
            .expect("open grid");

        assert_ne!(route.path, Path::unreachable(Coordinate::new(1, 1)));
        assert_eq!(squirrels.stalls.get(&id), Some(&0));
        assert_eq!(out.len(), 1);
    }
}
