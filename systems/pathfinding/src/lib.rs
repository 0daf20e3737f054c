#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Uniform-cost path search over the walkable subset of the grid.
//!
//! The search settles nodes from a min-heap keyed by `(distance, coordinate)`
//! so that equal-cost routes are always resolved the same way. Blocked tiles
//! are supplied by the caller through a predicate, which keeps this crate free
//! of any dependency on the world's storage.

use std::{cmp::Reverse, collections::BinaryHeap};

use skogshuggare_core::{Coordinate, Direction, Path, SearchExhausted, DEFAULT_MAX_ITERATIONS};

const UNREACHED: u32 = u32::MAX;

/// Configuration parameters required to construct the path search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_iterations: u32,
}

impl Config {
    /// Creates a configuration that settles at most `max_iterations` nodes.
    #[must_use]
    pub const fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }

    /// Node settlement cap applied to each search.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ITERATIONS)
    }
}

/// Reusable path search with buffers sized to the last searched grid.
#[derive(Debug)]
pub struct Pathfinder {
    config: Config,
    width: usize,
    distances: Vec<u32>,
    parents: Vec<Option<Coordinate>>,
    settled: Vec<bool>,
    frontier: BinaryHeap<Reverse<(u32, Coordinate)>>,
}

impl Pathfinder {
    /// Creates a path search using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            width: 0,
            distances: Vec::new(),
            parents: Vec::new(),
            settled: Vec::new(),
            frontier: BinaryHeap::new(),
        }
    }

    /// Computes the shortest route from `start` to `destination`.
    ///
    /// Nodes are every in-bounds coordinate for which `is_blocked` is false;
    /// the start is always admitted so an actor standing on a hazard can
    /// still leave it. A destination that is blocked, out of bounds, or
    /// unreachable yields [`Path::unreachable`]. Settling more than the
    /// configured number of nodes fails with [`SearchExhausted`].
    pub fn find_path<F>(
        &mut self,
        width: i32,
        height: i32,
        start: Coordinate,
        destination: Coordinate,
        mut is_blocked: F,
    ) -> Result<Path, SearchExhausted>
    where
        F: FnMut(Coordinate) -> bool,
    {
        if start == destination
            || !start.in_bounds(width, height)
            || !destination.in_bounds(width, height)
            || is_blocked(destination)
        {
            return Ok(Path::unreachable(start));
        }

        self.reset(width, height);
        let Some(start_index) = self.index(start) else {
            return Ok(Path::unreachable(start));
        };
        self.distances[start_index] = 0;
        self.frontier.push(Reverse((0, start)));

        let mut iterations = 0;
        while let Some(Reverse((distance, current))) = self.frontier.pop() {
            let Some(current_index) = self.index(current) else {
                continue;
            };
            if self.settled[current_index] {
                continue;
            }

            iterations += 1;
            if iterations > self.config.max_iterations {
                return Err(SearchExhausted {
                    search: "path search",
                    limit: self.config.max_iterations,
                });
            }

            self.settled[current_index] = true;
            if current == destination {
                break;
            }

            let next_distance = distance.saturating_add(1);
            for neighbor in current.neighbors() {
                if !neighbor.in_bounds(width, height) || is_blocked(neighbor) {
                    continue;
                }
                let Some(neighbor_index) = self.index(neighbor) else {
                    continue;
                };
                if self.settled[neighbor_index] || self.distances[neighbor_index] <= next_distance
                {
                    continue;
                }

                self.distances[neighbor_index] = next_distance;
                self.parents[neighbor_index] = Some(current);
                self.frontier.push(Reverse((next_distance, neighbor)));
            }
        }

        Ok(self.reconstruct(start, destination))
    }

    fn reset(&mut self, width: i32, height: i32) {
        let width = usize::try_from(width).unwrap_or(0);
        let height = usize::try_from(height).unwrap_or(0);
        let cell_count = width.checked_mul(height).unwrap_or(0);

        self.width = width;
        self.distances.clear();
        self.distances.resize(cell_count, UNREACHED);
        self.parents.clear();
        self.parents.resize(cell_count, None);
        self.settled.clear();
        self.settled.resize(cell_count, false);
        self.frontier.clear();
    }

    fn index(&self, at: Coordinate) -> Option<usize> {
        let x = usize::try_from(at.x()).ok()?;
        let y = usize::try_from(at.y()).ok()?;
        if x >= self.width {
            return None;
        }
        let index = y.checked_mul(self.width)?.checked_add(x)?;
        (index < self.distances.len()).then_some(index)
    }

    fn reconstruct(&self, start: Coordinate, destination: Coordinate) -> Path {
        let reached = self
            .index(destination)
            .is_some_and(|index| self.distances[index] != UNREACHED);
        if !reached {
            return Path::unreachable(start);
        }

        let mut steps = Vec::new();
        let mut cursor = destination;
        while cursor != start {
            steps.push(cursor);
            let parent = self
                .index(cursor)
                .and_then(|index| self.parents[index]);
            match parent {
                Some(previous) => cursor = previous,
                None => return Path::unreachable(start),
            }
        }
        steps.reverse();
        Path::from_steps(steps)
    }
}

impl Default for Pathfinder {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Direction leading from `current` onto the next step of a route.
///
/// Returns `None` when there is no next step or it equals `current`, which
/// tells the caller to choose a fresh destination.
#[must_use]
pub fn next_direction(current: Coordinate, next: Option<Coordinate>) -> Option<Direction> {
    next.filter(|step| *step != current)
        .and_then(|step| Direction::between(current, step))
}

/// Whether any remaining step of `path` has become blocked.
pub fn is_obstructed<F>(path: &Path, mut is_blocked: F) -> bool
where
    F: FnMut(Coordinate) -> bool,
{
    path.steps().iter().any(|step| is_blocked(*step))
}
