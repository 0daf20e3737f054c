//! Single-threaded loop driving the state tick and the animation frame.

use std::{
    io::{self, Write},
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use skogshuggare_simulation::{Phase, Schedule, Simulation};
use skogshuggare_world::query;
use tracing::{debug, info};

use crate::{render::render, script::Script};

/// How the loop paces itself and when it stops.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LoopOptions {
    pub(crate) tick_interval: Duration,
    pub(crate) frame_interval: Duration,
    /// Stop after this many ticks.
    pub(crate) max_ticks: Option<u64>,
    /// Skip sleeping between deadlines.
    pub(crate) fast: bool,
    /// Redraw the world on every frame.
    pub(crate) show: bool,
}

/// What a finished run looked like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) ticks: u64,
    pub(crate) frames: u64,
    pub(crate) score: u32,
    pub(crate) hit_points: u32,
    pub(crate) squirrels: usize,
    pub(crate) trees: usize,
    pub(crate) fires: usize,
    pub(crate) player_alive: bool,
}

impl RunSummary {
    fn capture(simulation: &Simulation, frames: u64) -> Self {
        let world = simulation.world();
        Self {
            ticks: simulation.ticks(),
            frames,
            score: simulation.score(),
            hit_points: query::player(world).hit_points().current(),
            squirrels: query::squirrel_count(world),
            trees: query::trees(world).len(),
            fires: query::fires(world).len(),
            player_alive: query::is_player_alive(world),
        }
    }
}

/// Runs until the player dies or the tick limit is reached.
pub(crate) fn run(
    simulation: &mut Simulation,
    script: &mut Script,
    options: LoopOptions,
) -> Result<RunSummary> {
    let mut schedule = Schedule::new(options.tick_interval, options.frame_interval);
    let started = Instant::now();
    let mut frames = 0;

    while !simulation.should_exit() {
        if options
            .max_ticks
            .is_some_and(|limit| simulation.ticks() >= limit)
        {
            simulation.request_exit();
            break;
        }

        let (due, phase) = schedule.next_due();
        if !options.fast {
            if let Some(wait) = (started + due).checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }

        match phase {
            Phase::Tick => {
                let report = simulation.step(script.next_action())?;
                if report.fires_spread > 0 || report.trees_removed > 0 {
                    debug!(
                        tick = report.tick,
                        fires_spread = report.fires_spread,
                        trees_removed = report.trees_removed,
                        "forest changed"
                    );
                }
            }
            Phase::Frame => {
                frames += 1;
                let changed = simulation.animate();
                if options.show && !options.fast {
                    let mut stdout = io::stdout().lock();
                    write!(stdout, "\x1b[2J\x1b[H{}", render(simulation.world()))?;
                    stdout.flush()?;
                }
                debug!(frame = frames, changed, "animation advanced");
            }
        }
    }

    let summary = RunSummary::capture(simulation, frames);
    info!(
        ticks = summary.ticks,
        score = summary.score,
        hit_points = summary.hit_points,
        squirrels = summary.squirrels,
        trees = summary.trees,
        fires = summary.fires,
        unused_script_actions = script.remaining(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "run finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skogshuggare_core::{Content, Coordinate, Fire, StaticObject, Tree, TreeState};
    use skogshuggare_simulation::Config;
    use skogshuggare_system_fire as fire;
    use skogshuggare_system_growth as growth;
    use skogshuggare_system_squirrels as squirrels;
    use skogshuggare_world::{Actor, World};

    fn options(max_ticks: Option<u64>) -> LoopOptions {
        LoopOptions {
            tick_interval: Duration::from_millis(30),
            frame_interval: Duration::from_millis(200),
            max_ticks,
            fast: true,
            show: false,
        }
    }

    fn still_config() -> Config {
        Config::new(
            growth::Config::new(0.0, 0.0, 1_000, 0)
                .with_seeding(0.0, 0)
                .with_initial_trees(0, 0)
                .with_initial_grass(0, 0),
            fire::Config::new(0.0, f64::MAX, 0.0, 1, 1_000, 0),
            squirrels::Config::default(),
            1,
        )
    }

    #[test]
    fn stops_at_the_tick_limit_with_interleaved_frames() {
        let player = Coordinate::new(1, 1);
        let mut world = World::new(5, 3, Actor::new(player, 10, 8));
        let tree = Coordinate::new(2, 1);
        let _ = world.insert_content(tree, Content::Tree(Tree::new(tree, TreeState::Stump)));
        let _ = world.insert_content(
            Coordinate::new(4, 1),
            Content::Static(StaticObject::wall()),
        );
        let mut simulation = Simulation::new(world, still_config()).expect("still world");
        let mut script = Script::parse("chop right").expect("valid script");

        let summary = run(&mut simulation, &mut script, options(Some(20))).expect("run");

        assert_eq!(summary.ticks, 20);
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.score, 1);
        assert_eq!(summary.trees, 0);
        assert!(summary.player_alive);
        assert!(simulation.should_exit());
    }

    #[test]
    fn ends_when_the_player_burns() {
        let player = Coordinate::new(1, 1);
        let mut world = World::new(3, 3, Actor::new(player, 3, 8));
        let _ = world.insert_content(player, Content::Fire(Fire::ignite(player)));
        let mut simulation = Simulation::new(world, still_config()).expect("still world");

        let summary = run(&mut simulation, &mut Script::default(), options(None)).expect("run");

        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.hit_points, 0);
        assert!(!summary.player_alive);
    }
}
