#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs the Skogshuggare forest.

mod game_loop;
mod map_file;
mod render;
mod script;
mod settings;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use skogshuggare_simulation::Simulation;
use tracing::{debug, info};

use crate::{
    game_loop::LoopOptions, map_file::MapLayout, render::render, script::Script,
    settings::Settings,
};

/// Chop trees, dig firebreaks and outlast the fire.
#[derive(Parser)]
#[command(name = "skogshuggare", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a map until the player dies or the tick limit is reached
    Run(Run),

    /// Write a new walled map with a player and squirrels
    Generate(Generate),
}

#[derive(Parser)]
struct Run {
    /// Map file to load
    #[arg(long)]
    map: PathBuf,

    /// TOML settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Player actions, one per line
    #[arg(long)]
    script: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Master random seed, overriding the settings file
    #[arg(long)]
    seed: Option<u64>,

    /// Run as fast as possible instead of in real time
    #[arg(long)]
    fast: bool,

    /// Draw the forest to stdout
    #[arg(long)]
    show: bool,
}

impl Run {
    fn execute(self) -> Result<()> {
        let settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let layout = MapLayout::load(&self.map)
            .with_context(|| format!("failed to load map {}", self.map.display()))?;
        let mut script = match &self.script {
            Some(path) => Script::load(path)?,
            None => Script::default(),
        };

        let seed = self
            .seed
            .or(settings.simulation.seed)
            .unwrap_or_else(|| rand::thread_rng().gen());
        let (width, height) = layout.dimensions();
        info!(seed, width, height, "starting run");

        let mut world = layout.into_world(&settings.actors);
        let decorations = map_file::scatter_scenery(
            &mut world,
            &mut ChaCha8Rng::seed_from_u64(seed),
            &settings.scenery,
        );
        debug!(decorations, "scenery scattered");
        let mut simulation = Simulation::new(world, settings.simulation_config(seed))?;
        let summary = game_loop::run(
            &mut simulation,
            &mut script,
            LoopOptions {
                tick_interval: settings.tick_interval(),
                frame_interval: settings.frame_interval(),
                max_ticks: self.ticks,
                fast: self.fast,
                show: self.show,
            },
        )?;

        if self.show {
            print!("{}", render(simulation.world()));
        }
        let outcome = if summary.player_alive {
            "survived"
        } else {
            "burned"
        };
        println!("{outcome} {} ticks, score {}", summary.ticks, summary.score);
        Ok(())
    }
}

#[derive(Parser)]
struct Generate {
    /// Map width in tiles, walls included
    #[arg(long)]
    width: u16,

    /// Map height in tiles, walls included
    #[arg(long)]
    height: u16,

    /// File to write
    #[arg(long)]
    output: PathBuf,

    /// Number of squirrels to place
    #[arg(long, default_value_t = 0)]
    squirrels: usize,

    /// Random seed for actor placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Generate {
    fn execute(self) -> Result<()> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let text = map_file::generate(
            &mut rng,
            i32::from(self.width),
            i32::from(self.height),
            self.squirrels,
        )?;
        fs::write(&self.output, text)
            .with_context(|| format!("failed to write map {}", self.output.display()))?;
        info!(
            width = self.width,
            height = self.height,
            squirrels = self.squirrels,
            output = %self.output.display(),
            "map generated"
        );
        Ok(())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::Generate(cmd) => cmd.execute(),
    }
}
