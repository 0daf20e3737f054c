//! Plain-text map files: loading them into a [`World`] and generating new ones.

use std::{fs, io, path::Path, path::PathBuf};

use rand::{seq::SliceRandom, Rng};
use skogshuggare_core::{AnimatedObject, Content, Coordinate, Fire, ObjectKey, StaticObject};
use skogshuggare_world::{query, Actor, World};
use thiserror::Error;

use crate::settings::{ActorSettings, ScenerySettings};

const WATER_FRAMES: u8 = 2;
const BIRD_FRAMES: u8 = 2;
const CLOUD_FRAMES: u8 = 1;

/// Errors raised while reading or generating a map.
#[derive(Debug, Error)]
pub(crate) enum MapError {
    /// The map file could not be read.
    #[error("could not read map {}", .path.display())]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The map had no rows or only empty rows.
    #[error("map contains no tiles")]
    Empty,
    /// No `p` tile was present.
    #[error("map has no player start `p`")]
    MissingPlayer,
    /// More than one `p` tile was present.
    #[error("map has a second player start at ({x}, {y})")]
    DuplicatePlayer {
        /// Column of the extra start.
        x: i32,
        /// Row of the extra start.
        y: i32,
    },
    /// The requested map has no room for every actor.
    #[error("a {width}x{height} map cannot hold {actors} actors inside its walls")]
    TooSmall {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
        /// Player plus squirrels.
        actors: usize,
    },
}

/// Parsed contents of a map file.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct MapLayout {
    width: i32,
    height: i32,
    player: Coordinate,
    squirrels: Vec<Coordinate>,
    tiles: Vec<(Coordinate, Content)>,
}

impl MapLayout {
    /// Reads and parses the map stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self, MapError> {
        let text = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parses map text: one row per line, the longest line sets the width.
    pub(crate) fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        let width = rows
            .iter()
            .map(|row| row.chars().count())
            .max()
            .unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }

        let mut player = None;
        let mut squirrels = Vec::new();
        let mut tiles = Vec::new();
        for (y, row) in (0..).zip(&rows) {
            for (x, symbol) in (0..).zip(row.chars()) {
                let at = Coordinate::new(x, y);
                match symbol {
                    'p' => {
                        if player.replace(at).is_some() {
                            return Err(MapError::DuplicatePlayer { x, y });
                        }
                    }
                    's' => squirrels.push(at),
                    '#' => tiles.push((at, Content::Static(StaticObject::wall()))),
                    '"' => tiles.push((at, Content::Static(StaticObject::grass()))),
                    'w' => tiles.push((at, water(false))),
                    'W' => tiles.push((at, water(true))),
                    'f' => tiles.push((at, Content::Fire(Fire::ignite(at)))),
                    _ => {}
                }
            }
        }

        Ok(Self {
            width: to_extent(width),
            height: to_extent(rows.len()),
            player: player.ok_or(MapError::MissingPlayer)?,
            squirrels,
            tiles,
        })
    }

    /// Grid dimensions in tiles.
    pub(crate) const fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Builds the world, placing the player and every squirrel.
    pub(crate) fn into_world(self, actors: &ActorSettings) -> World {
        let mut world = World::new(
            self.width,
            self.height,
            Actor::new(self.player, actors.player_hit_points, actors.vision_radius),
        );
        for (at, content) in self.tiles {
            let _ = world.insert_content(at, content);
        }
        for at in self.squirrels {
            let _ = world.add_squirrel(Actor::new(
                at,
                actors.squirrel_hit_points,
                actors.vision_radius,
            ));
        }
        world
    }
}

/// Drops birds and clouds on random tiles inside the outer ring.
///
/// Decorations share tiles with content, so only the overlay is touched.
/// Returns how many decorations the world holds afterwards.
pub(crate) fn scatter_scenery<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    scenery: &ScenerySettings,
) -> usize {
    let (width, height) = query::dimensions(world);
    if width < 3 || height < 3 {
        return 0;
    }

    let birds = (0..scenery.birds).map(|_| (ObjectKey::Bird, BIRD_FRAMES));
    let clouds = (0..scenery.clouds).map(|_| (ObjectKey::Cloud, CLOUD_FRAMES));
    for (key, frames) in birds.chain(clouds) {
        let at = Coordinate::new(rng.gen_range(1..width - 1), rng.gen_range(1..height - 1));
        world.insert_decoration(at, AnimatedObject::new(StaticObject::scenery(key), frames));
    }
    query::decorations(world).count()
}

fn water(heavy: bool) -> Content {
    Content::Animated(AnimatedObject::new(StaticObject::water(heavy), WATER_FRAMES))
}

fn to_extent(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Renders a walled map with the player and `squirrels` on random interior tiles.
pub(crate) fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    width: i32,
    height: i32,
    squirrels: usize,
) -> Result<String, MapError> {
    let actors = squirrels + 1;
    let interior: Vec<Coordinate> = (1..height - 1)
        .flat_map(|y| (1..width - 1).map(move |x| Coordinate::new(x, y)))
        .collect();
    if interior.len() < actors {
        return Err(MapError::TooSmall {
            width,
            height,
            actors,
        });
    }

    let starts: Vec<Coordinate> = interior.choose_multiple(rng, actors).copied().collect();
    let mut text = String::new();
    for y in 0..height {
        for x in 0..width {
            let at = Coordinate::new(x, y);
            let symbol = if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                '#'
            } else if starts.first() == Some(&at) {
                'p'
            } else if starts[1..].contains(&at) {
                's'
            } else {
                ' '
            };
            text.push(symbol);
        }
        text.push('\n');
    }
    Ok(text)
}
