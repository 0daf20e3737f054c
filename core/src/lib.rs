#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Skogshuggare simulation.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the stochastic systems, and the adapters. Systems read immutable world
//! queries and respond with [`Command`] batches; the world validates and
//! applies each command through its `apply` entry point and reports the
//! outcome as [`Event`] values. Everything here is plain data: coordinates,
//! tile occupants, the tree state tables, and the bounded search helpers
//! whose exhaustion is the only fatal condition in the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Iteration cap applied to bounded searches when no override is configured.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100_000;

/// Integer location on the world grid.
///
/// Ordering is lexicographic on `(x, y)`, which the path search relies on to
/// break distance ties reproducibly.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    x: i32,
    y: i32,
}

impl Coordinate {
    /// Creates a coordinate from column and row components.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column component.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row component, growing downwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the coordinate offset by the provided deltas.
    #[must_use]
    pub const fn translate(self, delta_x: i32, delta_y: i32) -> Self {
        Self::new(self.x + delta_x, self.y + delta_y)
    }

    /// Returns the coordinate `distance` tiles away in `direction`.
    #[must_use]
    pub const fn step(self, direction: Direction, distance: i32) -> Self {
        let (delta_x, delta_y) = direction.delta();
        self.translate(delta_x * distance, delta_y * distance)
    }

    /// Orthogonal neighbours in [`Direction::ALL`] order.
    #[must_use]
    pub const fn neighbors(self) -> [Coordinate; 4] {
        [
            self.step(Direction::Up, 1),
            self.step(Direction::Right, 1),
            self.step(Direction::Down, 1),
            self.step(Direction::Left, 1),
        ]
    }

    /// Computes the Manhattan distance between two coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: Coordinate) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Reports whether `other` lies exactly one orthogonal step away.
    #[must_use]
    pub fn is_adjacent_to(self, other: Coordinate) -> bool {
        self.manhattan_distance(other) == 1
    }

    /// Reports whether the coordinate lies within `[0, width) x [0, height)`.
    #[must_use]
    pub const fn in_bounds(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width && self.y < height
    }
}

/// Cardinal directions available to actors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards decreasing row indices.
    Up,
    /// Towards increasing column indices.
    Right,
    /// Towards increasing row indices.
    Down,
    /// Towards decreasing column indices.
    Left,
}

impl Direction {
    /// Every direction in clockwise order starting from [`Direction::Up`].
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit offset applied when stepping once in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Picks a direction uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Resolves the direction leading from `from` to the adjacent `to`.
    ///
    /// Returns `None` when the coordinates are equal or not orthogonally
    /// adjacent.
    #[must_use]
    pub fn between(from: Coordinate, to: Coordinate) -> Option<Self> {
        if !from.is_adjacent_to(to) {
            return None;
        }

        if to.y() < from.y() {
            Some(Self::Up)
        } else if to.x() > from.x() {
            Some(Self::Right)
        } else if to.y() > from.y() {
            Some(Self::Down)
        } else {
            Some(Self::Left)
        }
    }
}

/// Movement request that may defer the choice of direction to chance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Move in the named direction.
    Toward(Direction),
    /// Move in a uniformly chosen cardinal direction.
    Random,
}

impl Heading {
    /// Resolves the heading into a concrete direction.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Direction {
        match self {
            Self::Toward(direction) => direction,
            Self::Random => Direction::random(rng),
        }
    }
}

/// Tiles an action such as chopping reaches from the acting actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reach {
    /// The single tile adjacent in the named direction.
    Toward(Direction),
    /// All four orthogonally adjacent tiles.
    Omni,
}

impl Reach {
    /// Tiles covered by the reach when acting from `origin`.
    #[must_use]
    pub fn targets(self, origin: Coordinate) -> Vec<Coordinate> {
        match self {
            Self::Toward(direction) => vec![origin.step(direction, 1)],
            Self::Omni => origin.neighbors().to_vec(),
        }
    }
}

/// Actions the input layer may request for the player, one per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Walk one tile.
    Move(Heading),
    /// Swing the axe at adjacent trees.
    Chop(Reach),
    /// Dig a firebreak in the adjacent tile.
    Dig(Direction),
    /// Do nothing this tick.
    Wait,
}

/// Identity of a terrain or decoration object, used as the render key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKey {
    /// Impassable wall.
    Wall,
    /// Shallow water.
    WaterLight,
    /// Deep water.
    WaterHeavy,
    /// Grass that fire can consume.
    Grass,
    /// Dug soil that stops fire.
    Firebreak,
    /// Ash left behind once a fire burns out.
    BurntGround,
    /// Cosmetic bird drifting over the forest.
    Bird,
    /// Cosmetic cloud drifting over the forest.
    Cloud,
}

/// Terrain occupant with fixed interaction flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaticObject {
    key: ObjectKey,
    collidable: bool,
    flammable: bool,
    plantable: bool,
}

impl StaticObject {
    /// Creates an object with explicit interaction flags.
    #[must_use]
    pub const fn new(key: ObjectKey, collidable: bool, flammable: bool, plantable: bool) -> Self {
        Self {
            key,
            collidable,
            flammable,
            plantable,
        }
    }

    /// Wall tile: blocks movement, never burns.
    #[must_use]
    pub const fn wall() -> Self {
        Self::new(ObjectKey::Wall, true, false, false)
    }

    /// Water tile of the given depth: blocks movement, never burns.
    #[must_use]
    pub const fn water(heavy: bool) -> Self {
        let key = if heavy {
            ObjectKey::WaterHeavy
        } else {
            ObjectKey::WaterLight
        };
        Self::new(key, true, false, false)
    }

    /// Grass tile: walkable and flammable.
    #[must_use]
    pub const fn grass() -> Self {
        Self::new(ObjectKey::Grass, false, true, true)
    }

    /// Cosmetic overlay object such as a bird or a cloud. Interacts with nothing.
    #[must_use]
    pub const fn scenery(key: ObjectKey) -> Self {
        Self::new(key, false, false, false)
    }

    /// Firebreak dug by the player.
    #[must_use]
    pub const fn firebreak() -> Self {
        Self::new(ObjectKey::Firebreak, false, false, false)
    }

    /// Burnt ground left where a fire went out.
    #[must_use]
    pub const fn burnt_ground() -> Self {
        Self::new(ObjectKey::BurntGround, false, false, false)
    }

    /// Render key of the object.
    #[must_use]
    pub const fn key(&self) -> ObjectKey {
        self.key
    }

    /// Whether the object blocks actor movement.
    #[must_use]
    pub const fn is_collidable(&self) -> bool {
        self.collidable
    }

    /// Whether fire may spread onto the object.
    #[must_use]
    pub const fn is_flammable(&self) -> bool {
        self.flammable
    }

    /// Whether the object describes ground suited to seeds.
    #[must_use]
    pub const fn is_plantable(&self) -> bool {
        self.plantable
    }
}

/// Terrain occupant whose glyph cycles through animation frames.
///
/// The stage is purely cosmetic and never consulted by simulation logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnimatedObject {
    object: StaticObject,
    stage: u8,
    frames: u8,
}

impl AnimatedObject {
    /// Wraps an object with an animation cycle of `frames` stages.
    #[must_use]
    pub const fn new(object: StaticObject, frames: u8) -> Self {
        Self {
            object,
            stage: 0,
            frames,
        }
    }

    /// Interaction flags and key shared with static objects.
    #[must_use]
    pub const fn object(&self) -> &StaticObject {
        &self.object
    }

    /// Current animation stage.
    #[must_use]
    pub const fn stage(&self) -> u8 {
        self.stage
    }

    /// Number of stages in the cycle.
    #[must_use]
    pub const fn frames(&self) -> u8 {
        self.frames
    }

    /// Moves to the next stage, wrapping around. Returns whether the stage changed.
    pub fn advance(&mut self) -> bool {
        if self.frames <= 1 {
            return false;
        }
        self.stage = (self.stage + 1) % self.frames;
        true
    }
}

/// Union of the growth and harvest states a tree moves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TreeState {
    /// Freshly planted seed.
    Seed,
    /// Young tree.
    Sapling,
    /// Fully grown tree.
    Adult,
    /// Felled adult, trunk still standing.
    Trunk,
    /// Remains of a trunk.
    Stump,
    /// Remains of a chopped sapling.
    Stumpling,
    /// Fully harvested; the tile is cleared.
    Removed,
}

/// Single edge in one of the tree state tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// State the edge leaves.
    pub from: TreeState,
    /// State the edge enters.
    pub to: TreeState,
}

/// Growth edges rolled once per tick.
pub const GROWTH_TABLE: [Transition; 2] = [
    Transition {
        from: TreeState::Seed,
        to: TreeState::Sapling,
    },
    Transition {
        from: TreeState::Sapling,
        to: TreeState::Adult,
    },
];

/// Harvest edges applied per chop or dig stage.
pub const HARVEST_TABLE: [Transition; 6] = [
    Transition {
        from: TreeState::Adult,
        to: TreeState::Trunk,
    },
    Transition {
        from: TreeState::Trunk,
        to: TreeState::Stump,
    },
    Transition {
        from: TreeState::Stump,
        to: TreeState::Removed,
    },
    Transition {
        from: TreeState::Sapling,
        to: TreeState::Stumpling,
    },
    Transition {
        from: TreeState::Stumpling,
        to: TreeState::Removed,
    },
    Transition {
        from: TreeState::Seed,
        to: TreeState::Removed,
    },
];

impl TreeState {
    /// Growth states a freshly populated tree may start in.
    pub const GROWING: [TreeState; 3] = [TreeState::Seed, TreeState::Sapling, TreeState::Adult];

    /// Whether the tree is alive in one of the growth states.
    #[must_use]
    pub const fn is_living(self) -> bool {
        matches!(self, Self::Seed | Self::Sapling | Self::Adult)
    }

    /// State reached by growing once, if the growth table has an edge.
    #[must_use]
    pub fn grown(self) -> Option<TreeState> {
        lookup(&GROWTH_TABLE, self)
    }

    /// State reached by a single harvest stage, if the harvest table has an edge.
    #[must_use]
    pub fn harvested(self) -> Option<TreeState> {
        lookup(&HARVEST_TABLE, self)
    }

    /// Whether a tree in this state blocks actors by its own flag.
    ///
    /// Movement treats every tree as blocking regardless; the flag matters to
    /// renderers and to the digging rules.
    #[must_use]
    pub const fn is_collidable(self) -> bool {
        matches!(self, Self::Seed | Self::Sapling | Self::Adult | Self::Trunk)
    }
}

fn lookup(table: &[Transition], from: TreeState) -> Option<TreeState> {
    table
        .iter()
        .find(|transition| transition.from == from)
        .map(|transition| transition.to)
}

/// Tree occupying a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tree {
    position: Coordinate,
    state: TreeState,
}

impl Tree {
    /// Creates a tree at `position` in `state`.
    #[must_use]
    pub const fn new(position: Coordinate, state: TreeState) -> Self {
        Self { position, state }
    }

    /// Tile the tree stands on.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TreeState {
        self.state
    }

    /// Replaces the lifecycle state.
    pub fn set_state(&mut self, state: TreeState) {
        self.state = state;
    }
}

/// Burning tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fire {
    position: Coordinate,
    age: u32,
    flame: u8,
}

impl Fire {
    /// Number of flame shapes a fire cycles through.
    pub const FLAMES: u8 = 2;

    /// Ignites a new fire of age zero at `position`.
    #[must_use]
    pub const fn ignite(position: Coordinate) -> Self {
        Self {
            position,
            age: 0,
            flame: 0,
        }
    }

    /// Tile the fire burns on.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Ticks since ignition.
    #[must_use]
    pub const fn age(&self) -> u32 {
        self.age
    }

    /// Ages the fire by one tick.
    pub fn age_by_one(&mut self) {
        self.age = self.age.saturating_add(1);
    }

    /// Current flame shape, below [`Fire::FLAMES`].
    #[must_use]
    pub const fn flame(&self) -> u8 {
        self.flame
    }

    /// Switches to the next flame shape. Independent of age.
    pub fn flicker(&mut self) {
        self.flame = (self.flame + 1) % Self::FLAMES;
    }
}

/// The single occupant a content-store tile may hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Content {
    /// Fixed terrain such as walls or firebreaks.
    Static(StaticObject),
    /// Terrain with a cosmetic animation cycle.
    Animated(AnimatedObject),
    /// Tree in any lifecycle state.
    Tree(Tree),
    /// Active fire.
    Fire(Fire),
}

impl Content {
    /// Whether the occupant blocks actors by its own flag.
    #[must_use]
    pub const fn is_collidable(&self) -> bool {
        match self {
            Self::Static(object) => object.is_collidable(),
            Self::Animated(animated) => animated.object().is_collidable(),
            Self::Tree(tree) => tree.state().is_collidable(),
            Self::Fire(_) => false,
        }
    }

    /// Whether fire may spread onto the occupant.
    ///
    /// Only terrain burns; trees in any state and existing fires never do.
    #[must_use]
    pub const fn is_flammable(&self) -> bool {
        match self {
            Self::Static(object) => object.is_flammable(),
            Self::Animated(animated) => animated.object().is_flammable(),
            Self::Tree(_) | Self::Fire(_) => false,
        }
    }

    /// Whether an actor may step onto the tile. Trees always block.
    #[must_use]
    pub const fn blocks_movement(&self) -> bool {
        matches!(self, Self::Tree(_)) || self.is_collidable()
    }

    /// Whether path search must route around the tile.
    #[must_use]
    pub const fn is_path_blocked(&self) -> bool {
        matches!(self, Self::Tree(_) | Self::Fire(_)) || self.is_collidable()
    }

    /// Tree payload, if the occupant is a tree.
    #[must_use]
    pub const fn as_tree(&self) -> Option<&Tree> {
        match self {
            Self::Tree(tree) => Some(tree),
            _ => None,
        }
    }

    /// Fire payload, if the occupant is a fire.
    #[must_use]
    pub const fn as_fire(&self) -> Option<&Fire> {
        match self {
            Self::Fire(fire) => Some(fire),
            _ => None,
        }
    }
}

/// Segment of the outer map ring a coordinate belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderKind {
    /// Top edge.
    Top,
    /// Right edge.
    Right,
    /// Bottom edge.
    Bottom,
    /// Left edge.
    Left,
    /// Upper-left corner.
    TopLeft,
    /// Upper-right corner.
    TopRight,
    /// Lower-right corner.
    BottomRight,
    /// Lower-left corner.
    BottomLeft,
}

/// Classifies `coordinate` against the outer ring of a `width` x `height` map.
///
/// Corners take precedence over edges; interior and out-of-range coordinates
/// are not border.
#[must_use]
pub fn classify_border(width: i32, height: i32, coordinate: Coordinate) -> Option<BorderKind> {
    if !coordinate.in_bounds(width, height) {
        return None;
    }

    let right = width - 1;
    let bottom = height - 1;
    let (x, y) = (coordinate.x(), coordinate.y());

    match (x, y) {
        (0, 0) => Some(BorderKind::TopLeft),
        _ if x == right && y == 0 => Some(BorderKind::TopRight),
        _ if x == right && y == bottom => Some(BorderKind::BottomRight),
        _ if x == 0 && y == bottom => Some(BorderKind::BottomLeft),
        _ if y == 0 => Some(BorderKind::Top),
        _ if x == right => Some(BorderKind::Right),
        _ if y == bottom => Some(BorderKind::Bottom),
        _ if x == 0 => Some(BorderKind::Left),
        _ => None,
    }
}

/// Ordered steps leading away from an actor's position.
///
/// Steps are addressed from 1: step 1 is the first move, the last step is the
/// destination. A path holding only its own start coordinate is the
/// degenerate "no route" sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    steps: Vec<Coordinate>,
}

impl Path {
    /// Creates a path from steps ordered first move to destination.
    #[must_use]
    pub fn from_steps(steps: Vec<Coordinate>) -> Self {
        Self { steps }
    }

    /// Degenerate path signalling that no route from `start` exists.
    #[must_use]
    pub fn unreachable(start: Coordinate) -> Self {
        Self { steps: vec![start] }
    }

    /// Step at the 1-based `index`.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<Coordinate> {
        index
            .checked_sub(1)
            .and_then(|offset| self.steps.get(offset).copied())
    }

    /// Next step to take, if any remain.
    #[must_use]
    pub fn next_step(&self) -> Option<Coordinate> {
        self.step(1)
    }

    /// Final step of the path.
    #[must_use]
    pub fn destination(&self) -> Option<Coordinate> {
        self.steps.last().copied()
    }

    /// Remaining steps in order.
    #[must_use]
    pub fn steps(&self) -> &[Coordinate] {
        &self.steps
    }

    /// Number of remaining steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the path has been fully consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Drops the consumed first step so the remainder is re-indexed from 1.
    pub fn advance(&mut self) -> Option<Coordinate> {
        if self.steps.is_empty() {
            None
        } else {
            Some(self.steps.remove(0))
        }
    }

    /// Discards every remaining step.
    pub fn clear(&mut self) {
        self.steps.clear();
    }
}

/// Identifier assigned to a squirrel when the map is loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SquirrelId(u32);

impl SquirrelId {
    /// Creates a squirrel identifier from its numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Numeric value of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Addresses one of the actors in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorId {
    /// The player-controlled lumberjack.
    Player,
    /// An autonomous squirrel.
    Squirrel(SquirrelId),
}

/// Current and maximum hit points of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HitPoints {
    current: u32,
    max: u32,
}

impl HitPoints {
    /// Creates a full pool of `max` hit points.
    #[must_use]
    pub const fn full(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Maximum hit points.
    #[must_use]
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Subtracts `amount`, clamping at zero. Returns the remaining hit points.
    pub fn damage(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Whether the pool has been emptied.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Raised when a bounded search exceeds its iteration cap.
///
/// The world has no tile of the required kind left, or the grid is too large
/// for the configured cap; continuing would desynchronise the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{search} exceeded the limit of {limit} iterations")]
pub struct SearchExhausted {
    /// Name of the search that gave up.
    pub search: &'static str,
    /// Iteration cap that was reached.
    pub limit: u32,
}

/// Draws uniformly random in-bounds coordinates until `accept` approves one.
///
/// Gives up with [`SearchExhausted`] after `max_iterations` rejected draws, or
/// immediately when the bounds are empty.
pub fn sample_coordinate<R, F>(
    rng: &mut R,
    width: i32,
    height: i32,
    max_iterations: u32,
    search: &'static str,
    mut accept: F,
) -> Result<Coordinate, SearchExhausted>
where
    R: Rng + ?Sized,
    F: FnMut(Coordinate) -> bool,
{
    let exhausted = SearchExhausted {
        search,
        limit: max_iterations,
    };
    if width <= 0 || height <= 0 {
        return Err(exhausted);
    }

    for _ in 0..max_iterations {
        let candidate = Coordinate::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if accept(candidate) {
            return Ok(candidate);
        }
    }

    Err(exhausted)
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Moves an actor `distance` tiles unless the target tile blocks movement.
    MoveActor {
        /// Actor attempting to move.
        actor: ActorId,
        /// Number of tiles to travel.
        distance: i32,
        /// Direction of travel.
        direction: Direction,
    },
    /// Advances the harvest chain of trees within reach of an actor.
    Chop {
        /// Actor swinging the axe.
        actor: ActorId,
        /// Tiles the swing covers.
        reach: Reach,
        /// Harvest stages applied to each tree hit.
        stages: u32,
    },
    /// Digs a firebreak, or uproots a tree, in the adjacent tile.
    Dig {
        /// Actor holding the shovel.
        actor: ActorId,
        /// Direction of the tile to dig.
        direction: Direction,
    },
    /// Plants a seed on an empty tile.
    PlantSeed {
        /// Tile receiving the seed.
        at: Coordinate,
    },
    /// Places a tree in an arbitrary growth state on an empty tile.
    PlaceTree {
        /// Tile receiving the tree.
        at: Coordinate,
        /// Initial lifecycle state.
        state: TreeState,
    },
    /// Lays grass on an empty tile.
    PlaceGrass {
        /// Tile receiving the grass.
        at: Coordinate,
    },
    /// Moves the tree at a tile one edge along the growth table.
    GrowTree {
        /// Tile holding the tree.
        at: Coordinate,
    },
    /// Starts a fire at a tile holding nothing or something flammable.
    IgniteFire {
        /// Tile to ignite.
        at: Coordinate,
    },
    /// Spreads the fire at `from` onto the neighbouring `to`.
    SpreadFire {
        /// Burning tile.
        from: Coordinate,
        /// Tile the fire tries to reach.
        to: Coordinate,
    },
    /// Replaces a fire with burnt ground.
    BurnOut {
        /// Tile holding the fire.
        at: Coordinate,
    },
    /// Ages every fire still burning at the listed tiles by one tick.
    AgeFires {
        /// Tiles that held a fire at the start of the tick.
        at: Vec<Coordinate>,
    },
    /// Damages every actor standing in a fire.
    ApplyFireDamage {
        /// Hit points removed per actor.
        amount: u32,
    },
    /// Replaces a squirrel's destination and path.
    AssignRoute {
        /// Squirrel receiving the route.
        squirrel: SquirrelId,
        /// Tile the squirrel intends to plant at.
        destination: Coordinate,
        /// Steps leading towards the destination.
        path: Path,
    },
    /// Advances cosmetic animation stages.
    AdvanceAnimation,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// An actor moved between tiles.
    ActorMoved {
        /// Actor that moved.
        actor: ActorId,
        /// Tile left behind.
        from: Coordinate,
        /// Tile entered.
        to: Coordinate,
    },
    /// An actor's move was refused.
    ActorBlocked {
        /// Actor that stayed in place.
        actor: ActorId,
        /// Tile that refused entry.
        at: Coordinate,
    },
    /// A tree advanced along the harvest chain.
    TreeHarvested {
        /// Actor that harvested the tree.
        actor: ActorId,
        /// Tile holding the tree.
        at: Coordinate,
        /// State before the harvest.
        from: TreeState,
        /// State after the harvest.
        to: TreeState,
    },
    /// A tree reached the end of the harvest chain and was cleared.
    TreeRemoved {
        /// Actor credited with the removal.
        actor: ActorId,
        /// Tile that was cleared.
        at: Coordinate,
    },
    /// A tree grew.
    TreeGrew {
        /// Tile holding the tree.
        at: Coordinate,
        /// State before growing.
        from: TreeState,
        /// State after growing.
        to: TreeState,
    },
    /// A tree was placed by world population.
    TreePlaced {
        /// Tile receiving the tree.
        at: Coordinate,
        /// Initial lifecycle state.
        state: TreeState,
    },
    /// Grass was laid by world population.
    GrassPlaced {
        /// Tile now covered in grass.
        at: Coordinate,
    },
    /// A seed was planted.
    SeedPlanted {
        /// Tile receiving the seed.
        at: Coordinate,
    },
    /// A planting request hit an occupied tile.
    PlantRejected {
        /// Tile that refused the seed.
        at: Coordinate,
    },
    /// A firebreak was dug.
    FirebreakDug {
        /// Actor that dug.
        actor: ActorId,
        /// Tile turned into a firebreak.
        at: Coordinate,
    },
    /// A dig request hit a collidable tile.
    DigRejected {
        /// Actor that tried to dig.
        actor: ActorId,
        /// Tile that refused the shovel.
        at: Coordinate,
    },
    /// A fire started spontaneously.
    FireIgnited {
        /// Tile now burning.
        at: Coordinate,
    },
    /// A fire spread to a neighbouring tile.
    FireSpread {
        /// Tile the fire spread from.
        from: Coordinate,
        /// Tile now burning.
        to: Coordinate,
    },
    /// A fire burned out and left burnt ground.
    FireBurnedOut {
        /// Tile that stopped burning.
        at: Coordinate,
    },
    /// An actor standing in fire lost hit points.
    ActorDamaged {
        /// Actor that was hurt.
        actor: ActorId,
        /// Hit points removed.
        amount: u32,
        /// Hit points left.
        remaining: u32,
    },
    /// A squirrel ran out of hit points and left the roster.
    SquirrelDied {
        /// Squirrel that died.
        squirrel: SquirrelId,
    },
    /// The player ran out of hit points.
    PlayerDied,
    /// A squirrel received a new destination and path.
    RouteAssigned {
        /// Squirrel receiving the route.
        squirrel: SquirrelId,
        /// Tile the squirrel intends to plant at.
        destination: Coordinate,
        /// Number of steps in the new path.
        steps: usize,
    },
    /// Cosmetic animation stages advanced.
    AnimationAdvanced {
        /// Number of objects whose stage changed.
        changed: usize,
    },
}
