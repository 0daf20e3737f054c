#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Skogshuggare.

use std::collections::{BTreeMap, HashMap};

use skogshuggare_core::{
    classify_border, ActorId, AnimatedObject, BorderKind, Command, Content, Coordinate, Direction,
    Event, Fire, HitPoints, Path, Reach, SquirrelId, StaticObject, Tree, TreeState,
};
use tracing::debug;

/// Outcome of a dig action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigOutcome {
    /// A firebreak replaced whatever occupied the tile.
    Dug,
    /// A tree in the tile advanced one harvest stage.
    Harvested,
    /// The tile holds a collidable occupant.
    Blocked,
}

/// Mobile entity: the player or a squirrel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    position: Coordinate,
    destination: Option<Coordinate>,
    path: Path,
    vision_radius: u32,
    score: u32,
    hit_points: HitPoints,
}

impl Actor {
    /// Creates an actor standing at `position` with a full hit point pool.
    #[must_use]
    pub fn new(position: Coordinate, hit_points: u32, vision_radius: u32) -> Self {
        Self {
            position,
            destination: None,
            path: Path::default(),
            vision_radius,
            score: 0,
            hit_points: HitPoints::full(hit_points),
        }
    }

    /// Tile the actor stands on.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Tile the actor is heading for, if one has been chosen.
    #[must_use]
    pub const fn destination(&self) -> Option<Coordinate> {
        self.destination
    }

    /// Remaining steps towards the destination.
    #[must_use]
    pub const fn path(&self) -> &Path {
        &self.path
    }

    /// Radius the renderer reveals around the actor.
    #[must_use]
    pub const fn vision_radius(&self) -> u32 {
        self.vision_radius
    }

    /// Trees fully harvested by the actor.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Current and maximum hit points.
    #[must_use]
    pub const fn hit_points(&self) -> HitPoints {
        self.hit_points
    }

    /// Whether the destination lies exactly one orthogonal step away.
    #[must_use]
    pub fn is_adjacent_to_destination(&self) -> bool {
        self.destination
            .is_some_and(|destination| self.position.is_adjacent_to(destination))
    }

    fn enter(&mut self, to: Coordinate) {
        self.position = to;
        if self.path.next_step() == Some(to) {
            let _ = self.path.advance();
        } else {
            self.path.clear();
        }
    }
}

/// Represents the authoritative Skogshuggare world state.
#[derive(Debug)]
pub struct World {
    width: i32,
    height: i32,
    content: HashMap<Coordinate, Content>,
    decorations: HashMap<Coordinate, AnimatedObject>,
    borders: HashMap<Coordinate, BorderKind>,
    player: Actor,
    squirrels: BTreeMap<SquirrelId, Actor>,
    next_squirrel: u32,
}

impl World {
    /// Creates an empty world of the given bounds holding only the player.
    #[must_use]
    pub fn new(width: i32, height: i32, player: Actor) -> Self {
        Self {
            width,
            height,
            content: HashMap::new(),
            decorations: HashMap::new(),
            borders: HashMap::new(),
            player,
            squirrels: BTreeMap::new(),
            next_squirrel: 0,
        }
    }

    /// Adds a squirrel to the roster and returns its identifier.
    pub fn add_squirrel(&mut self, squirrel: Actor) -> SquirrelId {
        let id = SquirrelId::new(self.next_squirrel);
        self.next_squirrel = self.next_squirrel.saturating_add(1);
        let _ = self.squirrels.insert(id, squirrel);
        id
    }

    /// Stores `content` at `at`, returning the occupant it replaced.
    ///
    /// The border cache is kept in step with the content map.
    pub fn insert_content(&mut self, at: Coordinate, content: Content) -> Option<Content> {
        match classify_border(self.width, self.height, at) {
            Some(kind) => {
                let _ = self.borders.insert(at, kind);
            }
            None => {
                let _ = self.borders.remove(&at);
            }
        }
        self.content.insert(at, content)
    }

    /// Clears the tile at `at`, returning its previous occupant.
    pub fn remove_content(&mut self, at: Coordinate) -> Option<Content> {
        let _ = self.borders.remove(&at);
        self.content.remove(&at)
    }

    /// Places a cosmetic overlay object at `at`.
    pub fn insert_decoration(&mut self, at: Coordinate, decoration: AnimatedObject) {
        let _ = self.decorations.insert(at, decoration);
    }

    fn actor(&self, actor: ActorId) -> Option<&Actor> {
        match actor {
            ActorId::Player => Some(&self.player),
            ActorId::Squirrel(id) => self.squirrels.get(&id),
        }
    }

    fn actor_mut(&mut self, actor: ActorId) -> Option<&mut Actor> {
        match actor {
            ActorId::Player => Some(&mut self.player),
            ActorId::Squirrel(id) => self.squirrels.get_mut(&id),
        }
    }

    fn blocks_movement(&self, at: Coordinate) -> bool {
        self.content.get(&at).is_some_and(Content::blocks_movement)
    }

    fn is_path_blocked(&self, at: Coordinate) -> bool {
        self.content.get(&at).is_some_and(Content::is_path_blocked)
    }

    fn is_plantable(&self, at: Coordinate) -> bool {
        !self.content.contains_key(&at)
    }

    fn hosts_actor(&self, at: Coordinate) -> bool {
        self.player.position == at || self.squirrels.values().any(|squirrel| squirrel.position == at)
    }

    fn is_flammable(&self, at: Coordinate) -> bool {
        self.content.get(&at).map_or(true, Content::is_flammable)
    }

    fn move_actor(
        &mut self,
        actor: ActorId,
        distance: i32,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(from) = self.actor(actor).map(Actor::position) else {
            return false;
        };
        let to = from.step(direction, distance);

        if self.blocks_movement(to) {
            out_events.push(Event::ActorBlocked { actor, at: to });
            return false;
        }

        let Some(mover) = self.actor_mut(actor) else {
            return false;
        };
        mover.enter(to);
        out_events.push(Event::ActorMoved { actor, from, to });
        true
    }

    fn chop(
        &mut self,
        actor: ActorId,
        reach: Reach,
        stages: u32,
        out_events: &mut Vec<Event>,
    ) -> u32 {
        let Some(origin) = self.actor(actor).map(Actor::position) else {
            return 0;
        };

        let mut chopped = 0;
        for target in reach.targets(origin) {
            if self.harvest(actor, target, stages, out_events) {
                chopped += 1;
                if matches!(reach, Reach::Toward(_)) {
                    break;
                }
            }
        }
        chopped
    }

    fn harvest(
        &mut self,
        actor: ActorId,
        at: Coordinate,
        stages: u32,
        out_events: &mut Vec<Event>,
    ) -> bool {
        let Some(tree) = self.content.get(&at).and_then(Content::as_tree).copied() else {
            return false;
        };

        let mut state = tree.state();
        for _ in 0..stages {
            let Some(next) = state.harvested() else {
                break;
            };
            out_events.push(Event::TreeHarvested {
                actor,
                at,
                from: state,
                to: next,
            });
            state = next;
        }

        if state == tree.state() {
            return false;
        }

        if state == TreeState::Removed {
            let _ = self.remove_content(at);
            if let Some(harvester) = self.actor_mut(actor) {
                harvester.score = harvester.score.saturating_add(1);
            }
            out_events.push(Event::TreeRemoved { actor, at });
        } else {
            let _ = self.insert_content(at, Content::Tree(Tree::new(at, state)));
        }
        true
    }

    fn dig(
        &mut self,
        actor: ActorId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) -> DigOutcome {
        let Some(origin) = self.actor(actor).map(Actor::position) else {
            return DigOutcome::Blocked;
        };
        let at = origin.step(direction, 1);

        match self.content.get(&at) {
            Some(Content::Tree(_)) => {
                let _ = self.harvest(actor, at, 1, out_events);
                DigOutcome::Harvested
            }
            Some(occupant) if occupant.is_collidable() => {
                out_events.push(Event::DigRejected { actor, at });
                DigOutcome::Blocked
            }
            _ => {
                let _ = self.insert_content(at, Content::Static(StaticObject::firebreak()));
                out_events.push(Event::FirebreakDug { actor, at });
                DigOutcome::Dug
            }
        }
    }

    fn plant_seed(&mut self, at: Coordinate, out_events: &mut Vec<Event>) -> bool {
        if !self.is_plantable(at) || self.hosts_actor(at) {
            out_events.push(Event::PlantRejected { at });
            return false;
        }

        let _ = self.insert_content(at, Content::Tree(Tree::new(at, TreeState::Seed)));
        out_events.push(Event::SeedPlanted { at });
        true
    }

    fn place_tree(&mut self, at: Coordinate, state: TreeState, out_events: &mut Vec<Event>) -> bool {
        if !self.is_plantable(at) || self.hosts_actor(at) || state == TreeState::Removed {
            return false;
        }

        let _ = self.insert_content(at, Content::Tree(Tree::new(at, state)));
        out_events.push(Event::TreePlaced { at, state });
        true
    }

    fn place_grass(&mut self, at: Coordinate, out_events: &mut Vec<Event>) -> bool {
        if self.content.contains_key(&at) {
            return false;
        }

        let _ = self.insert_content(at, Content::Static(StaticObject::grass()));
        out_events.push(Event::GrassPlaced { at });
        true
    }

    fn grow_tree(&mut self, at: Coordinate, out_events: &mut Vec<Event>) -> bool {
        let Some(Content::Tree(tree)) = self.content.get_mut(&at) else {
            return false;
        };
        let from = tree.state();
        let Some(to) = from.grown() else {
            return false;
        };

        tree.set_state(to);
        out_events.push(Event::TreeGrew { at, from, to });
        true
    }

    fn ignite(&mut self, at: Coordinate) -> bool {
        if !at.in_bounds(self.width, self.height) || !self.is_flammable(at) {
            return false;
        }
        let _ = self.insert_content(at, Content::Fire(Fire::ignite(at)));
        true
    }

    fn burn_out(&mut self, at: Coordinate, out_events: &mut Vec<Event>) -> bool {
        if !matches!(self.content.get(&at), Some(Content::Fire(_))) {
            return false;
        }

        let _ = self.insert_content(at, Content::Static(StaticObject::burnt_ground()));
        out_events.push(Event::FireBurnedOut { at });
        true
    }

    fn age_fires(&mut self, at: &[Coordinate]) -> usize {
        let mut aged = 0;
        for coordinate in at {
            if let Some(Content::Fire(fire)) = self.content.get_mut(coordinate) {
                fire.age_by_one();
                aged += 1;
            }
        }
        aged
    }

    fn apply_fire_damage(&mut self, amount: u32, out_events: &mut Vec<Event>) -> usize {
        let burning: Vec<ActorId> = std::iter::once(ActorId::Player)
            .chain(self.squirrels.keys().copied().map(ActorId::Squirrel))
            .filter(|actor| {
                self.actor(*actor)
                    .is_some_and(|a| matches!(self.content.get(&a.position), Some(Content::Fire(_))))
            })
            .collect();

        for actor in &burning {
            let Some(victim) = self.actor_mut(*actor) else {
                continue;
            };
            let remaining = victim.hit_points.damage(amount);
            out_events.push(Event::ActorDamaged {
                actor: *actor,
                amount,
                remaining,
            });

            if remaining > 0 {
                continue;
            }
            match actor {
                ActorId::Player => out_events.push(Event::PlayerDied),
                ActorId::Squirrel(id) => {
                    let _ = self.squirrels.remove(id);
                    out_events.push(Event::SquirrelDied { squirrel: *id });
                }
            }
        }
        burning.len()
    }

    fn assign_route(&mut self, squirrel: SquirrelId, destination: Coordinate, path: Path) -> bool {
        let Some(actor) = self.squirrels.get_mut(&squirrel) else {
            return false;
        };
        actor.destination = Some(destination);
        actor.path = path;
        true
    }

    fn advance_animation(&mut self) -> usize {
        let mut changed = 0;
        for content in self.content.values_mut() {
            match content {
                Content::Animated(animated) => changed += usize::from(animated.advance()),
                Content::Fire(fire) => {
                    fire.flicker();
                    changed += 1;
                }
                Content::Static(_) | Content::Tree(_) => {}
            }
        }
        changed
            + self
                .decorations
                .values_mut()
                .map(AnimatedObject::advance)
                .filter(|advanced| *advanced)
                .count()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveActor {
            actor,
            distance,
            direction,
        } => {
            if !world.move_actor(actor, distance, direction, out_events) {
                debug!(?actor, ?direction, "move blocked");
            }
        }
        Command::Chop {
            actor,
            reach,
            stages,
        } => {
            let chopped = world.chop(actor, reach, stages, out_events);
            debug!(?actor, ?reach, chopped, "chop resolved");
        }
        Command::Dig { actor, direction } => {
            let outcome = world.dig(actor, direction, out_events);
            debug!(?actor, ?direction, ?outcome, "dig resolved");
        }
        Command::PlantSeed { at } => {
            if !world.plant_seed(at, out_events) {
                debug!(x = at.x(), y = at.y(), "seed rejected");
            }
        }
        Command::PlaceTree { at, state } => {
            if !world.place_tree(at, state, out_events) {
                debug!(x = at.x(), y = at.y(), ?state, "tree placement rejected");
            }
        }
        Command::PlaceGrass { at } => {
            if !world.place_grass(at, out_events) {
                debug!(x = at.x(), y = at.y(), "grass placement rejected");
            }
        }
        Command::GrowTree { at } => {
            let _ = world.grow_tree(at, out_events);
        }
        Command::IgniteFire { at } => {
            if world.ignite(at) {
                out_events.push(Event::FireIgnited { at });
            }
        }
        Command::SpreadFire { from, to } => {
            let burning = matches!(world.content.get(&from), Some(Content::Fire(_)));
            if burning && world.ignite(to) {
                out_events.push(Event::FireSpread { from, to });
            }
        }
        Command::BurnOut { at } => {
            let _ = world.burn_out(at, out_events);
        }
        Command::AgeFires { at } => {
            let aged = world.age_fires(&at);
            debug!(aged, "fires aged");
        }
        Command::ApplyFireDamage { amount } => {
            let burned = world.apply_fire_damage(amount, out_events);
            if burned > 0 {
                debug!(burned, amount, "actors standing in fire");
            }
        }
        Command::AssignRoute {
            squirrel,
            destination,
            path,
        } => {
            let steps = path.len();
            if world.assign_route(squirrel, destination, path) {
                out_events.push(Event::RouteAssigned {
                    squirrel,
                    destination,
                    steps,
                });
            }
        }
        Command::AdvanceAnimation => {
            let changed = world.advance_animation();
            out_events.push(Event::AnimationAdvanced { changed });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Actor, World};
    use skogshuggare_core::{
        ActorId, AnimatedObject, BorderKind, Content, Coordinate, SquirrelId, TreeState,
    };

    /// Width and height used for generation and random sampling.
    #[must_use]
    pub fn dimensions(world: &World) -> (i32, i32) {
        (world.width, world.height)
    }

    /// Occupant stored at `at`, if any. Out-of-range coordinates are empty.
    #[must_use]
    pub fn content(world: &World, at: Coordinate) -> Option<&Content> {
        world.content.get(&at)
    }

    /// Iterates every occupied tile in unspecified order.
    pub fn contents(world: &World) -> impl Iterator<Item = (Coordinate, &Content)> {
        world.content.iter().map(|(at, content)| (*at, content))
    }

    /// Iterates every cosmetic overlay object in unspecified order.
    pub fn decorations(world: &World) -> impl Iterator<Item = (Coordinate, &AnimatedObject)> {
        world
            .decorations
            .iter()
            .map(|(at, decoration)| (*at, decoration))
    }

    /// Border segment cached for an occupied ring tile.
    #[must_use]
    pub fn border(world: &World, at: Coordinate) -> Option<BorderKind> {
        world.borders.get(&at).copied()
    }

    /// Iterates the cached border classification of occupied ring tiles.
    pub fn borders(world: &World) -> impl Iterator<Item = (Coordinate, BorderKind)> + '_ {
        world.borders.iter().map(|(at, kind)| (*at, *kind))
    }

    /// Whether path search must route around `at`.
    #[must_use]
    pub fn is_path_blocked(world: &World, at: Coordinate) -> bool {
        world.is_path_blocked(at)
    }

    /// Whether an actor stepping onto `at` would be refused.
    #[must_use]
    pub fn blocks_movement(world: &World, at: Coordinate) -> bool {
        world.blocks_movement(at)
    }

    /// Whether a seed planted at `at` would take.
    #[must_use]
    pub fn is_plantable(world: &World, at: Coordinate) -> bool {
        world.is_plantable(at)
    }

    /// Whether a fire could start at `at`.
    #[must_use]
    pub fn is_flammable(world: &World, at: Coordinate) -> bool {
        world.is_flammable(at)
    }

    /// Tiles currently burning, ordered by coordinate.
    #[must_use]
    pub fn fires(world: &World) -> Vec<Coordinate> {
        let mut fires: Vec<Coordinate> = world
            .content
            .iter()
            .filter(|(_, content)| matches!(content, Content::Fire(_)))
            .map(|(at, _)| *at)
            .collect();
        fires.sort_unstable();
        fires
    }

    /// Trees and their states, ordered by coordinate.
    #[must_use]
    pub fn trees(world: &World) -> Vec<(Coordinate, TreeState)> {
        let mut trees: Vec<(Coordinate, TreeState)> = world
            .content
            .values()
            .filter_map(Content::as_tree)
            .map(|tree| (tree.position(), tree.state()))
            .collect();
        trees.sort_unstable();
        trees
    }

    /// The player-controlled actor.
    #[must_use]
    pub fn player(world: &World) -> &Actor {
        &world.player
    }

    /// Whether the player still has hit points left.
    #[must_use]
    pub fn is_player_alive(world: &World) -> bool {
        !world.player.hit_points().is_depleted()
    }

    /// Whether the player or a squirrel stands on `at`.
    #[must_use]
    pub fn hosts_actor(world: &World, at: Coordinate) -> bool {
        world.hosts_actor(at)
    }

    /// Looks up any actor by identifier.
    #[must_use]
    pub fn actor(world: &World, actor: ActorId) -> Option<&Actor> {
        world.actor(actor)
    }

    /// Squirrels still on the roster, ordered by identifier.
    pub fn squirrels(world: &World) -> impl Iterator<Item = (SquirrelId, &Actor)> {
        world.squirrels.iter().map(|(id, actor)| (*id, actor))
    }

    /// Number of squirrels still on the roster.
    #[must_use]
    pub fn squirrel_count(world: &World) -> usize {
        world.squirrels.len()
    }
}
