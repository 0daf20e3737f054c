use skogshuggare_core::{Command, Content, Coordinate, Event, StaticObject, Tree, TreeState};
use skogshuggare_system_growth::{Config, Growth};
use skogshuggare_world::{self as world, query, Actor, World};

fn forest(states: &[(i32, i32, TreeState)]) -> World {
    let mut world = World::new(12, 12, Actor::new(Coordinate::new(0, 0), 100, 8));
    for &(x, y, state) in states {
        let at = Coordinate::new(x, y);
        let _ = world.insert_content(at, Content::Tree(Tree::new(at, state)));
    }
    world
}

fn run(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn certain_growth_advances_every_growing_tree_once() {
    let mut world = forest(&[
        (2, 2, TreeState::Seed),
        (3, 3, TreeState::Sapling),
        (4, 4, TreeState::Adult),
        (5, 5, TreeState::Stump),
    ]);
    let mut growth = Growth::new(Config::new(1.0, 1.0, 1_000, 3).with_seeding(0.0, 3));
    let mut commands = Vec::new();

    growth.handle(&world, &mut commands).expect("growth tick");
    let _ = run(&mut world, commands);

    assert_eq!(
        query::trees(&world),
        vec![
            (Coordinate::new(2, 2), TreeState::Sapling),
            (Coordinate::new(3, 3), TreeState::Adult),
            (Coordinate::new(4, 4), TreeState::Adult),
            (Coordinate::new(5, 5), TreeState::Stump),
        ]
    );
}

#[test]
fn impossible_growth_leaves_the_forest_untouched() {
    let world = forest(&[(2, 2, TreeState::Seed), (3, 3, TreeState::Sapling)]);
    let mut growth = Growth::new(Config::new(0.0, 0.0, 1_000, 9).with_seeding(0.0, 3));

    for _ in 0..500 {
        let mut commands = Vec::new();
        growth.handle(&world, &mut commands).expect("growth tick");
        assert!(commands.is_empty());
    }
}

#[test]
fn certain_seeding_plants_between_one_and_max_seeds_on_empty_tiles() {
    let mut world = forest(&[]);
    let wall = Coordinate::new(6, 6);
    let _ = world.insert_content(wall, Content::Static(StaticObject::wall()));
    let mut growth = Growth::new(Config::new(0.0, 0.0, 10_000, 11).with_seeding(1.0, 3));
    let mut commands = Vec::new();

    growth.handle(&world, &mut commands).expect("seeding tick");
    let events = run(&mut world, commands);

    let planted = events
        .iter()
        .filter(|event| matches!(event, Event::SeedPlanted { .. }))
        .count();
    assert!((1..=3).contains(&planted), "planted {planted} seeds");
    assert!(query::trees(&world)
        .iter()
        .all(|(at, state)| *state == TreeState::Seed && *at != Coordinate::new(0, 0)));
    assert_eq!(
        query::content(&world, wall),
        Some(&Content::Static(StaticObject::wall()))
    );
}

#[test]
fn population_places_requested_count_of_growing_trees() {
    let mut world = forest(&[]);
    let mut growth = Growth::new(
        Config::default()
            .with_initial_trees(10, 40)
            .with_initial_grass(0, 0)
            .with_rng_seed(5),
    );
    let mut commands = Vec::new();

    let placed = growth.populate(&world, &mut commands).expect("population");
    let _ = run(&mut world, commands);

    let trees = query::trees(&world);
    assert!((10..40).contains(&placed));
    assert_eq!(trees.len(), placed);
    assert!(trees.iter().all(|(_, state)| state.is_living()));
    assert!(query::content(&world, query::player(&world).position()).is_none());
}

#[test]
fn population_fails_loudly_when_no_tile_is_free() {
    let mut world = World::new(2, 1, Actor::new(Coordinate::new(0, 0), 100, 8));
    let _ = world.insert_content(
        Coordinate::new(1, 0),
        Content::Static(StaticObject::wall()),
    );
    let mut growth = Growth::new(Config::new(0.0, 0.0, 64, 1).with_initial_trees(1, 1));
    let mut commands = Vec::new();

    let error = growth
        .populate(&world, &mut commands)
        .expect_err("no free tile");

    assert_eq!(error.limit, 64);
    assert!(commands.is_empty());
}

#[test]
fn population_lays_grass_apart_from_trees_and_actors() {
    let mut world = forest(&[]);
    let mut growth = Growth::new(
        Config::default()
            .with_initial_trees(15, 15)
            .with_initial_grass(30, 30)
            .with_rng_seed(8),
    );
    let mut commands = Vec::new();

    let placed = growth.populate(&world, &mut commands).expect("population");
    let events = run(&mut world, commands);

    assert_eq!(placed, 45);
    let grass: Vec<Coordinate> = events
        .iter()
        .filter_map(|event| match event {
            Event::GrassPlaced { at } => Some(*at),
            _ => None,
        })
        .collect();
    assert_eq!(grass.len(), 30);
    assert_eq!(query::trees(&world).len(), 15);
    for at in grass {
        assert_eq!(
            query::content(&world, at),
            Some(&Content::Static(StaticObject::grass()))
        );
        assert!(!query::hosts_actor(&world, at));
    }
}
