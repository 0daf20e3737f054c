use skogshuggare_core::{
    ActorId, Command, Content, Coordinate, Event, Path, SquirrelId, StaticObject, Tree,
    TreeState,
};
use skogshuggare_system_squirrels::{Config, Squirrels};
use skogshuggare_world::{self as world, query, Actor, World};

fn walled_arena(width: i32, height: i32) -> World {
    let mut world = World::new(width, height, Actor::new(Coordinate::new(1, 1), 100, 8));
    for y in 0..height {
        for x in 0..width {
            if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                let _ = world.insert_content(
                    Coordinate::new(x, y),
                    Content::Static(StaticObject::wall()),
                );
            }
        }
    }
    world
}

fn tick(world: &mut World, squirrels: &mut Squirrels) -> (Vec<Command>, Vec<Event>) {
    let mut commands = Vec::new();
    squirrels.handle(world, &mut commands).expect("squirrel tick");
    let mut events = Vec::new();
    for command in commands.clone() {
        world::apply(world, command, &mut events);
    }
    (commands, events)
}

fn route_to(world: &mut World, id: SquirrelId, destination: Coordinate, steps: &[Coordinate]) {
    let mut events = Vec::new();
    world::apply(
        world,
        Command::AssignRoute {
            squirrel: id,
            destination,
            path: Path::from_steps(steps.to_vec()),
        },
        &mut events,
    );
}

#[test]
fn idle_squirrel_picks_a_plantable_destination_and_acts() {
    let mut world = walled_arena(10, 10);
    let id = world.add_squirrel(Actor::new(Coordinate::new(5, 5), 10, 4));
    let mut squirrels = Squirrels::new(Config::new(10_000, 17));
    let mut commands = Vec::new();

    squirrels.handle(&world, &mut commands).expect("squirrel tick");

    let Some(Command::AssignRoute { destination, path, .. }) = commands.first() else {
        panic!("expected a route assignment first, got {commands:?}");
    };
    assert!(destination.in_bounds(10, 10));
    assert!(query::is_plantable(&world, *destination));
    assert_eq!(path.destination(), Some(*destination));
    let acted = commands.iter().any(|command| {
        matches!(command, Command::MoveActor { actor: ActorId::Squirrel(moved), .. } if *moved == id)
            || matches!(command, Command::PlantSeed { .. })
    });
    assert!(acted, "squirrel neither moved nor planted: {commands:?}");
}

#[test]
fn squirrel_next_to_its_destination_plants_instead_of_moving() {
    let mut world = walled_arena(10, 10);
    let start = Coordinate::new(5, 5);
    let id = world.add_squirrel(Actor::new(start, 10, 4));
    let destination = Coordinate::new(6, 5);
    route_to(&mut world, id, destination, &[destination]);
    let mut squirrels = Squirrels::new(Config::new(10_000, 2));

    let (commands, events) = tick(&mut world, &mut squirrels);

    assert!(commands.contains(&Command::PlantSeed { at: destination }));
    assert!(!commands
        .iter()
        .any(|command| matches!(command, Command::MoveActor { .. })));
    assert!(events.contains(&Event::SeedPlanted { at: destination }));
    assert_eq!(query::trees(&world), vec![(destination, TreeState::Seed)]);

    let squirrel = query::actor(&world, ActorId::Squirrel(id)).expect("squirrel");
    assert_eq!(squirrel.position(), start);
    assert_ne!(squirrel.destination(), Some(destination));
}

#[test]
fn squirrel_recomputes_a_route_whose_step_became_blocked() {
    let mut world = walled_arena(10, 10);
    let start = Coordinate::new(2, 5);
    let id = world.add_squirrel(Actor::new(start, 10, 4));
    let destination = Coordinate::new(5, 5);
    let straight = [
        Coordinate::new(3, 5),
        Coordinate::new(4, 5),
        destination,
    ];
    route_to(&mut world, id, destination, &straight);
    let blocker = Coordinate::new(4, 5);
    let _ = world.insert_content(blocker, Content::Tree(Tree::new(blocker, TreeState::Adult)));
    let mut squirrels = Squirrels::new(Config::new(10_000, 5));

    let (commands, _) = tick(&mut world, &mut squirrels);

    let Some(Command::AssignRoute { destination: kept, path, .. }) = commands.first() else {
        panic!("expected a fresh route, got {commands:?}");
    };
    assert_eq!(*kept, destination);
    assert_eq!(path.len(), 5);
    assert!(!path.steps().contains(&blocker));

    let squirrel = query::actor(&world, ActorId::Squirrel(id)).expect("squirrel");
    assert_eq!(Some(squirrel.position()), path.step(1));
}

#[test]
fn squirrels_never_walk_through_walls_or_trees() {
    let mut world = walled_arena(12, 9);
    let ids: Vec<_> = [(3, 3), (8, 5), (5, 7)]
        .into_iter()
        .map(|(x, y)| world.add_squirrel(Actor::new(Coordinate::new(x, y), 10, 4)))
        .collect();
    let mut squirrels = Squirrels::new(Config::new(10_000, 99));
    let mut planted = 0;

    for _ in 0..60 {
        let (_, events) = tick(&mut world, &mut squirrels);
        planted += events
            .iter()
            .filter(|event| matches!(event, Event::SeedPlanted { .. }))
            .count();

        for id in &ids {
            let squirrel = query::actor(&world, ActorId::Squirrel(*id)).expect("alive");
            let here = squirrel.position();
            assert!(here.in_bounds(12, 9));
            assert!(!query::blocks_movement(&world, here), "{id:?} stands in {here:?}");
        }
    }

    assert!(planted > 0, "squirrels never planted anything");
}

#[test]
fn boxed_in_squirrel_stays_put() {
    let mut world = walled_arena(7, 7);
    let start = Coordinate::new(3, 3);
    for at in start.neighbors() {
        let _ = world.insert_content(at, Content::Static(StaticObject::wall()));
    }
    let id = world.add_squirrel(Actor::new(start, 10, 4));
    let mut squirrels = Squirrels::new(Config::new(10_000, 6));

    for _ in 0..20 {
        let _ = tick(&mut world, &mut squirrels);
    }

    let squirrel = query::actor(&world, ActorId::Squirrel(id)).expect("squirrel");
    assert_eq!(squirrel.position(), start);
}
