use skogshuggare_core::{
    ActorId, AnimatedObject, Command, Content, Coordinate, Direction, Event, Fire, Reach,
    StaticObject, Tree, TreeState,
};
use skogshuggare_world::{apply, query, Actor, World};

const ORIGIN: Coordinate = Coordinate::new(3, 3);

fn world_with_player() -> World {
    World::new(8, 8, Actor::new(ORIGIN, 100, 8))
}

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
}

fn chop_right(world: &mut World) -> Vec<Event> {
    run(
        world,
        Command::Chop {
            actor: ActorId::Player,
            reach: Reach::Toward(Direction::Right),
            stages: 1,
        },
    )
}

#[test]
fn chopping_walks_every_tree_forward_to_removal() {
    let chains = [
        vec![
            TreeState::Adult,
            TreeState::Trunk,
            TreeState::Stump,
            TreeState::Removed,
        ],
        vec![TreeState::Sapling, TreeState::Stumpling, TreeState::Removed],
        vec![TreeState::Seed, TreeState::Removed],
    ];
    let target = ORIGIN.step(Direction::Right, 1);

    for (index, chain) in chains.iter().enumerate() {
        let mut world = world_with_player();
        let _ = world.insert_content(target, Content::Tree(Tree::new(target, chain[0])));

        for pair in chain.windows(2) {
            let events = chop_right(&mut world);
            assert!(events.contains(&Event::TreeHarvested {
                actor: ActorId::Player,
                at: target,
                from: pair[0],
                to: pair[1],
            }));
            assert!(pair[0] < pair[1], "harvest went backwards");

            let now = query::content(&world, target).and_then(Content::as_tree);
            if pair[1] == TreeState::Removed {
                assert!(now.is_none(), "removed tree still stored");
            } else {
                assert_eq!(now.map(Tree::state), Some(pair[1]));
            }
        }

        assert_eq!(query::player(&world).score(), 1, "chain {index}");
        assert!(chop_right(&mut world).is_empty());
        assert_eq!(query::player(&world).score(), 1);
    }
}

#[test]
fn moves_fail_into_collidable_ground_and_every_tree() {
    let mut blockers = vec![
        Content::Static(StaticObject::wall()),
        Content::Animated(AnimatedObject::new(StaticObject::water(false), 2)),
        Content::Animated(AnimatedObject::new(StaticObject::water(true), 2)),
    ];
    let target = ORIGIN.step(Direction::Down, 1);
    blockers.extend(
        [
            TreeState::Seed,
            TreeState::Sapling,
            TreeState::Adult,
            TreeState::Trunk,
            TreeState::Stump,
            TreeState::Stumpling,
        ]
        .map(|state| Content::Tree(Tree::new(target, state))),
    );

    for blocker in blockers {
        let mut world = world_with_player();
        let _ = world.insert_content(target, blocker);

        let events = run(
            &mut world,
            Command::MoveActor {
                actor: ActorId::Player,
                distance: 1,
                direction: Direction::Down,
            },
        );

        assert_eq!(query::player(&world).position(), ORIGIN, "{blocker:?}");
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::ActorMoved { .. })));
    }
}

#[test]
fn moves_succeed_onto_open_ground() {
    let target = ORIGIN.step(Direction::Left, 1);
    let open = [
        None,
        Some(Content::Static(StaticObject::grass())),
        Some(Content::Static(StaticObject::firebreak())),
        Some(Content::Static(StaticObject::burnt_ground())),
        Some(Content::Fire(Fire::ignite(target))),
    ];

    for ground in open {
        let mut world = world_with_player();
        if let Some(content) = ground {
            let _ = world.insert_content(target, content);
        }

        let events = run(
            &mut world,
            Command::MoveActor {
                actor: ActorId::Player,
                distance: 1,
                direction: Direction::Left,
            },
        );

        assert_eq!(query::player(&world).position(), target, "{ground:?}");
        assert!(events.contains(&Event::ActorMoved {
            actor: ActorId::Player,
            from: ORIGIN,
            to: target,
        }));
    }
}

#[test]
fn seeds_only_take_root_on_empty_tiles() {
    let mut world = world_with_player();
    let occupied = [
        (
            Coordinate::new(1, 1),
            Content::Static(StaticObject::wall()),
        ),
        (
            Coordinate::new(2, 1),
            Content::Static(StaticObject::firebreak()),
        ),
        (
            Coordinate::new(4, 1),
            Content::Tree(Tree::new(Coordinate::new(4, 1), TreeState::Stump)),
        ),
        (
            Coordinate::new(5, 1),
            Content::Fire(Fire::ignite(Coordinate::new(5, 1))),
        ),
    ];
    for (at, content) in occupied {
        let _ = world.insert_content(at, content);
    }

    for (at, content) in occupied {
        let events = run(&mut world, Command::PlantSeed { at });
        assert_eq!(events, vec![Event::PlantRejected { at }]);
        assert_eq!(query::content(&world, at), Some(&content));
    }

    let empty = Coordinate::new(6, 6);
    let events = run(&mut world, Command::PlantSeed { at: empty });
    assert_eq!(events, vec![Event::SeedPlanted { at: empty }]);
    assert_eq!(
        query::content(&world, empty).and_then(Content::as_tree).map(Tree::state),
        Some(TreeState::Seed)
    );

    let events = run(&mut world, Command::PlantSeed { at: ORIGIN });
    assert_eq!(events, vec![Event::PlantRejected { at: ORIGIN }]);
}

#[test]
fn grass_covers_empty_ground_and_refuses_seeds() {
    let mut world = world_with_player();
    let meadow = Coordinate::new(5, 5);
    let wall = Coordinate::new(6, 5);
    let _ = world.insert_content(wall, Content::Static(StaticObject::wall()));

    let events = run(&mut world, Command::PlaceGrass { at: meadow });
    assert_eq!(events, vec![Event::GrassPlaced { at: meadow }]);
    assert!(run(&mut world, Command::PlaceGrass { at: wall }).is_empty());
    assert_eq!(
        query::content(&world, wall),
        Some(&Content::Static(StaticObject::wall()))
    );

    let events = run(&mut world, Command::PlantSeed { at: meadow });
    assert_eq!(events, vec![Event::PlantRejected { at: meadow }]);

    let events = run(&mut world, Command::IgniteFire { at: meadow });
    assert_eq!(events, vec![Event::FireIgnited { at: meadow }]);
}
