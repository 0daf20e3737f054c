//! ASCII snapshot of the world for terminal output.

use skogshuggare_core::{BorderKind, Content, Coordinate, ObjectKey, StaticObject, TreeState};
use skogshuggare_world::{query, World};

/// Draws the world one character per tile followed by a status line.
///
/// Only tiles within the player's vision radius are drawn; the rest stay
/// blank. Actors are drawn above content, content above decorations, and the
/// outer ring uses line glyphs from the border cache.
pub(crate) fn render(world: &World) -> String {
    let (width, height) = query::dimensions(world);
    let player = query::player(world);
    let origin = player.position();
    let radius = i64::from(player.vision_radius());
    let visible = |at: Coordinate| {
        (i64::from(at.x()) - i64::from(origin.x())).abs() <= radius
            && (i64::from(at.y()) - i64::from(origin.y())).abs() <= radius
    };

    let mut grid: Vec<Vec<char>> = (0..height)
        .map(|_| vec![' '; usize::try_from(width).unwrap_or(0)])
        .collect();
    let mut paint = |at: Coordinate, symbol: char| {
        if !visible(at) {
            return;
        }
        if let (Ok(x), Ok(y)) = (usize::try_from(at.x()), usize::try_from(at.y())) {
            if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
                *cell = symbol;
            }
        }
    };

    for (at, decoration) in query::decorations(world) {
        paint(at, object_symbol(decoration.object(), decoration.stage()));
    }
    for (at, content) in query::contents(world) {
        let ring = query::border(world, at).filter(|_| is_wall(content));
        paint(at, ring.map_or_else(|| content_symbol(content), border_symbol));
    }
    for (_, squirrel) in query::squirrels(world) {
        paint(squirrel.position(), 's');
    }
    paint(origin, if query::is_player_alive(world) { 'p' } else { 'x' });

    let mut out = String::new();
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out.push_str(&format!(
        "score {}  hp {}/{}  squirrels {}  fires {}\n",
        player.score(),
        player.hit_points().current(),
        player.hit_points().max(),
        query::squirrel_count(world),
        query::fires(world).len(),
    ));
    out
}

fn content_symbol(content: &Content) -> char {
    match content {
        Content::Static(object) => object_symbol(object, 0),
        Content::Animated(animated) => object_symbol(animated.object(), animated.stage()),
        Content::Tree(tree) => match tree.state() {
            TreeState::Seed => '.',
            TreeState::Sapling => 't',
            TreeState::Adult => 'T',
            TreeState::Trunk => '|',
            TreeState::Stump => 'u',
            TreeState::Stumpling => ',',
            TreeState::Removed => ' ',
        },
        Content::Fire(fire) if fire.flame() == 0 => 'f',
        Content::Fire(_) => 'F',
    }
}

fn is_wall(content: &Content) -> bool {
    matches!(content, Content::Static(object) if object.key() == ObjectKey::Wall)
}

fn border_symbol(kind: BorderKind) -> char {
    match kind {
        BorderKind::Top | BorderKind::Bottom => '─',
        BorderKind::Left | BorderKind::Right => '│',
        BorderKind::TopLeft => '┌',
        BorderKind::TopRight => '┐',
        BorderKind::BottomRight => '┘',
        BorderKind::BottomLeft => '└',
    }
}

fn object_symbol(object: &StaticObject, stage: u8) -> char {
    match (object.key(), stage % 2) {
        (ObjectKey::Wall, _) => '#',
        (ObjectKey::WaterLight, 0) => '~',
        (ObjectKey::WaterLight, _) => '-',
        (ObjectKey::WaterHeavy, 0) => '≈',
        (ObjectKey::WaterHeavy, _) => '~',
        (ObjectKey::Grass, _) => '"',
        (ObjectKey::Firebreak, _) => '=',
        (ObjectKey::BurntGround, _) => '_',
        (ObjectKey::Bird, 0) => 'v',
        (ObjectKey::Bird, _) => '^',
        (ObjectKey::Cloud, _) => 'o',
    }
}
