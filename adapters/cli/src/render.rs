//! Plain-text frame rendering for terminal play.

use std::fmt::Write as _;

use fish_rescue_core::{CellCoord, EntityKind, EntityView, SwimmerColor, SwimmerRole};

const WATER: char = '.';

/// Draws the grid row by row, one glyph per cell.
///
/// When several entities share a cell the most important one is shown:
/// the player first, then friends, rocks and snails, and home last.
pub(crate) fn frame(view: &EntityView, columns: u32, rows: u32) -> String {
    let width = usize::try_from(columns).unwrap_or(0);
    let mut out = String::with_capacity((width + 1) * usize::try_from(rows).unwrap_or(0));
    for row in 0..rows {
        for column in 0..columns {
            let cell = CellCoord::new(column, row);
            let glyph = view
                .at(cell)
                .map(|snapshot| snapshot.kind)
                .max_by_key(priority)
                .map_or(WATER, glyph);
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Maps every friend glyph to its colour name.
pub(crate) fn legend() -> String {
    let mut out = String::from("P you  H home  # rock  v falling rock  @ snail");
    for color in SwimmerColor::friends() {
        let _ = write!(out, "  {} {}", friend_glyph(color), color.name());
    }
    out
}

fn priority(kind: &EntityKind) -> u8 {
    match kind {
        EntityKind::Swimmer(swimmer) if swimmer.role == SwimmerRole::Player => 4,
        EntityKind::Swimmer(_) => 3,
        EntityKind::Obstacle | EntityKind::FallingObstacle => 2,
        EntityKind::Snail => 1,
        EntityKind::Home => 0,
    }
}

fn glyph(kind: EntityKind) -> char {
    match kind {
        EntityKind::Obstacle => '#',
        EntityKind::FallingObstacle => 'v',
        EntityKind::Home => 'H',
        EntityKind::Snail => '@',
        EntityKind::Swimmer(swimmer) => match swimmer.role {
            SwimmerRole::Player => 'P',
            SwimmerRole::Friend => friend_glyph(swimmer.color),
        },
    }
}

fn friend_glyph(color: SwimmerColor) -> char {
    u32::try_from(color.index())
        .ok()
        .and_then(|index| char::from_digit(index, 10))
        .unwrap_or('?')
}
