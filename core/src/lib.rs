#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fish Rescue engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world registry, and the session controller. Adapters submit
//! [`Command`] values describing player intent, the session executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing every state transition that happened as a result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Fish Rescue.";

/// Commands that express all permissible session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation by a single tick.
    Step,
    /// Moves the player swimmer a single cell in the provided direction.
    MovePlayer {
        /// Direction of travel for the attempted move.
        direction: Direction,
    },
    /// Destroys entities stacked on the clicked tile.
    Click {
        /// Tile that received the click.
        cell: CellCoord,
    },
}

/// Events reported by the session after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just started.
        tick: u64,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after the move.
        to: CellCoord,
    },
    /// Confirms that a self-driven entity moved during the world step.
    EntityMoved {
        /// Identifier of the entity that moved.
        entity: EntityId,
        /// Cell occupied before the move.
        from: CellCoord,
        /// Cell occupied after the move.
        to: CellCoord,
    },
    /// Announces that a missing swimmer was discovered by the player.
    SwimmerFound {
        /// Identifier of the discovered swimmer.
        swimmer: EntityId,
        /// Points credited for the discovery.
        points: u32,
    },
    /// Announces that a following swimmer reached home.
    SwimmerArrived {
        /// Identifier of the swimmer that arrived.
        swimmer: EntityId,
    },
    /// Announces that a following swimmer strayed back into the missing set.
    SwimmerWandered {
        /// Identifier of the swimmer that wandered off.
        swimmer: EntityId,
    },
    /// Announces that the player returned home after every friend arrived.
    PlayerArrived {
        /// Identifier of the player swimmer.
        player: EntityId,
    },
    /// Confirms that an entity was destroyed by a click.
    EntityRemoved {
        /// Identifier of the destroyed entity.
        entity: EntityId,
        /// Kind of the destroyed entity.
        kind: EntityKind,
    },
    /// Reports that a tracked swimmer was destroyed and can no longer arrive.
    SwimmerLost {
        /// Identifier of the destroyed swimmer.
        swimmer: EntityId,
    },
    /// Announces that the arrival target was reached.
    GameWon {
        /// Cumulative score at the moment of victory.
        score: u32,
    },
}

/// Cardinal movement directions available to swimmers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in the order used for uniform random selection.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Column and row delta applied by a single step in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Stable handle assigned to every entity when it is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Applies a signed delta, returning `None` when either axis underflows
    /// or overflows.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Option<CellCoord> {
        let column = self.column.checked_add_signed(dx)?;
        let row = self.row.checked_add_signed(dy)?;
        Some(Self::new(column, row))
    }
}

/// Number of entries in the swimmer palette, player colour included.
pub const SWIMMER_COLOR_COUNT: usize = 7;

const SWIMMER_COLOR_NAMES: [&str; SWIMMER_COLOR_COUNT] = [
    "orange", "green", "yellow", "magenta", "cyan", "pink", "white",
];

/// Palette index assigned to a swimmer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwimmerColor(u8);

impl SwimmerColor {
    /// Colour reserved for the player-controlled swimmer.
    pub const PLAYER: SwimmerColor = SwimmerColor(0);

    /// Returns the palette entry at `index`, if the palette has one.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < SWIMMER_COLOR_COUNT {
            u8::try_from(index).ok().map(Self)
        } else {
            None
        }
    }

    /// Iterator over every colour a friend may wear, in palette order.
    pub fn friends() -> impl Iterator<Item = SwimmerColor> {
        (1..SWIMMER_COLOR_COUNT).filter_map(Self::from_index)
    }

    /// Zero-based palette index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Human readable colour name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        SWIMMER_COLOR_NAMES[self.index() % SWIMMER_COLOR_COUNT]
    }
}

/// Part a swimmer plays in the rescue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwimmerRole {
    /// The swimmer steered by the adapter.
    Player,
    /// A swimmer waiting to be found and guided home.
    Friend,
}

/// Per-swimmer data carried by [`EntityKind::Swimmer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swimmer {
    /// Palette entry worn by the swimmer.
    pub color: SwimmerColor,
    /// Whether the swimmer is the player or a friend.
    pub role: SwimmerRole,
    /// Fast-scared swimmers dart around far more often while missing.
    pub fast_scared: bool,
}

impl Swimmer {
    /// Creates the player-controlled swimmer.
    #[must_use]
    pub const fn player() -> Self {
        Self {
            color: SwimmerColor::PLAYER,
            role: SwimmerRole::Player,
            fast_scared: false,
        }
    }

    /// Creates a friend wearing the provided colour.
    #[must_use]
    pub const fn friend(color: SwimmerColor, fast_scared: bool) -> Self {
        Self {
            color,
            role: SwimmerRole::Friend,
            fast_scared,
        }
    }

    /// Points credited when this swimmer is discovered.
    ///
    /// The player is worth nothing, an ordinary friend ten points and a
    /// fast-scared friend twenty, since it is harder to catch.
    #[must_use]
    pub const fn points(&self) -> u32 {
        match self.role {
            SwimmerRole::Player => 0,
            SwimmerRole::Friend if self.fast_scared => 20,
            SwimmerRole::Friend => 10,
        }
    }
}

/// Closed set of entities that can inhabit the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Static rock that blocks movement.
    Obstacle,
    /// Rock that sinks one cell every tick.
    FallingObstacle,
    /// Goal marker that swimmers must reach.
    Home,
    /// Slow creature that blocks movement but never joins the rescue.
    Snail,
    /// Player or friend swimmer.
    Swimmer(Swimmer),
}

/// Self-driven behaviour executed once per tick by the world step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Does nothing on its own.
    Stationary,
    /// Moves one cell down, unless blocked.
    Falls,
}

impl EntityKind {
    /// Reports whether the entity prevents others from entering its cell.
    #[must_use]
    pub const fn blocks(&self) -> bool {
        matches!(self, Self::Obstacle | Self::FallingObstacle | Self::Snail)
    }

    /// Self-driven behaviour for the entity kind.
    #[must_use]
    pub const fn behavior(&self) -> Behavior {
        match self {
            Self::FallingObstacle => Behavior::Falls,
            Self::Obstacle | Self::Home | Self::Snail | Self::Swimmer(_) => Behavior::Stationary,
        }
    }

    /// Swimmer payload, when the entity is a swimmer.
    #[must_use]
    pub const fn swimmer(&self) -> Option<Swimmer> {
        match self {
            Self::Swimmer(swimmer) => Some(*swimmer),
            _ => None,
        }
    }
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Identifier assigned to the entity.
    pub id: EntityId,
    /// Cell currently occupied by the entity.
    pub cell: CellCoord,
    /// Discriminant and per-variant data.
    pub kind: EntityKind,
}

/// Read-only snapshot describing every live entity, in registry order.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from snapshots already in registry order.
    #[must_use]
    pub fn from_snapshots(snapshots: Vec<EntitySnapshot>) -> Self {
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Snapshots occupying the provided cell, in registry order.
    pub fn at(&self, cell: CellCoord) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots
            .iter()
            .filter(move |snapshot| snapshot.cell == cell)
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }
}

/// Reasons a random placement can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The grid has zero columns or zero rows.
    #[error("the grid has no cells")]
    EmptyGrid,
    /// Every cell is already occupied.
    #[error("no free cell left in a {columns}x{rows} grid")]
    Saturated {
        /// Number of columns in the saturated grid.
        columns: u32,
        /// Number of rows in the saturated grid.
        rows: u32,
    },
}

/// Reasons a session cannot be constructed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Random placement ran out of free cells.
    #[error("failed to populate the world: {0}")]
    Placement(#[from] PlacementError),
    /// An explicit layout referenced cells outside the grid.
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}
