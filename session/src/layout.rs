//! Explicit session layouts for scripted scenarios.

use fish_rescue_core::{CellCoord, SwimmerColor};

/// Friend swimmer placed by a [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FriendPlacement {
    /// Cell the friend starts on.
    pub cell: CellCoord,
    /// Palette entry worn by the friend.
    pub color: SwimmerColor,
    /// Whether the friend darts around more often while missing.
    pub fast_scared: bool,
}

/// Hand-placed world contents. The player always starts on the home cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Cell holding the home marker.
    pub home: CellCoord,
    /// Static rocks.
    pub obstacles: Vec<CellCoord>,
    /// Falling rocks.
    pub falling_obstacles: Vec<CellCoord>,
    /// Snails.
    pub snails: Vec<CellCoord>,
    /// Friends, registered in this order and all initially missing.
    pub friends: Vec<FriendPlacement>,
}

impl Layout {
    /// Creates an empty layout with home at the provided cell.
    #[must_use]
    pub fn new(columns: u32, rows: u32, home: CellCoord) -> Self {
        Self {
            columns,
            rows,
            home,
            obstacles: Vec::new(),
            falling_obstacles: Vec::new(),
            snails: Vec::new(),
            friends: Vec::new(),
        }
    }

    /// Adds a static rock.
    #[must_use]
    pub fn with_obstacle(mut self, cell: CellCoord) -> Self {
        self.obstacles.push(cell);
        self
    }

    /// Adds a falling rock.
    #[must_use]
    pub fn with_falling_obstacle(mut self, cell: CellCoord) -> Self {
        self.falling_obstacles.push(cell);
        self
    }

    /// Adds a snail.
    #[must_use]
    pub fn with_snail(mut self, cell: CellCoord) -> Self {
        self.snails.push(cell);
        self
    }

    /// Adds a calm friend.
    #[must_use]
    pub fn with_friend(mut self, cell: CellCoord, color: SwimmerColor) -> Self {
        self.friends.push(FriendPlacement {
            cell,
            color,
            fast_scared: false,
        });
        self
    }

    /// Adds a fast-scared friend.
    #[must_use]
    pub fn with_fast_scared_friend(mut self, cell: CellCoord, color: SwimmerColor) -> Self {
        self.friends.push(FriendPlacement {
            cell,
            color,
            fast_scared: true,
        });
        self
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        std::iter::once(self.home)
            .chain(self.obstacles.iter().copied())
            .chain(self.falling_obstacles.iter().copied())
            .chain(self.snails.iter().copied())
            .chain(self.friends.iter().map(|friend| friend.cell))
    }
}
