#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative entity registry for Fish Rescue.
//!
//! The world owns every placed entity in insertion order, answers spatial
//! queries about cells and overlaps, and applies single-cell movement. It has
//! no notion of the rescue rules; the session layers those on top.

mod random;

pub use random::{RandomSource, ScriptedRandom, SeededRandom};

use fish_rescue_core::{
    Behavior, CellCoord, Direction, EntityId, EntityKind, Event, PlacementError,
};
use tracing::{debug, trace};

const RANDOM_ATTEMPTS_PER_CELL: u64 = 4;

#[derive(Clone, Copy, Debug)]
struct Entity {
    id: EntityId,
    cell: CellCoord,
    kind: EntityKind,
}

/// Represents the authoritative Fish Rescue world state.
#[derive(Clone, Debug)]
pub struct World {
    columns: u32,
    rows: u32,
    entities: Vec<Entity>,
    next_id: u32,
}

impl World {
    /// Creates an empty world with the provided dimensions.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            entities: Vec::new(),
            next_id: 0,
        }
    }

    /// Number of columns and rows in the grid.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains_cell(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Reports whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registers a new entity at explicit coordinates.
    ///
    /// Coordinates are not validated; an entity placed outside the grid is
    /// tracked but never returned by cell queries.
    pub fn place(&mut self, kind: EntityKind, cell: CellCoord) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.entities.push(Entity { id, cell, kind });
        id
    }

    /// Registers a new entity on a random cell that holds no other entity.
    ///
    /// This is stricter than requiring only the absence of a blocking entity:
    /// a fresh entity never lands on home or on a swimmer, so generation cannot
    /// start a friend already discovered or already home.
    pub fn place_random_free<R>(
        &mut self,
        kind: EntityKind,
        random: &mut R,
    ) -> Result<EntityId, PlacementError>
    where
        R: RandomSource + ?Sized,
    {
        let cell = self.random_free_cell(random)?;
        Ok(self.place(kind, cell))
    }

    /// Picks a random cell that holds no entity.
    ///
    /// Cells are sampled uniformly for up to four attempts per grid cell, after
    /// which a row-major scan picks the first free cell. The call only fails
    /// when the grid is empty or every cell is taken.
    pub fn random_free_cell<R>(&self, random: &mut R) -> Result<CellCoord, PlacementError>
    where
        R: RandomSource + ?Sized,
    {
        if self.columns == 0 || self.rows == 0 {
            return Err(PlacementError::EmptyGrid);
        }

        let attempts = u64::from(self.columns) * u64::from(self.rows) * RANDOM_ATTEMPTS_PER_CELL;
        for _ in 0..attempts {
            let column = random.roll(self.columns);
            let row = random.roll(self.rows);
            let cell = CellCoord::new(column, row);
            if self.is_vacant(cell) {
                return Ok(cell);
            }
        }

        debug!("random placement exhausted, scanning for a free cell");
        (0..self.rows)
            .flat_map(|row| (0..self.columns).map(move |column| CellCoord::new(column, row)))
            .find(|cell| self.is_vacant(*cell))
            .ok_or(PlacementError::Saturated {
                columns: self.columns,
                rows: self.rows,
            })
    }

    /// Reports whether the cell is inside the grid and holds no entity.
    #[must_use]
    pub fn is_vacant(&self, cell: CellCoord) -> bool {
        self.contains_cell(cell) && !self.entities.iter().any(|entity| entity.cell == cell)
    }

    /// Entities located at the provided cell, in insertion order.
    #[must_use]
    pub fn find(&self, cell: CellCoord) -> Vec<EntityId> {
        if !self.contains_cell(cell) {
            return Vec::new();
        }
        self.entities
            .iter()
            .filter(|entity| entity.cell == cell)
            .map(|entity| entity.id)
            .collect()
    }

    /// Other entities sharing the cell of `id`, in insertion order.
    #[must_use]
    pub fn find_overlapping(&self, id: EntityId) -> Vec<EntityId> {
        let Some(cell) = self.position(id) else {
            return Vec::new();
        };
        self.find(cell)
            .into_iter()
            .filter(|other| *other != id)
            .collect()
    }

    /// Reports whether `mover` may step into `cell`.
    ///
    /// Cells outside the grid and cells holding a blocking entity other than
    /// the mover itself are refused.
    #[must_use]
    pub fn can_enter(&self, mover: EntityId, cell: CellCoord) -> bool {
        self.contains_cell(cell)
            && !self
                .entities
                .iter()
                .any(|entity| entity.id != mover && entity.cell == cell && entity.kind.blocks())
    }

    /// Deregisters an entity, returning its kind. Absent ids are ignored.
    pub fn remove(&mut self, id: EntityId) -> Option<EntityKind> {
        let index = self.index_of(id)?;
        let entity = self.entities.remove(index);
        trace!(entity = id.get(), kind = ?entity.kind, "entity removed");
        Some(entity.kind)
    }

    /// Reports whether the entity is still registered.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.index_of(id).is_some()
    }

    /// Current cell of the entity, if registered.
    #[must_use]
    pub fn position(&self, id: EntityId) -> Option<CellCoord> {
        self.entity(id).map(|entity| entity.cell)
    }

    /// Kind of the entity, if registered.
    #[must_use]
    pub fn kind(&self, id: EntityId) -> Option<EntityKind> {
        self.entity(id).map(|entity| entity.kind)
    }

    /// Teleports the entity to `cell` without consulting blocking rules.
    pub fn set_position(&mut self, id: EntityId, cell: CellCoord) -> bool {
        match self.entity_mut(id) {
            Some(entity) => {
                entity.cell = cell;
                true
            }
            None => false,
        }
    }

    /// Moves the entity by the provided delta when the destination can be
    /// entered. Blocked and off-grid moves are dropped and return `false`.
    pub fn move_by(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let Some(to) = from.offset(dx, dy) else {
            return false;
        };
        if !self.can_enter(id, to) {
            return false;
        }
        self.set_position(id, to)
    }

    /// Moves the entity a single cell in the provided direction.
    pub fn move_in(&mut self, id: EntityId, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        self.move_by(id, dx, dy)
    }

    /// Moves the entity one cell toward the bottom of the grid.
    pub fn move_down(&mut self, id: EntityId) -> bool {
        self.move_by(id, 0, 1)
    }

    /// Moves the entity one cell in a uniformly chosen direction.
    pub fn move_randomly<R>(&mut self, id: EntityId, random: &mut R) -> bool
    where
        R: RandomSource + ?Sized,
    {
        let sides = Direction::ALL.len() as u32;
        let index = random.roll(sides) as usize;
        let direction = Direction::ALL[index % Direction::ALL.len()];
        self.move_in(id, direction)
    }

    /// Runs every entity's self-driven behaviour once, in registry order.
    ///
    /// The pass walks a snapshot of the registered ids, so entities removed
    /// while the pass is in flight are skipped rather than revisited.
    pub fn step_all(&mut self, out_events: &mut Vec<Event>) {
        let ids: Vec<EntityId> = self.entities.iter().map(|entity| entity.id).collect();
        for id in ids {
            let Some(entity) = self.entity(id).copied() else {
                continue;
            };
            match entity.kind.behavior() {
                Behavior::Stationary => {}
                Behavior::Falls => {
                    if self.move_down(id) {
                        if let Some(to) = self.position(id) {
                            trace!(entity = id.get(), row = to.row(), "entity fell");
                            out_events.push(Event::EntityMoved {
                                entity: id,
                                from: entity.cell,
                                to,
                            });
                        }
                    }
                }
            }
        }
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id == id)
    }

    fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use fish_rescue_core::{EntitySnapshot, EntityView};

    /// Captures every live entity in registry order for presentation.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(
            world
                .entities
                .iter()
                .map(|entity| EntitySnapshot {
                    id: entity.id,
                    cell: entity.cell,
                    kind: entity.kind,
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_never_reused() {
        let mut world = World::new(3, 3);
        assert!(world.is_empty());
        let first = world.place(EntityKind::Obstacle, CellCoord::new(0, 0));
        let _ = world.remove(first);
        assert!(world.is_empty());
        let second = world.place(EntityKind::Obstacle, CellCoord::new(0, 0));
        assert_ne!(first, second);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn out_of_grid_entities_are_invisible_to_cell_queries() {
        let mut world = World::new(2, 2);
        let stray = world.place(EntityKind::Home, CellCoord::new(5, 5));
        assert!(world.contains(stray));
        assert!(world.find(CellCoord::new(5, 5)).is_empty());
        assert!(world.find_overlapping(stray).is_empty());
    }

    #[test]
    fn random_placement_rejects_empty_grid() {
        let mut world = World::new(0, 4);
        let mut random = ScriptedRandom::new();
        assert_eq!(
            world.place_random_free(EntityKind::Snail, &mut random),
            Err(PlacementError::EmptyGrid)
        );
    }
}
