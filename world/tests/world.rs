use fish_rescue_core::{CellCoord, Direction, EntityKind, Event, PlacementError, Swimmer};
use fish_rescue_world::{query, RandomSource, ScriptedRandom, SeededRandom, World};

fn player() -> EntityKind {
    EntityKind::Swimmer(Swimmer::player())
}

#[test]
fn find_returns_cell_occupants_in_insertion_order() {
    let mut world = World::new(4, 4);
    let cell = CellCoord::new(1, 2);
    let home = world.place(EntityKind::Home, cell);
    let _elsewhere = world.place(EntityKind::Obstacle, CellCoord::new(3, 3));
    let swimmer = world.place(player(), cell);

    assert_eq!(world.find(cell), vec![home, swimmer]);
    assert!(world.find(CellCoord::new(0, 0)).is_empty());
    assert!(world.find(CellCoord::new(9, 9)).is_empty());
}

#[test]
fn overlapping_excludes_the_queried_entity() {
    let mut world = World::new(4, 4);
    let cell = CellCoord::new(2, 2);
    let first = world.place(player(), cell);
    let second = world.place(EntityKind::Home, cell);

    assert_eq!(world.find_overlapping(first), vec![second]);
    assert_eq!(world.find_overlapping(second), vec![first]);
}

#[test]
fn blocking_entities_refuse_entry_but_swimmers_and_home_do_not() {
    let mut world = World::new(4, 4);
    let mover = world.place(player(), CellCoord::new(0, 0));
    let _rock = world.place(EntityKind::Obstacle, CellCoord::new(1, 0));
    let _snail = world.place(EntityKind::Snail, CellCoord::new(0, 1));
    let _home = world.place(EntityKind::Home, CellCoord::new(2, 2));
    let _friend = world.place(player(), CellCoord::new(3, 3));

    assert!(!world.can_enter(mover, CellCoord::new(1, 0)));
    assert!(!world.can_enter(mover, CellCoord::new(0, 1)));
    assert!(world.can_enter(mover, CellCoord::new(2, 2)));
    assert!(world.can_enter(mover, CellCoord::new(3, 3)));
    assert!(!world.can_enter(mover, CellCoord::new(4, 0)));
}

#[test]
fn blocked_moves_are_dropped() {
    let mut world = World::new(3, 3);
    let mover = world.place(player(), CellCoord::new(0, 0));
    let _rock = world.place(EntityKind::Obstacle, CellCoord::new(1, 0));

    assert!(!world.move_in(mover, Direction::East));
    assert_eq!(world.position(mover), Some(CellCoord::new(0, 0)));
    assert!(world.move_in(mover, Direction::South));
    assert_eq!(world.position(mover), Some(CellCoord::new(0, 1)));
}

#[test]
fn moves_against_every_edge_leave_position_unchanged() {
    let mut world = World::new(3, 3);
    let top_left = world.place(player(), CellCoord::new(0, 0));
    let bottom_right = world.place(player(), CellCoord::new(2, 2));

    assert!(!world.move_in(top_left, Direction::North));
    assert!(!world.move_in(top_left, Direction::West));
    assert!(!world.move_in(bottom_right, Direction::South));
    assert!(!world.move_in(bottom_right, Direction::East));

    assert_eq!(world.position(top_left), Some(CellCoord::new(0, 0)));
    assert_eq!(world.position(bottom_right), Some(CellCoord::new(2, 2)));
}

#[test]
fn move_randomly_uses_one_roll_to_pick_a_direction() {
    let mut world = World::new(3, 3);
    let mover = world.place(player(), CellCoord::new(1, 1));
    // North, East, South, West.
    let mut random = ScriptedRandom::new().with_rolls([0, 1, 2, 3]);

    assert!(world.move_randomly(mover, &mut random));
    assert_eq!(world.position(mover), Some(CellCoord::new(1, 0)));
    assert!(world.move_randomly(mover, &mut random));
    assert_eq!(world.position(mover), Some(CellCoord::new(2, 0)));
    assert!(world.move_randomly(mover, &mut random));
    assert_eq!(world.position(mover), Some(CellCoord::new(2, 1)));
    assert!(world.move_randomly(mover, &mut random));
    assert_eq!(world.position(mover), Some(CellCoord::new(1, 1)));
    assert_eq!(random.pending_rolls(), 0);
}

#[test]
fn removing_twice_is_a_no_op() {
    let mut world = World::new(2, 2);
    let rock = world.place(EntityKind::Obstacle, CellCoord::new(1, 1));

    assert_eq!(world.remove(rock), Some(EntityKind::Obstacle));
    assert_eq!(world.remove(rock), None);
    assert!(!world.contains(rock));
    assert!(world.find(CellCoord::new(1, 1)).is_empty());
    assert!(world.is_empty());
}

#[test]
fn falling_obstacle_settles_on_the_bottom_row() {
    let mut world = World::new(3, 5);
    let rock = world.place(EntityKind::FallingObstacle, CellCoord::new(1, 0));

    for row in 1..=4 {
        let mut events = Vec::new();
        world.step_all(&mut events);
        assert_eq!(world.position(rock), Some(CellCoord::new(1, row)));
        assert_eq!(
            events,
            vec![Event::EntityMoved {
                entity: rock,
                from: CellCoord::new(1, row - 1),
                to: CellCoord::new(1, row),
            }]
        );
    }

    let mut events = Vec::new();
    world.step_all(&mut events);
    assert_eq!(world.position(rock), Some(CellCoord::new(1, 4)));
    assert!(events.is_empty(), "a settled rock reports no movement");
}

#[test]
fn falling_obstacles_stack_on_blockers() {
    let mut world = World::new(1, 3);
    let _floor = world.place(EntityKind::Obstacle, CellCoord::new(0, 2));
    let rock = world.place(EntityKind::FallingObstacle, CellCoord::new(0, 0));

    let mut events = Vec::new();
    world.step_all(&mut events);
    world.step_all(&mut events);

    assert_eq!(world.position(rock), Some(CellCoord::new(0, 1)));
    assert_eq!(events.len(), 1);
}

#[test]
fn falling_obstacles_sink_through_swimmers() {
    let mut world = World::new(1, 3);
    let swimmer = world.place(player(), CellCoord::new(0, 1));
    let rock = world.place(EntityKind::FallingObstacle, CellCoord::new(0, 0));

    let mut events = Vec::new();
    world.step_all(&mut events);

    assert_eq!(world.position(rock), Some(CellCoord::new(0, 1)));
    assert_eq!(world.find_overlapping(swimmer), vec![rock]);
}

#[test]
fn random_placement_fills_every_cell_then_reports_saturation() {
    let mut world = World::new(3, 2);
    let mut random = SeededRandom::from_seed(0x5eed);

    for _ in 0..6 {
        let _ = world
            .place_random_free(EntityKind::Obstacle, &mut random)
            .expect("free cell available");
    }

    for row in 0..2 {
        for column in 0..3 {
            assert_eq!(world.find(CellCoord::new(column, row)).len(), 1);
        }
    }

    assert_eq!(
        world.place_random_free(EntityKind::Obstacle, &mut random),
        Err(PlacementError::Saturated {
            columns: 3,
            rows: 2
        })
    );
}

#[test]
fn random_placement_falls_back_to_scanning() {
    let mut world = World::new(2, 2);
    let _taken = world.place(EntityKind::Home, CellCoord::new(0, 0));
    // An exhausted scripted source keeps proposing (0, 0).
    let mut random = ScriptedRandom::new();

    let placed = world
        .place_random_free(EntityKind::Snail, &mut random)
        .expect("fallback scan finds a cell");

    assert_eq!(world.position(placed), Some(CellCoord::new(1, 0)));
}

#[test]
fn entity_view_reports_registry_order() {
    let mut world = World::new(4, 4);
    let home = world.place(EntityKind::Home, CellCoord::new(0, 0));
    let rock = world.place(EntityKind::Obstacle, CellCoord::new(1, 1));

    let view = query::entity_view(&world);
    let ids: Vec<_> = view.iter().map(|snapshot| snapshot.id).collect();
    assert_eq!(ids, vec![home, rock]);
    assert_eq!(view.at(CellCoord::new(1, 1)).count(), 1);
}

#[test]
fn random_sources_work_through_trait_objects() {
    let mut world = World::new(3, 3);
    let mut seeded = SeededRandom::from_seed(1);
    let random: &mut dyn RandomSource = &mut seeded;

    let placed = world
        .place_random_free(EntityKind::Obstacle, random)
        .expect("free cell");

    assert!(world.contains(placed));
}
