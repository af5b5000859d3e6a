use fish_rescue_core::{CellCoord, Command, Direction, EntitySnapshot, Event};
use fish_rescue_session::{self as session, query, Config, Session};
use fish_rescue_world::SeededRandom;

const SEED: u64 = 0x0f15_4e5c_0e00_2024;

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(SEED, scripted_commands());
    let second = replay(SEED, scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(first.events.len() > scripted_commands().len());
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::TimeAdvanced { tick: 120 })));
}

#[test]
fn replay_preserves_the_swimmer_partition() {
    let outcome = replay(SEED, scripted_commands());
    let (missing, found, arrived) = outcome.partition;
    let lost = outcome
        .events
        .iter()
        .filter(|event| matches!(event, Event::SwimmerLost { .. }))
        .count();
    // Six friends; the player only counts once it reaches home.
    assert_eq!(missing + found + lost + arrived, 6 + usize::from(outcome.player_home));
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    entities: Vec<EntitySnapshot>,
    events: Vec<Event>,
    partition: (usize, usize, usize),
    player_home: bool,
    score: u32,
}

fn replay(seed: u64, commands: Vec<Command>) -> ReplayOutcome {
    let mut session = Session::new(&Config::default(), SeededRandom::from_seed(seed))
        .expect("default grid has room for every entity");
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        session::apply(&mut session, command, &mut events);
        log.extend(events);
    }

    let player = query::player(&session);
    ReplayOutcome {
        entities: query::entity_view(&session).into_vec(),
        events: log,
        partition: (
            query::missing_count(&session),
            query::found_count(&session),
            query::arrived_count(&session),
        ),
        player_home: query::arrived(&session).contains(&player),
        score: query::score(&session),
    }
}

fn scripted_commands() -> Vec<Command> {
    let sweep = [
        Direction::East,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::West,
        Direction::South,
        Direction::East,
        Direction::North,
    ];

    let mut commands = Vec::new();
    for turn in 0..120_u32 {
        let direction = sweep[turn as usize % sweep.len()];
        commands.push(Command::MovePlayer { direction });
        if turn % 40 == 39 {
            commands.push(Command::Click {
                cell: CellCoord::new(turn % 10, (turn / 10) % 10),
            });
        }
        commands.push(Command::Step);
    }
    commands
}
