use fish_rescue_core::{CellCoord, Command, Direction, SwimmerColor};
use fish_rescue_session::{self as session, Layout, Rules, Session};
use fish_rescue_system_bootstrap::{Bootstrap, Status};
use fish_rescue_world::ScriptedRandom;

fn single_friend_session() -> Session<ScriptedRandom> {
    let color = SwimmerColor::from_index(1).expect("palette entry");
    let layout =
        Layout::new(4, 1, CellCoord::new(0, 0)).with_friend(CellCoord::new(1, 0), color);
    Session::from_layout(&layout, Rules::default(), ScriptedRandom::new()).expect("valid layout")
}

#[test]
fn banner_matches_the_session_greeting() {
    let session = single_friend_session();
    assert_eq!(
        Bootstrap::default().welcome_banner(&session),
        "Welcome to Fish Rescue."
    );
}

#[test]
fn status_reports_fresh_session() {
    let session = single_friend_session();
    let status = Bootstrap::default().status(&session);
    assert_eq!(
        status,
        Status {
            tick: 0,
            score: 0,
            missing: 1,
            found: 0,
            arrived: 0,
            arrival_target: 2,
            over: false,
        }
    );
    assert_eq!(
        status.to_string(),
        "tick 0 | score 0 | missing 1 | following 0 | home 0/2"
    );
}

#[test]
fn status_announces_the_win() {
    let mut session = single_friend_session();
    let mut events = Vec::new();
    for command in [
        Command::MovePlayer {
            direction: Direction::East,
        },
        Command::Step,
        Command::MovePlayer {
            direction: Direction::West,
        },
        Command::Step,
        Command::Step,
    ] {
        session::apply(&mut session, command, &mut events);
    }

    let status = Bootstrap::default().status(&session);
    assert!(status.over);
    assert_eq!(status.score, 10);
    assert!(status.to_string().ends_with("home 2/2 | everyone is home"));
}

#[test]
fn entities_include_home_and_swimmers() {
    let session = single_friend_session();
    let view = Bootstrap::default().entities(&session);
    assert_eq!(view.len(), 3);
    assert_eq!(view.at(CellCoord::new(0, 0)).count(), 2);
}
