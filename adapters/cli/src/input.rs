//! Translation of typed lines into session commands.

use fish_rescue_core::{CellCoord, Command, Direction};
use thiserror::Error;

/// One line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Commands to run, in order.
    Play(Turn),
    /// Prints the key reference.
    Help,
    /// Ends the session.
    Quit,
}

/// Commands produced by a single line. Every turn ends with a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Turn {
    /// Swims one cell, then advances time.
    Swim(Direction),
    /// Destroys what sits on a cell, then advances time.
    Click(CellCoord),
    /// Only advances time.
    Wait,
}

impl Turn {
    /// Session commands for the turn.
    pub(crate) fn commands(self) -> Vec<Command> {
        match self {
            Self::Swim(direction) => vec![Command::MovePlayer { direction }, Command::Step],
            Self::Click(cell) => vec![Command::Click { cell }, Command::Step],
            Self::Wait => vec![Command::Step],
        }
    }
}

/// Reasons a typed line could not be understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum InputError {
    /// The first word is not a known key.
    #[error("unknown input `{0}`, type `h` for help")]
    Unknown(String),
    /// A click was missing one of its coordinates.
    #[error("click needs a column and a row, e.g. `c 3 4`")]
    MissingCoordinate,
    /// A click coordinate is not a non-negative integer.
    #[error("`{0}` is not a valid coordinate")]
    InvalidCoordinate(String),
}

/// Key reference printed on request.
pub(crate) const HELP: &str =
    "w/a/s/d swim  . or enter wait  c <column> <row> click  h help  q quit";

/// Parses one line of input.
pub(crate) fn parse(line: &str) -> Result<Action, InputError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(Action::Play(Turn::Wait));
    };

    let action = match first.to_ascii_lowercase().as_str() {
        "w" => Action::Play(Turn::Swim(Direction::North)),
        "a" => Action::Play(Turn::Swim(Direction::West)),
        "s" => Action::Play(Turn::Swim(Direction::South)),
        "d" => Action::Play(Turn::Swim(Direction::East)),
        "." => Action::Play(Turn::Wait),
        "c" => {
            let column = coordinate(words.next())?;
            let row = coordinate(words.next())?;
            Action::Play(Turn::Click(CellCoord::new(column, row)))
        }
        "h" | "?" => Action::Help,
        "q" => Action::Quit,
        other => return Err(InputError::Unknown(other.to_owned())),
    };
    Ok(action)
}

fn coordinate(word: Option<&str>) -> Result<u32, InputError> {
    let word = word.ok_or(InputError::MissingCoordinate)?;
    word.parse()
        .map_err(|_| InputError::InvalidCoordinate(word.to_owned()))
}
