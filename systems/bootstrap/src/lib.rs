#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Fish Rescue experience.

use std::fmt;

use fish_rescue_core::EntityView;
use fish_rescue_session::{query, Session};

/// Produces data required to greet the player and report progress.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<R>(&self, session: &Session<R>) -> &'static str {
        query::welcome_banner(session)
    }

    /// Captures the entities currently in the water for presentation purposes.
    #[must_use]
    pub fn entities<R>(&self, session: &Session<R>) -> EntityView {
        query::entity_view(session)
    }

    /// Summarises the session progress for a heads-up display.
    #[must_use]
    pub fn status<R>(&self, session: &Session<R>) -> Status {
        Status {
            tick: query::tick(session),
            score: query::score(session),
            missing: query::missing_count(session),
            found: query::found_count(session),
            arrived: query::arrived_count(session),
            arrival_target: query::arrival_target(session),
            over: query::is_over(session),
        }
    }
}

/// Progress counters shown alongside the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    /// Ticks processed so far.
    pub tick: u64,
    /// Cumulative score.
    pub score: u32,
    /// Friends still missing.
    pub missing: usize,
    /// Friends following the player.
    pub found: usize,
    /// Swimmers that reached home.
    pub arrived: usize,
    /// Arrivals needed to win.
    pub arrival_target: usize,
    /// Whether every swimmer is home.
    pub over: bool,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tick {} | score {} | missing {} | following {} | home {}/{}",
            self.tick, self.score, self.missing, self.found, self.arrived, self.arrival_target
        )?;
        if self.over {
            f.write_str(" | everyone is home")?;
        }
        Ok(())
    }
}
