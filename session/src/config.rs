//! Tunable constants for session generation and the rescue rules.

use fish_rescue_core::EntityKind;

/// Decides which entities a click is allowed to destroy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClickPolicy {
    /// Destroys everything stacked on the clicked cell, swimmers and home
    /// included.
    #[default]
    ClearAll,
    /// Destroys only rocks and snails, sparing swimmers and home.
    BlockingOnly,
}

impl ClickPolicy {
    /// Reports whether a click may destroy an entity of the provided kind.
    #[must_use]
    pub const fn allows(self, kind: EntityKind) -> bool {
        match self {
            Self::ClearAll => true,
            Self::BlockingOnly => kind.blocks(),
        }
    }
}

/// Periodic check that lets trailing followers stray back into the missing set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WanderRule {
    /// The check runs once the tick timer strictly exceeds this value.
    pub interval: u32,
    /// Leading followers that never wander.
    pub exempt_leaders: usize,
    /// Sides of the die rolled for each eligible follower.
    pub roll_sides: u32,
    /// A roll strictly greater than this value makes the follower wander.
    pub roll_threshold: u32,
}

impl Default for WanderRule {
    fn default() -> Self {
        Self {
            interval: 20,
            exempt_leaders: 2,
            roll_sides: 10,
            roll_threshold: 6,
        }
    }
}

/// Rules applied while a session runs, independent of how it was populated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    /// Wander-back cadence and odds.
    pub wander: WanderRule,
    /// Per-tick probability that a calm missing swimmer moves.
    pub missing_move_chance: f64,
    /// Per-tick probability that a fast-scared missing swimmer moves.
    pub fast_scared_move_chance: f64,
    /// Which entities a click destroys.
    pub click_policy: ClickPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            wander: WanderRule::default(),
            missing_move_chance: 0.3,
            fast_scared_move_chance: 0.8,
            click_policy: ClickPolicy::ClearAll,
        }
    }
}

impl Rules {
    /// Replaces the click policy.
    #[must_use]
    pub const fn with_click_policy(mut self, click_policy: ClickPolicy) -> Self {
        self.click_policy = click_policy;
        self
    }
}

/// Configuration parameters required to generate a randomised session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Static rocks scattered at start.
    pub obstacles: usize,
    /// Falling rocks scattered at start.
    pub falling_obstacles: usize,
    /// Snails scattered at start.
    pub snails: usize,
    /// Probability that each friend is generated fast-scared.
    pub fast_scared_spawn_chance: f64,
    /// Rules applied once the session runs.
    pub rules: Rules,
}

impl Default for Config {
    fn default() -> Self {
        Self::with_dimensions(10, 10)
    }
}

impl Config {
    /// Creates the standard population for a grid of the provided size.
    #[must_use]
    pub fn with_dimensions(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            obstacles: 10,
            falling_obstacles: 5,
            snails: 1,
            fast_scared_spawn_chance: 0.25,
            rules: Rules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fish_rescue_core::Swimmer;

    #[test]
    fn blocking_only_spares_swimmers_and_home() {
        let policy = ClickPolicy::BlockingOnly;
        assert!(policy.allows(EntityKind::Obstacle));
        assert!(policy.allows(EntityKind::Snail));
        assert!(!policy.allows(EntityKind::Home));
        assert!(!policy.allows(EntityKind::Swimmer(Swimmer::player())));
        assert!(ClickPolicy::ClearAll.allows(EntityKind::Home));
    }
}
