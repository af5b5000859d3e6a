#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that runs the Fish Rescue rules on top of the world.
//!
//! A [`Session`] owns the world registry, the player, and three disjoint
//! lists tracking every friend: `missing`, `found` and `arrived`. Adapters
//! drive it exclusively through [`apply`] and read it through [`query`].

mod config;
mod layout;

pub use config::{ClickPolicy, Config, Rules, WanderRule};
pub use layout::{FriendPlacement, Layout};

use std::collections::VecDeque;

use fish_rescue_core::{
    CellCoord, Command, Direction, EntityId, EntityKind, Event, SessionError, Swimmer,
    SwimmerColor, WELCOME_BANNER,
};
use fish_rescue_world::{RandomSource, SeededRandom, World};
use tracing::{debug, info, trace};

/// Authoritative state of one rescue attempt.
#[derive(Debug)]
pub struct Session<R = SeededRandom> {
    world: World,
    random: R,
    rules: Rules,
    player: EntityId,
    home: EntityId,
    missing: Vec<EntityId>,
    found: Vec<EntityId>,
    arrived: Vec<EntityId>,
    trail: VecDeque<CellCoord>,
    trail_capacity: usize,
    arrival_target: usize,
    tick: u64,
    wander_timer: u32,
    score: u32,
    won: bool,
}

impl<R: RandomSource> Session<R> {
    /// Generates a session with randomly scattered rocks, snails and friends.
    ///
    /// Home lands on a random free cell and the player starts on it. One
    /// friend is created for every non-player palette colour.
    pub fn new(config: &Config, mut random: R) -> Result<Self, SessionError> {
        let mut world = World::new(config.columns, config.rows);

        let home_cell = world.random_free_cell(&mut random)?;
        let home = world.place(EntityKind::Home, home_cell);
        for _ in 0..config.obstacles {
            let _ = world.place_random_free(EntityKind::Obstacle, &mut random)?;
        }
        for _ in 0..config.falling_obstacles {
            let _ = world.place_random_free(EntityKind::FallingObstacle, &mut random)?;
        }
        for _ in 0..config.snails {
            let _ = world.place_random_free(EntityKind::Snail, &mut random)?;
        }

        let player = world.place(EntityKind::Swimmer(Swimmer::player()), home_cell);

        let mut missing = Vec::new();
        for color in SwimmerColor::friends() {
            let fast_scared = random.chance(config.fast_scared_spawn_chance);
            let friend = Swimmer::friend(color, fast_scared);
            missing.push(world.place_random_free(EntityKind::Swimmer(friend), &mut random)?);
        }

        Ok(Self::assemble(
            world,
            random,
            config.rules,
            home,
            player,
            missing,
        ))
    }

    /// Builds a session from hand-placed contents.
    ///
    /// Every cell in the layout must lie inside its grid, and every friend must
    /// wear a distinct non-player colour.
    pub fn from_layout(layout: &Layout, rules: Rules, random: R) -> Result<Self, SessionError> {
        let mut world = World::new(layout.columns, layout.rows);
        if let Some(cell) = layout.cells().find(|cell| !world.contains_cell(*cell)) {
            return Err(SessionError::InvalidLayout(format!(
                "cell ({}, {}) lies outside the {}x{} grid",
                cell.column(),
                cell.row(),
                layout.columns,
                layout.rows
            )));
        }
        let mut colors = Vec::with_capacity(layout.friends.len());
        for friend in &layout.friends {
            if friend.color == SwimmerColor::PLAYER {
                return Err(SessionError::InvalidLayout(
                    "friends cannot wear the player colour".to_owned(),
                ));
            }
            if colors.contains(&friend.color) {
                return Err(SessionError::InvalidLayout(format!(
                    "colour {} is worn by more than one friend",
                    friend.color.name()
                )));
            }
            colors.push(friend.color);
        }

        let home = world.place(EntityKind::Home, layout.home);
        for cell in &layout.obstacles {
            let _ = world.place(EntityKind::Obstacle, *cell);
        }
        for cell in &layout.falling_obstacles {
            let _ = world.place(EntityKind::FallingObstacle, *cell);
        }
        for cell in &layout.snails {
            let _ = world.place(EntityKind::Snail, *cell);
        }
        let player = world.place(EntityKind::Swimmer(Swimmer::player()), layout.home);
        let missing = layout
            .friends
            .iter()
            .map(|friend| {
                let swimmer = Swimmer::friend(friend.color, friend.fast_scared);
                world.place(EntityKind::Swimmer(swimmer), friend.cell)
            })
            .collect();

        Ok(Self::assemble(world, random, rules, home, player, missing))
    }

    fn assemble(
        world: World,
        random: R,
        rules: Rules,
        home: EntityId,
        player: EntityId,
        missing: Vec<EntityId>,
    ) -> Self {
        let (columns, rows) = world.dimensions();
        // Friends plus the player itself.
        let arrival_target = missing.len() + 1;
        let mut trail = VecDeque::with_capacity(arrival_target);
        if let Some(cell) = world.position(player) {
            trail.push_front(cell);
        }
        info!(columns, rows, friends = missing.len(), "session created");

        Self {
            world,
            random,
            rules,
            player,
            home,
            missing,
            found: Vec::new(),
            arrived: Vec::new(),
            trail,
            trail_capacity: arrival_target,
            arrival_target,
            tick: 0,
            wander_timer: 0,
            score: 0,
            won: false,
        }
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        self.tick = self.tick.saturating_add(1);
        self.wander_timer = self.wander_timer.saturating_add(1);
        trace!(tick = self.tick, "tick");
        out_events.push(Event::TimeAdvanced { tick: self.tick });

        let overlap = self.world.find_overlapping(self.player);
        self.discover(&overlap, out_events);
        self.bring_followers_home(out_events);
        self.bring_player_home(&overlap, out_events);

        if self.wander_timer > self.rules.wander.interval {
            self.wander_back(out_events);
            self.wander_timer = 0;
        }

        self.animate_missing();
        self.follow_player();
        self.world.step_all(out_events);

        if !self.won && self.arrived.len() >= self.arrival_target {
            self.won = true;
            info!(tick = self.tick, score = self.score, "every swimmer is home");
            out_events.push(Event::GameWon { score: self.score });
        }
    }

    fn discover(&mut self, overlap: &[EntityId], out_events: &mut Vec<Event>) {
        for id in overlap {
            let Some(index) = self.missing.iter().position(|missing| missing == id) else {
                continue;
            };
            let swimmer = self.missing.remove(index);
            self.found.push(swimmer);

            let points = self
                .world
                .kind(swimmer)
                .and_then(|kind| kind.swimmer())
                .map_or(0, |swimmer| swimmer.points());
            self.score = self.score.saturating_add(points);
            debug!(swimmer = swimmer.get(), points, score = self.score, "swimmer found");
            out_events.push(Event::SwimmerFound { swimmer, points });
        }
    }

    fn bring_followers_home(&mut self, out_events: &mut Vec<Event>) {
        let followers = self.found.clone();
        for swimmer in followers {
            if !self.world.find_overlapping(swimmer).contains(&self.home) {
                continue;
            }
            self.found.retain(|id| *id != swimmer);
            let _ = self.world.remove(swimmer);
            self.arrived.push(swimmer);
            debug!(swimmer = swimmer.get(), "swimmer arrived home");
            out_events.push(Event::SwimmerArrived { swimmer });
        }
    }

    fn bring_player_home(&mut self, overlap: &[EntityId], out_events: &mut Vec<Event>) {
        if !self.missing.is_empty() || !self.found.is_empty() {
            return;
        }
        if !overlap.contains(&self.home) {
            return;
        }
        let _ = self.world.remove(self.player);
        self.arrived.push(self.player);
        debug!(player = self.player.get(), "player arrived home");
        out_events.push(Event::PlayerArrived {
            player: self.player,
        });
    }

    /// Every follower past the exempt leaders rolls once against the snapshot
    /// taken when the check starts.
    fn wander_back(&mut self, out_events: &mut Vec<Event>) {
        let rule = self.rules.wander;
        let followers = self.found.clone();
        for swimmer in followers.into_iter().skip(rule.exempt_leaders) {
            if self.random.roll(rule.roll_sides) <= rule.roll_threshold {
                continue;
            }
            self.found.retain(|id| *id != swimmer);
            self.missing.push(swimmer);
            debug!(swimmer = swimmer.get(), "swimmer wandered off");
            out_events.push(Event::SwimmerWandered { swimmer });
        }
    }

    fn animate_missing(&mut self) {
        for swimmer in self.missing.clone() {
            let fast_scared = self
                .world
                .kind(swimmer)
                .and_then(|kind| kind.swimmer())
                .is_some_and(|swimmer| swimmer.fast_scared);
            let chance = if fast_scared {
                self.rules.fast_scared_move_chance
            } else {
                self.rules.missing_move_chance
            };
            if self.random.chance(chance) {
                let _ = self.world.move_randomly(swimmer, &mut self.random);
            }
        }
    }

    /// Follower `i` takes the player's trail entry `i + 1`; entry zero is the
    /// player's current cell.
    fn follow_player(&mut self) {
        for (index, swimmer) in self.found.iter().enumerate() {
            if let Some(cell) = self.trail.get(index + 1) {
                let _ = self.world.set_position(*swimmer, *cell);
            }
        }
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let Some(from) = self.world.position(self.player) else {
            return;
        };
        if !self.world.move_in(self.player, direction) {
            return;
        }
        let Some(to) = self.world.position(self.player) else {
            return;
        };
        self.trail.push_front(to);
        self.trail.truncate(self.trail_capacity);
        out_events.push(Event::PlayerMoved { from, to });
    }

    /// Destroys what is stacked on `cell`, limited by the click policy.
    ///
    /// Swimmers destroyed this way leave whichever list tracked them in the
    /// same call.
    fn click(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        for clicked in self.world.find(cell) {
            let Some(spot) = self.world.position(clicked) else {
                continue;
            };
            for stacked in self.world.find(spot) {
                self.destroy(stacked, out_events);
            }
        }
    }

    fn destroy(&mut self, entity: EntityId, out_events: &mut Vec<Event>) {
        let Some(kind) = self.world.kind(entity) else {
            return;
        };
        if !self.rules.click_policy.allows(kind) {
            return;
        }
        let _ = self.world.remove(entity);
        debug!(entity = entity.get(), ?kind, "entity destroyed by click");
        out_events.push(Event::EntityRemoved { entity, kind });

        let tracked = self.missing.len() + self.found.len();
        self.missing.retain(|id| *id != entity);
        self.found.retain(|id| *id != entity);
        if self.missing.len() + self.found.len() < tracked {
            out_events.push(Event::SwimmerLost { swimmer: entity });
        }
    }
}

/// Applies the provided command to the session, reporting every transition.
pub fn apply<R: RandomSource>(
    session: &mut Session<R>,
    command: Command,
    out_events: &mut Vec<Event>,
) {
    match command {
        Command::Step => session.step(out_events),
        Command::MovePlayer { direction } => session.move_player(direction, out_events),
        Command::Click { cell } => session.click(cell, out_events),
    }
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use super::Session;
    use fish_rescue_core::{CellCoord, EntityId, EntityView};
    use fish_rescue_world::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner<R>(_session: &Session<R>) -> &'static str {
        super::WELCOME_BANNER
    }

    /// Number of friends still missing.
    #[must_use]
    pub fn missing_count<R>(session: &Session<R>) -> usize {
        session.missing.len()
    }

    /// Number of friends currently following the player.
    #[must_use]
    pub fn found_count<R>(session: &Session<R>) -> usize {
        session.found.len()
    }

    /// Number of swimmers, player included, that reached home.
    #[must_use]
    pub fn arrived_count<R>(session: &Session<R>) -> usize {
        session.arrived.len()
    }

    /// Number of arrivals that ends the session.
    #[must_use]
    pub fn arrival_target<R>(session: &Session<R>) -> usize {
        session.arrival_target
    }

    /// Reports whether the arrival target was reached.
    #[must_use]
    pub fn is_over<R>(session: &Session<R>) -> bool {
        session.arrived.len() >= session.arrival_target
    }

    /// Cumulative score.
    #[must_use]
    pub fn score<R>(session: &Session<R>) -> u32 {
        session.score
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick<R>(session: &Session<R>) -> u64 {
        session.tick
    }

    /// Identifier of the player swimmer.
    #[must_use]
    pub fn player<R>(session: &Session<R>) -> EntityId {
        session.player
    }

    /// Identifier of the home marker.
    #[must_use]
    pub fn home<R>(session: &Session<R>) -> EntityId {
        session.home
    }

    /// Cell occupied by the player, unless it already arrived or was destroyed.
    #[must_use]
    pub fn player_cell<R>(session: &Session<R>) -> Option<CellCoord> {
        session.world.position(session.player)
    }

    /// Missing friends; wanderers are appended at the end.
    #[must_use]
    pub fn missing<R>(session: &Session<R>) -> &[EntityId] {
        &session.missing
    }

    /// Following friends, leader first.
    #[must_use]
    pub fn found<R>(session: &Session<R>) -> &[EntityId] {
        &session.found
    }

    /// Swimmers that reached home, in arrival order.
    #[must_use]
    pub fn arrived<R>(session: &Session<R>) -> &[EntityId] {
        &session.arrived
    }

    /// Read-only access to the underlying world registry.
    #[must_use]
    pub fn world<R>(session: &Session<R>) -> &World {
        &session.world
    }

    /// Captures every live entity in registry order for presentation.
    #[must_use]
    pub fn entity_view<R>(session: &Session<R>) -> EntityView {
        fish_rescue_world::query::entity_view(&session.world)
    }

    /// Number of columns and rows in the grid.
    #[must_use]
    pub fn dimensions<R>(session: &Session<R>) -> (u32, u32) {
        session.world.dimensions()
    }
}
