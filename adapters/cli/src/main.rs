#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Fish Rescue experience.

mod input;
mod render;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fish_rescue_core::{Direction, Event};
use fish_rescue_session::{self as session, query, ClickPolicy, Config, Session};
use fish_rescue_system_bootstrap::Bootstrap;
use fish_rescue_world::SeededRandom;
use input::{Action, Turn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace, warn};
use tracing_subscriber::EnvFilter;

/// Guide the lost fish back home.
#[derive(Debug, Parser)]
#[command(name = "fish-rescue", version)]
struct Args {
    /// Number of grid columns.
    #[arg(long, default_value_t = 10)]
    width: u32,
    /// Number of grid rows.
    #[arg(long, default_value_t = 10)]
    height: u32,
    /// Seed for world generation and creature movement. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Which entities a click destroys.
    #[arg(long, value_enum, default_value_t = ClickPolicyArg::ClearAll)]
    click_policy: ClickPolicyArg,
    /// Plays the given number of random turns instead of reading stdin.
    #[arg(long, value_name = "TURNS")]
    autoplay: Option<u32>,
}

/// Command-line spelling of [`ClickPolicy`].
#[derive(Clone, Copy, Debug, ValueEnum)]
enum ClickPolicyArg {
    /// Destroy everything on the clicked cell.
    ClearAll,
    /// Destroy only rocks and snails.
    BlockingOnly,
}

impl From<ClickPolicyArg> for ClickPolicy {
    fn from(value: ClickPolicyArg) -> Self {
        match value {
            ClickPolicyArg::ClearAll => Self::ClearAll,
            ClickPolicyArg::BlockingOnly => Self::BlockingOnly,
        }
    }
}

/// Entry point for the Fish Rescue command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut config = Config::with_dimensions(args.width, args.height);
    config.rules = config.rules.with_click_policy(args.click_policy.into());
    let mut session = Session::new(&config, SeededRandom::from_seed(seed))
        .with_context(|| format!("could not populate a {}x{} grid", args.width, args.height))?;
    info!(seed, policy = ?config.rules.click_policy, "session seeded");

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&session));
    println!("{}", render::legend());

    match args.autoplay {
        Some(turns) => autoplay(&mut session, &bootstrap, seed, turns),
        None => interactive(&mut session, &bootstrap)?,
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn interactive(session: &mut Session, bootstrap: &Bootstrap) -> Result<()> {
    println!("{}", input::HELP);
    present(session, bootstrap);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read a line from stdin")?;
        match input::parse(&line) {
            Ok(Action::Play(turn)) => {
                play(session, turn);
                present(session, bootstrap);
                if query::is_over(session) {
                    break;
                }
            }
            Ok(Action::Help) => println!("{}", input::HELP),
            Ok(Action::Quit) => break,
            Err(error) => warn!(%error, "ignored input"),
        }
        io::stdout().flush().context("failed to flush stdout")?;
    }
    Ok(())
}

fn autoplay(session: &mut Session, bootstrap: &Bootstrap, seed: u64, turns: u32) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));
    for _ in 0..turns {
        if query::is_over(session) {
            break;
        }
        let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        play(session, Turn::Swim(direction));
    }
    present(session, bootstrap);
}

fn play(session: &mut Session, turn: Turn) {
    let mut events = Vec::new();
    for command in turn.commands() {
        session::apply(session, command, &mut events);
    }
    for event in &events {
        announce(event);
    }
}

fn announce(event: &Event) {
    match event {
        Event::SwimmerFound { points, .. } => println!("Found a friend! +{points}"),
        Event::SwimmerArrived { .. } => println!("A friend made it home."),
        Event::SwimmerWandered { .. } => println!("A friend got distracted and swam off."),
        Event::SwimmerLost { .. } => println!("A friend was lost."),
        Event::PlayerArrived { .. } => println!("You are home."),
        Event::GameWon { score } => println!("Everyone is home! Final score: {score}"),
        other => trace!(?other, "event"),
    }
}

fn present(session: &Session, bootstrap: &Bootstrap) {
    let (columns, rows) = query::dimensions(session);
    print!(
        "{}",
        render::frame(&bootstrap.entities(session), columns, rows)
    );
    println!("{}", bootstrap.status(session));
}
