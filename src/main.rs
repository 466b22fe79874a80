//! Merge Fruit headless driver
//!
//! Plays a run with a toy contact model standing in for the physics engine:
//! thrown fruits land immediately, and any two fruits of the same tier touch.
//! Useful for balancing the coin economy from the command line.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use merge_fruit::audio::AudioDirector;
use merge_fruit::consts::FRAME_DT;
use merge_fruit::settings::Settings;
use merge_fruit::sim::{
    ContactTarget, FruitId, GameEvent, GameState, TickInput, confirm_elimination, on_contact,
    request_elimination, tick,
};

#[derive(Debug, Parser)]
#[command(name = "merge-fruit", about = "Headless merge-fruit run")]
struct Args {
    /// Run seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Settings JSON (defaults when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Maximum throws before stopping
    #[arg(long, default_value_t = 200)]
    throws: u32,
    /// Fruits on the board that count as an overflow
    #[arg(long, default_value_t = 24)]
    overflow: usize,
    /// Board size at which the driver buys an elimination
    #[arg(long, default_value_t = 12)]
    crowded: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load_from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    log::info!("Merge Fruit (headless) starting with seed {}", args.seed);
    let mut game = GameState::new(settings, args.seed);
    let mut audio = AudioDirector::new(args.seed);

    let mut throws = 0;
    while game.is_playing() && throws < args.throws {
        // Wander a little before each throw
        let axis = ((throws as f32) * 0.7).sin();
        for _ in 0..10 {
            let input = TickInput {
                move_axis: axis,
                ..Default::default()
            };
            tick(&mut game, &input, FRAME_DT);
        }
        let input = TickInput {
            move_axis: axis,
            throw: true,
            ..Default::default()
        };
        tick(&mut game, &input, FRAME_DT);

        if let Some(id) = game.thrower.in_flight() {
            throws += 1;
            on_contact(&mut game, id, ContactTarget::Static);
        }
        settle(&mut game);

        if game.container.len() >= args.crowded {
            try_elimination(&mut game);
        }
        if game.container.len() > args.overflow {
            game.game_over();
        }

        report(&mut game, &mut audio);
    }

    // Let the end screen play out
    let mut frames = 0;
    while !game.is_playing() && frames < 600 {
        tick(&mut game, &TickInput::default(), FRAME_DT);
        frames += 1;
        let reload = game
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::ReloadRequested { .. }));
        report(&mut game, &mut audio);
        if reload {
            break;
        }
    }

    log::info!(
        "Finished after {} throws: {} coins, spin price {}, {} fruits on board, phase {:?}",
        throws,
        game.ledger.total(),
        game.price.price(),
        game.container.len(),
        game.phase
    );
    Ok(())
}

/// Deliver contacts for every same-tier pair until the board is stable
fn settle(game: &mut GameState) {
    while let Some((a, b)) = touching_pair(game) {
        // Both sides report, lesser id first
        on_contact(game, a, ContactTarget::Fruit(b));
        on_contact(game, b, ContactTarget::Fruit(a));
    }
}

fn touching_pair(game: &GameState) -> Option<(FruitId, FruitId)> {
    let fruits: Vec<_> = game.container.iter().collect();
    for (i, a) in fruits.iter().enumerate() {
        if let Some(b) = fruits[i + 1..].iter().find(|b| b.tier == a.tier) {
            return Some((a.id, b.id));
        }
    }
    None
}

/// Buy an elimination of the most common tier if affordable
fn try_elimination(game: &mut GameState) {
    let offer = request_elimination(game);
    if offer.price > game.ledger.total() {
        return;
    }
    let Some(tier) = offer
        .tiers
        .iter()
        .copied()
        .max_by_key(|t| game.container.count_of_tier(*t))
    else {
        return;
    };
    match confirm_elimination(game, tier) {
        Ok(done) => log::info!("Eliminated {} of tier {} for {}", done.destroyed, tier, done.price),
        Err(e) => log::info!("Elimination refused: {}", e),
    }
}

fn report(game: &mut GameState, audio: &mut AudioDirector) {
    for event in game.drain_events() {
        log::debug!("{:?}", event);
        if let Some(cmd) = audio.command_for(&event) {
            log::trace!("audio: {:?}", cmd);
        }
    }
}
