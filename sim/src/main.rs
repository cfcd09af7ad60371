//! Headless AI-vs-AI match runner
//!
//! Plays batches of matches with the built-in policy on both sides, in
//! parallel, and prints a summary. With `--verify-replay` every match is
//! replayed from its SCALE-encoded intent history and compared with the live
//! result.

use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;

use touchline_core::{choose_intent, Catalog, MatchConfig, MatchEngine, MatchState, Side};

/// Safety net against a policy that never ends its turn
const MAX_INTENTS: usize = 20_000;

#[derive(Parser, Debug)]
#[command(name = "touchline-sim", about = "Run AI-vs-AI Touchline matches")]
struct Args {
    /// Number of matches to play
    #[arg(short, long, default_value_t = 100)]
    matches: u64,

    /// Seed of the first match; match `i` uses `seed + i` (wrapping)
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Override the turns per half
    #[arg(long)]
    turns_per_half: Option<u32>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Replay every match from its encoded history and compare
    #[arg(long)]
    verify_replay: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchResult {
    seed: u64,
    home_goals: u8,
    away_goals: u8,
    winner: Option<Side>,
    penalties: bool,
    intents: usize,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    matches: u64,
    home_wins: u64,
    away_wins: u64,
    draws: u64,
    shootouts: u64,
    goals: u64,
    average_intents: f64,
    replays_verified: u64,
}

fn winner(state: &MatchState) -> Option<Side> {
    let (home, away) = state.score();
    if home != away {
        return Some(if home > away { Side::Home } else { Side::Away });
    }
    state.shootout.as_ref().and_then(|s| s.winner)
}

/// Seed of the `index`-th match in a batch starting at `first`.
fn match_seed(first: u64, index: u64) -> u64 {
    first.wrapping_add(index)
}

fn play_match(
    catalog: &Arc<Catalog>,
    config: &MatchConfig,
    seed: u64,
    verify_replay: bool,
) -> Result<MatchResult, String> {
    let (home, away) = touchline_core::cards::get_standard_squads();
    let initial = MatchState::new(catalog.clone(), config.clone(), home, away, seed)
        .map_err(|e| format!("match {}: {}", seed, e))?;
    let mut engine = MatchEngine::new(initial);

    while let Some(side) = engine.state().acting_side() {
        if engine.history().len() >= MAX_INTENTS {
            return Err(format!("match {}: no result after {} intents", seed, MAX_INTENTS));
        }
        let intent = choose_intent(engine.state(), side)
            .ok_or_else(|| format!("match {}: no move for {}", seed, side))?;
        engine
            .submit(intent.clone())
            .map_err(|e| format!("match {}: {:?} rejected: {}", seed, intent, e))?;
    }

    if verify_replay {
        let replayed = MatchEngine::replay(engine.initial_state(), &engine.encoded_history())
            .map_err(|e| format!("match {}: replay failed: {}", seed, e))?;
        if &replayed != engine.state() {
            return Err(format!("match {}: replay diverged", seed));
        }
    }

    let state = engine.state();
    let (home_goals, away_goals) = state.score();
    log::debug!("match {} finished {}-{}", seed, home_goals, away_goals);
    Ok(MatchResult {
        seed,
        home_goals,
        away_goals,
        winner: winner(state),
        penalties: state.shootout.is_some(),
        intents: engine.history().len(),
    })
}

fn summarize(results: &[MatchResult], verified: bool) -> Summary {
    let mut summary = Summary {
        matches: results.len() as u64,
        ..Summary::default()
    };
    for result in results {
        match result.winner {
            Some(Side::Home) => summary.home_wins += 1,
            Some(Side::Away) => summary.away_wins += 1,
            None => summary.draws += 1,
        }
        if result.penalties {
            summary.shootouts += 1;
        }
        summary.goals += result.home_goals as u64 + result.away_goals as u64;
    }
    if !results.is_empty() {
        let intents: usize = results.iter().map(|r| r.intents).sum();
        summary.average_intents = intents as f64 / results.len() as f64;
    }
    if verified {
        summary.replays_verified = summary.matches;
    }
    summary
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let mut config = MatchConfig::default();
    if let Some(turns) = args.turns_per_half {
        config.turns_per_half = turns;
    }
    let catalog = Arc::new(Catalog::standard());
    log::info!(
        "running {} matches from seed {} ({} turns per half)",
        args.matches,
        args.seed,
        config.turns_per_half
    );

    let results: Vec<MatchResult> = (0..args.matches)
        .into_par_iter()
        .map(|i| play_match(&catalog, &config, match_seed(args.seed, i), args.verify_replay))
        .collect::<Result<_, _>>()?;
    let summary = summarize(&results, args.verify_replay);

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else {
        println!(
            "{} matches: home {} / away {} / drawn {} ({} shootouts), {} goals, {:.1} intents per match",
            summary.matches,
            summary.home_wins,
            summary.away_wins,
            summary.draws,
            summary.shootouts,
            summary.goals,
            summary.average_intents
        );
        if args.verify_replay {
            println!("{} replays verified", summary.replays_verified);
        }
    }
    Ok(())
}
