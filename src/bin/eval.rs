//! Policy evaluation binary.
//!
//! Plays a trained policy against the uniform-random baseline over many
//! hands, split across worker threads, and reports overall and per-seat
//! payoff statistics. Training stays strictly sequential elsewhere; this
//! binary only reads the tables, so the hands can fan out freely.
//!
//! Usage:
//!   cargo run --release --bin eval -- <HANDS> [OPTIONS]
//!
//! Options:
//!   --tables <FILE>      Table file to evaluate (default: train fresh)
//!   --epochs <N>         Fresh-training epochs when no table file (default: 100000)
//!   --jobs <N>           Worker threads (default: rayon's choice)
//!   --seed <N>           Base random seed (default: 0)

use std::env;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use as_mccfr::games::kuhn::KuhnEngine;
use as_mccfr::mccfr::{Policy, TrainParams, Trainer};
use as_mccfr::players::{play_round, CfrPlayer, MatchStats, Player, RandomPlayer};

const CHUNK_HANDS: u64 = 1_000;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut hands: Option<u64> = None;
    let mut tables_file: Option<String> = None;
    let mut fresh_epochs: u64 = 100_000;
    let mut jobs: usize = 0;
    let mut seed: u64 = 0;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tables" => {
                i += 1;
                tables_file = Some(arg_or_die(&args, i, "--tables"));
            }
            "--epochs" => {
                i += 1;
                fresh_epochs = parse_or_die(&args, i, "--epochs");
            }
            "--jobs" | "-j" => {
                i += 1;
                jobs = parse_or_die(&args, i, "--jobs");
            }
            "--seed" | "-s" => {
                i += 1;
                seed = parse_or_die(&args, i, "--seed");
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            other => {
                if hands.is_none() && !other.starts_with('-') {
                    match other.parse() {
                        Ok(n) => hands = Some(n),
                        Err(_) => die(&format!("invalid hand count: {}", other)),
                    }
                } else {
                    die(&format!("unknown argument: {}", other));
                }
            }
        }
        i += 1;
    }

    let hands = match hands {
        Some(n) => n,
        None => {
            eprintln!("Hands to play must be specified as the first argument.");
            print_help();
            process::exit(1);
        }
    };

    if jobs > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    println!("=== Policy Evaluation: trained vs random ===");
    println!();

    let engine = KuhnEngine::new();
    let policy = match &tables_file {
        Some(path) => {
            println!("Loading tables from {}", path);
            match Policy::load_from_file(path) {
                Ok(p) => p,
                Err(e) => die(&format!("cannot load tables: {}", e)),
            }
        }
        None => {
            println!("No table file given; training {} epochs first", fresh_epochs);
            let params = TrainParams::default().with_seed(seed);
            let mut trainer = Trainer::new(engine.clone(), params);
            if let Err(e) = trainer.train(fresh_epochs) {
                die(&format!("training failed: {}", e));
            }
            trainer.policy()
        }
    };

    let chunks: Vec<(u64, u64)> = split_chunks(hands);
    println!("Hands: {} across {} chunks", hands, chunks.len());
    println!();

    let bar = ProgressBar::new(hands);
    bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} hands ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = Instant::now();
    let results: Vec<MatchStats> = chunks
        .par_iter()
        .map(|&(start_hand, count)| {
            let mut rng = StdRng::seed_from_u64(seed ^ (start_hand.wrapping_mul(0x9E3779B97F4A7C15)));
            let mut players: [Box<dyn Player<KuhnEngine>>; 2] = [
                Box::new(CfrPlayer::from_policy(policy.clone())),
                Box::new(RandomPlayer::new()),
            ];

            let mut stats = MatchStats::new();
            for k in 0..count {
                // Global hand parity keeps seat exposure balanced.
                let seat_of_player = if (start_hand + k) % 2 == 0 {
                    [0, 1]
                } else {
                    [1, 0]
                };
                match play_round(&engine, &mut players, seat_of_player, &mut rng) {
                    Ok(payoffs) => stats.record(payoffs, seat_of_player),
                    Err(e) => die(&format!("evaluation aborted: {}", e)),
                }
            }
            bar.inc(count);
            stats
        })
        .collect();
    bar.finish_and_clear();

    let mut stats = MatchStats::new();
    for chunk in &results {
        stats.merge(chunk);
    }

    let elapsed = start.elapsed().as_secs_f64();
    println!("Played {} hands in {:.2}s ({:.0} hands/s)", stats.rounds(), elapsed, stats.rounds() as f64 / elapsed);
    println!();
    println!("Trained policy:");
    println!("  Mean Payoff: {:+.4}", stats.mean(0));
    println!("  Payoff Standard Deviation: {:.4}", stats.std_dev(0));
    println!("  Net Winnings: {:+.1}", stats.net(0));
    println!("  Mean from seat 0: {:+.4}", stats.seat_mean(0, 0));
    println!("  Mean from seat 1: {:+.4}", stats.seat_mean(0, 1));
    println!(
        "  Seat difference: {:.4}",
        (stats.seat_mean(0, 0) - stats.seat_mean(0, 1)).abs()
    );
    println!();
    println!("Random baseline:");
    println!("  Mean Payoff: {:+.4}", stats.mean(1));
    println!("  Net Winnings: {:+.1}", stats.net(1));
}

fn split_chunks(hands: u64) -> Vec<(u64, u64)> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < hands {
        let count = CHUNK_HANDS.min(hands - start);
        chunks.push((start, count));
        start += count;
    }
    chunks
}

fn parse_or_die<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(v) => v,
        None => die(&format!("{} needs a numeric value", flag)),
    }
}

fn arg_or_die(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => die(&format!("{} needs a value", flag)),
    }
}

fn die(msg: &str) -> ! {
    eprintln!("{}", msg);
    process::exit(1);
}

fn print_help() {
    println!("Kuhn Poker Policy Evaluation");
    println!();
    println!("Usage: eval <HANDS> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --tables <FILE>  Table file to evaluate (default: train fresh)");
    println!("  --epochs <N>     Fresh-training epochs when no table file (default: 100000)");
    println!("  -j, --jobs <N>   Worker threads (default: rayon's choice)");
    println!("  -s, --seed <N>   Base random seed (default: 0)");
    println!("  -h, --help       Show this help");
    println!();
    println!("Examples:");
    println!("  # One million evaluation hands against a saved artifact");
    println!("  eval 1000000 --tables kuhn.json");
}
