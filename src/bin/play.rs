//! Match runner binary.
//!
//! Plays rounds of Kuhn poker between two configurable players, alternating
//! seats each round, and prints payoff statistics at the end.
//!
//! Usage:
//!   cargo run --release --bin play -- <ROUNDS> [OPTIONS]
//!
//! Options:
//!   --seat0 <TYPE>       Player for slot 0: cfr, random, naive, human (default: cfr)
//!   --seat1 <TYPE>       Player for slot 1 (default: random)
//!   --tables <FILE>      Table file for cfr players (default: train fresh)
//!   --epochs <N>         Fresh-training epochs when no table file (default: 10000)
//!   --seed <N>           Random seed (optional)

use std::env;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use as_mccfr::games::kuhn::KuhnEngine;
use as_mccfr::mccfr::TrainParams;
use as_mccfr::players::{
    play_match, CfrPlayer, HumanPlayer, NaivePlayer, Player, RandomPlayer,
};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut rounds: Option<u64> = None;
    let mut seat_types = ["cfr".to_string(), "random".to_string()];
    let mut tables_file: Option<String> = None;
    let mut fresh_epochs: u64 = 10_000;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seat0" => {
                i += 1;
                seat_types[0] = arg_or_die(&args, i, "--seat0");
            }
            "--seat1" => {
                i += 1;
                seat_types[1] = arg_or_die(&args, i, "--seat1");
            }
            "--tables" => {
                i += 1;
                tables_file = Some(arg_or_die(&args, i, "--tables"));
            }
            "--epochs" => {
                i += 1;
                fresh_epochs = parse_or_die(&args, i, "--epochs");
            }
            "--seed" | "-s" => {
                i += 1;
                seed = Some(parse_or_die(&args, i, "--seed"));
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            other => {
                if rounds.is_none() && !other.starts_with('-') {
                    match other.parse() {
                        Ok(n) => rounds = Some(n),
                        Err(_) => die(&format!("invalid round count: {}", other)),
                    }
                } else {
                    die(&format!("unknown argument: {}", other));
                }
            }
        }
        i += 1;
    }

    let rounds = match rounds {
        Some(n) => n,
        None => {
            eprintln!("Rounds to play must be specified as the first argument.");
            print_help();
            process::exit(1);
        }
    };

    let engine = KuhnEngine::new();
    let mut players = [
        build_player(&seat_types[0], &engine, &tables_file, fresh_epochs, seed),
        build_player(&seat_types[1], &engine, &tables_file, fresh_epochs, seed),
    ];

    if seat_types.iter().any(|t| t == "human") {
        println!();
        println!("      ***************************");
        println!("         Begin Kuhn Poker Game");
        println!("      ***************************");
        println!();
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let stats = match play_match(&engine, &mut players, rounds, &mut rng) {
        Ok(stats) => stats,
        Err(e) => die(&format!("match aborted: {}", e)),
    };

    println!();
    println!("Game Statistics:");
    for (idx, player) in players.iter().enumerate() {
        println!("Player {} ({}):", idx + 1, player.name());
        println!("  Mean Payoff: {:.4}", stats.mean(idx));
        println!("  Payoff Standard Deviation: {:.4}", stats.std_dev(idx));
        println!("  Net Winnings: {:+.1}", stats.net(idx));
    }
}

fn build_player(
    kind: &str,
    engine: &KuhnEngine,
    tables_file: &Option<String>,
    fresh_epochs: u64,
    seed: Option<u64>,
) -> Box<dyn Player<KuhnEngine>> {
    match kind {
        "random" => Box::new(RandomPlayer::new()),
        "naive" => Box::new(NaivePlayer::new()),
        "human" => Box::new(HumanPlayer::new()),
        "cfr" => {
            let result = match tables_file {
                Some(path) => CfrPlayer::from_file(path),
                None => {
                    let mut params = TrainParams::default();
                    params.seed = seed;
                    println!("Training a fresh CFR player for {} epochs...", fresh_epochs);
                    CfrPlayer::trained(engine.clone(), fresh_epochs, params)
                }
            };
            match result {
                Ok(player) => Box::new(player),
                Err(e) => die(&format!("cannot build cfr player: {}", e)),
            }
        }
        other => die(&format!(
            "unknown player type: {} (expected cfr, random, naive, or human)",
            other
        )),
    }
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
    println!("Kuhn Poker Match Runner");
    println!();
    println!("Usage: play <ROUNDS> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --seat0 <TYPE>   Player for slot 0: cfr, random, naive, human (default: cfr)");
    println!("  --seat1 <TYPE>   Player for slot 1 (default: random)");
    println!("  --tables <FILE>  Table file for cfr players (default: train fresh)");
    println!("  --epochs <N>     Fresh-training epochs when no table file (default: 10000)");
    println!("  -s, --seed <N>   Random seed");
    println!("  -h, --help       Show this help");
    println!();
    println!("Slots alternate seats each round; RUST_LOG=debug shows every action.");
    println!();
    println!("Examples:");
    println!("  # Trained bot against the random baseline");
    println!("  play 10000 --tables kuhn.json");
    println!();
    println!("  # Play against the bot yourself");
    println!("  play 10 --seat0 human --seat1 cfr --tables kuhn.json");
}
