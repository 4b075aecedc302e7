//! Kuhn poker trainer binary.
//!
//! Usage:
//!   cargo run --release --bin train -- <EPOCHS> [OPTIONS]
//!
//! Options:
//!   --epsilon <X>        Exploration floor (default: 0.05)
//!   --tau <X>            Threshold parameter (default: 1000)
//!   --beta <X>           Bonus parameter (default: 100)
//!   --seed <N>           Random seed (optional)
//!   --output <FILE>      Table file to write (default: tables.json)
//!   --export <FILE>      Also write an indented human-readable copy
//!   --resume <FILE>      Continue training from an existing table file

use std::env;
use std::process;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use as_mccfr::games::kuhn::KuhnEngine;
use as_mccfr::mccfr::{TableFile, TrainParams, Trainer};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut epochs: Option<u64> = None;
    let mut params = TrainParams::default();
    let mut output_file = "tables.json".to_string();
    let mut export_file: Option<String> = None;
    let mut resume_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--epsilon" => {
                i += 1;
                params.epsilon = parse_or_die(&args, i, "--epsilon");
            }
            "--tau" => {
                i += 1;
                params.tau = parse_or_die(&args, i, "--tau");
            }
            "--beta" => {
                i += 1;
                params.beta = parse_or_die(&args, i, "--beta");
            }
            "--seed" | "-s" => {
                i += 1;
                params.seed = Some(parse_or_die(&args, i, "--seed"));
            }
            "--output" | "-o" => {
                i += 1;
                output_file = arg_or_die(&args, i, "--output");
            }
            "--export" => {
                i += 1;
                export_file = Some(arg_or_die(&args, i, "--export"));
            }
            "--resume" => {
                i += 1;
                resume_file = Some(arg_or_die(&args, i, "--resume"));
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            other => {
                if epochs.is_none() && !other.starts_with('-') {
                    match other.parse() {
                        Ok(n) => epochs = Some(n),
                        Err(_) => die(&format!("invalid epoch count: {}", other)),
                    }
                } else {
                    die(&format!("unknown argument: {}", other));
                }
            }
        }
        i += 1;
    }

    let epochs = match epochs {
        Some(n) => n,
        None => {
            eprintln!("Epochs to train must be specified as the first argument.");
            print_help();
            process::exit(1);
        }
    };

    if let Err(e) = params.validate() {
        die(&format!("invalid parameters: {}", e));
    }

    println!("=================================================");
    println!("  Kuhn Poker AS-MCCFR Trainer");
    println!("=================================================");
    println!();
    println!("Epochs: {}", epochs);
    println!(
        "Parameters: epsilon={} tau={} beta={}",
        params.epsilon, params.tau, params.beta
    );
    if let Some(s) = params.seed {
        println!("Seed: {}", s);
    }
    println!("Output: {}", output_file);
    println!();

    let engine = KuhnEngine::new();
    let mut trainer = match &resume_file {
        Some(path) => {
            println!("Resuming from {}", path);
            let tables = match TableFile::load_from_file(path) {
                Ok(t) => t,
                Err(e) => die(&format!("cannot resume from {}: {}", path, e)),
            };
            Trainer::with_tables(engine, params, tables.regrets, tables.avg_strategy)
        }
        None => Trainer::new(engine, params),
    };

    let bar = ProgressBar::new(epochs);
    bar.set_style(
        ProgressStyle::with_template(
            "{bar:40.cyan/blue} {pos}/{len} epochs ({per_sec}, eta {eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let start = Instant::now();
    let interval = (epochs / 200).max(1);
    let result = trainer.train_with_callback(epochs, interval, |stats| {
        bar.set_position(stats.epochs);
    });
    bar.finish_and_clear();

    let stats = match result {
        Ok(stats) => stats.clone(),
        Err(e) => die(&format!("training failed: {}", e)),
    };

    println!("Training complete!");
    println!("Total time: {:.2}s", start.elapsed().as_secs_f64());
    println!("Epochs/second: {:.0}", stats.epochs_per_second);
    println!("Information sets: {}", stats.info_sets);
    println!();

    let (regrets, avg_strategy) = trainer.into_tables();
    let tables = TableFile::new(regrets, avg_strategy);

    println!("Saving tables to {}...", output_file);
    if let Err(e) = tables.save_to_file(&output_file) {
        die(&format!("error saving tables: {}", e));
    }
    if let Some(path) = export_file {
        println!("Writing human-readable export to {}...", path);
        if let Err(e) = tables.export_pretty(&path) {
            die(&format!("error writing export: {}", e));
        }
    }

    // A few converged average strategies for a quick eyeball check.
    println!();
    println!("=== Sample Average Strategies ===");
    for (infoset, actions) in tables.avg_strategy.iter().take(6) {
        let total: f64 = actions.values().sum();
        println!("{}", infoset);
        for (action, mass) in actions {
            let prob = if total > 0.0 { mass / total } else { 0.0 };
            println!("  {}: {:.1}%", action, prob * 100.0);
        }
    }

    println!();
    println!("Done!");
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
    println!("Kuhn Poker AS-MCCFR Trainer");
    println!();
    println!("Usage: train <EPOCHS> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --epsilon <X>        Exploration floor (default: 0.05)");
    println!("  --tau <X>            Threshold parameter (default: 1000)");
    println!("  --beta <X>           Bonus parameter (default: 100)");
    println!("  -s, --seed <N>       Random seed");
    println!("  -o, --output <FILE>  Table file to write (default: tables.json)");
    println!("  --export <FILE>      Also write an indented human-readable copy");
    println!("  --resume <FILE>      Continue training from an existing table file");
    println!("  -h, --help           Show this help");
    println!();
    println!("Examples:");
    println!("  # Train one million epochs and save the tables");
    println!("  train 1000000 --seed 42 -o kuhn.json");
    println!();
    println!("  # Keep training an existing artifact");
    println!("  train 500000 --resume kuhn.json -o kuhn.json");
}
