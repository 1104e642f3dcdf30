use std::path::PathBuf;

use clap::Parser;
use wssim::print::PrintExt;
use wssim::{cumulative_distribution, simulate_trials, AutoTune, DamageEvent, DeckConfig};

/// Monte Carlo estimate of the damage taken from a sequence of attacks
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Damage of each attack, in order (e.g. 2 3 3)
    #[arg(required = true)]
    damages: Vec<u32>,

    /// Cards in the deck, waiting room included
    #[arg(long, visible_alias = "total-cards", default_value_t = 50)]
    deck_cards: u32,

    /// Climax cards in the deck, waiting room included
    #[arg(long, visible_alias = "climax-cards", default_value_t = 8)]
    deck_climax_cards: u32,

    /// Cards already in the waiting room
    #[arg(long, default_value_t = 0)]
    waiting_room_cards: u32,

    /// Climax cards already in the waiting room
    #[arg(long, default_value_t = 0)]
    waiting_room_climax_cards: u32,

    /// Attacker's deck size, enables soul triggers
    #[arg(long)]
    attacking_deck_size: Option<u32>,

    /// Soul trigger cards in the attacker's deck
    #[arg(long, default_value_t = 0)]
    attacking_soul_triggers: u32,

    /// Number of trials, or the starting count when auto-tuning
    #[arg(short, long, default_value_t = 5000)]
    trials: usize,

    /// Grow the trial count until the estimate at --threshold is precise enough
    #[arg(long, requires = "threshold")]
    auto_tune: bool,

    /// Damage threshold the auto-tuner estimates
    #[arg(long)]
    threshold: Option<u32>,

    /// Standard error the auto-tuner aims for
    #[arg(long, default_value_t = 0.01)]
    target_error: f64,

    /// Upper bound on the auto-tuned trial count
    #[arg(long, default_value_t = 50_000)]
    max_trials: usize,

    /// Trial count multiplier between auto-tuning rounds
    #[arg(long, default_value_t = 2.0)]
    growth_factor: f64,

    /// Random seed
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Save the histogram as SVG
    #[arg(long)]
    svg: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wssim=info".into()),
        )
        .init();

    let args = Args::parse();

    let deck = DeckConfig::builder()
        .total_cards(args.deck_cards)
        .climax_cards(args.deck_climax_cards)
        .waiting_room_cards(args.waiting_room_cards)
        .waiting_room_climax_cards(args.waiting_room_climax_cards)
        .maybe_attacking_deck_size(args.attacking_deck_size)
        .attacking_soul_trigger_cards(args.attacking_soul_triggers)
        .build()?;

    let mut trials = args.trials;
    if let (true, Some(threshold)) = (args.auto_tune, args.threshold) {
        let tuning = AutoTune::builder()
            .damage(args.damages.iter().copied().map(DamageEvent::from).collect())
            .deck(deck)
            .threshold(threshold)
            .target_error(args.target_error)
            .initial_trials(args.trials)
            .max_trials(args.max_trials)
            .growth_factor(args.growth_factor)
            .seed(args.seed)
            .build()
            .run()?;
        tracing::info!(
            trials = tuning.trials,
            estimate = tuning.estimate,
            error = tuning.error,
            "auto-tuned trial count"
        );
        println!(
            "Auto-tuned trials: {} (P(damage >= {threshold}) = {:.4} ± {:.4}, estimates: {:?})",
            tuning.trials, tuning.estimate, tuning.error, tuning.history
        );
        trials = tuning.trials;
    }

    let samples = simulate_trials(args.damages.iter().copied(), &deck, trials, Some(args.seed))?;
    let curve = cumulative_distribution(&samples)?;
    curve.print_table();

    if let Some(path) = args.svg {
        let title = format!("P(total damage >= X), trials={trials}");
        match curve.save_svg(&title, &path) {
            Ok(()) => println!("Saved histogram to {}", path.display()),
            Err(e) => tracing::error!("failed to save histogram to {}: {e}", path.display()),
        }
    }

    Ok(())
}
