mod aggregate;
mod config;
mod damage;
mod deck;
pub mod main_phase;
pub mod print;
mod stock;
mod trial;
mod tune;

pub use aggregate::{cumulative_distribution, cumulative_probability_at_least, ProbabilityCurve};
pub use config::DeckConfig;
pub use damage::{resolve, resolve_damage, reveal, DamageEvent, DamageKind, Resolution, Reveal};
pub use deck::{AttackingDeck, Card, DeckState};
pub use main_phase::MainPhaseStep;
pub use stock::{apply_magic_stone_effect, MagicStoneResult};
pub use trial::{run_scenarios, simulate_trials, Simulation};
pub use tune::{auto_tune_trials, AutoTune, Tuning};
use thiserror::Error;

pub type Damage = u32;
pub type Samples = Vec<Damage>;
pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    #[error("invalid deck configuration: {0}")]
    Configuration(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("standard error {error:.5} still above {target:.5} after {trials} trials")]
    Convergence { trials: usize, error: f64, target: f64 },
}

/// Adds two damage counts, failing instead of wrapping past `Damage::MAX`.
pub(crate) fn add_damage(lhs: Damage, rhs: Damage) -> Result<Damage> {
    lhs.checked_add(rhs)
        .ok_or_else(|| Error::InvalidArgument("total damage overflows".to_owned()))
}

const DEFAULT_TARGET_ERROR: f64 = 0.01;
const DEFAULT_INITIAL_TRIALS: usize = 500;
const DEFAULT_MAX_TRIALS: usize = 50_000;
const DEFAULT_GROWTH_FACTOR: f64 = 2.0;
