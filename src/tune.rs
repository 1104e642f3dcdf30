use bon::Builder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

use crate::aggregate::cumulative_probability_at_least;
use crate::damage::DamageEvent;
use crate::main_phase::MainPhaseStep;
use crate::trial::Simulation;
use crate::{
    Damage, DeckConfig, Error, Result, DEFAULT_GROWTH_FACTOR, DEFAULT_INITIAL_TRIALS,
    DEFAULT_MAX_TRIALS, DEFAULT_TARGET_ERROR,
};

/// Picks a trial count whose estimate of `P(total >= threshold)` has a
/// standard error within `target_error`.
///
/// Every round reruns all trials from scratch at the larger count. An
/// estimate of exactly 0 or 1 has zero standard error and stops the search
/// at once, which may only mean too few trials were run.
#[derive(Clone, Builder)]
pub struct AutoTune {
    damage: Vec<DamageEvent>,
    deck: DeckConfig,
    threshold: Damage,
    #[builder(default = DEFAULT_TARGET_ERROR)]
    target_error: f64,
    #[builder(default = DEFAULT_INITIAL_TRIALS)]
    initial_trials: usize,
    #[builder(default = DEFAULT_MAX_TRIALS)]
    max_trials: usize,
    #[builder(default = DEFAULT_GROWTH_FACTOR)]
    growth_factor: f64,
    #[builder(default)]
    steps: Vec<Box<dyn MainPhaseStep>>,
    seed: Option<u64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tuning {
    pub trials: usize,
    pub estimate: f64,
    pub error: f64,
    /// Estimate of every round, last one included.
    pub history: Vec<f64>,
}

impl AutoTune {
    pub fn run(&self) -> Result<Tuning> {
        self.check_arguments()?;

        let mut seeds = self.seed.map(ChaCha8Rng::seed_from_u64);
        let mut history = Vec::new();
        let mut trials = self.initial_trials;

        loop {
            let samples = Simulation::builder()
                .damage(self.damage.clone())
                .deck(self.deck)
                .steps(self.steps.clone())
                .trials(trials)
                .maybe_seed(seeds.as_mut().map(|rng| rng.gen()))
                .build()
                .run()?;
            let curve = cumulative_probability_at_least(&samples, [self.threshold])?;
            let estimate = curve.probabilities()[0];
            let error = standard_error(estimate, trials);
            history.push(estimate);
            debug!(trials, estimate, error, "tuning round");

            if error <= self.target_error {
                if estimate == 0.0 || estimate == 1.0 {
                    warn!(
                        trials,
                        estimate, "estimate has no observed variance; trial count may be too low"
                    );
                }
                return Ok(Tuning {
                    trials,
                    estimate,
                    error,
                    history,
                });
            }
            if trials >= self.max_trials {
                return Err(Error::Convergence {
                    trials,
                    error,
                    target: self.target_error,
                });
            }
            trials = next_trial_count(trials, self.growth_factor, self.max_trials);
        }
    }

    fn check_arguments(&self) -> Result<()> {
        if self.initial_trials == 0 {
            return Err(invalid("initial_trials must be positive"));
        }
        if self.initial_trials > self.max_trials {
            return Err(invalid("initial_trials cannot exceed max_trials"));
        }
        if !self.growth_factor.is_finite() || self.growth_factor <= 1.0 {
            return Err(invalid("growth_factor must be greater than 1"));
        }
        if !self.target_error.is_finite() || self.target_error <= 0.0 {
            return Err(invalid("target_error must be positive"));
        }
        Ok(())
    }
}

fn invalid(message: &str) -> Error {
    Error::InvalidArgument(message.to_owned())
}

/// Standard error of a Bernoulli proportion estimated from `n` trials.
fn standard_error(p: f64, n: usize) -> f64 {
    (p * (1.0 - p) / n as f64).sqrt()
}

fn next_trial_count(trials: usize, growth_factor: f64, max_trials: usize) -> usize {
    let grown = (trials as f64 * growth_factor).ceil() as usize;
    grown.max(trials + 1).min(max_trials)
}

/// Unseeded [`AutoTune`] over plain battle damage.
pub fn auto_tune_trials<I>(
    damage: I,
    deck: &DeckConfig,
    target_threshold: Damage,
    target_error: f64,
    initial_trials: usize,
    max_trials: usize,
    growth_factor: f64,
) -> Result<Tuning>
where
    I: IntoIterator,
    I::Item: Into<DamageEvent>,
{
    AutoTune::builder()
        .damage(damage.into_iter().map(Into::into).collect())
        .deck(*deck)
        .threshold(target_threshold)
        .target_error(target_error)
        .initial_trials(initial_trials)
        .max_trials(max_trials)
        .growth_factor(growth_factor)
        .build()
        .run()
}
