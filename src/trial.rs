use bon::Builder;
use rand::{thread_rng, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::damage::{resolve, DamageEvent};
use crate::deck::{AttackingDeck, DeckState};
use crate::main_phase::MainPhaseStep;
use crate::{add_damage, Damage, DeckConfig, Error, Result, Samples};

/// A batch of independent trials: optional main phase steps, then the
/// battle damage sequence, each against a freshly built deck.
#[derive(Clone, Builder)]
pub struct Simulation {
    damage: Vec<DamageEvent>,
    deck: DeckConfig,
    #[builder(default)]
    steps: Vec<Box<dyn MainPhaseStep>>,
    trials: usize,
    seed: Option<u64>,
}

impl Simulation {
    pub fn run(&self) -> Result<Samples> {
        self.deck.validate()?;
        if self.trials == 0 {
            return Err(Error::InvalidArgument("trials must be positive".to_owned()));
        }
        if self.damage.iter().any(|event| event.damage == 0) {
            return Err(Error::InvalidArgument(
                "damage packets must be positive".to_owned(),
            ));
        }

        let seed = self.seed.unwrap_or_else(|| thread_rng().gen());
        debug!(trials = self.trials, seed, steps = self.steps.len(), "running trials");

        (0..self.trials)
            .map(|trial| self.run_trial(&mut trial_rng(seed, trial)))
            .collect()
    }

    fn run_trial(&self, rng: &mut ChaCha8Rng) -> Result<Damage> {
        let mut state = DeckState::new(&self.deck);
        let mut attacking = AttackingDeck::from_config(&self.deck);

        let mut total = 0;
        for step in &self.steps {
            total = add_damage(total, step.apply(&mut state, rng)?)?;
        }
        add_damage(total, resolve(&mut state, &self.damage, attacking.as_mut(), rng)?)
    }
}

/// Deterministic stream for one trial: same seed, same trial, same draws.
fn trial_rng(seed: u64, trial: usize) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(trial as u64);
    rng
}

fn events<I>(damage: I) -> Vec<DamageEvent>
where
    I: IntoIterator,
    I::Item: Into<DamageEvent>,
{
    damage.into_iter().map(Into::into).collect()
}

/// Total damage of each of `trials` independent trials.
pub fn simulate_trials<I>(
    damage: I,
    deck: &DeckConfig,
    trials: usize,
    seed: Option<u64>,
) -> Result<Samples>
where
    I: IntoIterator,
    I::Item: Into<DamageEvent>,
{
    Simulation::builder()
        .damage(events(damage))
        .deck(*deck)
        .trials(trials)
        .maybe_seed(seed)
        .build()
        .run()
}

/// Runs the same battle after each named list of main phase steps.
pub fn run_scenarios<I, D, S>(
    damage: D,
    deck: &DeckConfig,
    scenarios: I,
    trials: usize,
    seed: Option<u64>,
) -> Result<Vec<(String, Samples)>>
where
    I: IntoIterator<Item = (S, Vec<Box<dyn MainPhaseStep>>)>,
    D: IntoIterator,
    D::Item: Into<DamageEvent>,
    S: Into<String>,
{
    let damage = events(damage);
    scenarios
        .into_iter()
        .map(|(label, steps)| {
            let samples = Simulation::builder()
                .damage(damage.clone())
                .deck(*deck)
                .steps(steps)
                .trials(trials)
                .maybe_seed(seed)
                .build()
                .run()?;
            Ok((label.into(), samples))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    use crate::main_phase::SeedTopStack;
    use crate::Card;

    fn config(total: u32, climax: u32) -> DeckConfig {
        DeckConfig::builder()
            .total_cards(total)
            .climax_cards(climax)
            .build()
            .unwrap()
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let deck = config(50, 8);
        let first = simulate_trials([2u32, 3, 1], &deck, 500, Some(123)).unwrap();
        let second = simulate_trials([2u32, 3, 1], &deck, 500, Some(123)).unwrap();
        assert_eq!(first.len(), 500);
        assert_eq!(first, second);
    }

    #[test]
    fn trials_draw_from_distinct_streams() {
        let deck = config(50, 8);
        let samples = simulate_trials([3u32, 3, 3, 3], &deck, 200, Some(1)).unwrap();
        assert!(samples.iter().any(|&x| x != samples[0]));
    }

    #[test]
    fn rejects_zero_trials() {
        let err = simulate_trials([3u32], &config(50, 8), 0, None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn rejects_zero_damage_packet() {
        let err = simulate_trials([3u32, 0], &config(50, 8), 10, None).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn steps_run_before_battle() {
        let deck = config(3, 1);
        let steps: Vec<Box<dyn MainPhaseStep>> =
            vec![Box::new(SeedTopStack::new([Card::Climax]))];

        let samples = Simulation::builder()
            .damage(vec![DamageEvent::attack(1)])
            .deck(deck)
            .steps(steps)
            .trials(20)
            .seed(1)
            .build()
            .run()
            .unwrap();

        assert!(samples.iter().all(|&x| x == 0));
    }

    #[test]
    fn scenarios_keep_their_labels() {
        let deck = config(10, 0);
        let stacked: Box<dyn MainPhaseStep> = Box::new(SeedTopStack::new([Card::Other]));
        let scenarios = vec![("plain", Vec::new()), ("stacked", vec![stacked])];

        let results = run_scenarios([2u32], &deck, scenarios, 10, Some(3)).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "plain");
        assert_eq!(results[1].0, "stacked");
        assert!(results.iter().all(|(_, s)| s.iter().all(|&x| x == 2)));
    }

    #[test]
    fn soul_trigger_overflow_is_an_error() {
        let deck = DeckConfig::builder()
            .total_cards(50)
            .climax_cards(50)
            .attacking_deck_size(5)
            .attacking_soul_trigger_cards(5)
            .build()
            .unwrap();

        let err = simulate_trials([Damage::MAX], &deck, 1, Some(1)).unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn running_total_overflow_is_an_error() {
        let flood = |_: &mut DeckState, _: &mut dyn RngCore| -> Result<Damage> { Ok(Damage::MAX) };
        let steps: Vec<Box<dyn MainPhaseStep>> = vec![Box::new(flood)];

        let err = Simulation::builder()
            .damage(vec![DamageEvent::effect(1)])
            .deck(config(10, 0))
            .steps(steps)
            .trials(1)
            .seed(1)
            .build()
            .run()
            .unwrap_err();

        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn single_climax_card_deck_takes_capped_refresh() {
        let samples = simulate_trials([3u32, 2], &config(1, 1), 5, Some(1)).unwrap();
        assert_eq!(samples, vec![1; 5]);
    }
}
