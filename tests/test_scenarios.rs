//! End-to-end scenarios: deck configuration through the probability curve.

use wssim::{
    auto_tune_trials, cumulative_probability_at_least, simulate_trials, AutoTune, DamageEvent,
    DeckConfig, Error,
};

fn deck(total: u32, climax: u32) -> DeckConfig {
    DeckConfig::builder()
        .total_cards(total)
        .climax_cards(climax)
        .build()
        .unwrap()
}

#[test]
fn all_climax_deck_cancels_everything() {
    let samples = simulate_trials([3u32], &deck(8, 8), 1000, None).unwrap();
    assert!(samples.iter().all(|&x| x == 0));

    let curve = cumulative_probability_at_least(&samples, [0, 1]).unwrap();
    assert_eq!(curve.get(0), Some(1.0));
    assert_eq!(curve.get(1), Some(0.0));
}

#[test]
fn no_climax_deck_takes_every_point() {
    let samples = simulate_trials([2u32, 3, 3], &deck(50, 0), 500, Some(7)).unwrap();
    assert!(samples.iter().all(|&x| x == 8));

    let curve = cumulative_probability_at_least(&samples, [8, 9]).unwrap();
    assert_eq!(curve.get(8), Some(1.0));
    assert_eq!(curve.get(9), Some(0.0));
}

#[test]
fn small_deck_forces_one_refresh() {
    let samples = simulate_trials([5u32], &deck(3, 0), 200, Some(3)).unwrap();
    assert!(samples.iter().all(|&x| x == 6));
}

#[test]
fn same_seed_same_samples() {
    let config = deck(50, 8);
    let first = simulate_trials([3u32, 2, 2], &config, 100, Some(42)).unwrap();
    let second = simulate_trials([3u32, 2, 2], &config, 100, Some(42)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn curve_is_monotonic() {
    let samples = simulate_trials([2u32, 2, 2], &deck(40, 8), 2000, Some(321)).unwrap();
    let max = *samples.iter().max().unwrap();
    let curve = cumulative_probability_at_least(&samples, 0..=max + 1).unwrap();

    assert_eq!(curve.get(0), Some(1.0));
    for (a, b) in curve.probabilities().iter().zip(&curve.probabilities()[1..]) {
        assert!(b <= a);
    }
}

#[test]
fn waiting_room_refreshes_into_play() {
    let config = DeckConfig::builder()
        .total_cards(10)
        .climax_cards(0)
        .waiting_room_cards(8)
        .build()
        .unwrap();
    // two cards in the pile, then a refresh with one penalty point
    let samples = simulate_trials([4u32], &config, 50, Some(11)).unwrap();
    assert!(samples.iter().all(|&x| x == 5));
}

#[test]
fn climaxes_reduce_expected_damage() {
    let damage = [3u32, 3, 3, 3];
    let light = simulate_trials(damage, &deck(50, 4), 3000, Some(1)).unwrap();
    let heavy = simulate_trials(damage, &deck(50, 16), 3000, Some(1)).unwrap();

    assert!(mean(&heavy) < mean(&light));
}

fn mean(samples: &[u32]) -> f64 {
    samples.iter().map(|&x| f64::from(x)).sum::<f64>() / samples.len() as f64
}

#[test]
fn invalid_configuration_is_caught_before_trials() {
    let err = DeckConfig::builder()
        .total_cards(5)
        .climax_cards(6)
        .build()
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn aggregator_rejects_empty_samples() {
    assert!(matches!(
        cumulative_probability_at_least(&[], [0, 1]),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn tuner_accepts_first_round_with_loose_bound() {
    let tuning = auto_tune_trials([3u32, 3], &deck(50, 8), 3, 0.5, 100, 1000, 2.0).unwrap();
    assert_eq!(tuning.trials, 100);
}

#[test]
fn tuner_gives_up_at_max_trials() {
    let err = AutoTune::builder()
        .damage(vec![DamageEvent::attack(3), DamageEvent::attack(3)])
        .deck(deck(50, 8))
        .threshold(3)
        .target_error(1e-5)
        .initial_trials(50)
        .max_trials(200)
        .seed(17)
        .build()
        .run()
        .unwrap_err();
    assert!(matches!(err, Error::Convergence { trials: 200, .. }));
}
