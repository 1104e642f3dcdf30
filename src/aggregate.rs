use std::iter::Zip;
use std::slice;

use itertools::Itertools;

use crate::{Damage, Error, Result};

pub type Iter<'a> = Zip<slice::Iter<'a, Damage>, slice::Iter<'a, f64>>;

/// Empirical `P(total damage >= threshold)` for a set of thresholds, kept in
/// the order they were requested.
#[derive(Clone, Debug, PartialEq)]
pub struct ProbabilityCurve {
    thresholds: Vec<Damage>,
    probabilities: Vec<f64>,
}

impl ProbabilityCurve {
    #[must_use]
    pub fn thresholds(&self) -> &[Damage] {
        &self.thresholds
    }

    #[must_use]
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    #[must_use]
    pub fn get(&self, threshold: Damage) -> Option<f64> {
        self.thresholds
            .iter()
            .position(|&t| t == threshold)
            .map(|i| self.probabilities[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.thresholds.iter().zip(self.probabilities.iter())
    }

    /// Entries ordered by threshold.
    #[must_use]
    pub fn sorted(&self) -> Vec<(Damage, f64)> {
        self.iter()
            .map(|(&t, &p)| (t, p))
            .sorted_by_key(|&(t, _)| t)
            .collect()
    }
}

/// Fraction of `samples` at or above each threshold.
pub fn cumulative_probability_at_least<I>(
    samples: &[Damage],
    thresholds: I,
) -> Result<ProbabilityCurve>
where
    I: IntoIterator<Item = Damage>,
{
    if samples.is_empty() {
        return Err(Error::InvalidArgument("samples cannot be empty".to_owned()));
    }
    let thresholds: Vec<_> = thresholds.into_iter().unique().collect();
    if thresholds.is_empty() {
        return Err(Error::InvalidArgument("thresholds cannot be empty".to_owned()));
    }

    let sorted = samples.iter().copied().sorted_unstable().collect_vec();
    let n = sorted.len() as f64;
    let probabilities = thresholds
        .iter()
        .map(|&t| (sorted.len() - sorted.partition_point(|&x| x < t)) as f64 / n)
        .collect();

    Ok(ProbabilityCurve {
        thresholds,
        probabilities,
    })
}

/// The curve over every threshold from 0 up to the largest sample.
pub fn cumulative_distribution(samples: &[Damage]) -> Result<ProbabilityCurve> {
    let max = samples.iter().copied().max().unwrap_or_default();
    cumulative_probability_at_least(samples, 0..=max)
}
