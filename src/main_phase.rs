//! Pre-battle deck manipulation.
//!
//! A [`MainPhaseStep`] runs against each trial's fresh [`DeckState`] before
//! battle damage resolves and returns the damage it dealt right away,
//! refresh penalties included.

use dyn_clone::DynClone;
use rand::RngCore;

use crate::damage::{resolve_damage, reveal};
use crate::deck::{Card, DeckState};
use crate::{add_damage, Damage, Result};

pub trait MainPhaseStep: DynClone {
    fn apply(&self, state: &mut DeckState, rng: &mut dyn RngCore) -> Result<Damage>;
}

dyn_clone::clone_trait_object!(MainPhaseStep);

impl<F> MainPhaseStep for F
where
    F: Fn(&mut DeckState, &mut dyn RngCore) -> Result<Damage> + Clone,
{
    fn apply(&self, state: &mut DeckState, rng: &mut dyn RngCore) -> Result<Damage> {
        self(state, rng)
    }
}

/// Puts known cards, top to bottom, on the draw pile. Deals nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedTopStack(Vec<Card>);

impl SeedTopStack {
    #[must_use]
    pub fn new<I>(cards: I) -> Self
    where
        I: IntoIterator<Item = Card>,
    {
        Self(cards.into_iter().collect())
    }
}

impl MainPhaseStep for SeedTopStack {
    fn apply(&self, state: &mut DeckState, _rng: &mut dyn RngCore) -> Result<Damage> {
        state.seed_top_stack(&self.0)?;
        Ok(0)
    }
}

/// Four cancellable damage; if the fourth card is the one that cancels,
/// four more cancellable damage follow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FourthCancelBonus;

impl MainPhaseStep for FourthCancelBonus {
    fn apply(&self, state: &mut DeckState, rng: &mut dyn RngCore) -> Result<Damage> {
        let first = resolve_damage(state, 4, rng)?;
        let total = first.total()?;
        if first.cancel_position == Some(4) {
            return add_damage(total, resolve_damage(state, 4, rng)?.total()?);
        }
        Ok(total)
    }
}

/// Reveals the top cards and clocks one uncancellable damage per climax.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealClockClimaxes(pub u32);

impl Default for RevealClockClimaxes {
    fn default() -> Self {
        Self(9)
    }
}

impl MainPhaseStep for RevealClockClimaxes {
    fn apply(&self, state: &mut DeckState, rng: &mut dyn RngCore) -> Result<Damage> {
        let mut total = 0;
        for _ in 0..self.0 {
            let revealed = reveal(state, rng)?;
            total = add_damage(total, revealed.penalty)?;
            total = add_damage(total, Damage::from(revealed.card.is_climax()))?;
        }
        Ok(total)
    }
}
