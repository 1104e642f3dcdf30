use rand::Rng;

use crate::deck::{AttackingDeck, Card, DeckState};
use crate::{add_damage, Damage, Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DamageKind {
    /// Battle damage; may gain a point from a soul trigger.
    #[default]
    Attack,
    /// Effect damage; never checks triggers.
    Effect,
}

/// One damage packet in a battle sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DamageEvent {
    pub damage: Damage,
    pub kind: DamageKind,
}

impl DamageEvent {
    #[must_use]
    pub fn attack(damage: Damage) -> Self {
        Self {
            damage,
            kind: DamageKind::Attack,
        }
    }

    #[must_use]
    pub fn effect(damage: Damage) -> Self {
        Self {
            damage,
            kind: DamageKind::Effect,
        }
    }
}

impl From<Damage> for DamageEvent {
    fn from(damage: Damage) -> Self {
        Self::attack(damage)
    }
}

/// Outcome of one cancellable damage packet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Damage from the packet itself, zero if it was cancelled.
    pub dealt: Damage,
    /// Refresh penalty points incurred while resolving it.
    pub penalty: Damage,
    /// 1-based position of the cancelling climax.
    pub cancel_position: Option<Damage>,
}

impl Resolution {
    pub fn total(&self) -> Result<Damage> {
        add_damage(self.dealt, self.penalty)
    }

    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.cancel_position.is_some()
    }
}

/// A single revealed card together with the refresh penalty paid to reveal it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub card: Card,
    pub penalty: Damage,
}

/// Reveals the top card, refreshing first if the draw pile is exhausted.
///
/// Each refresh costs one penalty point, itself resolved by drawing a card
/// that cancels it on a climax. Refreshes chained inside one reveal are
/// bounded by the deck size; past that the point is dealt unchecked.
///
/// Only a one-card deck reaches that bound, and there the point lands even
/// when the card is a climax: a one-card all-climax deck still takes one
/// damage for every reveal that finds its pile exhausted.
pub fn reveal<G>(state: &mut DeckState, rng: &mut G) -> Result<Reveal>
where
    G: Rng + ?Sized,
{
    let mut penalty = 0;
    let mut refreshes = 0;
    while state.is_exhausted() {
        state.refresh()?;
        refreshes += 1;
        if refreshes > state.total_cards() {
            penalty += 1;
            break;
        }
        if !draw(state, rng)?.is_climax() {
            penalty += 1;
        }
    }

    let card = draw(state, rng)?;
    Ok(Reveal { card, penalty })
}

/// Resolves `damage` cancellable points: the first climax revealed stops the
/// packet and cancels all of it.
pub fn resolve_damage<G>(state: &mut DeckState, damage: Damage, rng: &mut G) -> Result<Resolution>
where
    G: Rng + ?Sized,
{
    let mut resolution = Resolution::default();
    for position in 1..=damage {
        let Reveal { card, penalty } = reveal(state, rng)?;
        resolution.penalty = add_damage(resolution.penalty, penalty)?;
        if card.is_climax() {
            resolution.cancel_position = Some(position);
            return Ok(resolution);
        }
    }
    resolution.dealt = damage;
    Ok(resolution)
}

/// Total damage taken while resolving `events` in order.
pub fn resolve<G>(
    state: &mut DeckState,
    events: &[DamageEvent],
    mut attacking: Option<&mut AttackingDeck>,
    rng: &mut G,
) -> Result<Damage>
where
    G: Rng + ?Sized,
{
    let mut total = 0;
    for event in events {
        let triggered = match (event.kind, attacking.as_deref_mut()) {
            (DamageKind::Attack, Some(deck)) => deck.reveal_trigger(rng),
            _ => false,
        };
        let damage = add_damage(event.damage, Damage::from(triggered))?;
        total = add_damage(total, resolve_damage(state, damage, rng)?.total()?)?;
    }
    Ok(total)
}

fn draw<G>(state: &mut DeckState, rng: &mut G) -> Result<Card>
where
    G: Rng + ?Sized,
{
    state
        .take(rng)
        .ok_or_else(|| Error::Configuration("cannot draw from an empty deck".to_owned()))
}
