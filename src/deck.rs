use rand::Rng;

use crate::{DeckConfig, Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Card {
    Climax,
    Other,
}

impl Card {
    #[must_use]
    pub fn is_climax(self) -> bool {
        self == Card::Climax
    }
}

impl From<bool> for Card {
    fn from(climax: bool) -> Self {
        if climax {
            Card::Climax
        } else {
            Card::Other
        }
    }
}

/// Defending player's deck for a single trial.
///
/// The draw pile is a stack of known cards (`top`, drawn from the end)
/// sitting on a uniformly shuffled remainder tracked only by its counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckState {
    top: Vec<Card>,
    pile_cards: u32,
    pile_climax_cards: u32,
    waiting_room_cards: u32,
    waiting_room_climax_cards: u32,
    total_cards: u32,
}

impl DeckState {
    #[must_use]
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            top: Vec::new(),
            pile_cards: config.draw_pile_cards(),
            pile_climax_cards: config.draw_pile_climax_cards(),
            waiting_room_cards: config.waiting_room_cards(),
            waiting_room_climax_cards: config.waiting_room_climax_cards(),
            total_cards: config.total_cards(),
        }
    }

    #[must_use]
    pub fn draw_pile_cards(&self) -> u32 {
        self.pile_cards + self.top.len() as u32
    }

    #[must_use]
    pub fn draw_pile_climax_cards(&self) -> u32 {
        self.pile_climax_cards + self.top.iter().filter(|c| c.is_climax()).count() as u32
    }

    #[must_use]
    pub fn waiting_room_cards(&self) -> u32 {
        self.waiting_room_cards
    }

    #[must_use]
    pub fn waiting_room_climax_cards(&self) -> u32 {
        self.waiting_room_climax_cards
    }

    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.total_cards
    }

    /// The draw pile is empty and must refresh before the next draw.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.top.is_empty() && self.pile_cards == 0
    }

    /// Draws the top card into the waiting room, or `None` if the pile is
    /// exhausted.
    pub fn take<G>(&mut self, rng: &mut G) -> Option<Card>
    where
        G: Rng + ?Sized,
    {
        let card = match self.top.pop() {
            Some(card) => card,
            None if self.pile_cards == 0 => return None,
            None => {
                let card = Card::from(rng.gen_range(0..self.pile_cards) < self.pile_climax_cards);
                self.pile_cards -= 1;
                if card.is_climax() {
                    self.pile_climax_cards -= 1;
                }
                card
            }
        };

        self.waiting_room_cards += 1;
        if card.is_climax() {
            self.waiting_room_climax_cards += 1;
        }
        Some(card)
    }

    /// Moves the whole waiting room back into the draw pile.
    pub fn refresh(&mut self) -> Result<()> {
        if self.waiting_room_cards == 0 {
            return Err(Error::Configuration(
                "draw pile and waiting room are both empty".to_owned(),
            ));
        }

        for card in self.top.drain(..) {
            self.pile_cards += 1;
            if card.is_climax() {
                self.pile_climax_cards += 1;
            }
        }
        self.pile_cards += self.waiting_room_cards;
        self.pile_climax_cards += self.waiting_room_climax_cards;
        self.waiting_room_cards = 0;
        self.waiting_room_climax_cards = 0;
        Ok(())
    }

    /// Places `cards` (ordered top to bottom) on top of the draw pile.
    ///
    /// The stacked cards are taken out of the current draw pile, so its
    /// composition is unchanged; the rest of the pile stays random.
    pub fn seed_top_stack(&mut self, cards: &[Card]) -> Result<()> {
        let pile_cards = self.draw_pile_cards();
        let pile_climax_cards = self.draw_pile_climax_cards();
        let stack_cards = cards.len() as u32;
        let stack_climax_cards = cards.iter().filter(|c| c.is_climax()).count() as u32;

        if stack_cards > pile_cards {
            return Err(Error::InvalidArgument(format!(
                "top stack of {stack_cards} cards is larger than the draw pile ({pile_cards})"
            )));
        }
        let remainder_cards = pile_cards - stack_cards;
        if stack_climax_cards > pile_climax_cards
            || pile_climax_cards - stack_climax_cards > remainder_cards
        {
            return Err(Error::InvalidArgument(
                "top stack does not match the draw pile's climax composition".to_owned(),
            ));
        }

        self.pile_cards = remainder_cards;
        self.pile_climax_cards = pile_climax_cards - stack_climax_cards;
        self.top = cards.iter().rev().copied().collect();
        Ok(())
    }
}

/// Attacker's deck, revealed once per attack for soul triggers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackingDeck {
    cards: u32,
    soul_trigger_cards: u32,
}

impl AttackingDeck {
    #[must_use]
    pub fn new(cards: u32, soul_trigger_cards: u32) -> Self {
        Self {
            cards,
            soul_trigger_cards: soul_trigger_cards.min(cards),
        }
    }

    #[must_use]
    pub fn from_config(config: &DeckConfig) -> Option<Self> {
        config
            .attacking_deck_size()
            .map(|size| Self::new(size, config.attacking_soul_trigger_cards()))
    }

    #[must_use]
    pub fn cards(&self) -> u32 {
        self.cards
    }

    /// Reveals one card; `true` on a soul trigger. An empty deck never
    /// triggers.
    pub fn reveal_trigger<G>(&mut self, rng: &mut G) -> bool
    where
        G: Rng + ?Sized,
    {
        if self.cards == 0 {
            return false;
        }
        let hit = rng.gen_range(0..self.cards) < self.soul_trigger_cards;
        self.cards -= 1;
        if hit {
            self.soul_trigger_cards -= 1;
        }
        hit
    }
}
