use bon::bon;

use crate::{Error, Result};

/// Deck composition at the start of a simulation.
///
/// Waiting room counts are part of `total_cards` / `climax_cards`: they are
/// cards already milled or clocked out of the full deck, and the initial draw
/// pile is whatever remains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeckConfig {
    total_cards: u32,
    climax_cards: u32,
    waiting_room_cards: u32,
    waiting_room_climax_cards: u32,
    attacking_deck_size: Option<u32>,
    attacking_soul_trigger_cards: u32,
}

#[bon]
impl DeckConfig {
    #[builder]
    pub fn new(
        total_cards: u32,
        climax_cards: u32,
        #[builder(default)] waiting_room_cards: u32,
        #[builder(default)] waiting_room_climax_cards: u32,
        attacking_deck_size: Option<u32>,
        #[builder(default)] attacking_soul_trigger_cards: u32,
    ) -> Result<Self> {
        let config = Self {
            total_cards,
            climax_cards,
            waiting_room_cards,
            waiting_room_climax_cards,
            attacking_deck_size,
            attacking_soul_trigger_cards,
        };
        config.validate()?;
        Ok(config)
    }
}

impl DeckConfig {
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.total_cards
    }

    #[must_use]
    pub fn climax_cards(&self) -> u32 {
        self.climax_cards
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
    pub fn attacking_deck_size(&self) -> Option<u32> {
        self.attacking_deck_size
    }

    #[must_use]
    pub fn attacking_soul_trigger_cards(&self) -> u32 {
        self.attacking_soul_trigger_cards
    }

    /// Cards left to draw once the waiting room has been set aside.
    #[must_use]
    pub fn draw_pile_cards(&self) -> u32 {
        self.total_cards - self.waiting_room_cards
    }

    #[must_use]
    pub fn draw_pile_climax_cards(&self) -> u32 {
        self.climax_cards - self.waiting_room_climax_cards
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.total_cards == 0 {
            return Err(config_error("total_cards must be positive"));
        }
        if self.climax_cards > self.total_cards {
            return Err(config_error("climax_cards cannot exceed total_cards"));
        }
        if self.waiting_room_climax_cards > self.waiting_room_cards {
            return Err(config_error(
                "waiting_room_climax_cards cannot exceed waiting_room_cards",
            ));
        }
        if self.waiting_room_cards > self.total_cards {
            return Err(config_error("waiting_room_cards cannot exceed total_cards"));
        }
        if self.waiting_room_climax_cards > self.climax_cards {
            return Err(config_error(
                "waiting_room_climax_cards cannot exceed climax_cards",
            ));
        }
        let waiting_room_others = self.waiting_room_cards - self.waiting_room_climax_cards;
        if waiting_room_others > self.total_cards - self.climax_cards {
            return Err(config_error(
                "waiting room holds more non-climax cards than the deck contains",
            ));
        }

        match self.attacking_deck_size {
            None if self.attacking_soul_trigger_cards > 0 => Err(config_error(
                "attacking_soul_trigger_cards requires attacking_deck_size",
            )),
            Some(0) => Err(config_error("attacking_deck_size must be positive")),
            Some(size) if self.attacking_soul_trigger_cards > size => Err(config_error(
                "attacking_soul_trigger_cards cannot exceed attacking_deck_size",
            )),
            _ => Ok(()),
        }
    }
}

fn config_error(message: &str) -> Error {
    Error::Configuration(message.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_plain_deck() {
        let config = DeckConfig::builder()
            .total_cards(50)
            .climax_cards(8)
            .build()
            .unwrap();
        assert_eq!(config.draw_pile_cards(), 50);
        assert_eq!(config.draw_pile_climax_cards(), 8);
        assert_eq!(config.attacking_deck_size(), None);
    }

    #[test]
    fn waiting_room_is_carved_out_of_the_deck() {
        let config = DeckConfig::builder()
            .total_cards(50)
            .climax_cards(8)
            .waiting_room_cards(12)
            .waiting_room_climax_cards(3)
            .build()
            .unwrap();
        assert_eq!(config.draw_pile_cards(), 38);
        assert_eq!(config.draw_pile_climax_cards(), 5);
    }

    #[test]
    fn rejects_empty_deck() {
        let err = DeckConfig::builder()
            .total_cards(0)
            .climax_cards(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn rejects_inconsistent_counts() {
        let cases = [
            (10, 11, 0, 0),
            (10, 2, 3, 4),
            (10, 2, 11, 0),
            (10, 2, 5, 3),
            (10, 9, 3, 0),
        ];
        for (total, climax, wr, wr_climax) in cases {
            let result = DeckConfig::builder()
                .total_cards(total)
                .climax_cards(climax)
                .waiting_room_cards(wr)
                .waiting_room_climax_cards(wr_climax)
                .build();
            assert!(
                matches!(result, Err(Error::Configuration(_))),
                "accepted {total}/{climax}/{wr}/{wr_climax}"
            );
        }
    }

    #[test]
    fn validates_attacking_deck() {
        let orphan_triggers = DeckConfig::builder()
            .total_cards(50)
            .climax_cards(8)
            .attacking_soul_trigger_cards(2)
            .build();
        assert!(orphan_triggers.is_err());

        let too_many = DeckConfig::builder()
            .total_cards(50)
            .climax_cards(8)
            .attacking_deck_size(3)
            .attacking_soul_trigger_cards(4)
            .build();
        assert!(too_many.is_err());

        let ok = DeckConfig::builder()
            .total_cards(50)
            .climax_cards(8)
            .attacking_deck_size(40)
            .attacking_soul_trigger_cards(6)
            .build()
            .unwrap();
        assert_eq!(ok.attacking_deck_size(), Some(40));
    }
}
