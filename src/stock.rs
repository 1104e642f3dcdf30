use rand::Rng;

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MagicStoneResult {
    pub deck_cards: u32,
    pub deck_climax_cards: u32,
    pub stock_cards: u32,
    pub stock_climax_cards: u32,
}

/// Shuffles the stock into the deck and deals the stock back out.
///
/// Pile sizes are unchanged; only the climax split between them moves.
pub fn apply_magic_stone_effect<G>(
    stock_cards: u32,
    stock_climax_cards: u32,
    deck_cards: u32,
    deck_climax_cards: u32,
    rng: &mut G,
) -> Result<MagicStoneResult>
where
    G: Rng + ?Sized,
{
    if stock_climax_cards > stock_cards {
        return Err(invalid("stock_climax_cards cannot exceed stock_cards"));
    }
    if deck_climax_cards > deck_cards {
        return Err(invalid("deck_climax_cards cannot exceed deck_cards"));
    }
    let total_cards = stock_cards
        .checked_add(deck_cards)
        .ok_or_else(|| invalid("stock_cards + deck_cards overflows"))?;
    if total_cards == 0 {
        return Err(invalid("stock_cards + deck_cards must be positive"));
    }

    let mut remaining_cards = total_cards;
    let mut remaining_climax_cards = stock_climax_cards + deck_climax_cards;
    let mut new_deck_climax_cards = 0;
    for _ in 0..deck_cards {
        if rng.gen_range(0..remaining_cards) < remaining_climax_cards {
            new_deck_climax_cards += 1;
            remaining_climax_cards -= 1;
        }
        remaining_cards -= 1;
    }

    Ok(MagicStoneResult {
        deck_cards,
        deck_climax_cards: new_deck_climax_cards,
        stock_cards,
        stock_climax_cards: remaining_climax_cards,
    })
}

fn invalid(message: &str) -> Error {
    Error::InvalidArgument(message.to_owned())
}
