//! Matching-card decks built from finite projective planes.
//!
//! A [`Deck`] of design order `N` holds `N² + N + 1` cards over the same number of
//! symbols. Every card carries `N + 1` symbols and every pair of cards shares exactly
//! one symbol. Build decks with the functions in [`builder`].
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod builder;
pub mod primes;

pub use builder::{build_by_order, build_by_target_cards, build_by_target_dimension, choose_order};

/// Identifier of a symbol within a deck, in `0..symbol_count`.
pub type SymbolId = u32;

/// A single card: its position in the deck and its ordered symbol list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Card {
    index: usize,
    symbols: Vec<SymbolId>,
}

impl Card {
    pub fn new(index: usize, symbols: Vec<SymbolId>) -> Self {
        Self { index, symbols }
    }

    /// Position of this card in its deck.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Symbols on this card, in layout order.
    pub fn symbols(&self) -> &[SymbolId] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: SymbolId) -> bool {
        self.symbols.contains(&symbol)
    }
}

/// A complete matching-card deck.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deck {
    symbol_count: usize,
    card_count: usize,
    #[cfg_attr(feature = "serde", serde(rename = "grid_size"))]
    design_order: u32,
    #[cfg_attr(feature = "serde", serde(rename = "card_data"))]
    cards: Vec<Card>,
}

impl Deck {
    pub(crate) fn from_parts(design_order: u32, cards: Vec<Card>) -> Self {
        let n = design_order as usize;
        Self {
            symbol_count: n * n + n + 1,
            card_count: cards.len(),
            design_order,
            cards,
        }
    }

    /// Total number of distinct symbols used by the deck.
    pub fn symbol_count(&self) -> usize {
        self.symbol_count
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// Prime order `N` of the underlying projective plane.
    pub fn design_order(&self) -> u32 {
        self.design_order
    }

    /// Number of symbols printed on each card (`N + 1`).
    pub fn symbols_per_card(&self) -> usize {
        self.design_order as usize + 1
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the symbol shared by cards `a` and `b`.
    ///
    /// `None` when either index is out of range or `a == b`.
    pub fn shared_symbol(&self, a: usize, b: usize) -> Option<SymbolId> {
        if a == b {
            return None;
        }
        let (ca, cb) = (self.card(a)?, self.card(b)?);
        ca.symbols().iter().copied().find(|s| cb.contains(*s))
    }

    /// Re-checks every deck invariant.
    ///
    /// Useful after deserializing a deck from an untrusted source.
    pub fn verify(&self) -> Result<()> {
        let n = self.design_order as usize;
        let expected = n * n + n + 1;
        if self.symbol_count != expected || self.card_count != expected {
            return Err(Error::InvalidParameter(format!(
                "order {n} requires {expected} cards and symbols, found {} cards over {} symbols",
                self.card_count, self.symbol_count
            )));
        }
        if self.cards.len() != self.card_count {
            return Err(Error::InvalidParameter(format!(
                "card_count is {} but deck holds {} cards",
                self.card_count,
                self.cards.len()
            )));
        }

        let mut sets: Vec<HashSet<SymbolId>> = Vec::with_capacity(self.cards.len());
        for card in &self.cards {
            let set: HashSet<SymbolId> = card.symbols().iter().copied().collect();
            if card.len() != n + 1 || set.len() != card.len() {
                return Err(Error::InvalidParameter(format!(
                    "card {} must hold {} distinct symbols",
                    card.index(),
                    n + 1
                )));
            }
            if let Some(bad) = set.iter().find(|&&s| s as usize >= self.symbol_count) {
                return Err(Error::InvalidParameter(format!(
                    "card {} uses symbol {bad} outside 0..{}",
                    card.index(),
                    self.symbol_count
                )));
            }
            sets.push(set);
        }

        for a in 0..sets.len() {
            for b in (a + 1)..sets.len() {
                let shared = sets[a].intersection(&sets[b]).count();
                if shared != 1 {
                    return Err(Error::InvalidParameter(format!(
                        "cards {a} and {b} share {shared} symbols"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_accessors_expose_symbols() {
        let card = Card::new(3, vec![4, 1, 9]);
        assert_eq!(card.index(), 3);
        assert_eq!(card.symbols(), &[4, 1, 9]);
        assert_eq!(card.len(), 3);
        assert!(card.contains(9));
        assert!(!card.contains(2));
    }

    #[test]
    fn shared_symbol_finds_the_match() {
        let deck = build_by_order(3).unwrap();
        for a in 0..deck.len() {
            for b in 0..deck.len() {
                let shared = deck.shared_symbol(a, b);
                if a == b {
                    assert_eq!(shared, None);
                } else {
                    let s = shared.expect("every pair shares a symbol");
                    assert!(deck.cards()[a].contains(s));
                    assert!(deck.cards()[b].contains(s));
                }
            }
        }
        assert_eq!(deck.shared_symbol(0, 99), None);
    }

    #[test]
    fn verify_detects_tampered_deck() {
        let deck = build_by_order(2).unwrap();
        let mut cards = deck.cards().to_vec();
        cards[0] = Card::new(0, vec![0, 1, 2]);
        cards[1] = Card::new(1, vec![0, 1, 3]);
        let broken = Deck::from_parts(2, cards);
        assert!(matches!(broken.verify(), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn verify_rejects_out_of_range_symbol() {
        let deck = build_by_order(2).unwrap();
        let mut cards = deck.cards().to_vec();
        cards[6] = Card::new(6, vec![4, 5, 70]);
        let broken = Deck::from_parts(2, cards);
        assert!(broken.verify().is_err());
    }
}
