//! Deterministic seeds derived from card contents.
use crate::deck::SymbolId;

const SYMBOLS_SEED_BASE: u64 = 0x6D6F_6E6F_6D61_7463;

/// Order-sensitive seed for a card's symbol sequence.
///
/// The same sequence always yields the same seed; permuting it changes the seed.
pub fn seed_for_symbols(symbols: &[SymbolId]) -> u64 {
    let mut h = SYMBOLS_SEED_BASE ^ (symbols.len() as u64).wrapping_mul(0xD6E8FEB86659FD93);
    for &s in symbols {
        h = mix_u64(h ^ (s as u64).wrapping_mul(0x9E3779B97F4A7C15));
    }
    h
}

/// Independent sub-seed for the symbol at `index` on a card seeded with `card_seed`.
pub fn seed_for_symbol(card_seed: u64, index: usize) -> u64 {
    let i = index as u64;
    mix_u64(card_seed ^ i.wrapping_add(1).wrapping_mul(0xBF58476D1CE4E5B9))
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_seed_is_stable() {
        assert_eq!(seed_for_symbols(&[1, 2, 3]), seed_for_symbols(&[1, 2, 3]));
    }

    #[test]
    fn symbols_seed_is_order_sensitive() {
        assert_ne!(seed_for_symbols(&[1, 2, 3]), seed_for_symbols(&[3, 2, 1]));
        assert_ne!(seed_for_symbols(&[0]), seed_for_symbols(&[0, 0]));
    }

    #[test]
    fn symbol_seeds_differ_per_index() {
        let card = seed_for_symbols(&[4, 5, 6]);
        let seeds: Vec<u64> = (0..3).map(|i| seed_for_symbol(card, i)).collect();
        assert_ne!(seeds[0], seeds[1]);
        assert_ne!(seeds[1], seeds[2]);
        assert_ne!(seeds[0], card);
    }
}
