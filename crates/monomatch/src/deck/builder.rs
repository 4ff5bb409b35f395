//! Deck construction over the projective plane `PG(2, N)` for prime `N`.
//!
//! Cards are the lines of the plane and symbols are its points. The plane is built by
//! completing the affine plane over `Z/N`: the `N²` affine points are symbols
//! `x·N + y`, the `N + 1` points at infinity are symbols `N² + slope`.
use tracing::{debug, info};

use crate::deck::primes::{is_prime, next_prime, prev_prime};
use crate::deck::{Card, Deck, SymbolId};
use crate::error::{Error, Result};

/// Builds the deck of prime order `order`.
///
/// Produces `order² + order + 1` cards of `order + 1` symbols each.
pub fn build_by_order(order: u32) -> Result<Deck> {
    if order < 2 || !is_prime(order as u64) {
        return Err(Error::InvalidParameter(format!(
            "design order must be a prime >= 2, got {order}"
        )));
    }

    let n = order as u64;
    let total = n * n + n + 1;
    if total > SymbolId::MAX as u64 {
        return Err(Error::InvalidParameter(format!(
            "design order {order} exceeds the symbol id range"
        )));
    }
    let n = order;
    let nn = n * n;
    let mut cards = Vec::with_capacity(total as usize);

    // Affine lines with slope i and intercept j, plus their point at infinity.
    for i in 0..n {
        for j in 0..n {
            let mut symbols = Vec::with_capacity(n as usize + 1);
            for k in 0..n {
                let row = ((i as u64 * k as u64 + j as u64) % n as u64) as u32;
                symbols.push(row * n + k);
            }
            symbols.push(nn + i);
            cards.push(Card::new(cards.len(), symbols));
        }
    }

    // Vertical lines share the last point at infinity.
    for i in 0..n {
        let mut symbols: Vec<SymbolId> = (0..n).map(|j| j * n + i).collect();
        symbols.push(nn + n);
        cards.push(Card::new(cards.len(), symbols));
    }

    // Line at infinity.
    cards.push(Card::new(cards.len(), (0..=n).map(|i| nn + i).collect()));

    let deck = Deck::from_parts(order, cards);
    info!(
        order,
        cards = deck.card_count(),
        symbols = deck.symbol_count(),
        per_card = deck.symbols_per_card(),
        "built deck"
    );
    Ok(deck)
}

/// Picks the prime order whose deck size `N² + N` lies closest to `target`.
///
/// Candidates are the largest prime `<= √target` and the smallest prime `> √target`.
/// Ties go to the smaller order. Fails when the chosen order does not fit in `u32`.
pub fn choose_order(target: u64) -> Result<u32> {
    let root = target.isqrt();
    let upper = next_prime(root);
    let distance = |p: u64| p.saturating_mul(p).saturating_add(p).abs_diff(target);

    let order = match prev_prime(root) {
        Some(lower) if distance(lower) <= distance(upper) => lower,
        _ => upper,
    };
    debug!(target, root, order, "chose design order");
    u32::try_from(order).map_err(|_| {
        Error::InvalidParameter(format!("target {target} needs design order {order}, too large"))
    })
}

/// Builds the deck whose card count lies closest to `target`.
pub fn build_by_target_cards(target: u64) -> Result<Deck> {
    build_by_order(choose_order(target)?)
}

/// Builds a deck from a grid dimension.
///
/// A prime `dimension` is used as the design order directly; any other value is
/// treated as a size target and rounded to the closest prime order.
pub fn build_by_target_dimension(dimension: u64) -> Result<Deck> {
    if is_prime(dimension) {
        let order = u32::try_from(dimension).map_err(|_| {
            Error::InvalidParameter(format!("dimension {dimension} is too large"))
        })?;
        return build_by_order(order);
    }
    build_by_order(choose_order(dimension)?)
}
