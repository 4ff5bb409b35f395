use monomatch::prelude::*;
use monomatch_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Order 2: the Fano plane, 7 cards of 3 symbols.
    let deck = build_by_order(2)?;
    deck.verify()?;

    println!(
        "{} cards over {} symbols, {} per card",
        deck.card_count(),
        deck.symbol_count(),
        deck.symbols_per_card()
    );
    for card in deck.cards() {
        println!("card {}: {:?}", card.index(), card.symbols());
    }

    // Every pair shares exactly one symbol: that is the answer to a round.
    for a in 0..deck.len() {
        for b in (a + 1)..deck.len() {
            if let Some(symbol) = deck.shared_symbol(a, b) {
                println!("cards {a} and {b} share symbol {symbol}");
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&deck)?);
    Ok(())
}
