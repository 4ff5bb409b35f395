use std::path::Path;

use monomatch::prelude::*;
use monomatch_examples::{init_tracing, save_render_result, OutputLayers};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Order 3: 13 cards of 4 symbols, drawn with procedural shapes.
    let deck = build_by_order(3)?;
    let provider = ProceduralAssetProvider::new();
    let config = RenderConfig::new(1024).with_spacing_multiplier(32);
    let renderer = CardRenderer::try_new(config, &provider)?;

    let out = Path::new("cards-procedural-render");
    for card in deck.cards().iter().take(3) {
        let mut progress = FnProgress::new(|f| tracing::debug!(card = card.index(), f, "progress"));
        let result = renderer.render_with_progress(card, deck.symbol_count(), &mut progress)?;
        let written = save_render_result(
            &result,
            out,
            OutputLayers {
                foreground: true,
                background: card.index() == 0,
            },
        )?;
        for path in written {
            println!("wrote {}", path.display());
        }
    }

    Ok(())
}
