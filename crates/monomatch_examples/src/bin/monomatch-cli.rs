//! Command-line deck generation and card rendering.
//!
//! ```text
//! monomatch-cli deck --cards 57 --json deck.json
//! monomatch-cli render --dimension 5 --symbols ./symbols --out ./cards
//! ```
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use monomatch::prelude::*;
use monomatch_examples::{init_tracing, save_render_result, OutputLayers};
use tracing::{error, info};

/// Matching-card deck generator
#[derive(Parser)]
#[command(name = "monomatch-cli")]
#[command(version)]
#[command(about = "Build matching-card decks and render their cards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a deck and print or save its card data
    Deck {
        #[command(flatten)]
        size: DeckSize,

        /// Write the deck as JSON to this file instead of stdout
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Build a deck and render every card to PNG
    Render {
        #[command(flatten)]
        size: DeckSize,

        /// Directory of `<id>.png` symbol images; procedural shapes when omitted
        #[arg(long)]
        symbols: Option<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "cards")]
        out: PathBuf,

        /// Output image edge in pixels
        #[arg(long, default_value_t = 4096)]
        size_px: u32,

        /// Sample spacing in pixels
        #[arg(long, default_value_t = 128)]
        spacing: u32,

        /// Worker threads
        #[arg(long, default_value_t = 10)]
        workers: usize,

        /// Also write foreground and background layers
        #[arg(long)]
        layers: bool,

        /// Log per-symbol diagnostics at debug level
        #[arg(long)]
        debug: bool,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct DeckSize {
    /// Target card count; the closest prime-order deck is built
    #[arg(long)]
    cards: Option<u64>,

    /// Grid dimension; used directly when prime
    #[arg(long)]
    dimension: Option<u64>,
}

impl DeckSize {
    fn build(&self) -> anyhow::Result<Deck> {
        let deck = match (self.cards, self.dimension) {
            (Some(cards), _) => build_by_target_cards(cards)?,
            (None, Some(dimension)) => build_by_target_dimension(dimension)?,
            (None, None) => bail!("either --cards or --dimension is required"),
        };
        Ok(deck)
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Deck { size, json } => {
            let deck = size.build()?;
            let data = serde_json::to_string_pretty(&deck)?;
            match json {
                Some(path) => {
                    std::fs::write(&path, data)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), cards = deck.card_count(), "wrote deck");
                }
                None => println!("{data}"),
            }
        }
        Commands::Render {
            size,
            symbols,
            out,
            size_px,
            spacing,
            workers,
            layers,
            debug,
        } => {
            let deck = size.build()?;
            let config = RenderConfig::new(size_px)
                .with_spacing_multiplier(spacing)
                .with_debug_logging(debug);
            let batch = BatchConfig::new(workers);
            let provider: Box<dyn SymbolAssetProvider> = match symbols {
                Some(dir) => Box::new(DirectoryAssetProvider::new(dir)),
                None => Box::new(ProceduralAssetProvider::new()),
            };
            let layers = OutputLayers {
                foreground: layers,
                background: layers,
            };

            let mut last_percent = 0;
            let mut progress = FnProgress::new(|f: f32| {
                let percent = (f * 100.0) as u32;
                if percent >= last_percent + 10 || percent == 100 {
                    last_percent = percent;
                    info!("{percent}% of cards done");
                }
            });

            let mut write_errors = 0usize;
            let summary = render_deck(
                &deck,
                &config,
                &batch,
                provider.as_ref(),
                &mut progress,
                |index, result| match result {
                    Ok(result) => {
                        if let Err(err) = save_render_result(&result, &out, layers) {
                            write_errors += 1;
                            error!(card = index, "{err:#}");
                        }
                    }
                    Err(err) => error!(card = index, "render failed: {err}"),
                },
            )?;

            println!(
                "rendered {} of {} cards into {}",
                summary.rendered - write_errors,
                deck.card_count(),
                out.display()
            );
            if summary.failed > 0 || write_errors > 0 {
                bail!(
                    "{} cards failed to render, {} failed to save",
                    summary.failed,
                    write_errors
                );
            }
        }
    }

    Ok(())
}
