//! Deck-wide rendering on a bounded pool of worker threads.
//!
//! Card indices are queued on a channel; each worker renders cards independently and
//! sends results back over a bounded channel, so a slow consumer throttles the pool.
//! Results reach the caller on the calling thread.
use std::thread;

use tracing::{debug, info, warn};

use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::layout::config::{BatchConfig, RenderConfig};
use crate::layout::engine::{render, RenderResult};
use crate::layout::progress::{ProgressSink, ProgressTracker};
use crate::layout::provider::SymbolAssetProvider;

/// Counts of rendered and failed cards for a batch.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rendered: usize,
    pub failed: usize,
}

/// Renders every card of `deck`, handing each result to `on_card` as it completes.
///
/// Results arrive in completion order tagged with their card index. A failing card
/// does not stop the others. `progress` receives the fraction of finished cards.
pub fn render_deck<F>(
    deck: &Deck,
    config: &RenderConfig,
    batch: &BatchConfig,
    provider: &dyn SymbolAssetProvider,
    progress: &mut dyn ProgressSink,
    mut on_card: F,
) -> Result<BatchSummary>
where
    F: FnMut(usize, Result<RenderResult>),
{
    config.validate()?;
    batch.validate()?;

    let cards = deck.cards();
    let total = cards.len();
    let symbol_count = deck.symbol_count();
    let workers = batch.workers.min(total).max(1);
    let mut summary = BatchSummary::default();
    let mut tracker = ProgressTracker::new(progress);

    info!(cards = total, workers, "rendering deck");

    thread::scope(|scope| {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<usize>();
        let (done_tx, done_rx) = crossbeam_channel::bounded::<(usize, Result<RenderResult>)>(workers);

        for index in 0..total {
            // The receiver is alive until the scope ends.
            let _ = job_tx.send(index);
        }
        drop(job_tx);

        for worker in 0..workers {
            let job_rx = job_rx.clone();
            let done_tx = done_tx.clone();
            scope.spawn(move || {
                for index in job_rx.iter() {
                    let result = render(&cards[index], symbol_count, config, provider, &mut ());
                    if done_tx.send((index, result)).is_err() {
                        break;
                    }
                }
                debug!(worker, "render worker finished");
            });
        }
        drop(done_tx);

        for (index, result) in done_rx.iter() {
            match &result {
                Ok(_) => summary.rendered += 1,
                Err(err) => {
                    summary.failed += 1;
                    warn!(card = index, error = %err, "card render failed");
                }
            }
            on_card(index, result);
            tracker.step(1.0 / total as f32);
        }
    });

    tracker.finish();
    info!(
        rendered = summary.rendered,
        failed = summary.failed,
        "deck render finished"
    );
    Ok(summary)
}

/// Renders every card of `deck` and returns the results in card order.
///
/// Holds every image in memory; prefer [`render_deck`] for large outputs.
pub fn render_deck_collect(
    deck: &Deck,
    config: &RenderConfig,
    batch: &BatchConfig,
    provider: &dyn SymbolAssetProvider,
) -> Result<Vec<Result<RenderResult>>> {
    let mut slots: Vec<Option<Result<RenderResult>>> = (0..deck.len()).map(|_| None).collect();
    render_deck(deck, config, batch, provider, &mut (), |index, result| {
        slots[index] = Some(result);
    })?;

    Ok(slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| Err(Error::Other(format!("card {index} was not rendered"))))
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::build_by_order;
    use crate::layout::progress::VecProgress;
    use crate::layout::provider::ProceduralAssetProvider;

    fn small_config() -> RenderConfig {
        RenderConfig::new(160).with_spacing_multiplier(6)
    }

    #[test]
    fn collects_results_in_card_order() {
        let deck = build_by_order(2).unwrap();
        let provider = ProceduralAssetProvider::new();
        let results =
            render_deck_collect(&deck, &small_config(), &BatchConfig::new(3), &provider).unwrap();

        assert_eq!(results.len(), 7);
        for (i, result) in results.iter().enumerate() {
            let result = result.as_ref().unwrap();
            assert_eq!(result.card_index, i);
            assert_eq!(result.symbols, deck.cards()[i].symbols());
        }
    }

    #[test]
    fn parallel_output_matches_sequential_render() {
        let deck = build_by_order(2).unwrap();
        let provider = ProceduralAssetProvider::new();
        let config = small_config();
        let results = render_deck_collect(&deck, &config, &BatchConfig::new(4), &provider).unwrap();

        for (card, result) in deck.cards().iter().zip(results) {
            let expected = render(card, 7, &config, &provider, &mut ()).unwrap();
            assert_eq!(result.unwrap().full_image.as_raw(), expected.full_image.as_raw());
        }
    }

    #[test]
    fn failures_stay_local_to_their_card() {
        let deck = build_by_order(2).unwrap();
        // Symbol 6 appears on cards 4, 5 and 6 only.
        let provider = ProceduralAssetProvider::new().with_missing([6]);
        let mut progress = VecProgress::new();
        let mut failed = Vec::new();
        let summary = render_deck(
            &deck,
            &small_config(),
            &BatchConfig::default(),
            &provider,
            &mut progress,
            |index, result| {
                if result.is_err() {
                    failed.push(index);
                }
            },
        )
        .unwrap();

        failed.sort_unstable();
        assert_eq!(failed, vec![4, 5, 6]);
        assert_eq!(summary.rendered, 4);
        assert_eq!(summary.failed, 3);
        assert_eq!(progress.last(), Some(1.0));
    }

    #[test]
    fn rejects_zero_workers() {
        let deck = build_by_order(2).unwrap();
        let provider = ProceduralAssetProvider::new();
        let err = render_deck_collect(&deck, &small_config(), &BatchConfig::new(0), &provider)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
