use std::{fmt::Display, sync::Arc};

use database::{
    retry_with_backoff, GameStore, RetryFuture, RetryPolicy, ScrapeStatus, ScraperLog,
};
use tracing::{info, warn};
use types::HistoricalEvent;

use crate::{filter::select_image, ImageResult, ImageSource, SearchError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub attempted: u32,
    pub updated: u32,
    pub no_match: u32,
    pub failed: u32,
}

impl Display for BackfillReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} attempted: {} updated, {} without a match, {} failed",
            self.attempted, self.updated, self.no_match, self.failed
        )
    }
}

/// Fills in images for one batch of events that have none. Every attempt is
/// written to the scraper log. A failed search is logged and the batch moves
/// on; only store errors stop it.
pub async fn run_backfill(
    store: &dyn GameStore,
    source: Arc<dyn ImageSource>,
    policy: RetryPolicy,
) -> Result<BackfillReport, SearchError> {
    let settings = store.get_scraper_settings().await?;
    if !settings.enabled {
        info!("Image backfill is disabled, nothing to do");
        return Ok(BackfillReport::default());
    }

    let events = store.events_missing_images(settings.batch_size).await?;
    info!("Backfilling images for {} events", events.len());

    let mut report = BackfillReport::default();
    for event in events {
        report.attempted += 1;
        let query = search_query(&event, &settings.search_suffix);
        let searched = retry_with_backoff(policy, || -> RetryFuture<Vec<ImageResult>, SearchError> {
            let source = source.clone();
            let query = query.clone();
            Box::pin(async move { source.search(&query).await })
        })
        .await;

        let log = match searched {
            Ok(images) => match select_image(&images) {
                Some(image) => {
                    store.set_event_image(event.id, &image.url).await?;
                    report.updated += 1;
                    ScraperLog::new(
                        Some(event.id),
                        ScrapeStatus::Success,
                        format!("Using {} ({})", image.title, image.url),
                    )
                }
                None => {
                    report.no_match += 1;
                    ScraperLog::new(
                        Some(event.id),
                        ScrapeStatus::NoMatch,
                        format!("No usable image among {} results for {query:?}", images.len()),
                    )
                }
            },
            Err(e) => {
                warn!("Image search for event {} failed: {e}", event.id);
                report.failed += 1;
                ScraperLog::new(Some(event.id), ScrapeStatus::Failed, e.to_string())
            }
        };
        store.record_scraper_log(&log).await?;
    }

    info!("Image backfill finished: {report}");
    Ok(report)
}

fn search_query(event: &HistoricalEvent, suffix: &str) -> String {
    format!("{} {}", event.description, suffix).trim().to_string()
}
