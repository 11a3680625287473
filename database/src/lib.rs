pub mod config;
pub mod error;
pub mod models;
pub mod retry;
pub mod stores;

pub use config::DatabaseConfig;
pub use error::DatabaseError;
pub use models::{ScrapeStatus, ScraperLog, ScraperSettings, UserProfile, UserRole};
pub use retry::{retry_with_backoff, RetryFuture, RetryPolicy};
pub use stores::{GameStore, SqliteStore};

use types::{DistanceUnit, HistoricalEvent};
use uuid::Uuid;

// NoopStore for when nothing should be read from or written to a database
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

#[async_trait::async_trait]
impl GameStore for NoopStore {
    async fn insert_event(&self, _event: &HistoricalEvent) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn get_event(&self, _id: Uuid) -> Result<Option<HistoricalEvent>, DatabaseError> {
        Ok(None)
    }

    async fn list_events(&self) -> Result<Vec<HistoricalEvent>, DatabaseError> {
        Ok(vec![])
    }

    async fn random_events(&self, _count: u32) -> Result<Vec<HistoricalEvent>, DatabaseError> {
        Ok(vec![])
    }

    async fn events_missing_images(
        &self,
        _limit: u32,
    ) -> Result<Vec<HistoricalEvent>, DatabaseError> {
        Ok(vec![])
    }

    async fn set_event_image(&self, _id: Uuid, _image_url: &str) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn upsert_profile(&self, _profile: &UserProfile) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn get_profile(&self, _id: Uuid) -> Result<Option<UserProfile>, DatabaseError> {
        Ok(None)
    }

    async fn set_distance_unit(
        &self,
        _id: Uuid,
        _unit: DistanceUnit,
    ) -> Result<(), DatabaseError> {
        Ok(())
    }

    async fn record_scraper_log(&self, _log: &ScraperLog) -> Result<i64, DatabaseError> {
        Ok(0)
    }

    async fn recent_scraper_logs(&self, _limit: u32) -> Result<Vec<ScraperLog>, DatabaseError> {
        Ok(vec![])
    }

    async fn get_scraper_settings(&self) -> Result<ScraperSettings, DatabaseError> {
        Ok(ScraperSettings::default())
    }

    async fn put_scraper_settings(
        &self,
        _settings: &ScraperSettings,
    ) -> Result<(), DatabaseError> {
        Ok(())
    }
}
