use async_trait::async_trait;
use types::{DistanceUnit, HistoricalEvent};
use uuid::Uuid;

use crate::{DatabaseError, ScraperLog, ScraperSettings, UserProfile};

/// Everything the game and its back-office jobs read from or write to the
/// hosted database.
#[async_trait]
pub trait GameStore: Send + Sync {
    async fn insert_event(&self, event: &HistoricalEvent) -> Result<(), DatabaseError>;
    async fn get_event(&self, id: Uuid) -> Result<Option<HistoricalEvent>, DatabaseError>;
    async fn list_events(&self) -> Result<Vec<HistoricalEvent>, DatabaseError>;
    /// Up to `count` events in random order, for a new game.
    async fn random_events(&self, count: u32) -> Result<Vec<HistoricalEvent>, DatabaseError>;
    async fn events_missing_images(
        &self,
        limit: u32,
    ) -> Result<Vec<HistoricalEvent>, DatabaseError>;
    async fn set_event_image(&self, id: Uuid, image_url: &str) -> Result<(), DatabaseError>;

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError>;
    async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, DatabaseError>;
    async fn set_distance_unit(&self, id: Uuid, unit: DistanceUnit) -> Result<(), DatabaseError>;

    async fn record_scraper_log(&self, log: &ScraperLog) -> Result<i64, DatabaseError>;
    async fn recent_scraper_logs(&self, limit: u32) -> Result<Vec<ScraperLog>, DatabaseError>;
    async fn get_scraper_settings(&self) -> Result<ScraperSettings, DatabaseError>;
    async fn put_scraper_settings(&self, settings: &ScraperSettings)
        -> Result<(), DatabaseError>;
}
