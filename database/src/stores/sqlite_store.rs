use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use types::{DistanceUnit, HistoricalEvent};
use uuid::Uuid;

use super::GameStore;
use crate::{DatabaseError, ScraperLog, ScraperSettings, UserProfile};

const SCRAPER_SETTINGS_KEY: &str = "scraper_settings";

const EVENT_COLUMNS: &str =
    "id, description, image_url, event_date, latitude, longitude, location_name";

#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Wraps `pool` and brings its schema up to date.
    pub async fn connect(pool: SqlitePool) -> Result<Self, DatabaseError> {
        let store = Self::new(pool);
        store.run_migrations().await?;
        Ok(store)
    }

    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Migration(e.to_string()))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, DatabaseError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| DatabaseError::Query(e.to_string()))
}

fn event_from_row(row: &SqliteRow) -> Result<HistoricalEvent, DatabaseError> {
    let id: String = column(row, "id")?;
    let date: NaiveDate = column(row, "event_date")?;
    Ok(HistoricalEvent {
        id: Uuid::parse_str(&id)?,
        description: column(row, "description")?,
        image_url: column(row, "image_url")?,
        date,
        latitude: column(row, "latitude")?,
        longitude: column(row, "longitude")?,
        location_name: column(row, "location_name")?,
    })
}

fn profile_from_row(row: &SqliteRow) -> Result<UserProfile, DatabaseError> {
    let id: String = column(row, "id")?;
    let role: String = column(row, "role")?;
    let unit: String = column(row, "distance_unit")?;
    let created_at: DateTime<Utc> = column(row, "created_at")?;
    Ok(UserProfile {
        id: Uuid::parse_str(&id)?,
        username: column(row, "username")?,
        role: role.parse().map_err(DatabaseError::InvalidValue)?,
        avatar_url: column(row, "avatar_url")?,
        distance_unit: unit.parse().map_err(DatabaseError::InvalidValue)?,
        created_at,
    })
}

fn scraper_log_from_row(row: &SqliteRow) -> Result<ScraperLog, DatabaseError> {
    let event_id: Option<String> = column(row, "event_id")?;
    let status: String = column(row, "status")?;
    Ok(ScraperLog {
        id: Some(column(row, "id")?),
        event_id: event_id.as_deref().map(Uuid::parse_str).transpose()?,
        status: status.parse().map_err(DatabaseError::InvalidValue)?,
        message: column(row, "message")?,
        created_at: column(row, "created_at")?,
    })
}

#[async_trait]
impl GameStore for SqliteStore {
    async fn insert_event(&self, event: &HistoricalEvent) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO historical_events (id, description, image_url, event_date, latitude, longitude, location_name) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(event.id.to_string())
        .bind(&event.description)
        .bind(&event.image_url)
        .bind(event.date)
        .bind(event.latitude)
        .bind(event.longitude)
        .bind(&event.location_name)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        tracing::debug!("Inserted event {}", event.id);
        Ok(())
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<HistoricalEvent>, DatabaseError> {
        let row = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM historical_events WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        row.as_ref().map(event_from_row).transpose()
    }

    async fn list_events(&self) -> Result<Vec<HistoricalEvent>, DatabaseError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM historical_events ORDER BY event_date"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        rows.iter().map(event_from_row).collect()
    }

    async fn random_events(&self, count: u32) -> Result<Vec<HistoricalEvent>, DatabaseError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM historical_events ORDER BY RANDOM() LIMIT ?"
        ))
        .bind(count as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        rows.iter().map(event_from_row).collect()
    }

    async fn events_missing_images(
        &self,
        limit: u32,
    ) -> Result<Vec<HistoricalEvent>, DatabaseError> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM historical_events WHERE image_url IS NULL OR image_url = '' ORDER BY created_at LIMIT ?"
        ))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        rows.iter().map(event_from_row).collect()
    }

    async fn set_event_image(&self, id: Uuid, image_url: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE historical_events SET image_url = ? WHERE id = ?")
            .bind(image_url)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("event {id}")));
        }
        Ok(())
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO profiles (id, username, role, avatar_url, distance_unit, created_at) VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET username = excluded.username, role = excluded.role, avatar_url = excluded.avatar_url, distance_unit = excluded.distance_unit"
        )
        .bind(profile.id.to_string())
        .bind(&profile.username)
        .bind(profile.role.to_string())
        .bind(&profile.avatar_url)
        .bind(profile.distance_unit.to_string())
        .bind(profile.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        Ok(())
    }

    async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, DatabaseError> {
        let row = sqlx::query(
            "SELECT id, username, role, avatar_url, distance_unit, created_at FROM profiles WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        row.as_ref().map(profile_from_row).transpose()
    }

    async fn set_distance_unit(&self, id: Uuid, unit: DistanceUnit) -> Result<(), DatabaseError> {
        let result = sqlx::query("UPDATE profiles SET distance_unit = ? WHERE id = ?")
            .bind(unit.to_string())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::Query(e.to_string()))?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("profile {id}")));
        }
        Ok(())
    }

    async fn record_scraper_log(&self, log: &ScraperLog) -> Result<i64, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO scraper_logs (event_id, status, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(log.event_id.map(|id| id.to_string()))
        .bind(log.status.to_string())
        .bind(&log.message)
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        Ok(result.last_insert_rowid())
    }

    async fn recent_scraper_logs(&self, limit: u32) -> Result<Vec<ScraperLog>, DatabaseError> {
        let rows = sqlx::query(
            "SELECT id, event_id, status, message, created_at FROM scraper_logs ORDER BY id DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        rows.iter().map(scraper_log_from_row).collect()
    }

    async fn get_scraper_settings(&self) -> Result<ScraperSettings, DatabaseError> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM app_settings WHERE key = ?")
                .bind(SCRAPER_SETTINGS_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DatabaseError::Query(e.to_string()))?;
        match value {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(ScraperSettings::default()),
        }
    }

    async fn put_scraper_settings(
        &self,
        settings: &ScraperSettings,
    ) -> Result<(), DatabaseError> {
        let json = serde_json::to_string(settings)?;
        sqlx::query(
            "INSERT INTO app_settings (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(SCRAPER_SETTINGS_KEY)
        .bind(json)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::Query(e.to_string()))?;
        tracing::info!("Scraper settings updated: {settings:?}");
        Ok(())
    }
}
