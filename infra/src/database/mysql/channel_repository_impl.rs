//! MySQL implementation of the ChannelRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use uuid::Uuid;

use vt_core::domain::entities::{
    ChannelProfile, Subscription, SubscriptionStatus, Video, VideoOwner, WatchHistoryEntry,
};
use vt_core::errors::DomainError;
use vt_core::repositories::ChannelRepository;

use super::{internal, parse_uuid};

/// MySQL implementation of ChannelRepository
#[derive(Clone)]
pub struct MySqlChannelRepository {
    pool: MySqlPool,
}

impl MySqlChannelRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Store a video row. Videos are published elsewhere; this exists for
    /// seeding and tests.
    pub async fn insert_video(&self, video: &Video) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO videos (id, owner_id, title, thumbnail_url, duration_secs, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(video.id.to_string())
        .bind(video.owner_id.to_string())
        .bind(&video.title)
        .bind(&video.thumbnail_url)
        .bind(video.duration)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(internal("Failed to insert video"))?;
        Ok(())
    }

    /// Append a video to the end of an account's watch history
    pub async fn record_watch(&self, account_id: Uuid, video_id: Uuid) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO watch_history (account_id, video_id, position, watched_at) \
             SELECT ?, ?, COALESCE(MAX(position), -1) + 1, ? \
             FROM watch_history WHERE account_id = ?",
        )
        .bind(account_id.to_string())
        .bind(video_id.to_string())
        .bind(Utc::now())
        .bind(account_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(internal("Failed to record watch"))?;
        Ok(())
    }

    fn row_to_profile(row: &MySqlRow) -> Result<ChannelProfile, DomainError> {
        let id: String = row.try_get("id").map_err(internal("Failed to get id"))?;
        let subscribers: i64 = row
            .try_get("subscribers_count")
            .map_err(internal("Failed to get subscribers_count"))?;
        let subscribed_to: i64 = row
            .try_get("subscribed_to_count")
            .map_err(internal("Failed to get subscribed_to_count"))?;
        let is_subscribed: i64 = row
            .try_get("is_subscribed")
            .map_err(internal("Failed to get is_subscribed"))?;

        Ok(ChannelProfile {
            id: parse_uuid(&id)?,
            username: row
                .try_get("username")
                .map_err(internal("Failed to get username"))?,
            full_name: row
                .try_get("full_name")
                .map_err(internal("Failed to get full_name"))?,
            email: row.try_get("email").map_err(internal("Failed to get email"))?,
            avatar_url: row
                .try_get("avatar_url")
                .map_err(internal("Failed to get avatar_url"))?,
            cover_image_url: row
                .try_get("cover_image_url")
                .map_err(internal("Failed to get cover_image_url"))?,
            subscribers_count: subscribers.max(0) as u64,
            subscribed_to_count: subscribed_to.max(0) as u64,
            is_subscribed: is_subscribed == 1,
        })
    }

    fn row_to_history_entry(row: &MySqlRow) -> Result<WatchHistoryEntry, DomainError> {
        let video_id: String = row
            .try_get("video_id")
            .map_err(internal("Failed to get video_id"))?;
        let owner_id: String = row
            .try_get("owner_id")
            .map_err(internal("Failed to get owner_id"))?;

        Ok(WatchHistoryEntry {
            video_id: parse_uuid(&video_id)?,
            title: row.try_get("title").map_err(internal("Failed to get title"))?,
            thumbnail_url: row
                .try_get("thumbnail_url")
                .map_err(internal("Failed to get thumbnail_url"))?,
            duration: row
                .try_get("duration_secs")
                .map_err(internal("Failed to get duration_secs"))?,
            owner: VideoOwner {
                id: parse_uuid(&owner_id)?,
                username: row
                    .try_get("owner_username")
                    .map_err(internal("Failed to get owner_username"))?,
                full_name: row
                    .try_get("owner_full_name")
                    .map_err(internal("Failed to get owner_full_name"))?,
                avatar_url: row
                    .try_get("owner_avatar_url")
                    .map_err(internal("Failed to get owner_avatar_url"))?,
            },
        })
    }
}

#[async_trait]
impl ChannelRepository for MySqlChannelRepository {
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Uuid>,
    ) -> Result<Option<ChannelProfile>, DomainError> {
        let query = r#"
            SELECT a.id, a.username, a.full_name, a.email, a.avatar_url, a.cover_image_url,
                (SELECT COUNT(*) FROM subscriptions s
                    WHERE s.channel_id = a.id AND s.status = 'SUBSCRIBED') AS subscribers_count,
                (SELECT COUNT(*) FROM subscriptions s
                    WHERE s.subscriber_id = a.id AND s.status = 'SUBSCRIBED') AS subscribed_to_count,
                CAST(EXISTS(SELECT 1 FROM subscriptions s
                    WHERE s.channel_id = a.id AND s.subscriber_id = ?
                    AND s.status = 'SUBSCRIBED') AS SIGNED) AS is_subscribed
            FROM accounts a
            WHERE a.username = ?
        "#;

        let row = sqlx::query(query)
            .bind(viewer.map(|id| id.to_string()))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal("Failed to load channel profile"))?;

        row.as_ref().map(Self::row_to_profile).transpose()
    }

    async fn watch_history(&self, account_id: Uuid) -> Result<Vec<WatchHistoryEntry>, DomainError> {
        let query = r#"
            SELECT v.id AS video_id, v.title, v.thumbnail_url, v.duration_secs,
                o.id AS owner_id, o.username AS owner_username,
                o.full_name AS owner_full_name, o.avatar_url AS owner_avatar_url
            FROM watch_history w
            JOIN videos v ON v.id = w.video_id
            JOIN accounts o ON o.id = v.owner_id
            WHERE w.account_id = ?
            ORDER BY w.position
        "#;

        let rows = sqlx::query(query)
            .bind(account_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(internal("Failed to load watch history"))?;

        rows.iter().map(Self::row_to_history_entry).collect()
    }

    async fn set_subscription(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Subscription, DomainError> {
        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO subscriptions (subscriber_id, channel_id, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE status = VALUES(status), updated_at = VALUES(updated_at)
            "#,
        )
        .bind(subscriber_id.to_string())
        .bind(channel_id.to_string())
        .bind(status.as_str())
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(internal("Failed to store subscription"))?;

        let row = sqlx::query(
            "SELECT status, created_at, updated_at FROM subscriptions \
             WHERE subscriber_id = ? AND channel_id = ?",
        )
        .bind(subscriber_id.to_string())
        .bind(channel_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(internal("Failed to read subscription"))?;

        let stored: String = row
            .try_get("status")
            .map_err(internal("Failed to get status"))?;

        Ok(Subscription {
            subscriber_id,
            channel_id,
            status: stored.parse().map_err(DomainError::internal)?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(internal("Failed to get created_at"))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(internal("Failed to get updated_at"))?,
        })
    }
}
