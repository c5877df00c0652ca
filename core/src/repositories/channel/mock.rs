//! Mock implementation of ChannelRepository for testing

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{ChannelProfile, Subscription, SubscriptionStatus, WatchHistoryEntry};
use crate::errors::DomainError;

use super::r#trait::ChannelRepository;

/// Channels are seeded with zero counts; counts are derived from the
/// subscriptions recorded through `set_subscription`.
#[derive(Default)]
pub struct MockChannelRepository {
    channels: RwLock<HashMap<String, ChannelProfile>>,
    subscriptions: RwLock<HashMap<(Uuid, Uuid), Subscription>>,
    history: RwLock<HashMap<Uuid, Vec<WatchHistoryEntry>>>,
}

impl MockChannelRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_channel(&self, profile: ChannelProfile) {
        self.channels
            .write()
            .await
            .insert(profile.username.clone(), profile);
    }

    pub async fn add_history(&self, account_id: Uuid, entry: WatchHistoryEntry) {
        self.history
            .write()
            .await
            .entry(account_id)
            .or_default()
            .push(entry);
    }
}

#[async_trait]
impl ChannelRepository for MockChannelRepository {
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Uuid>,
    ) -> Result<Option<ChannelProfile>, DomainError> {
        let Some(mut profile) = self.channels.read().await.get(username).cloned() else {
            return Ok(None);
        };

        let subscriptions = self.subscriptions.read().await;
        let active = subscriptions
            .values()
            .filter(|s| s.status == SubscriptionStatus::Subscribed);
        let (mut subscribers, mut subscribed_to, mut is_subscribed) = (0, 0, false);
        for subscription in active {
            if subscription.channel_id == profile.id {
                subscribers += 1;
                is_subscribed |= viewer == Some(subscription.subscriber_id);
            }
            if subscription.subscriber_id == profile.id {
                subscribed_to += 1;
            }
        }
        profile.subscribers_count = subscribers;
        profile.subscribed_to_count = subscribed_to;
        profile.is_subscribed = is_subscribed;
        Ok(Some(profile))
    }

    async fn watch_history(&self, account_id: Uuid) -> Result<Vec<WatchHistoryEntry>, DomainError> {
        Ok(self
            .history
            .read()
            .await
            .get(&account_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_subscription(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Subscription, DomainError> {
        let now = Utc::now();
        let mut subscriptions = self.subscriptions.write().await;
        let subscription = subscriptions
            .entry((subscriber_id, channel_id))
            .or_insert_with(|| Subscription {
                subscriber_id,
                channel_id,
                status,
                created_at: now,
                updated_at: now,
            });
        subscription.status = status;
        subscription.updated_at = now;
        Ok(subscription.clone())
    }
}
