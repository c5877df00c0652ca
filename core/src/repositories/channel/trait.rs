//! Channel repository trait: subscription writes and the read-only channel
//! aggregations (profile counts, watch history).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{ChannelProfile, Subscription, SubscriptionStatus, WatchHistoryEntry};
use crate::errors::DomainError;

#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Profile of the channel owned by `username` (already lowercased).
    ///
    /// Counts only consider `Subscribed` relationships. `is_subscribed` is
    /// false when `viewer` is `None`.
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Uuid>,
    ) -> Result<Option<ChannelProfile>, DomainError>;

    /// Watched videos of an account in watch order, each with its owner
    async fn watch_history(&self, account_id: Uuid) -> Result<Vec<WatchHistoryEntry>, DomainError>;

    /// Create or update the subscriber → channel relationship
    async fn set_subscription(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Subscription, DomainError>;
}
