//! Channel, subscription and watch history types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// State of a subscriber → channel relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatus {
    Subscribed,
    Unsubscribed,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Subscribed => "SUBSCRIBED",
            SubscriptionStatus::Unsubscribed => "UNSUBSCRIBED",
        }
    }
}

impl From<bool> for SubscriptionStatus {
    fn from(subscribed: bool) -> Self {
        if subscribed {
            SubscriptionStatus::Subscribed
        } else {
            SubscriptionStatus::Unsubscribed
        }
    }
}

impl FromStr for SubscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SUBSCRIBED" => Ok(SubscriptionStatus::Subscribed),
            "UNSUBSCRIBED" => Ok(SubscriptionStatus::Unsubscribed),
            other => Err(format!("Invalid subscription status: {}", other)),
        }
    }
}

/// One subscriber → channel relationship; unique per pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public profile of a channel as seen by a viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    /// Accounts currently subscribed to this channel
    pub subscribers_count: u64,
    /// Channels this account is currently subscribed to
    pub subscribed_to_count: u64,
    /// Whether the viewer is currently subscribed
    pub is_subscribed: bool,
}

/// A published video. Only the fields the watch history needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub thumbnail_url: String,
    /// Length in seconds
    pub duration: f64,
}

/// Owner summary embedded in each watch history entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoOwner {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub video_id: Uuid,
    pub title: String,
    pub thumbnail_url: String,
    pub duration: f64,
    pub owner: VideoOwner,
}
