use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use vt_core::domain::entities::{
    Account, AccountUpdate, ChannelProfile, NewAccount, Subscription, SubscriptionStatus, Video,
    VideoOwner, WatchHistoryEntry,
};
use vt_core::errors::DomainError;
use vt_core::repositories::{AccountRepository, ChannelRepository, SessionRegistry};

#[derive(Default)]
struct State {
    accounts: HashMap<Uuid, Account>,
    subscriptions: HashMap<(Uuid, Uuid), Subscription>,
    videos: HashMap<Uuid, Video>,
}

impl State {
    fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.accounts.values().find(|a| a.username == username)
    }

    fn email_taken_by_other(&self, email: &str, id: Uuid) -> bool {
        self.accounts
            .values()
            .any(|a| a.email == email && a.id != id)
    }

    fn count_subscribed(&self, matches: impl Fn(&Subscription) -> bool) -> u64 {
        self.subscriptions
            .values()
            .filter(|s| s.status == SubscriptionStatus::Subscribed && matches(s))
            .count() as u64
    }
}

/// Account, session and channel store held behind one `RwLock`.
///
/// Every trait method takes the lock once, so compound operations such as
/// the uniqueness check in `create` or the compare-and-swap in `rotate` are
/// atomic with respect to each other.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account_count(&self) -> usize {
        self.state.read().await.accounts.len()
    }

    /// Register a video so it can appear in watch histories
    pub async fn insert_video(&self, video: Video) {
        self.state.write().await.videos.insert(video.id, video);
    }

    /// Append a video to an account's watch history
    pub async fn record_watch(&self, account_id: Uuid, video_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        if !state.videos.contains_key(&video_id) {
            return Err(DomainError::not_found("Video"));
        }
        let account = state
            .accounts
            .get_mut(&account_id)
            .ok_or_else(|| DomainError::not_found("User"))?;
        account.watch_history.push(video_id);
        Ok(())
    }
}

#[async_trait]
impl AccountRepository for InMemoryStore {
    async fn find_by_email_or_username(
        &self,
        email: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<Account>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .values()
            .find(|a| email == Some(a.email.as_str()) || username == Some(a.username.as_str()))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.state.read().await.accounts.get(&id).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, DomainError> {
        let account = Account::new(account);
        let mut state = self.state.write().await;
        let taken = state
            .accounts
            .values()
            .any(|a| a.username == account.username || a.email == account.email);
        if taken {
            return Err(DomainError::conflict(
                "User with email or username already exists",
            ));
        }
        state.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_fields(&self, id: Uuid, update: AccountUpdate) -> Result<Account, DomainError> {
        let mut state = self.state.write().await;
        if let Some(email) = update.email.as_deref() {
            if state.email_taken_by_other(&email.trim().to_lowercase(), id) {
                return Err(DomainError::conflict("Email is already in use"));
            }
        }
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("User"))?;
        account.apply(update);
        Ok(account.clone())
    }
}

#[async_trait]
impl SessionRegistry for InMemoryStore {
    async fn set_refresh_token(&self, account_id: Uuid, token: &str) -> Result<(), DomainError> {
        if let Some(account) = self.state.write().await.accounts.get_mut(&account_id) {
            account.refresh_token = Some(token.to_string());
        }
        Ok(())
    }

    async fn rotate(
        &self,
        account_id: Uuid,
        presented: &str,
        new_token: &str,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.accounts.get_mut(&account_id) {
            Some(account) if account.refresh_token.as_deref() == Some(presented) => {
                account.refresh_token = Some(new_token.to_string());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn clear(&self, account_id: Uuid) -> Result<(), DomainError> {
        if let Some(account) = self.state.write().await.accounts.get_mut(&account_id) {
            account.refresh_token = None;
        }
        Ok(())
    }

    async fn get(&self, account_id: Uuid) -> Result<Option<String>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .accounts
            .get(&account_id)
            .and_then(|a| a.refresh_token.clone()))
    }
}

#[async_trait]
impl ChannelRepository for InMemoryStore {
    async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Uuid>,
    ) -> Result<Option<ChannelProfile>, DomainError> {
        let state = self.state.read().await;
        let Some(channel) = state.find_by_username(username) else {
            return Ok(None);
        };
        let id = channel.id;

        Ok(Some(ChannelProfile {
            id,
            username: channel.username.clone(),
            full_name: channel.full_name.clone(),
            email: channel.email.clone(),
            avatar_url: channel.avatar_url.clone(),
            cover_image_url: channel.cover_image_url.clone(),
            subscribers_count: state.count_subscribed(|s| s.channel_id == id),
            subscribed_to_count: state.count_subscribed(|s| s.subscriber_id == id),
            is_subscribed: viewer
                .map(|viewer| {
                    state.count_subscribed(|s| s.channel_id == id && s.subscriber_id == viewer) > 0
                })
                .unwrap_or(false),
        }))
    }

    async fn watch_history(&self, account_id: Uuid) -> Result<Vec<WatchHistoryEntry>, DomainError> {
        let state = self.state.read().await;
        let Some(account) = state.accounts.get(&account_id) else {
            return Ok(Vec::new());
        };

        let entries = account
            .watch_history
            .iter()
            .filter_map(|video_id| state.videos.get(video_id))
            .filter_map(|video| {
                let owner = state.accounts.get(&video.owner_id)?;
                Some(WatchHistoryEntry {
                    video_id: video.id,
                    title: video.title.clone(),
                    thumbnail_url: video.thumbnail_url.clone(),
                    duration: video.duration,
                    owner: VideoOwner {
                        id: owner.id,
                        username: owner.username.clone(),
                        full_name: owner.full_name.clone(),
                        avatar_url: owner.avatar_url.clone(),
                    },
                })
            })
            .collect();
        Ok(entries)
    }

    async fn set_subscription(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
        status: SubscriptionStatus,
    ) -> Result<Subscription, DomainError> {
        let now = Utc::now();
        let mut state = self.state.write().await;
        let subscription = state
            .subscriptions
            .entry((subscriber_id, channel_id))
            .and_modify(|s| {
                s.status = status;
                s.updated_at = now;
            })
            .or_insert_with(|| Subscription {
                subscriber_id,
                channel_id,
                status,
                created_at: now,
                updated_at: now,
            });
        Ok(subscription.clone())
    }
}
