//! Profile and channel operations for an authenticated account

use std::path::Path;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use vt_shared::validation::{validators, FieldErrors};

use crate::domain::entities::{
    normalize_email, normalize_username, Account, AccountUpdate, AccountView, ChannelProfile,
    SubscriptionStatus, WatchHistoryEntry,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ChannelRepository};
use crate::services::media::MediaStore;

/// Which image an upload replaces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageSlot {
    Avatar,
    Cover,
}

impl ImageSlot {
    fn label(self) -> &'static str {
        match self {
            ImageSlot::Avatar => "Avatar",
            ImageSlot::Cover => "Cover image",
        }
    }
}

pub struct AccountService<A, C, M>
where
    A: AccountRepository,
    C: ChannelRepository,
    M: MediaStore,
{
    accounts: Arc<A>,
    channels: Arc<C>,
    media: Arc<M>,
}

impl<A, C, M> AccountService<A, C, M>
where
    A: AccountRepository,
    C: ChannelRepository,
    M: MediaStore,
{
    pub fn new(accounts: Arc<A>, channels: Arc<C>, media: Arc<M>) -> Self {
        Self {
            accounts,
            channels,
            media,
        }
    }

    pub async fn current_account(&self, account_id: Uuid) -> DomainResult<AccountView> {
        Ok(self.find_account(account_id).await?.view())
    }

    /// Update display name and email. Both are required; the email must not
    /// belong to another account.
    pub async fn update_account_details(
        &self,
        account_id: Uuid,
        input: super::UpdateDetailsInput,
    ) -> DomainResult<AccountView> {
        let mut missing = FieldErrors::new();
        missing.require("fullName", &input.full_name);
        missing.require("email", &input.email);
        if !missing.is_empty() {
            return Err(DomainError::invalid_fields(
                "All fields are required",
                missing.to_messages(),
            ));
        }
        if !validators::is_valid_email(&input.email) {
            return Err(DomainError::validation("Email is invalid"));
        }

        let email = normalize_email(&input.email);
        if let Some(owner) = self
            .accounts
            .find_by_email_or_username(Some(&email), None)
            .await?
        {
            if owner.id != account_id {
                return Err(DomainError::conflict("Email is already in use"));
            }
        }

        let account = self
            .accounts
            .update_fields(
                account_id,
                AccountUpdate {
                    full_name: Some(input.full_name.trim().to_string()),
                    email: Some(email),
                    ..Default::default()
                },
            )
            .await?;

        info!(account_id = %account_id, "Account details updated");
        Ok(account.view())
    }

    /// Upload a new avatar and store its URL
    pub async fn update_avatar(
        &self,
        account_id: Uuid,
        local_path: Option<&Path>,
    ) -> DomainResult<AccountView> {
        self.replace_image(account_id, local_path, ImageSlot::Avatar)
            .await
    }

    /// Upload a new cover image and store its URL
    pub async fn update_cover_image(
        &self,
        account_id: Uuid,
        local_path: Option<&Path>,
    ) -> DomainResult<AccountView> {
        self.replace_image(account_id, local_path, ImageSlot::Cover)
            .await
    }

    /// Profile of `username`'s channel from the viewer's point of view
    pub async fn channel_profile(
        &self,
        username: &str,
        viewer: Option<Uuid>,
    ) -> DomainResult<ChannelProfile> {
        if !validators::not_empty(username) {
            return Err(DomainError::validation("Username is missing"));
        }
        self.channels
            .channel_profile(&normalize_username(username), viewer)
            .await?
            .ok_or_else(|| DomainError::not_found("Channel"))
    }

    pub async fn watch_history(&self, account_id: Uuid) -> DomainResult<Vec<WatchHistoryEntry>> {
        self.find_account(account_id).await?;
        self.channels.watch_history(account_id).await
    }

    /// Subscribe to or unsubscribe from a channel; returns the refreshed
    /// profile as seen by the subscriber.
    pub async fn set_subscription(
        &self,
        subscriber_id: Uuid,
        channel_username: &str,
        subscribed: bool,
    ) -> DomainResult<ChannelProfile> {
        if !validators::not_empty(channel_username) {
            return Err(DomainError::validation("Username is missing"));
        }
        let username = normalize_username(channel_username);
        let channel = self
            .accounts
            .find_by_email_or_username(None, Some(&username))
            .await?
            .ok_or_else(|| DomainError::not_found("Channel"))?;
        if channel.id == subscriber_id {
            return Err(DomainError::validation(
                "You cannot subscribe to your own channel",
            ));
        }

        let status = SubscriptionStatus::from(subscribed);
        self.channels
            .set_subscription(subscriber_id, channel.id, status)
            .await?;
        info!(
            subscriber_id = %subscriber_id,
            channel_id = %channel.id,
            status = status.as_str(),
            "Subscription updated"
        );

        self.channel_profile(&username, Some(subscriber_id)).await
    }

    async fn replace_image(
        &self,
        account_id: Uuid,
        local_path: Option<&Path>,
        slot: ImageSlot,
    ) -> DomainResult<AccountView> {
        let local_path = local_path
            .filter(|path| !path.as_os_str().is_empty())
            .ok_or_else(|| DomainError::validation(format!("{} file is missing", slot.label())))?;

        // Checked before uploading so a missing account leaves no orphan file
        self.find_account(account_id).await?;

        let uploaded = self.media.upload(local_path).await.ok_or_else(|| {
            DomainError::internal(format!("{} upload failed", slot.label().to_lowercase()))
        })?;

        let update = match slot {
            ImageSlot::Avatar => AccountUpdate {
                avatar_url: Some(uploaded.url),
                ..Default::default()
            },
            ImageSlot::Cover => AccountUpdate {
                cover_image_url: Some(uploaded.url),
                ..Default::default()
            },
        };
        let account = self.accounts.update_fields(account_id, update).await?;

        info!(account_id = %account_id, image = slot.label(), "Image updated");
        Ok(account.view())
    }

    async fn find_account(&self, account_id: Uuid) -> DomainResult<Account> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))
    }
}
