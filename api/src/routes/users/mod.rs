//! `/api/v1/users` handlers
//!
//! - `session` - register, login, refresh, logout, password change
//! - `account` - current user, profile details, avatar and cover image
//! - `channel` - channel profiles, subscriptions, watch history

mod account;
mod channel;
mod session;

pub use account::{current_user, update_account, update_avatar, update_cover_image};
pub use channel::{channel_profile, set_subscription, watch_history};
pub use session::{change_password, login, logout, refresh_token, register};
