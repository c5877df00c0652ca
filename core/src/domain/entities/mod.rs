//! Domain entities representing core business objects.

pub mod account;
pub mod channel;
pub mod session;
pub mod token;

pub use account::{
    normalize_email, normalize_username, Account, AccountUpdate, AccountView, NewAccount,
};
pub use channel::{
    ChannelProfile, Subscription, SubscriptionStatus, Video, VideoOwner, WatchHistoryEntry,
};
pub use session::SessionState;
pub use token::{AccessClaims, RefreshClaims};

#[cfg(test)]
#[path = "tests/account_tests.rs"]
mod account_tests;
