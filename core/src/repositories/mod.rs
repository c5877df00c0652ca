//! Repository interfaces implemented by the infrastructure layer.

pub mod account;
pub mod channel;
pub mod session;

pub use account::AccountRepository;
pub use channel::ChannelRepository;
pub use session::SessionRegistry;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use channel::MockChannelRepository;
#[cfg(test)]
pub use session::MockSessionRegistry;
