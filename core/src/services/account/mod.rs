//! Account service module: current account, profile edits, images,
//! channel profile, subscriptions and watch history.

mod input;
mod service;

#[cfg(test)]
mod tests;

pub use input::UpdateDetailsInput;
pub use service::AccountService;
