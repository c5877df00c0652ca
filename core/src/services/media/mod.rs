//! Media storage interface used for avatars and cover images.

mod traits;

#[cfg(test)]
pub mod mock;

pub use traits::{MediaStore, UploadedMedia};

#[cfg(test)]
pub use mock::MockMediaStore;
