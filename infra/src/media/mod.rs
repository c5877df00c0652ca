//! Media upload backends implementing `vt_core`'s `MediaStore`

mod cloudinary;
mod memory;

pub use cloudinary::CloudinaryMediaStore;
pub use memory::InMemoryMediaStore;
