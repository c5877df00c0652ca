//! Business services and the collaborator interfaces they depend on.

pub mod account;
pub mod auth;
pub mod media;
pub mod password;
pub mod token;

pub use account::{AccountService, UpdateDetailsInput};
pub use auth::{AuthService, ChangePasswordInput, LoginInput, RegisterInput};
pub use media::{MediaStore, UploadedMedia};
pub use password::{BcryptPasswordHasher, PasswordHasher};
pub use token::{TokenIssuer, TokenIssuerConfig};
