//! Password hashing behind a trait, with helpers that keep the work off the
//! request workers.

mod hasher;

pub use hasher::{
    hash_password, verify_password, BcryptPasswordHasher, PasswordHasher, DEFAULT_BCRYPT_COST,
};
