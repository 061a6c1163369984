pub mod handlers;
pub mod hashing;
pub mod middleware;

pub use hashing::{Argon2Hashing, HashingError, PasswordHashing};
