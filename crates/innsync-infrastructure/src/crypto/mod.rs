//! Password hashing and login tokens
//!
//! Implementations of the domain's `PasswordHasher` and `Tokenizer` ports.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtTokenizer};
pub use password::Argon2PasswordHasher;
