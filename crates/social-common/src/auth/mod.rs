//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TokenKind, TokenPair};
pub use password::{hash_password, verify_password, MIN_PASSWORD_LEN};
