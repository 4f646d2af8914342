//! Verification of tokens issued by the external auth provider

mod jwt;

pub use jwt::{Claims, TokenVerifier};
