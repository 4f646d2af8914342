//! Test fixtures
//!
//! Tokens, seeded profiles and typed views of API responses.

use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Deserialize;
use vivah_common::Claims;
use vivah_core::{ContactDetails, Profile, ProfileBasics, UserId};

pub const TEST_SECRET: &str = "integration-test-secret-long-enough";

/// Bearer token for `user`, valid for fifteen minutes
pub fn mint_token(user: &str, secret: &str) -> String {
    mint_claims(&Claims::for_user(&UserId::new(user), 900), secret)
}

pub fn mint_claims(claims: &Claims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap_or_default()
}

/// A complete profile whose display name is the id, capitalized
pub fn profile(id: &str) -> Profile {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Profile {
        user_id: UserId::new(id),
        basics: ProfileBasics {
            name,
            age: Some(29),
            photos: vec![format!("https://img.vivah.test/{id}.jpg")],
            bio: Some("Family-oriented, loves travel".to_string()),
            location: Some("Jaipur".to_string()),
            profession: Some("Architect".to_string()),
        },
        contact: ContactDetails {
            phone: Some("9123456789".to_string()),
            email: Some(format!("{id}@mail.in")),
        },
    }
}

/// `{"data": ...}` wrapper
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct LikeBody {
    pub like_id: String,
    pub liker_id: String,
    pub liked_id: String,
    pub status: String,
    pub acknowledgement: String,
    #[serde(rename = "match")]
    pub matched: Option<MatchBody>,
    pub notifications_pending: bool,
}

#[derive(Debug, Deserialize)]
pub struct MatchBody {
    pub id: String,
    pub user_a_id: String,
    pub user_b_id: String,
    pub created: bool,
}

#[derive(Debug, Deserialize)]
pub struct NotificationBody {
    pub id: String,
    pub kind: String,
    pub source_id: String,
    pub other: OtherParty,
    pub read: bool,
}

#[derive(Debug, Deserialize)]
pub struct OtherParty {
    pub user_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub retryable: bool,
}
