//! Password hashing and token tests

use innsync_domain::ports::{PasswordHasher, Tokenizer};
use innsync_domain::{Error, User};
use innsync_infrastructure::config::AuthConfig;
use innsync_infrastructure::crypto::{Argon2PasswordHasher, JwtTokenizer};
use std::time::Duration;

fn user() -> User {
    User {
        id: 7,
        username: "ana".to_string(),
        password: String::new(),
        role: "admin".to_string(),
    }
}

#[test]
fn test_hash_and_verify() {
    let hasher = Argon2PasswordHasher::new();
    let hash = hasher.hash("secret").unwrap();

    assert_ne!(hash, "secret");
    assert!(hash.starts_with("$argon2"));
    assert!(hasher.verify("secret", &hash).unwrap());
    assert!(!hasher.verify("Secret", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let hasher = Argon2PasswordHasher::new();
    assert_ne!(hasher.hash("secret").unwrap(), hasher.hash("secret").unwrap());
}

#[test]
fn test_malformed_hash_is_an_authentication_error() {
    let hasher = Argon2PasswordHasher::new();
    let err = hasher.verify("secret", "not-a-hash").unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
}

#[test]
fn test_issued_token_carries_user_claims() {
    let tokenizer = JwtTokenizer::from_config(&AuthConfig::default());

    let token = tokenizer.issue(&user()).unwrap();
    let claims = tokenizer.validate(&token).unwrap();

    assert_eq!(claims.sub, "7");
    assert_eq!(claims.username, "ana");
    assert_eq!(claims.role, "admin");
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
}

#[test]
fn test_token_from_other_key_is_rejected() {
    let issuer = JwtTokenizer::new("first-secret", Duration::from_secs(60));
    let verifier = JwtTokenizer::new("second-secret", Duration::from_secs(60));

    let token = issuer.issue(&user()).unwrap();
    let err = verifier.validate(&token).unwrap_err();

    assert!(matches!(err, Error::Authentication { .. }));
}
