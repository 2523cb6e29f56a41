//! Unit tests for token service

use std::io;
use std::sync::{Arc, Mutex};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::entities::Principal;
use crate::errors::{AuthError, DomainError, TokenError};
use crate::services::token::{Clock, ManualClock, TokenService, TokenServiceConfig};

use super::mocks::MockAuthenticator;

const SECRET: &str = "unit-test-secret";

fn start_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap()
}

fn create_test_service(
    validity_seconds: i64,
) -> (TokenService<MockAuthenticator, Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(start_time()));
    let config = TokenServiceConfig::new(SECRET, validity_seconds).expect("valid config");
    let service = TokenService::with_clock(MockAuthenticator::new(), config, Arc::clone(&clock));
    (service, clock)
}

fn decode_segment(segment: &str) -> Value {
    let bytes = URL_SAFE_NO_PAD.decode(segment).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[test]
fn test_generate_token_layout() {
    let (service, _) = create_test_service(3600);
    let token = service.generate_token(&Principal::new("alice")).unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);

    let header = decode_segment(segments[0]);
    assert_eq!(header["alg"], "HS256");
    assert_eq!(header["typ"], "JWT");

    let payload = decode_segment(segments[1]);
    let iat = start_time().timestamp();
    assert_eq!(payload, json!({ "sub": "alice", "iat": iat, "exp": iat + 3600 }));
}

#[test]
fn test_generated_token_validates_for_its_principal() {
    let (service, _) = create_test_service(3600);
    let alice = Principal::new("alice");
    let token = service.generate_token(&alice).unwrap();

    assert_eq!(service.validate_token(&token, &alice), Ok(true));
    assert_eq!(service.extract_username(&token).unwrap(), "alice");
    assert_eq!(
        service.extract_expiration(&token).unwrap(),
        start_time() + Duration::seconds(3600)
    );
    assert_eq!(service.is_token_expired(&token), Ok(false));
}

#[test]
fn test_validate_token_subject_mismatch_is_false() {
    let (service, _) = create_test_service(3600);
    let token = service.generate_token(&Principal::new("alice")).unwrap();

    assert_eq!(service.validate_token(&token, &Principal::new("bob")), Ok(false));
}

#[test]
fn test_expiry_boundary_is_strict() {
    let (service, clock) = create_test_service(60);
    let alice = Principal::new("alice");
    let token = service.generate_token(&alice).unwrap();

    clock.advance(Duration::seconds(59));
    assert_eq!(service.validate_token(&token, &alice), Ok(true));

    clock.advance(Duration::seconds(1));
    assert_eq!(service.validate_token(&token, &alice), Ok(false));
    assert_eq!(service.is_token_expired(&token), Ok(true));
}

#[test]
fn test_expired_token_still_decodes() {
    let (service, clock) = create_test_service(60);
    let token = service.generate_token(&Principal::new("alice")).unwrap();

    clock.advance(Duration::hours(2));
    assert_eq!(service.extract_username(&token).unwrap(), "alice");
    assert!(service.extract_expiration(&token).unwrap() < clock.now());
}

#[test]
fn test_remaining_validity() {
    let (service, clock) = create_test_service(600);
    let token = service.generate_token(&Principal::new("alice")).unwrap();

    clock.advance(Duration::seconds(100));
    assert_eq!(service.remaining_validity(&token), Ok(Duration::seconds(500)));

    clock.advance(Duration::seconds(1000));
    assert_eq!(service.remaining_validity(&token), Ok(Duration::zero()));
}

#[test]
fn test_wrong_key_is_decode_error() {
    let (service, _) = create_test_service(3600);
    let alice = Principal::new("alice");
    let token = service.generate_token(&alice).unwrap();

    let other = TokenService::new(
        MockAuthenticator::new(),
        TokenServiceConfig::new("a-different-secret", 3600).unwrap(),
    );
    assert_eq!(other.extract_username(&token), Err(TokenError::InvalidSignature));
    assert_eq!(other.validate_token(&token, &alice), Err(TokenError::InvalidSignature));
}

#[test]
fn test_payload_swapped_without_resigning() {
    let (service, _) = create_test_service(3600);
    let token = service.generate_token(&Principal::new("alice")).unwrap();
    let segments: Vec<&str> = token.split('.').collect();

    let mut payload = decode_segment(segments[1]);
    payload["sub"] = json!("mallory");
    let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());
    let forged = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);

    let result = service.validate_token(&forged, &Principal::new("mallory"));
    assert_eq!(result, Err(TokenError::InvalidSignature));
}

#[test]
fn test_truncated_and_garbage_tokens() {
    let (service, _) = create_test_service(3600);
    let alice = Principal::new("alice");
    let token = service.generate_token(&alice).unwrap();

    let truncated = &token[..token.rfind('.').unwrap()];
    let err = service.validate_token(truncated, &alice).unwrap_err();
    assert_eq!(err, TokenError::InvalidTokenFormat);

    for garbage in ["", "invalid_token", "a.b.c", "...."] {
        let err = service.extract_username(garbage).unwrap_err();
        assert!(err.is_decode_failure(), "{garbage:?} gave {err:?}");
    }
}

#[test]
fn test_missing_subject_is_decode_error() {
    let (service, _) = create_test_service(3600);
    let claims = json!({ "iat": 1, "exp": 4_000_000_000i64 });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        service.extract_username(&token),
        Err(TokenError::MissingClaim {
            claim: "sub".to_string()
        })
    );
}

#[test]
fn test_missing_expiration_is_decode_error() {
    let (service, _) = create_test_service(3600);
    let claims = json!({ "sub": "alice", "iat": 1 });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    assert_eq!(
        service.validate_token(&token, &Principal::new("alice")),
        Err(TokenError::MissingClaim {
            claim: "exp".to_string()
        })
    );
}

#[test]
fn test_foreign_algorithm_rejected() {
    let (service, _) = create_test_service(3600);
    let claims = json!({ "sub": "alice", "iat": 1, "exp": 4_000_000_000i64 });
    let token = encode(
        &Header::new(jsonwebtoken::Algorithm::HS512),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let err = service.extract_username(&token).unwrap_err();
    assert!(err.is_decode_failure());
}

#[test]
fn test_issue_token_metadata() {
    let (service, _) = create_test_service(900);
    let issued = service.issue_token(&Principal::new("alice")).unwrap();

    assert_eq!(issued.token_type, "Bearer ");
    assert_eq!(issued.issued_at, start_time());
    assert_eq!(issued.expires_at, start_time() + Duration::seconds(900));
    assert_eq!(issued.expires_in, 900);
    assert_eq!(issued.authorization_value(), format!("Bearer {}", issued.token));
    assert_eq!(service.extract_username(&issued.token).unwrap(), "alice");
}

#[test]
fn test_generation_past_date_range_fails_without_panicking() {
    let clock = Arc::new(ManualClock::new(chrono::DateTime::<Utc>::MAX_UTC));
    let service = TokenService::with_clock(
        MockAuthenticator::new(),
        TokenServiceConfig::new(SECRET, 3600).unwrap(),
        Arc::clone(&clock),
    );
    let alice = Principal::new("alice");

    assert_eq!(
        service.generate_token(&alice).unwrap_err(),
        TokenError::TokenGenerationFailed
    );
    assert_eq!(
        service.issue_token(&alice).unwrap_err(),
        TokenError::TokenGenerationFailed
    );

    clock.set(start_time());
    assert!(service.generate_token(&alice).is_ok());
}

#[tokio::test]
async fn test_authenticate_success_returns_context() {
    let clock = Arc::new(ManualClock::new(start_time()));
    let authenticator = MockAuthenticator::new().with_user("alice", "wonderland").await;
    let service = TokenService::with_clock(
        authenticator,
        TokenServiceConfig::new(SECRET, 3600).unwrap(),
        clock,
    );

    let context = service.authenticate("alice", "wonderland").await.unwrap();
    assert_eq!(context.username(), "alice");
    assert_eq!(context.authenticated_at(), start_time());
    assert_eq!(
        context.principal().attributes.get("source"),
        Some(&json!("mock"))
    );
}

#[tokio::test]
async fn test_authenticate_failures_propagate_without_retry() {
    let authenticator = MockAuthenticator::new()
        .with_user("alice", "wonderland")
        .await
        .with_disabled_user("carol", "secret")
        .await;
    let service = TokenService::new(authenticator, TokenServiceConfig::new(SECRET, 3600).unwrap());

    assert_eq!(
        service.authenticate("alice", "wrong").await.unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        service.authenticate("nobody", "x").await.unwrap_err(),
        AuthError::UserNotFound
    );
    assert_eq!(
        service.authenticate("carol", "secret").await.unwrap_err(),
        AuthError::AccountDisabled
    );
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[tokio::test]
async fn test_rejected_username_is_not_logged() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let authenticator = MockAuthenticator::new().with_user("alice", "wonderland").await;
    let service = TokenService::new(authenticator, TokenServiceConfig::new(SECRET, 3600).unwrap());

    let err = service
        .authenticate("<script>mallory</script>", "guess")
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::UserNotFound);

    let output = logs.contents();
    assert!(output.contains("authentication failed"));
    assert!(!output.contains("mallory"));
    assert!(!output.contains("WARN"));
}

#[tokio::test]
async fn test_provider_failure_is_not_retried() {
    let authenticator = Arc::new(MockAuthenticator::unavailable());
    let service = TokenService::new(
        Arc::clone(&authenticator),
        TokenServiceConfig::new(SECRET, 3600).unwrap(),
    );

    let err = service.authenticate("alice", "wonderland").await.unwrap_err();
    assert!(matches!(err, AuthError::ProviderUnavailable { .. }));
    assert_eq!(authenticator.call_count(), 1);
}

#[tokio::test]
async fn test_login_authenticates_then_issues() {
    let authenticator = MockAuthenticator::new().with_user("alice", "wonderland").await;
    let service = TokenService::new(authenticator, TokenServiceConfig::new(SECRET, 3600).unwrap());

    let (context, issued) = service.login("alice", "wonderland").await.unwrap();
    assert_eq!(
        service.validate_token(&issued.token, context.principal()),
        Ok(true)
    );

    let err = service.login("alice", "nope").await.unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::InvalidCredentials)));
}
