//! Main token service implementation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use auth_shared::config::JwtConfig;
use auth_shared::errors::ConfigError;

use crate::domain::entities::token::{CLAIM_EXPIRATION, CLAIM_SUBJECT};
use crate::domain::entities::{Claims, Principal};
use crate::domain::value_objects::{AuthContext, IssuedToken};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::services::auth::CredentialAuthenticator;

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Service for authenticating principals and managing their JWTs
///
/// Holds only immutable keys and configuration; every operation takes
/// `&self` and may run concurrently from any number of callers.
pub struct TokenService<A, C = SystemClock> {
    authenticator: A,
    clock: C,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<A: CredentialAuthenticator> TokenService<A> {
    /// Creates a new token service instance on the system clock
    ///
    /// # Arguments
    ///
    /// * `authenticator` - Credential authenticator used by `authenticate`
    /// * `config` - Validated token service configuration
    pub fn new(authenticator: A, config: TokenServiceConfig) -> Self {
        Self::with_clock(authenticator, config, SystemClock)
    }

    /// Creates a token service from the shared JWT settings
    ///
    /// # Returns
    ///
    /// * `Ok(TokenService)` - Configuration accepted
    /// * `Err(ConfigError)` - Empty secret or expiration out of range
    pub fn from_jwt_config(authenticator: A, jwt: &JwtConfig) -> Result<Self, ConfigError> {
        let config = TokenServiceConfig::from_jwt_config(jwt)?;
        Ok(Self::new(authenticator, config))
    }
}

impl<A, C: Clock> TokenService<A, C> {
    /// Creates a token service that reads time from `clock`
    pub fn with_clock(authenticator: A, config: TokenServiceConfig, clock: C) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret());
        let decoding_key = DecodingKey::from_secret(config.secret());

        // Expiry is evaluated against our own clock so that an expired token
        // decodes successfully and validates to `false`.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&[CLAIM_SUBJECT, CLAIM_EXPIRATION]);

        Self {
            authenticator,
            clock,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Generates a signed token for a principal
    ///
    /// The payload carries `sub` (the username), `iat` (now) and `exp`
    /// (now plus the configured validity) with no other claims.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - Compact three-segment JWT
    /// * `Err(TokenError)` - The encoder failed
    pub fn generate_token(&self, principal: &Principal) -> Result<String, TokenError> {
        self.sign_for(principal).map(|(token, _)| token)
    }

    /// Generates a token and packages it for a login response
    pub fn issue_token(&self, principal: &Principal) -> Result<IssuedToken, TokenError> {
        let (token, claims) = self.sign_for(principal)?;
        let issued_at = claims.issued_at().ok_or(TokenError::TokenGenerationFailed)?;
        let expires_at = claims.expires_at().ok_or(TokenError::TokenGenerationFailed)?;

        Ok(IssuedToken {
            token,
            token_type: self.config.token_head().to_string(),
            issued_at,
            expires_at,
            expires_in: claims.lifetime_seconds(),
        })
    }

    /// Checks that a token belongs to `principal` and has not expired
    ///
    /// # Arguments
    ///
    /// * `token` - The compact JWT presented by the client
    /// * `principal` - The identity the token is expected to assert
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - Signature verifies, subject matches and `exp` is after now
    /// * `Ok(false)` - Intact token, but expired or issued to someone else
    /// * `Err(TokenError)` - Tampered, wrongly signed or malformed token
    pub fn validate_token(&self, token: &str, principal: &Principal) -> Result<bool, TokenError> {
        let claims = self.extract_claims(token)?;
        let subject_matches = principal.matches_subject(&claims.sub);
        let expired = claims.is_expired_at(self.clock.now());

        tracing::debug!(
            subject = %claims.sub,
            expected = %principal.username(),
            subject_matches,
            expired,
            "validated token"
        );
        Ok(subject_matches && !expired)
    }

    /// Decodes a token and returns its subject
    pub fn extract_username(&self, token: &str) -> Result<String, TokenError> {
        self.extract_claims(token).map(|claims| claims.sub)
    }

    /// Decodes a token and returns its expiration instant
    pub fn extract_expiration(&self, token: &str) -> Result<DateTime<Utc>, TokenError> {
        self.extract_claims(token)?
            .expires_at()
            .ok_or(TokenError::InvalidClaims)
    }

    /// Whether a structurally valid token has reached its expiration
    pub fn is_token_expired(&self, token: &str) -> Result<bool, TokenError> {
        let claims = self.extract_claims(token)?;
        Ok(claims.is_expired_at(self.clock.now()))
    }

    /// Time left before a token expires; zero once expired
    pub fn remaining_validity(&self, token: &str) -> Result<Duration, TokenError> {
        let expires_at = self.extract_expiration(token)?;
        Ok((expires_at - self.clock.now()).max(Duration::zero()))
    }

    /// Decodes a token, verifies its signature and returns all claims
    ///
    /// Expiration is not checked here.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature verified and `sub`/`exp` present
    /// * `Err(TokenError)` - Decode failure; see `TokenError::is_decode_failure`
    pub fn extract_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = map_decode_error(e.kind());
                tracing::warn!(error = %error, "rejected token");
                error
            })
    }

    /// Builds fresh claims for `principal` and signs them
    fn sign_for(&self, principal: &Principal) -> Result<(String, Claims), TokenError> {
        let claims = Claims::new(
            principal.username(),
            self.clock.now(),
            self.config.validity_seconds(),
        )
        .ok_or_else(|| {
            tracing::error!("token expiration is outside the representable date range");
            TokenError::TokenGenerationFailed
        })?;
        let token = self.encode_jwt(&claims)?;

        tracing::debug!(subject = %claims.sub, exp = claims.exp, "issued token");
        Ok((token, claims))
    }

    /// Encodes claims into a JWT
    fn encode_jwt(&self, claims: &Claims) -> Result<String, TokenError> {
        let header = Header::new(ALGORITHM);
        encode(&header, claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "failed to encode token");
            TokenError::TokenGenerationFailed
        })
    }
}

impl<A: CredentialAuthenticator, C: Clock> TokenService<A, C> {
    /// Authenticates a username/password pair
    ///
    /// The returned context is the authenticated identity for the current
    /// request; pass it on to whatever needs to know who the caller is.
    ///
    /// # Returns
    ///
    /// * `Ok(AuthContext)` - Credentials accepted
    /// * `Err(AuthError)` - Rejected by the authenticator, propagated as is
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<AuthContext, AuthError> {
        match self.authenticator.verify(username, password).await {
            Ok(principal) => {
                tracing::debug!(username = %principal.username(), "authenticated principal");
                Ok(AuthContext::new(principal, self.clock.now()))
            }
            Err(e) => {
                tracing::debug!(error = %e, "authentication failed");
                Err(e)
            }
        }
    }

    /// Authenticates and issues a token in one step
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(AuthContext, IssuedToken), DomainError> {
        let context = self.authenticate(username, password).await?;
        let issued = self.issue_token(context.principal())?;
        Ok((context, issued))
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim {
            claim: claim.clone(),
        },
        ErrorKind::Json(_) => TokenError::InvalidClaims,
        _ => TokenError::InvalidTokenFormat,
    }
}
