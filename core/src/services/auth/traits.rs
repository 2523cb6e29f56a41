//! Trait for credential authenticator integration

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::Principal;
use crate::errors::AuthError;

/// Verifies a username/password pair and resolves the principal behind it
///
/// Implementations may be remote (a directory service, another API); callers
/// are free to wrap calls in their own timeout.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use auth_core::domain::entities::Principal;
/// use auth_core::errors::AuthError;
/// use auth_core::services::CredentialAuthenticator;
///
/// struct DirectoryAuthenticator;
///
/// #[async_trait]
/// impl CredentialAuthenticator for DirectoryAuthenticator {
///     async fn verify(&self, _username: &str, _password: &str) -> Result<Principal, AuthError> {
///         // Look the user up and check the password here
///         Err(AuthError::InvalidCredentials)
///     }
/// }
/// ```
#[async_trait]
pub trait CredentialAuthenticator: Send + Sync {
    /// Verify credentials
    ///
    /// # Returns
    /// * `Ok(Principal)` - Credentials accepted
    /// * `Err(AuthError)` - Wrong password, unknown user, disabled account or
    ///   provider failure
    async fn verify(&self, username: &str, password: &str) -> Result<Principal, AuthError>;
}

#[async_trait]
impl<T> CredentialAuthenticator for Arc<T>
where
    T: CredentialAuthenticator + ?Sized,
{
    async fn verify(&self, username: &str, password: &str) -> Result<Principal, AuthError> {
        (**self).verify(username, password).await
    }
}
