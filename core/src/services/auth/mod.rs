//! Credential authentication seam
//!
//! Credential storage and password checking live outside this crate; the
//! token service only consumes the `CredentialAuthenticator` contract.

mod traits;

pub use traits::CredentialAuthenticator;
