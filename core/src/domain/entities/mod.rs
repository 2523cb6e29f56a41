//! Domain entities representing core business objects.

pub mod principal;
pub mod token;


// Re-export commonly used types
pub use principal::Principal;
pub use token::{Claims, CLAIM_EXPIRATION, CLAIM_ISSUED_AT, CLAIM_SUBJECT};
