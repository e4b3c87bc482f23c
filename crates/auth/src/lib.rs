//! `stockroom-auth`: bearer-token authentication and permission checks.
//!
//! Decoupled from HTTP and storage: the API layer extracts the token and asks
//! this crate who the caller is and what they may do.

pub mod authorize;
pub mod claims;
pub mod jwt;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{authorize, AuthzError, CommandAuthorization, Principal};
pub use claims::{JwtClaims, TokenValidationError, validate_claims};
pub use jwt::{Hs256JwtValidator, JwtError, JwtValidator};
pub use permissions::Permission;
pub use principal::PrincipalId;
pub use roles::Role;
