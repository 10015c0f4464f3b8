//! `notably-auth` — authentication/authorization boundary for the notes API.
//!
//! This crate is intentionally decoupled from HTTP and storage: the token
//! codec works on strings and clocks, and the resolver/guard reach data only
//! through the [`Directory`] seam.

pub mod context;
pub mod directory;
pub mod error;
pub mod guard;
pub mod resolver;
pub mod token;

pub use context::RequestContext;
pub use directory::Directory;
pub use error::AuthError;
pub use guard::{check_quota, require_own_tenant, require_role};
pub use resolver::ContextResolver;
pub use token::{ClaimSet, SessionClaims, TokenCodec, TokenError, DEFAULT_TTL_SECS};
