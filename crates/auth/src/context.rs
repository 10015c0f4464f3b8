//! Per-request authenticated context.

use notably_core::{Tenant, User};

use crate::token::ClaimSet;

/// The resolved (user, tenant, claims) bundle for one authenticated request.
///
/// Constructed only by the resolver, which guarantees
/// `user.tenant_slug == tenant.slug`; cross-tenant binding is impossible by
/// construction. Consumed and discarded within the request — never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user: User,
    pub tenant: Tenant,
    pub claims: ClaimSet,
}
