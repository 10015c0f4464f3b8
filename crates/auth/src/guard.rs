//! Access guard: role, tenant-scoping, and quota checks over a resolved context.
//!
//! - No IO beyond directory reads
//! - No panics
//! - No business logic (pure policy checks)

use notably_core::Role;

use crate::context::RequestContext;
use crate::directory::Directory;
use crate::error::AuthError;

/// Fail unless the context user holds the given role.
pub fn require_role(ctx: &RequestContext, role: Role) -> Result<(), AuthError> {
    if ctx.user.role == role {
        Ok(())
    } else {
        Err(AuthError::Forbidden(format!("{role} role required")))
    }
}

/// Fail unless the context tenant is the one being targeted.
///
/// Denies even for admins: an admin of tenant A must not mutate tenant B by
/// supplying B's slug in the request path.
pub fn require_own_tenant(ctx: &RequestContext, target_slug: &str) -> Result<(), AuthError> {
    if ctx.tenant.slug == target_slug {
        Ok(())
    } else {
        Err(AuthError::Forbidden("cross-tenant access".to_string()))
    }
}

/// May a note creation proceed under the tenant's plan?
///
/// Advisory: this answers the question but does not reserve a slot. The
/// store's create path re-checks under its write lock, which closes the
/// check-then-act window between two simultaneous creations.
pub fn check_quota<D: Directory>(ctx: &RequestContext, directory: &D) -> Result<(), AuthError> {
    let Some(limit) = ctx.tenant.effective_limit() else {
        return Ok(());
    };

    let count = directory
        .tenant_usage(&ctx.tenant.slug)
        .map(|u| u.notes_count)
        .unwrap_or(0);

    if count >= limit {
        Err(AuthError::QuotaExceeded)
    } else {
        Ok(())
    }
}
