//! Directory seam: the authorization layer's only data dependency.

use std::sync::Arc;

use notably_core::{Tenant, TenantUsage, User};

/// Read-side lookups the resolver and guard need.
///
/// Absence is communicated as `None`, never as an error; callers decide the
/// boundary status. Implementations must re-resolve fresh state per call so
/// role and plan changes take effect without token revocation.
pub trait Directory: Send + Sync {
    fn user_by_email(&self, email: &str) -> Option<User>;
    fn tenant_by_slug(&self, slug: &str) -> Option<Tenant>;
    fn tenant_usage(&self, slug: &str) -> Option<TenantUsage>;
}

impl<S> Directory for Arc<S>
where
    S: Directory + ?Sized,
{
    fn user_by_email(&self, email: &str) -> Option<User> {
        (**self).user_by_email(email)
    }

    fn tenant_by_slug(&self, slug: &str) -> Option<Tenant> {
        (**self).tenant_by_slug(slug)
    }

    fn tenant_usage(&self, slug: &str) -> Option<TenantUsage> {
        (**self).tenant_usage(slug)
    }
}
