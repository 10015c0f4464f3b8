//! Context resolution: `Authorization` header → authenticated request context.

use chrono::{DateTime, Utc};

use crate::context::RequestContext;
use crate::directory::Directory;
use crate::error::AuthError;
use crate::token::TokenCodec;

/// Resolves bearer credentials against the directory.
///
/// The directory is an explicit handle passed in at construction; there is no
/// ambient global state. Resolution is a pure, synchronous computation over
/// (header, clock, directory) with no suspension points.
pub struct ContextResolver<D> {
    codec: TokenCodec,
    directory: D,
}

impl<D: Directory> ContextResolver<D> {
    pub fn new(codec: TokenCodec, directory: D) -> Self {
        Self { codec, directory }
    }

    /// Resolve a raw `Authorization` header value at the given instant.
    ///
    /// All decode failures and lookup misses collapse into
    /// [`AuthError::InvalidToken`]: stale or forged claims are treated
    /// identically to bad signatures, so the boundary maps both to 401.
    pub fn resolve_at(
        &self,
        header: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<RequestContext, AuthError> {
        let token = header.and_then(extract_bearer).ok_or(AuthError::Missing)?;

        let claims = self.codec.decode_at(token, now).map_err(|err| {
            tracing::debug!(%err, "token rejected");
            AuthError::InvalidToken
        })?;

        let user = self
            .directory
            .user_by_email(&claims.email)
            .ok_or(AuthError::InvalidToken)?;
        let tenant = self
            .directory
            .tenant_by_slug(&claims.tenant_slug)
            .ok_or(AuthError::InvalidToken)?;

        // The context must bind a user to its own tenant; a signed token whose
        // subjects have since diverged is treated like a forged one.
        if user.tenant_slug != tenant.slug {
            return Err(AuthError::InvalidToken);
        }

        Ok(RequestContext {
            user,
            tenant,
            claims,
        })
    }

    pub fn resolve(&self, header: Option<&str>) -> Result<RequestContext, AuthError> {
        self.resolve_at(header, Utc::now())
    }
}

/// Accept exactly the two-token `Bearer <token>` form.
fn extract_bearer(value: &str) -> Option<&str> {
    let mut words = value.split(' ');
    match (words.next(), words.next(), words.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashMap;

    use notably_core::{Plan, Role, Tenant, TenantUsage, User};

    use crate::token::SessionClaims;

    struct FakeDirectory {
        users: HashMap<String, User>,
        tenants: HashMap<String, Tenant>,
    }

    impl FakeDirectory {
        fn seeded() -> Self {
            let mut users = HashMap::new();
            users.insert(
                "admin@acme.test".to_string(),
                User {
                    id: "1".to_string(),
                    email: "admin@acme.test".to_string(),
                    role: Role::Admin,
                    tenant_slug: "acme".to_string(),
                },
            );
            let mut tenants = HashMap::new();
            tenants.insert(
                "acme".to_string(),
                Tenant {
                    id: "acme".to_string(),
                    name: "Acme Corporation".to_string(),
                    slug: "acme".to_string(),
                    plan: Plan::Free,
                    notes_limit: Some(3),
                },
            );
            tenants.insert(
                "globex".to_string(),
                Tenant {
                    id: "globex".to_string(),
                    name: "Globex Corporation".to_string(),
                    slug: "globex".to_string(),
                    plan: Plan::Pro,
                    notes_limit: None,
                },
            );
            Self { users, tenants }
        }
    }

    impl Directory for FakeDirectory {
        fn user_by_email(&self, email: &str) -> Option<User> {
            self.users.get(email).cloned()
        }

        fn tenant_by_slug(&self, slug: &str) -> Option<Tenant> {
            self.tenants.get(slug).cloned()
        }

        fn tenant_usage(&self, slug: &str) -> Option<TenantUsage> {
            self.tenants.get(slug).map(|t| TenantUsage {
                notes_count: 0,
                notes_limit: t.effective_limit(),
            })
        }
    }

    fn resolver() -> ContextResolver<FakeDirectory> {
        ContextResolver::new(TokenCodec::new(b"test-secret"), FakeDirectory::seeded())
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn admin_token(resolver: &ContextResolver<FakeDirectory>) -> String {
        resolver
            .codec
            .issue_at(
                &SessionClaims {
                    email: "admin@acme.test".to_string(),
                    role: Role::Admin,
                    tenant_slug: "acme".to_string(),
                },
                600,
                now(),
            )
            .unwrap()
    }

    #[test]
    fn resolves_a_valid_bearer_token() {
        let resolver = resolver();
        let header = format!("Bearer {}", admin_token(&resolver));

        let ctx = resolver.resolve_at(Some(&header), now()).unwrap();
        assert_eq!(ctx.user.email, "admin@acme.test");
        assert_eq!(ctx.tenant.slug, "acme");
        assert_eq!(ctx.user.tenant_slug, ctx.tenant.slug);
        assert_eq!(ctx.claims.tenant_slug, "acme");
    }

    #[test]
    fn missing_or_non_bearer_headers_yield_missing() {
        let resolver = resolver();
        let token = admin_token(&resolver);

        for header in [
            None,
            Some(""),
            Some("Bearer"),
            Some("Bearer "),
            Some(token.as_str()),
            Some("Basic dXNlcjpwYXNz"),
            Some("bearer lowercase-scheme"),
        ] {
            assert_eq!(
                resolver.resolve_at(header, now()),
                Err(AuthError::Missing),
                "header {header:?}"
            );
        }

        // Three tokens is not the two-token form either.
        let header = format!("Bearer {token} extra");
        assert_eq!(resolver.resolve_at(Some(&header), now()), Err(AuthError::Missing));
    }

    #[test]
    fn all_decode_failures_collapse_to_invalid_token() {
        let resolver = resolver();

        // Malformed.
        assert_eq!(
            resolver.resolve_at(Some("Bearer not.a"), now()),
            Err(AuthError::InvalidToken)
        );

        // Bad signature.
        let mut token = admin_token(&resolver);
        token.pop();
        token.push('A');
        let header = format!("Bearer {token}");
        assert_eq!(
            resolver.resolve_at(Some(&header), now()),
            Err(AuthError::InvalidToken)
        );

        // Expired.
        let header = format!("Bearer {}", admin_token(&resolver));
        let later = Utc.timestamp_opt(1_700_000_601, 0).unwrap();
        assert_eq!(
            resolver.resolve_at(Some(&header), later),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn unresolvable_subjects_collapse_to_invalid_token() {
        let resolver = resolver();

        // Validly signed claims for a user the directory does not know.
        let token = resolver
            .codec
            .issue_at(
                &SessionClaims {
                    email: "ghost@acme.test".to_string(),
                    role: Role::Member,
                    tenant_slug: "acme".to_string(),
                },
                600,
                now(),
            )
            .unwrap();
        let header = format!("Bearer {token}");
        assert_eq!(
            resolver.resolve_at(Some(&header), now()),
            Err(AuthError::InvalidToken)
        );

        // Known user, unknown tenant slug in the claims.
        let token = resolver
            .codec
            .issue_at(
                &SessionClaims {
                    email: "admin@acme.test".to_string(),
                    role: Role::Admin,
                    tenant_slug: "initech".to_string(),
                },
                600,
                now(),
            )
            .unwrap();
        let header = format!("Bearer {token}");
        assert_eq!(
            resolver.resolve_at(Some(&header), now()),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn cross_tenant_claims_never_produce_a_context() {
        let resolver = resolver();

        // Signed claims binding an acme user to the globex tenant.
        let token = resolver
            .codec
            .issue_at(
                &SessionClaims {
                    email: "admin@acme.test".to_string(),
                    role: Role::Admin,
                    tenant_slug: "globex".to_string(),
                },
                600,
                now(),
            )
            .unwrap();
        let header = format!("Bearer {token}");
        assert_eq!(
            resolver.resolve_at(Some(&header), now()),
            Err(AuthError::InvalidToken)
        );
    }
}
