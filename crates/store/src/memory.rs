//! In-memory store: tenant/user/note tables behind `RwLock`s.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use notably_auth::Directory;
use notably_core::{Note, NoteAuthor, Tenant, TenantUsage, User};

use crate::error::StoreError;

/// A user record together with its credential.
#[derive(Debug, Clone)]
pub(crate) struct UserRecord {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

/// Input for note creation.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub author_email: String,
}

/// Partial note update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Process-wide in-memory tables, tenant-isolated by slug.
///
/// Each table has its own lock; mutations of a tenant's notes are serialized
/// on the notes write lock, which also makes quota admission atomic with the
/// insert in [`InMemoryStore::create_note`].
#[derive(Debug)]
pub struct InMemoryStore {
    tenants: RwLock<HashMap<String, Tenant>>,
    users: RwLock<HashMap<String, UserRecord>>,
    notes: RwLock<HashMap<String, Vec<Note>>>,
}

impl InMemoryStore {
    /// An empty store (tests build their own fixtures on top of this).
    pub fn new() -> Self {
        Self {
            tenants: RwLock::new(HashMap::new()),
            users: RwLock::new(HashMap::new()),
            notes: RwLock::new(HashMap::new()),
        }
    }

    /// The demo dataset: two tenants, four users, three notes.
    pub fn seeded() -> Self {
        crate::seed::seeded_store()
    }

    pub(crate) fn insert_tenant(&self, tenant: Tenant) {
        if let Ok(mut tenants) = self.tenants.write() {
            tenants.insert(tenant.slug.clone(), tenant);
        }
    }

    pub(crate) fn insert_user(&self, user: User, password_hash: String) {
        if let Ok(mut users) = self.users.write() {
            users.insert(
                user.email.clone(),
                UserRecord {
                    user,
                    password_hash,
                },
            );
        }
    }

    pub(crate) fn insert_note(&self, tenant_slug: &str, note: Note) {
        if let Ok(mut notes) = self.notes.write() {
            notes.entry(tenant_slug.to_string()).or_default().push(note);
        }
    }

    // ── Directory reads ──────────────────────────────────────────────────

    pub fn user_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().ok()?;
        users.get(email).map(|rec| rec.user.clone())
    }

    pub fn tenant_by_slug(&self, slug: &str) -> Option<Tenant> {
        let tenants = self.tenants.read().ok()?;
        tenants.get(slug).cloned()
    }

    pub fn tenant_usage(&self, slug: &str) -> Option<TenantUsage> {
        let tenant = self.tenant_by_slug(slug)?;
        let notes_count = self
            .notes
            .read()
            .ok()
            .and_then(|notes| notes.get(slug).map(|list| list.len() as u32))
            .unwrap_or(0);

        Some(TenantUsage {
            notes_count,
            notes_limit: tenant.effective_limit(),
        })
    }

    // ── Credentials ──────────────────────────────────────────────────────

    /// Verify a password against the stored bcrypt hash.
    ///
    /// Returns the user only on a positive match; unknown emails and wrong
    /// passwords are indistinguishable to the caller.
    pub fn verify_credentials(&self, email: &str, password: &str) -> Option<User> {
        let rec = {
            let users = self.users.read().ok()?;
            users.get(email).cloned()?
        };

        match bcrypt::verify(password, &rec.password_hash) {
            Ok(true) => Some(rec.user),
            Ok(false) => None,
            Err(err) => {
                tracing::warn!(%err, "credential hash could not be verified");
                None
            }
        }
    }

    // ── Tenant mutations ─────────────────────────────────────────────────

    /// Upgrade a tenant to the pro plan and clear its note limit.
    ///
    /// Idempotent in effect: re-upgrading an already-pro tenant returns it
    /// unchanged. Concurrent upgrades serialize on the tenants write lock.
    pub fn upgrade(&self, slug: &str) -> Option<Tenant> {
        let mut tenants = self.tenants.write().ok()?;
        let tenant = tenants.get_mut(slug)?;
        tenant.plan = notably_core::Plan::Pro;
        tenant.notes_limit = None;
        Some(tenant.clone())
    }

    // ── Notes ────────────────────────────────────────────────────────────

    pub fn list_notes(&self, tenant_slug: &str) -> Vec<Note> {
        self.notes
            .read()
            .ok()
            .and_then(|notes| notes.get(tenant_slug).cloned())
            .unwrap_or_default()
    }

    pub fn get_note(&self, tenant_slug: &str, id: &str) -> Option<Note> {
        let notes = self.notes.read().ok()?;
        notes
            .get(tenant_slug)?
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    /// Create a note, admitting it against the tenant's quota atomically
    /// with the insert: the count check and the push happen under one write
    /// lock, so two simultaneous creations cannot both slip past the limit.
    pub fn create_note(&self, tenant_slug: &str, new: NewNote) -> Result<Note, StoreError> {
        let limit = self
            .tenant_by_slug(tenant_slug)
            .ok_or(StoreError::UnknownTenant)?
            .effective_limit();

        let mut notes = self.notes.write().map_err(|_| StoreError::UnknownTenant)?;
        let list = notes.entry(tenant_slug.to_string()).or_default();

        if let Some(limit) = limit {
            if list.len() as u32 >= limit {
                return Err(StoreError::QuotaExceeded);
            }
        }

        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            content: new.content,
            created_at: now,
            updated_at: now,
            author: NoteAuthor {
                email: new.author_email,
            },
        };
        list.push(note.clone());
        Ok(note)
    }

    pub fn update_note(&self, tenant_slug: &str, id: &str, update: NoteUpdate) -> Option<Note> {
        let mut notes = self.notes.write().ok()?;
        let note = notes.get_mut(tenant_slug)?.iter_mut().find(|n| n.id == id)?;

        if let Some(title) = update.title {
            note.title = title;
        }
        if let Some(content) = update.content {
            note.content = content;
        }
        note.updated_at = Utc::now();
        Some(note.clone())
    }

    pub fn delete_note(&self, tenant_slug: &str, id: &str) -> bool {
        let Ok(mut notes) = self.notes.write() else {
            return false;
        };
        let Some(list) = notes.get_mut(tenant_slug) else {
            return false;
        };
        let before = list.len();
        list.retain(|n| n.id != id);
        list.len() < before
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Directory for InMemoryStore {
    fn user_by_email(&self, email: &str) -> Option<User> {
        InMemoryStore::user_by_email(self, email)
    }

    fn tenant_by_slug(&self, slug: &str) -> Option<Tenant> {
        InMemoryStore::tenant_by_slug(self, slug)
    }

    fn tenant_usage(&self, slug: &str) -> Option<TenantUsage> {
        InMemoryStore::tenant_usage(self, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notably_core::{Plan, Role};

    fn new_note(title: &str) -> NewNote {
        NewNote {
            title: title.to_string(),
            content: "content".to_string(),
            author_email: "user@acme.test".to_string(),
        }
    }

    #[test]
    fn seeded_lookups_resolve() {
        let store = InMemoryStore::seeded();

        let user = store.user_by_email("admin@acme.test").unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.tenant_slug, "acme");

        let tenant = store.tenant_by_slug("acme").unwrap();
        assert_eq!(tenant.plan, Plan::Free);
        assert_eq!(tenant.notes_limit, Some(3));

        assert!(store.user_by_email("nobody@acme.test").is_none());
        assert!(store.tenant_by_slug("initech").is_none());
    }

    #[test]
    fn seeded_usage_counts_notes_per_tenant() {
        let store = InMemoryStore::seeded();

        let acme = store.tenant_usage("acme").unwrap();
        assert_eq!(acme.notes_count, 2);
        assert_eq!(acme.notes_limit, Some(3));

        let globex = store.tenant_usage("globex").unwrap();
        assert_eq!(globex.notes_count, 1);
        assert_eq!(globex.notes_limit, None);

        assert!(store.tenant_usage("initech").is_none());
    }

    #[test]
    fn credentials_verify_only_on_exact_match() {
        let store = InMemoryStore::seeded();

        let user = store.verify_credentials("user@acme.test", "password").unwrap();
        assert_eq!(user.id, "2");
        assert_eq!(user.role, Role::Member);

        assert!(store.verify_credentials("user@acme.test", "wrong").is_none());
        assert!(store.verify_credentials("ghost@acme.test", "password").is_none());
    }

    #[test]
    fn every_seeded_user_can_authenticate() {
        let store = InMemoryStore::seeded();

        for email in [
            "admin@acme.test",
            "user@acme.test",
            "admin@globex.test",
            "user@globex.test",
        ] {
            let user = store.verify_credentials(email, "password");
            assert!(user.is_some(), "seeded user {email} failed to authenticate");
        }
    }

    #[test]
    fn upgrade_clears_the_limit_and_is_idempotent() {
        let store = InMemoryStore::seeded();

        let upgraded = store.upgrade("acme").unwrap();
        assert_eq!(upgraded.plan, Plan::Pro);
        assert_eq!(upgraded.notes_limit, None);

        // Re-upgrading is a no-op returning the tenant unchanged.
        let again = store.upgrade("acme").unwrap();
        assert_eq!(again, upgraded);

        assert!(store.upgrade("initech").is_none());
    }

    #[test]
    fn create_note_admits_up_to_the_limit() {
        let store = InMemoryStore::seeded();

        // acme is seeded with 2 of 3 notes.
        let note = store.create_note("acme", new_note("third")).unwrap();
        assert_eq!(note.title, "third");
        assert_eq!(note.author.email, "user@acme.test");

        assert_eq!(
            store.create_note("acme", new_note("fourth")),
            Err(StoreError::QuotaExceeded)
        );
        assert_eq!(store.tenant_usage("acme").unwrap().notes_count, 3);
    }

    #[test]
    fn create_note_is_unmetered_after_upgrade() {
        let store = InMemoryStore::seeded();
        store.create_note("acme", new_note("third")).unwrap();
        store.upgrade("acme").unwrap();

        for i in 0..5 {
            store
                .create_note("acme", new_note(&format!("note {i}")))
                .unwrap();
        }
        assert_eq!(store.tenant_usage("acme").unwrap().notes_count, 8);
    }

    #[test]
    fn create_note_rejects_unknown_tenants() {
        let store = InMemoryStore::seeded();
        assert_eq!(
            store.create_note("initech", new_note("x")),
            Err(StoreError::UnknownTenant)
        );
    }

    #[test]
    fn note_crud_is_tenant_scoped() {
        let store = InMemoryStore::seeded();
        let note = store.create_note("acme", new_note("scoped")).unwrap();

        // Visible in its own tenant only.
        assert!(store.get_note("acme", &note.id).is_some());
        assert!(store.get_note("globex", &note.id).is_none());

        let updated = store
            .update_note(
                "acme",
                &note.id,
                NoteUpdate {
                    title: Some("renamed".to_string()),
                    content: None,
                },
            )
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert_eq!(updated.content, "content");
        assert!(updated.updated_at >= note.updated_at);

        // Cross-tenant update and delete miss.
        assert!(store
            .update_note("globex", &note.id, NoteUpdate::default())
            .is_none());
        assert!(!store.delete_note("globex", &note.id));

        assert!(store.delete_note("acme", &note.id));
        assert!(store.get_note("acme", &note.id).is_none());
        assert!(!store.delete_note("acme", &note.id));
    }
}
