//! Static demo dataset created at system initialization.

use chrono::{DateTime, Utc};

use notably_core::{Note, NoteAuthor, Plan, Role, Tenant, User};

use crate::memory::InMemoryStore;

/// Every seeded account uses this password.
const SEED_PASSWORD: &str = "password";

/// Low bcrypt cost for the volatile dev seed; production credentials would
/// come from a real identity source, not this module.
const SEED_BCRYPT_COST: u32 = 6;

pub(crate) fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();

    store.insert_tenant(Tenant {
        id: "acme".to_string(),
        name: "Acme Corporation".to_string(),
        slug: "acme".to_string(),
        plan: Plan::Free,
        notes_limit: Some(3),
    });
    store.insert_tenant(Tenant {
        id: "globex".to_string(),
        name: "Globex Corporation".to_string(),
        slug: "globex".to_string(),
        plan: Plan::Pro,
        notes_limit: None,
    });

    let password_hash =
        bcrypt::hash(SEED_PASSWORD, SEED_BCRYPT_COST).expect("seed password hashing failed");

    let users = [
        ("1", "admin@acme.test", Role::Admin, "acme"),
        ("2", "user@acme.test", Role::Member, "acme"),
        ("3", "admin@globex.test", Role::Admin, "globex"),
        ("4", "user@globex.test", Role::Member, "globex"),
    ];
    for (id, email, role, tenant_slug) in users {
        store.insert_user(
            User {
                id: id.to_string(),
                email: email.to_string(),
                role,
                tenant_slug: tenant_slug.to_string(),
            },
            password_hash.clone(),
        );
    }

    store.insert_note(
        "acme",
        seed_note(
            "1",
            "Welcome to Acme Notes",
            "This is your first note in the Acme tenant. You can create, edit, and delete notes here.",
            "admin@acme.test",
            "2024-01-15T10:00:00Z",
        ),
    );
    store.insert_note(
        "acme",
        seed_note(
            "2",
            "Team Meeting Notes",
            "Discussion points for the weekly team meeting. We covered project updates and upcoming deadlines.",
            "user@acme.test",
            "2024-01-16T14:30:00Z",
        ),
    );
    store.insert_note(
        "globex",
        seed_note(
            "3",
            "Globex Strategy Document",
            "Our comprehensive strategy for Q2 includes expanding into new markets and improving customer satisfaction.",
            "admin@globex.test",
            "2024-01-10T09:00:00Z",
        ),
    );

    store
}

fn seed_note(id: &str, title: &str, content: &str, author: &str, at: &str) -> Note {
    let at: DateTime<Utc> = at.parse().unwrap_or_else(|_| Utc::now());
    Note {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: at,
        updated_at: at,
        author: NoteAuthor {
            email: author.to_string(),
        },
    }
}
