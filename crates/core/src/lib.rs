//! `notably-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** types (no HTTP or storage concerns):
//! tenants, users, notes, plans, roles, and the usage/quota view.

pub mod note;
pub mod tenant;
pub mod user;

pub use note::{Note, NoteAuthor};
pub use tenant::{Plan, Tenant, TenantUsage, DEFAULT_FREE_NOTES_LIMIT};
pub use user::{Role, User};
