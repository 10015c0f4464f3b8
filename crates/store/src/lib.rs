//! `notably-store` — volatile, in-memory multi-tenant storage.
//!
//! Users, tenants, and notes live in process-wide tables keyed by tenant
//! slug; lifetime is application startup to shutdown. The store implements
//! the auth crate's [`notably_auth::Directory`] seam, so a persistent
//! implementation can be swapped in behind the same contract.

pub mod error;
pub mod memory;
mod seed;

pub use error::StoreError;
pub use memory::{InMemoryStore, NewNote, NoteUpdate};
