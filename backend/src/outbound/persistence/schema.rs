//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Immutable text snippets with a soft expiry instant.
    snippets (id) {
        id -> Int8,
        title -> Varchar,
        content -> Text,
        created -> Timestamptz,
        expires -> Timestamptz,
    }
}

diesel::table! {
    /// Registered accounts. `email` is unique via `users_uc_email`.
    users (id) {
        id -> Int8,
        name -> Varchar,
        email -> Varchar,
        hashed_password -> Text,
        created -> Timestamptz,
    }
}
