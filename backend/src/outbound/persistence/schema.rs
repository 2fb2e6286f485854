//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is stored lower-cased and is unique.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Registered pets. Rows are removed with their owning account.
    pets (id) {
        id -> Uuid,
        owner_user_id -> Uuid,
        name -> Varchar,
        age -> Int2,
        /// `DOG` or `CAT`.
        species -> Varchar,
        breed -> Varchar,
        owner_name -> Varchar,
        owner_contact -> Varchar,
        image -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Breed suggestions keyed by `(name, species)`.
    breeds (name, species) {
        name -> Varchar,
        species -> Varchar,
    }
}

diesel::joinable!(pets -> users (owner_user_id));
diesel::allow_tables_to_appear_in_same_query!(breeds, pets, users);
