//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Normalised email; unique.
        email -> Varchar,
        full_name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        avatar_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Blog posts. `author_id` is a plain reference so posts outlive authors.
    posts (id) {
        id -> Uuid,
        title -> Varchar,
        text -> Text,
        tags -> Array<Text>,
        image_url -> Nullable<Text>,
        author_id -> Uuid,
        views_count -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
