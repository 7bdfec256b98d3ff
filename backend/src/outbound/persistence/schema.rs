//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly.

diesel::table! {
    /// Accounts allowed to log in.
    users (id) {
        id -> Uuid,
        /// Unique login address.
        email -> Varchar,
        /// bcrypt hash of the password.
        password_hash -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    subscribers (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// `YYYY-MM-DD`, validated before insert.
        subs_date -> Varchar,
        description -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit trail of logins and logouts.
    activity_logs (id) {
        id -> Int8,
        action -> Varchar,
        user_id -> Nullable<Uuid>,
        recorded_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, subscribers, activity_logs);
