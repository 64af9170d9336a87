//! Diesel table definitions for the reservation API schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    /// Reservations taken through the standalone API.
    reservations (id) {
        id -> Int4,
        name -> Text,
        email -> Text,
        phone -> Text,
        /// Requested date, stored as supplied.
        date -> Text,
        special_requests -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Admin accounts; `password_hash` is compared verbatim.
    admin_users (id) {
        id -> Int4,
        username -> Text,
        password_hash -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(admin_users, reservations);
