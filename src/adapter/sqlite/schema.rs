//! Diesel table definitions.

diesel::table! {
    profiles (user_id) {
        user_id -> BigInt,
        display_name -> Text,
        address -> Text,
        registered_at -> Text,
    }
}
