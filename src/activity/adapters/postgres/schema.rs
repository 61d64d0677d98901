//! Diesel schema for activity log persistence.

diesel::table! {
    /// Append-only audit entries.
    activity_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Acting user.
        actor_id -> Uuid,
        /// Action kind.
        #[max_length = 50]
        action -> Varchar,
        /// Entity kind.
        #[max_length = 50]
        entity_type -> Varchar,
        /// Entity identifier.
        entity_id -> Uuid,
        /// Action-specific payload.
        details -> Jsonb,
        /// When the action happened.
        created_at -> Timestamptz,
    }
}
