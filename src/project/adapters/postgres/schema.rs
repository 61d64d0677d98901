//! Diesel schema for project persistence.

diesel::table! {
    /// Projects grouping board tasks.
    projects (id) {
        /// Project identifier.
        id -> Uuid,
        /// Project name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Progress status.
        #[max_length = 16]
        status -> Varchar,
        /// Planned start.
        start_date -> Nullable<Date>,
        /// Planned end.
        end_date -> Nullable<Date>,
        /// Creating user.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Project membership relation.
    project_members (project_id, user_id) {
        /// Project joined.
        project_id -> Uuid,
        /// Member user.
        user_id -> Uuid,
        /// Join order across the whole table.
        seq -> Int8,
        /// Join timestamp.
        joined_at -> Timestamptz,
    }
}

diesel::joinable!(project_members -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, project_members);
