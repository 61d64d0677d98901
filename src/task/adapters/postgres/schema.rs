//! Diesel schema for task persistence.

diesel::table! {
    /// Board tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning project.
        project_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Priority level.
        #[max_length = 16]
        priority -> Varchar,
        /// Board column.
        #[max_length = 32]
        status -> Varchar,
        /// Ordering key within the column.
        position -> Int8,
        /// Creating user.
        created_by -> Uuid,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task-to-user assignment relation.
    task_assignees (task_id, user_id) {
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned user.
        user_id -> Uuid,
        /// Order in which the user was listed.
        ordinal -> Int4,
        /// Assignment timestamp.
        assigned_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments left on tasks.
    task_comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Commented task.
        task_id -> Uuid,
        /// Comment author.
        author_id -> Uuid,
        /// Comment text.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(task_assignees -> tasks (task_id));
diesel::joinable!(task_comments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_assignees, task_comments);
