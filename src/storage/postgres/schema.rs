//! Diesel schema for task management persistence.

diesel::table! {
    /// Users that own tasks, comments, and change-log entries.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 500]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Workflow status, constrained to the three known values.
        #[max_length = 50]
        status -> Varchar,
        /// Owning user.
        creator_id -> Uuid,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Soft-delete flag.
        archived -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Comments attached to tasks.
    comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Parent task.
        task_id -> Uuid,
        /// Authoring user.
        user_id -> Uuid,
        /// Comment body.
        content -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit trail per task.
    change_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// Acting user.
        user_id -> Uuid,
        /// Action tag.
        #[max_length = 50]
        action -> Varchar,
        /// Human-readable details.
        details -> Text,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Insertion order, breaking ties between equal timestamps.
        seq -> Int8,
    }
}

diesel::joinable!(tasks -> users (creator_id));
diesel::joinable!(comments -> tasks (task_id));
diesel::joinable!(comments -> users (user_id));
diesel::joinable!(change_logs -> tasks (task_id));
diesel::joinable!(change_logs -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, tasks, comments, change_logs);
