diesel::table! {
    users (id) {
        id -> Text,
        email -> Text,
        name -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    sessions (token) {
        token -> Text,
        user_id -> Text,
        expires_at -> Timestamptz,
    }
}

diesel::table! {
    boards (id) {
        id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        user_id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    columns (id) {
        id -> Text,
        name -> Text,
        #[sql_name = "order"]
        ordinal -> Int4,
        board_id -> Text,
    }
}

diesel::table! {
    tasks (id) {
        id -> Text,
        title -> Text,
        description -> Nullable<Text>,
        priority -> Text,
        due_date -> Nullable<Timestamptz>,
        column_id -> Text,
        user_id -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    labels (id) {
        id -> Text,
        name -> Text,
        color -> Text,
        task_id -> Text,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(boards -> users (user_id));
diesel::joinable!(columns -> boards (board_id));
diesel::joinable!(tasks -> columns (column_id));
diesel::joinable!(labels -> tasks (task_id));

diesel::allow_tables_to_appear_in_same_query!(users, sessions, boards, columns, tasks, labels);
