//! The fixed demonstration dataset loaded into every ephemeral database.

/// Column names of `tasks`, in declaration order.
pub const TASK_COLUMNS: [&str; 6] = [
    "id",
    "title",
    "description",
    "status",
    "assignee",
    "due_date",
];

/// Schema definition and seed rows, executed as one batch before each user statement.
pub const SEED_SQL: &str = "
CREATE TABLE tasks (
    id INTEGER PRIMARY KEY,
    title VARCHAR,
    description VARCHAR,
    status VARCHAR,
    assignee VARCHAR,
    due_date DATE
);
INSERT INTO tasks VALUES
    (1, 'Design UI', 'Create wireframes and mockups for the dashboard', 'In Progress', 'Alice', '2025-07-15'),
    (2, 'Setup DB', 'Provision the database and apply the initial schema', 'Done', 'Bob', '2025-07-10'),
    (3, 'Write Docs', 'Document the public API endpoints', 'To Do', 'Charlie', '2025-07-20');
";

/// Number of rows [`SEED_SQL`] inserts.
pub const SEED_ROW_COUNT: usize = 3;
