// Schema creation run when a pool (or a pooled connection) is set up
mod sqlite;
pub use sqlite::run_migrations as run_sqlite_migrations;
