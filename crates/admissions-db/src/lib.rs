//! Database layer for the admissions service.
//!
//! Provides SQLite connection pooling (via `r2d2`), WAL-mode initialization,
//! and the idempotent bootstrap of the `admissions` table.
//!
//! # Design decisions
//!
//! - **SQLite with WAL mode**: a single local data file, no external database
//!   process. WAL mode allows concurrent readers with a single writer, and the
//!   engine's own locking is the only serialization the service relies on.
//! - **`r2d2` connection pool**: bounded connection reuse for handlers that
//!   each run one statement on a blocking thread.
//! - **No migration tooling**: the schema is created with
//!   `CREATE TABLE IF NOT EXISTS` at startup. Changing it requires manual
//!   intervention on the data file.

mod pool;
mod schema;

pub use pool::{create_pool, DbPool, DbRuntimeSettings, PoolError};
pub use schema::{initialize_schema, SchemaError, ADMISSIONS_TABLE};
