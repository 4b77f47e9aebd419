//! Per-entity data access over the shared `PgPool`.
//!
//! Each store is a thin DAO for one table; business rules live in the
//! service layer. Queries use runtime bind parameters so the build does not
//! depend on a live database.

pub mod tasks;
pub mod users;

pub use tasks::TaskStore;
pub use users::UserStore;
