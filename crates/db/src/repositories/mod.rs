//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod complaint_repo;
pub mod status_log_repo;

pub use complaint_repo::ComplaintRepo;
pub use status_log_repo::StatusLogRepo;
