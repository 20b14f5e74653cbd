//! Well-known permission level names.
//!
//! These are the `permission_level` values returned by key verification
//! and consumed by the admin controller.

/// Grants viewing the admin panel only.
pub const PERMISSION_READ_ONLY: &str = "read-only";
/// Grants viewing plus update/delete mutations.
pub const PERMISSION_READ_WRITE: &str = "read-write";
