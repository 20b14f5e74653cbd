//! Access key verification.
//!
//! Two opaque keys configured on the server: the admin key grants
//! `read-only` access to the admin panel, the modify key grants
//! `read-write`. Keys travel in the JSON body of every mutating call and
//! are re-checked per call -- the server never trusts a prior
//! verification.

use cbox_core::error::CoreError;
use cbox_core::permissions::{PERMISSION_READ_ONLY, PERMISSION_READ_WRITE};

/// The configured admin and modify keys.
#[derive(Debug, Clone)]
pub struct AccessKeys {
    admin_key: String,
    modify_key: String,
}

impl AccessKeys {
    pub fn new(admin_key: String, modify_key: String) -> Self {
        Self {
            admin_key,
            modify_key,
        }
    }

    /// Load keys from `ADMIN_KEY` / `MODIFY_KEY` environment variables,
    /// with development defaults.
    pub fn from_env() -> Self {
        Self {
            admin_key: std::env::var("ADMIN_KEY").unwrap_or_else(|_| "default_admin_key".into()),
            modify_key: std::env::var("MODIFY_KEY").unwrap_or_else(|_| "default_modify_key".into()),
        }
    }

    /// The permission level a key grants, if any.
    ///
    /// The admin key is checked first, so if both keys are configured to
    /// the same value it grants `read-only`.
    pub fn permission_for(&self, key: &str) -> Option<&'static str> {
        if key == self.admin_key {
            Some(PERMISSION_READ_ONLY)
        } else if key == self.modify_key {
            Some(PERMISSION_READ_WRITE)
        } else {
            None
        }
    }

    /// Require the modify key, rejecting everything else (including the
    /// read-only admin key).
    pub fn require_modify(&self, key: &str) -> Result<(), CoreError> {
        if key == self.modify_key {
            Ok(())
        } else {
            Err(CoreError::Unauthorized("Invalid modification key".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> AccessKeys {
        AccessKeys::new("admin-secret".into(), "modify-secret".into())
    }

    #[test]
    fn admin_key_grants_read_only() {
        assert_eq!(keys().permission_for("admin-secret"), Some(PERMISSION_READ_ONLY));
    }

    #[test]
    fn modify_key_grants_read_write() {
        assert_eq!(keys().permission_for("modify-secret"), Some(PERMISSION_READ_WRITE));
    }

    #[test]
    fn unknown_key_grants_nothing() {
        assert_eq!(keys().permission_for("wrong"), None);
        assert_eq!(keys().permission_for(""), None);
    }

    #[test]
    fn require_modify_rejects_admin_key() {
        assert!(keys().require_modify("modify-secret").is_ok());
        assert!(keys().require_modify("admin-secret").is_err());
        assert!(keys().require_modify("wrong").is_err());
    }
}
