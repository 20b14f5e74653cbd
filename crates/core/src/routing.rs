//! Department routing table.
//!
//! Maps a (category, subcategory) classification to the level-1 contact
//! (the department that handles the complaint) and the level-2 contact
//! (the escalation address). Loaded from a JSON config file of the shape:
//!
//! ```json
//! {
//!   "Billing": {
//!     "Refunds":  { "level1": "refunds@example.com", "level2": "billing.lead@example.com" },
//!     "default":  { "level1": "billing@example.com" }
//!   }
//! }
//! ```
//!
//! Lookups fall back subcategory -> per-category `"default"` -> global
//! defaults, so a sparse config still routes everything somewhere.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

/// Fallback level-1 contact when no route matches.
pub const DEFAULT_LEVEL1: &str = "general.inquiries@example.com";
/// Fallback level-2 (escalation) contact when no route matches.
pub const DEFAULT_LEVEL2: &str = "general.escalation@example.com";

/// Key of the per-category fallback route.
const DEFAULT_KEY: &str = "default";

/// A single route entry; either level may be omitted in the config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    pub level1: Option<String>,
    pub level2: Option<String>,
}

/// The full category -> subcategory -> route mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RoutingTable {
    routes: HashMap<String, HashMap<String, Route>>,
}

impl RoutingTable {
    /// Load the routing table from a JSON file.
    ///
    /// A missing or malformed file degrades to an empty table with a
    /// logged warning; every lookup then resolves to the global defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(table) => table,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to parse routing config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read routing config, using defaults");
                Self::default()
            }
        }
    }

    /// Level-1 contact for a classification (the assigned department).
    pub fn level1_department(&self, category: &str, subcategory: &str) -> String {
        self.lookup(category, subcategory, |r| r.level1.as_deref())
            .unwrap_or(DEFAULT_LEVEL1)
            .to_string()
    }

    /// Level-2 contact for a classification (the escalation address).
    pub fn level2_department(&self, category: &str, subcategory: &str) -> String {
        self.lookup(category, subcategory, |r| r.level2.as_deref())
            .unwrap_or(DEFAULT_LEVEL2)
            .to_string()
    }

    fn lookup<'a>(
        &'a self,
        category: &str,
        subcategory: &str,
        field: impl Fn(&'a Route) -> Option<&'a str>,
    ) -> Option<&'a str> {
        let routes = self.routes.get(category)?;
        routes
            .get(subcategory)
            .and_then(&field)
            .or_else(|| routes.get(DEFAULT_KEY).and_then(&field))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
