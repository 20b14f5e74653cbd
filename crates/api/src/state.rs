use std::sync::Arc;

use cbox_core::classify::ComplaintClassifier;
use cbox_core::routing::RoutingTable;

use crate::config::ServerConfig;
use crate::notifications::email::ComplaintNotifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: cbox_db::DbPool,
    /// Server configuration (keys, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Department routing table (level-1 / level-2 contacts).
    pub routing: Arc<RoutingTable>,
    /// Classifier producing category/subcategory/urgency for free text.
    pub classifier: Arc<dyn ComplaintClassifier>,
    /// Assignment email notifier (logs when SMTP is unconfigured).
    pub notifier: Arc<ComplaintNotifier>,
}
