//! Repository for the `status_log` table.

use sqlx::PgPool;

use crate::models::status_log::StatusLogEntry;

/// Column list for `status_log` queries.
const COLUMNS: &str = "log_id, complaint_id, status, assigned_to, \"timestamp\"";

/// Read access to complaint status history. Writes happen only inside
/// [`ComplaintRepo`](crate::repositories::ComplaintRepo) transactions.
pub struct StatusLogRepo;

impl StatusLogRepo {
    /// List the status history for a complaint in chronological order.
    pub async fn list_for_complaint(
        pool: &PgPool,
        complaint_id: &str,
    ) -> Result<Vec<StatusLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM status_log \
             WHERE complaint_id = $1 \
             ORDER BY \"timestamp\", log_id"
        );
        sqlx::query_as::<_, StatusLogEntry>(&query)
            .bind(complaint_id)
            .fetch_all(pool)
            .await
    }
}
