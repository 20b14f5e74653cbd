//! Repository for the `complaints` table.
//!
//! Creation and status-changing updates also write the `status_log` table
//! in the same transaction: every status transition produces exactly one
//! log row, and a complaint is never visible without its initial entry.

use sqlx::PgPool;

use crate::models::complaint::{Complaint, CreateComplaint, UpdateComplaint};

/// Column list for `complaints` queries.
const COLUMNS: &str = "\
    complaint_id, user_input, category, subcategory, urgency, \
    status, assigned_to, created_at, updated_at";

/// Provides CRUD operations for complaints.
pub struct ComplaintRepo;

impl ComplaintRepo {
    /// Insert a new complaint with the initial `Pending` status and its
    /// first status log entry, sharing one timestamp.
    pub async fn create(pool: &PgPool, input: &CreateComplaint) -> Result<Complaint, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // `status` is omitted so the column default ('Pending') applies.
        let query = format!(
            "INSERT INTO complaints \
                (complaint_id, user_input, category, subcategory, urgency, assigned_to) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let complaint = sqlx::query_as::<_, Complaint>(&query)
            .bind(&input.complaint_id)
            .bind(&input.user_input)
            .bind(&input.category)
            .bind(&input.subcategory)
            .bind(&input.urgency)
            .bind(&input.assigned_to)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO status_log (complaint_id, status, assigned_to, \"timestamp\") \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&complaint.complaint_id)
        .bind(&complaint.status)
        .bind(&complaint.assigned_to)
        .bind(complaint.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(complaint)
    }

    /// Find a complaint by its (already normalized) id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints WHERE complaint_id = $1");
        sqlx::query_as::<_, Complaint>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all complaints, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Complaint>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complaints ORDER BY created_at DESC");
        sqlx::query_as::<_, Complaint>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Returns the updated row, or `None` if the
    /// complaint does not exist.
    ///
    /// When the update carries a `status` that differs from the stored
    /// one, a single log entry is appended in the same transaction,
    /// stamped with the new `updated_at` and the assignee in effect
    /// after the update.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        changes: &UpdateComplaint,
    ) -> Result<Option<Complaint>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let select = format!("SELECT {COLUMNS} FROM complaints WHERE complaint_id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Complaint>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE complaints \
             SET status = $1, category = $2, subcategory = $3, urgency = $4, \
                 assigned_to = $5, updated_at = now() \
             WHERE complaint_id = $6 \
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Complaint>(&query)
            .bind(changes.status.as_deref().unwrap_or(&current.status))
            .bind(changes.category.as_deref().unwrap_or(&current.category))
            .bind(changes.subcategory.as_deref().unwrap_or(&current.subcategory))
            .bind(changes.urgency.as_deref().unwrap_or(&current.urgency))
            .bind(changes.assigned_to.as_deref().unwrap_or(&current.assigned_to))
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        let status_changed = changes
            .status
            .as_deref()
            .is_some_and(|s| s != current.status);
        if status_changed {
            sqlx::query(
                "INSERT INTO status_log (complaint_id, status, assigned_to, \"timestamp\") \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(&updated.complaint_id)
            .bind(&updated.status)
            .bind(&updated.assigned_to)
            .bind(updated.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(Some(updated))
    }

    /// Delete a complaint. Its status log rows cascade away with it.
    /// Returns whether a row was actually deleted.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM complaints WHERE complaint_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
