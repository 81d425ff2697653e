use crate::error::{Result, ServerError};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// 通知审计仓库
///
/// 每次成功派发写入一行 ordercast_notifications，
/// RetentionSweeper 定期按 created_at 清理过期行
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 记录一次派发
    pub async fn record(
        &self,
        dispatch_id: &str,
        event_kind: &str,
        title: &str,
        body: &str,
        recipient_count: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ordercast_notifications (dispatch_id, event_kind, title, body, recipient_count)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(dispatch_id)
        .bind(event_kind)
        .bind(title)
        .bind(body)
        .bind(recipient_count)
        .execute(&self.pool)
        .await
        .map_err(|e| ServerError::Database(format!("记录通知失败: {}", e)))?;

        Ok(())
    }

    /// 删除 created_at 早于 cutoff 的通知，返回删除行数
    pub async fn delete_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM ordercast_notifications
            WHERE created_at < $1
            "#,
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| ServerError::Database(format!("清理过期通知失败: {}", e)))?;

        Ok(result.rows_affected())
    }
}
