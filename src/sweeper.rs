use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tracing::{error, info};

use crate::error::Result;
use crate::repository::NotificationRepository;

/// Retention Sweeper（通知清理任务）
///
/// 按固定间隔删除 ordercast_notifications 中超过保留期的行。
/// 单次清理失败只打日志，下个周期继续
pub struct RetentionSweeper {
    notifications: Arc<NotificationRepository>,
    retention_days: i64,
    sweep_interval: Duration,
}

impl RetentionSweeper {
    pub fn new(
        notifications: Arc<NotificationRepository>,
        retention_days: i64,
        sweep_interval: Duration,
    ) -> Self {
        Self {
            notifications,
            retention_days,
            sweep_interval,
        }
    }

    /// 启动清理循环
    pub async fn run(&self) {
        info!(
            "[SWEEPER] Started: retention={}d, interval={}s",
            self.retention_days,
            self.sweep_interval.as_secs()
        );

        let mut interval = tokio::time::interval(self.sweep_interval);
        // 第一个 tick 立即返回，启动时先清一次
        loop {
            interval.tick().await;
            match self.sweep().await {
                Ok(deleted) => {
                    info!("[SWEEPER] Deleted {} old notification(s)", deleted);
                }
                Err(e) => {
                    error!("[SWEEPER] Sweep failed: {}", e);
                }
            }
        }
    }

    /// 执行一次清理，返回删除行数
    pub async fn sweep(&self) -> Result<u64> {
        let cutoff = Utc::now() - chrono::Duration::days(self.retention_days);
        let deleted = self.notifications.delete_older_than(cutoff).await?;
        crate::infra::metrics::record_retention_deleted(deleted);
        Ok(deleted)
    }
}
