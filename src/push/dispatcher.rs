use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::push::provider::PushProvider;
use crate::push::types::{DispatchOutcome, NotificationPayload, Token};

/// Provider 单次调用接受的最大令牌数（FCM 上限）
pub const PROVIDER_BATCH_LIMIT: usize = 500;

/// Batch Dispatcher（批次派发器）
///
/// 职责：
/// - 将令牌列表按 Provider 上限切分为连续批次（保持输入顺序）
/// - 逐批调用 Provider，等上一批完成再发下一批
/// - 捕获批次级错误进 outcome，一个批次失败不影响后续批次
pub struct BatchDispatcher {
    provider: Arc<dyn PushProvider>,
}

impl BatchDispatcher {
    pub fn new(provider: Arc<dyn PushProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// 向一组令牌派发同一份 payload，返回按批次序号排列的结果
    ///
    /// 空令牌列表是合法的 no-op，直接返回空结果
    pub async fn dispatch(
        &self,
        payload: &NotificationPayload,
        tokens: &[Token],
    ) -> Vec<DispatchOutcome> {
        if tokens.is_empty() {
            info!("[DISPATCHER] No recipients, nothing to send");
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(tokens.len().div_ceil(PROVIDER_BATCH_LIMIT));

        for (batch_index, chunk) in tokens.chunks(PROVIDER_BATCH_LIMIT).enumerate() {
            let outcome = match self.provider.send_to_many(chunk, payload).await {
                Ok(receipt) => {
                    debug!(
                        "[DISPATCHER] Batch {} sent: attempted={}, success={}, failed={}",
                        batch_index,
                        chunk.len(),
                        receipt.success_count,
                        receipt.failure_count
                    );
                    DispatchOutcome::delivered(
                        batch_index,
                        chunk.len(),
                        receipt.success_count,
                        receipt.failure_count,
                    )
                }
                Err(e) => {
                    warn!("[DISPATCHER] Batch {} failed: {}", batch_index, e);
                    DispatchOutcome::failed(batch_index, chunk.len(), e.to_string())
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }

    /// 单令牌专用路径（状态变更等单目标通知）
    ///
    /// Provider 错误同样被捕获进 outcome，不向调用方抛出
    pub async fn dispatch_single(
        &self,
        payload: &NotificationPayload,
        token: &Token,
    ) -> DispatchOutcome {
        match self.provider.send_to_one(token, payload).await {
            Ok(()) => {
                debug!("[DISPATCHER] Single send ok");
                DispatchOutcome::delivered(0, 1, 1, 0)
            }
            Err(e) => {
                warn!("[DISPATCHER] Single send failed: {}", e);
                DispatchOutcome::failed(0, 1, e.to_string())
            }
        }
    }
}
