use crate::error::Result;
use crate::push::types::{NotificationPayload, Token};
use async_trait::async_trait;

/// 单次多目标投递的回执
#[derive(Debug, Clone, Copy, Default)]
pub struct SendReceipt {
    pub success_count: u32,
    pub failure_count: u32,
}

/// Push Provider Trait（推送提供者接口）
///
/// 派发核心只依赖这两个调用形态；具体的传输协议与鉴权是 Provider 自己的事
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// 向一批令牌投递同一份 payload（调用方保证批次不超过 Provider 上限）
    async fn send_to_many(
        &self,
        tokens: &[Token],
        payload: &NotificationPayload,
    ) -> Result<SendReceipt>;

    /// 向单个令牌投递（单目标通知的专用路径）
    async fn send_to_one(&self, token: &Token, payload: &NotificationPayload) -> Result<()>;

    /// Provider 名称（日志用）
    fn name(&self) -> &'static str;
}
